//! Concurrent resolution-and-expansion pipeline
//!
//! Each name is resolved and, when resolved, expanded into rows. The rows of a
//! name are written as one batch together with the success/failure tally,
//! under the single lock guarding [`RunState`]. Network work happens outside
//! the lock.

use crate::api::TaxonomySource;
use crate::config::{ExecutionMode, RetryPolicy};
use crate::expander::expand;
use crate::output::RowSink;
use crate::resolver::resolve;
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use lineage_common::{OutputRow, Rank};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Counters and output sink shared by every worker of one run
pub struct RunState<K> {
    success: usize,
    failure: usize,
    sink: K,
}

impl<K: RowSink> RunState<K> {
    pub fn new(sink: K) -> Self {
        Self {
            success: 0,
            failure: 0,
            sink,
        }
    }

    pub fn success_count(&self) -> usize {
        self.success
    }

    pub fn failure_count(&self) -> usize {
        self.failure
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Tally one name and append its rows
    ///
    /// A failed write is logged; the tally still counts the name.
    pub fn record(&mut self, outcome: &NameOutcome) {
        if outcome.resolved {
            self.success += 1;
        } else {
            self.failure += 1;
        }

        if let Err(e) = self.sink.write_rows(&outcome.rows) {
            error!(name = %outcome.name, error = %e, "Error writing to output file");
        }
    }
}

/// Everything produced for one input name
#[derive(Debug, Clone, PartialEq)]
pub struct NameOutcome {
    pub name: String,
    pub rows: Vec<OutputRow>,
    /// False when the name could not be resolved
    pub resolved: bool,
}

/// Final tallies of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failure: usize,
}

/// Drives names through resolution and expansion
pub struct Pipeline<S> {
    source: S,
    input_rank: Rank,
    output_ranks: Vec<Rank>,
    policy: RetryPolicy,
    mode: ExecutionMode,
}

impl<S: TaxonomySource> Pipeline<S> {
    /// `output_ranks` must already be validated against `input_rank`
    pub fn new(
        source: S,
        input_rank: Rank,
        output_ranks: Vec<Rank>,
        policy: RetryPolicy,
        mode: ExecutionMode,
    ) -> Self {
        Self {
            source,
            input_rank,
            output_ranks,
            policy,
            mode,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve and expand one name
    #[instrument(skip(self), level = "debug")]
    pub async fn process_name(&self, name: &str) -> NameOutcome {
        let taxon = resolve(&self.source, name, &self.policy).await;

        if !taxon.is_resolved() {
            return NameOutcome {
                name: name.to_string(),
                rows: vec![OutputRow::new(self.input_rank, name, &self.output_ranks)],
                resolved: false,
            };
        }

        let rows = expand(
            &self.source,
            &taxon,
            self.input_rank,
            &self.output_ranks,
            &self.policy,
        )
        .await;

        NameOutcome {
            name: name.to_string(),
            rows,
            resolved: true,
        }
    }

    async fn process_and_record<K: RowSink>(&self, name: &str, state: &Mutex<RunState<K>>) {
        let outcome = self.process_name(name).await;
        state.lock().await.record(&outcome);
    }

    /// Process every name and record the results in `state`
    ///
    /// `progress` advances once per completed name.
    pub async fn run<K: RowSink>(
        &self,
        names: &[String],
        state: &Mutex<RunState<K>>,
        progress: &ProgressBar,
    ) -> RunSummary {
        match self.mode {
            ExecutionMode::Sequential => {
                for name in names {
                    self.process_and_record(name, state).await;
                    progress.inc(1);
                    sleep(self.policy.request_delay).await;
                }
            },
            ExecutionMode::Pooled { workers } => {
                stream::iter(names)
                    .map(|name| self.process_and_record(name, state))
                    .buffer_unordered(workers.max(1))
                    .for_each(|()| {
                        progress.inc(1);
                        futures::future::ready(())
                    })
                    .await;
            },
        }
        progress.finish();

        let state = state.lock().await;
        let summary = RunSummary {
            total: names.len(),
            success: state.success_count(),
            failure: state.failure_count(),
        };

        info!(
            success = summary.success,
            failures = summary.failure,
            "Processing completed"
        );

        summary
    }
}
