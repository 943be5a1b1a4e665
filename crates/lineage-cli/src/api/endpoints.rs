//! API endpoint URL builders
//!
//! Helper functions to construct GBIF species API URLs.

/// Build name-match URL
pub fn species_match_url(base_url: &str, name: &str) -> String {
    format!("{}/species/match?name={}", base_url, urlencoding::encode(name))
}

/// Build children listing URL for one page
pub fn species_children_url(base_url: &str, parent_key: i64, limit: u32, offset: u32) -> String {
    format!(
        "{}/species/{}/children?limit={}&offset={}",
        base_url, parent_key, limit, offset
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_match_url() {
        let url = species_match_url("https://api.gbif.org/v1", "Rosaceae");
        assert_eq!(url, "https://api.gbif.org/v1/species/match?name=Rosaceae");
    }

    #[test]
    fn test_species_match_url_encodes_name() {
        let url = species_match_url("https://api.gbif.org/v1", "Rosa canina & co");
        assert_eq!(
            url,
            "https://api.gbif.org/v1/species/match?name=Rosa%20canina%20%26%20co"
        );
    }

    #[test]
    fn test_species_children_url() {
        let url = species_children_url("https://api.gbif.org/v1", 5015, 1000, 2000);
        assert_eq!(
            url,
            "https://api.gbif.org/v1/species/5015/children?limit=1000&offset=2000"
        );
    }
}
