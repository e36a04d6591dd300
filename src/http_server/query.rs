//! # Query Parameter Parser
//!
//! Turns the raw query string into named parameters. Numeric parameters
//! are coerced permissively: garbage falls back to the default and out of
//! range values are clamped, never rejected.

use std::collections::HashMap;

use crate::store::coerce::parse_number;

/// Default page size for listings
pub const DEFAULT_LIMIT: usize = 50;

/// Maximum page size for listings
pub const MAX_LIMIT: usize = 100;

/// Default number of records drawn by the random endpoint
pub const DEFAULT_SAMPLE: usize = 1;

/// Maximum number of records drawn by the random endpoint
pub const MAX_SAMPLE: usize = 50;

/// Parsed query parameters
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Parse a raw query string. Undecodable input yields no parameters.
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = raw
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }
        Self { values }
    }

    /// Whether the parameter appears at all, even with an empty value
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Parameter value; repeated parameters are joined with `,`
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.join(","))
    }

    /// Parameter value, treating an empty value as absent
    pub fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// `offset`: default 0. Kept signed and unrounded; a negative offset
    /// counts back from the end of the filtered list.
    pub fn offset(&self) -> f64 {
        self.non_empty("offset")
            .and_then(|v| parse_number(&v))
            .unwrap_or(0.0)
    }

    /// `limit`: default 50, clamped into `[0, 100]`
    pub fn limit(&self) -> f64 {
        self.non_empty("limit")
            .and_then(|v| parse_number(&v))
            .map(|n| n.clamp(0.0, MAX_LIMIT as f64))
            .unwrap_or(DEFAULT_LIMIT as f64)
    }

    /// `count`: non-positive or non-numeric is 1, clamped into `[1, 50]`
    pub fn sample_size(&self) -> usize {
        self.get("count")
            .and_then(|v| parse_number(&v))
            .filter(|n| *n > 0.0)
            .map(|n| n.clamp(DEFAULT_SAMPLE as f64, MAX_SAMPLE as f64) as usize)
            .unwrap_or(DEFAULT_SAMPLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(raw: &str) -> QueryParams {
        QueryParams::parse(Some(raw))
    }

    #[test]
    fn test_parse_and_get() {
        let q = params("type=Fire&search=char&id=");
        assert_eq!(q.get("type").as_deref(), Some("Fire"));
        assert!(q.contains("id"));
        assert_eq!(q.non_empty("id"), None);
        assert_eq!(q.get("missing"), None);
    }

    #[test]
    fn test_repeated_keys_join() {
        assert_eq!(params("id=1&id=2").get("id").as_deref(), Some("1,2"));
    }

    #[test]
    fn test_offset_coercion() {
        assert_eq!(QueryParams::default().offset(), 0.0);
        assert_eq!(params("offset=10").offset(), 10.0);
        assert_eq!(params("offset=abc").offset(), 0.0);
        assert_eq!(params("offset=-4").offset(), -4.0);
        assert_eq!(params("offset=2.9").offset(), 2.9);
    }

    #[test]
    fn test_limit_coercion() {
        assert_eq!(QueryParams::default().limit(), 50.0);
        assert_eq!(params("limit=abc").limit(), 50.0);
        assert_eq!(params("limit=500").limit(), 100.0);
        assert_eq!(params("limit=-3").limit(), 0.0);
        assert_eq!(params("limit=0").limit(), 0.0);
        assert_eq!(params("limit=2.5").limit(), 2.5);
    }

    #[test]
    fn test_sample_size_coercion() {
        assert_eq!(QueryParams::default().sample_size(), 1);
        assert_eq!(params("count=abc").sample_size(), 1);
        assert_eq!(params("count=0").sample_size(), 1);
        assert_eq!(params("count=-5").sample_size(), 1);
        assert_eq!(params("count=5").sample_size(), 5);
        assert_eq!(params("count=1000").sample_size(), MAX_SAMPLE);
    }
}
