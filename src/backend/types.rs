use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

pub const PLACEHOLDER_NAME: &str = "Loading";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    pub full_name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub open_prs: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
}

impl RepositoryRecord {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            owner: None,
            archived: false,
            open_issues: 0,
            open_prs: 0,
            description: None,
            default_branch: None,
            fork: false,
            private: false,
            organization: None,
            parent: None,
        }
    }

    /// Row shown before the first repository fetch lands.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_NAME)
    }

    pub fn owner_or_empty(&self) -> &str {
        self.owner.as_deref().unwrap_or("")
    }
}

/// Opaque "last updated" value reported by `/db/updated`.
///
/// The backend currently sends an integer epoch (or `-1` when it has never
/// refreshed), but nothing here depends on that: numbers compare numerically,
/// strings lexically, and numbers never order against strings. Integers are
/// kept exact so values past 2^53 still compare correctly.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Freshness {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Freshness {
    /// True when `self` should replace `current`. Absent values are older than
    /// anything.
    pub fn is_newer_than(&self, current: Option<&Freshness>) -> bool {
        match current {
            None => true,
            Some(current) => self.partial_cmp(current) == Some(Ordering::Greater),
        }
    }

    pub fn is_never(&self) -> bool {
        match self {
            Freshness::Integer(value) => *value < 0,
            Freshness::Float(value) => *value < 0.0,
            Freshness::Text(_) => false,
        }
    }
}

impl PartialOrd for Freshness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Freshness::Integer(left), Freshness::Integer(right)) => Some(left.cmp(right)),
            (Freshness::Float(left), Freshness::Float(right)) => left.partial_cmp(right),
            (Freshness::Integer(left), Freshness::Float(right)) => (*left as f64).partial_cmp(right),
            (Freshness::Float(left), Freshness::Integer(right)) => left.partial_cmp(&(*right as f64)),
            (Freshness::Text(left), Freshness::Text(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            _ if self.is_never() => write!(f, "never"),
            Freshness::Integer(value) => write!(f, "{}", value),
            Freshness::Float(value) => write!(f, "{}", value),
            Freshness::Text(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Freshness, RepositoryRecord};

    #[test]
    fn record_decodes_without_optional_fields() {
        let record: RepositoryRecord = serde_json::from_str(
            r#"{"full_name":"octo/widgets","owner":null,"archived":false,"open_issues":4}"#,
        )
        .expect("decode record");
        assert_eq!(record.full_name, "octo/widgets");
        assert_eq!(record.owner_or_empty(), "");
        assert_eq!(record.open_prs, 0);
        assert!(record.description.is_none());
    }

    #[test]
    fn record_ignores_unknown_fields() {
        let record: RepositoryRecord = serde_json::from_str(
            r#"{"full_name":"a/b","owner":"a","archived":true,"open_issues":0,"open_prs":2,"last_updated":1700000000.5,"extra":[1]}"#,
        )
        .expect("decode record");
        assert!(record.archived);
        assert_eq!(record.open_prs, 2);
    }

    #[test]
    fn freshness_decodes_numbers_and_strings() {
        let number: Freshness = serde_json::from_str("1700000000").expect("number");
        assert_eq!(number, Freshness::Integer(1_700_000_000));
        let text: Freshness = serde_json::from_str("\"2024-01-02T03:04:05\"").expect("text");
        assert_eq!(text, Freshness::Text("2024-01-02T03:04:05".to_string()));
    }

    #[test]
    fn freshness_only_strictly_greater_is_newer() {
        let current = Freshness::Integer(10);
        assert!(Freshness::Integer(11).is_newer_than(Some(&current)));
        assert!(!Freshness::Integer(10).is_newer_than(Some(&current)));
        assert!(!Freshness::Integer(9).is_newer_than(Some(&current)));
        assert!(Freshness::Integer(-1).is_newer_than(None));
    }

    #[test]
    fn mixed_freshness_kinds_are_never_newer() {
        let current = Freshness::Text("2024".to_string());
        assert!(!Freshness::Integer(5000).is_newer_than(Some(&current)));
    }

    #[test]
    fn large_integer_timestamps_stay_distinct() {
        let current: Freshness = serde_json::from_str("9007199254740993").expect("current");
        let next: Freshness = serde_json::from_str("9007199254740994").expect("next");
        assert!(next.is_newer_than(Some(&current)));
        assert!(!current.is_newer_than(Some(&next)));
    }

    #[test]
    fn integers_and_floats_compare_numerically() {
        let float: Freshness = serde_json::from_str("1700000000.5").expect("float");
        assert_eq!(float, Freshness::Float(1_700_000_000.5));
        assert!(float.is_newer_than(Some(&Freshness::Integer(1_700_000_000))));
        assert!(Freshness::Integer(1_700_000_001).is_newer_than(Some(&float)));
        assert_eq!(Freshness::Float(-1.0).to_string(), "never");
    }

    #[test]
    fn freshness_display_formats_sentinel_and_integers() {
        assert_eq!(Freshness::Integer(-1).to_string(), "never");
        assert_eq!(Freshness::Integer(1_700_000_000).to_string(), "1700000000");
        assert_eq!(Freshness::Text("yesterday".to_string()).to_string(), "yesterday");
    }
}
