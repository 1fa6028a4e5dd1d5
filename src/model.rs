use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One author's share of the currently attributed lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub author: String,
    pub lines: u64,
}

/// Ordered author contributions, sorted descending by line count.
///
/// Built once per run from a live blame scan or a loaded file, grouped
/// once, then consumed by the renderer. Authors are unique; the sum of
/// all records is the repository-wide line total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionSet {
    records: Vec<ContributionRecord>,
}

impl ContributionSet {
    /// Build from raw counts, sorted descending by lines. Ties are
    /// broken by author name so output is deterministic.
    pub fn from_counts(counts: HashMap<String, u64>) -> Self {
        let mut records: Vec<ContributionRecord> = counts
            .into_iter()
            .map(|(author, lines)| ContributionRecord { author, lines })
            .collect();
        records.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.author.cmp(&b.author)));
        Self { records }
    }

    /// Wrap records as-is, preserving the caller's order.
    pub fn from_records(records: Vec<ContributionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ContributionRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ContributionRecord> {
        self.records
    }

    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| r.lines).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub total_lines: u64,
    pub records: Vec<ContributionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_counts_sorts_descending_with_name_tiebreak() {
        let mut counts = HashMap::new();
        counts.insert("bob".to_string(), 5);
        counts.insert("alice".to_string(), 12);
        counts.insert("carol".to_string(), 5);
        let set = ContributionSet::from_counts(counts);
        let order: Vec<&str> = set.records().iter().map(|r| r.author.as_str()).collect();
        assert_eq!(order, vec!["alice", "bob", "carol"]);
        assert_eq!(set.total(), 22);
    }
}
