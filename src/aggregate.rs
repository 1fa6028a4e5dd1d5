use crate::error::{PieError, Result};
use crate::model::{ContributionRecord, ContributionSet};
use std::collections::HashMap;

/// Label for the synthetic bucket that absorbs small contributors.
pub const OTHER_LABEL: &str = "Other";

/// Sum per-file author counts into one repository-wide mapping.
///
/// `None` entries mark files whose blame failed; they are skipped.
/// Merging is commutative, so per-file results may arrive in any order.
pub fn merge<I>(results: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = Option<HashMap<String, u64>>>,
{
    let mut merged: HashMap<String, u64> = HashMap::new();
    for counts in results.into_iter().flatten() {
        for (author, lines) in counts {
            *merged.entry(author).or_insert(0) += lines;
        }
    }
    merged
}

/// Fold every record below `threshold_percent` of the total into a
/// trailing "Other" record. The "Other" record is appended even when
/// its value is zero. Order of surviving records is preserved.
pub fn group_long_tail(set: ContributionSet, threshold_percent: f64) -> Result<ContributionSet> {
    let total = set.total();
    if total == 0 {
        return Err(PieError::InvalidInput(
            "total line count is zero, nothing to group".to_string(),
        ));
    }
    let threshold = total as f64 * threshold_percent;

    let mut kept = Vec::with_capacity(set.len() + 1);
    let mut other = 0u64;
    for record in set.into_records() {
        if (record.lines as f64) < threshold {
            other += record.lines;
        } else {
            kept.push(record);
        }
    }
    kept.push(ContributionRecord {
        author: OTHER_LABEL.to_string(),
        lines: other,
    });

    Ok(ContributionSet::from_records(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(entries: &[(&str, u64)]) -> ContributionSet {
        ContributionSet::from_records(
            entries
                .iter()
                .map(|(author, lines)| ContributionRecord {
                    author: author.to_string(),
                    lines: *lines,
                })
                .collect(),
        )
    }

    fn counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(author, lines)| (author.to_string(), *lines))
            .collect()
    }

    #[test]
    fn merge_sums_counts_and_skips_failures() {
        let merged = merge(vec![
            Some(counts(&[("A", 3), ("B", 2)])),
            None,
            Some(counts(&[("A", 1)])),
        ]);
        assert_eq!(merged, counts(&[("A", 4), ("B", 2)]));
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge(Vec::new()).is_empty());
    }

    #[test]
    fn group_long_tail_folds_small_contributors() {
        let grouped = group_long_tail(set(&[("A", 90), ("B", 5), ("C", 5)]), 0.10).unwrap();
        assert_eq!(
            grouped.into_records(),
            set(&[("A", 90), ("Other", 10)]).into_records()
        );
    }

    #[test]
    fn group_long_tail_conserves_total() {
        let input = set(&[("A", 70), ("B", 17), ("C", 9), ("D", 3), ("E", 1)]);
        let total = input.total();
        let grouped = group_long_tail(input, 0.05).unwrap();
        assert_eq!(grouped.total(), total);
    }

    #[test]
    fn zero_threshold_appends_empty_other() {
        let grouped = group_long_tail(set(&[("A", 8), ("B", 2)]), 0.0).unwrap();
        assert_eq!(
            grouped.into_records(),
            set(&[("A", 8), ("B", 2), ("Other", 0)]).into_records()
        );
    }

    #[test]
    fn zero_total_is_rejected() {
        let err = group_long_tail(set(&[("A", 0)]), 0.05).unwrap_err();
        assert!(matches!(err, PieError::InvalidInput(_)));
    }

    #[test]
    fn surviving_order_is_preserved() {
        let grouped = group_long_tail(set(&[("B", 40), ("A", 40), ("C", 20)]), 0.0).unwrap();
        let order: Vec<String> = grouped
            .into_records()
            .into_iter()
            .map(|r| r.author)
            .collect();
        assert_eq!(order, vec!["B", "A", "C", "Other"]);
    }
}
