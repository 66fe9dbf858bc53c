//! Bookkeeping for the set of cluster labels active in an assignment
use twill_utils::smallest_unused_label;

/// The cluster labels live in an assignment, plus the id a newborn cluster
/// would take.
///
/// The table is rebuilt from the assignment at the top of every sweep because
/// clusters are born and die as labels are resampled. Entry 0 is always the
/// sentinel, the smallest non-negative id absent from the assignment, and
/// the remaining entries are the active labels in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<usize>,
}

impl LabelTable {
    pub fn from_asgn(asgn: &[usize]) -> Self {
        let mut active: Vec<usize> = asgn.to_vec();
        active.sort_unstable();
        active.dedup();

        let sentinel = smallest_unused_label(&active);

        let mut labels = Vec::with_capacity(active.len() + 1);
        labels.push(sentinel);
        labels.extend(active);

        LabelTable { labels }
    }

    /// The id a newly-born cluster would take
    #[inline]
    pub fn sentinel(&self) -> usize {
        self.labels[0]
    }

    /// Sentinel first, then the active labels ascending
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of table entries (active labels plus the sentinel)
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Validates the table against the assignment it was built from
    pub fn validate(&self, asgn: &[usize]) -> PartitionDiagnostics {
        PartitionDiagnostics::new(self, asgn)
    }
}

/// The possible ways label-table bookkeeping can go wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionDiagnostics {
    /// Every assignment entry appears in the table
    asgn_labels_all_in_table: bool,
    /// Every non-sentinel table entry has at least one member
    active_labels_all_occupied: bool,
    /// The sentinel id is not assigned to any observation
    sentinel_unused: bool,
    /// The sentinel is the smallest id absent from the assignment
    sentinel_is_minimal: bool,
}

impl PartitionDiagnostics {
    pub fn new(table: &LabelTable, asgn: &[usize]) -> Self {
        let active = &table.labels()[1..];
        let sentinel = table.sentinel();

        PartitionDiagnostics {
            asgn_labels_all_in_table: asgn
                .iter()
                .all(|z| active.binary_search(z).is_ok()),
            active_labels_all_occupied: active
                .iter()
                .all(|k| asgn.iter().any(|z| z == k)),
            sentinel_unused: !asgn.iter().any(|&z| z == sentinel),
            sentinel_is_minimal: (0..sentinel)
                .all(|k| asgn.iter().any(|&z| z == k)),
        }
    }

    /// `true` if none of the diagnostics was violated
    pub fn is_valid(&self) -> bool {
        self.asgn_labels_all_in_table
            && self.active_labels_all_occupied
            && self.sentinel_unused
            && self.sentinel_is_minimal
    }
}

/// Per-label member counts of `asgn`, sorted by count descending, ties by
/// label ascending.
pub fn cluster_counts(asgn: &[usize]) -> Vec<(usize, usize)> {
    let table = LabelTable::from_asgn(asgn);
    let mut counts: Vec<(usize, usize)> = table.labels()[1..]
        .iter()
        .map(|&k| (k, asgn.iter().filter(|&&z| z == k).count()))
        .collect();
    counts.sort_by(|(ka, na), (kb, nb)| nb.cmp(na).then(ka.cmp(kb)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_smallest_absent_id() {
        let table = LabelTable::from_asgn(&[0, 2, 2, 5]);
        assert_eq!(table.sentinel(), 1);
        assert_eq!(table.labels(), &[1, 0, 2, 5]);
    }

    #[test]
    fn sentinel_extends_dense_label_range() {
        let table = LabelTable::from_asgn(&[0, 1, 2, 1]);
        assert_eq!(table.sentinel(), 3);
    }

    #[test]
    fn rebuilding_from_unchanged_asgn_is_deterministic() {
        let asgn = vec![4, 0, 4, 1, 1, 0, 7];
        let a = LabelTable::from_asgn(&asgn);
        let b = LabelTable::from_asgn(&asgn);
        assert_eq!(a, b);
    }

    #[test]
    fn table_len_is_n_active_plus_one() {
        let table = LabelTable::from_asgn(&[3, 3, 3]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn diagnostics_pass_for_consistent_table() {
        let asgn = vec![0, 2, 2, 5, 0];
        let table = LabelTable::from_asgn(&asgn);
        assert!(table.validate(&asgn).is_valid());
    }

    #[test]
    fn diagnostics_catch_stale_table() {
        let table = LabelTable::from_asgn(&[0, 1, 1]);
        // the assignment moved on; label 1 died and 2 was born
        let stale_against = vec![0, 2, 2];
        assert!(!table.validate(&stale_against).is_valid());
    }

    #[test]
    fn counts_sum_to_n_and_sort_descending() {
        let asgn = vec![1, 1, 4, 4, 4, 9];
        let counts = cluster_counts(&asgn);
        assert_eq!(counts, vec![(4, 3), (1, 2), (9, 1)]);
        let n: usize = counts.iter().map(|(_, ct)| ct).sum();
        assert_eq!(n, asgn.len());
    }

    #[test]
    fn counts_break_ties_by_label() {
        let asgn = vec![3, 0, 3, 0];
        assert_eq!(cluster_counts(&asgn), vec![(0, 2), (3, 2)]);
    }
}
