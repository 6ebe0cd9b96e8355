//! Duplicate key detection.
//!
//! Groups the rows of one dataset by canonical key. Every row in a group of two
//! or more breaks uniqueness.

use crate::canonical_key;
use keys_core::IndexedRecord;
use std::collections::HashMap;
use tracing::debug;

/// Rows sharing one canonical key.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup<'a> {
    /// Canonical key shared by every row of the group
    pub key: String,
    /// Rows with that key, in input order
    pub rows: Vec<&'a IndexedRecord>,
}

/// Groups rows whose canonical key occurs more than once.
///
/// Each canonical key is computed once per row. Group order is unspecified;
/// rows inside a group keep their input order.
pub fn group_duplicate_keys(set: &[IndexedRecord]) -> Vec<DuplicateGroup<'_>> {
    let mut groups: HashMap<String, Vec<&IndexedRecord>> = HashMap::with_capacity(set.len());

    for row in set {
        groups.entry(canonical_key(&row.record)).or_default().push(row);
    }

    let duplicates: Vec<DuplicateGroup<'_>> = groups
        .into_iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(key, rows)| DuplicateGroup { key, rows })
        .collect();

    debug!(
        rows = set.len(),
        duplicate_keys = duplicates.len(),
        "Grouped rows by canonical key"
    );

    duplicates
}

/// Returns every row whose canonical key occurs at least twice in `set`.
///
/// The output is unordered; sort it by `index` when a stable order is needed.
///
/// # Example
///
/// ```rust
/// use keys_core::IndexedRecord;
/// use keys_validator::find_duplicate_keys;
///
/// let rows = vec![
///     IndexedRecord::new(0, [("k", "1")].into_iter().collect()),
///     IndexedRecord::new(1, [("k", "1")].into_iter().collect()),
///     IndexedRecord::new(2, [("k", "2")].into_iter().collect()),
/// ];
///
/// let mut duplicates: Vec<usize> = find_duplicate_keys(&rows).iter().map(|r| r.index).collect();
/// duplicates.sort_unstable();
/// assert_eq!(duplicates, vec![0, 1]);
/// ```
pub fn find_duplicate_keys(set: &[IndexedRecord]) -> Vec<&IndexedRecord> {
    group_duplicate_keys(set)
        .into_iter()
        .flat_map(|group| group.rows)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keys_core::{Record, RecordBuilder};
    use pretty_assertions::assert_eq;

    fn row(index: usize, fields: &[(&str, &str)]) -> IndexedRecord {
        IndexedRecord::new(index, fields.iter().copied().collect::<Record>())
    }

    fn sorted_indices(rows: &[&IndexedRecord]) -> Vec<usize> {
        let mut indices: Vec<usize> = rows.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn test_finds_duplicated_rows_only() {
        let set = vec![row(0, &[("k", "1")]), row(1, &[("k", "1")]), row(2, &[("k", "2")])];

        let duplicates = find_duplicate_keys(&set);
        assert_eq!(sorted_indices(&duplicates), vec![0, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(find_duplicate_keys(&[]).is_empty());
        assert!(group_duplicate_keys(&[]).is_empty());
    }

    #[test]
    fn test_unique_input() {
        let set = vec![row(0, &[("k", "1")]), row(1, &[("k", "2")]), row(2, &[("k", "3")])];
        assert!(find_duplicate_keys(&set).is_empty());
    }

    #[test]
    fn test_field_order_does_not_hide_duplicates() {
        let set = vec![
            row(0, &[("program", "P1"), ("donor", "D1")]),
            row(1, &[("donor", "D1"), ("program", "P1")]),
        ];

        assert_eq!(sorted_indices(&find_duplicate_keys(&set)), vec![0, 1]);
    }

    #[test]
    fn test_list_order_distinguishes_keys() {
        let set = vec![
            IndexedRecord::new(0, RecordBuilder::new().values("tags", ["a", "b"]).build().unwrap()),
            IndexedRecord::new(1, RecordBuilder::new().values("tags", ["b", "a"]).build().unwrap()),
        ];

        assert!(find_duplicate_keys(&set).is_empty());
    }

    #[test]
    fn test_every_member_of_a_triple_is_reported() {
        let set = vec![
            row(0, &[("k", "1")]),
            row(1, &[("k", "2")]),
            row(2, &[("k", "1")]),
            row(3, &[("k", "2")]),
            row(4, &[("k", "1")]),
            row(5, &[("k", "3")]),
        ];

        assert_eq!(sorted_indices(&find_duplicate_keys(&set)), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_groups_keep_input_order() {
        let set = vec![row(7, &[("k", "1")]), row(2, &[("k", "1")]), row(5, &[("k", "2")])];

        let groups = group_duplicate_keys(&set);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, r#"{"k":"1"}"#);
        assert_eq!(
            groups[0].rows.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![7, 2]
        );
    }
}
