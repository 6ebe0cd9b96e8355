//! Foreign-key difference.
//!
//! Finds the rows of one dataset whose key has no equal in another dataset,
//! after renaming the other dataset's fields into the first one's names.

use crate::{canonical_key, normalize};
use keys_core::{DiffStrategy, FieldMapping, IndexedRecord};
use std::collections::HashSet;
use tracing::debug;

/// Returns every element of `set_a` with no equivalent record in `set_b`.
///
/// `mapping` renames `set_b`'s field names into `set_a`'s before comparing.
/// The result keeps `set_a`'s order and borrows its original elements.
///
/// This indexes `set_b` by canonical key and runs in O(|A| + |B|).
///
/// # Example
///
/// ```rust
/// use keys_core::{FieldMapping, IndexedRecord};
/// use keys_validator::find_missing_foreign_keys;
///
/// let specimens = vec![
///     IndexedRecord::new(0, [("donor_id", "5")].into_iter().collect()),
///     IndexedRecord::new(1, [("donor_id", "9")].into_iter().collect()),
/// ];
/// let donors = vec![IndexedRecord::new(0, [("id", "5")].into_iter().collect())];
/// let mapping = FieldMapping::from_pairs([("id", "donor_id")]);
///
/// let missing = find_missing_foreign_keys(&specimens, &donors, &mapping);
/// assert_eq!(missing.len(), 1);
/// assert_eq!(missing[0].index, 1);
/// ```
pub fn find_missing_foreign_keys<'a>(
    set_a: &'a [IndexedRecord],
    set_b: &[IndexedRecord],
    mapping: &FieldMapping,
) -> Vec<&'a IndexedRecord> {
    debug!(
        rows = set_a.len(),
        reference_rows = set_b.len(),
        "Indexing reference keys"
    );

    let reference: HashSet<String> = set_b
        .iter()
        .map(|b| canonical_key(&normalize(&b.record, mapping)))
        .collect();

    set_a
        .iter()
        .filter(|a| !reference.contains(&canonical_key(&a.record)))
        .collect()
}

/// Same contract as [`find_missing_foreign_keys`], comparing every pair.
///
/// Runs in O(|A| × |B|); kept for small inputs and as a reference for the
/// hashed search.
pub fn find_missing_foreign_keys_pairwise<'a>(
    set_a: &'a [IndexedRecord],
    set_b: &[IndexedRecord],
    mapping: &FieldMapping,
) -> Vec<&'a IndexedRecord> {
    debug!(
        rows = set_a.len(),
        reference_rows = set_b.len(),
        "Comparing keys pairwise"
    );

    let renamed: Vec<_> = set_b.iter().map(|b| normalize(&b.record, mapping)).collect();

    set_a
        .iter()
        .filter(|a| !renamed.iter().any(|b| a.record == *b))
        .collect()
}

/// Dispatches to the search selected by `strategy`.
pub fn find_missing_foreign_keys_with<'a>(
    set_a: &'a [IndexedRecord],
    set_b: &[IndexedRecord],
    mapping: &FieldMapping,
    strategy: DiffStrategy,
) -> Vec<&'a IndexedRecord> {
    match strategy {
        DiffStrategy::Hashed => find_missing_foreign_keys(set_a, set_b, mapping),
        DiffStrategy::Pairwise => find_missing_foreign_keys_pairwise(set_a, set_b, mapping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keys_core::{Record, RecordBuilder};
    use pretty_assertions::assert_eq;

    fn row(index: usize, fields: &[(&str, &str)]) -> IndexedRecord {
        IndexedRecord::new(index, fields.iter().copied().collect::<Record>())
    }

    fn indices(rows: &[&IndexedRecord]) -> Vec<usize> {
        rows.iter().map(|r| r.index).collect()
    }

    const STRATEGIES: [DiffStrategy; 2] = [DiffStrategy::Hashed, DiffStrategy::Pairwise];

    #[test]
    fn test_mapped_match_is_found() {
        let a = vec![row(0, &[("donor_id", "5")])];
        let b = vec![row(0, &[("id", "5")])];
        let mapping = FieldMapping::from_pairs([("id", "donor_id")]);

        for strategy in STRATEGIES {
            assert!(find_missing_foreign_keys_with(&a, &b, &mapping, strategy).is_empty());
        }
    }

    #[test]
    fn test_unmapped_names_do_not_match() {
        let a = vec![row(0, &[("donor_id", "5")])];
        let b = vec![row(0, &[("id", "5")])];

        for strategy in STRATEGIES {
            let missing = find_missing_foreign_keys_with(&a, &b, &FieldMapping::new(), strategy);
            assert_eq!(indices(&missing), vec![0]);
        }
    }

    #[test]
    fn test_identity_diff_is_empty() {
        let a = vec![
            row(0, &[("k", "1"), ("p", "x")]),
            row(1, &[("k", "2"), ("p", "x")]),
            row(2, &[("k", "3"), ("p", "y")]),
        ];

        for strategy in STRATEGIES {
            assert!(
                find_missing_foreign_keys_with(&a, &a, &FieldMapping::new(), strategy).is_empty()
            );
        }
    }

    #[test]
    fn test_disjoint_sets_return_all_of_a_in_order() {
        let a = vec![row(4, &[("k", "1")]), row(2, &[("k", "2")]), row(9, &[("k", "3")])];
        let b = vec![row(0, &[("k", "7")]), row(1, &[("k", "8")])];

        for strategy in STRATEGIES {
            let missing = find_missing_foreign_keys_with(&a, &b, &FieldMapping::new(), strategy);
            assert_eq!(indices(&missing), vec![4, 2, 9]);
        }
    }

    #[test]
    fn test_returns_original_records_not_normalized() {
        let a = vec![row(3, &[("donor_id", "5")]), row(5, &[("donor_id", "6")])];
        let b = vec![row(0, &[("id", "5")])];
        let mapping = FieldMapping::from_pairs([("id", "donor_id")]);

        let missing = find_missing_foreign_keys(&a, &b, &mapping);
        assert_eq!(missing.len(), 1);
        assert!(std::ptr::eq(missing[0], &a[1]));
        assert_eq!(missing[0], &row(5, &[("donor_id", "6")]));
    }

    #[test]
    fn test_field_order_is_ignored() {
        let a = vec![row(0, &[("program", "P1"), ("donor", "D1")])];
        let b = vec![row(0, &[("donor", "D1"), ("program", "P1")])];

        for strategy in STRATEGIES {
            assert!(
                find_missing_foreign_keys_with(&a, &b, &FieldMapping::new(), strategy).is_empty()
            );
        }
    }

    #[test]
    fn test_list_order_matters() {
        let a = vec![IndexedRecord::new(
            0,
            RecordBuilder::new().values("tags", ["a", "b"]).build().unwrap(),
        )];
        let b = vec![IndexedRecord::new(
            0,
            RecordBuilder::new().values("tags", ["b", "a"]).build().unwrap(),
        )];

        for strategy in STRATEGIES {
            let missing = find_missing_foreign_keys_with(&a, &b, &FieldMapping::new(), strategy);
            assert_eq!(indices(&missing), vec![0]);
        }
    }

    #[test]
    fn test_extra_field_breaks_equality() {
        let a = vec![row(0, &[("k", "1")])];
        let b = vec![row(0, &[("k", "1"), ("extra", "x")])];

        for strategy in STRATEGIES {
            let missing = find_missing_foreign_keys_with(&a, &b, &FieldMapping::new(), strategy);
            assert_eq!(indices(&missing), vec![0]);
        }
    }

    #[test]
    fn test_empty_inputs() {
        let b = vec![row(0, &[("k", "1")])];
        let a = vec![row(0, &[("k", "1")]), row(1, &[("k", "2")])];

        for strategy in STRATEGIES {
            assert!(
                find_missing_foreign_keys_with(&[], &b, &FieldMapping::new(), strategy).is_empty()
            );
            let missing = find_missing_foreign_keys_with(&a, &[], &FieldMapping::new(), strategy);
            assert_eq!(indices(&missing), vec![0, 1]);
        }
    }

    #[test]
    fn test_bijective_mapping_is_symmetric() {
        let specimens = vec![
            row(0, &[("donor_id", "D1"), ("program_id", "P1")]),
            row(1, &[("donor_id", "D2"), ("program_id", "P1")]),
        ];
        let donors = vec![
            row(0, &[("program", "P1"), ("id", "D2")]),
            row(1, &[("id", "D1"), ("program", "P1")]),
        ];
        let to_specimen = FieldMapping::from_pairs([("id", "donor_id"), ("program", "program_id")]);
        let to_donor = FieldMapping::from_pairs([("donor_id", "id"), ("program_id", "program")]);

        for strategy in STRATEGIES {
            assert!(
                find_missing_foreign_keys_with(&specimens, &donors, &to_specimen, strategy)
                    .is_empty()
            );
            assert!(
                find_missing_foreign_keys_with(&donors, &specimens, &to_donor, strategy).is_empty()
            );
        }

        let extra = vec![row(2, &[("donor_id", "D9"), ("program_id", "P1")])];
        let specimens: Vec<IndexedRecord> = specimens.into_iter().chain(extra).collect();
        let forward = find_missing_foreign_keys(&specimens, &donors, &to_specimen);
        let backward = find_missing_foreign_keys(&donors, &specimens, &to_donor);
        assert_eq!(indices(&forward), vec![2]);
        assert!(backward.is_empty());
    }

    #[test]
    fn test_strategies_agree() {
        let a: Vec<IndexedRecord> = (0..40)
            .map(|i| {
                let k = (i % 13).to_string();
                let p = if i % 2 == 0 { "x" } else { "y" };
                row(i, &[("k", k.as_str()), ("p", p)])
            })
            .collect();
        let b: Vec<IndexedRecord> = (0..20)
            .map(|i| {
                let key = (i % 7).to_string();
                row(i, &[("key", key.as_str()), ("p", "x")])
            })
            .collect();
        let mapping = FieldMapping::from_pairs([("key", "k")]);

        let hashed = find_missing_foreign_keys(&a, &b, &mapping);
        let pairwise = find_missing_foreign_keys_pairwise(&a, &b, &mapping);
        assert_eq!(indices(&hashed), indices(&pairwise));
    }
}
