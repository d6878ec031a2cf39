//! Property tests for the diff pass and selection.

use proptest::prelude::*;
use std::collections::HashSet;

use shiftsync_core::diff::compute_changes;
use shiftsync_core::select::Selection;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    /// Same inputs, same output: no hidden state across invocations.
    #[test]
    fn diff_is_idempotent(candidates in arb_candidates(), locals in arb_locals()) {
        let first = compute_changes(&candidates, &locals).expect("diff succeeds");
        let second = compute_changes(&candidates, &locals).expect("diff succeeds");
        prop_assert_eq!(first, second);
    }

    /// A candidate key is classified as ADD or UPDATE, never both.
    #[test]
    fn add_and_update_ids_partition_the_candidates(
        candidates in arb_candidates(),
        locals in arb_locals(),
    ) {
        let set = compute_changes(&candidates, &locals).expect("diff succeeds");
        let local_keys: HashSet<String> =
            locals.iter().map(shiftsync_core::LocalAssignment::identity_key).collect();

        let add_ids: HashSet<&str> = set.adds.iter().map(|c| c.id.as_str()).collect();
        let update_ids: HashSet<&str> = set.updates.iter().map(|c| c.id.as_str()).collect();

        prop_assert!(add_ids.is_disjoint(&update_ids));
        for id in &add_ids {
            prop_assert!(!local_keys.contains(*id), "ADD id {id} matches a local key");
        }
        for id in &update_ids {
            prop_assert!(local_keys.contains(*id), "UPDATE id {id} matches no local key");
        }
    }

    /// Deletes only ever reference remote item ids the snapshot holds.
    #[test]
    fn deletes_reference_known_item_ids(
        candidates in arb_candidates(),
        locals in arb_locals(),
    ) {
        let set = compute_changes(&candidates, &locals).expect("diff succeeds");
        let item_ids: HashSet<&str> = locals
            .iter()
            .filter_map(|a| a.lht_item_id.as_deref())
            .collect();
        for delete in &set.deletes {
            prop_assert!(item_ids.contains(delete.id.as_str()));
        }
    }

    /// Empty snapshot: every candidate becomes an ADD, nothing else.
    #[test]
    fn empty_snapshot_yields_only_adds(candidates in arb_candidates()) {
        let set = compute_changes(&candidates, &[]).expect("diff succeeds");
        prop_assert_eq!(set.adds.len(), candidates.len());
        prop_assert!(set.updates.is_empty());
        prop_assert!(set.deletes.is_empty());
    }

    /// Empty fetch: every remotely-provisioned record is deleted.
    #[test]
    fn empty_fetch_deletes_every_provisioned_record(locals in arb_locals()) {
        let set = compute_changes(&[], &locals).expect("diff succeeds");
        let expected: Vec<&str> = locals
            .iter()
            .filter_map(|a| a.lht_item_id.as_deref())
            .collect();
        let actual: Vec<&str> = set.deletes.iter().map(|c| c.id.as_str()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(set.adds.is_empty());
        prop_assert!(set.updates.is_empty());
    }

    /// Confirming a full selection is the identity; an empty one is empty.
    #[test]
    fn selection_extremes(candidates in arb_candidates(), locals in arb_locals()) {
        let set = compute_changes(&candidates, &locals).expect("diff succeeds");
        let mut selection = Selection::new(&set);
        prop_assert_eq!(selection.confirm(&set), set.clone());
        selection.deselect_all();
        prop_assert!(selection.confirm(&set).is_empty());
        selection.select_all();
        prop_assert_eq!(selection.confirm(&set), set);
    }
}
