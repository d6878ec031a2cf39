//! The diff pass: partitions ERP candidates against the local snapshot.
//!
//! Each candidate either matches an existing ERP-origin local record by
//! identity key or it does not. Non-matches become ADDs. Matches with a
//! field-level difference become UPDATEs when the local record is fully
//! provisioned remotely; matches without a difference produce nothing.
//! Local records left unmatched at the end become DELETEs when they carry a
//! remote item id.
//!
//! # Invariants
//!
//! - A candidate lands in at most one bucket.
//! - Output ordering is insertion order within each bucket.
//! - All working state is constructed per invocation; two calls with the
//!   same inputs produce identical output.
//!
//! Known weakness, kept deliberately: the processed-key set is keyed on the
//! remote item id with a shared `"unknown"` sentinel for unprovisioned
//! records, so one such record can mask another's DELETE classification.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::error::InvalidDate;
use crate::model::assignment::{CanonicalAssignment, LocalAssignment};
use crate::model::change::{
    AddPayload, ChangeItem, ChangeKind, ChangePayload, DeletePayload, ItemMetadata, ItemUpdate,
    UpdatePayload,
};
use crate::shift::{ShiftRange, resolve_shift_range};

/// The three disjoint change buckets produced by one diff pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeSet {
    pub adds: Vec<ChangeItem>,
    pub updates: Vec<ChangeItem>,
    pub deletes: Vec<ChangeItem>,
}

impl ChangeSet {
    /// Total number of change items across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adds.len() + self.updates.len() + self.deletes.len()
    }

    /// True when no changes were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    /// Iterate all items, adds first, then updates, then deletes.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeItem> {
        self.adds
            .iter()
            .chain(self.updates.iter())
            .chain(self.deletes.iter())
    }
}

/// Partition `candidates` against `existing` ERP-origin local assignments.
///
/// Callers are expected to pre-filter `existing` to ERP imports; records
/// from other origins would otherwise be classified for deletion.
///
/// Fails only when a candidate carries a workday that does not resolve to a
/// shift range; candidates that came through the normalizer cannot trigger
/// this.
pub fn compute_changes(
    candidates: &[CanonicalAssignment],
    existing: &[LocalAssignment],
) -> Result<ChangeSet, InvalidDate> {
    let mut processed: HashSet<String> = HashSet::new();
    let mut set = ChangeSet::default();

    for candidate in candidates {
        let key = candidate.identity_key();
        let range = resolve_shift_range(&candidate.workday_code, candidate.shift)?;

        // First match wins; a duplicate candidate key re-examines the same
        // local record and may emit a duplicate change item. Tolerated.
        match existing.iter().find(|a| a.identity_key() == key) {
            None => set.adds.push(add_item(candidate, &range)),
            Some(found) => {
                processed.insert(found.item_key().to_string());

                if !has_changed(candidate, found) {
                    continue;
                }
                if found.lht_group_id.is_some() && found.lht_item_id.is_some() {
                    set.updates.push(update_item(candidate, found, &range));
                } else {
                    // A partially-provisioned record cannot be safely
                    // rewritten remotely; drop the change.
                    debug!(
                        identity_key = %key,
                        "changed match lacks remote identifiers, update skipped"
                    );
                }
            }
        }
    }

    for assignment in existing {
        if processed.contains(assignment.item_key()) {
            continue;
        }
        if assignment.lht_item_id.is_none() {
            // Not remotely provisioned; nothing to delete through this path.
            continue;
        }
        set.deletes.push(delete_item(assignment));
    }

    Ok(set)
}

/// Field-level change test between a candidate and its matched local record.
#[allow(clippy::float_cmp)] // exact compare: the feed value either changed or it did not
fn has_changed(candidate: &CanonicalAssignment, local: &LocalAssignment) -> bool {
    local.batch != candidate.planned_quantity
        || local.code != candidate.operator_code
        || !local.op_number.contains(&candidate.process_id)
}

fn add_item(candidate: &CanonicalAssignment, range: &ShiftRange) -> ChangeItem {
    ChangeItem {
        id: candidate.identity_key(),
        kind: ChangeKind::Add,
        title: candidate.work_order.clone(),
        subtitle: format!(
            "{} on {}, qty {}",
            candidate.part_number,
            candidate.work_center_code,
            fmt_qty(candidate.planned_quantity)
        ),
        diff: None,
        payload: ChangePayload::Add(AddPayload {
            device_id: candidate.device_id.clone(),
            start: range.start_iso(),
            end: range.end_iso(),
            metadata: ItemMetadata::for_candidate(candidate),
        }),
    }
}

fn update_item(
    candidate: &CanonicalAssignment,
    local: &LocalAssignment,
    range: &ShiftRange,
) -> ChangeItem {
    // Guarded by the caller; fall back to the raw key forms rather than
    // panicking if the guard is ever loosened.
    let group_id = local.lht_group_id.clone().unwrap_or_default();
    let item_id = local.item_key().to_string();

    ChangeItem {
        id: candidate.identity_key(),
        kind: ChangeKind::Update,
        title: candidate.work_order.clone(),
        subtitle: format!(
            "{} on {}",
            candidate.part_number, candidate.work_center_code
        ),
        diff: Some(format!(
            "Qty: {} → {}",
            fmt_qty(local.batch),
            fmt_qty(candidate.planned_quantity)
        )),
        payload: ChangePayload::Update(UpdatePayload {
            group_id,
            device_id: candidate.device_id.clone(),
            items: vec![ItemUpdate {
                id: item_id,
                segment_start: range.start_iso(),
                segment_end: range.end_iso(),
                metadata: ItemMetadata::for_candidate(candidate),
            }],
        }),
    }
}

fn delete_item(assignment: &LocalAssignment) -> ChangeItem {
    let item_id = assignment.item_key().to_string();
    ChangeItem {
        id: item_id.clone(),
        kind: ChangeKind::Delete,
        title: assignment.work_order.clone(),
        subtitle: format!(
            "{} on {}",
            assignment.part_number, assignment.work_center_code
        ),
        diff: None,
        payload: ChangePayload::Delete(DeletePayload {
            device_id: assignment.lht_device_id.clone(),
            item_id,
        }),
    }
}

/// Render a quantity the way operators read it: integral values without a
/// fractional part.
#[allow(clippy::cast_possible_truncation)]
fn fmt_qty(qty: f64) -> String {
    if qty.is_finite() && qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{qty}")
    }
}
