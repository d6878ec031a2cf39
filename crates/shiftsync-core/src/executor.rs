//! The apply pass: selected changes to one combined remote batch.
//!
//! Planning is pure and separated from submission so callers can inspect
//! (or dry-run) the exact wire body. Submission is a single remote call; on
//! failure the entire batch is unapplied and the caller retries or gives up.
//! There is no partial commit and no rollback.

use serde::Serialize;
use tracing::{debug, warn};

use crate::batch::{BatchRequest, GroupCreate, GroupUpdate, ItemOps, NewItem};
use crate::diff::ChangeSet;
use crate::error::SyncError;
use crate::model::assignment::LocalAssignment;
use crate::model::change::{ChangeItem, ChangePayload};
use crate::remote::EventGroupApi;
use crate::shift::Shift;

/// Counts reported after a successful apply.
///
/// All zeros with `Ok` means "nothing needed doing", which callers must
/// keep distinct from a failed apply (an `Err`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl SyncResult {
    fn of(batch: &BatchRequest) -> Self {
        let created = batch.create.iter().map(|g| g.items.len()).sum::<usize>()
            + batch
                .update
                .iter()
                .map(|g| g.items.create.len())
                .sum::<usize>();
        let updated = batch
            .update
            .iter()
            .map(|g| g.items.update.len())
            .sum::<usize>();
        let deleted = batch
            .update
            .iter()
            .map(|g| g.items.delete.len())
            .sum::<usize>();
        Self {
            created,
            updated,
            deleted,
        }
    }
}

/// Build the combined batch request for a confirmed change set.
///
/// - Additions are grouped by `(device, window start, window end)`. Each
///   group is routed into an existing remote group when the snapshot shows
///   one for that device + workday + shift, and becomes a brand-new group
///   otherwise.
/// - Updates are appended per item against their recorded group.
/// - Deletions are regrouped by owning remote group; an item whose group
///   cannot be resolved from the snapshot is skipped with a warning.
#[must_use]
pub fn plan_batch(selected: &ChangeSet, snapshot: &[LocalAssignment]) -> BatchRequest {
    let mut batch = BatchRequest::default();

    plan_additions(&selected.adds, snapshot, &mut batch);

    for item in &selected.updates {
        let ChangePayload::Update(payload) = &item.payload else {
            continue;
        };
        batch.update.push(GroupUpdate {
            group_id: payload.group_id.clone(),
            device_id: payload.device_id.clone(),
            items: ItemOps {
                update: payload.items.clone(),
                ..ItemOps::default()
            },
        });
    }

    plan_deletions(&selected.deletes, snapshot, &mut batch);

    batch
}

/// Submit the planned batch as one remote call and report counts.
///
/// An empty plan short-circuits without touching the network.
pub fn execute(
    api: &dyn EventGroupApi,
    selected: &ChangeSet,
    snapshot: &[LocalAssignment],
) -> Result<SyncResult, SyncError> {
    let batch = plan_batch(selected, snapshot);
    if batch.is_empty() {
        debug!("no selected changes survived planning, skipping remote call");
        return Ok(SyncResult::default());
    }

    let result = SyncResult::of(&batch);
    api.submit_batch(&batch).map_err(SyncError::Mutation)?;
    Ok(result)
}

/// One accumulator bucket for additions sharing a device + window.
struct AddGroup {
    device_id: String,
    start: String,
    end: String,
    workday: String,
    shift_display: &'static str,
    items: Vec<NewItem>,
}

fn plan_additions(adds: &[ChangeItem], snapshot: &[LocalAssignment], batch: &mut BatchRequest) {
    let mut groups: Vec<AddGroup> = Vec::new();

    for item in adds {
        let ChangePayload::Add(payload) = &item.payload else {
            continue;
        };
        let new_item = NewItem {
            segment_start: payload.start.clone(),
            segment_end: payload.end.clone(),
            metadata: payload.metadata.clone(),
        };
        match groups.iter_mut().find(|g| {
            g.device_id == payload.device_id && g.start == payload.start && g.end == payload.end
        }) {
            Some(group) => group.items.push(new_item),
            None => groups.push(AddGroup {
                device_id: payload.device_id.clone(),
                start: payload.start.clone(),
                end: payload.end.clone(),
                workday: payload.metadata.workday_code.clone(),
                shift_display: Shift::from_code(&payload.metadata.shift_code)
                    .map_or("", Shift::display_name),
                items: vec![new_item],
            }),
        }
    }

    for group in groups {
        // An existing remote group for this device + workday + shift means
        // the new items ride along instead of spawning a duplicate group.
        let existing = snapshot.iter().find_map(|a| {
            (a.lht_device_id == group.device_id
                && a.date == group.workday
                && a.shift == group.shift_display)
                .then(|| a.lht_group_id.clone())
                .flatten()
        });

        match existing {
            Some(group_id) => batch.update.push(GroupUpdate {
                group_id,
                device_id: group.device_id,
                items: ItemOps {
                    create: group.items,
                    ..ItemOps::default()
                },
            }),
            None => batch.create.push(GroupCreate {
                device_id: group.device_id,
                title: format!("PLANNED_OUTPUT-{}", group.workday),
                range_start: group.start,
                range_end: group.end,
                items: group.items,
            }),
        }
    }
}

fn plan_deletions(deletes: &[ChangeItem], snapshot: &[LocalAssignment], batch: &mut BatchRequest) {
    // (group id, device id) -> item ids, in first-seen order.
    let mut groups: Vec<(String, String, Vec<String>)> = Vec::new();

    for item in deletes {
        let ChangePayload::Delete(payload) = &item.payload else {
            continue;
        };
        let owner = snapshot
            .iter()
            .find(|a| a.lht_item_id.as_deref() == Some(payload.item_id.as_str()))
            .and_then(|a| a.lht_group_id.clone());

        let Some(group_id) = owner else {
            // Cannot delete without a group context; drop just this item.
            warn!(item_id = %payload.item_id, "delete candidate has no resolvable group, skipped");
            continue;
        };

        match groups
            .iter_mut()
            .find(|(gid, dev, _)| *gid == group_id && *dev == payload.device_id)
        {
            Some((_, _, ids)) => ids.push(payload.item_id.clone()),
            None => {
                let ids = vec![payload.item_id.clone()];
                groups.push((group_id, payload.device_id.clone(), ids));
            }
        }
    }

    for (group_id, device_id, ids) in groups {
        batch.update.push(GroupUpdate {
            group_id,
            device_id,
            items: ItemOps {
                delete: ids,
                ..ItemOps::default()
            },
        });
    }
}
