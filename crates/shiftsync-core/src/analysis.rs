//! One full analysis pass: fetch, normalize, diff.
//!
//! The ERP fetch, the device listing, and the local snapshot read happen
//! sequentially, never concurrently, so the diff always sees a snapshot
//! coherent with the fetch. A failure in any fetch aborts the whole pass;
//! no partial analysis is ever produced.

use serde::Serialize;
use tracing::info;

use crate::diff::{ChangeSet, compute_changes};
use crate::error::SyncError;
use crate::model::assignment::LocalAssignment;
use crate::model::device::DeviceIndex;
use crate::normalize::{RejectedRow, normalize_rows};
use crate::remote::{AssignmentStore, DeviceDirectory, ScheduleSource};
use crate::shift::{Shift, parse_workday};

/// Result of one analysis pass, ready for selection and apply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The workday that was analyzed.
    pub date: String,
    pub shift: Shift,
    /// Number of schedule rows accepted by normalization.
    pub accepted: usize,
    /// Rows dropped by normalization, with reasons.
    pub rejected: Vec<RejectedRow>,
    /// The three change buckets.
    pub changes: ChangeSet,
    /// Full local snapshot at analysis time, kept for batch planning.
    #[serde(skip)]
    pub snapshot: Vec<LocalAssignment>,
}

/// Run one analysis pass for `date` + `shift`.
///
/// The snapshot handed to the diff is pre-filtered to ERP imports; the full
/// snapshot is retained on the result for the apply pass, which needs
/// non-ERP group placements too.
pub fn analyze(
    schedule: &dyn ScheduleSource,
    directory: &dyn DeviceDirectory,
    store: &dyn AssignmentStore,
    cluster_id: &str,
    date: &str,
    shift: Shift,
) -> Result<Analysis, SyncError> {
    parse_workday(date)?;

    let rows = schedule
        .fetch_schedule(date, shift)
        .map_err(SyncError::Fetch)?;
    let devices = directory
        .list_devices(cluster_id)
        .map_err(SyncError::Devices)?;
    let index = DeviceIndex::new(&devices);

    let report = normalize_rows(&rows, date, shift, &index);

    let snapshot = store.list_assignments().map_err(SyncError::Assignments)?;
    let erp_snapshot: Vec<LocalAssignment> = snapshot
        .iter()
        .filter(|a| a.is_erp_import())
        .cloned()
        .collect();

    let changes = compute_changes(&report.accepted, &erp_snapshot)?;
    info!(
        date,
        %shift,
        fetched = rows.len(),
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        adds = changes.adds.len(),
        updates = changes.updates.len(),
        deletes = changes.deletes.len(),
        "analysis pass complete"
    );

    Ok(Analysis {
        date: date.to_string(),
        shift,
        accepted: report.accepted.len(),
        rejected: report.rejected,
        changes,
        snapshot,
    })
}
