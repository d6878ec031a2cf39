//! Assignment records on both sides of the reconciliation.
//!
//! A [`CanonicalAssignment`] is derived from one accepted ERP schedule row
//! and lives only for the duration of an analysis pass. A
//! [`LocalAssignment`] is a long-lived record owned by the external
//! assignment store; the diff pass only ever reads it.
//!
//! # Identity
//!
//! The sole correlation key between the two sides is the composite
//! `{work_center_code}-{part_number}-{work_order}`. Two records sharing this
//! key are the same logical assignment regardless of any other field.

use serde::{Deserialize, Serialize};

use crate::shift::Shift;

/// Origin tag for records imported from the ERP schedule.
pub const IMPORTED_FROM_ERP: &str = "ERP";

/// Sentinel standing in for a missing remote item id.
///
/// Local records that were never provisioned remotely share this sentinel in
/// the diff pass's processed-key set, so one such record can mask another.
/// Kept as-is: changing the key changes which deletions are detected.
pub const UNKNOWN_ITEM_ID: &str = "unknown";

/// Canonical assignment candidate derived from one accepted ERP row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAssignment {
    /// Work order number. Never empty: rows without one are rejected.
    pub work_order: String,
    /// Operation step identifier within the work order.
    pub process_id: String,
    pub operator_code: String,
    pub operator_name: String,
    pub part_number: String,
    /// Planned quantity, >= 0. Unparseable feed values coerce to 0.
    pub planned_quantity: f64,
    /// ERP work-center identifier, resolved against the device directory.
    pub work_center_code: String,
    /// Local device the work center resolved to.
    pub device_id: String,
    pub shift: Shift,
    /// Workday in `YYYY-MM-DD` form.
    pub workday_code: String,
}

impl CanonicalAssignment {
    /// Composite key correlating this candidate with a local record.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.work_center_code, self.part_number, self.work_order
        )
    }
}

/// Existing locally-tracked assignment record, origin-tagged.
///
/// Only records with `imported_from == "ERP"` and a non-null `lht_item_id`
/// are eligible for UPDATE or DELETE classification; records lacking remote
/// identifiers are not ERP-tracked and cannot be deleted through this path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAssignment {
    pub work_order: String,
    #[serde(default)]
    pub process_id: String,
    #[serde(default)]
    pub operator_code: String,
    #[serde(default)]
    pub operator_name: String,
    pub part_number: String,
    #[serde(default)]
    pub planned_quantity: f64,
    pub work_center_code: String,
    /// Where this record came from (`"ERP"` or a manual source).
    pub imported_from: String,
    /// Remote event-group id, if provisioned.
    #[serde(default)]
    pub lht_group_id: Option<String>,
    /// Remote event-item id, if provisioned.
    #[serde(default)]
    pub lht_item_id: Option<String>,
    /// Device this record is scheduled on.
    pub lht_device_id: String,
    /// Recorded planned quantity, used for change detection.
    #[serde(default)]
    pub batch: f64,
    /// Operator code proxy, used for change detection.
    #[serde(default)]
    pub code: String,
    /// Operation numbers recorded for this assignment.
    #[serde(default)]
    pub op_number: Vec<String>,
    /// Workday in `YYYY-MM-DD` form.
    pub date: String,
    /// Shift display name (`"Day"`, `"General"`, `"Night"`).
    pub shift: String,
}

impl LocalAssignment {
    /// Composite key correlating this record with an ERP candidate.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.work_center_code, self.part_number, self.work_order
        )
    }

    /// Remote item id, or the shared [`UNKNOWN_ITEM_ID`] sentinel.
    #[must_use]
    pub fn item_key(&self) -> &str {
        self.lht_item_id.as_deref().unwrap_or(UNKNOWN_ITEM_ID)
    }

    /// True when this record was imported from the ERP schedule.
    #[must_use]
    pub fn is_erp_import(&self) -> bool {
        self.imported_from == IMPORTED_FROM_ERP
    }
}
