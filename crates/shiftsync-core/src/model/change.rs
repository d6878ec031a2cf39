//! Change items: proposed ADD/UPDATE/DELETE mutations pending selection.
//!
//! Change items are transient. Every analysis pass recomputes them from
//! scratch; nothing here is persisted or carried across passes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::assignment::{CanonicalAssignment, IMPORTED_FROM_ERP};

/// Annotation type stamped on every planning item this tool creates.
pub const ANNOTATION_PLANNING: &str = "PLANNING";

/// The three change classifications produced by the diff pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Add,
    Update,
    Delete,
}

/// Error returned when parsing an unknown change kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChangeKind {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown change kind '{}': expected ADD, UPDATE, or DELETE",
            self.raw
        )
    }
}

impl std::error::Error for UnknownChangeKind {}

impl ChangeKind {
    /// All kinds in presentation order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Update, Self::Delete];

    /// Canonical upper-case string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = UnknownChangeKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Self::Add),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            _ => Err(UnknownChangeKind { raw: s.to_string() }),
        }
    }
}

impl Serialize for ChangeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Metadata stamped on every remote item this tool creates or rewrites.
///
/// Bundles the full canonical record plus the origin markers the next
/// analysis pass needs to recognise the item as ERP-tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    /// Always [`ANNOTATION_PLANNING`] for items produced here.
    pub annotation_type: String,
    /// Always [`IMPORTED_FROM_ERP`] for items produced here.
    pub imported_from: String,
    /// The identity key, persisted so future passes can correlate.
    pub unique_identifier: String,
    pub work_order: String,
    pub process_id: String,
    pub operator_code: String,
    pub operator_name: String,
    pub part_number: String,
    pub planned_quantity: f64,
    pub work_center_code: String,
    pub shift_code: String,
    pub workday_code: String,
}

impl ItemMetadata {
    /// Build the metadata bundle for one canonical candidate.
    #[must_use]
    pub fn for_candidate(candidate: &CanonicalAssignment) -> Self {
        Self {
            annotation_type: ANNOTATION_PLANNING.to_string(),
            imported_from: IMPORTED_FROM_ERP.to_string(),
            unique_identifier: candidate.identity_key(),
            work_order: candidate.work_order.clone(),
            process_id: candidate.process_id.clone(),
            operator_code: candidate.operator_code.clone(),
            operator_name: candidate.operator_name.clone(),
            part_number: candidate.part_number.clone(),
            planned_quantity: candidate.planned_quantity,
            work_center_code: candidate.work_center_code.clone(),
            shift_code: candidate.shift.code().to_string(),
            workday_code: candidate.workday_code.clone(),
        }
    }
}

/// Payload of an ADD change: a new item on a device within a shift window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPayload {
    pub device_id: String,
    /// Shift window start, ISO 8601 UTC.
    pub start: String,
    /// Shift window end, ISO 8601 UTC.
    pub end: String,
    pub metadata: ItemMetadata,
}

/// One item rewrite inside an UPDATE change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    /// Remote event-item id being rewritten.
    pub id: String,
    pub segment_start: String,
    pub segment_end: String,
    pub metadata: ItemMetadata,
}

/// Payload of an UPDATE change, addressed to an existing remote group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayload {
    pub group_id: String,
    pub device_id: String,
    pub items: Vec<ItemUpdate>,
}

/// Payload of a DELETE change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePayload {
    pub device_id: String,
    /// Remote event-item id to remove.
    pub item_id: String,
}

/// Kind-specific data needed to execute a change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangePayload {
    Add(AddPayload),
    Update(UpdatePayload),
    Delete(DeletePayload),
}

/// A proposed mutation produced by the diff pass, pending selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeItem {
    /// Identity key for ADD/UPDATE; remote item id (or the `"unknown"`
    /// sentinel) for DELETE.
    pub id: String,
    pub kind: ChangeKind,
    /// One-line summary for operator display.
    pub title: String,
    pub subtitle: String,
    /// Old-to-new quantity summary; set only for UPDATE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    pub payload: ChangePayload,
}
