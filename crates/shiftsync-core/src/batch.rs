//! Wire body for the combined event-group mutation request.
//!
//! Every selected change funnels into one [`BatchRequest`] submitted as a
//! single remote call, so sibling operations on the same group cannot race
//! each other and the store sees the whole apply or none of it.

use serde::Serialize;

use crate::model::change::{ItemMetadata, ItemUpdate};

/// A new item inside a group create or group update.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub segment_start: String,
    pub segment_end: String,
    pub metadata: ItemMetadata,
}

/// Item-level operations inside one group update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOps {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<NewItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<ItemUpdate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<String>,
}

impl ItemOps {
    /// True when no item operation is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// Creation of a brand-new remote group with its initial items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreate {
    pub device_id: String,
    /// Group title, `PLANNED_OUTPUT-{date}`.
    pub title: String,
    pub range_start: String,
    pub range_end: String,
    pub items: Vec<NewItem>,
}

/// Mutation of an existing remote group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    pub group_id: String,
    pub device_id: String,
    pub items: ItemOps,
}

/// The combined mutation request.
///
/// `delete` removes whole groups and is part of the wire contract; the
/// reconciliation flow never populates it, since stale items are deleted
/// inside their groups via [`ItemOps::delete`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<GroupCreate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<GroupUpdate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<String>,
}

impl BatchRequest {
    /// True when the request carries no operation at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}
