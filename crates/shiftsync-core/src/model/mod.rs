//! Domain model for schedule reconciliation.
//!
//! [`assignment`] holds the two assignment record shapes (canonical ERP
//! candidates and locally-tracked records), [`change`] the ADD/UPDATE/DELETE
//! change items the diff pass produces, and [`device`] the device directory
//! entries used to resolve ERP work centers.

pub mod assignment;
pub mod change;
pub mod device;

pub use assignment::{CanonicalAssignment, IMPORTED_FROM_ERP, LocalAssignment, UNKNOWN_ITEM_ID};
pub use change::{
    AddPayload, ChangeItem, ChangeKind, ChangePayload, DeletePayload, ItemMetadata, ItemUpdate,
    UpdatePayload,
};
pub use device::{Device, DeviceIndex};
