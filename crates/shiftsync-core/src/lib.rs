//! shiftsync-core: ERP-to-shopfloor schedule reconciliation.
//!
//! The pipeline, leaf first:
//!
//! 1. [`shift`] resolves a workday + shift to its UTC instant range.
//! 2. [`normalize`] turns raw ERP schedule rows into canonical candidates,
//!    dropping rows that fail the acceptance rules.
//! 3. [`diff`] partitions candidates against the local assignment snapshot
//!    into ADD / UPDATE / DELETE change items.
//! 4. [`select`] lets the operator opt out of individual changes.
//! 5. [`executor`] folds the selected changes into one combined batch and
//!    submits it as a single remote call.
//!
//! External collaborators (the ERP, the device directory, the assignment
//! store, and the event-group mutation endpoint) are reached only through
//! the traits in [`remote`].
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::SyncError`] at the boundaries; row-level
//!   problems are outcomes, not errors.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod analysis;
pub mod batch;
pub mod config;
pub mod diff;
pub mod error;
pub mod executor;
pub mod model;
pub mod normalize;
pub mod remote;
pub mod select;
pub mod shift;

pub use analysis::{Analysis, analyze};
pub use batch::BatchRequest;
pub use config::{SyncConfig, load_config, resolve_config};
pub use diff::{ChangeSet, compute_changes};
pub use error::{InvalidDate, RemoteError, SyncError};
pub use executor::{SyncResult, execute, plan_batch};
pub use model::{CanonicalAssignment, ChangeItem, ChangeKind, Device, LocalAssignment};
pub use normalize::{NormalizeReport, RawScheduleRow, RejectReason, normalize_rows};
pub use remote::{AssignmentStore, DeviceDirectory, EventGroupApi, ScheduleSource};
pub use select::Selection;
pub use shift::{Shift, ShiftRange, resolve_shift_range};
