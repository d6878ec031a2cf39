//! Boundary contracts for the four external collaborators.
//!
//! The core never talks to a network or a disk directly. Everything flows
//! through these traits, which the CLI crate implements once over HTTP and
//! once over exported JSON files. Each trait call is a single blocking unit
//! of work; deadlines live in the implementations, retries live in the
//! caller.

use crate::batch::BatchRequest;
use crate::error::RemoteError;
use crate::model::assignment::LocalAssignment;
use crate::model::device::Device;
use crate::normalize::RawScheduleRow;
use crate::shift::Shift;

/// Source of authoritative ERP shift schedules.
pub trait ScheduleSource {
    /// Fetch raw schedule rows for one workday and shift.
    fn fetch_schedule(&self, date: &str, shift: Shift) -> Result<Vec<RawScheduleRow>, RemoteError>;
}

/// Directory of devices known to the event-group store.
pub trait DeviceDirectory {
    /// List the devices of one cluster.
    fn list_devices(&self, cluster_id: &str) -> Result<Vec<Device>, RemoteError>;
}

/// Store of locally-tracked assignment records.
pub trait AssignmentStore {
    /// Read the current assignment snapshot, all origins included.
    fn list_assignments(&self) -> Result<Vec<LocalAssignment>, RemoteError>;
}

/// Remote event-group mutation endpoint.
pub trait EventGroupApi {
    /// Submit the combined mutation batch as a single remote call.
    ///
    /// All-or-nothing at the batch level: an error here means none of the
    /// selected changes may be assumed applied.
    fn submit_batch(&self, batch: &BatchRequest) -> Result<(), RemoteError>;
}
