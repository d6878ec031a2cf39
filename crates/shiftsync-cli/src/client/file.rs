//! File-backed collaborators.
//!
//! [`JsonFileStore`] holds the locally-tracked assignment snapshot; the
//! networked flow reads it before every analysis pass. [`JsonDirSource`]
//! serves all three read-side contracts from one directory of exported
//! JSON (`schedule.json`, `devices.json`, `assignments.json`) for offline
//! analysis and testing.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use shiftsync_core::error::RemoteError;
use shiftsync_core::model::assignment::LocalAssignment;
use shiftsync_core::model::device::Device;
use shiftsync_core::normalize::RawScheduleRow;
use shiftsync_core::remote::{AssignmentStore, DeviceDirectory, ScheduleSource};
use shiftsync_core::shift::Shift;

/// Assignment snapshot backed by one JSON file.
///
/// A missing file is an empty snapshot, not an error: a fresh install has
/// nothing tracked yet.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl AssignmentStore for JsonFileStore {
    fn list_assignments(&self) -> Result<Vec<LocalAssignment>, RemoteError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no assignment snapshot yet, starting empty");
            return Ok(Vec::new());
        }
        read_json(&self.path)
    }
}

/// Offline sources reading exported JSON from one directory.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }
}

impl ScheduleSource for JsonDirSource {
    fn fetch_schedule(
        &self,
        _date: &str,
        _shift: Shift,
    ) -> Result<Vec<RawScheduleRow>, RemoteError> {
        read_json(&self.dir.join("schedule.json"))
    }
}

impl DeviceDirectory for JsonDirSource {
    fn list_devices(&self, _cluster_id: &str) -> Result<Vec<Device>, RemoteError> {
        read_json(&self.dir.join("devices.json"))
    }
}

impl AssignmentStore for JsonDirSource {
    fn list_assignments(&self) -> Result<Vec<LocalAssignment>, RemoteError> {
        let path = self.dir.join("assignments.json");
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_json(&path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RemoteError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RemoteError::Transport(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| RemoteError::Transport(format!("parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::{JsonDirSource, JsonFileStore};
    use shiftsync_core::remote::{AssignmentStore, DeviceDirectory, ScheduleSource};
    use shiftsync_core::shift::Shift;

    #[test]
    fn missing_snapshot_is_empty_not_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = JsonFileStore::new(&dir.path().join("assignments.json"));
        let assignments = store.list_assignments().expect("empty snapshot");
        assert!(assignments.is_empty());
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("assignments.json");
        std::fs::write(&path, "{not json").expect("write");
        let store = JsonFileStore::new(&path);
        assert!(store.list_assignments().is_err());
    }

    #[test]
    fn dir_source_reads_all_three_contracts() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("schedule.json"),
            r#"[{"WorkdayCode": "2026-01-17", "ShiftCode": "D", "RouteCardNbr": "WO-1",
                 "ItemCode": "P-1", "QtyPlanned": 5, "WorkCenterCode": "WC-1"}]"#,
        )
        .expect("write schedule");
        std::fs::write(
            dir.path().join("devices.json"),
            r#"[{"id": "dev-1", "deviceName": "Press 1", "foreignId": "WC-1"}]"#,
        )
        .expect("write devices");

        let source = JsonDirSource::new(dir.path());
        let rows = source
            .fetch_schedule("2026-01-17", Shift::Day)
            .expect("schedule");
        assert_eq!(rows.len(), 1);
        let devices = source.list_devices("ignored").expect("devices");
        assert_eq!(devices[0].foreign_id, "WC-1");
        // assignments.json absent: empty snapshot.
        assert!(source.list_assignments().expect("assignments").is_empty());
    }

    #[test]
    fn dir_source_requires_the_schedule_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = JsonDirSource::new(dir.path());
        assert!(source.fetch_schedule("2026-01-17", Shift::Day).is_err());
    }
}
