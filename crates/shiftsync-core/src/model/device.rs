//! Device directory entries and the work-center resolution index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One device known to the event-group store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub device_name: String,
    /// External identifier the ERP knows this device by (work-center code).
    pub foreign_id: String,
}

/// Lookup index over a device listing, keyed by foreign id.
///
/// Resolution is exact string match. When the directory contains duplicate
/// foreign ids the first listed device wins.
#[derive(Debug, Clone, Default)]
pub struct DeviceIndex {
    by_foreign_id: HashMap<String, Device>,
}

impl DeviceIndex {
    /// Build the index from a directory listing.
    #[must_use]
    pub fn new(devices: &[Device]) -> Self {
        let mut by_foreign_id = HashMap::with_capacity(devices.len());
        for device in devices {
            by_foreign_id
                .entry(device.foreign_id.clone())
                .or_insert_with(|| device.clone());
        }
        Self { by_foreign_id }
    }

    /// Resolve an ERP work-center code to a device, if one matches.
    #[must_use]
    pub fn resolve(&self, work_center_code: &str) -> Option<&Device> {
        self.by_foreign_id.get(work_center_code)
    }

    /// Number of distinct foreign ids in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_foreign_id.len()
    }

    /// True when the directory listing was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_foreign_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Device, DeviceIndex};

    fn device(id: &str, foreign_id: &str) -> Device {
        Device {
            id: id.to_string(),
            device_name: format!("Press {id}"),
            foreign_id: foreign_id.to_string(),
        }
    }

    #[test]
    fn resolves_by_exact_foreign_id() {
        let index = DeviceIndex::new(&[device("dev-1", "WC-9"), device("dev-2", "WC-10")]);
        assert_eq!(index.resolve("WC-9").map(|d| d.id.as_str()), Some("dev-1"));
        assert_eq!(index.resolve("WC-10").map(|d| d.id.as_str()), Some("dev-2"));
        assert!(index.resolve("wc-9").is_none());
        assert!(index.resolve("WC-99").is_none());
    }

    #[test]
    fn first_listed_device_wins_on_duplicates() {
        let index = DeviceIndex::new(&[device("dev-1", "WC-9"), device("dev-2", "WC-9")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve("WC-9").map(|d| d.id.as_str()), Some("dev-1"));
    }

    #[test]
    fn wire_shape_matches_the_directory_contract() {
        let json = r#"{"id": "dev-7", "deviceName": "Lathe 7", "foreignId": "WC-7"}"#;
        let parsed: Device = serde_json::from_str(json).expect("device parses");
        assert_eq!(parsed.foreign_id, "WC-7");
    }
}
