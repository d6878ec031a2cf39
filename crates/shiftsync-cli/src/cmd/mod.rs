//! Command handlers.

pub mod apply;
pub mod devices;
pub mod plan;
pub mod shifts;

use std::path::Path;

use anyhow::Result;
use shiftsync_core::analysis::{Analysis, analyze};
use shiftsync_core::config::SyncConfig;
use shiftsync_core::shift::Shift;

use crate::client::erp::ErpClient;
use crate::client::file::{JsonDirSource, JsonFileStore};
use crate::client::lighthouse::LighthouseClient;

/// Run one analysis pass over either the network or an export directory.
pub(crate) fn run_analysis(
    date: &str,
    shift: Shift,
    from_files: Option<&Path>,
    config: &SyncConfig,
) -> Result<Analysis> {
    let analysis = match from_files {
        Some(dir) => {
            let source = JsonDirSource::new(dir);
            analyze(&source, &source, &source, &config.cluster_id, date, shift)?
        }
        None => {
            let erp = ErpClient::new(&config.erp);
            let lighthouse = LighthouseClient::new(&config.lighthouse);
            let store = JsonFileStore::new(&config.store.assignments_path);
            analyze(&erp, &lighthouse, &store, &config.cluster_id, date, shift)?
        }
    };
    Ok(analysis)
}
