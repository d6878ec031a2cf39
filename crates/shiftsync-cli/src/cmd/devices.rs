//! `ssy devices`: list the device directory for the configured cluster.

use clap::Args;

use shiftsync_core::config::SyncConfig;
use shiftsync_core::remote::DeviceDirectory as _;

use crate::client::lighthouse::LighthouseClient;
use crate::output::{OutputMode, print_json, section};

#[derive(Args, Debug)]
pub struct DevicesArgs {
    /// Cluster to list; defaults to the configured cluster.
    #[arg(long)]
    pub cluster: Option<String>,
}

pub fn run_devices(
    args: &DevicesArgs,
    config: &SyncConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let cluster_id = args.cluster.as_deref().unwrap_or(&config.cluster_id);
    let client = LighthouseClient::new(&config.lighthouse);
    let devices = client.list_devices(cluster_id)?;

    if output.is_json() {
        return print_json(&devices);
    }

    section(&format!("Devices in cluster {cluster_id}"));
    for device in &devices {
        println!("  {:<12} {:<24} {}", device.id, device.device_name, device.foreign_id);
    }
    if devices.is_empty() {
        println!("  (none)");
    }
    Ok(())
}
