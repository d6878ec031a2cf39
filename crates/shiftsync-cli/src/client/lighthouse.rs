//! Thin client for the Lighthouse device and event-group API.

use std::time::Duration;

use shiftsync_core::batch::BatchRequest;
use shiftsync_core::config::LighthouseConfig;
use shiftsync_core::error::RemoteError;
use shiftsync_core::model::device::Device;
use shiftsync_core::remote::{DeviceDirectory, EventGroupApi};

use super::map_remote;

pub struct LighthouseClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl LighthouseClient {
    #[must_use]
    pub fn new(config: &LighthouseConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        }
    }

    fn with_auth(&self, request: ureq::Request) -> ureq::Request {
        match &self.api_key {
            Some(key) => request.set("Authorization", &format!("Bearer {key}")),
            None => request,
        }
    }
}

impl DeviceDirectory for LighthouseClient {
    fn list_devices(&self, cluster_id: &str) -> Result<Vec<Device>, RemoteError> {
        let url = format!("{}/clusters/{cluster_id}/devices", self.base_url);
        let request = self.with_auth(self.agent.get(&url));
        let response = request.call().map_err(|e| map_remote(e, self.timeout_secs))?;
        response
            .into_json()
            .map_err(|e| RemoteError::Transport(format!("device listing body: {e}")))
    }
}

impl EventGroupApi for LighthouseClient {
    fn submit_batch(&self, batch: &BatchRequest) -> Result<(), RemoteError> {
        let url = format!("{}/event-groups/batch", self.base_url);
        let request = self.with_auth(self.agent.post(&url));
        request
            .send_json(batch)
            .map_err(|e| map_remote(e, self.timeout_secs))?;
        Ok(())
    }
}
