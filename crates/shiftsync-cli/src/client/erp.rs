//! Thin client for the ERP shift-schedule endpoint.
//!
//! The login handshake is out of scope here: the client presents a
//! pre-established session token from configuration and treats a rejected
//! session like any other API failure.

use std::time::Duration;

use shiftsync_core::config::ErpConfig;
use shiftsync_core::error::RemoteError;
use shiftsync_core::normalize::RawScheduleRow;
use shiftsync_core::remote::ScheduleSource;
use shiftsync_core::shift::Shift;

use super::map_remote;

pub struct ErpClient {
    agent: ureq::Agent,
    base_url: String,
    session_token: Option<String>,
    timeout_secs: u64,
}

impl ErpClient {
    #[must_use]
    pub fn new(config: &ErpConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: config.session_token.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl ScheduleSource for ErpClient {
    fn fetch_schedule(&self, date: &str, shift: Shift) -> Result<Vec<RawScheduleRow>, RemoteError> {
        let url = format!("{}/shift-schedule", self.base_url);
        let mut request = self
            .agent
            .get(&url)
            .query("workday", date)
            .query("shift", shift.code());
        if let Some(token) = &self.session_token {
            request = request.set("Cookie", &format!("ERPSESSION={token}"));
        }

        let response = request.call().map_err(|e| map_remote(e, self.timeout_secs))?;
        response
            .into_json()
            .map_err(|e| RemoteError::Transport(format!("schedule body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::ErpClient;
    use shiftsync_core::config::ErpConfig;

    #[test]
    fn base_url_is_normalized() {
        let client = ErpClient::new(&ErpConfig {
            base_url: "https://erp.plant.example/".to_string(),
            session_token: None,
            timeout_secs: 8,
        });
        assert_eq!(client.base_url, "https://erp.plant.example");
    }
}
