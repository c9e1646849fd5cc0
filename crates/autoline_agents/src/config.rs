//! Endpoint configuration for the external agent services.
//!
//! Endpoints are resolved from `.autoline/settings.json` under a workspace
//! root first, then from environment variables. Nothing here stores secrets;
//! the agent services handle their own authentication.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved endpoints for the four agent services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentEndpoints {
    /// Supervisor decision agent URL
    pub supervisor_url: String,
    /// Robot task-execution agent URL
    pub robot_url: String,
    /// Ticketing agent URL
    pub ticketing_url: String,
    /// Knowledge-base query service URL
    pub kb_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AgentEndpoints {
    /// Resolve endpoints from workspace settings, falling back to the
    /// environment for anything the settings file does not provide.
    pub fn from_settings(workspace_root: &Path) -> AgentResult<Self> {
        let settings_path = workspace_root.join(".autoline").join("settings.json");

        if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            let endpoints: AgentEndpoints = serde_json::from_str(&content)?;
            endpoints.validate()?;
            return Ok(endpoints);
        }

        Self::from_env()
    }

    /// Resolve endpoints from `AUTOLINE_*` environment variables.
    pub fn from_env() -> AgentResult<Self> {
        let endpoints = Self {
            supervisor_url: require_env("AUTOLINE_SUPERVISOR_URL", "supervisor")?,
            robot_url: require_env("AUTOLINE_ROBOT_URL", "robot")?,
            ticketing_url: require_env("AUTOLINE_TICKETING_URL", "ticketing")?,
            kb_url: require_env("AUTOLINE_KB_URL", "knowledge base")?,
            timeout_secs: std::env::var("AUTOLINE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        endpoints.validate()?;
        Ok(endpoints)
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> AgentResult<()> {
        for (agent, url) in [
            ("supervisor", &self.supervisor_url),
            ("robot", &self.robot_url),
            ("ticketing", &self.ticketing_url),
            ("knowledge base", &self.kb_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AgentError::InvalidEndpoint {
                    agent: agent.to_string(),
                    url: url.clone(),
                });
            }
        }
        Ok(())
    }
}

fn require_env(var: &str, agent: &str) -> AgentResult<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AgentError::NotConfigured(agent.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AgentEndpoints {
        AgentEndpoints {
            supervisor_url: "https://agents.example.com/supervisor".to_string(),
            robot_url: "https://agents.example.com/robot".to_string(),
            ticketing_url: "https://agents.example.com/ticketing".to_string(),
            kb_url: "https://agents.example.com/kb".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_settings_roundtrip() {
        let json = serde_json::to_string(&sample()).unwrap();
        let parsed: AgentEndpoints = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_timeout_defaults_when_missing() {
        let json = r#"{
            "supervisorUrl": "https://a.example.com/s",
            "robotUrl": "https://a.example.com/r",
            "ticketingUrl": "https://a.example.com/t",
            "kbUrl": "https://a.example.com/k"
        }"#;
        let parsed: AgentEndpoints = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(parsed.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut endpoints = sample();
        endpoints.robot_url = "ftp://nope".to_string();
        assert!(matches!(
            endpoints.validate(),
            Err(AgentError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_settings_file_resolution() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join(".autoline")).unwrap();
        std::fs::write(
            temp.path().join(".autoline").join("settings.json"),
            serde_json::to_string(&sample()).unwrap(),
        )
        .unwrap();

        let resolved = AgentEndpoints::from_settings(temp.path()).unwrap();
        assert_eq!(resolved, sample());
    }
}
