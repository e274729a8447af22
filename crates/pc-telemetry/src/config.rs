//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE: &str = "provenance-chain";
const WHOLE_NODE: &str = "00";

/// Configuration for structured logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Subsystem identifier (01-03), `00` for the whole node
    pub subsystem_id: String,

    /// `EnvFilter` directive: a level or `target=level` pairs
    pub log_level: String,

    /// Whether to print to stdout at all
    pub console_output: bool,

    /// JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE.to_string(),
            subsystem_id: WHOLE_NODE.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read the process environment.
    ///
    /// | Variable | Effect |
    /// |----------|--------|
    /// | `OTEL_SERVICE_NAME` | service name |
    /// | `PC_SUBSYSTEM_ID` | subsystem id |
    /// | `PC_LOG_LEVEL`, then `RUST_LOG` | filter directive |
    /// | `PC_CONSOLE_OUTPUT` | `false`/`0` silences stdout |
    /// | `PC_JSON_LOGS` | `true`/`1` for JSON; defaults on inside Kubernetes or Docker |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let in_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
            subsystem_id: lookup("PC_SUBSYSTEM_ID").unwrap_or(defaults.subsystem_id),
            log_level: lookup("PC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            console_output: lookup("PC_CONSOLE_OUTPUT")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.console_output),
            json_logs: lookup("PC_JSON_LOGS")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(in_container),
        }
    }

    /// Environment settings, named after one subsystem (`pc-03-custody-chain`).
    pub fn for_subsystem(subsystem_id: &str, subsystem_name: &str) -> Self {
        Self {
            subsystem_id: subsystem_id.to_string(),
            service_name: format!("pc-{}-{}", subsystem_id, subsystem_name),
            ..Self::from_env()
        }
    }

    /// Service name with the subsystem id appended unless already implied.
    pub fn full_service_name(&self) -> String {
        if self.subsystem_id == WHOLE_NODE || self.service_name.starts_with("pc-") {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.subsystem_id)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
