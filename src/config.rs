//! Configuration loading and constants.
//!
//! Populates `AppConfig` once at startup from environment variables with
//! documented defaults, and defines the constants that tune the message
//! store, the broadcast schedule, and the HTTP surface.

use std::time::Duration;

use const_format::formatcp;
use serde::Serialize;

// =============================================================================
// Message Store
// =============================================================================

/// Maximum number of received messages kept in the store (newest first).
/// Older entries are silently evicted.
pub const MESSAGE_STORE_CAPACITY: usize = 10;

// =============================================================================
// Broadcast Schedule and Target
// =============================================================================

/// Delay between process start and the first broadcast.
pub const BROADCAST_INITIAL_DELAY: Duration = Duration::from_secs(5);

/// Interval between broadcast ticks after the first one.
pub const BROADCAST_PERIOD: Duration = Duration::from_secs(10);

/// Timeout for a single outbound broadcast request. The next tick is the
/// only retry mechanism.
pub const BROADCAST_TIMEOUT: Duration = Duration::from_millis(2000);

/// Port the peer service listens on inside the cluster.
pub const TARGET_SERVICE_PORT: u16 = 80;

/// DNS suffix for cluster-local service addresses. Resolution is the
/// platform's job, not ours.
pub const CLUSTER_DNS_SUFFIX: &str = "svc.cluster.local";

/// Crate version, for the outbound user agent.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with broadcast requests (compile-time string concatenation).
pub const USER_AGENT: &str = formatcp!("beacon/{}", VERSION);

// =============================================================================
// HTTP Surface
// =============================================================================

/// Auto-refresh interval for the status page, in seconds.
pub const PAGE_REFRESH_SECS: u32 = 5;

/// Cache-Control for the status page - it re-renders live state on every hit.
pub const CACHE_CONTROL_STATUS: &str = "no-cache";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

// Time constants for duration formatting
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;

// =============================================================================
// Defaults for Environment-Based Configuration
// =============================================================================

/// Default listen address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Default pod name when no host identifier can be found
pub const DEFAULT_POD_NAME: &str = "localhost";

/// Default peer service name
pub const DEFAULT_SERVICE_NAME: &str = "beacon";

/// Default peer namespace
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "beacon=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Root configuration, populated once at startup. Immutable afterwards;
/// there is no reload.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Identity of this pod and of the peer service it announces itself to
    pub pod: PodConfig,
    /// Whether the messaging subsystem (broadcast task, /message route,
    /// messages panel) is active. Disabling it turns the binary into the
    /// plain health/status variant of the service.
    pub enable_messaging: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

/// Pod identity, used for self-reporting and for deriving the peer address.
#[derive(Debug, Clone, Serialize)]
pub struct PodConfig {
    /// This pod's name, reported on the health and status pages and sent
    /// as the greeting sender.
    pub name: String,
    /// Service name of the sibling pods to broadcast to.
    pub service_name: String,
    /// Namespace the sibling service lives in.
    pub namespace: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// Variables and defaults:
    /// - `HOST` (default `0.0.0.0`)
    /// - `PORT` (default `3000`)
    /// - `POD_NAME` (default: `HOSTNAME`, then the kernel hostname, then `localhost`)
    /// - `SERVICE_NAME` (default `beacon`)
    /// - `NAMESPACE` (default `default`)
    /// - `ENABLE_MESSAGING` (default `true`)
    ///
    /// Empty values count as unset. Unparseable values abort startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            http: HttpConfig {
                host: string_or(env_var("HOST"), DEFAULT_HTTP_HOST),
                port: parse_port(env_var("PORT"))?,
            },
            pod: PodConfig {
                name: pod_name(env_var("POD_NAME"), env_var("HOSTNAME"), kernel_hostname()),
                service_name: string_or(env_var("SERVICE_NAME"), DEFAULT_SERVICE_NAME),
                namespace: string_or(env_var("NAMESPACE"), DEFAULT_NAMESPACE),
            },
            enable_messaging: parse_flag("ENABLE_MESSAGING", env_var("ENABLE_MESSAGING"), true)?,
        })
    }
}

/// Read one environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Empty values count as unset; deployments often export blanks.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}

/// Fall back to a default when the value is unset.
fn string_or(raw: Option<String>, default: &str) -> String {
    raw.unwrap_or_else(|| default.to_string())
}

/// The pod name defaults to the host identifier: explicit `POD_NAME`, the
/// `HOSTNAME` the platform exports, then the kernel's own hostname.
fn pod_name(
    explicit: Option<String>,
    hostname: Option<String>,
    kernel: Option<String>,
) -> String {
    explicit
        .or(hostname)
        .or(kernel)
        .unwrap_or_else(|| DEFAULT_POD_NAME.to_string())
}

/// Hostname straight from the kernel, for environments that export none.
/// Best-effort, Linux only.
fn kernel_hostname() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/sys/kernel/hostname")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Parse the listening port, defaulting when unset.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_HTTP_PORT),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: "PORT",
            value,
            reason: "expected a port number in 0-65535".to_string(),
        }),
    }
}

/// Parse a boolean flag accepting true/false/1/0, case-insensitive.
fn parse_flag(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::Invalid {
                var,
                value,
                reason: "expected true, false, 1 or 0".to_string(),
            }),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_defaults_when_unset() {
        assert_eq!(parse_port(None).unwrap(), DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_parse_port_accepts_valid_value() {
        assert_eq!(parse_port(Some("8080".to_string())).unwrap(), 8080);
    }

    #[test]
    fn test_parse_port_rejects_garbage() {
        assert!(parse_port(Some("not-a-port".to_string())).is_err());
        assert!(parse_port(Some("70000".to_string())).is_err());
    }

    #[test]
    fn test_parse_flag_defaults_when_unset() {
        assert!(parse_flag("ENABLE_MESSAGING", None, true).unwrap());
        assert!(!parse_flag("ENABLE_MESSAGING", None, false).unwrap());
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for value in ["true", "TRUE", "1"] {
            assert!(parse_flag("ENABLE_MESSAGING", Some(value.to_string()), false).unwrap());
        }
        for value in ["false", "False", "0"] {
            assert!(!parse_flag("ENABLE_MESSAGING", Some(value.to_string()), true).unwrap());
        }
    }

    #[test]
    fn test_parse_flag_rejects_unknown_value() {
        assert!(parse_flag("ENABLE_MESSAGING", Some("maybe".to_string()), true).is_err());
    }

    #[test]
    fn test_string_or_treats_none_as_default() {
        assert_eq!(string_or(None, "fallback"), "fallback");
        assert_eq!(string_or(Some("set".to_string()), "fallback"), "set");
    }

    #[test]
    fn test_non_empty_treats_blank_as_unset() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(
            non_empty(Some("beacon".to_string())),
            Some("beacon".to_string())
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let blank = || non_empty(Some(String::new()));
        assert_eq!(string_or(blank(), DEFAULT_SERVICE_NAME), DEFAULT_SERVICE_NAME);
        assert_eq!(string_or(blank(), DEFAULT_NAMESPACE), DEFAULT_NAMESPACE);
        assert_eq!(parse_port(blank()).unwrap(), DEFAULT_HTTP_PORT);
        assert!(parse_flag("ENABLE_MESSAGING", blank(), true).unwrap());
        assert_eq!(pod_name(blank(), None, None), DEFAULT_POD_NAME);
    }

    #[test]
    fn test_pod_name_fallback_chain() {
        let kernel = || Some("node-9".to_string());
        assert_eq!(
            pod_name(
                Some("pod-a".to_string()),
                Some("host-1".to_string()),
                kernel()
            ),
            "pod-a"
        );
        assert_eq!(
            pod_name(None, Some("host-1".to_string()), kernel()),
            "host-1"
        );
        assert_eq!(pod_name(None, None, kernel()), "node-9");
        assert_eq!(pod_name(None, None, None), DEFAULT_POD_NAME);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_kernel_hostname_is_readable_on_linux() {
        let name = kernel_hostname().expect("kernel hostname should be readable");
        assert!(!name.is_empty());
        assert!(!name.contains('\n'));
    }
}
