//! Transport and server configuration.
//!
//! The endpoint and header set are injected by whoever hosts the console
//! (environment, `.env` files or CLI flags) and fall back to a conventional
//! local backend when absent.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

// =============================================================================
// Constants
// =============================================================================

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/jsonrpc";
/// Reserved method returning the API description.
pub const DEFAULT_DESCRIPTION_METHOD: &str = "openrpc";
/// Bind address of the mock backend when none is configured.
pub const DEFAULT_MOCK_ADDR: &str = "0.0.0.0:8080";

pub const ENV_ENDPOINT: &str = "RPC_CONSOLE_ENDPOINT";
pub const ENV_HEADERS: &str = "RPC_CONSOLE_HEADERS";
pub const ENV_DESCRIPTION_METHOD: &str = "RPC_CONSOLE_DESCRIPTION_METHOD";
pub const ENV_MOCK_ADDR: &str = "RPC_CONSOLE_MOCK_ADDR";

/// Headers sent with every JSON-RPC call unless overridden.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("accept".to_string(), "application/json;charset=utf-8".to_string()),
        (
            "content-type".to_string(),
            "application/json;charset=utf-8".to_string(),
        ),
        ("x-app-source".to_string(), "rpc-console".to_string()),
    ])
}

// =============================================================================
// Client configuration
// =============================================================================

/// Where and how the remote call client talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub description_method: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            headers: default_headers(),
            description_method: DEFAULT_DESCRIPTION_METHOD.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Adds or replaces a header. Names are stored lowercase.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

// =============================================================================
// Console configuration
// =============================================================================

/// Everything the binary needs: client settings plus the mock bind address.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub client: ClientConfig,
    pub mock_addr: SocketAddr,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            mock_addr: default_mock_addr(),
        }
    }
}

fn default_mock_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl ConsoleConfig {
    /// Loads `.env.local` (or `.env`) from `dir` if present, then reads the
    /// `RPC_CONSOLE_*` variables on top of the defaults.
    pub fn from_env(dir: &Path) -> Self {
        for env_file in [".env.local", ".env"] {
            let path = dir.join(env_file);
            if path.exists() {
                match dotenvy::from_path(&path) {
                    Ok(_) => log::info!("[CONFIG] Loaded {}", path.display()),
                    Err(e) => log::warn!("[CONFIG] Failed to load {}: {}", path.display(), e),
                }
                break;
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config.client.endpoint = endpoint;
        }

        if let Some(raw) = lookup(ENV_HEADERS) {
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(headers) => {
                    for (name, value) in headers {
                        config.client.headers.insert(name.to_ascii_lowercase(), value);
                    }
                }
                Err(e) => log::warn!("[CONFIG] Ignoring {}: {}", ENV_HEADERS, e),
            }
        }

        if let Some(method) = lookup(ENV_DESCRIPTION_METHOD).filter(|v| !v.trim().is_empty()) {
            config.client.description_method = method;
        }

        if let Some(addr) = lookup(ENV_MOCK_ADDR) {
            match addr.parse() {
                Ok(addr) => config.mock_addr = addr,
                Err(e) => log::warn!("[CONFIG] Ignoring {}={}: {}", ENV_MOCK_ADDR, addr, e),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ConsoleConfig::from_lookup(|_| None);
        assert_eq!(config.client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.client.description_method, "openrpc");
        assert_eq!(config.mock_addr.to_string(), DEFAULT_MOCK_ADDR);
        assert_eq!(
            config.client.headers.get("content-type").map(String::as_str),
            Some("application/json;charset=utf-8")
        );
    }

    #[test]
    fn environment_overrides_and_merges_headers() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_ENDPOINT, "http://backend:9000/rpc"),
            (ENV_HEADERS, r#"{"Authorization":"Bearer x"}"#),
            (ENV_MOCK_ADDR, "127.0.0.1:9999"),
        ]);
        let config = ConsoleConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.client.endpoint, "http://backend:9000/rpc");
        assert_eq!(
            config.client.headers.get("authorization").map(String::as_str),
            Some("Bearer x")
        );
        assert!(config.client.headers.contains_key("x-app-source"));
        assert_eq!(config.mock_addr.port(), 9999);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_HEADERS, "not json"), (ENV_MOCK_ADDR, "nowhere")]);
        let config = ConsoleConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.client.headers, default_headers());
        assert_eq!(config.mock_addr.to_string(), DEFAULT_MOCK_ADDR);
    }
}
