//! Resolver configuration loaded from the environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

/// Default per-provider lookup deadline.
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 5_000;

/// Solana cluster the explorer talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cluster {
    #[default]
    MainnetBeta,
    Devnet,
    Testnet,
}

impl Cluster {
    /// Public RPC endpoint of the cluster.
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "mainnet-beta",
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet-beta" | "mainnet" => Ok(Self::MainnetBeta),
            "devnet" => Ok(Self::Devnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("unknown cluster '{}'", other)),
        }
    }
}

/// Settings for building the resolver and its providers.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolverConfig {
    pub cluster: Cluster,
    /// JSON-RPC endpoint; defaults to the cluster's public endpoint
    pub rpc_url: String,
    /// Deadline applied to each provider lookup
    pub provider_timeout: Duration,
    /// Register the live Solana RPC provider
    pub enable_rpc: bool,
    /// Register the offline table of well-known tokens
    pub enable_static: bool,
    /// Refuse searches while no wallet session is active
    pub require_wallet: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        let cluster = Cluster::default();
        Self {
            cluster,
            rpc_url: cluster.api_url().to_string(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            enable_rpc: true,
            enable_static: true,
            require_wallet: true,
        }
    }
}

impl ResolverConfig {
    /// Read `SOLANTICS_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cluster = match get("SOLANTICS_CLUSTER") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring SOLANTICS_CLUSTER: {}", e);
                defaults.cluster
            }),
            None => defaults.cluster,
        };

        let rpc_url = get("SOLANTICS_RPC_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| cluster.api_url().to_string());

        let timeout_ms = match get("SOLANTICS_PROVIDER_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    warn!("Ignoring SOLANTICS_PROVIDER_TIMEOUT_MS='{}'", raw);
                    DEFAULT_PROVIDER_TIMEOUT_MS
                }
            },
            None => DEFAULT_PROVIDER_TIMEOUT_MS,
        };

        Self {
            cluster,
            rpc_url,
            provider_timeout: Duration::from_millis(timeout_ms),
            enable_rpc: flag(&get, "SOLANTICS_ENABLE_RPC", defaults.enable_rpc),
            enable_static: flag(&get, "SOLANTICS_ENABLE_STATIC", defaults.enable_static),
            require_wallet: flag(&get, "SOLANTICS_REQUIRE_WALLET", defaults.require_wallet),
        }
    }
}

fn flag(get: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match get(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                warn!("Ignoring {}='{}', expected true/false", key, raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ResolverConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ResolverConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert!(config.enable_rpc && config.enable_static && config.require_wallet);
    }

    #[test]
    fn test_cluster_selects_endpoint() {
        let config = config_from(&[("SOLANTICS_CLUSTER", "devnet")]);
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.rpc_url, "https://api.devnet.solana.com");
    }

    #[test]
    fn test_explicit_rpc_url_wins() {
        let config = config_from(&[
            ("SOLANTICS_CLUSTER", "testnet"),
            ("SOLANTICS_RPC_URL", "http://127.0.0.1:8899"),
        ]);
        assert_eq!(config.cluster, Cluster::Testnet);
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("SOLANTICS_CLUSTER", "localnet"),
            ("SOLANTICS_PROVIDER_TIMEOUT_MS", "soon"),
            ("SOLANTICS_ENABLE_RPC", "maybe"),
        ]);
        assert_eq!(config.cluster, Cluster::MainnetBeta);
        assert_eq!(config.provider_timeout, Duration::from_secs(5));
        assert!(config.enable_rpc);
    }

    #[test]
    fn test_flags_and_timeout() {
        let config = config_from(&[
            ("SOLANTICS_PROVIDER_TIMEOUT_MS", "750"),
            ("SOLANTICS_ENABLE_RPC", "false"),
            ("SOLANTICS_REQUIRE_WALLET", "0"),
        ]);
        assert_eq!(config.provider_timeout, Duration::from_millis(750));
        assert!(!config.enable_rpc);
        assert!(config.enable_static);
        assert!(!config.require_wallet);
    }

    #[test]
    fn test_cluster_parse_and_display() {
        assert_eq!("Mainnet-Beta".parse::<Cluster>(), Ok(Cluster::MainnetBeta));
        assert_eq!(Cluster::Devnet.to_string(), "devnet");
        assert!("localnet".parse::<Cluster>().is_err());
    }
}
