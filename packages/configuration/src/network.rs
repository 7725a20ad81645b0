use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Network configuration of the tracker.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Network {
    /// Port for the plain-HTTP listener. Ignored when `domains` is set, in
    /// which case the tracker listens on 443 (HTTPS) and 80 (redirect).
    #[serde(default = "Network::default_port")]
    pub port: u16,

    /// Hostnames the tracker is served under. When non-empty (and a TLS
    /// config is present) the tracker serves HTTPS.
    #[serde(default)]
    pub domains: Vec<String>,

    /// Canonical hostname used as the HTTP to HTTPS redirect target. When
    /// unset, the requested host is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// CIDRs or addresses of reverse proxies whose `X-Forwarded-For` header
    /// is honored.
    #[serde(default = "Network::default_trusted_proxies")]
    pub trusted_proxies: Vec<String>,

    /// TLS config. Required to actually serve HTTPS for `domains`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tsl_config: Option<TslConfig>,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
            domains: Vec::new(),
            domain: None,
            trusted_proxies: Self::default_trusted_proxies(),
            tsl_config: None,
        }
    }
}

impl Network {
    fn default_port() -> u16 {
        1337
    }

    fn default_trusted_proxies() -> Vec<String> {
        vec!["127.0.0.0/8".to_string(), "::1/128".to_string()]
    }
}

/// Paths to the TLS certificate chain and private key files.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct TslConfig {
    /// Path to the SSL certificate file in PEM format.
    pub ssl_cert_path: Utf8PathBuf,

    /// Path to the SSL key file in PEM format.
    pub ssl_key_path: Utf8PathBuf,
}
