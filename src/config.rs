//! Typed server configuration loaded from JSON with comments.
//!
//! ```
//! use jsonc_norm::config::{Configuration, Listener};
//!
//! const INPUT: &str = r#"{
//!     "Database": { "Type": "postgres" }, // db config
//!     "Server": {
//!         "UseHTTP": true,
//!         "HTTPPort": "8080",
//!     },
//! }"#;
//!
//! fn main() -> Result<(), jsonc_norm::Error> {
//!     let config = Configuration::parse_json(INPUT.as_bytes())?;
//!     assert_eq!(config.database.kind, "postgres");
//!     assert_eq!(
//!         config.server.listeners(),
//!         vec![Listener::Http { addr: ":8080".to_string() }]
//!     );
//!     Ok(())
//! }
//! ```

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Application settings. Sections missing from the file are left at their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(rename = "Database", default)]
    pub database: Database,
    #[serde(rename = "Server", default)]
    pub server: Server,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Database {
    /// Database type, e.g. "postgres".
    #[serde(rename = "Type")]
    pub kind: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Server {
    #[serde(rename = "UseHTTP")]
    pub use_http: bool,
    #[serde(rename = "UseHTTPS")]
    pub use_https: bool,
    #[serde(rename = "HTTPPort")]
    pub http_port: String,
    #[serde(rename = "HTTPSPort")]
    pub https_port: String,
    /// Path to the TLS certificate.
    #[serde(rename = "CertFile")]
    pub cert_file: String,
    /// Path to the TLS private key.
    #[serde(rename = "KeyFile")]
    pub key_file: String,
}

/// A listener the server should start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listener<'a> {
    Http {
        addr: String,
    },
    Https {
        addr: String,
        cert_file: &'a str,
        key_file: &'a str,
    },
}

impl Configuration {
    /// Reads and decodes the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        crate::from_file(path)
    }

    /// Normalizes `input` and decodes it as a configuration.
    pub fn parse_json(input: &[u8]) -> Result<Self, Error> {
        crate::from_slice(input)
    }
}

impl Server {
    /// Returns the enabled listeners, plain HTTP first. Addresses bind every
    /// interface on the configured port.
    pub fn listeners(&self) -> Vec<Listener<'_>> {
        let mut out = Vec::with_capacity(2);
        if self.use_http {
            out.push(Listener::Http {
                addr: format!(":{}", self.http_port),
            });
        }
        if self.use_https {
            out.push(Listener::Https {
                addr: format!(":{}", self.https_port),
                cert_file: &self.cert_file,
                key_file: &self.key_file,
            });
        }
        out
    }
}

impl fmt::Display for Listener<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { addr } => write!(f, "http {addr}"),
            Self::Https {
                addr,
                cert_file,
                key_file,
            } => write!(f, "https {addr} (cert: {cert_file}, key: {key_file})"),
        }
    }
}
