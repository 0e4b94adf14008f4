//! Twilio credential configuration.
//!
//! Credentials live in a `config.toml` next to the binary, holding a single
//! `[Twilio]` section:
//!
//! ```toml
//! [Twilio]
//! ACCOUNT_SID = "ACxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"
//! AUTH_TOKEN = "your-auth-token"
//! TWILIO_NUMBER = "+15017122661"
//! ```
//!
//! Loading returns a typed [`ConfigError`] rather than exiting, so the entry
//! points decide what a bad config means for the process (both treat it as
//! fatal at startup).

use std::path::{Path, PathBuf};

use figment::providers::{Format, Toml};
use figment::Figment;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file location, relative to the working directory.
pub const CONFIG_FILE: &str = "config.toml";

const PLACEHOLDER_SID: &str = "PASTE_YOUR_SID_HERE";
const PLACEHOLDER_TOKEN: &str = "PASTE_YOUR_TOKEN_HERE";
const PLACEHOLDER_NUMBER: &str = "PASTE_YOUR_TWILIO_NUMBER_HERE";

const TEMPLATE: &str = r#"[Twilio]
ACCOUNT_SID = "PASTE_YOUR_SID_HERE"
AUTH_TOKEN = "PASTE_YOUR_TOKEN_HERE"
TWILIO_NUMBER = "PASTE_YOUR_TWILIO_NUMBER_HERE"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0:?} not found")]
    NotFound(PathBuf),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
    #[error("{0} still holds its placeholder value, fill in your Twilio credentials")]
    Placeholder(&'static str),
}

/// Twilio account credentials and sender identity.
///
/// Immutable once loaded; constructed at startup and shared for the lifetime
/// of the process.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioConfig {
    #[serde(rename = "ACCOUNT_SID")]
    pub account_sid: String,
    #[serde(rename = "AUTH_TOKEN")]
    pub auth_token: String,
    #[serde(rename = "TWILIO_NUMBER")]
    pub twilio_number: String,
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(rename = "Twilio")]
    twilio: TwilioConfig,
}

impl TwilioConfig {
    /// Read and validate the configuration at `path`.
    ///
    /// A missing file, a missing key, or a value still equal to its template
    /// placeholder all fail the load; no send may be attempted with a
    /// partially filled config.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let file: ConfigFile = Figment::new().merge(Toml::file(path)).extract()?;
        let config = file.twilio;

        let checks = [
            ("ACCOUNT_SID", &config.account_sid, PLACEHOLDER_SID),
            ("AUTH_TOKEN", &config.auth_token, PLACEHOLDER_TOKEN),
            ("TWILIO_NUMBER", &config.twilio_number, PLACEHOLDER_NUMBER),
        ];
        for (key, value, placeholder) in checks {
            if value.contains(placeholder) {
                return Err(ConfigError::Placeholder(key));
            }
        }

        Ok(config)
    }
}

/// Materialize a template config file for the operator to fill in.
pub fn write_template(path: impl AsRef<Path>) -> std::io::Result<()> {
    std::fs::write(path, TEMPLATE)
}
