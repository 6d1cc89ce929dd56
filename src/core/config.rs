use secrecy::{ExposeSecret, Secret};
use serde::{Serialize, Serializer};
use std::env;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

const API_KEY_PREFIX: &str = "API_KEY=";
const PRIVATE_KEY_PREFIX: &str = "PRIVATE_KEY=";

/// API key and Base64-encoded private key for one account.
///
/// The pair is fixed once a client is built. Presence is not validated here;
/// the request executor refuses to sign when either value is empty.
#[derive(Clone)]
pub struct Credentials {
    api_key: Secret<String>,
    private_key: Secret<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

// Never expose secrets in serialization
impl Serialize for Credentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Credentials", 2)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("private_key", "[REDACTED]")?;
        state.end()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl Credentials {
    /// Create credentials from direct values
    #[must_use]
    pub fn new(api_key: String, private_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            private_key: Secret::new(private_key),
        }
    }

    /// Parse `API_KEY=` and `PRIVATE_KEY=` lines from a key file's contents.
    ///
    /// The prefix is stripped and the rest of the line is taken verbatim.
    /// Every other line is ignored. When a key appears twice the last one wins.
    pub fn parse(contents: &str) -> Self {
        let mut api_key = String::new();
        let mut private_key = String::new();

        for line in contents.lines() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(value) = line.strip_prefix(API_KEY_PREFIX) {
                api_key = value.to_string();
            } else if let Some(value) = line.strip_prefix(PRIVATE_KEY_PREFIX) {
                private_key = value.to_string();
            }
        }

        Self::new(api_key, private_key)
    }

    /// Load credentials from a `KEY=value` file such as `keys.conf`.
    ///
    /// A missing or unreadable file yields empty credentials; requests made
    /// with them fail with `ExchangeError::AuthError`.
    pub fn from_key_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let credentials = Self::parse(&contents);
                debug!(
                    path = %path.display(),
                    has_credentials = credentials.has_credentials(),
                    "Loaded key file"
                );
                credentials
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read key file");
                Self::default()
            }
        }
    }

    /// Create credentials from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `BTCMARKETS_API_KEY`)
    /// - `{PREFIX}_PRIVATE_KEY` (e.g., `BTCMARKETS_PRIVATE_KEY`)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let api_key_var = format!("{}_API_KEY", prefix.to_uppercase());
        let private_key_var = format!("{}_PRIVATE_KEY", prefix.to_uppercase());

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let private_key = env::var(&private_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(private_key_var))?;

        Ok(Self::new(api_key, private_key))
    }

    /// Load a `.env` file (if it exists), then read credentials from the environment.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if both the API key and the private key are set
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.private_key.expose_secret().is_empty()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get the Base64-encoded private key (use carefully - exposes secret)
    pub fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
