//! Configuration sources.
//!
//! The OCM session settings live in the same JSON file the `ocm` and `rosa`
//! tools share, so a user logged in with either tool is logged in here too.
//! Application settings come from an optional `settings.toml`.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::{Map, Value};

pub const DEFAULT_URL: &str = "https://api.openshift.com";
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("can't determine the location of the OCM config file")]
    NoConfigDir,
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("can't read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{path}' is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("can't write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("can't encode OCM config: {0}")]
    Encode(#[from] serde_json::Error),
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

#[derive(Clone, Deserialize)]
pub struct OcmConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl fmt::Debug for OcmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcmConfig")
            .field("url", &self.url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url)
            .field("path", &self.path)
            .finish()
    }
}

impl Default for OcmConfig {
    fn default() -> Self {
        OcmConfig {
            url: default_url(),
            access_token: None,
            refresh_token: None,
            client_id: default_client_id(),
            token_url: default_token_url(),
            path: None,
        }
    }
}

/// `$OCM_CONFIG` when set, otherwise `~/.config/ocm/ocm.json`.
pub fn ocm_config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os("OCM_CONFIG") {
        return Ok(PathBuf::from(path));
    }
    dirs::home_dir()
        .map(|home| home.join(".config").join("ocm").join("ocm.json"))
        .ok_or(ConfigError::NoConfigDir)
}

impl OcmConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&ocm_config_path()?)
    }

    /// Reads the file if it exists, then applies `OCM_*` environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut ocm_config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(false))
            .add_source(Environment::with_prefix("OCM"))
            .build()?
            .try_deserialize::<OcmConfig>()?;
        ocm_config.path = Some(path.to_path_buf());
        Ok(ocm_config)
    }

    /// Writes the current tokens back to the file they were loaded from.
    ///
    /// Only the token keys are touched; everything else in the file belongs
    /// to whichever tool wrote it and is kept as is.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut contents = match std::fs::read_to_string(path) {
            Ok(existing) => serde_json::from_str::<Map<String, Value>>(&existing).map_err(
                |source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                },
            )?,
            Err(err) if err.kind() == ErrorKind::NotFound => Map::new(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };
        for (key, token) in [
            ("access_token", &self.access_token),
            ("refresh_token", &self.refresh_token),
        ] {
            match token {
                Some(token) => contents.insert(key.to_string(), Value::String(token.clone())),
                None => contents.remove(key),
            };
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(&contents)?;
        write_private(path, contents.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })
    }
}

/// The file holds refresh tokens, so it is readable by its owner only.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSettings {
    pub aws_profile: Option<String>,
    pub aws_region: Option<String>,
    pub iam_endpoint: Option<String>,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("settings.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("ROSA"))
            .build()?
            .try_deserialize::<AppSettings>()?)
    }
}
