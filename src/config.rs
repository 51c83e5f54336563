use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Connection properties for one logical database.
///
/// The bundle is a plain value: cloning it (or deriving a sibling via
/// [`with_database`](DatabaseProperties::with_database)) never mutates the
/// original.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DatabaseProperties {
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub db_name: String,
    #[serde(default)]
    pub create_db_if_not_exist: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_protocol() -> String {
    "http".to_string()
}
fn default_port() -> u16 {
    5984
}
fn default_timeout_secs() -> u64 {
    30
}

impl DatabaseProperties {
    pub fn new(host: impl Into<String>, port: u16, db_name: impl Into<String>) -> Self {
        Self {
            protocol: default_protocol(),
            host: host.into(),
            port,
            username: None,
            password: None,
            db_name: db_name.into(),
            create_db_if_not_exist: false,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_create_db_if_not_exist(mut self, create: bool) -> Self {
        self.create_db_if_not_exist = create;
        self
    }

    /// A copy of this bundle pointing at a different database.
    ///
    /// Used when spawning a sibling client; `self` is left untouched.
    pub fn with_database(&self, db_name: &str, create_db_if_not_exist: bool) -> Self {
        let mut props = self.clone();
        props.db_name = db_name.to_string();
        props.create_db_if_not_exist = create_db_if_not_exist;
        props
    }

    /// Server root URL, trailing slash included: `http://host:port/`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.protocol, self.host, self.port)
    }
}

/// Load and validate connection properties from a TOML file.
pub fn load_properties(path: &Path) -> Result<DatabaseProperties> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read properties file: {}", path.display()))?;

    let props: DatabaseProperties =
        toml::from_str(&content).with_context(|| "Failed to parse properties file")?;

    match props.protocol.as_str() {
        "http" | "https" => {}
        other => bail!("Unknown protocol: '{}'. Must be http or https.", other),
    }

    if props.host.is_empty() {
        bail!("host must not be empty");
    }

    if props.port == 0 {
        bail!("port must be > 0");
    }

    if props.db_name.is_empty() {
        bail!("db_name must not be empty");
    }

    Ok(props)
}
