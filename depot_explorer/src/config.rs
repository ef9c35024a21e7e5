//! Environment configuration: storage endpoint, backend choice, admin gate.

use std::path::PathBuf;

use url::Url;

use crate::data::{StorageConfig, WarehouseId};

pub const API_URL_VAR: &str = "DEPOT_API_URL";
pub const WAREHOUSE_ID_VAR: &str = "DEPOT_WAREHOUSE_ID";
pub const FIXTURE_VAR: &str = "DEPOT_FIXTURE";
pub const OFFLINE_VAR: &str = "DEPOT_OFFLINE";
pub const ADMIN_USER_VAR: &str = "DEPOT_ADMIN_USER";
pub const ADMIN_PASSWORD_VAR: &str = "DEPOT_ADMIN_PASSWORD";

const DEFAULT_API_URL: &str = "http://localhost:5204";
const DEFAULT_WAREHOUSE_ID: WarehouseId = 1;
const DEFAULT_ADMIN_USER: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "123456";

/// Which storage worker to start.
#[derive(Clone, Debug, PartialEq)]
pub enum StorageSource {
    Http,
    Fixture(PathBuf),
    Offline,
}

/// Credentials that unlock the admin view.
#[derive(bevy::prelude::Resource, Clone, Debug, PartialEq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USER.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl AdminCredentials {
    pub fn accepts(&self, username: &str, password: &str) -> bool {
        self.username == username.trim() && self.password == password
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
    pub storage: StorageConfig,
    pub source: StorageSource,
    pub admin: AdminCredentials,
    /// Problems found while reading the environment. Logged once the app
    /// has a subscriber.
    pub issues: Vec<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                api_url: default_api_url(),
                warehouse_id: DEFAULT_WAREHOUSE_ID,
            },
            source: StorageSource::Http,
            admin: AdminCredentials::default(),
            issues: Vec::new(),
        }
    }
}

impl ExplorerConfig {
    /// Reads every `DEPOT_*` variable, falling back to defaults on bad input.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(raw) = read_var(API_URL_VAR) {
            match parse_api_url(&raw) {
                Ok(url) => config.storage.api_url = url,
                Err(err) => config
                    .issues
                    .push(format!("invalid {API_URL_VAR} {raw:?}: {err}")),
            }
        }

        if let Some(raw) = read_var(WAREHOUSE_ID_VAR) {
            match raw.parse::<WarehouseId>() {
                Ok(id) => config.storage.warehouse_id = id,
                Err(err) => config
                    .issues
                    .push(format!("invalid {WAREHOUSE_ID_VAR} {raw:?}: {err}")),
            }
        }

        if let Some(path) = read_var(FIXTURE_VAR) {
            config.source = StorageSource::Fixture(PathBuf::from(path));
        } else if let Some(raw) = read_var(OFFLINE_VAR) {
            match parse_flag(&raw) {
                Some(true) => config.source = StorageSource::Offline,
                Some(false) => {}
                None => config
                    .issues
                    .push(format!("invalid {OFFLINE_VAR} {raw:?}: expected 1/0/true/false")),
            }
        }

        if let Some(user) = read_var(ADMIN_USER_VAR) {
            config.admin.username = user;
        }
        if let Some(password) = read_var(ADMIN_PASSWORD_VAR) {
            config.admin.password = password;
        }

        config
    }
}

/// Parses the API base, forcing a trailing slash so relative joins keep any
/// path prefix.
pub fn parse_api_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.parse()
    } else {
        format!("{trimmed}/").parse()
    }
}

fn default_api_url() -> Url {
    parse_api_url(DEFAULT_API_URL).expect("default API url is valid")
}

fn read_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
