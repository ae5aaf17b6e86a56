use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use ups_ship_core::CarrierCredentials;

const APP_NAME: &str = "ups-shipment";
const KEYCHAIN_SERVICE: &str = "ups.shipment.credentials";

pub const ACCESS_KEY_ENV: &str = "UPS_ACCESS_KEY";
pub const USER_NAME_ENV: &str = "UPS_USER_NAME";
pub const PASSWORD_ENV: &str = "UPS_PASSWORD";
pub const ACCESS_KEY_SECRET: &str = "ups_access_key";
pub const PASSWORD_SECRET: &str = "ups_password";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ups: UpsConfig,
}

/// UPS account settings. The password never lives in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UpsConfig {
    pub access_key: Option<String>,
    pub user_name: Option<String>,
    /// Talk to the production host instead of customer integration
    #[serde(default)]
    pub production: bool,
}

/// Location of the config file in the user's config directory.
pub fn config_path() -> Result<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).context("Failed to locate app config")
}

pub fn load() -> Result<AppConfig> {
    load_from(&config_path()?)
}

/// Load settings from `path`, writing defaults there when the file is missing.
pub fn load_from(path: &Path) -> Result<AppConfig> {
    confy::load_path(path)
        .with_context(|| format!("Failed to load app config from {}", path.display()))
}

pub fn store_to(path: &Path, cfg: &AppConfig) -> Result<()> {
    confy::store_path(path, cfg)
        .with_context(|| format!("Failed to store app config to {}", path.display()))
}

/// Retrieve a secret from the OS keychain
pub fn get_secret(key: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, key)?;
    let password = entry.get_password()?;
    Ok(password)
}

/// Where a credential value may come from, besides the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    Env(&'a str),
    Secret(&'a str),
}

/// Default lookup: process environment and OS keychain.
pub fn env_or_keychain(source: Source<'_>) -> Option<String> {
    match source {
        Source::Env(name) => std::env::var(name).ok(),
        Source::Secret(key) => get_secret(key).ok(),
    }
}

/// Resolve UPS credentials from `lookup` (see [`env_or_keychain`]) and the config file.
///
/// Precedence: access key is env, then config, then keychain; user name is
/// env, then config; password is env, then keychain.
pub fn resolve_credentials_with<F>(cfg: &UpsConfig, lookup: F) -> Result<CarrierCredentials>
where
    F: Fn(Source<'_>) -> Option<String>,
{
    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let access_key = non_empty(lookup(Source::Env(ACCESS_KEY_ENV)))
        .or_else(|| non_empty(cfg.access_key.clone()))
        .or_else(|| non_empty(lookup(Source::Secret(ACCESS_KEY_SECRET))))
        .ok_or_else(|| anyhow!("UPS access key not configured"))?;

    let user_name = non_empty(lookup(Source::Env(USER_NAME_ENV)))
        .or_else(|| non_empty(cfg.user_name.clone()))
        .ok_or_else(|| anyhow!("UPS user name not configured"))?;

    let password = non_empty(lookup(Source::Env(PASSWORD_ENV)))
        .or_else(|| non_empty(lookup(Source::Secret(PASSWORD_SECRET))))
        .ok_or_else(|| anyhow!("UPS password not found in env or keychain"))?;

    Ok(CarrierCredentials::new(access_key, user_name, password))
}
