// SPDX-FileCopyrightText: 2026 Promptcost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./promptcost.toml` > `~/.config/promptcost/promptcost.toml`
//! > `/etc/promptcost/promptcost.toml` with environment variable overrides via
//! `PROMPTCOST_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PromptCostConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/promptcost/promptcost.toml";

/// Local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "promptcost.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/promptcost/promptcost.toml` (system-wide)
/// 3. `~/.config/promptcost/promptcost.toml` (user XDG config)
/// 4. `./promptcost.toml` (local directory)
/// 5. `PROMPTCOST_*` environment variables
pub fn load_config() -> Result<PromptCostConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PromptCostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptCostConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PromptCostConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PromptCostConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PromptCostConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// The per-user config file, `~/.config/promptcost/promptcost.toml` on Linux.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("promptcost").join(LOCAL_CONFIG_FILE))
}

/// Config files that exist and feed [`load_config`], lowest precedence first.
///
/// Missing layers are skipped by figment without error, so this is the only
/// way to tell which files a loaded config came from.
pub fn existing_config_files() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    candidates.extend(user_config_path());
    candidates.push(PathBuf::from(LOCAL_CONFIG_FILE));
    candidates.into_iter().filter(|p| p.is_file()).collect()
}

/// Names of the `PROMPTCOST_*` variables set in the environment.
pub fn env_overrides() -> Vec<String> {
    let mut names: Vec<String> = std::env::vars()
        .map(|(name, _)| name)
        .filter(|name| name.starts_with("PROMPTCOST_"))
        .collect();
    names.sort();
    names
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")`: key names contain underscores, so
/// `PROMPTCOST_SIMULATION_MEAN_PROMPTS` must map to `simulation.mean_prompts`,
/// and `PROMPTCOST_SIMULATION_TOKEN_RANGE_MAX` to `simulation.token_range.max`.
fn env_provider() -> Env {
    Env::prefixed("PROMPTCOST_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("simulation_", "simulation.", 1)
        .replacen("report_", "report.", 1)
        .replacen("logging_", "logging.", 1)
        .replacen("image_range_", "image_range.", 1)
        .replacen("runtime_range_", "runtime_range.", 1)
        .replacen("token_range_", "token_range.", 1)
}
