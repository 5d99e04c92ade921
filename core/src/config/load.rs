use std::path::PathBuf;

use super::types::AppConfig;

/// Get the default pandora data directory: ~/.pandora
pub fn get_pandora_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".pandora"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // ./pandora.toml sits next to the run and wins over ~/.pandora/config.toml.
    let local_config = PathBuf::from("pandora.toml");
    let user_config = get_pandora_data_dir()?.join("config.toml");

    let mut cfg = load_first(&[local_config, user_config])?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());

    Ok(cfg)
}

/// First existing file wins; nothing found means defaults.
fn load_first(candidates: &[PathBuf]) -> anyhow::Result<AppConfig> {
    match candidates.iter().find(|p| p.exists()) {
        Some(path) => {
            let s = std::fs::read_to_string(path)?;
            Ok(toml::from_str::<AppConfig>(&s)?)
        }
        None => Ok(AppConfig::default()),
    }
}

/// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("PANDORA_SCRIPTS_DIR") {
        if !v.trim().is_empty() {
            cfg.pipeline.scripts_dir = Some(v);
        }
    }
    if let Some(v) = var("PANDORA_INTERPRETER") {
        if !v.trim().is_empty() {
            cfg.scheduler.interpreter = v;
        }
    }
}
