//! Config file path resolution
//!
//! Follows the XDG Base Directory layout with an env var override.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DUEL_INPUT_CONFIG` | Config file | `~/.config/duel-input/config.toml` |

use std::path::PathBuf;

/// Get the XDG config directory for duel-input
///
/// Priority: `XDG_CONFIG_HOME` > `~/.config`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("duel-input");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/duel-input");
    }

    // Last resort: current directory
    PathBuf::from(".")
}

/// Get the config file path
///
/// Priority: `DUEL_INPUT_CONFIG` env var > `config_dir()/config.toml`
pub fn config_path() -> PathBuf {
    std::env::var("DUEL_INPUT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Serializes tests that modify env vars
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_path_env_vars() {
        env::remove_var("DUEL_INPUT_CONFIG");
        env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    fn test_env_var_override_config() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_path_env_vars();
        env::set_var("DUEL_INPUT_CONFIG", "/custom/duel.toml");
        assert_eq!(config_path(), PathBuf::from("/custom/duel.toml"));
        clear_path_env_vars();
    }

    #[test]
    fn test_xdg_config_home_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_path_env_vars();
        env::set_var("XDG_CONFIG_HOME", "/xdg/config");
        assert_eq!(config_dir(), PathBuf::from("/xdg/config/duel-input"));
        assert_eq!(
            config_path(),
            PathBuf::from("/xdg/config/duel-input/config.toml")
        );
        clear_path_env_vars();
    }
}
