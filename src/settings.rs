//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file. Missing or invalid files
//! fall back to defaults; unknown or absent fields take their default value.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PLAYER_NAME, TARGET_FPS};

/// Environment variable naming the settings file
pub const CONFIG_ENV: &str = "DSA_ARCADE_CONFIG";
/// Environment variable overriding the RNG seed
pub const SEED_ENV: &str = "DSA_ARCADE_SEED";
/// Settings file used when `DSA_ARCADE_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "dsa_arcade.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name recorded on the leaderboard
    pub player_name: String,
    /// `name,score` leaderboard file
    pub high_score_path: PathBuf,
    /// Frame loop rate
    pub target_fps: u32,
    /// Fixed RNG seed for reproducible sessions (random when unset)
    pub seed: Option<u64>,
    /// Where log output goes while the terminal UI owns the screen
    pub log_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            high_score_path: PathBuf::from("high_scores.txt"),
            target_fps: TARGET_FPS,
            seed: None,
            log_path: PathBuf::from("dsa-arcade.log"),
        }
    }
}

impl Settings {
    /// Parse settings JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Invalid settings in {} ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Load from `DSA_ARCADE_CONFIG` (or the default path) and apply env overrides
    pub fn load_from_env() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        let seed = std::env::var(SEED_ENV).ok();
        Self::load(&path).with_seed_override(seed.as_deref())
    }

    /// Apply a seed given as text; unparsable values are ignored
    pub fn with_seed_override(mut self, seed: Option<&str>) -> Self {
        if let Some(raw) = seed {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid {SEED_ENV} value {raw:?}"),
            }
        }
        self
    }

    /// Save settings as pretty JSON; failures are logged
    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Failed to encode settings: {err}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!("Settings saved to {}", path.display()),
            Err(err) => log::warn!("Failed to save settings to {}: {err}", path.display()),
        }
    }

    /// Duration of one frame at the target rate (at least 1 fps)
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }

    /// Create (truncate) the log file; `None` when it can't be opened
    pub fn open_log_file(&self) -> Option<fs::File> {
        fs::File::create(&self.log_path).ok()
    }

    /// Configured seed, or a fresh random one
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.player_name, "PLAYER");
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.frame_duration(), Duration::from_millis(16));
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"player_name":"ADA","seed":7}"#).unwrap();
        assert_eq!(settings.player_name, "ADA");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.high_score_path, PathBuf::from("high_scores.txt"));
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let path = std::env::temp_dir()
            .join(format!("dsa-arcade-settings-{}.json", std::process::id()));
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());

        let custom = Settings {
            player_name: "GRACE".to_string(),
            target_fps: 30,
            ..Default::default()
        };
        custom.save(&path);
        assert_eq!(Settings::load(&path), custom);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_seed_override() {
        let settings = Settings::default().with_seed_override(Some(" 42 "));
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.resolved_seed(), 42);
        let settings = settings.with_seed_override(Some("nope"));
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn test_unwritable_log_path_is_skipped() {
        let dir = std::env::temp_dir()
            .join(format!("dsa-arcade-no-such-dir-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let settings = Settings {
            log_path: dir.join("dsa-arcade.log"),
            ..Default::default()
        };
        assert!(settings.open_log_file().is_none());

        let settings = Settings {
            log_path: std::env::temp_dir()
                .join(format!("dsa-arcade-log-{}.log", std::process::id())),
            ..Default::default()
        };
        assert!(settings.open_log_file().is_some());
        let _ = fs::remove_file(&settings.log_path);
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let settings = Settings {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(settings.frame_duration(), Duration::from_secs(1));
    }
}
