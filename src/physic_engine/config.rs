use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SHOW_CONFIG_PATH: &str = "assets/config/show.toml";

/// Réglages du spectacle, modifiables à chaud.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ShowConfig {
    /// Nombre de particules par explosion (lu au moment de l'explosion)
    pub particle_count: i32,
    pub auto_launch: bool,
    pub auto_launch_interval_ms: u64,
    /// Opacité du rectangle `destination-out` appliqué à chaque frame
    pub fade_alpha: f32,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            auto_launch: true,
            auto_launch_interval_ms: 800,
            fade_alpha: 0.5,
        }
    }
}

impl ShowConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn auto_launch_interval(&self) -> Duration {
        Duration::from_millis(self.auto_launch_interval_ms)
    }
}
