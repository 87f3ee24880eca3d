use serde::{Deserialize, Serialize};

pub const DEFAULT_RENDERER_CONFIG_PATH: &str = "assets/config/renderer.toml";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    pub window_width: i32,
    pub window_height: i32,
    pub title: String,
    /// Active le callback `glDebugMessageCallback`
    pub gl_debug: bool,
    /// Dossier de sortie des captures PNG (touche `P`)
    pub snapshot_dir: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 800,
            title: "Fireworks".to_string(),
            gl_debug: false,
            snapshot_dir: "snapshots".to_string(),
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
