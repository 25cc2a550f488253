use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::session::Format;

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_overlay_scale() -> f64 {
    0.55
}

/// Viewer configuration, loadable from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Model name under `assets/models/`
    pub model: String,
    /// Environment name under `assets/envs/`, absent for the plain skybox
    #[serde(default)]
    pub environment: Option<String>,
    pub format: Format,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Overlay window size as a fraction of the screen
    #[serde(default = "default_overlay_scale")]
    pub overlay_scale: f64,
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model: "scene".to_string(),
            environment: Some("venetian_crossroads_2k".to_string()),
            format: Format::Gltf,
            assets_dir: default_assets_dir(),
            overlay_scale: default_overlay_scale(),
        }
    }
}
