use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::ViewerError;
use crate::session::Format;
use crate::traits::AssetReader;

/// Asset path for a model by name and container format
pub fn model_path(name: &str, format: Format) -> String {
    match format {
        Format::Glb => format!("models/{name}.glb"),
        Format::Gltf => format!("models/{name}.gltf"),
    }
}

/// Asset path for a sub-asset referenced from a `.gltf` file
pub fn model_uri_path(uri: &str) -> String {
    format!("models/{uri}")
}

/// Asset path for an environment's irradiance map
pub fn ibl_path(environment: &str) -> String {
    format!("envs/{environment}/{environment}_ibl.ktx")
}

/// Asset path for an environment's skybox texture
pub fn skybox_path(environment: &str) -> String {
    format!("envs/{environment}/{environment}_skybox.ktx")
}

/// Filesystem-backed asset reader rooted at a directory
pub struct DirReader {
    root: PathBuf,
}

impl DirReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl AssetReader for DirReader {
    fn read(&self, path: &str) -> Result<Vec<u8>, ViewerError> {
        let full = self.root.join(path);
        fs::read(&full).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ViewerError::AssetNotFound {
                path: path.to_string(),
            },
            _ => ViewerError::AssetRead {
                path: path.to_string(),
                source,
            },
        })
    }
}
