use crate::error::ViewerError;

/// Read-only access to bundled scene content (models, environment maps).
///
/// Paths are forward-slash relative paths like `models/helmet.glb` or
/// `envs/studio/studio_ibl.ktx`, regardless of platform.
pub trait AssetReader {
    /// Read the full contents of one asset
    fn read(&self, path: &str) -> Result<Vec<u8>, ViewerError>;
}
