use std::io;

/// Everything that can go wrong while loading scene content.
///
/// All of these are absorbed at the session boundary: a failed asset leaves
/// its visual element absent, it never tears down the hosting surface.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("asset not found: {path}")]
    AssetNotFound { path: String },

    #[error("failed to read asset {path}: {source}")]
    AssetRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {what}: {detail}")]
    Decode { what: &'static str, detail: String },
}

impl ViewerError {
    pub fn decode(what: &'static str, detail: impl Into<String>) -> Self {
        Self::Decode {
            what,
            detail: detail.into(),
        }
    }
}
