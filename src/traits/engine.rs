use crate::error::ViewerError;

/// Resolver for sub-assets referenced by name from a text-format model
/// (external buffers and images of a `.gltf` file).
pub type UriResolver<'a> = dyn FnMut(&str) -> Result<Vec<u8>, ViewerError> + 'a;

/// The rendering backend the session drives.
///
/// Model decode, scene graph, lighting and presentation all live behind this
/// seam; the session only sequences calls into it and never inspects the
/// decoded scene.
pub trait RenderEngine {
    /// Decode a single-file binary model
    fn load_glb(&mut self, bytes: &[u8]) -> Result<(), ViewerError>;

    /// Decode a text/JSON model, resolving external chunks through `resolve`
    fn load_gltf(&mut self, bytes: &[u8], resolve: &mut UriResolver) -> Result<(), ViewerError>;

    /// Rescale and recenter the loaded model so its bounding box fits a
    /// unit cube centered at the origin
    fn transform_to_unit_cube(&mut self);

    /// Apply precomputed irradiance data as indirect light
    fn set_indirect_light(&mut self, bytes: &[u8], intensity: f32) -> Result<(), ViewerError>;

    /// Apply a textured skybox
    fn set_skybox(&mut self, bytes: &[u8]) -> Result<(), ViewerError>;

    /// Attach a plain untextured skybox so the background is never undefined
    fn set_default_skybox(&mut self);

    /// Render one frame
    fn render(&mut self, frame_time_nanos: i64);

    /// Release the decoded model's resources
    fn destroy_model(&mut self);
}
