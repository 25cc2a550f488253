//! Byte-oriented glTF backend implementing [`RenderEngine`].
//!
//! Decodes GLB/glTF payloads with the `gltf` crate, resolves external
//! buffers through the caller-supplied resolver, and computes the
//! world-space bounds that unit-cube normalization needs. Lighting payloads
//! are validated by their KTX identifier and otherwise held opaque for the
//! GPU layer.

use glam::{Mat4, Vec3};
use log::debug;

use crate::error::ViewerError;
use crate::math::Aabb;
use crate::traits::{RenderEngine, UriResolver};

/// KTX 1.1 file identifier
const KTX1_MAGIC: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];
/// KTX 2.0 file identifier
const KTX2_MAGIC: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x32, 0x30, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// A decoded model and its normalization state
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub bounds: Option<Aabb>,
    pub root_transform: Mat4,
    pub vertex_count: usize,
}

/// What is currently attached as the scene background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyboxKind {
    Unset,
    /// Plain untextured fallback
    Default,
    /// Environment capture texture
    Environment,
}

/// Applied indirect-light state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndirectLight {
    pub intensity: f32,
    pub payload_len: usize,
}

pub struct GltfEngine {
    model: Option<LoadedModel>,
    indirect_light: Option<IndirectLight>,
    skybox: SkyboxKind,
    frames_rendered: u64,
    last_frame_time_nanos: i64,
}

impl GltfEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            indirect_light: None,
            skybox: SkyboxKind::Unset,
            frames_rendered: 0,
            last_frame_time_nanos: 0,
        }
    }

    pub fn model(&self) -> Option<&LoadedModel> {
        self.model.as_ref()
    }

    pub fn indirect_light(&self) -> Option<IndirectLight> {
        self.indirect_light
    }

    pub fn skybox(&self) -> SkyboxKind {
        self.skybox
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    fn decode(
        &mut self,
        gltf: gltf::Gltf,
        mut resolve: Option<&mut UriResolver>,
    ) -> Result<(), ViewerError> {
        let document = gltf.document;
        let mut blob = gltf.blob;

        let mut buffers: Vec<Vec<u8>> = Vec::new();
        for buffer in document.buffers() {
            let mut data = match buffer.source() {
                gltf::buffer::Source::Bin => blob
                    .take()
                    .ok_or_else(|| ViewerError::decode("model", "binary chunk missing"))?,
                gltf::buffer::Source::Uri(uri) => {
                    if uri.starts_with("data:") {
                        return Err(ViewerError::decode("model", "data URIs are not supported"));
                    }
                    match &mut resolve {
                        Some(resolve) => resolve(uri)?,
                        None => {
                            return Err(ViewerError::decode(
                                "model",
                                format!("external buffer {uri:?} in a binary model"),
                            ))
                        }
                    }
                }
            };
            if data.len() < buffer.length() {
                return Err(ViewerError::decode(
                    "model",
                    format!(
                        "buffer {} is {} bytes, expected {}",
                        buffer.index(),
                        data.len(),
                        buffer.length()
                    ),
                ));
            }
            while data.len() % 4 != 0 {
                data.push(0);
            }
            buffers.push(data);
        }

        let mut bounds = None;
        let mut vertex_count = 0;
        for scene in document.scenes() {
            for node in scene.nodes() {
                collect_node_bounds(
                    &node,
                    &buffers,
                    &Mat4::IDENTITY,
                    &mut bounds,
                    &mut vertex_count,
                )?;
            }
        }
        debug!(
            "decoded model: {} vertices, bounds {:?}",
            vertex_count, bounds
        );

        self.model = Some(LoadedModel {
            bounds,
            root_transform: Mat4::IDENTITY,
            vertex_count,
        });
        Ok(())
    }

    fn check_ktx(bytes: &[u8], what: &'static str) -> Result<(), ViewerError> {
        if bytes.len() < 12 || (bytes[..12] != KTX1_MAGIC && bytes[..12] != KTX2_MAGIC) {
            return Err(ViewerError::decode(what, "not a KTX texture"));
        }
        Ok(())
    }
}

impl Default for GltfEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine for GltfEngine {
    fn load_glb(&mut self, bytes: &[u8]) -> Result<(), ViewerError> {
        let gltf = gltf::Gltf::from_slice(bytes)
            .map_err(|err| ViewerError::decode("model", err.to_string()))?;
        self.decode(gltf, None)
    }

    fn load_gltf(&mut self, bytes: &[u8], resolve: &mut UriResolver) -> Result<(), ViewerError> {
        let gltf = gltf::Gltf::from_slice(bytes)
            .map_err(|err| ViewerError::decode("model", err.to_string()))?;
        self.decode(gltf, Some(resolve))
    }

    fn transform_to_unit_cube(&mut self) {
        if let Some(model) = self.model.as_mut() {
            model.root_transform = match model.bounds {
                Some(bounds) => unit_cube_transform(&bounds),
                None => Mat4::IDENTITY,
            };
        }
    }

    fn set_indirect_light(&mut self, bytes: &[u8], intensity: f32) -> Result<(), ViewerError> {
        Self::check_ktx(bytes, "irradiance map")?;
        self.indirect_light = Some(IndirectLight {
            intensity,
            payload_len: bytes.len(),
        });
        Ok(())
    }

    fn set_skybox(&mut self, bytes: &[u8]) -> Result<(), ViewerError> {
        Self::check_ktx(bytes, "skybox")?;
        self.skybox = SkyboxKind::Environment;
        Ok(())
    }

    fn set_default_skybox(&mut self) {
        self.skybox = SkyboxKind::Default;
    }

    fn render(&mut self, frame_time_nanos: i64) {
        self.frames_rendered += 1;
        self.last_frame_time_nanos = frame_time_nanos;
    }

    fn destroy_model(&mut self) {
        self.model = None;
    }
}

/// Uniform scale plus translation that fits `bounds` into a side-1 cube
/// centered at the origin. Degenerate bounds map to the identity.
pub fn unit_cube_transform(bounds: &Aabb) -> Mat4 {
    let max_extent = bounds.max_extent();
    if max_extent <= 0.0 || !max_extent.is_finite() {
        return Mat4::IDENTITY;
    }
    let scale = 1.0 / max_extent;
    Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-bounds.center())
}

/// Recursively accumulates world-space vertex bounds under `node`
fn collect_node_bounds(
    node: &gltf::Node,
    buffers: &[Vec<u8>],
    parent_transform: &Mat4,
    bounds: &mut Option<Aabb>,
    vertex_count: &mut usize,
) -> Result<(), ViewerError> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global = *parent_transform * local;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let world = positions.map(|pos| global.transform_point3(Vec3::from_array(pos)));
            let mut count = 0;
            let mesh_bounds = Aabb::from_points(world.inspect(|_| count += 1));
            *vertex_count += count;
            if let Some(mesh_bounds) = mesh_bounds {
                *bounds = Some(match bounds {
                    Some(existing) => existing.union(&mesh_bounds),
                    None => mesh_bounds,
                });
            }
        }
    }

    for child in node.children() {
        collect_node_bounds(&child, buffers, &global, bounds, vertex_count)?;
    }

    Ok(())
}
