//! Scene loading and the per-frame render loop.
//!
//! A [`ViewerSession`] follows the hosting surface's lifecycle: `create`
//! loads the model and environment, `resume`/`pause` start and stop the
//! vsync-driven render loop, `destroy` releases the model. Asset and decode
//! failures are logged and absorbed here; a failed load leaves that visual
//! element absent but never takes down the host.

use log::{error, info, warn};

use crate::assets::{ibl_path, model_path, model_uri_path, skybox_path};
use crate::error::ViewerError;
use crate::traits::{AssetReader, FrameScheduler, RenderEngine};

/// Indirect-light intensity, in the lighting units the rendering backend
/// expects for these environment maps.
pub const IBL_INTENSITY: f32 = 50_000.0;

/// Supported model container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Single-file binary container
    Glb,
    /// Text/JSON with externally referenced chunks
    Gltf,
}

/// Session lifecycle, driven by the hosting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Loading,
    /// Scene content loaded (or as much of it as survived), frame loop not
    /// running
    Ready,
    Active,
    Paused,
    Destroyed,
}

/// Orchestrates model/environment loading and the render-trigger loop over
/// injected asset, scheduling, and engine capabilities.
pub struct ViewerSession<R, S, E> {
    reader: R,
    scheduler: S,
    engine: E,
    state: Lifecycle,
}

impl<R, S, E> ViewerSession<R, S, E>
where
    R: AssetReader,
    S: FrameScheduler,
    E: RenderEngine,
{
    pub fn new(reader: R, scheduler: S, engine: E) -> Self {
        crate::ensure_initialized();
        Self {
            reader,
            scheduler,
            engine,
            state: Lifecycle::Idle,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Load the model and environment. The scene always ends up with *some*
    /// skybox: the environment's if it loads, a plain default otherwise.
    pub fn create(&mut self, model: &str, environment: Option<&str>, format: Format) {
        self.state = Lifecycle::Loading;

        self.load_model(model, format);

        let mut have_skybox = false;
        if let Some(env) = environment {
            have_skybox = self.load_environment(env);
        }
        if !have_skybox {
            self.engine.set_default_skybox();
        }

        self.state = Lifecycle::Ready;
    }

    /// Start the per-frame render loop
    pub fn resume(&mut self) {
        if self.state == Lifecycle::Destroyed {
            warn!("resume() after destroy() ignored");
            return;
        }
        self.state = Lifecycle::Active;
        self.scheduler.request_frame();
    }

    /// Stop the render loop; idempotent
    pub fn pause(&mut self) {
        self.scheduler.cancel_frame();
        if self.state == Lifecycle::Active {
            self.state = Lifecycle::Paused;
        }
    }

    /// One vsync tick. Re-requests the next frame first, then renders, so
    /// the loop is self-sustaining exactly while the session is active.
    pub fn on_frame(&mut self, frame_time_nanos: i64) {
        if self.state != Lifecycle::Active {
            return;
        }
        self.scheduler.request_frame();
        self.engine.render(frame_time_nanos);
    }

    /// Stop rendering and release the model. Safe from any state, including
    /// after a partially failed `create` or with no `resume` ever issued.
    pub fn destroy(&mut self) {
        self.scheduler.cancel_frame();
        self.engine.destroy_model();
        self.state = Lifecycle::Destroyed;
    }

    fn load_model(&mut self, name: &str, format: Format) {
        info!("loading model {name:?} as {format:?}");
        let result = match format {
            Format::Glb => self.load_glb(name),
            Format::Gltf => self.load_gltf(name),
        };
        match result {
            Ok(()) => {
                // Mandatory after every successful decode, for consistent
                // default camera framing.
                self.engine.transform_to_unit_cube();
            }
            Err(err) => error!("model {name:?} not loaded: {err}"),
        }
    }

    fn load_glb(&mut self, name: &str) -> Result<(), ViewerError> {
        let bytes = self.reader.read(&model_path(name, Format::Glb))?;
        self.engine.load_glb(&bytes)
    }

    fn load_gltf(&mut self, name: &str) -> Result<(), ViewerError> {
        let bytes = self.reader.read(&model_path(name, Format::Gltf))?;
        let reader = &self.reader;
        self.engine
            .load_gltf(&bytes, &mut |uri| reader.read(&model_uri_path(uri)))
    }

    /// Returns true when the environment's skybox was applied
    fn load_environment(&mut self, environment: &str) -> bool {
        info!("loading environment {environment:?}");

        // Irradiance first, skybox second; each failure is independent.
        let ibl = self
            .reader
            .read(&ibl_path(environment))
            .and_then(|bytes| self.engine.set_indirect_light(&bytes, IBL_INTENSITY));
        if let Err(err) = ibl {
            warn!("indirect light for {environment:?} not applied: {err}");
        }

        let skybox = self
            .reader
            .read(&skybox_path(environment))
            .and_then(|bytes| self.engine.set_skybox(&bytes));
        match skybox {
            Ok(()) => true,
            Err(err) => {
                warn!("skybox for {environment:?} not applied: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapReader {
        files: HashMap<String, Vec<u8>>,
    }

    impl MapReader {
        fn new(entries: &[(&str, &[u8])]) -> Self {
            Self {
                files: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_vec()))
                    .collect(),
            }
        }
    }

    impl AssetReader for MapReader {
        fn read(&self, path: &str) -> Result<Vec<u8>, ViewerError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| ViewerError::AssetNotFound {
                    path: path.to_string(),
                })
        }
    }

    #[derive(Default)]
    struct CountingScheduler {
        pending: usize,
        requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.pending += 1;
            self.requests += 1;
        }

        fn cancel_frame(&mut self) {
            self.pending = 0;
        }
    }

    /// Records every engine call in order
    #[derive(Debug, PartialEq)]
    enum Call {
        LoadGlb(usize),
        LoadGltf(usize),
        TransformToUnitCube,
        IndirectLight { len: usize, intensity: f32 },
        Skybox(usize),
        DefaultSkybox,
        Render(i64),
        DestroyModel,
    }

    #[derive(Default)]
    struct RecordingEngine {
        calls: Vec<Call>,
        fail_decode: bool,
    }

    impl RenderEngine for RecordingEngine {
        fn load_glb(&mut self, bytes: &[u8]) -> Result<(), ViewerError> {
            if self.fail_decode {
                return Err(ViewerError::decode("model", "simulated"));
            }
            self.calls.push(Call::LoadGlb(bytes.len()));
            Ok(())
        }

        fn load_gltf(
            &mut self,
            bytes: &[u8],
            resolve: &mut crate::traits::UriResolver,
        ) -> Result<(), ViewerError> {
            // Pull one external chunk, the way a real decoder would.
            let chunk = resolve("scene.bin")?;
            self.calls.push(Call::LoadGltf(bytes.len() + chunk.len()));
            Ok(())
        }

        fn transform_to_unit_cube(&mut self) {
            self.calls.push(Call::TransformToUnitCube);
        }

        fn set_indirect_light(&mut self, bytes: &[u8], intensity: f32) -> Result<(), ViewerError> {
            self.calls.push(Call::IndirectLight {
                len: bytes.len(),
                intensity,
            });
            Ok(())
        }

        fn set_skybox(&mut self, bytes: &[u8]) -> Result<(), ViewerError> {
            self.calls.push(Call::Skybox(bytes.len()));
            Ok(())
        }

        fn set_default_skybox(&mut self) {
            self.calls.push(Call::DefaultSkybox);
        }

        fn render(&mut self, frame_time_nanos: i64) {
            self.calls.push(Call::Render(frame_time_nanos));
        }

        fn destroy_model(&mut self) {
            self.calls.push(Call::DestroyModel);
        }
    }

    fn session_with(
        reader: MapReader,
        engine: RecordingEngine,
    ) -> ViewerSession<MapReader, CountingScheduler, RecordingEngine> {
        ViewerSession::new(reader, CountingScheduler::default(), engine)
    }

    #[test]
    fn create_sequences_model_then_environment() {
        let reader = MapReader::new(&[
            ("models/helmet.glb", b"glb-bytes".as_slice()),
            (
                "envs/venetian_crossroads_2k/venetian_crossroads_2k_ibl.ktx",
                b"ibl".as_slice(),
            ),
            (
                "envs/venetian_crossroads_2k/venetian_crossroads_2k_skybox.ktx",
                b"sky".as_slice(),
            ),
        ]);
        let mut session = session_with(reader, RecordingEngine::default());

        session.create("helmet", Some("venetian_crossroads_2k"), Format::Glb);

        assert_eq!(
            session.engine().calls,
            vec![
                Call::LoadGlb(9),
                Call::TransformToUnitCube,
                Call::IndirectLight {
                    len: 3,
                    intensity: IBL_INTENSITY
                },
                Call::Skybox(3),
            ]
        );
        assert_eq!(session.state(), Lifecycle::Ready);
    }

    #[test]
    fn gltf_models_resolve_external_chunks_through_the_reader() {
        let reader = MapReader::new(&[
            ("models/scene.gltf", b"json".as_slice()),
            ("models/scene.bin", b"chunk".as_slice()),
        ]);
        let mut session = session_with(reader, RecordingEngine::default());

        session.create("scene", None, Format::Gltf);

        assert_eq!(
            session.engine().calls,
            vec![
                Call::LoadGltf(4 + 5),
                Call::TransformToUnitCube,
                Call::DefaultSkybox,
            ]
        );
    }

    #[test]
    fn missing_model_is_absorbed_and_environment_still_loads() {
        let reader = MapReader::new(&[
            ("envs/studio/studio_ibl.ktx", b"ibl".as_slice()),
            ("envs/studio/studio_skybox.ktx", b"sky".as_slice()),
        ]);
        let mut session = session_with(reader, RecordingEngine::default());

        session.create("missing", Some("studio"), Format::Glb);

        // No decode, no unit-cube transform, but lighting proceeds.
        assert_eq!(
            session.engine().calls,
            vec![
                Call::IndirectLight {
                    len: 3,
                    intensity: IBL_INTENSITY
                },
                Call::Skybox(3),
            ]
        );
        assert_eq!(session.state(), Lifecycle::Ready);
    }

    #[test]
    fn decode_failure_skips_unit_cube_transform() {
        let reader = MapReader::new(&[("models/bad.glb", b"junk".as_slice())]);
        let engine = RecordingEngine {
            fail_decode: true,
            ..Default::default()
        };
        let mut session = session_with(reader, engine);

        session.create("bad", None, Format::Glb);

        assert_eq!(session.engine().calls, vec![Call::DefaultSkybox]);
    }

    #[test]
    fn missing_skybox_falls_back_to_default() {
        let reader = MapReader::new(&[
            ("models/helmet.glb", b"glb".as_slice()),
            ("envs/studio/studio_ibl.ktx", b"ibl".as_slice()),
        ]);
        let mut session = session_with(reader, RecordingEngine::default());

        session.create("helmet", Some("studio"), Format::Glb);

        assert_eq!(
            session.engine().calls,
            vec![
                Call::LoadGlb(3),
                Call::TransformToUnitCube,
                Call::IndirectLight {
                    len: 3,
                    intensity: IBL_INTENSITY
                },
                Call::DefaultSkybox,
            ]
        );
    }

    #[test]
    fn resume_then_pause_leaves_no_pending_frames() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.resume();
        session.pause();
        assert_eq!(session.scheduler.pending, 0);
        assert_eq!(session.state(), Lifecycle::Paused);
    }

    #[test]
    fn pause_is_idempotent() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.resume();
        session.pause();
        session.pause();
        assert_eq!(session.scheduler.pending, 0);
    }

    #[test]
    fn destroy_without_resume_is_safe() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.destroy();
        assert_eq!(session.scheduler.pending, 0);
        assert_eq!(session.engine().calls, vec![Call::DestroyModel]);
        assert_eq!(session.state(), Lifecycle::Destroyed);
    }

    #[test]
    fn frame_loop_re_requests_while_active() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.resume();
        assert_eq!(session.scheduler.pending, 1);

        session.on_frame(16_000_000);
        session.on_frame(32_000_000);
        // resume + one re-request per frame
        assert_eq!(session.scheduler.requests, 3);
        assert_eq!(
            session.engine().calls,
            vec![Call::Render(16_000_000), Call::Render(32_000_000)]
        );
    }

    #[test]
    fn frames_after_pause_do_not_re_register() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.resume();
        session.pause();

        session.on_frame(1);
        assert_eq!(session.scheduler.pending, 0);
        assert!(session.engine().calls.is_empty());
    }

    #[test]
    fn resume_after_destroy_is_rejected() {
        let mut session = session_with(MapReader::new(&[]), RecordingEngine::default());
        session.destroy();
        session.resume();
        assert_eq!(session.scheduler.pending, 0);
        assert_eq!(session.state(), Lifecycle::Destroyed);
    }
}
