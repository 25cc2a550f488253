use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use model_viewer::assets::DirReader;
use model_viewer::cli::Cli;
use model_viewer::config::ViewerConfig;
use model_viewer::frame::FrameClock;
use model_viewer::overlay::{DragController, WindowBounds};
use model_viewer::winit_adapter::{PointerBridge, RedrawScheduler, WinitLayoutHost};
use model_viewer::{ensure_initialized, Format, GltfEngine, ViewerSession};

/// Overlay-mode drag plumbing
struct DragState {
    controller: DragController,
    host: WinitLayoutHost,
    bridge: PointerBridge,
}

/// Live window plus the session it hosts
struct AppState {
    window: Arc<Window>,
    session: ViewerSession<DirReader, RedrawScheduler, GltfEngine>,
    drag: Option<DragState>,
}

struct ViewerApp {
    config: ViewerConfig,
    format: Format,
    overlay: bool,
    clock: FrameClock,
    state: Option<AppState>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, format: Format, overlay: bool) -> Self {
        Self {
            config,
            format,
            overlay,
            clock: FrameClock::new(),
            state: None,
        }
    }

    fn screen_size(event_loop: &ActiveEventLoop) -> PhysicalSize<u32> {
        event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|m| m.size())
            .unwrap_or(PhysicalSize::new(1920, 1080))
    }

    fn create_state(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState> {
        let screen = Self::screen_size(event_loop);

        let mut attributes = Window::default_attributes().with_title("model-viewer");
        let bounds = if self.overlay {
            let bounds = WindowBounds::scaled(
                screen.width as i32,
                screen.height as i32,
                self.config.overlay_scale,
            );
            attributes = attributes
                .with_inner_size(PhysicalSize::new(
                    bounds.window_width as u32,
                    bounds.window_height as u32,
                ))
                .with_decorations(false);
            Some(bounds)
        } else {
            attributes = attributes.with_inner_size(screen);
            None
        };

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );

        let reader = DirReader::new(&self.config.assets_dir);
        let scheduler = RedrawScheduler::new(window.clone());
        let mut session = ViewerSession::new(reader, scheduler, GltfEngine::new());
        session.create(
            &self.config.model,
            self.config.environment.as_deref(),
            self.format,
        );
        session.resume();

        let drag = bounds.map(|bounds| DragState {
            controller: DragController::new(bounds),
            host: WinitLayoutHost::new(window.clone(), screen),
            bridge: PointerBridge::new(),
        });

        Ok(AppState {
            window,
            session,
            drag,
        })
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        match self.state.as_mut() {
            Some(state) => state.session.resume(),
            None => match self.create_state(event_loop) {
                Ok(state) => self.state = Some(state),
                Err(err) => {
                    log::error!("startup failed: {err:#}");
                    event_loop.exit();
                }
            },
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_mut() {
            state.session.pause();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                state.session.destroy();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                state.session.on_frame(self.clock.now_nanos());
            }
            _ => {
                if let Some(drag) = state.drag.as_mut() {
                    drag.bridge.process_event(
                        &state.window,
                        &event,
                        &mut drag.controller,
                        &mut drag.host,
                    );
                }
            }
        }
    }
}

fn parse_format(tag: &str) -> Result<Format> {
    match tag.to_ascii_lowercase().as_str() {
        "glb" => Ok(Format::Glb),
        "gltf" => Ok(Format::Gltf),
        other => bail!("unknown model format {other:?} (expected glb or gltf)"),
    }
}

fn main() -> Result<()> {
    ensure_initialized();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(environment) = cli.environment {
        config.environment = Some(environment);
    }
    if let Some(assets) = cli.assets {
        config.assets_dir = assets.display().to_string();
    }
    let format = match cli.format.as_deref() {
        Some(tag) => parse_format(tag)?,
        None => config.format,
    };

    info!(
        "starting viewer: model={} environment={:?} format={:?} overlay={}",
        config.model, config.environment, format, cli.overlay
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = ViewerApp::new(config, format, cli.overlay);
    event_loop.run_app(&mut app)?;
    Ok(())
}
