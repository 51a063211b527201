use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::Window,
};

// Import from the library crate
use hopper::{controller, logging, model, ui, view};

use controller::{FrameLoop, FrameStats, InputEvent, InputProcessor, InputState};
use model::{ConfigError, PhysicsPreset, TimeStepConfig};
use ui::{EguiScene, HudInfo};
use view::{GpuContext, GpuInitError};

/// Environment variable selecting the physics preset
const PRESET_ENV: &str = "HOPPER_PRESET";

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("GPU initialization failed: {0}")]
    Gpu(#[from] GpuInitError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

struct App {
    gpu: GpuContext,
    window: Arc<Window>,

    // egui
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Simulation
    frame_loop: FrameLoop,
    preset: PhysicsPreset,
    scene: EguiScene,
    stats: FrameStats,

    // Input handling
    input_state: InputState,
    input_processor: InputProcessor,

    // Frame timing
    clock: Instant,
    last_frame: f64,
    dt: f32,
}

impl App {
    async fn new(window: Arc<Window>, preset: PhysicsPreset) -> Result<Self, AppError> {
        let gpu = GpuContext::new_native(window.clone()).await?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.format,
            egui_wgpu::RendererOptions::default(),
        );

        // The loop's clock starts at zero together with `clock`.
        let frame_loop = FrameLoop::new(preset.config(), TimeStepConfig::default(), 0.0)?;

        Ok(Self {
            gpu,
            window,
            egui_renderer,
            egui_state,
            egui_ctx,
            frame_loop,
            preset,
            scene: EguiScene::default(),
            stats: FrameStats::default(),
            input_state: InputState::new(),
            input_processor: InputProcessor::default(),
            clock: Instant::now(),
            last_frame: 0.0,
            dt: 0.0,
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        if self.egui_state.on_window_event(self.window.as_ref(), event).consumed {
            return true;
        }

        match event {
            WindowEvent::KeyboardInput { event: KeyEvent { state, logical_key, .. }, .. } => {
                if let Some(key) = key_name(logical_key) {
                    let input = match state {
                        ElementState::Pressed => InputEvent::KeyDown(key),
                        ElementState::Released => InputEvent::KeyUp(key),
                    };
                    self.input_state.process_event(&input);
                }
                true
            }
            WindowEvent::Focused(false) => {
                self.input_state.process_event(&InputEvent::FocusLost);
                true
            }
            WindowEvent::Occluded(occluded) => {
                self.input_state
                    .process_event(&InputEvent::VisibilityChanged { visible: !occluded });
                true
            }
            _ => false,
        }
    }

    fn update(&mut self) {
        let now = self.clock.elapsed().as_secs_f64();
        self.dt = (now - self.last_frame) as f32;
        self.last_frame = now;

        let snapshot = self.input_processor.snapshot(&self.input_state);
        self.stats = self.frame_loop.frame(now, &snapshot, &mut self.scene);
        if self.stats.landed {
            let p = self.frame_loop.entity().transform;
            info!(x = p.x, y = p.y, "touchdown");
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let hud = HudInfo {
            frame_loop: &self.frame_loop,
            stats: self.stats,
            preset: self.preset,
            dt: self.dt,
        };
        let full_output = ui::build_ui(&self.egui_ctx, raw_input, &self.scene, &hud);
        self.egui_state.handle_platform_output(&self.window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point,
        };

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        // Upload egui textures
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }
        let egui_commands = self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &screen_descriptor,
        );

        {
            let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer.render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        // Cleanup egui textures
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.gpu
            .queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }
}

/// Map winit's logical keys onto the browser `KeyboardEvent.key` names used by the bindings
fn key_name(key: &Key) -> Option<String> {
    let name = match key {
        Key::Character(c) => return Some(c.to_string()),
        Key::Named(NamedKey::Space) => " ",
        Key::Named(NamedKey::ArrowUp) => "ArrowUp",
        Key::Named(NamedKey::ArrowDown) => "ArrowDown",
        Key::Named(NamedKey::ArrowLeft) => "ArrowLeft",
        Key::Named(NamedKey::ArrowRight) => "ArrowRight",
        Key::Named(NamedKey::Shift) => "Shift",
        Key::Named(NamedKey::Escape) => "Escape",
        _ => return None,
    };
    Some(name.to_string())
}

fn preset_from_env() -> Result<PhysicsPreset, ConfigError> {
    match std::env::var(PRESET_ENV) {
        Ok(name) => PhysicsPreset::from_name(&name),
        Err(_) => Ok(PhysicsPreset::default()),
    }
}

fn run() -> Result<(), AppError> {
    let preset = preset_from_env()?;

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("hopper")
        .with_inner_size(winit::dpi::LogicalSize::new(800, 800));
    #[allow(deprecated)]
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = pollster::block_on(App::new(window, preset))?;
    info!(preset = preset.name(), "simulation ready");

    #[allow(deprecated)]
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.gpu.resize(physical_size.width, physical_size.height);
                        }
                        WindowEvent::RedrawRequested => {
                            app.update();

                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    let size = app.window.inner_size();
                                    app.gpu.resize(size.width, size.height);
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    error!("surface out of memory");
                                    elwt.exit();
                                }
                                Err(e) => warn!(?e, "frame skipped"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;
    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
