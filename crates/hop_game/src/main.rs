//! Tile Hop -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Each rendered frame:
//!
//!   1. `begin_frame()` -- measure wall-clock delta, feed the accumulator
//!   2. drain queued key events into player commands (quit/close exits here)
//!   3. `while should_step()` -- advance the world one fixed tick at a time
//!   4. rebuild the rectangle batch from every entity and draw it
//!   5. composite the FPS overlay, present
//!
//! Frames are paced by sleeping in `ControlFlow::WaitUntil` until the next
//! tick deadline.

mod collision;
mod config;
mod enemy;
mod entity;
mod error;
mod level;
mod player;
#[cfg(test)]
mod replay;
mod world;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::{load_config_or_default, GameConfig};
use entity::EntityKind;
use hop_core::input::{InputEvent, InputState, Key};
use hop_core::time::TimeState;
use hop_devtools::{FpsOverlay, OverlayStyle};
use hop_platform::window::PlatformConfig;
use hop_render::{Camera2D, GpuContext, RectBatch, RectRenderer};
use level::DEFAULT_LEVEL;
use world::{Command, World};

const CONFIG_PATH: &str = "assets/config/game.json";

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.12,
    g: 0.16,
    b: 0.28,
    a: 1.0,
};

fn entity_color(kind: EntityKind) -> [f32; 4] {
    match kind {
        EntityKind::Platform => [0.45, 0.30, 0.18, 1.0],
        EntityKind::Enemy => [0.85, 0.15, 0.15, 1.0],
        EntityKind::Player => [0.20, 0.75, 0.35, 1.0],
    }
}

/// Everything that needs a live window. Built in `resumed`.
struct EngineState {
    window: Arc<Window>,
    gpu: GpuContext,
    time: TimeState,
    input: InputState,
    renderer: RectRenderer,
    batch: RectBatch,
    overlay: FpsOverlay,
    world: World,
}

impl EngineState {
    fn new(window: Arc<Window>, config: &GameConfig, world: World) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let camera = Camera2D::new(config.screen_width_px(), config.screen_height_px());
        let renderer = RectRenderer::new(&gpu.device, gpu.surface_format, &camera);
        let overlay = FpsOverlay::new(
            &gpu.device,
            gpu.surface_format,
            &window,
            OverlayStyle {
                font_size: config.overlay_font_size,
                ..OverlayStyle::default()
            },
        );
        let batch = RectBatch::with_capacity(world.entities().count());

        Ok(Self {
            window,
            gpu,
            time: TimeState::new(config.tick_rate),
            input: InputState::new(),
            renderer,
            batch,
            overlay,
            world,
        })
    }

    /// Returns `false` once Quit has been pressed.
    fn apply_input(&mut self) -> bool {
        apply_events(&mut self.world, self.input.drain_events())
    }

    fn rebuild_batch(&mut self) {
        self.batch.clear();
        for entity in self.world.entities() {
            let aabb = entity.aabb();
            self.batch
                .push_rect(aabb.x, aabb.y, aabb.w, aabb.h, entity_color(entity.kind()));
        }
    }

    fn render(&mut self) {
        self.rebuild_batch();
        self.renderer
            .upload(&self.gpu.device, &self.gpu.queue, &self.batch);

        let (egui_primitives, egui_textures_delta) =
            self.overlay.prepare(&self.window, &self.time);

        let Some((output, view)) = self.gpu.acquire_frame() else {
            return;
        };

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.size.0, self.gpu.size.1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.renderer.render(&mut encoder, &view, CLEAR_COLOR);

        self.overlay.upload(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &egui_primitives,
            &egui_textures_delta,
            &screen_descriptor,
        );

        {
            let mut egui_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();

            self.overlay
                .paint(&mut egui_pass, &egui_primitives, &screen_descriptor);
        }

        self.overlay.cleanup(&egui_textures_delta);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

struct App {
    config: GameConfig,
    world: World,
    state: Option<EngineState>,
    failed: bool,
}

impl App {
    fn new(config: GameConfig, world: World) -> Self {
        Self {
            config,
            world,
            state: None,
            failed: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: String) {
        log::error!("{err}");
        self.failed = true;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let platform = PlatformConfig {
            title: self.config.title.clone(),
            width: self.config.screen_width_px(),
            height: self.config.screen_height_px(),
        };
        let window = match hop_platform::window::create_window(event_loop, &platform) {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err),
        };
        log::info!("Window created: {}x{}", platform.width, platform.height);

        match EngineState::new(window, &self.config, self.world.clone()) {
            Ok(state) => self.state = Some(state),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            let deadline = state.time.next_frame_deadline();
            if Instant::now() >= deadline {
                state.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match self.state.as_mut() {
            Some(s) => s,
            None => return,
        };

        state.overlay.handle_window_event(&state.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!(
                    "Close requested after {} ticks, exiting.",
                    state.world.tick_count
                );
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                state.gpu.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        match event.state {
                            ElementState::Pressed => state.input.key_down(key),
                            ElementState::Released => state.input.key_up(key),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                state.time.begin_frame();

                if !state.apply_input() {
                    log::info!(
                        "Quit pressed after {} ticks, exiting.",
                        state.world.tick_count
                    );
                    event_loop.exit();
                    return;
                }

                while state.time.should_step() {
                    state.world.tick();
                }

                if state.gpu.size.0 == 0 || state.gpu.size.1 == 0 {
                    return;
                }
                state.render();
            }

            _ => {}
        }
    }
}

/// Feeds key events to the world in arrival order. Anything queued after a
/// Quit press is dropped.
fn apply_events(world: &mut World, events: Vec<InputEvent>) -> bool {
    for event in events {
        if event == InputEvent::Pressed(Key::Quit) {
            return false;
        }
        if let Some(command) = Command::from_input(event) {
            world.apply(command);
        }
    }
    true
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Key::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Key::Right),
        KeyCode::Space | KeyCode::ArrowUp | KeyCode::KeyW => Some(Key::Jump),
        KeyCode::Escape => Some(Key::Quit),
        _ => None,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Tile Hop starting...");

    let config = match load_config_or_default(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let world = match World::load(DEFAULT_LEVEL, &config) {
        Ok(world) => world,
        Err(err) => {
            log::error!("Failed to load level: {err}");
            std::process::exit(1);
        }
    };
    log::debug!(
        "Spawned {} platforms, {} enemies",
        world.count(EntityKind::Platform),
        world.count(EntityKind::Enemy)
    );

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, world);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        std::process::exit(1);
    }
    if app.failed {
        std::process::exit(1);
    }
}
