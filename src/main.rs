use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod config;
mod error;
mod math;
mod params;
mod remote;
mod renderer;
mod scene;
mod ui;

use config::Config;
use error::PreviewError;
use math::FlatPattern;
use remote::{PatternEndpoint, PatternFetcher};
use renderer::{Camera, GpuGeometry, GpuState, Viewport};
use scene::{SceneState, on_parameters_changed};
use ui::{SceneStats, UiActions, UiState, apply_theme, draw_side_panel, draw_view_overlay};

struct App {
    config: Config,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    scene: Option<SceneState<GpuGeometry>>,
    fetcher: PatternFetcher,
    ui_state: UiState,

    last_vsync_state: bool,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,

    fatal: Option<PreviewError>,
}

impl App {
    fn new(config: Config, endpoint: PatternEndpoint) -> Self {
        let vsync = config.vsync();
        let ui_state = UiState::new(config.initial_inputs(), vsync);

        Self {
            config,

            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            scene: None,
            fetcher: PatternFetcher::new(endpoint),
            ui_state,

            last_vsync_state: vsync,
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,

            fatal: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> Result<(), PreviewError> {
        let mut gpu = pollster::block_on(GpuState::new(window.clone(), self.last_vsync_state))?;
        gpu.update_camera(&self.camera);

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let scene = SceneState::new(&mut gpu);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        self.scene = Some(scene);

        self.apply_parameters();
        Ok(())
    }

    /// Rebuilds the fold from the current field text and asks for a new pattern.
    fn apply_parameters(&mut self) {
        let (Some(gpu), Some(scene)) = (&mut self.gpu, &mut self.scene) else {
            return;
        };

        let params = on_parameters_changed(scene, gpu, &mut self.fetcher, &self.ui_state.inputs);
        self.ui_state.profile = FlatPattern::compute(&params);
    }

    fn update(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        while let Some(result) = self.fetcher.try_recv_result() {
            self.ui_state.pattern.receive(&self.egui_ctx, result);
        }
        self.ui_state.pattern.loading = self.fetcher.is_waiting();

        if let Some(scene) = &mut self.scene {
            scene.advance_frame();
            if let Some(gpu) = &self.gpu {
                gpu.update_model(scene.model_matrix());
            }
        }
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = self.scene.as_ref().map(|scene| SceneStats {
            fps: self.fps,
            vertices: scene.vertex_count(),
            triangles: scene.triangle_count(),
            rotation: scene.rotation(),
            frames: scene.frames(),
        });
        let last_error = self.fetcher.last_error();

        let mut ui_actions = UiActions::default();
        let mut scene_rect = egui::Rect::NOTHING;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &last_error);
            scene_rect = ctx.available_rect();

            if let (true, Some(stats)) = (self.ui_state.show_stats, &stats) {
                draw_view_overlay(ctx, stats);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("out of GPU memory");
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timed out");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let ppp = full_output.pixels_per_point;
        let viewport = Viewport::fit_square(
            scene_rect.min.x * ppp,
            scene_rect.min.y * ppp,
            scene_rect.width() * ppp,
            scene_rect.height() * ppp,
            gpu.config.width,
            gpu.config.height,
        );
        let geometry = self.scene.as_ref().and_then(|scene| scene.geometry());
        gpu.render_mesh(&view, &mut encoder, geometry, viewport);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.preview {
            self.apply_parameters();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Fold Preview")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let started = event_loop
            .create_window(window_attrs)
            .map_err(PreviewError::from)
            .and_then(|window| self.init_gpu(Arc::new(window)));

        if let Err(e) = started {
            error!("{e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.fetcher.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render(event_loop);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), PreviewError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let endpoint = config.pattern_endpoint()?;
    info!("pattern server {}", config.server);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, endpoint);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
