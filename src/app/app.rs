use crate::animation::{AnimationRegistry, RandomSampler};
use crate::error::AppError;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::ui::{Ui, UiOutput};
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    ui: Ui,
    registry: AnimationRegistry,
    renderer: Renderer,
    egui_state: State,
    settings: Settings,
}

impl App {
    pub async fn new(window: Arc<Window>, settings: Settings) -> Result<Self, AppError> {
        let renderer = Renderer::new(&window).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let sampler = RandomSampler::from_entropy(settings.spawn.clone());
        let registry = AnimationRegistry::new(sampler, settings.registry.clone());

        Ok(Self {
            ui: Ui::new(&settings),
            window,
            registry,
            renderer,
            egui_state,
            settings,
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                // Escape quits unless the text field is using it
                if !egui_response.consumed
                    && event.logical_key
                        == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            _ => {}
        }

        EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        }
    }

    pub fn reconfigure_surface(&mut self) {
        self.renderer.reconfigure();
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();

        // Fire due removals before anything reads the entries
        let expired = self.registry.tick(now);
        if expired > 0 {
            log::debug!("{} animation(s) removed, {} active", expired, self.registry.len());
        }

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut ui_output = UiOutput::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            // egui may run more than one pass per frame
            let pass = self.ui.show(ctx, &self.registry, &mut self.settings, now);
            ui_output.merge(pass);
        });

        if ui_output.spawn_changed {
            self.registry
                .sampler_mut()
                .set_settings(self.settings.spawn.clone());
        }
        if ui_output.registry_changed {
            self.registry.set_settings(self.settings.registry.clone());
        }

        if let Some(text) = ui_output.submitted {
            if let Some(entry) = self.registry.submit(&text, self.ui.stage_width(), now) {
                log::info!(
                    "Submitted '{}' as animation {} ({}/{} active)",
                    entry.text,
                    entry.id,
                    self.registry.len(),
                    self.registry.capacity()
                );
            }
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.window.inner_size().width, self.window.inner_size().height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.renderer
            .render(paint_jobs, full_output.textures_delta, screen_descriptor)
    }
}
