use crate::app::app::App;
use crate::error::AppError;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub startup_error: Option<AppError>,
    settings: Option<Settings>, // handed to the App once the window exists
    runtime: Runtime,
}

impl AppHandler {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        Ok(Self {
            app: None,
            startup_error: None,
            settings: Some(settings),
            runtime: Runtime::new()?,
        })
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<App, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("Animated Text Display")
            .with_inner_size(winit::dpi::LogicalSize::new(1000.0, 860.0));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let settings = self.settings.take().unwrap_or_default();
        self.runtime.block_on(App::new(window, settings))
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.startup_error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(app) => {
                log::info!("Window ready");
                self.app = Some(app);
            }
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &mut self.app else {
            return;
        };

        match app.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                app.reconfigure_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        app.window.request_redraw();
    }
}
