use anyhow::Context;
use winit::event_loop::{ControlFlow, EventLoop};

mod animation;
mod app;
mod error;
mod input;
mod renderer;
mod settings;
mod stage;
mod ui;

pub const CONFY_APP_NAME: &str = "flytext-rs";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = settings::Settings::load();

    let event_loop = EventLoop::new().map_err(error::AppError::from)?;
    // Poll so due removals fire within a frame
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::AppHandler::new(settings)?;

    event_loop
        .run_app(&mut handler)
        .context("event loop terminated abnormally")?;

    if let Some(e) = handler.startup_error.take() {
        return Err(e.into());
    }

    Ok(())
}
