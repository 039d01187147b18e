use anyhow::Context;

pub use app::{App, WindowConfig};
pub use demo::{Demo, Shape};
pub use logging::init_logging;

pub mod input;
pub mod math;
pub mod mesh;
pub mod state;

mod app;
mod demo;
mod graphics;
mod logging;

/// Sets up logging, opens the demo's window and runs it until closed.
pub fn run(demo: Demo) -> anyhow::Result<()> {
    init_logging()?;

    let app = App::new(demo).context("Failed to create App")?;

    app.run()
}
