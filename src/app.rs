use std::sync::Arc;

use anyhow::Context;
use log::info;
use vulkano::swapchain::Surface;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::PhysicalKey,
    window::{Window, WindowBuilder},
};

#[cfg(feature = "tracing")]
use tracing_tracy::client::frame_mark;

use crate::{
    graphics::Renderer,
    input::{KeyAction, KeyBindings},
    math::Transform,
    state::{SharedTransform, Spin, Spinner},
    Demo,
};

#[derive(Clone, Copy, Debug)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 500,
            height: 500,
            resizable: false,
        }
    }
}

pub struct App {
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    renderer: Renderer,
    transform: SharedTransform,
    bindings: KeyBindings,
    spin: Option<Spin>,
}

impl App {
    pub fn new(demo: Demo) -> anyhow::Result<Self> {
        App::with_config(demo, WindowConfig::default())
    }

    pub fn with_config(demo: Demo, config: WindowConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Creating EventLoop")?;
        let required_extensions = Surface::required_extensions(&event_loop);

        let window = Arc::new(
            WindowBuilder::new()
                .with_title(demo.title)
                .with_inner_size(PhysicalSize::new(config.width, config.height))
                .with_resizable(config.resizable)
                .build(&event_loop)
                .context("Creating Window")?,
        );

        let mesh = demo.build_mesh().context("Building mesh")?;

        let renderer = Renderer::new(
            required_extensions,
            window.clone(),
            &mesh,
            demo.cull_back_faces,
        )?;

        info!("Initialized {}", demo.title);

        Ok(App {
            event_loop,
            window,
            renderer,
            transform: SharedTransform::new(Transform::IDENTITY),
            bindings: demo.bindings,
            spin: demo.spin,
        })
    }

    /// Runs until the window closes. GPU work stays on the calling thread.
    pub fn run(self) -> anyhow::Result<()> {
        let App {
            event_loop,
            window,
            mut renderer,
            transform,
            bindings,
            spin,
        } = self;

        let spinner = spin
            .map(|spin| Spinner::start(transform.clone(), spin))
            .transpose()?;

        let mut failure = None;

        event_loop
            .run(|event, elwt: &EventLoopWindowTarget<()>| {
                elwt.set_control_flow(ControlFlow::Poll);
                match event {
                    Event::WindowEvent {
                        event: WindowEvent::CloseRequested,
                        ..
                    } => {
                        elwt.exit();
                    }
                    Event::WindowEvent {
                        event: WindowEvent::Resized(new_size),
                        ..
                    } => {
                        renderer.resized(new_size);
                    }
                    Event::WindowEvent {
                        event: WindowEvent::KeyboardInput { event, .. },
                        ..
                    } => {
                        if let PhysicalKey::Code(key) = event.physical_key {
                            bindings.apply(key, KeyAction::from(&event), &transform);
                        }
                    }
                    Event::WindowEvent {
                        event: WindowEvent::RedrawRequested,
                        ..
                    } => {
                        if let Err(e) = renderer.draw(transform.snapshot()) {
                            failure = Some(e);
                            elwt.exit();
                        }

                        #[cfg(feature = "tracing")]
                        frame_mark();
                    }
                    Event::AboutToWait => {
                        window.request_redraw();
                    }
                    _ => (),
                }
            })
            .context("Processing EventLoop")?;

        if let Some(spinner) = spinner {
            spinner.stop();
        }
        info!("fin");

        match failure {
            Some(e) => Err(e.context("Rendering frame")),
            None => Ok(()),
        }
    }
}
