use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use anyhow::Context;
use log::{debug, error, info};
use parking_lot::RwLock;

use crate::math::Transform;

/// The model transform shared by the render loop, the keyboard handler and the spinner.
#[derive(Clone, Default)]
pub struct SharedTransform(Arc<RwLock<Transform>>);

impl SharedTransform {
    pub fn new(transform: Transform) -> Self {
        SharedTransform(Arc::new(RwLock::new(transform)))
    }

    pub fn snapshot(&self) -> Transform {
        *self.0.read()
    }

    pub fn rotate(&self, deg_z: f32, deg_x: f32, deg_y: f32) {
        self.0.write().rotate(deg_z, deg_x, deg_y);
    }
}

/// A fixed rotation applied at a fixed rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub ticks_per_second: u32,
    pub deg_z: f32,
    pub deg_x: f32,
    pub deg_y: f32,
}

impl Spin {
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

/// Background timer composing a [`Spin`] into a [`SharedTransform`].
///
/// The thread stops when the spinner is stopped or dropped.
pub struct Spinner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl Spinner {
    pub fn start(transform: SharedTransform, spin: Spin) -> anyhow::Result<Self> {
        let (stop, stopped) = mpsc::channel::<()>();
        let period = spin.period();

        let handle = thread::Builder::new()
            .name("spinner".to_string())
            .spawn(move || {
                let mut ticks = 0u64;
                let mut deadline = Instant::now() + period;
                loop {
                    let timeout = deadline.saturating_duration_since(Instant::now());
                    match stopped.recv_timeout(timeout) {
                        Err(RecvTimeoutError::Timeout) => {
                            transform.rotate(spin.deg_z, spin.deg_x, spin.deg_y);
                            ticks += 1;
                            deadline += period;
                            // Missed ticks are dropped rather than replayed.
                            let now = Instant::now();
                            if deadline < now {
                                deadline = now + period;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                ticks
            })
            .context("spawning spinner thread")?;

        info!("Spinning {spin:?} every {period:?}");

        Ok(Spinner {
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    /// Stops the timer and returns the number of ticks it applied.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        // Dropping the sender wakes the thread.
        self.stop.take();
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => {
                debug!("Spinner stopped after {ticks} ticks");
                ticks
            }
            Some(Err(_)) => {
                error!("Spinner thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.shutdown();
    }
}
