//! Opens a window and logs the input it receives each frame.
//!
//! Set `RUST_LOG=kestrel_input=debug,demo=debug` to see gamepad and focus
//! events. Press Escape or close the window to exit.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use kestrel_input::{Input, InputConfig, Key};
use kestrel_winit::WinitDevice;
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const READER_INTERVAL: Duration = Duration::from_millis(250);
#[cfg(debug_assertions)]
const DEADLOCK_CHECK_INTERVAL: Duration = Duration::from_secs(10);

struct App {
    window: Option<Arc<Window>>,
    device: Arc<WinitDevice>,
    input: Arc<Input>,
    frame: u64,
}

impl App {
    fn new(input: Arc<Input>) -> Self {
        Self {
            window: None,
            device: Arc::new(WinitDevice::new()),
            input,
            frame: 0,
        }
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop, window: &Window) {
        self.input.poll(&*self.device, window.scale_factor());
        self.frame += 1;

        let text = self.input.text();
        if !text.is_empty() {
            info!("Frame {}: typed {text:?}", self.frame);
        }
        let (wheel_x, wheel_y) = self.input.wheel();
        if wheel_x != 0.0 || wheel_y != 0.0 {
            info!("Frame {}: scrolled ({wheel_x}, {wheel_y})", self.frame);
        }
        let held: Vec<Key> = Key::ALL
            .iter()
            .copied()
            .filter(|&key| self.input.is_key_pressed(key))
            .collect();
        if !held.is_empty() {
            trace!(
                "Frame {}: holding {held:?} at {:?}",
                self.frame,
                self.input.cursor_position()
            );
        }

        let quit = self.input.is_key_pressed(Key::Escape);
        self.input.end_frame();
        if quit {
            info!("Escape pressed, exiting");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title("kestrel-input demo");
        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(err) => {
                error!("Failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.device.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Focused(focused) => debug!("Window focus changed: {focused}"),
            WindowEvent::RedrawRequested => {
                if let Some(window) = self.window.clone() {
                    self.run_frame(event_loop, &window);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + FRAME_INTERVAL));
    }
}

/// Reads the shared input from a second thread, the way game logic would.
fn spawn_reader(input: Arc<Input>, running: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while running.load(Ordering::Acquire) {
            let snapshot = input.snapshot();
            let gamepads: Vec<usize> = snapshot.gamepad_ids().collect();
            debug!(
                "Reader: cursor {:?}, modifiers {:?}, gamepads {gamepads:?}, touches {}",
                snapshot.cursor_position(),
                snapshot.modifiers(),
                snapshot.touches().len()
            );
            thread::sleep(READER_INTERVAL);
        }
    })
}

const DEFAULT_LOG_FILTER: &str = "error,kestrel_input=info,demo=info";

/// Parses `directives`, falling back to [`DEFAULT_LOG_FILTER`] when they are
/// missing or malformed.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(DEFAULT_LOG_FILTER).ok())
        .unwrap_or_else(|| EnvFilter::new("error"))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_thread_names(true)
        .with_env_filter(build_filter(directives.as_deref()))
        .try_init();
}

/// Watches the input locks for deadlocks in debug builds.
#[cfg(debug_assertions)]
fn spawn_deadlock_watchdog() {
    let spawned = thread::Builder::new()
        .name("deadlock-watchdog".to_owned())
        .spawn(|| {
            loop {
                thread::sleep(DEADLOCK_CHECK_INTERVAL);
                for (cycle, threads) in parking_lot::deadlock::check_deadlock().iter().enumerate() {
                    for thread in threads {
                        error!(
                            cycle,
                            thread_id = ?thread.thread_id(),
                            "Deadlock detected\n{:?}",
                            thread.backtrace()
                        );
                    }
                }
            }
        });
    if let Err(err) = spawned {
        warn!("Failed to start deadlock watchdog: {err}");
    }
}

#[cfg(not(debug_assertions))]
fn spawn_deadlock_watchdog() {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    spawn_deadlock_watchdog();

    let input = Arc::new(Input::with_config(InputConfig::default())?);
    let running = Arc::new(AtomicBool::new(true));
    let reader = spawn_reader(input.clone(), running.clone());

    let event_loop = EventLoop::new()?;
    let mut app = App::new(input);
    let result = event_loop.run_app(&mut app);

    running.store(false, Ordering::Release);
    if reader.join().is_err() {
        error!("Reader thread panicked");
    }
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn filter_uses_given_directives() {
        let filter = build_filter(Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn filter_falls_back_to_default() {
        for directives in [None, Some("demo=loudest")] {
            let filter = build_filter(directives);
            assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        }
    }
}
