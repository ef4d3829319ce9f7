//! RegionSnap - Ctrl+drag a screen region, press Space to save it as PNG

#![cfg_attr(not(windows), allow(dead_code))]

mod bindings;
mod capture;
mod console;
mod controller;
#[cfg(windows)]
mod input;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; the tool takes no environment configuration
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run()
}

#[cfg(windows)]
mod runtime {
    use crate::capture::{capture_worker, CaptureCommand, CaptureCoordinator};
    use crate::console::{Console, StdoutConsole};
    use crate::controller::Controller;
    use crate::bindings::KeyBindings;
    use crate::input::KeyboardListener;
    use capture_gdi::GdiGrabber;
    use crossbeam_channel::unbounded;
    use export::{DirectoryStore, PngEncoder};
    use overlay::OverlayWindow;
    use std::sync::Arc;
    use std::thread;
    use tracing::info;
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };

    pub fn run() -> anyhow::Result<()> {
        // Hook coordinates and window coordinates must both be physical pixels
        unsafe {
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }

        let console: Arc<dyn Console> = Arc::new(StdoutConsole);
        console.banner();

        let controller = Arc::new(Controller::new(console.clone()));
        let coordinator = CaptureCoordinator::new(
            controller.clone(),
            GdiGrabber::new(),
            PngEncoder::new(),
            DirectoryStore::current_dir()?,
        );

        // The overlay comes first so any drag can be shown
        let overlay = Arc::new(OverlayWindow::spawn(controller.clone())?);

        let (cmd_tx, cmd_rx) = unbounded();
        let capture_handle = thread::Builder::new()
            .name("capture".into())
            .spawn(move || capture_worker(coordinator, cmd_rx))?;

        let bindings = KeyBindings {
            on_capture: Box::new({
                let cmd_tx = cmd_tx.clone();
                move || {
                    let _ = cmd_tx.send(CaptureCommand::Capture);
                }
            }),
            on_cancel: Box::new({
                let console = console.clone();
                move || console.exiting()
            }),
            on_exit: Box::new({
                let overlay = overlay.clone();
                move || {
                    overlay.close();
                    std::process::exit(0);
                }
            }),
        };

        let listener = match KeyboardListener::install(bindings) {
            Ok(listener) => listener,
            Err(e) => {
                overlay.close();
                return Err(e.into());
            }
        };
        info!("keyboard hook installed");
        console.ready();

        listener.run();

        // Only reached if the loop is ended by WM_QUIT rather than the cancel key
        listener.uninstall();
        overlay.close();
        let _ = cmd_tx.send(CaptureCommand::Shutdown);
        let _ = capture_handle.join();

        Ok(())
    }
}

#[cfg(windows)]
use runtime::run;

#[cfg(not(windows))]
fn run() -> anyhow::Result<()> {
    anyhow::bail!("regionsnap relies on Win32 global input hooks and only runs on Windows")
}
