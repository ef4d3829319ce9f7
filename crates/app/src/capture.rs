//! Region capture: grab, encode, persist

use crate::controller::{Controller, Reservation};
use capture_gdi::{CaptureError, FrameGrabber};
use crossbeam_channel::Receiver;
use export::{capture_file_name, CaptureStore, ExportError, FrameEncoder};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("no capture region selected")]
    NoRegionSelected,

    #[error("failed to capture screenshot: {0}")]
    CaptureFailed(#[source] CaptureError),

    #[error("failed to encode image: {0}")]
    EncodeFailed(#[source] ExportError),

    #[error("failed to write file: {0}")]
    IoFailed(#[source] ExportError),
}

pub type SnapResult<T> = Result<T, SnapError>;

/// Turns the committed region into the next numbered capture file
pub struct CaptureCoordinator<G, E, S> {
    controller: Arc<Controller>,
    grabber: G,
    encoder: E,
    store: S,
}

impl<G, E, S> CaptureCoordinator<G, E, S>
where
    G: FrameGrabber,
    E: FrameEncoder,
    S: CaptureStore,
{
    pub fn new(controller: Arc<Controller>, grabber: G, encoder: E, store: S) -> Self {
        Self {
            controller,
            grabber,
            encoder,
            store,
        }
    }

    /// Capture the committed region. A failed capture gives its number back.
    pub fn capture(&self) -> SnapResult<PathBuf> {
        // Lock released here, before any I/O
        let reservation = self
            .controller
            .reserve()
            .ok_or(SnapError::NoRegionSelected)?;

        match self.save(reservation) {
            Ok(path) => {
                debug!(region = %reservation.region, path = %path.display(), "capture saved");
                Ok(path)
            }
            Err(e) => {
                self.controller.release(reservation);
                Err(e)
            }
        }
    }

    fn save(&self, reservation: Reservation) -> SnapResult<PathBuf> {
        let frame = self
            .grabber
            .grab(reservation.region)
            .map_err(SnapError::CaptureFailed)?;

        let image = frame.to_rgba_image().map_err(SnapError::CaptureFailed)?;
        let bytes = self
            .encoder
            .encode(&image)
            .map_err(SnapError::EncodeFailed)?;

        let file_name = capture_file_name(reservation.index, self.encoder.extension());
        self.store
            .write(&file_name, &bytes)
            .map_err(SnapError::IoFailed)
    }

    /// Capture and report the outcome on the console
    pub fn trigger(&self) {
        let console = self.controller.console();
        match self.capture() {
            Ok(path) => console.saved(&path),
            Err(e) => {
                debug!("capture failed: {}", e);
                console.failed(&e);
            }
        }
    }
}

/// Capture worker commands
pub enum CaptureCommand {
    Capture,
    Shutdown,
}

/// Run captures one after another until `Shutdown` or the sender goes away
pub fn capture_worker<G, E, S>(
    coordinator: CaptureCoordinator<G, E, S>,
    cmd_rx: Receiver<CaptureCommand>,
) where
    G: FrameGrabber,
    E: FrameEncoder,
    S: CaptureStore,
{
    for command in cmd_rx {
        match command {
            CaptureCommand::Capture => coordinator.trigger(),
            CaptureCommand::Shutdown => break,
        }
    }
    debug!("capture worker stopped");
}
