//! Overlay window implementation

use crate::{hook, render, OverlayError, OverlayResult, OverlayScene, RegionSink};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    GetSystemMetrics, GetWindowLongPtrW, PostMessageW, PostQuitMessage, RegisterClassExW,
    SetLayeredWindowAttributes, SetWindowLongPtrW, ShowWindow, TranslateMessage, CREATESTRUCTW,
    CS_HREDRAW, CS_VREDRAW, GWLP_USERDATA, HHOOK, HTTRANSPARENT, LWA_ALPHA, MSG, SM_CXSCREEN,
    SM_CYSCREEN, SW_SHOWNOACTIVATE, WM_APP, WM_CLOSE, WM_DESTROY, WM_ERASEBKGND, WM_NCCREATE,
    WM_NCDESTROY, WM_NCHITTEST, WM_PAINT, WNDCLASSEXW, WS_EX_LAYERED, WS_EX_NOACTIVATE,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};

/// Posted by the pointer hook whenever the scene changed
pub(crate) const WM_OVERLAY_DIRTY: u32 = WM_APP + 1;

/// Layer opacity, roughly 12%
const OVERLAY_ALPHA: u8 = 30;
const CLOSE_TIMEOUT: Duration = Duration::from_millis(500);

/// Per-window state, owned by the overlay thread and reachable via `GWLP_USERDATA`
pub(crate) struct OverlayContext {
    pub(crate) scene: RefCell<OverlayScene>,
    pub(crate) sink: Arc<dyn RegionSink>,
    pointer_hook: Cell<Option<HHOOK>>,
}

impl OverlayContext {
    fn new(sink: Arc<dyn RegionSink>) -> Self {
        Self {
            scene: RefCell::new(OverlayScene::new()),
            sink,
            pointer_hook: Cell::new(None),
        }
    }

    fn release_pointer_hook(&self) {
        if let Some(hook) = self.pointer_hook.take() {
            hook::uninstall(hook);
        }
    }
}

/// Handle to the running overlay, usable from any thread
#[derive(Debug)]
pub struct OverlayHandle {
    // Stored as isize for thread safety
    hwnd: isize,
    closed: Receiver<()>,
}

impl OverlayHandle {
    /// Ask the overlay to release its pointer hook and stop, waiting briefly for
    /// it to finish. Returns whether the overlay confirmed.
    pub fn close(&self) -> bool {
        let hwnd = HWND(self.hwnd as *mut c_void);
        if let Err(e) = unsafe { PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) } {
            warn!("failed to post close to overlay: {}", e);
            return false;
        }

        match self.closed.recv_timeout(CLOSE_TIMEOUT) {
            Ok(()) => true,
            Err(e) => {
                warn!("overlay did not confirm close: {}", e);
                false
            }
        }
    }
}

/// Full-screen, topmost, translucent, click-through selection overlay
pub struct OverlayWindow;

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("RegionSnapOverlay");

    /// Start the overlay on its own thread. Returns once the window exists and
    /// the pointer hook is installed, or with the error that prevented it.
    pub fn spawn(sink: Arc<dyn RegionSink>) -> OverlayResult<OverlayHandle> {
        let (ready_tx, ready_rx) = bounded(1);
        let (closed_tx, closed_rx) = bounded(1);

        thread::Builder::new()
            .name("overlay".into())
            .spawn(move || Self::run(sink, ready_tx, closed_tx))?;

        let hwnd = ready_rx.recv().map_err(|_| {
            OverlayError::Startup("overlay thread exited before reporting".into())
        })??;

        info!("overlay ready");
        Ok(OverlayHandle {
            hwnd,
            closed: closed_rx,
        })
    }

    fn run(
        sink: Arc<dyn RegionSink>,
        ready_tx: Sender<OverlayResult<isize>>,
        closed_tx: Sender<()>,
    ) {
        let context = Box::into_raw(Box::new(OverlayContext::new(sink)));

        unsafe {
            let hwnd = match Self::create(context) {
                Ok(hwnd) => hwnd,
                Err(e) => {
                    drop(Box::from_raw(context));
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            // The hook must live on this thread: its callbacks are delivered
            // through this thread's message loop.
            match hook::install(hwnd) {
                Ok(hook) => (*context).pointer_hook.set(Some(hook)),
                Err(e) => {
                    let _ = DestroyWindow(hwnd);
                    drop(Box::from_raw(context));
                    let _ = ready_tx.send(Err(e.into()));
                    return;
                }
            }

            let _ = ready_tx.send(Ok(hwnd.0 as isize));

            // Message loop
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }

            // WM_NCDESTROY has detached the context from the window by now
            (*context).release_pointer_hook();
            drop(Box::from_raw(context));
        }

        debug!("overlay loop finished");
        let _ = closed_tx.send(());
    }

    unsafe fn create(context: *const OverlayContext) -> OverlayResult<HWND> {
        let hmodule = GetModuleHandleW(None)?;
        let hinstance = HINSTANCE(hmodule.0);

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(Self::wnd_proc),
            hInstance: hinstance,
            lpszClassName: Self::CLASS_NAME,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            return Err(windows::core::Error::from_win32().into());
        }

        // Primary screen only; its origin is the screen origin
        let width = GetSystemMetrics(SM_CXSCREEN);
        let height = GetSystemMetrics(SM_CYSCREEN);

        let hwnd = CreateWindowExW(
            WS_EX_TOPMOST | WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_TRANSPARENT | WS_EX_NOACTIVATE,
            Self::CLASS_NAME,
            w!("RegionSnap Selection"),
            WS_POPUP,
            0,
            0,
            width,
            height,
            None,
            None,
            hinstance,
            Some(context as *const c_void),
        )?;

        if let Err(e) = SetLayeredWindowAttributes(hwnd, COLORREF(0), OVERLAY_ALPHA, LWA_ALPHA) {
            let _ = DestroyWindow(hwnd);
            return Err(e.into());
        }

        let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        let _ = UpdateWindow(hwnd);

        debug!(width, height, "overlay window created");
        Ok(hwnd)
    }

    /// Context attached to an overlay window, if it is still alive
    pub(crate) unsafe fn context<'a>(hwnd: HWND) -> Option<&'a OverlayContext> {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const OverlayContext;
        ptr.as_ref()
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_NCCREATE => {
                let create = &*(lparam.0 as *const CREATESTRUCTW);
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }

            WM_NCHITTEST => LRESULT(HTTRANSPARENT as isize),

            WM_OVERLAY_DIRTY => {
                let _ = InvalidateRect(hwnd, None, false);
                LRESULT(0)
            }

            // Painting clears the whole client area itself
            WM_ERASEBKGND => LRESULT(1),

            WM_PAINT => {
                let painted = Self::context(hwnd)
                    .and_then(|context| context.scene.try_borrow().ok())
                    .map(|scene| render::paint(hwnd, &scene))
                    .is_some();

                if painted {
                    LRESULT(0)
                } else {
                    DefWindowProcW(hwnd, msg, wparam, lparam)
                }
            }

            WM_CLOSE => {
                if let Some(context) = Self::context(hwnd) {
                    context.release_pointer_hook();
                }
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }

            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }

            WM_NCDESTROY => {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
