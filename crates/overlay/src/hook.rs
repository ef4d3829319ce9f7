//! Global low-level pointer hook feeding the overlay scene

use crate::keys;
use crate::scene::PointerEvent;
use crate::window::{OverlayWindow, WM_OVERLAY_DIRTY};
use capture_gdi::Point;
use std::cell::Cell;
use tracing::{debug, warn};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, PostMessageW, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK,
    MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
};

thread_local! {
    // Low-level hook callbacks run on the installing thread and carry no user
    // data, so the owning overlay window is registered here.
    static HOOK_OWNER: Cell<isize> = const { Cell::new(0) };
}

/// Install the pointer hook on the current thread on behalf of `owner`
pub(crate) fn install(owner: HWND) -> windows::core::Result<HHOOK> {
    HOOK_OWNER.with(|h| h.set(owner.0 as isize));

    let hook = unsafe {
        let hmodule = GetModuleHandleW(None)?;
        SetWindowsHookExW(WH_MOUSE_LL, Some(pointer_hook_proc), HINSTANCE(hmodule.0), 0)
    };

    if hook.is_err() {
        HOOK_OWNER.with(|h| h.set(0));
    }
    hook
}

pub(crate) fn uninstall(hook: HHOOK) {
    HOOK_OWNER.with(|h| h.set(0));

    match unsafe { UnhookWindowsHookEx(hook) } {
        Ok(()) => debug!("pointer hook released"),
        Err(e) => warn!("failed to release pointer hook: {}", e),
    }
}

unsafe extern "system" fn pointer_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 {
        let info = &*(lparam.0 as *const MSLLHOOKSTRUCT);
        let at = Point::new(info.pt.x, info.pt.y);

        let event = match wparam.0 as u32 {
            WM_LBUTTONDOWN => Some(PointerEvent::ButtonDown(at)),
            WM_MOUSEMOVE => Some(PointerEvent::Move(at)),
            WM_LBUTTONUP => Some(PointerEvent::ButtonUp(at)),
            _ => None,
        };

        if let Some(event) = event {
            dispatch(event);
        }
    }

    // Pointer input is observed, never swallowed
    CallNextHookEx(None, code, wparam, lparam)
}

unsafe fn dispatch(event: PointerEvent) {
    let owner = HOOK_OWNER.with(Cell::get);
    if owner == 0 {
        return;
    }

    let hwnd = HWND(owner as *mut std::ffi::c_void);
    let Some(context) = OverlayWindow::context(hwnd) else {
        return;
    };

    let outcome = match context.scene.try_borrow_mut() {
        Ok(mut scene) => scene.handle(event, keys::modifier_held),
        Err(_) => {
            warn!(?event, "overlay scene busy, pointer event dropped");
            return;
        }
    };

    if let Some(rect) = outcome.committed {
        context.sink.commit(rect);
    }

    if outcome.redraw {
        let _ = PostMessageW(hwnd, WM_OVERLAY_DIRTY, WPARAM(0), LPARAM(0));
    }
}
