//! Global low-level keyboard hook

use crate::bindings::KeyBindings;
use overlay::KeyAction;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};
use windows::Win32::Foundation::{HINSTANCE, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, SetWindowsHookExW, TranslateMessage,
    UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT, MSG, WH_KEYBOARD_LL, WM_KEYDOWN,
};

struct Listener {
    hook: Cell<Option<HHOOK>>,
    bindings: KeyBindings,
}

impl Listener {
    fn handle(&self, action: KeyAction) {
        self.bindings.dispatch(action, || self.release());
    }

    fn release(&self) {
        let Some(hook) = self.hook.take() else {
            return;
        };

        match unsafe { UnhookWindowsHookEx(hook) } {
            Ok(()) => debug!("keyboard hook released"),
            Err(e) => warn!("failed to release keyboard hook: {}", e),
        }
    }
}

thread_local! {
    // Hook callbacks run on the installing thread and carry no user data
    static LISTENER: RefCell<Option<Rc<Listener>>> = const { RefCell::new(None) };
}

/// Keyboard hook bound to the current thread, which must then run [`KeyboardListener::run`]
pub struct KeyboardListener {
    listener: Rc<Listener>,
}

impl KeyboardListener {
    pub fn install(bindings: KeyBindings) -> windows::core::Result<Self> {
        let listener = Rc::new(Listener {
            hook: Cell::new(None),
            bindings,
        });
        LISTENER.with(|l| *l.borrow_mut() = Some(listener.clone()));

        let hook = unsafe {
            GetModuleHandleW(None).and_then(|hmodule| {
                SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), HINSTANCE(hmodule.0), 0)
            })
        };

        match hook {
            Ok(hook) => {
                listener.hook.set(Some(hook));
                Ok(Self { listener })
            }
            Err(e) => {
                LISTENER.with(|l| *l.borrow_mut() = None);
                Err(e)
            }
        }
    }

    /// Pump this thread's messages until WM_QUIT; hook callbacks are delivered here
    pub fn run(&self) {
        unsafe {
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    pub fn uninstall(&self) {
        self.listener.release();
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.listener.release();
        LISTENER.with(|l| *l.borrow_mut() = None);
    }
}

unsafe extern "system" fn keyboard_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code >= 0 && wparam.0 as u32 == WM_KEYDOWN {
        let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
        let action = KeyAction::from_key_down(info.vkCode);

        if action.consumes() {
            let listener = LISTENER.with(|l| l.borrow().clone());
            if let Some(listener) = listener {
                listener.handle(action);
                // Bound keys never reach the rest of the system
                return LRESULT(1);
            }
        }
    }

    // Everything else goes down the chain untouched, result returned verbatim
    CallNextHookEx(None, code, wparam, lparam)
}
