//! Fixed key bindings

/// Held to start a drag (VK_CONTROL)
pub const MODIFIER_KEY: u32 = 0x11;
/// Captures the committed region (VK_SPACE)
pub const CONFIRM_KEY: u32 = 0x20;
/// Tears everything down and exits (VK_ESCAPE)
pub const CANCEL_KEY: u32 = 0x1B;

/// What a key-down means to the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Capture,
    Exit,
    /// Not ours, hand it to the next hook untouched
    PassThrough,
}

impl KeyAction {
    pub fn from_key_down(vk_code: u32) -> Self {
        match vk_code {
            CONFIRM_KEY => KeyAction::Capture,
            CANCEL_KEY => KeyAction::Exit,
            _ => KeyAction::PassThrough,
        }
    }

    /// Whether the hook must swallow the event
    pub fn consumes(self) -> bool {
        !matches!(self, KeyAction::PassThrough)
    }
}

/// Live "is currently down" query, not the "was pressed" transition
#[cfg(windows)]
pub fn is_key_down(vk_code: u32) -> bool {
    use windows::Win32::UI::Input::KeyboardAndMouse::GetAsyncKeyState;

    let state = unsafe { GetAsyncKeyState(vk_code as i32) };
    (state as u16 & 0x8000) != 0
}

#[cfg(windows)]
pub fn modifier_held() -> bool {
    is_key_down(MODIFIER_KEY)
}
