//! GDI painting for the overlay

use crate::OverlayScene;
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreatePen, DeleteObject, EndPaint, FillRect, GetStockObject, Rectangle,
    SelectObject, BLACK_BRUSH, HBRUSH, HOLLOW_BRUSH, PAINTSTRUCT, PS_SOLID,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

const OUTLINE_THICKNESS: i32 = 3;
// Red (BGR)
const OUTLINE_COLOR: COLORREF = COLORREF(0x000000FF);

/// Paint the current scene: a faint full-screen tint plus one outline per
/// committed or in-progress rectangle
pub fn paint(hwnd: HWND, scene: &OverlayScene) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let mut client = RECT::default();
        let _ = GetClientRect(hwnd, &mut client);
        FillRect(hdc, &client, HBRUSH(GetStockObject(BLACK_BRUSH).0));

        let outlines = scene.outlines();
        if !outlines.is_empty() {
            let pen = CreatePen(PS_SOLID, OUTLINE_THICKNESS, OUTLINE_COLOR);
            let old_pen = SelectObject(hdc, pen);
            let old_brush = SelectObject(hdc, GetStockObject(HOLLOW_BRUSH));

            // The overlay sits at the screen origin, so screen and client
            // coordinates coincide
            for rect in outlines {
                let _ = Rectangle(hdc, rect.left, rect.top, rect.right, rect.bottom);
            }

            let _ = SelectObject(hdc, old_brush);
            let _ = SelectObject(hdc, old_pen);
            let _ = DeleteObject(pen);
        }

        let _ = EndPaint(hwnd, &ps);
    }
}
