//! Screen region grab using GDI

use crate::{CaptureError, CaptureResult, FrameData, FrameGrabber, Rect};
use tracing::debug;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC,
    GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
    SRCCOPY,
};

/// Grabs screen pixels through the desktop device context
#[derive(Debug, Default, Clone, Copy)]
pub struct GdiGrabber;

impl GdiGrabber {
    pub fn new() -> Self {
        Self
    }
}

impl FrameGrabber for GdiGrabber {
    fn grab(&self, rect: Rect) -> CaptureResult<FrameData> {
        if rect.is_empty() {
            return Err(CaptureError::EmptyRegion);
        }

        let width = rect.width() as i32;
        let height = rect.height() as i32;

        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(CaptureError::Gdi("Failed to get screen DC".into()));
            }

            let mem_dc = CreateCompatibleDC(screen_dc);
            let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
            let old_bitmap = SelectObject(mem_dc, bitmap);

            // Without CAPTUREBLT layered windows (the overlay included) are left out
            let blit = BitBlt(
                mem_dc, 0, 0, width, height, screen_dc, rect.left, rect.top, SRCCOPY,
            );

            let mut bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // Top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                bmiColors: [Default::default()],
            };

            let mut data = vec![0u8; width as usize * height as usize * 4];
            let lines = if blit.is_ok() {
                // The bitmap must not be selected into a DC while its bits are read
                SelectObject(mem_dc, old_bitmap);
                GetDIBits(
                    mem_dc,
                    bitmap,
                    0,
                    height as u32,
                    Some(data.as_mut_ptr() as *mut _),
                    &mut bmi,
                    DIB_RGB_COLORS,
                )
            } else {
                SelectObject(mem_dc, old_bitmap);
                0
            };

            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);
            ReleaseDC(None, screen_dc);

            blit?;
            if lines != height {
                return Err(CaptureError::Gdi(format!(
                    "GetDIBits copied {} of {} lines",
                    lines, height
                )));
            }

            debug!(%rect, "grabbed {}x{} frame", width, height);
            FrameData::from_bgra(data, width as u32, height as u32)
        }
    }
}
