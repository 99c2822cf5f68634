//! GDI rendering of the chrome and the elevation list.
//!
//! Everything is drawn into a memory bitmap and blitted once, so resizing
//! does not flicker.

use elevator_core::config::{Color, ThemeConfig};
use elevator_core::{ChromeLayout, ChromeRegion, ChromeVisuals, Control, ElevationList, Rect, WindowState};
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreatePen, CreateSolidBrush,
    DEFAULT_GUI_FONT, DT_CENTER, DT_END_ELLIPSIS, DT_LEFT, DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER,
    DeleteDC, DeleteObject, DRAW_TEXT_FORMAT, DrawTextW, EndPaint, FillRect, GetStockObject, HDC,
    HGDIOBJ, LineTo, MoveToEx, NULL_BRUSH, PAINTSTRUCT, PS_SOLID, RoundRect, SRCCOPY, SelectObject,
    SetBkMode, SetTextColor, TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

const TEXT_INSET: i32 = 8;
const BORDER_RADIUS: i32 = 8;
const PLACEHOLDER: &str = "Drop programs here or press Add...";

/// Theme colors resolved once per config load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: COLORREF,
    pub header: COLORREF,
    pub text: COLORREF,
    pub muted: COLORREF,
    pub accent: COLORREF,
    pub border: COLORREF,
    pub selection: COLORREF,
    pub close_hover: COLORREF,
}

impl Palette {
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let resolve = |value: &str, fallback: &str| {
            let color = Color::from_hex(value)
                .or_else(|| Color::from_hex(fallback))
                .unwrap_or(Color { r: 0, g: 0, b: 0 });
            COLORREF(color.to_colorref())
        };
        Self {
            background: resolve(&theme.background, &defaults.background),
            header: resolve(&theme.header, &defaults.header),
            text: resolve(&theme.text, &defaults.text),
            muted: resolve(&theme.muted, &defaults.muted),
            accent: resolve(&theme.accent, &defaults.accent),
            border: resolve(&theme.border, &defaults.border),
            selection: resolve(&theme.selection, &defaults.selection),
            close_hover: resolve(&theme.close_hover, &defaults.close_hover),
        }
    }
}

/// Everything a paint pass reads.
pub struct Scene<'a> {
    pub title: &'a str,
    pub layout: ChromeLayout,
    pub palette: Palette,
    pub visuals: ChromeVisuals,
    pub state: WindowState,
    pub list: &'a ElevationList,
    pub hover: Option<ChromeRegion>,
}

/// Handles `WM_PAINT`.
pub fn paint(hwnd: HWND, scene: &Scene) {
    let mut ps = PAINTSTRUCT::default();
    let mut client = RECT::default();
    // SAFETY: BeginPaint/EndPaint bracket all drawing on this HWND; every
    // GDI object created here is selected out and deleted before return.
    unsafe {
        let hdc = BeginPaint(hwnd, &mut ps);
        if GetClientRect(hwnd, &mut client).is_ok() {
            let width = client.right - client.left;
            let height = client.bottom - client.top;
            if width > 0 && height > 0 {
                let mem_dc = CreateCompatibleDC(Some(hdc));
                let bitmap = CreateCompatibleBitmap(hdc, width, height);
                let old_bitmap = SelectObject(mem_dc, bitmap.into());
                let old_font = SelectObject(mem_dc, GetStockObject(DEFAULT_GUI_FONT));

                let mut ctx = DrawCtx {
                    dc: mem_dc,
                    width,
                    height,
                };
                ctx.draw(scene);

                let _ = BitBlt(hdc, 0, 0, width, height, Some(mem_dc), 0, 0, SRCCOPY);

                SelectObject(mem_dc, old_font);
                SelectObject(mem_dc, old_bitmap);
                let _ = DeleteObject(bitmap.into());
                let _ = DeleteDC(mem_dc);
            }
        }
        let _ = EndPaint(hwnd, &ps);
    }
}

struct DrawCtx {
    dc: HDC,
    width: i32,
    height: i32,
}

impl DrawCtx {
    fn draw(&mut self, scene: &Scene) {
        let layout = &scene.layout;
        let palette = &scene.palette;
        let (w, h) = (self.width, self.height);

        self.fill(Rect::new(0, 0, w, h), palette.background);

        let header = layout.header_rect(w);
        self.fill(header, palette.header);
        let title = Rect::new(
            header.x + TEXT_INSET,
            header.y,
            (layout.minimize_rect(w).x - TEXT_INSET * 2).max(0),
            header.height,
        );
        self.text(title, scene.title, palette.text, DT_LEFT);

        self.caption_buttons(scene);
        self.list(scene);

        let label = layout.path_label_rect(w, h);
        self.text(label, &scene.list.selected_label(), palette.muted, DT_LEFT);

        for control in Control::ALL {
            let rect = layout.control_rect(control, h);
            if scene.hover == Some(ChromeRegion::Control(control)) {
                self.fill(rect, palette.selection);
            }
            self.outline(rect, palette.border, 4);
            self.text(rect, control.label(), palette.text, DT_CENTER);
        }

        if scene.visuals.resize_grip {
            self.grip(layout.grip_rect(w, h), palette.muted);
        }

        let frame = if scene.visuals.focus_ring {
            palette.accent
        } else {
            palette.border
        };
        if scene.visuals.round_border {
            self.outline(Rect::new(0, 0, w, h), frame, BORDER_RADIUS);
        } else if scene.visuals.focus_ring {
            self.line(0, header.bottom() - 1, w, header.bottom() - 1, palette.accent);
        }
    }

    fn caption_buttons(&mut self, scene: &Scene) {
        let layout = &scene.layout;
        let palette = &scene.palette;
        let w = self.width;

        let buttons = [
            (ChromeRegion::Minimize, layout.minimize_rect(w)),
            (ChromeRegion::MaximizeRestore, layout.maximize_rect(w)),
            (ChromeRegion::Close, layout.close_rect(w)),
        ];
        for (region, rect) in buttons {
            if scene.hover == Some(region) {
                let fill = if region == ChromeRegion::Close {
                    palette.close_hover
                } else {
                    palette.selection
                };
                self.fill(rect, fill);
            }

            let cx = rect.x + rect.width / 2;
            let cy = rect.y + rect.height / 2;
            match region {
                ChromeRegion::Minimize => self.line(cx - 5, cy, cx + 5, cy, palette.text),
                ChromeRegion::MaximizeRestore if scene.state == WindowState::Maximized => {
                    self.outline(Rect::new(cx - 3, cy - 5, 8, 8), palette.text, 0);
                    self.fill(Rect::new(cx - 5, cy - 3, 8, 8), palette.header);
                    self.outline(Rect::new(cx - 5, cy - 3, 8, 8), palette.text, 0);
                }
                ChromeRegion::MaximizeRestore => {
                    self.outline(Rect::new(cx - 5, cy - 5, 10, 10), palette.text, 0);
                }
                _ => {
                    self.line(cx - 5, cy - 5, cx + 5, cy + 5, palette.text);
                    self.line(cx + 5, cy - 5, cx - 5, cy + 5, palette.text);
                }
            }
        }
    }

    fn list(&mut self, scene: &Scene) {
        let layout = &scene.layout;
        let palette = &scene.palette;
        let (w, h) = (self.width, self.height);

        let area = layout.list_rect(w, h);
        self.outline(area, palette.border, 0);

        if scene.list.is_empty() {
            self.text(area, PLACEHOLDER, palette.muted, DT_CENTER);
            return;
        }

        let rows = scene.list.visible_range(layout.visible_rows(w, h));
        let first = rows.start;
        for (index, entry) in scene.list.entries()[rows.clone()].iter().enumerate() {
            let index = first + index;
            let row = layout.row_rect(index, first, w, h);
            if scene.list.is_selected(index) {
                self.fill(row, palette.selection);
                self.fill(Rect::new(row.x, row.y, 3, row.height), palette.accent);
            } else if scene.hover == Some(ChromeRegion::ListRow(index)) {
                self.outline(row, palette.selection, 0);
            }
            let text = Rect::new(row.x + TEXT_INSET, row.y, row.width - TEXT_INSET * 2, row.height);
            self.text(text, &entry.display_name, palette.text, DT_LEFT);
        }

        if let Some(thumb) = layout.scroll_thumb(w, h, rows, scene.list.len()) {
            self.fill(thumb, palette.muted);
        }
    }

    /// Three diagonal rows of dots in the bottom-right corner.
    fn grip(&mut self, area: Rect, color: COLORREF) {
        let step = area.width / 4;
        for row in 1..=3 {
            for col in (4 - row)..=3 {
                let x = area.x + col * step;
                let y = area.y + row * step;
                self.fill(Rect::new(x - 1, y - 1, 2, 2), color);
            }
        }
    }

    fn fill(&mut self, rect: Rect, color: COLORREF) {
        if rect.is_empty() {
            return;
        }
        let r = to_win32(rect);
        // SAFETY: the brush is deleted right after use.
        unsafe {
            let brush = CreateSolidBrush(color);
            FillRect(self.dc, &r, brush);
            let _ = DeleteObject(brush.into());
        }
    }

    /// One-pixel outline, rounded by `radius`.
    fn outline(&mut self, rect: Rect, color: COLORREF, radius: i32) {
        if rect.is_empty() {
            return;
        }
        // SAFETY: pen and brush are restored and the pen deleted.
        unsafe {
            let pen = CreatePen(PS_SOLID, 1, color);
            let old_pen = SelectObject(self.dc, pen.into());
            let old_brush = SelectObject(self.dc, GetStockObject(NULL_BRUSH));
            let _ = RoundRect(
                self.dc,
                rect.x,
                rect.y,
                rect.right(),
                rect.bottom(),
                radius * 2,
                radius * 2,
            );
            SelectObject(self.dc, old_brush);
            SelectObject(self.dc, old_pen);
            let _ = DeleteObject(pen.into());
        }
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: COLORREF) {
        // SAFETY: the pen is restored and deleted.
        unsafe {
            let pen = CreatePen(PS_SOLID, 1, color);
            let old: HGDIOBJ = SelectObject(self.dc, pen.into());
            let _ = MoveToEx(self.dc, x0, y0, None);
            let _ = LineTo(self.dc, x1, y1);
            SelectObject(self.dc, old);
            let _ = DeleteObject(pen.into());
        }
    }

    /// Single-line text, vertically centered and ellipsized.
    fn text(&mut self, rect: Rect, text: &str, color: COLORREF, align: DRAW_TEXT_FORMAT) {
        if text.is_empty() || rect.is_empty() {
            return;
        }
        let mut wide: Vec<u16> = text.encode_utf16().collect();
        let mut r = to_win32(rect);
        // SAFETY: DrawTextW reads `wide` and may write the ellipsis into
        // it only with DT_MODIFYSTRING, which is not set.
        unsafe {
            SetBkMode(self.dc, TRANSPARENT);
            SetTextColor(self.dc, color);
            DrawTextW(
                self.dc,
                &mut wide,
                &mut r,
                align | DT_VCENTER | DT_SINGLELINE | DT_END_ELLIPSIS | DT_NOPREFIX,
            );
        }
    }
}

fn to_win32(rect: Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_uses_colorref_byte_order() {
        // Arrange
        let theme = ThemeConfig {
            accent: "#112233".into(),
            ..Default::default()
        };

        // Act
        let palette = Palette::from_theme(&theme);

        // Assert
        assert_eq!(palette.accent, COLORREF(0x0033_2211));
    }

    #[test]
    fn palette_falls_back_on_bad_colors() {
        // Arrange
        let theme = ThemeConfig {
            text: "nope".into(),
            ..Default::default()
        };

        // Act
        let palette = Palette::from_theme(&theme);

        // Assert
        assert_eq!(palette.text, Palette::from_theme(&ThemeConfig::default()).text);
    }

    #[test]
    fn rect_conversion_uses_exclusive_edges() {
        let r = to_win32(Rect::new(10, 20, 30, 40));

        assert_eq!((r.left, r.top, r.right, r.bottom), (10, 20, 40, 60));
    }
}
