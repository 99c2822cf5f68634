//! Geometry of the custom chrome and the window content.
//!
//! The window is drawn entirely by the application, so hit-testing is
//! done here against plain rectangles computed from the client size:
//!
//! ```text
//! +--------------------------------------------+
//! | title                        [_] [□] [x]  | <- header
//! +--------------------------------------------+
//! |  list of elevated programs                  |
//! |                                             |
//! |  C:\full\path\of\selection.exe              | <- path label
//! |  [Add] [Remove] [About]                   ◢ | <- footer + grip
//! +--------------------------------------------+
//! ```
//!
//! A thin frame of `resize_border` pixels runs around the whole window;
//! its corners are `corner` pixels long on each axis.

use std::ops::Range;

use crate::rect::{Point, Rect};
use crate::region::HitRegion;
use crate::state::ChromeVisuals;

const PADDING: i32 = 12;
const FOOTER_HEIGHT: i32 = 32;
const LABEL_HEIGHT: i32 = 22;
const FOOTER_BUTTON_WIDTH: i32 = 88;
const FOOTER_BUTTON_GAP: i32 = 8;
const GRIP_SIZE: i32 = 14;
const SCROLL_THUMB_WIDTH: i32 = 3;
const SCROLL_THUMB_MIN: i32 = 12;

/// What a client-area point lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeRegion {
    /// One of the eight resize strips/corners.
    Edge(HitRegion),
    /// The draggable header strip.
    Header,
    Minimize,
    MaximizeRestore,
    Close,
    /// A footer button.
    Control(Control),
    /// A row of the elevation list, by entry index.
    ListRow(usize),
    /// Anything else.
    Client,
}

/// Footer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Add,
    Remove,
    About,
}

impl Control {
    pub const ALL: [Control; 3] = [Self::Add, Self::Remove, Self::About];

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add...",
            Self::Remove => "Remove",
            Self::About => "About",
        }
    }
}

/// Sizes that drive the chrome geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeLayout {
    pub resize_border: i32,
    pub corner: i32,
    pub header_height: i32,
    pub button_width: i32,
    pub row_height: i32,
}

impl Default for ChromeLayout {
    fn default() -> Self {
        Self {
            resize_border: 6,
            corner: 16,
            header_height: 32,
            button_width: 46,
            row_height: 22,
        }
    }
}

impl ChromeLayout {
    /// Resolves the region under `p` for a client area of `width` x `height`.
    ///
    /// `rows` is the range of entry indices currently shown in the list,
    /// first visible row first. Edge regions are only reported while the
    /// frame takes part in hit-testing. Corners win over edges.
    pub fn hit_test(
        &self,
        p: Point,
        width: i32,
        height: i32,
        visuals: ChromeVisuals,
        rows: Range<usize>,
    ) -> ChromeRegion {
        let bounds = Rect::new(0, 0, width, height);
        if !bounds.contains(p) {
            return ChromeRegion::Client;
        }

        if visuals.frame_hit_test
            && let Some(edge) = self.edge_at(p, width, height)
        {
            return ChromeRegion::Edge(edge);
        }

        if self.close_rect(width).contains(p) {
            return ChromeRegion::Close;
        }
        if self.maximize_rect(width).contains(p) {
            return ChromeRegion::MaximizeRestore;
        }
        if self.minimize_rect(width).contains(p) {
            return ChromeRegion::Minimize;
        }
        if self.header_rect(width).contains(p) {
            return ChromeRegion::Header;
        }

        for control in Control::ALL {
            if self.control_rect(control, height).contains(p) {
                return ChromeRegion::Control(control);
            }
        }

        if let Some(index) = self.row_at(p, width, height, rows.start)
            && rows.contains(&index)
        {
            return ChromeRegion::ListRow(index);
        }

        ChromeRegion::Client
    }

    /// The edge or corner under `p`, ignoring hit-test visibility.
    pub fn edge_at(&self, p: Point, width: i32, height: i32) -> Option<HitRegion> {
        let b = self.resize_border;
        let c = self.corner.max(b);

        let on_left = p.x < b;
        let on_right = p.x >= width - b;
        let on_top = p.y < b;
        let on_bottom = p.y >= height - b;

        let near_left = p.x < c;
        let near_right = p.x >= width - c;
        let near_top = p.y < c;
        let near_bottom = p.y >= height - c;

        if (on_top && near_left) || (on_left && near_top) {
            Some(HitRegion::TopLeft)
        } else if (on_top && near_right) || (on_right && near_top) {
            Some(HitRegion::TopRight)
        } else if (on_bottom && near_left) || (on_left && near_bottom) {
            Some(HitRegion::BottomLeft)
        } else if (on_bottom && near_right) || (on_right && near_bottom) {
            Some(HitRegion::BottomRight)
        } else if on_left {
            Some(HitRegion::Left)
        } else if on_right {
            Some(HitRegion::Right)
        } else if on_top {
            Some(HitRegion::Top)
        } else if on_bottom {
            Some(HitRegion::Bottom)
        } else {
            None
        }
    }

    pub fn header_rect(&self, width: i32) -> Rect {
        Rect::new(0, 0, width, self.header_height)
    }

    pub fn close_rect(&self, width: i32) -> Rect {
        self.caption_button(width, 1)
    }

    pub fn maximize_rect(&self, width: i32) -> Rect {
        self.caption_button(width, 2)
    }

    pub fn minimize_rect(&self, width: i32) -> Rect {
        self.caption_button(width, 3)
    }

    /// The `n`th caption button counting from the right, starting at 1.
    fn caption_button(&self, width: i32, n: i32) -> Rect {
        Rect::new(
            width - self.button_width * n,
            0,
            self.button_width,
            self.header_height,
        )
    }

    pub fn footer_rect(&self, width: i32, height: i32) -> Rect {
        Rect::new(
            PADDING,
            height - PADDING - FOOTER_HEIGHT,
            (width - PADDING * 2).max(0),
            FOOTER_HEIGHT,
        )
    }

    pub fn control_rect(&self, control: Control, height: i32) -> Rect {
        let index = match control {
            Control::Add => 0,
            Control::Remove => 1,
            Control::About => 2,
        };
        Rect::new(
            PADDING + index * (FOOTER_BUTTON_WIDTH + FOOTER_BUTTON_GAP),
            height - PADDING - FOOTER_HEIGHT,
            FOOTER_BUTTON_WIDTH,
            FOOTER_HEIGHT,
        )
    }

    /// Label under the list showing the selected entry's full path.
    pub fn path_label_rect(&self, width: i32, height: i32) -> Rect {
        let footer = self.footer_rect(width, height);
        Rect::new(
            PADDING,
            footer.y - PADDING / 2 - LABEL_HEIGHT,
            footer.width,
            LABEL_HEIGHT,
        )
    }

    pub fn list_rect(&self, width: i32, height: i32) -> Rect {
        let top = self.header_height + PADDING / 2;
        let label = self.path_label_rect(width, height);
        Rect::new(
            PADDING,
            top,
            (width - PADDING * 2).max(0),
            (label.y - PADDING / 2 - top).max(0),
        )
    }

    /// Entry index under `p` when the list shows entry `first` in its
    /// top row, whether or not an entry exists there.
    pub fn row_at(&self, p: Point, width: i32, height: i32, first: usize) -> Option<usize> {
        let list = self.list_rect(width, height);
        if !list.contains(p) || self.row_height <= 0 {
            return None;
        }
        Some(first + ((p.y - list.y) / self.row_height) as usize)
    }

    /// Rectangle of entry `index` when the list shows entry `first` in
    /// its top row. Entries scrolled above the list land above it.
    pub fn row_rect(&self, index: usize, first: usize, width: i32, height: i32) -> Rect {
        let list = self.list_rect(width, height);
        let slot = index as i32 - first as i32;
        Rect::new(
            list.x,
            list.y + slot * self.row_height,
            list.width,
            self.row_height,
        )
    }

    /// Number of rows that fit in the list area.
    pub fn visible_rows(&self, width: i32, height: i32) -> usize {
        if self.row_height <= 0 {
            return 0;
        }
        (self.list_rect(width, height).height / self.row_height).max(0) as usize
    }

    /// Scroll position marker along the right edge of the list, when
    /// `rows` does not cover all `total` entries.
    pub fn scroll_thumb(
        &self,
        width: i32,
        height: i32,
        rows: Range<usize>,
        total: usize,
    ) -> Option<Rect> {
        if total == 0 || rows.len() >= total {
            return None;
        }
        let list = self.list_rect(width, height);
        let track = list.height as i64;
        let total = total as i64;
        let top = track * rows.start as i64 / total;
        let length = (track * rows.len() as i64 / total).max(SCROLL_THUMB_MIN as i64);
        let top = top.min(track - length).max(0);
        Some(Rect::new(
            list.right() - SCROLL_THUMB_WIDTH - 1,
            list.y + top as i32,
            SCROLL_THUMB_WIDTH,
            length.min(track) as i32,
        ))
    }

    /// Bottom-right resize grip glyph.
    pub fn grip_rect(&self, width: i32, height: i32) -> Rect {
        Rect::new(
            width - GRIP_SIZE - 2,
            height - GRIP_SIZE - 2,
            GRIP_SIZE,
            GRIP_SIZE,
        )
    }
}
