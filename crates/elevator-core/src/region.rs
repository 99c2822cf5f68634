//! Edge and corner hit-regions of the custom window frame.
//!
//! Each region maps to the cursor shown while hovering it and to the
//! direction of the native resize started when it is pressed.

use crate::direction::ResizeDirection;

/// Cursor shapes the chrome can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Arrow,
    /// Vertical double arrow (top/bottom edges).
    SizeNS,
    /// Horizontal double arrow (left/right edges).
    SizeWE,
    /// Diagonal double arrow, top-left to bottom-right.
    SizeNWSE,
    /// Diagonal double arrow, top-right to bottom-left.
    SizeNESW,
}

/// One of the eight thin strips or corners around the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitRegion {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HitRegion {
    pub const ALL: [HitRegion; 8] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Resolves a region by its element name (`"top"`, `"bottomLeft"`, ...).
    ///
    /// Unknown names return `None`; callers treat that as "leave the
    /// cursor alone".
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "topLeft" => Some(Self::TopLeft),
            "topRight" => Some(Self::TopRight),
            "bottomLeft" => Some(Self::BottomLeft),
            "bottomRight" => Some(Self::BottomRight),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
        }
    }

    pub fn cursor(self) -> CursorShape {
        match self {
            Self::Top | Self::Bottom => CursorShape::SizeNS,
            Self::Left | Self::Right => CursorShape::SizeWE,
            Self::TopLeft | Self::BottomRight => CursorShape::SizeNWSE,
            Self::TopRight | Self::BottomLeft => CursorShape::SizeNESW,
        }
    }

    pub fn direction(self) -> ResizeDirection {
        match self {
            Self::Top => ResizeDirection::Top,
            Self::Bottom => ResizeDirection::Bottom,
            Self::Left => ResizeDirection::Left,
            Self::Right => ResizeDirection::Right,
            Self::TopLeft => ResizeDirection::TopLeft,
            Self::TopRight => ResizeDirection::TopRight,
            Self::BottomLeft => ResizeDirection::BottomLeft,
            Self::BottomRight => ResizeDirection::BottomRight,
        }
    }
}
