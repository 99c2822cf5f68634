//! Resize directions understood by the native system-command protocol.
//!
//! A resize is requested by sending `WM_SYSCOMMAND` with
//! `SC_SIZE + ordinal`. The ordinals below are the `WMSZ_*` values the
//! platform expects and must not be renumbered.

/// Base `SC_SIZE` system-command code.
pub const SC_SIZE: u32 = 61440;

/// `SC_MOVE | HTCAPTION`: the move code used for frameless drag-move.
pub const SC_DRAG_MOVE: u32 = 0xF012;

/// Direction of a native interactive resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    Left = 1,
    Right = 2,
    Top = 3,
    TopLeft = 4,
    TopRight = 5,
    Bottom = 6,
    BottomLeft = 7,
    BottomRight = 8,
}

impl ResizeDirection {
    /// Every direction, in ordinal order.
    pub const ALL: [ResizeDirection; 8] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::TopLeft,
        Self::TopRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Protocol ordinal in `1..=8`.
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// The `WM_SYSCOMMAND` code that starts a resize in this direction.
    pub fn syscommand(self) -> u32 {
        SC_SIZE + self.ordinal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syscommand_is_sc_size_plus_ordinal() {
        // Assert
        assert_eq!(ResizeDirection::Left.syscommand(), 61441);
        assert_eq!(ResizeDirection::Right.syscommand(), 61442);
        assert_eq!(ResizeDirection::Top.syscommand(), 61443);
        assert_eq!(ResizeDirection::TopLeft.syscommand(), 61444);
        assert_eq!(ResizeDirection::TopRight.syscommand(), 61445);
        assert_eq!(ResizeDirection::Bottom.syscommand(), 61446);
        assert_eq!(ResizeDirection::BottomLeft.syscommand(), 61447);
        assert_eq!(ResizeDirection::BottomRight.syscommand(), 61448);
    }

    #[test]
    fn ordinals_cover_one_through_eight() {
        // Act
        let ordinals: Vec<u32> = ResizeDirection::ALL.iter().map(|d| d.ordinal()).collect();

        // Assert
        assert_eq!(ordinals, (1..=8).collect::<Vec<u32>>());
    }
}
