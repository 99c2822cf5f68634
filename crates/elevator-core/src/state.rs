/// Logical window state owned by the chrome controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl WindowState {
    /// The state a maximize/restore toggle moves to.
    ///
    /// Minimized toggles to Maximized, the same as Normal.
    pub fn toggled(self) -> Self {
        match self {
            Self::Maximized => Self::Normal,
            Self::Normal | Self::Minimized => Self::Maximized,
        }
    }
}

/// Visibility of the chrome elements that depend on window state and focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeVisuals {
    /// Whether the edge/corner frame takes part in hit-testing.
    pub frame_hit_test: bool,
    /// Bottom-right resize grip glyph.
    pub resize_grip: bool,
    /// Rounded outer border.
    pub round_border: bool,
    /// Accent ring drawn while the window has keyboard focus.
    pub focus_ring: bool,
}

impl Default for ChromeVisuals {
    fn default() -> Self {
        Self {
            frame_hit_test: true,
            resize_grip: true,
            round_border: true,
            focus_ring: false,
        }
    }
}

impl ChromeVisuals {
    /// Applies the frame visuals for `state`, leaving the focus ring as is.
    pub fn apply_state(&mut self, state: WindowState) {
        let framed = state != WindowState::Maximized;
        self.frame_hit_test = framed;
        self.resize_grip = framed;
        self.round_border = framed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_between_normal_and_maximized() {
        // Assert
        assert_eq!(WindowState::Normal.toggled(), WindowState::Maximized);
        assert_eq!(WindowState::Maximized.toggled(), WindowState::Normal);
        assert_eq!(WindowState::Minimized.toggled(), WindowState::Maximized);
    }

    #[test]
    fn apply_state_keeps_focus_ring() {
        // Arrange
        let mut visuals = ChromeVisuals {
            focus_ring: true,
            ..Default::default()
        };

        // Act
        visuals.apply_state(WindowState::Maximized);

        // Assert
        assert!(!visuals.frame_hit_test);
        assert!(!visuals.resize_grip);
        assert!(!visuals.round_border);
        assert!(visuals.focus_ring);
    }
}
