//! Window state controller for the custom chrome.
//!
//! Owns the logical window state, the visibility of the state-dependent
//! chrome elements, the current cursor, and the double-click detector
//! for the header. All methods are plain synchronous calls made by the
//! platform's window procedure on the UI thread.

use std::time::{Duration, Instant};

use crate::direction::ResizeDirection;
use crate::dispatch::{Dispatcher, MessageSink};
use crate::prompt::{Prompt, PromptKind, QUIT_MESSAGE};
use crate::region::{CursorShape, HitRegion};
use crate::state::{ChromeVisuals, WindowState};
use crate::window::NativeHandle;
use crate::{log_debug, log_info};

/// Two header presses at most this far apart count as a double-click.
pub const DOUBLE_CLICK: Duration = Duration::from_millis(500);

pub struct Chrome<S> {
    dispatcher: Dispatcher<S>,
    state: WindowState,
    visuals: ChromeVisuals,
    cursor: CursorShape,
    last_header_click: Option<Instant>,
}

impl<S: MessageSink> Chrome<S> {
    pub fn new(sink: S) -> Self {
        Self {
            dispatcher: Dispatcher::new(sink),
            state: WindowState::Normal,
            visuals: ChromeVisuals::default(),
            cursor: CursorShape::Arrow,
            last_header_click: None,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn visuals(&self) -> ChromeVisuals {
        self.visuals
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    /// See [`Dispatcher::on_source_initialized`].
    pub fn on_source_initialized(&mut self, handle: NativeHandle) {
        self.dispatcher.on_source_initialized(handle);
    }

    pub fn minimize(&mut self) {
        self.state = WindowState::Minimized;
        self.dispatcher.request_show(WindowState::Minimized);
    }

    /// Switches between Normal and Maximized.
    ///
    /// Maximized hides the resize grip and the rounded border and takes
    /// the edge frame out of hit-testing; Normal brings all three back.
    pub fn toggle_maximize_restore(&mut self) {
        let next = self.state.toggled();
        log_info!("window state {:?} -> {next:?}", self.state);
        self.state = next;
        self.visuals.apply_state(next);
        self.dispatcher.request_show(next);
    }

    /// Records a state change the platform made on its own (taskbar,
    /// keyboard shortcuts, dragging a maximized window).
    pub fn sync_state(&mut self, state: WindowState) {
        if self.state == state {
            return;
        }
        log_debug!("window state synced {:?} -> {state:?}", self.state);
        self.state = state;
        if state != WindowState::Minimized {
            self.visuals.apply_state(state);
        }
    }

    /// Handles a press on the header strip.
    ///
    /// A press within [`DOUBLE_CLICK`] of the previous one toggles
    /// maximize/restore. The timestamp is updated on every press. If the
    /// primary button is still held the platform takes over with a
    /// drag-move.
    pub fn on_header_press(&mut self, now: Instant, primary_held: bool) {
        if let Some(last) = self.last_header_click
            && now.saturating_duration_since(last) <= DOUBLE_CLICK
        {
            self.toggle_maximize_restore();
        }

        self.last_header_click = Some(now);

        if primary_held {
            self.dispatcher.request_drag_move();
        }
    }

    pub fn on_focus_gained(&mut self) {
        self.visuals.focus_ring = true;
    }

    pub fn on_focus_lost(&mut self) {
        self.visuals.focus_ring = false;
    }

    /// Resets the cursor to the arrow whenever the primary button is up.
    ///
    /// After a native resize the modal loop may swallow the button
    /// release, leaving a resize cursor behind.
    pub fn on_pointer_move(&mut self, primary_held: bool) {
        if !primary_held {
            self.cursor = CursorShape::Arrow;
        }
    }

    /// Shows the resize cursor for `region`.
    pub fn on_region_hover(&mut self, region: HitRegion) {
        self.cursor = region.cursor();
    }

    /// Shows the resize cursor for `region` and asks for a native resize.
    pub fn on_region_press(&mut self, region: HitRegion) -> ResizeDirection {
        self.cursor = region.cursor();
        let direction = region.direction();
        self.dispatcher.request_resize(direction);
        direction
    }

    /// Name-based hover. Unknown names leave the cursor unchanged.
    pub fn on_named_region_hover(&mut self, name: &str) -> Option<CursorShape> {
        let region = HitRegion::from_name(name)?;
        self.on_region_hover(region);
        Some(self.cursor)
    }

    /// Name-based press. Unknown names do nothing and produce no direction.
    pub fn on_named_region_press(&mut self, name: &str) -> Option<ResizeDirection> {
        HitRegion::from_name(name).map(|region| self.on_region_press(region))
    }
}

/// Decides whether a close request may proceed.
///
/// With `confirm` set the user is asked first; declining aborts the
/// close and changes nothing.
pub fn close_requested(prompt: &impl Prompt, confirm: bool) -> bool {
    if !confirm {
        return true;
    }
    let accepted = prompt.confirm(QUIT_MESSAGE, PromptKind::YesNo);
    if !accepted {
        log_debug!("close cancelled by user");
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::WM_SYSCOMMAND;
    use crate::dispatch::tests::{Call, RecordingSink, handle};
    use crate::prompt::tests::ScriptedPrompt;

    fn attached() -> Chrome<RecordingSink> {
        let mut chrome = Chrome::new(RecordingSink::default());
        chrome.on_source_initialized(handle());
        chrome
    }

    fn messages(chrome: &Chrome<RecordingSink>) -> Vec<usize> {
        chrome
            .dispatcher()
            .sink()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Message { msg, wparam, .. } if *msg == WM_SYSCOMMAND => Some(*wparam),
                _ => None,
            })
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_normal_with_frame_visible() {
        // Arrange / Act
        let chrome = Chrome::new(RecordingSink::default());

        // Assert
        assert_eq!(chrome.state(), WindowState::Normal);
        assert_eq!(chrome.visuals(), ChromeVisuals::default());
        assert_eq!(chrome.cursor(), CursorShape::Arrow);
    }

    #[test]
    fn maximize_hides_frame_and_restore_brings_it_back() {
        // Arrange
        let mut chrome = attached();

        // Act
        chrome.toggle_maximize_restore();

        // Assert
        assert_eq!(chrome.state(), WindowState::Maximized);
        let v = chrome.visuals();
        assert!(!v.frame_hit_test && !v.resize_grip && !v.round_border);

        // Act
        chrome.toggle_maximize_restore();

        // Assert
        assert_eq!(chrome.state(), WindowState::Normal);
        let v = chrome.visuals();
        assert!(v.frame_hit_test && v.resize_grip && v.round_border);
        assert_eq!(
            chrome.dispatcher().sink().calls[3..],
            [
                Call::Show(WindowState::Maximized),
                Call::Show(WindowState::Normal)
            ]
        );
    }

    #[test]
    fn toggle_from_minimized_maximizes() {
        // Arrange
        let mut chrome = attached();
        chrome.minimize();

        // Act
        chrome.toggle_maximize_restore();

        // Assert
        assert_eq!(chrome.state(), WindowState::Maximized);
    }

    #[test]
    fn minimize_leaves_frame_visuals_alone() {
        // Arrange
        let mut chrome = attached();

        // Act
        chrome.minimize();

        // Assert
        assert_eq!(chrome.state(), WindowState::Minimized);
        assert!(chrome.visuals().frame_hit_test);
        assert_eq!(
            chrome.dispatcher().sink().calls.last(),
            Some(&Call::Show(WindowState::Minimized))
        );
    }

    #[test]
    fn presses_within_threshold_toggle_exactly_once() {
        // Arrange
        let mut chrome = attached();
        let t0 = Instant::now();

        // Act
        chrome.on_header_press(t0, false);
        chrome.on_header_press(t0 + ms(500), false);

        // Assert
        assert_eq!(chrome.state(), WindowState::Maximized);
    }

    #[test]
    fn presses_beyond_threshold_do_not_toggle() {
        // Arrange
        let mut chrome = attached();
        let t0 = Instant::now();

        // Act
        chrome.on_header_press(t0, false);
        chrome.on_header_press(t0 + ms(501), false);

        // Assert
        assert_eq!(chrome.state(), WindowState::Normal);
    }

    #[test]
    fn timestamp_updates_on_every_press() {
        // Arrange
        let mut chrome = attached();
        let t0 = Instant::now();

        // Act: 0 / 400 toggles, 400 / 800 toggles back, 800 / 1400 does nothing.
        chrome.on_header_press(t0, false);
        chrome.on_header_press(t0 + ms(400), false);
        chrome.on_header_press(t0 + ms(800), false);
        chrome.on_header_press(t0 + ms(1400), false);

        // Assert
        assert_eq!(chrome.state(), WindowState::Normal);
        assert_eq!(
            chrome
                .dispatcher()
                .sink()
                .calls
                .iter()
                .filter(|c| matches!(c, Call::Show(_)))
                .count(),
            2
        );
    }

    #[test]
    fn header_press_with_button_held_starts_drag_move() {
        // Arrange
        let mut chrome = attached();

        // Act
        chrome.on_header_press(Instant::now(), true);

        // Assert
        assert_eq!(messages(&chrome), vec![0xF012]);
    }

    #[test]
    fn header_press_without_button_does_not_drag() {
        // Arrange
        let mut chrome = attached();

        // Act
        chrome.on_header_press(Instant::now(), false);

        // Assert
        assert!(messages(&chrome).is_empty());
    }

    #[test]
    fn focus_ring_follows_focus_and_is_idempotent() {
        // Arrange
        let mut chrome = attached();

        // Act / Assert
        chrome.on_focus_gained();
        chrome.on_focus_gained();
        assert!(chrome.visuals().focus_ring);

        chrome.on_focus_lost();
        chrome.on_focus_lost();
        assert!(!chrome.visuals().focus_ring);
    }

    #[test]
    fn pointer_move_without_button_resets_cursor() {
        // Arrange
        let mut chrome = attached();

        for region in HitRegion::ALL {
            chrome.on_region_hover(region);

            // Act
            chrome.on_pointer_move(false);

            // Assert
            assert_eq!(chrome.cursor(), CursorShape::Arrow);
        }
    }

    #[test]
    fn pointer_move_with_button_keeps_cursor() {
        // Arrange
        let mut chrome = attached();
        chrome.on_region_hover(HitRegion::TopLeft);

        // Act
        chrome.on_pointer_move(true);

        // Assert
        assert_eq!(chrome.cursor(), CursorShape::SizeNWSE);
    }

    #[test]
    fn region_press_sets_cursor_and_resizes() {
        // Arrange
        let mut chrome = attached();

        // Act
        let direction = chrome.on_region_press(HitRegion::BottomLeft);

        // Assert
        assert_eq!(direction, ResizeDirection::BottomLeft);
        assert_eq!(chrome.cursor(), CursorShape::SizeNESW);
        assert_eq!(messages(&chrome), vec![61447]);
    }

    #[test]
    fn unknown_region_names_are_ignored() {
        // Arrange
        let mut chrome = attached();
        chrome.on_region_hover(HitRegion::Left);

        // Act
        let cursor = chrome.on_named_region_hover("header");
        let direction = chrome.on_named_region_press("header");

        // Assert
        assert_eq!(cursor, None);
        assert_eq!(direction, None);
        assert_eq!(chrome.cursor(), CursorShape::SizeWE);
        assert!(messages(&chrome).is_empty());
    }

    #[test]
    fn named_press_resizes_in_named_direction() {
        // Arrange
        let mut chrome = attached();

        // Act
        let direction = chrome.on_named_region_press("right");

        // Assert
        assert_eq!(direction, Some(ResizeDirection::Right));
        assert_eq!(messages(&chrome), vec![61442]);
    }

    #[test]
    fn requests_before_initialization_do_not_panic() {
        // Arrange
        let mut chrome = Chrome::new(RecordingSink::default());

        // Act
        chrome.on_region_press(HitRegion::Top);
        chrome.on_header_press(Instant::now(), true);
        chrome.toggle_maximize_restore();

        // Assert
        assert!(chrome.dispatcher().sink().calls.is_empty());
        assert_eq!(chrome.state(), WindowState::Maximized);
    }

    #[test]
    fn sync_state_applies_visuals_without_dispatching() {
        // Arrange
        let mut chrome = attached();
        let before = chrome.dispatcher().sink().calls.len();

        // Act
        chrome.sync_state(WindowState::Maximized);

        // Assert
        assert_eq!(chrome.state(), WindowState::Maximized);
        assert!(!chrome.visuals().resize_grip);
        assert_eq!(chrome.dispatcher().sink().calls.len(), before);
    }

    #[test]
    fn declined_quit_aborts_close() {
        // Arrange
        let prompt = ScriptedPrompt::answering(false);

        // Act
        let proceed = close_requested(&prompt, true);

        // Assert
        assert!(!proceed);
        assert_eq!(
            prompt.asked.borrow().as_slice(),
            [(QUIT_MESSAGE.to_string(), PromptKind::YesNo)]
        );
    }

    #[test]
    fn close_without_confirmation_skips_prompt() {
        // Arrange
        let prompt = ScriptedPrompt::answering(false);

        // Act
        let proceed = close_requested(&prompt, false);

        // Assert
        assert!(proceed);
        assert!(prompt.asked.borrow().is_empty());
    }
}
