//! Mode selection and dispatch.

use crate::input::TouchFrame;
use crate::settings::Settings;

use super::error::ModeError;
use super::event::OutputQueue;
use super::keymap::{CURSOR_KEYS, NUMERIC_KEYS};
use super::mode::{Behavior, Mode};
use super::MODE_COUNT;

/// Owns the fixed mode set and the single active index.
///
/// Invariants:
/// - after the first successful [`select()`](Self::select), exactly one
///   mode is active at all times;
/// - a switch always finishes deactivating the old mode (its teardown
///   events are queued) before the new one is activated;
/// - a failed select mutates nothing.
pub struct ModeSelector {
    modes: [Mode; MODE_COUNT],
    active: Option<usize>,
}

impl ModeSelector {
    /// Build the variant set in selection order: status, numeric keys,
    /// cursor keys, MIDI, gamepad. Nothing is active yet.
    pub const fn new() -> Self {
        Self {
            modes: [
                Mode::new(Behavior::Status),
                Mode::new(Behavior::Keys(&NUMERIC_KEYS)),
                Mode::new(Behavior::Keys(&CURSOR_KEYS)),
                Mode::new(Behavior::Midi),
                Mode::new(Behavior::Gamepad),
            ],
            active: None,
        }
    }

    /// Index of the active mode, `None` before the first selection.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Switch to `index`. On an out-of-range index nothing changes and
    /// the previously active mode stays active.
    pub fn select(&mut self, index: usize, out: &mut OutputQueue) -> Result<(), ModeError> {
        if index >= MODE_COUNT {
            #[cfg(feature = "defmt")]
            defmt::warn!("select: mode index {} out of range", index);
            return Err(ModeError::InvalidModeIndex);
        }
        self.activate(index, out);
        Ok(())
    }

    /// Switch to the next mode, wrapping from the last back to the first.
    /// Before any selection this activates mode 0. Returns the new index.
    pub fn advance(&mut self, out: &mut OutputQueue) -> usize {
        let next = match self.active {
            Some(current) => (current + 1) % MODE_COUNT,
            None => 0,
        };
        self.activate(next, out);
        next
    }

    /// Forward one touch sample to the active mode. Silently does nothing
    /// before the first selection.
    pub fn dispatch(&mut self, frame: TouchFrame, settings: &Settings, out: &mut OutputQueue) {
        if let Some(index) = self.active {
            self.modes[index].update(frame, settings, out);
        }
    }

    /// Deactivate the old mode, then activate the new one. `index` has
    /// already been validated.
    fn activate(&mut self, index: usize, out: &mut OutputQueue) {
        if let Some(current) = self.active {
            self.modes[current].deactivate(out);
        }
        self.active = Some(index);
        self.modes[index].activate(out);
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::event::Output;
    use super::super::keymap::hid;
    use super::*;

    fn frame(buttons: u8, slider: Option<u8>) -> TouchFrame {
        TouchFrame { buttons, slider }
    }

    #[test]
    fn nothing_active_before_first_select() {
        let selector = ModeSelector::new();
        assert_eq!(selector.active_index(), None);
    }

    #[test]
    fn dispatch_without_active_mode_is_a_no_op() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        selector.dispatch(frame(0xFF, Some(100)), &Settings::new(), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn select_activates_exactly_one_mode() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        assert_eq!(selector.select(3, &mut out), Ok(()));
        assert_eq!(selector.active_index(), Some(3));
    }

    #[test]
    fn select_out_of_range_fails_and_keeps_current() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        selector.select(1, &mut out).unwrap();

        assert_eq!(
            selector.select(MODE_COUNT, &mut out),
            Err(ModeError::InvalidModeIndex)
        );
        assert_eq!(selector.active_index(), Some(1));

        // The surviving mode still works: pad 0 produces a key press.
        out.clear();
        selector.dispatch(frame(0b0000_0001, None), &Settings::new(), &mut out);
        assert_eq!(out.as_slice(), &[Output::KeyDown(hid::KEY_1)]);
    }

    #[test]
    fn advance_wraps_around() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        selector.select(MODE_COUNT - 1, &mut out).unwrap();

        assert_eq!(selector.advance(&mut out), 0);
        assert_eq!(selector.active_index(), Some(0));
    }

    #[test]
    fn advance_before_any_select_starts_at_zero() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        assert_eq!(selector.advance(&mut out), 0);
        assert_eq!(selector.active_index(), Some(0));
    }

    #[test]
    fn switch_releases_old_modes_keys_before_new_mode_runs() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        let settings = Settings::new();

        // Hold pad 1 in the numeric keys mode.
        selector.select(1, &mut out).unwrap();
        out.clear();
        selector.dispatch(frame(0b0000_0010, None), &settings, &mut out);
        assert_eq!(out.as_slice(), &[Output::KeyDown(hid::KEY_2)]);

        // Switching away queues the release as part of the teardown.
        out.clear();
        selector.select(3, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[Output::KeyUp(hid::KEY_2)]);
    }

    #[test]
    fn reselected_mode_starts_from_a_clean_baseline() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        let settings = Settings::new();

        selector.select(1, &mut out).unwrap();
        selector.dispatch(frame(0b0000_0001, None), &settings, &mut out);

        // Leave and come back with the pad still held: fresh press edge.
        selector.select(0, &mut out).unwrap();
        selector.select(1, &mut out).unwrap();
        out.clear();
        selector.dispatch(frame(0b0000_0001, None), &settings, &mut out);
        assert_eq!(out.as_slice(), &[Output::KeyDown(hid::KEY_1)]);
    }

    #[test]
    fn selecting_the_active_mode_restarts_it() {
        let mut selector = ModeSelector::new();
        let mut out = OutputQueue::new();
        let settings = Settings::new();

        selector.select(1, &mut out).unwrap();
        selector.dispatch(frame(0b0000_0001, None), &settings, &mut out);

        // Re-selecting deactivates (releasing the held key) and
        // re-activates the same mode.
        out.clear();
        selector.select(1, &mut out).unwrap();
        assert_eq!(out.as_slice(), &[Output::KeyUp(hid::KEY_1)]);
        assert_eq!(selector.active_index(), Some(1));
    }
}
