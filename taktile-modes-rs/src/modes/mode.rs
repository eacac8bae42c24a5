//! The mode state machine and the five variant behaviors.

use crate::input::{TouchFrame, PAD_COUNT};
use crate::scale::map_range;
use crate::settings::Settings;

use super::event::{AxisReport, Output, OutputQueue, StatusReport};
use super::keymap::MIDI_NOTES;

/// USB-MIDI code index numbers for the event packets the MIDI variant
/// emits (cable 0).
const CIN_NOTE_OFF: u8 = 0x08;
const CIN_NOTE_ON: u8 = 0x09;
const CIN_CONTROL_CHANGE: u8 = 0x0B;
const CIN_PITCH_BEND: u8 = 0x0E;

/// Pitch bend center — the value sent while the slider is untouched.
const PITCH_CENTER: i32 = 0x2000;

/// Previous/current sample pair used for edge detection.
///
/// `update()` stores the new sample, lets the behavior compare it against
/// the previous one, then rolls current into previous. `activate()` resets
/// everything to the untouched baseline so a pad already held during a
/// mode switch produces a fresh press edge.
#[derive(Debug, Clone, Copy)]
struct EdgeState {
    prev_buttons: u8,
    curr_buttons: u8,
    prev_slider: Option<u8>,
    curr_slider: Option<u8>,
}

impl EdgeState {
    const fn new() -> Self {
        Self {
            prev_buttons: 0,
            curr_buttons: 0,
            prev_slider: None,
            curr_slider: None,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn store(&mut self, frame: TouchFrame) {
        self.curr_buttons = frame.buttons;
        self.curr_slider = frame.slider;
    }

    fn roll(&mut self) {
        self.prev_buttons = self.curr_buttons;
        self.prev_slider = self.curr_slider;
    }

    /// True iff anything differs between the previous and current sample.
    fn changed(&self) -> bool {
        self.prev_buttons != self.curr_buttons || self.prev_slider != self.curr_slider
    }

    /// 0→1 transition on pad `i`.
    fn pressed(&self, i: usize) -> bool {
        let mask = 1u8 << i;
        self.prev_buttons & mask == 0 && self.curr_buttons & mask != 0
    }

    /// 1→0 transition on pad `i`.
    fn released(&self, i: usize) -> bool {
        let mask = 1u8 << i;
        self.prev_buttons & mask != 0 && self.curr_buttons & mask == 0
    }
}

/// Protocol-specific behavior of a mode. The set is closed — adding a
/// variant means touching every `match` below, which is exactly the point.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Console status lines, emitted only on change.
    Status,
    /// Keyboard emulation with a fixed pad-to-usage map.
    Keys(&'static [u8; PAD_COUNT]),
    /// MIDI notes per pad plus slider on pitch bend or a controller.
    Midi,
    /// Gamepad axes and buttons, reported every tick.
    Gamepad,
}

/// One report mode: shared edge tracking plus a variant behavior.
pub struct Mode {
    edges: EdgeState,
    behavior: Behavior,
}

impl Mode {
    pub const fn new(behavior: Behavior) -> Self {
        Self {
            edges: EdgeState::new(),
            behavior,
        }
    }

    /// Reset edge tracking to the untouched baseline. Called by the
    /// selector before the first `update()` after a switch.
    pub fn activate(&mut self, _out: &mut OutputQueue) {
        self.edges.reset();
    }

    /// Protocol teardown. Keyboard variants release every key still held
    /// so a mode switch can never leave the host with a stuck key; the
    /// other variants have nothing to undo.
    pub fn deactivate(&mut self, out: &mut OutputQueue) {
        if let Behavior::Keys(map) = self.behavior {
            for i in 0..PAD_COUNT {
                if self.edges.curr_buttons & (1 << i) != 0 {
                    out.push(Output::KeyUp(map[i])).ok();
                }
            }
        }
    }

    /// Feed one touch sample: store it, run the behavior, roll the edges.
    /// Only valid while active — the selector guarantees that.
    pub fn update(&mut self, frame: TouchFrame, settings: &Settings, out: &mut OutputQueue) {
        self.edges.store(frame);
        self.process(settings, out);
        self.edges.roll();
    }

    fn process(&mut self, settings: &Settings, out: &mut OutputQueue) {
        match self.behavior {
            Behavior::Status => self.process_status(settings, out),
            Behavior::Keys(map) => self.process_keys(map, out),
            Behavior::Midi => self.process_midi(settings, out),
            Behavior::Gamepad => self.process_gamepad(out),
        }
    }

    // ── Variant behaviors ────────────────────────────────────────────

    fn process_status(&self, _settings: &Settings, out: &mut OutputQueue) {
        if !self.edges.changed() {
            return;
        }
        out.push(Output::Status(StatusReport {
            buttons: self.edges.curr_buttons,
            slider: self.edges.curr_slider,
        }))
        .ok();
    }

    fn process_keys(&self, map: &[u8; PAD_COUNT], out: &mut OutputQueue) {
        for i in 0..PAD_COUNT {
            if self.edges.pressed(i) {
                out.push(Output::KeyDown(map[i])).ok();
            } else if self.edges.released(i) {
                out.push(Output::KeyUp(map[i])).ok();
            }
        }
    }

    fn process_midi(&self, settings: &Settings, out: &mut OutputQueue) {
        let channel = settings.midi_channel();

        for i in 0..PAD_COUNT {
            if self.edges.pressed(i) {
                out.push(Output::Midi([
                    CIN_NOTE_ON,
                    0x90 | channel,
                    MIDI_NOTES[i],
                    127,
                ]))
                .ok();
            } else if self.edges.released(i) {
                out.push(Output::Midi([CIN_NOTE_OFF, 0x80 | channel, MIDI_NOTES[i], 0]))
                    .ok();
            }
        }

        if self.edges.curr_slider != self.edges.prev_slider {
            let controller = settings.midi_controller();
            if controller == 0 {
                // Controller 0 routes the slider to pitch bend. An
                // untouched slider snaps back to center, not zero.
                let pitch = match self.edges.curr_slider {
                    Some(v) => map_range(0, 255, 0, 0x3FFF, i32::from(v)),
                    None => PITCH_CENTER,
                };
                out.push(Output::Midi([
                    CIN_PITCH_BEND,
                    0xE0 | channel,
                    (pitch & 0x7F) as u8,
                    ((pitch >> 7) & 0x7F) as u8,
                ]))
                .ok();
            } else {
                let value = match self.edges.curr_slider {
                    Some(v) => map_range(0, 255, 0, 127, i32::from(v)) as u8,
                    None => 0,
                };
                out.push(Output::Midi([
                    CIN_CONTROL_CHANGE,
                    0xB0 | channel,
                    controller,
                    value,
                ]))
                .ok();
            }
        }

        // Flush every tick, events or not.
        out.push(Output::MidiFlush).ok();
    }

    fn process_gamepad(&self, out: &mut OutputQueue) {
        let b = self.edges.curr_buttons;

        // Pads 0/1 pull the Y axis, pads 2/3 the X axis. Both-or-neither
        // centers the axis.
        let y = axis_pair(b & 0x01 != 0, b & 0x02 != 0);
        let x = axis_pair(b & 0x04 != 0, b & 0x08 != 0);

        // Pads 4–7 are plain gamepad buttons.
        let buttons = (b >> 4) & 0x0F;

        // Slider rides the Z axis, centered while untouched.
        let z = match self.edges.curr_slider {
            Some(v) => (i16::from(v) - 128) as i8,
            None => 0,
        };

        out.push(Output::Gamepad(AxisReport { x, y, z, buttons })).ok();
    }
}

/// Collapse an opposing pad pair onto one axis.
fn axis_pair(negative: bool, positive: bool) -> i8 {
    match (negative, positive) {
        (true, false) => -128,
        (false, true) => 127,
        _ => 0,
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::super::keymap::{hid, CURSOR_KEYS, NUMERIC_KEYS};
    use super::*;

    fn frame(buttons: u8, slider: Option<u8>) -> TouchFrame {
        TouchFrame { buttons, slider }
    }

    /// Run `update` and return the events it produced.
    fn tick(mode: &mut Mode, f: TouchFrame, settings: &Settings) -> OutputQueue {
        let mut out = OutputQueue::new();
        mode.update(f, settings, &mut out);
        out
    }

    fn activated(behavior: Behavior) -> Mode {
        let mut mode = Mode::new(behavior);
        let mut out = OutputQueue::new();
        mode.activate(&mut out);
        assert!(out.is_empty());
        mode
    }

    // ── Key emulation ────────────────────────────────────────────────

    #[test]
    fn key_press_then_release_emits_one_pair() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Keys(&NUMERIC_KEYS));

        let out = tick(&mut mode, frame(0b0000_0001, None), &settings);
        assert_eq!(out.as_slice(), &[Output::KeyDown(hid::KEY_1)]);

        let out = tick(&mut mode, frame(0b0000_0000, None), &settings);
        assert_eq!(out.as_slice(), &[Output::KeyUp(hid::KEY_1)]);
    }

    #[test]
    fn held_key_does_not_repeat() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Keys(&NUMERIC_KEYS));

        tick(&mut mode, frame(0b0000_0100, None), &settings);
        for _ in 0..10 {
            let out = tick(&mut mode, frame(0b0000_0100, None), &settings);
            assert!(out.is_empty());
        }
    }

    #[test]
    fn multiple_edges_in_one_tick() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Keys(&CURSOR_KEYS));

        tick(&mut mode, frame(0b0000_0011, None), &settings);
        // Pad 0 stays, pad 1 releases, pad 7 presses.
        let out = tick(&mut mode, frame(0b1000_0001, None), &settings);
        assert_eq!(
            out.as_slice(),
            &[
                Output::KeyUp(CURSOR_KEYS[1]),
                Output::KeyDown(CURSOR_KEYS[7]),
            ]
        );
    }

    #[test]
    fn deactivate_releases_held_keys() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Keys(&NUMERIC_KEYS));

        tick(&mut mode, frame(0b1000_0010, None), &settings);

        let mut out = OutputQueue::new();
        mode.deactivate(&mut out);
        assert_eq!(
            out.as_slice(),
            &[Output::KeyUp(hid::KEY_2), Output::KeyUp(hid::KEY_8)]
        );
    }

    #[test]
    fn deactivate_with_nothing_held_is_silent() {
        let mut mode = activated(Behavior::Keys(&NUMERIC_KEYS));
        let mut out = OutputQueue::new();
        mode.deactivate(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn activate_resets_edge_baseline() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Keys(&NUMERIC_KEYS));

        tick(&mut mode, frame(0b0000_0001, None), &settings);

        // Re-activating forgets the held pad: the same frame produces a
        // fresh press edge.
        let mut out = OutputQueue::new();
        mode.activate(&mut out);
        let out = tick(&mut mode, frame(0b0000_0001, None), &settings);
        assert_eq!(out.as_slice(), &[Output::KeyDown(hid::KEY_1)]);
    }

    // ── Status ───────────────────────────────────────────────────────

    #[test]
    fn status_emits_only_on_change() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Status);

        let out = tick(&mut mode, frame(0b0000_0001, Some(10)), &settings);
        assert_eq!(
            out.as_slice(),
            &[Output::Status(StatusReport {
                buttons: 0b0000_0001,
                slider: Some(10),
            })]
        );

        let out = tick(&mut mode, frame(0b0000_0001, Some(10)), &settings);
        assert!(out.is_empty());

        // A slider-only change still reports.
        let out = tick(&mut mode, frame(0b0000_0001, Some(11)), &settings);
        assert_eq!(out.len(), 1);
    }

    // ── MIDI ─────────────────────────────────────────────────────────

    #[test]
    fn midi_note_on_and_off_per_pad_edge() {
        let mut settings = Settings::new();
        settings.set_midi(2, 0);
        let mut mode = activated(Behavior::Midi);

        let out = tick(&mut mode, frame(0b0000_0001, None), &settings);
        assert_eq!(
            out.as_slice(),
            &[
                Output::Midi([0x09, 0x92, 60, 127]),
                Output::MidiFlush,
            ]
        );

        let out = tick(&mut mode, frame(0b0000_0000, None), &settings);
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x08, 0x82, 60, 0]), Output::MidiFlush]
        );
    }

    #[test]
    fn midi_flush_emitted_even_without_events() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Midi);

        let out = tick(&mut mode, frame(0, None), &settings);
        assert_eq!(out.as_slice(), &[Output::MidiFlush]);
    }

    #[test]
    fn slider_drives_pitch_bend_when_controller_is_zero() {
        let settings = Settings::new(); // controller 0 = pitch bend
        let mut mode = activated(Behavior::Midi);

        let out = tick(&mut mode, frame(0, Some(0)), &settings);
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0E, 0xE0, 0x00, 0x00]), Output::MidiFlush]
        );

        let out = tick(&mut mode, frame(0, Some(255)), &settings);
        // 0x3FFF = LSB 0x7F, MSB 0x7F.
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0E, 0xE0, 0x7F, 0x7F]), Output::MidiFlush]
        );
    }

    #[test]
    fn absent_slider_centers_pitch_but_zeroes_controller() {
        // Pitch bend branch: releasing the slider snaps to 0x2000.
        let settings = Settings::new();
        let mut mode = activated(Behavior::Midi);
        tick(&mut mode, frame(0, Some(200)), &settings);
        let out = tick(&mut mode, frame(0, None), &settings);
        // 0x2000 = LSB 0x00, MSB 0x40.
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0E, 0xE0, 0x00, 0x40]), Output::MidiFlush]
        );

        // Controller branch: releasing the slider sends value 0.
        let mut settings = Settings::new();
        settings.set_midi(0, 5);
        let mut mode = activated(Behavior::Midi);
        tick(&mut mode, frame(0, Some(200)), &settings);
        let out = tick(&mut mode, frame(0, None), &settings);
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0B, 0xB0, 5, 0]), Output::MidiFlush]
        );
    }

    #[test]
    fn slider_scales_linearly_onto_controller() {
        let mut settings = Settings::new();
        settings.set_midi(0, 5);
        let mut mode = activated(Behavior::Midi);

        let out = tick(&mut mode, frame(0, Some(255)), &settings);
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0B, 0xB0, 5, 127]), Output::MidiFlush]
        );

        let out = tick(&mut mode, frame(0, Some(128)), &settings);
        // 128 * 127 / 255 = 63.74… → 63
        assert_eq!(
            out.as_slice(),
            &[Output::Midi([0x0B, 0xB0, 5, 63]), Output::MidiFlush]
        );
    }

    #[test]
    fn unchanged_slider_emits_no_slider_event() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Midi);

        tick(&mut mode, frame(0, Some(100)), &settings);
        let out = tick(&mut mode, frame(0, Some(100)), &settings);
        assert_eq!(out.as_slice(), &[Output::MidiFlush]);
    }

    // ── Gamepad ──────────────────────────────────────────────────────

    #[test]
    fn axis_pairs_cover_all_four_combinations() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Gamepad);

        let cases = [
            (0b0000_0001, -128), // up only
            (0b0000_0010, 127),  // down only
            (0b0000_0011, 0),    // both
            (0b0000_0000, 0),    // neither
        ];
        for (buttons, expected_y) in cases {
            let out = tick(&mut mode, frame(buttons, None), &settings);
            match out.as_slice() {
                [Output::Gamepad(report)] => {
                    assert_eq!(report.y, expected_y, "buttons {:#04x}", buttons);
                    assert_eq!(report.x, 0);
                }
                other => panic!("unexpected events: {:?}", other),
            }
        }
    }

    #[test]
    fn x_axis_uses_pads_two_and_three() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Gamepad);

        let out = tick(&mut mode, frame(0b0000_0100, None), &settings);
        assert_eq!(out.as_slice(), &[Output::Gamepad(AxisReport {
            x: -128,
            y: 0,
            z: 0,
            buttons: 0,
        })]);

        let out = tick(&mut mode, frame(0b0000_1000, None), &settings);
        match out.as_slice() {
            [Output::Gamepad(report)] => assert_eq!(report.x, 127),
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn upper_pads_map_to_gamepad_buttons() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Gamepad);

        let out = tick(&mut mode, frame(0b1010_0000, None), &settings);
        match out.as_slice() {
            [Output::Gamepad(report)] => assert_eq!(report.buttons, 0b1010),
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn slider_maps_onto_z_axis_with_absent_as_center() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Gamepad);

        let expect_z = |out: &OutputQueue, z: i8| match out.as_slice() {
            [Output::Gamepad(report)] => assert_eq!(report.z, z),
            other => panic!("unexpected events: {:?}", other),
        };

        expect_z(&tick(&mut mode, frame(0, Some(0)), &settings), -128);
        expect_z(&tick(&mut mode, frame(0, Some(255)), &settings), 127);
        expect_z(&tick(&mut mode, frame(0, Some(128)), &settings), 0);
        expect_z(&tick(&mut mode, frame(0, None), &settings), 0);
    }

    #[test]
    fn gamepad_reports_every_tick_even_unchanged() {
        let settings = Settings::new();
        let mut mode = activated(Behavior::Gamepad);

        for _ in 0..3 {
            let out = tick(&mut mode, frame(0, None), &settings);
            assert_eq!(out.len(), 1);
        }
    }
}
