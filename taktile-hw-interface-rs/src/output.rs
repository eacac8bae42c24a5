//! Routing of mode output events onto the USB classes.
//!
//! The modes speak in [`Output`] values; this router owns the class
//! handles and the small amount of protocol state they need — the
//! keyboard's rollover slots and the MIDI packet accumulator. Events are
//! routed strictly in queue order, so a tick's key releases always reach
//! the host before the next tick's presses.

use heapless::Vec;

use taktile::modes::Output;
use taktile::settings::ReportFormat;
use usbd_hid::descriptor::KeyboardReport;

use crate::usb::{GamepadReport, GamepadWriter, KeyboardWriter, UsbDriver};

use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::class::midi::MidiClass;

/// Six-slot keyboard rollover state, mirroring the standard HID input
/// report. Presses beyond six keys are dropped until a slot frees up.
struct KeyTracker {
    keycodes: [u8; 6],
}

impl KeyTracker {
    const fn new() -> Self {
        Self { keycodes: [0; 6] }
    }

    fn press(&mut self, code: u8) {
        if self.keycodes.iter().any(|&k| k == code) {
            return;
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|k| **k == 0) {
            *slot = code;
        }
    }

    fn release(&mut self, code: u8) {
        for slot in &mut self.keycodes {
            if *slot == code {
                *slot = 0;
            }
        }
    }

    fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: 0,
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }
    }
}

/// Owns the USB class handles and translates [`Output`] events into
/// class writes.
pub struct OutputRouter {
    keyboard: KeyboardWriter,
    gamepad: GamepadWriter,
    midi: MidiClass<'static, UsbDriver>,
    console: CdcAcmClass<'static, UsbDriver>,
    keys: KeyTracker,
    /// MIDI event packets accumulated since the last flush; one USB
    /// packet carries them all.
    midi_pending: Vec<u8, 64>,
}

impl OutputRouter {
    pub fn new(
        keyboard: KeyboardWriter,
        gamepad: GamepadWriter,
        midi: MidiClass<'static, UsbDriver>,
        console: CdcAcmClass<'static, UsbDriver>,
    ) -> Self {
        Self {
            keyboard,
            gamepad,
            midi,
            console,
            keys: KeyTracker::new(),
            midi_pending: Vec::new(),
        }
    }

    /// Route one tick's events. Endpoint errors (typically: not yet
    /// enumerated, or no host listening) drop the affected event — the
    /// next tick's output self-corrects.
    pub async fn route(&mut self, events: &[Output], format: ReportFormat) {
        for event in events {
            match *event {
                Output::KeyDown(code) => {
                    self.keys.press(code);
                    self.send_keyboard_report().await;
                }
                Output::KeyUp(code) => {
                    self.keys.release(code);
                    self.send_keyboard_report().await;
                }
                Output::Midi(packet) => {
                    self.midi_pending.extend_from_slice(&packet).ok();
                }
                Output::MidiFlush => {
                    if !self.midi_pending.is_empty() {
                        self.midi.write_packet(&self.midi_pending).await.ok();
                        self.midi_pending.clear();
                    }
                }
                Output::Gamepad(axes) => {
                    let report = GamepadReport {
                        x: axes.x,
                        y: axes.y,
                        z: axes.z,
                        buttons: axes.buttons,
                    };
                    self.gamepad.write_serialize(&report).await.ok();
                }
                Output::Status(status) => {
                    // Only talk when a terminal is attached — an absent
                    // DTR would otherwise stall the tick on a dead pipe.
                    if self.console.dtr() {
                        let mut line: Vec<u8, 20> = Vec::new();
                        line.extend_from_slice(status.render(format).as_bytes()).ok();
                        line.extend_from_slice(b"\r\n").ok();
                        self.console.write_packet(&line).await.ok();
                    }
                }
            }
        }
    }

    async fn send_keyboard_report(&mut self) {
        self.keyboard.write_serialize(&self.keys.report()).await.ok();
    }
}
