//! USB composite device: console CDC-ACM, keyboard HID, gamepad HID,
//! and MIDI, on one bus.
//!
//! All four interfaces are enumerated up front; the active report mode
//! decides which of them carries traffic. Class objects are handed to
//! the [`OutputRouter`](crate::output::OutputRouter); only the device
//! itself runs as a task here.

use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{self, CdcAcmClass};
use embassy_usb::class::hid::{self, HidWriter};
use embassy_usb::class::midi::MidiClass;
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;
use usbd_hid::descriptor::generator_prelude::*;
use usbd_hid::descriptor::KeyboardReport;

/// Concrete USB driver type for the RP2350's device controller.
pub type UsbDriver = Driver<'static, USB>;

/// Keyboard interface: standard 8-byte boot-compatible input report.
pub type KeyboardWriter = HidWriter<'static, UsbDriver, 8>;

/// Gamepad interface: 4-byte input report (3 axes + 4 buttons).
pub type GamepadWriter = HidWriter<'static, UsbDriver, 8>;

/// Gamepad input report: three signed 8-bit axes and four buttons.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = GAMEPAD) = {
        (collection = PHYSICAL, usage = POINTER) = {
            (usage_page = GENERIC_DESKTOP,) = {
                (usage = X,) = { #[item_settings data,variable,absolute] x=input; };
                (usage = Y,) = { #[item_settings data,variable,absolute] y=input; };
                (usage = Z,) = { #[item_settings data,variable,absolute] z=input; };
            };
            (usage_page = BUTTON, usage_min = BUTTON_1, usage_max = BUTTON_4) = {
                #[packed_bits 4] #[item_settings data,variable,absolute] buttons=input;
            };
        };
    }
)]
pub struct GamepadReport {
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub buttons: u8,
}

/// Everything `init()` produces: the device plus the four class handles.
pub struct UsbIo {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard: KeyboardWriter,
    pub gamepad: GamepadWriter,
    pub midi: MidiClass<'static, UsbDriver>,
    pub console: CdcAcmClass<'static, UsbDriver>,
}

/// Build the composite device. Descriptor and control buffers live in
/// statics; call this once.
pub fn init(driver: UsbDriver) -> UsbIo {
    let mut config = Config::new(0xc0de, 0x7a01);
    config.manufacturer = Some("taktile");
    config.product = Some("taktile touch controller");
    config.serial_number = Some("00000001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );

    static KEYBOARD_STATE: StaticCell<hid::State<'static>> = StaticCell::new();
    let keyboard = HidWriter::new(
        &mut builder,
        KEYBOARD_STATE.init(hid::State::new()),
        hid::Config {
            report_descriptor: KeyboardReport::desc(),
            request_handler: None,
            poll_ms: 8,
            max_packet_size: 8,
        },
    );

    static GAMEPAD_STATE: StaticCell<hid::State<'static>> = StaticCell::new();
    let gamepad = HidWriter::new(
        &mut builder,
        GAMEPAD_STATE.init(hid::State::new()),
        hid::Config {
            report_descriptor: GamepadReport::desc(),
            request_handler: None,
            poll_ms: 10,
            max_packet_size: 8,
        },
    );

    let midi = MidiClass::new(&mut builder, 1, 1, 64);

    static CDC_STATE: StaticCell<cdc_acm::State<'static>> = StaticCell::new();
    let console = CdcAcmClass::new(&mut builder, CDC_STATE.init(cdc_acm::State::new()), 64);

    UsbIo {
        device: builder.build(),
        keyboard,
        gamepad,
        midi,
        console,
    }
}

/// Run the USB device state machine forever.
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    device.run().await;
}
