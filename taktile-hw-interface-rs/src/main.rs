//! taktile-hw-interface
//!
//! Touch surface → report mode → USB output firmware for the taktile
//! controller (Raspberry Pi Pico 2 class RP2350 board). Wires the three
//! library crates into the live device:
//!
//! 1. A fixed 10 ms tick reads one frame from the capacitive touch
//!    controller and drains the debounced button flags.
//! 2. The mode selector forwards the frame to the active report mode,
//!    which emits output events (keyboard, MIDI, gamepad or console).
//! 3. The output router writes those events to the USB composite device.
//! 4. When LED tracking is enabled, the pad state is mirrored onto the
//!    RGB chain through the non-blocking strip handle.
//!
//! The button sampler and the LED flush task run independently of the
//! tick — a slow USB host can delay reports, but never sampling or LED
//! transmission.

#![no_std]
#![no_main]

mod buttons;
mod indicator;
mod output;
mod usb;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, SPI0, USB};
use embassy_rp::spi::{self, Spi};
use embassy_rp::usb::{Driver, InterruptHandler as UsbInterruptHandler};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use captouch_driver::{TouchPad, DEFAULT_ADDRESS};
use taktile::debounce::flags;
use taktile::input::{TouchFrame, PAD_COUNT};
use taktile::modes::{ModeSelector, OutputQueue};
use taktile::settings::Settings;
use taktile_led_strip_rs::{strip_flush_task, LedStrip, Rgb, StripHandle};

use crate::indicator::ModeIndicator;
use crate::output::OutputRouter;

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    USBCTRL_IRQ => UsbInterruptHandler<USB>;
});

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// LED chain handle — the tick task mirrors touch state through it and
/// the console collaborator pokes it directly for the `led` commands.
static STRIP: StripHandle = StripHandle::new();

/// Live settings. Written by the console collaborator, read as a
/// snapshot once per tick.
static SETTINGS: Mutex<CriticalSectionRawMutex, RefCell<Settings>> =
    Mutex::new(RefCell::new(Settings::new()));

// ---------------------------------------------------------------------------
// Constants and type aliases
// ---------------------------------------------------------------------------

/// Main loop period. The touch controller refreshes its detection
/// status every few milliseconds; polling faster only re-reads frames.
const TICK_PERIOD: Duration = Duration::from_millis(10);

/// Color of a touched pad's pixel while LED tracking is enabled.
const TRACK_COLOR: Rgb = Rgb::new(0, 24, 40);

/// Concrete I2C type for the touch controller.
type TouchI2c = I2c<'static, I2C0, i2c::Async>;

/// Concrete SPI type for the LED chain.
type StripSpi = Spi<'static, SPI0, spi::Async>;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `strip_flush_task` so it
/// can be spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn led_task(strip: LedStrip<StripSpi>, handle: &'static StripHandle) {
    strip_flush_task(strip, handle).await;
}

/// The main sensor-to-output loop.
///
/// Owns the touch controller (and its reset line, which must stay high
/// for as long as the device runs), the mode selector, and the output
/// router. Exactly one touch frame and one drained flag set are applied
/// per tick, in that order, before any output is produced.
#[embassy_executor::task]
async fn tick_task(
    mut touch: TouchPad<TouchI2c>,
    mut touch_reset: Output<'static>,
    mut router: OutputRouter,
    mut indicator: ModeIndicator,
) {
    // -- Touch controller bring-up ------------------------------------

    // Hardware reset pulse, then the part's post-reset settling time.
    touch_reset.set_low();
    Timer::after_millis(2).await;
    touch_reset.set_high();
    Timer::after_millis(200).await;

    if touch.configure().await.is_err() {
        error!("Touch controller configuration failed");
    }
    if touch.recalibrate().await.is_err() {
        error!("Initial touch calibration failed");
    }

    // -- Startup mode -------------------------------------------------

    let mut queue = OutputQueue::new();
    let mut selector = ModeSelector::new();

    let startup = SETTINGS.lock(|s| s.borrow().startup_mode());
    // The stored index is clamped by the settings layer, so this cannot
    // fail; a no-op queue drain keeps the invariants obvious anyway.
    if selector.select(startup, &mut queue).is_ok() {
        indicator.set_active_mode(startup);
    }
    queue.clear();

    info!("Tick loop started in mode {}", startup);

    // -- Main loop ----------------------------------------------------

    let mut ticker = Ticker::every(TICK_PERIOD);
    let mut tracked = TouchFrame::IDLE;

    loop {
        ticker.next().await;

        // Step 1: one coherent touch frame per tick.
        let frame = match touch.read_frame().await {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Touch read failed: {}", e);
                continue;
            }
        };

        // Step 2: apply the buttons drained for this tick.
        let pressed = buttons::drain();
        if pressed & flags::CALIBRATE != 0 {
            info!("Recalibrating touch controller");
            if touch.recalibrate().await.is_err() {
                warn!("Recalibration failed");
            }
        }
        if pressed & flags::MODE_ADVANCE != 0 {
            let index = selector.advance(&mut queue);
            indicator.set_active_mode(index);
            info!("Mode advanced to {}", index);
        }

        // Step 3: let the active mode turn the frame into output events.
        let settings = SETTINGS.lock(|s| *s.borrow());
        selector.dispatch(frame, &settings, &mut queue);

        // Step 4: push the events out over USB.
        router.route(&queue, settings.report_format()).await;
        queue.clear();

        // Step 5: mirror the pads onto the LED chain.
        if settings.led_tracking() && frame.buttons != tracked.buttons {
            for pad in 0..PAD_COUNT {
                let color = if frame.buttons & (1 << pad) != 0 {
                    TRACK_COLOR
                } else {
                    Rgb::OFF
                };
                STRIP.set_pixel(pad, color);
            }
            STRIP.flush();
        }
        tracked = frame;
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("taktile-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // TOUCH_SDA   → GP20  (I2C0)
    // TOUCH_SCL   → GP21  (I2C0)
    // TOUCH_RST   → GP22  active-low reset, held high in operation
    // LED_SCK     → GP18  (SPI0)
    // LED_MOSI    → GP19  (SPI0)
    // BTN_CAL     → GP5   active-low, pull-up enabled
    // BTN_MODE    → GP6   active-low, pull-up enabled
    // MODE_LED0–4 → GP10–GP14
    // ———————————————————————————————————————————————————————————————————————

    // Touch controller on I2C0.
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let touch = TouchPad::new(i2c, DEFAULT_ADDRESS);
    let touch_reset = Output::new(p.PIN_22, Level::High);

    // LED chain on SPI0, write-only. 1 MHz matches the original design;
    // the chain itself tolerates much more.
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 1_000_000;
    let led_spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, spi_config);
    let strip = LedStrip::new(led_spi);

    // USB composite device.
    let io = usb::init(Driver::new(p.USB, Irqs));
    let router = OutputRouter::new(io.keyboard, io.gamepad, io.midi, io.console);

    // Push buttons, active-low.
    let calibrate_btn = Input::new(p.PIN_5, Pull::Up);
    let mode_btn = Input::new(p.PIN_6, Pull::Up);

    // Mode indicator LEDs.
    let indicator = ModeIndicator::new([
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_14, Level::Low),
    ]);

    // —— Spawn tasks ————————————————————————————————————————————————————————

    spawner.spawn(usb::usb_task(io.device)).unwrap();
    spawner
        .spawn(buttons::button_sample_task(calibrate_btn, mode_btn))
        .unwrap();
    spawner.spawn(led_task(strip, &STRIP)).unwrap();
    spawner
        .spawn(tick_task(touch, touch_reset, router, indicator))
        .unwrap();

    info!("All tasks spawned");
}
