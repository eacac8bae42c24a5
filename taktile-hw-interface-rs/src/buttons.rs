//! Fixed-rate sampling of the two push buttons.
//!
//! The sampler task and the main tick share only the [`FLAGS`] latch:
//! the task is the single writer (`fetch_or`), [`drain`] is the single
//! reader (`swap`). The atomic pair gives the same guarantee the
//! original mask-the-timer-interrupt critical section did — no raised
//! flag is ever lost or observed twice.

use core::sync::atomic::{AtomicU8, Ordering};

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use taktile::debounce::{flags, Debouncer};

/// Sampling period, ≈300 Hz. With [`taktile::debounce::HOLD_THRESHOLD`]
/// of 3 a press registers after ~10 ms of stable contact.
const SAMPLE_PERIOD: Duration = Duration::from_micros(3333);

/// Accumulated edge flags, pending until the next [`drain`].
static FLAGS: AtomicU8 = AtomicU8::new(0);

/// Atomically take and clear the accumulated edge flags.
///
/// A second drain with no new presses in between returns 0.
pub fn drain() -> u8 {
    FLAGS.swap(0, Ordering::Relaxed)
}

/// Debounce the calibrate and mode buttons (active low) on a fixed tick.
#[embassy_executor::task]
pub async fn button_sample_task(calibrate: Input<'static>, mode: Input<'static>) {
    let mut debouncer = Debouncer::new([flags::CALIBRATE, flags::MODE_ADVANCE]);
    let mut ticker = Ticker::every(SAMPLE_PERIOD);

    loop {
        ticker.next().await;
        let raised = debouncer.sample([calibrate.is_low(), mode.is_low()]);
        if raised != 0 {
            FLAGS.fetch_or(raised, Ordering::Relaxed);
        }
    }
}
