//! GPIO button input.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - A - start / stop capture
//!   - B - mount / unmount the SD card
//!
//! Each button is handled by a task on the high-priority interrupt
//! executor. The task waits for a falling edge and hands the timestamp to
//! the shared [`DebouncedInput`], which raises a sticky flag the main loop
//! picks up. No channel: a press made while the loop is busy stays pending.

use crate::ui::input_logic::DebouncedInput;
use crate::ui::ButtonSource;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::Instant;

/// Milliseconds since boot, truncated to the controller's 32-bit clock.
pub fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Watch one button forever.
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(pin: AnyPin, source: ButtonSource, input: &'static DebouncedInput) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Falling edge = press (active-low).
        btn.wait_for_falling_edge().await;

        match input.on_raw_edge(source, now_ms()) {
            Some(event) => info!("Button: {:?} at {} ms", event.source, event.at_ms),
            None => debug!("Button: {:?} bounce", source),
        }
    }
}
