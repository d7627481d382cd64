//! Common-cathode RGB status LED on three GPIO outputs.

use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive};

use crate::ui::feedback::{Indicator, LedColor};

pub struct RgbLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl RgbLed {
    /// All channels start dark.
    pub fn new(red: AnyPin, green: AnyPin, blue: AnyPin) -> Self {
        Self {
            red: Output::new(red, Level::Low, OutputDrive::Standard),
            green: Output::new(green, Level::Low, OutputDrive::Standard),
            blue: Output::new(blue, Level::Low, OutputDrive::Standard),
        }
    }
}

impl Indicator for RgbLed {
    fn set(&mut self, color: LedColor) {
        let (r, g, b) = color.rgb();
        self.red.set_level(Level::from(r));
        self.green.set_level(Level::from(g));
        self.blue.set_level(Level::from(b));
    }
}
