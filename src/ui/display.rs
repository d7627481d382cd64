//! SSD1306 OLED display wrapper.
//!
//! Layout (6×10 font, 128×64):
//!
//! ```text
//! STATUS        SD: OK
//! ─────────────────────
//! RECORDING
//! A:Stop
//! Samples: 120
//! File: REC003.CSV
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::DISPLAY_ADDR;
use crate::ui::feedback::{StatusDisplay, StatusScreen};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_ADDR);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        warn!("Display: init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render the status screen.
pub fn draw_status<I2C>(display: &mut Display<I2C>, screen: &StatusScreen<'_>)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let _ = Text::new("STATUS", Point::new(0, 8), text_style()).draw(display);
    let tag = if screen.storage_ready { "SD: OK" } else { "SD: N/A" };
    let _ = Text::new(tag, Point::new(80, 8), text_style()).draw(display);
    let _ = Line::new(Point::new(0, 10), Point::new(127, 10))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(display);

    let _ = Text::new(screen.title, Point::new(0, 22), text_style()).draw(display);
    let _ = Text::new(screen.detail, Point::new(0, 34), text_style()).draw(display);

    let mut line: String<32> = String::new();
    if let Some(samples) = screen.samples {
        let _ = write!(line, "Samples: {}", samples);
        let _ = Text::new(line.as_str(), Point::new(0, 46), text_style()).draw(display);
    }
    if let Some(file) = screen.file {
        line.clear();
        let _ = write!(line, "File: {}", file);
        let _ = Text::new(line.as_str(), Point::new(0, 58), text_style()).draw(display);
    }

    if display.flush().is_err() {
        warn!("Display: flush failed");
    }
}

/// [`StatusDisplay`] over an SSD1306.
pub struct OledDisplay<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self { display: init(i2c) }
    }
}

impl<I2C> StatusDisplay for OledDisplay<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render(&mut self, screen: &StatusScreen<'_>) {
        draw_status(&mut self.display, screen);
    }
}
