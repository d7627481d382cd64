//! imu-logger firmware entry point (nRF52840).
//!
//! Two executors:
//!   - interrupt executor on EGU1_SWI1 (P6): button edge tasks, so a press
//!     is latched even while the control loop sits in a blocking SD write
//!   - thread-mode executor: the control loop and the buzzer player
//!
//! Build: `cargo build --release --features embedded`

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::{info, unwrap};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_nrf::bind_interrupts;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin as _};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::peripherals::{SPI3, TWISPI0, TWISPI1};
use embassy_nrf::pwm::SimplePwm;
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::twim::{self, Twim};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use imu_logger::config::{BUTTON_DEBOUNCE_MS, LOOP_IDLE_MS, MPU6050_ADDR};
use imu_logger::sensor::mpu6050::Mpu6050;
use imu_logger::storage::sdcard::{sd_card_storage, SdCardStorage};
use imu_logger::ui::buttons::{button_task, now_ms};
use imu_logger::ui::buzzer::{buzzer_task, CueSender};
use imu_logger::ui::display::OledDisplay;
use imu_logger::ui::feedback::Feedback;
use imu_logger::ui::led::RgbLed;
use imu_logger::{ButtonSource, Controller, DebouncedInput};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<TWISPI0>;
    TWISPI1 => twim::InterruptHandler<TWISPI1>;
    SPIM3 => spim::InterruptHandler<SPI3>;
});

type Sensor = Mpu6050<Twim<'static, TWISPI0>, Delay>;
type Card = SdCardStorage<ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, Delay>, Delay>;
type Sink = Feedback<OledDisplay<Twim<'static, TWISPI1>>, RgbLed, CueSender>;
type App = Controller<Sensor, Card, Sink>;

/// Written by the button tasks, drained by the control loop.
static INPUT: DebouncedInput = DebouncedInput::new(BUTTON_DEBOUNCE_MS);

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_HIGH.on_interrupt()
}

#[embassy_executor::task]
async fn control_task(mut app: App) -> ! {
    app.boot(now_ms());

    loop {
        app.poll(now_ms(), &INPUT);
        Timer::after_millis(LOOP_IDLE_MS).await;
    }
}

#[entry]
fn main() -> ! {
    info!("imu-logger starting");
    let p = embassy_nrf::init(Default::default());

    // MPU-6050 on TWIM0
    let mut sensor_cfg = twim::Config::default();
    sensor_cfg.frequency = twim::Frequency::K400;
    let sensor_bus = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, sensor_cfg);
    let sensor = Mpu6050::new(sensor_bus, Delay, MPU6050_ADDR);

    // SSD1306 on TWIM1
    let mut display_cfg = twim::Config::default();
    display_cfg.frequency = twim::Frequency::K400;
    let display_bus = Twim::new(p.TWISPI1, Irqs, p.P0_30, p.P0_31, display_cfg);
    let display = OledDisplay::new(display_bus);

    // SD card on SPIM3
    let mut spi_cfg = spim::Config::default();
    spi_cfg.frequency = spim::Frequency::M2;
    let spi = Spim::new(p.SPI3, Irqs, p.P1_15, p.P1_14, p.P1_13, spi_cfg);
    let cs = Output::new(p.P1_12, Level::High, OutputDrive::Standard);
    let sd_spi = unwrap!(ExclusiveDevice::new(spi, cs, Delay));
    let card = sd_card_storage(sd_spi, Delay);

    let led = RgbLed::new(p.P0_13.degrade(), p.P0_14.degrade(), p.P0_15.degrade());
    let pwm = SimplePwm::new_1ch(p.PWM0, p.P0_16);

    let feedback = Feedback::new(display, led, CueSender);
    let app = Controller::new(sensor, card, feedback);

    // Buttons preempt the control loop.
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    let spawner = EXECUTOR_HIGH.start(interrupt::EGU1_SWI1);
    spawner.must_spawn(button_task(
        p.P0_11.degrade(),
        ButtonSource::StartStop,
        &INPUT,
    ));
    spawner.must_spawn(button_task(
        p.P0_12.degrade(),
        ButtonSource::StorageToggle,
        &INPUT,
    ));

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(move |spawner| {
        spawner.must_spawn(buzzer_task(pwm));
        spawner.must_spawn(control_task(app));
    })
}
