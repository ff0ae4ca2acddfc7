//! flowmeter-ui firmware for the nRF52840.
//!
//! # Architecture
//!
//! - Keypad task: GPIOTE edges on four keys -> debounce gate -> [`ui::EVENTS`]
//! - Debounce task: re-arms the keypad after each quiescence interval
//! - Menu task: owns the PCF8553 and the menu, consumes [`ui::EVENTS`]
//!
//! The menu task starts on the splash screen; the first refresh runs the
//! lamp test and the version screen before the totaliser view.

#![no_std]
#![no_main]

mod board;
mod ui;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::temp::{self, Temp};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use flowmeter_ui::config::{FIRMWARE_VERSION, LCD_SPI_FREQUENCY_HZ};
use flowmeter_ui::lcd::pcf8553::Pcf8553Bus;
use flowmeter_ui::{DisplayEvent, Lcd, Menu};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    TEMP => temp::InterruptHandler;
});

/// Nearest SPIM clock at or below the configured rate.
fn spim_frequency(hz: u32) -> spim::Frequency {
    match hz {
        8_000_000.. => spim::Frequency::M8,
        4_000_000.. => spim::Frequency::M4,
        2_000_000.. => spim::Frequency::M2,
        1_000_000.. => spim::Frequency::M1,
        500_000.. => spim::Frequency::K500,
        250_000.. => spim::Frequency::K250,
        _ => spim::Frequency::K125,
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    let (major, minor, patch) = FIRMWARE_VERSION;
    info!("flowmeter-ui {}.{}.{} starting", major, minor, patch);

    // Keypad, in KEY_LINES order.
    let lines = [
        Input::new(p.P0_11, Pull::Up),
        Input::new(p.P0_12, Pull::Up),
        Input::new(p.P0_24, Pull::Up),
        Input::new(p.P0_25, Pull::Up),
    ];

    // PCF8553: write-only SPI, CE active low.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim_frequency(LCD_SPI_FREQUENCY_HZ);
    let spi = Spim::new_txonly(p.SPI3, Irqs, p.P0_19, p.P0_20, spi_config);
    let ce = Output::new(p.P0_21, Level::High, OutputDrive::Standard);
    let rst = Output::new(p.P0_22, Level::High, OutputDrive::Standard);
    let device = ExclusiveDevice::new_no_delay(spi, ce).unwrap_or_else(|e| match e {});
    let menu = Menu::new(Lcd::new(Pcf8553Bus::new(device, rst, Delay)));

    let board = board::Board::new(Temp::new(p.TEMP, Irqs));

    unwrap!(spawner.spawn(ui::keypad::keypad_task(lines)));
    unwrap!(spawner.spawn(ui::keypad::debounce_task()));
    unwrap!(spawner.spawn(ui::runner::menu_task(menu, board)));

    // First event: run the splash screen without waiting a refresh period.
    ui::EVENTS.send(DisplayEvent::RefreshTick).await;
    info!("Startup complete");
}
