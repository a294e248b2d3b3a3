//! LLCC68 bring-up firmware
//!
//! Drives an LLCC68 LoRa module from an RP2040 through the interface layer:
//! resets the chip, checks it answers on SPI, routes its IRQs to DIO1 and
//! logs every event it raises.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use llcc68_hal_embedded::{EmbeddedInput, EmbeddedOutput, EmbeddedSpiHost};
use llcc68_interface::{BusyLine, ResetLine, SpiTransport};
use {defmt_rtt as _, panic_probe as _};

mod board;
mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("LLCC68 firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = board::interface_config();
    if let Err(e) = config.validate(board::GPIO_COUNT) {
        // Pin map is compiled in; a bad one is a build mistake
        defmt::panic!("Invalid board wiring: {:?}", e);
    }
    info!(
        "SPI1 at {} Hz, mode {}, reset=GPIO{}, busy=GPIO{}",
        config.clock_hz,
        config.mode.number(),
        config.reset,
        config.busy
    );

    // Board-specific pins (see board.rs): SCLK=GPIO10, MOSI=GPIO11, MISO=GPIO12
    let spi = Spi::new_blocking(
        p.SPI1,
        p.PIN_10,
        p.PIN_11,
        p.PIN_12,
        board::spi_config(&config),
    );
    // CS=GPIO13, parked high until the transport claims it
    let cs = Output::new(p.PIN_13, Level::High);
    // RESET=GPIO14, released
    let reset = Output::new(p.PIN_14, Level::High);
    // BUSY=GPIO15, driven by the transceiver
    let busy = Input::new(p.PIN_15, Pull::None);
    // DIO1=GPIO16
    let dio1 = Input::new(p.PIN_16, Pull::Down);

    let host = EmbeddedSpiHost::new(spi, cs, config.device_config());
    let transport = SpiTransport::from_config(host, &config);
    let reset = ResetLine::new(EmbeddedOutput::new(reset));
    let busy = BusyLine::new(EmbeddedInput::new(busy));

    info!("Spawning tasks...");

    spawner.spawn(tasks::dio1_task(dio1)).unwrap();
    spawner
        .spawn(tasks::radio_task(transport, reset, busy))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
