//! Radio task
//!
//! Owns the transport and both GPIO lines. Brings the transceiver out of
//! reset, routes its IRQs to DIO1, then reads and clears IRQ flags each
//! time DIO1 fires, logging every pending event through the dispatcher.
//!
//! A wake-up that cannot be serviced is skipped; DIO1 stays high, so the
//! DIO1 task wakes this task again.

use core::convert::Infallible;

use defmt::*;
use embassy_time::Delay;
use llcc68_hal_embedded::log::DefmtSink;
use llcc68_hal_embedded::SpiHostError;
use llcc68_interface::gpio::RESET_HOLD_MS;
use llcc68_interface::{
    delay_ms, BusyLine, EventDispatcher, GpioError, IrqEvent, ResetLine, SpiTransport,
    TransportError,
};

use crate::board::{RadioBusy, RadioHost, RadioReset};
use crate::channels::IRQ_PENDING;

// Command opcodes used during bring-up
const CMD_GET_STATUS: u8 = 0xC0;
const CMD_GET_IRQ_STATUS: u8 = 0x12;
const CMD_CLEAR_IRQ_STATUS: u8 = 0x02;
const CMD_SET_DIO_IRQ_PARAMS: u8 = 0x08;

/// Busy polls before giving up (1 ms apart)
const BUSY_POLL_LIMIT: u32 = 100;

type HostError = SpiHostError<embassy_rp::spi::Error, Infallible>;

/// Bring-up failure
#[derive(Debug)]
enum BringUpError {
    Gpio(GpioError<Infallible>),
    Transport(TransportError<HostError>),
    BusyTimeout,
}

impl From<GpioError<Infallible>> for BringUpError {
    fn from(e: GpioError<Infallible>) -> Self {
        BringUpError::Gpio(e)
    }
}

impl From<TransportError<HostError>> for BringUpError {
    fn from(e: TransportError<HostError>) -> Self {
        BringUpError::Transport(e)
    }
}

#[embassy_executor::task]
pub async fn radio_task(
    mut transport: SpiTransport<RadioHost>,
    mut reset: ResetLine<RadioReset>,
    mut busy: BusyLine<RadioBusy>,
) {
    info!("Radio task started");

    if let Err(e) = bring_up(&mut transport, &mut reset, &mut busy).await {
        error!("LLCC68 bring-up failed: {:?}", Debug2Format(&e));
        shut_down(&mut transport, &mut reset, &mut busy);
        return;
    }

    let dispatcher = EventDispatcher::new(DefmtSink);

    loop {
        IRQ_PENDING.wait().await;

        if !wait_ready(&mut busy).await {
            warn!("Busy line stuck high, retrying on next wake-up");
            continue;
        }

        let mut response = [0u8; 4];
        if let Err(e) = transport.exchange(&[CMD_GET_IRQ_STATUS, 0x00, 0x00, 0x00], &mut response) {
            warn!("GetIrqStatus failed: {:?}", Debug2Format(&e));
            continue;
        }

        let status = u16::from_be_bytes([response[2], response[3]]);
        debug!("IRQ status {=u16:#x}", status);
        dispatcher.dispatch_status(status, &[]);

        let [hi, lo] = status.to_be_bytes();
        if let Err(e) = transport.write(&[CMD_CLEAR_IRQ_STATUS, hi, lo]) {
            warn!("ClearIrqStatus failed: {:?}", Debug2Format(&e));
        }
    }
}

/// Claim the lines and bus, reset the chip and enable IRQ routing
async fn bring_up(
    transport: &mut SpiTransport<RadioHost>,
    reset: &mut ResetLine<RadioReset>,
    busy: &mut BusyLine<RadioBusy>,
) -> Result<(), BringUpError> {
    reset.init()?;
    busy.init()?;
    transport.open()?;
    info!("SPI transport open");

    reset.pulse(&mut Delay, RESET_HOLD_MS).await?;
    if !wait_ready(busy).await {
        return Err(BringUpError::BusyTimeout);
    }

    let mut response = [0u8; 2];
    transport.exchange(&[CMD_GET_STATUS, 0x00], &mut response)?;
    let chip_mode = (response[1] >> 4) & 0x07;
    info!("LLCC68 ready, chip mode {}", chip_mode);

    // Raise the events the dispatcher knows about on DIO1 only
    let mask = irq_mask();
    let [hi, lo] = mask.to_be_bytes();
    transport.write(&[
        CMD_SET_DIO_IRQ_PARAMS,
        hi,
        lo, // IRQ enable
        hi,
        lo, // DIO1
        0x00,
        0x00, // DIO2
        0x00,
        0x00, // DIO3
    ])?;
    debug!("DIO1 IRQ mask {=u16:#x}", mask);

    Ok(())
}

/// Mask of every IRQ with a named event
fn irq_mask() -> u16 {
    [
        IrqEvent::TxDone,
        IrqEvent::RxDone,
        IrqEvent::PreambleDetected,
        IrqEvent::SyncWordValid,
        IrqEvent::HeaderValid,
        IrqEvent::HeaderError,
        IrqEvent::CrcError,
        IrqEvent::CadDone,
        IrqEvent::CadDetected,
        IrqEvent::Timeout,
    ]
    .iter()
    .fold(0, |mask, event| mask | event.code())
}

/// Poll the busy line until it clears
async fn wait_ready(busy: &mut BusyLine<RadioBusy>) -> bool {
    for _ in 0..BUSY_POLL_LIMIT {
        if !busy.is_busy() {
            return true;
        }
        delay_ms(1).await;
    }
    !busy.is_busy()
}

/// Release everything after a failed bring-up
fn shut_down(
    transport: &mut SpiTransport<RadioHost>,
    reset: &mut ResetLine<RadioReset>,
    busy: &mut BusyLine<RadioBusy>,
) {
    if let Err(e) = transport.close() {
        warn!("Transport teardown: {:?}", Debug2Format(&e));
    }
    if let Err(e) = reset.deinit() {
        warn!("Reset line deinit: {:?}", Debug2Format(&e));
    }
    if let Err(e) = busy.deinit() {
        warn!("Busy line deinit: {:?}", Debug2Format(&e));
    }
}
