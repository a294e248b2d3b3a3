//! DIO1 interrupt task
//!
//! Wakes the radio task whenever DIO1 reports pending IRQ flags. No bus
//! access happens here; reading the IRQ flags needs the transport, which the
//! radio task owns. While DIO1 stays high (flags not cleared yet) the radio
//! task is woken again every `IRQ_RETRY_MS`.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Delay;
use llcc68_interface::IrqLine;

use crate::channels::IRQ_PENDING;

/// Re-wake interval while DIO1 is held high (ms)
const IRQ_RETRY_MS: u32 = 20;

#[embassy_executor::task]
pub async fn dio1_task(dio1: Input<'static>) {
    info!("DIO1 task started");

    let mut irq = IrqLine::new(dio1);
    loop {
        match irq.wait_pending(&mut Delay, IRQ_RETRY_MS).await {
            Ok(()) => {
                trace!("DIO1 high");
                IRQ_PENDING.signal(());
            }
            Err(e) => warn!("DIO1 wait failed: {:?}", Debug2Format(&e)),
        }
    }
}
