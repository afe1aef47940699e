//! Host command handlers
//!
//! One handler per host command, keyed by the id in the command. The
//! dispatcher owns the board seam (pin/bus acquisition) and the device
//! registry; the surrounding firmware feeds it decoded commands and calls
//! [`shutdown`](DisplayDispatcher::shutdown) from its emergency-stop path.

use embedded_hal::delay::DelayNs;
use vitrine_hal::{ClaimError, DisplayBoard, SpiBus, SpiConfig};
use vitrine_protocol::HostCommand;

use crate::registry::{DisplayRegistry, RegistryError};
use crate::st7789::{Error, St7789};

/// Bus error type of a board's SPI handle
pub type BusError<B> = <<B as DisplayBoard>::Spi as SpiBus>::Error;

/// Errors surfaced to the firmware's generic error path
///
/// None of the host commands produces a response; a failed command reports
/// here and the display is left as the partial command left it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError<E> {
    /// Id allocation or lookup failed
    Registry(RegistryError),
    /// Pin or bus acquisition failed
    Claim(ClaimError),
    /// The device rejected the operation or the bus failed
    Device(Error<E>),
}

impl<E> From<RegistryError> for DispatchError<E> {
    fn from(err: RegistryError) -> Self {
        DispatchError::Registry(err)
    }
}

impl<E> From<ClaimError> for DispatchError<E> {
    fn from(err: ClaimError) -> Self {
        DispatchError::Claim(err)
    }
}

impl<E> From<Error<E>> for DispatchError<E> {
    fn from(err: Error<E>) -> Self {
        DispatchError::Device(err)
    }
}

/// Command handlers for up to `N` displays on one board
pub struct DisplayDispatcher<B: DisplayBoard, const N: usize> {
    board: B,
    displays: DisplayRegistry<B::Spi, B::Pin, N>,
}

impl<B: DisplayBoard, const N: usize> DisplayDispatcher<B, N> {
    pub fn new(board: B) -> Self {
        Self {
            board,
            displays: DisplayRegistry::new(),
        }
    }

    /// The device bound to `id`, if any
    pub fn device(&self, id: u8) -> Option<&St7789<B::Spi, B::Pin>> {
        self.displays.get(id).ok()
    }

    /// Execute one host command to completion
    ///
    /// Blocking; for configure-display this spans the full register
    /// bring-up including its settling delays.
    pub fn handle<D: DelayNs>(
        &mut self,
        command: &HostCommand<'_>,
        delay: &mut D,
    ) -> Result<(), DispatchError<BusError<B>>> {
        match command {
            HostCommand::ConfigureDisplay {
                id,
                dc_pin,
                cs_pin,
                bl_pin,
                spi_bus,
                spi_rate,
            } => self.configure(*id, *dc_pin, *cs_pin, *bl_pin, *spi_bus, *spi_rate, delay),
            HostCommand::SetWindow {
                id,
                x_start,
                x_end,
                y_start,
                y_end,
            } => {
                let device = self.displays.get_mut(*id)?;
                device.set_window(*x_start, *x_end, *y_start, *y_end)?;
                Ok(())
            }
            HostCommand::WriteData { id, data } => {
                let device = self.displays.get_mut(*id)?;
                device.write_data(data)?;
                Ok(())
            }
        }
    }

    /// Allocate, acquire lines and bus, and run the bring-up sequence
    ///
    /// Nothing is inserted on failure: a failed configure leaves the panel
    /// in an unspecified state until shutdown or a fresh configure after
    /// firmware restart (there is no mid-sequence recovery).
    #[allow(clippy::too_many_arguments)]
    fn configure<D: DelayNs>(
        &mut self,
        id: u8,
        dc_pin: u32,
        cs_pin: u32,
        bl_pin: u32,
        spi_bus: u32,
        spi_rate: u32,
        delay: &mut D,
    ) -> Result<(), DispatchError<BusError<B>>> {
        self.displays.ensure_vacant(id)?;

        // Line levels before the first transaction: data/command low,
        // select released, backlight off.
        let dc = self.board.claim_pin(dc_pin, false)?;
        let cs = self.board.claim_pin(cs_pin, true)?;
        let backlight = self.board.claim_pin(bl_pin, false)?;
        let spi = self.board.claim_spi(spi_bus, SpiConfig::mode0(spi_rate))?;

        let mut device = St7789::new(spi, dc, cs, backlight);
        device.init(delay)?;
        self.displays.insert(id, device)?;
        Ok(())
    }

    /// Global shutdown / emergency stop
    ///
    /// Turns every configured display off and kills its backlight,
    /// whatever lifecycle state it is in. Never fails, never hangs.
    pub fn shutdown(&mut self) {
        for device in self.displays.iter_mut() {
            device.shutdown();
        }
    }
}
