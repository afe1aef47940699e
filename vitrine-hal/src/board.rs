//! Pin and bus acquisition
//!
//! The configure-display command names its lines and bus by number, the way
//! a host config file does. The surrounding firmware owns the actual
//! peripherals; this trait is the seam through which the driver claims them
//! at configure time.

use crate::gpio::OutputPin;
use crate::spi::{SpiBus, SpiConfig};

/// Error when claiming a pin or bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClaimError {
    /// Pin number not present on this board
    InvalidPin,
    /// Pin already handed out
    PinInUse,
    /// Pin reserved for a special function
    Reserved,
    /// Bus index not present on this board
    InvalidBus,
    /// Bus already handed out
    BusInUse,
}

/// Board-level resource provider for display devices
///
/// Implementations hand out owned, configured handles. A handle is claimed
/// once; there is no release path, matching the firmware-lifetime ownership
/// of configured devices.
pub trait DisplayBoard {
    /// Output line handle
    type Pin: OutputPin;
    /// Configured bus handle
    type Spi: SpiBus;

    /// Claim an output pin by number, driven to `initial_high` before return
    fn claim_pin(&mut self, pin: u32, initial_high: bool) -> Result<Self::Pin, ClaimError>;

    /// Claim a bus by index, configured per `config`
    fn claim_spi(&mut self, bus: u32, config: SpiConfig) -> Result<Self::Spi, ClaimError>;
}
