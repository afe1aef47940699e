//! ST7789V display driver, host-command side
//!
//! The host streams framebuffer contents to an SPI-attached ST7789V TFT
//! controller through three binary commands: configure-display, set-window,
//! write-data. This crate holds everything between the decoded command and
//! the bus:
//!
//! - [`st7789`] - the device record, transaction framer, register bring-up
//!   sequence, and addressing-window protocol
//! - [`registry`] - id-keyed table of configured devices
//! - [`dispatch`] - per-command handlers and the global shutdown hook
//!
//! The driver is fully synchronous and blocking; one host command runs to
//! completion before the next is dispatched. Hardware access goes through
//! the `vitrine-hal` traits, so everything here runs against a simulated
//! bus on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod dispatch;
pub mod registry;
pub mod st7789;

#[cfg(test)]
mod testutil;

// Re-export key types at crate root for convenience
pub use dispatch::{DispatchError, DisplayDispatcher};
pub use registry::{DisplayRegistry, RegistryError};
pub use st7789::{DeviceState, Error, St7789, HEIGHT, WIDTH};
