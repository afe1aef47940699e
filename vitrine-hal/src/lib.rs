//! Vitrine Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the display driver is written
//! against. Chip-specific firmware implements them over its own GPIO and
//! SPI peripherals; host-side tests implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Host command dispatch (vitrine-driver)  │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  vitrine-hal (this crate - traits)       │
//! └──────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  chip HAL     │       │  test mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - the data/command, device-select, and backlight lines
//! - [`spi::SpiBus`] - the synchronous bus-transfer primitive
//! - [`board::DisplayBoard`] - pin/bus acquisition by number at configure time

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use board::{ClaimError, DisplayBoard};
pub use gpio::OutputPin;
pub use spi::{SpiBus, SpiConfig};
