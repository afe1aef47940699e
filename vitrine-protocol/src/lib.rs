//! Host command protocol for the Vitrine display driver
//!
//! The host drives the display through short binary commands carried over
//! the firmware's command channel. This crate defines the transport frame
//! and the typed commands it carries; the driver crate consumes the typed
//! side only.
//!
//! # Frame format
//!
//! ```text
//! ┌───────┬────────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH(BE) │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 0x7E  │ 2B         │ 1B   │ 0–512B      │ 1B       │
//! └───────┴────────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The two-byte length exists for the write-data command, whose payload
//! carries a burst of raw RGB565 bytes. No command produces a response;
//! failures surface through the dispatcher's error path.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod commands;
pub mod frame;

pub use commands::{DecodeError, HostCommand, MAX_DATA_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
