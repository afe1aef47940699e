//! Typed host commands
//!
//! The host addresses each configured display by a small integer id and
//! drives it with three commands: configure, set-window, write-data.
//! Dispatch is over this enum, not over format strings; the decoder
//! validates every field before a handler ever runs.

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Command type IDs
pub const CMD_CONFIGURE_DISPLAY: u8 = 0x40;
pub const CMD_SET_WINDOW: u8 = 0x41;
pub const CMD_WRITE_DATA: u8 = 0x42;

/// Maximum pixel-data burst per write-data frame
///
/// The write-data payload is id (1) + declared length (2) + data.
pub const MAX_DATA_LEN: usize = MAX_PAYLOAD_SIZE - 3;

/// Errors from decoding a frame into a typed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Frame type byte is not a known command
    UnknownCommand(u8),
    /// Payload ended before all fields were read
    Truncated,
    /// Payload has bytes beyond the last field
    TrailingBytes,
    /// Declared write-data length disagrees with the payload
    LengthMismatch,
}

/// Commands from the host, borrowed from a decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand<'a> {
    /// Allocate and initialize a display device
    ConfigureDisplay {
        id: u8,
        dc_pin: u32,
        cs_pin: u32,
        bl_pin: u32,
        spi_bus: u32,
        spi_rate: u32,
    },
    /// Address a rectangle for the next pixel stream
    SetWindow {
        id: u8,
        x_start: u16,
        x_end: u16,
        y_start: u16,
        y_end: u16,
    },
    /// Stream raw RGB565 bytes into the armed window
    WriteData { id: u8, data: &'a [u8] },
}

impl<'a> HostCommand<'a> {
    /// Decode a command from a frame
    pub fn from_frame(frame: &'a Frame) -> Result<Self, DecodeError> {
        let mut r = Reader::new(&frame.payload);
        match frame.msg_type {
            CMD_CONFIGURE_DISPLAY => {
                let cmd = HostCommand::ConfigureDisplay {
                    id: r.read_u8()?,
                    dc_pin: r.read_u32()?,
                    cs_pin: r.read_u32()?,
                    bl_pin: r.read_u32()?,
                    spi_bus: r.read_u32()?,
                    spi_rate: r.read_u32()?,
                };
                r.finish()?;
                Ok(cmd)
            }
            CMD_SET_WINDOW => {
                let cmd = HostCommand::SetWindow {
                    id: r.read_u8()?,
                    x_start: r.read_u16()?,
                    x_end: r.read_u16()?,
                    y_start: r.read_u16()?,
                    y_end: r.read_u16()?,
                };
                r.finish()?;
                Ok(cmd)
            }
            CMD_WRITE_DATA => {
                let id = r.read_u8()?;
                let declared = r.read_u16()? as usize;
                let data = r.rest();
                if data.len() != declared {
                    return Err(DecodeError::LengthMismatch);
                }
                Ok(HostCommand::WriteData { id, data })
            }
            other => Err(DecodeError::UnknownCommand(other)),
        }
    }

    /// Encode this command into a frame (host side, tests, simulation)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut payload = heapless::Vec::<u8, MAX_PAYLOAD_SIZE>::new();
        let msg_type = match self {
            HostCommand::ConfigureDisplay {
                id,
                dc_pin,
                cs_pin,
                bl_pin,
                spi_bus,
                spi_rate,
            } => {
                push(&mut payload, &[*id])?;
                push(&mut payload, &dc_pin.to_be_bytes())?;
                push(&mut payload, &cs_pin.to_be_bytes())?;
                push(&mut payload, &bl_pin.to_be_bytes())?;
                push(&mut payload, &spi_bus.to_be_bytes())?;
                push(&mut payload, &spi_rate.to_be_bytes())?;
                CMD_CONFIGURE_DISPLAY
            }
            HostCommand::SetWindow {
                id,
                x_start,
                x_end,
                y_start,
                y_end,
            } => {
                push(&mut payload, &[*id])?;
                push(&mut payload, &x_start.to_be_bytes())?;
                push(&mut payload, &x_end.to_be_bytes())?;
                push(&mut payload, &y_start.to_be_bytes())?;
                push(&mut payload, &y_end.to_be_bytes())?;
                CMD_SET_WINDOW
            }
            HostCommand::WriteData { id, data } => {
                if data.len() > MAX_DATA_LEN {
                    return Err(FrameError::PayloadTooLarge);
                }
                push(&mut payload, &[*id])?;
                push(&mut payload, &(data.len() as u16).to_be_bytes())?;
                push(&mut payload, data)?;
                CMD_WRITE_DATA
            }
        };
        Frame::new(msg_type, &payload)
    }
}

fn push(payload: &mut heapless::Vec<u8, MAX_PAYLOAD_SIZE>, bytes: &[u8]) -> Result<(), FrameError> {
    payload
        .extend_from_slice(bytes)
        .map_err(|_| FrameError::PayloadTooLarge)
}

/// Big-endian field cursor over a frame payload
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let (&byte, rest) = self.buf.split_first().ok_or(DecodeError::Truncated)?;
        self.buf = rest;
        Ok(byte)
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        if self.buf.len() < 2 {
            return Err(DecodeError::Truncated);
        }
        let (head, rest) = self.buf.split_at(2);
        self.buf = rest;
        Ok(u16::from_be_bytes([head[0], head[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        if self.buf.len() < 4 {
            return Err(DecodeError::Truncated);
        }
        let (head, rest) = self.buf.split_at(4);
        self.buf = rest;
        Ok(u32::from_be_bytes([head[0], head[1], head[2], head[3]]))
    }

    fn rest(self) -> &'a [u8] {
        self.buf
    }

    fn finish(self) -> Result<(), DecodeError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes)
        }
    }
}
