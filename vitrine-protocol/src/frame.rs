//! Frame encoding and decoding for the host command channel.
//!
//! Frame layout:
//! - START (1 byte): 0x7E synchronization byte
//! - LENGTH (2 bytes, big-endian): payload length (0-512)
//! - TYPE (1 byte): command type identifier
//! - PAYLOAD (0-512 bytes): command-specific data
//! - CHECKSUM (1 byte): XOR of both LENGTH bytes, TYPE, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x7E;

/// Maximum payload size in bytes
///
/// Sized so one full 240-pixel RGB565 row (480 bytes) plus the write-data
/// header fits in a single frame.
pub const MAX_PAYLOAD_SIZE: usize = 512;

/// Maximum complete frame size on the wire
pub const MAX_FRAME_SIZE: usize = 1 + 2 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Declared length exceeds the payload ceiling
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            msg_type,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u16, msg_type: u8, payload: &[u8]) -> u8 {
        let [len_hi, len_lo] = length.to_be_bytes();
        let mut checksum = len_hi ^ len_lo ^ msg_type;
        for &byte in payload {
            checksum ^= byte;
        }
        checksum
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = 5 + self.payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u16;
        let [len_hi, len_lo] = length.to_be_bytes();

        buffer[0] = FRAME_START;
        buffer[1] = len_hi;
        buffer[2] = len_lo;
        buffer[3] = self.msg_type;
        buffer[4..4 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[4 + self.payload.len()] = Self::checksum(length, self.msg_type, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Byte-at-a-time parser for incoming frames
///
/// Bytes before a START are discarded, so the parser resynchronizes after
/// line garbage. A checksum mismatch drops the frame and returns the parser
/// to the hunting state.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u16,
    msg_type: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for the START byte
    Start,
    /// High length byte
    LengthHigh,
    /// Low length byte
    LengthLow,
    /// Command type byte
    Type,
    /// Payload bytes
    Payload,
    /// Trailing checksum byte
    Checksum,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            buffer: Vec::new(),
            expected_length: 0,
            msg_type: 0,
        }
    }

    /// Reset the parser to the hunting state
    pub fn reset(&mut self) {
        self.state = ParseState::Start;
        self.buffer.clear();
        self.expected_length = 0;
        self.msg_type = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Start => {
                if byte == FRAME_START {
                    self.state = ParseState::LengthHigh;
                }
                Ok(None)
            }
            ParseState::LengthHigh => {
                self.expected_length = (byte as u16) << 8;
                self.state = ParseState::LengthLow;
                Ok(None)
            }
            ParseState::LengthLow => {
                self.expected_length |= byte as u16;
                if self.expected_length as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.buffer.clear();
                self.state = if self.expected_length == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Cannot overflow: expected_length is bounded above
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.expected_length, self.msg_type, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::InvalidChecksum);
                }

                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
