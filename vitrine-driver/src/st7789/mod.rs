//! ST7789V TFT controller driver
//!
//! One `St7789` value is one configured panel: the bus handle, the three
//! output lines, the lifecycle state, and the byte budget of the armed
//! window. Every controller access goes through the private framer
//! (`send`/`send_burst`); nothing else touches the select lines.

use vitrine_hal::{OutputPin, SpiBus};

pub mod init;

/// Panel width in pixels
pub const WIDTH: u16 = 240;
/// Panel height in pixels
pub const HEIGHT: u16 = 320;

/// Bytes per pixel (RGB565)
pub const BYTES_PER_PIXEL: u32 = 2;

/// ST7789V command bytes
pub(crate) mod cmd {
    pub const SWRESET: u8 = 0x01; // Software reset
    pub const SLPOUT: u8 = 0x11; // Sleep out
    pub const NORON: u8 = 0x13; // Normal display mode on
    pub const DISPOFF: u8 = 0x28; // Display off
    pub const DISPON: u8 = 0x29; // Display on
    pub const CASET: u8 = 0x2A; // Column address set
    pub const RASET: u8 = 0x2B; // Row address set
    pub const RAMWR: u8 = 0x2C; // Memory write
    pub const MADCTL: u8 = 0x36; // Memory access control
    pub const COLMOD: u8 = 0x3A; // Pixel format
    pub const PORCTRL: u8 = 0xB2; // Porch timing control
    pub const GCTRL: u8 = 0xB7; // Gate control
    pub const VCOMS: u8 = 0xBB; // VCOM setting
    pub const LCMCTRL: u8 = 0xC0; // LCM control
    pub const VDVVRHEN: u8 = 0xC2; // VDV/VRH enable
    pub const VRHS: u8 = 0xC3; // VRH set
    pub const VDVS: u8 = 0xC4; // VDV set
    pub const FRCTRL2: u8 = 0xC6; // Frame rate control
    pub const PWCTRL1: u8 = 0xD0; // Power control 1
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Window bounds out of order (`x_start > x_end` or `y_start > y_end`)
    InvalidWindow,
    /// Data burst exceeds the armed window's remaining byte budget
    StreamOverrun,
    /// Device is not in the Ready state
    NotReady,
    /// Bus transfer failed; no retry, the half-written state is undefined
    Bus(E),
}

/// Device lifecycle state
///
/// Unconfigured is represented by absence from the registry. `Off` is
/// terminal; shutdown is reachable from every state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Register bring-up in progress
    Initializing,
    /// Accepting window and pixel-stream commands
    Ready,
    /// Display off, backlight off
    Off,
}

impl DeviceState {
    /// Check if window/stream commands are accepted
    pub fn is_ready(&self) -> bool {
        matches!(self, DeviceState::Ready)
    }

    /// Check if this is the terminal state
    pub fn is_off(&self) -> bool {
        matches!(self, DeviceState::Off)
    }
}

/// One configured ST7789V panel
pub struct St7789<SPI, PIN> {
    spi: SPI,
    /// Data/command select line (high = data)
    dc: PIN,
    /// Device select line (active low)
    cs: PIN,
    backlight: PIN,
    state: DeviceState,
    /// Bytes the armed window still accepts
    window_remaining: u64,
}

impl<SPI, PIN> St7789<SPI, PIN>
where
    SPI: SpiBus,
    PIN: OutputPin,
{
    /// Wrap freshly claimed lines and bus into an uninitialized device
    ///
    /// The device accepts no commands until [`init`](Self::init) completes.
    pub fn new(spi: SPI, dc: PIN, cs: PIN, backlight: PIN) -> Self {
        Self {
            spi,
            dc,
            cs,
            backlight,
            state: DeviceState::Initializing,
            window_remaining: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Bytes the armed window still accepts
    pub fn window_remaining(&self) -> u64 {
        self.window_remaining
    }

    /// Frame one bus transaction: one command byte or one data burst
    ///
    /// The data/command level is fixed before the select line asserts and
    /// held until it releases. The select line is released on the bus-error
    /// path too, so it never stays asserted across a return.
    fn send_burst(&mut self, is_data: bool, bytes: &[u8]) -> Result<(), SPI::Error> {
        self.dc.set_state(is_data);
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result
    }

    fn send(&mut self, is_data: bool, byte: u8) -> Result<(), SPI::Error> {
        self.send_burst(is_data, &[byte])
    }

    /// Send a command byte
    fn command(&mut self, command: u8) -> Result<(), SPI::Error> {
        self.send(false, command)
    }

    /// Address a rectangle and arm the controller for a pixel stream
    ///
    /// Bounds are 16-bit inclusive and must be ordered; they are validated
    /// before any byte reaches the controller. On success the window
    /// accepts exactly `2 * width * height` bytes of RGB565 data.
    pub fn set_window(
        &mut self,
        x_start: u16,
        x_end: u16,
        y_start: u16,
        y_end: u16,
    ) -> Result<(), Error<SPI::Error>> {
        if !self.state.is_ready() {
            return Err(Error::NotReady);
        }
        if x_start > x_end || y_start > y_end {
            return Err(Error::InvalidWindow);
        }

        let [xs_hi, xs_lo] = x_start.to_be_bytes();
        let [xe_hi, xe_lo] = x_end.to_be_bytes();
        self.command(cmd::CASET).map_err(Error::Bus)?;
        self.send_burst(true, &[xs_hi, xs_lo, xe_hi, xe_lo])
            .map_err(Error::Bus)?;

        let [ys_hi, ys_lo] = y_start.to_be_bytes();
        let [ye_hi, ye_lo] = y_end.to_be_bytes();
        self.command(cmd::RASET).map_err(Error::Bus)?;
        self.send_burst(true, &[ys_hi, ys_lo, ye_hi, ye_lo])
            .map_err(Error::Bus)?;

        // RAMWR arms the controller; it auto-increments through the
        // rectangle from the next data burst on.
        self.command(cmd::RAMWR).map_err(Error::Bus)?;

        let width = (x_end - x_start) as u64 + 1;
        let height = (y_end - y_start) as u64 + 1;
        self.window_remaining = width * height * BYTES_PER_PIXEL as u64;
        Ok(())
    }

    /// Stream raw RGB565 bytes into the armed window as one data burst
    ///
    /// A burst beyond the window's remaining byte budget is rejected before
    /// anything is sent; the controller's silent wrap-around is never
    /// reached. A write with no armed window rejects the same way.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), Error<SPI::Error>> {
        if !self.state.is_ready() {
            return Err(Error::NotReady);
        }
        if data.len() as u64 > self.window_remaining {
            return Err(Error::StreamOverrun);
        }

        self.send_burst(true, data).map_err(Error::Bus)?;
        self.window_remaining -= data.len() as u64;
        Ok(())
    }

    /// Turn the panel off
    ///
    /// Emergency-stop path: callable in every lifecycle state, never
    /// blocks on a broken bus. The display-off command is best-effort; the
    /// backlight line goes low regardless.
    pub fn shutdown(&mut self) {
        let _ = self.command(cmd::DISPOFF);
        self.backlight.set_low();
        self.state = DeviceState::Off;
    }
}
