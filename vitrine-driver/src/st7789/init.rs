//! Register bring-up sequence
//!
//! The ST7789V needs a fixed, ordered register sequence after power-up.
//! The sequence is data, not code: one table interpreted by a single loop,
//! so it runs unchanged against a simulated bus.

use embedded_hal::delay::DelayNs;
use vitrine_hal::{OutputPin, SpiBus};

use super::{cmd, DeviceState, Error, St7789};

/// One entry of the bring-up table: a command, its data bytes, and the
/// settling time the controller needs before the next command.
pub struct InitOp {
    pub cmd: u8,
    pub data: &'static [u8],
    pub settle_ms: u32,
}

/// ST7789V power-up register sequence
///
/// Order is load-bearing: later entries assume register state left by
/// earlier ones. The two settling delays are mandatory; commands issued
/// before they elapse are ignored or misinterpreted by the controller
/// (internal reset in the first case, charge pump and oscillator
/// stabilization in the second).
pub const INIT_SEQUENCE: &[InitOp] = &[
    InitOp {
        cmd: cmd::SWRESET,
        data: &[],
        settle_ms: 5,
    },
    InitOp {
        cmd: cmd::SLPOUT,
        data: &[],
        settle_ms: 120,
    },
    InitOp {
        cmd: cmd::PORCTRL,
        data: &[0x0C, 0x0C, 0x00, 0x33, 0x33],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::GCTRL,
        data: &[0x35],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::VCOMS,
        data: &[0x1F],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::LCMCTRL,
        data: &[0x2C],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::VDVVRHEN,
        data: &[0x01],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::VRHS,
        data: &[0xC3],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::VDVS,
        data: &[0x20],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::FRCTRL2,
        data: &[0x0F],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::PWCTRL1,
        data: &[0xA4, 0xA1],
        settle_ms: 0,
    },
    // Static orientation byte; rotation is the host's problem
    InitOp {
        cmd: cmd::MADCTL,
        data: &[0x00],
        settle_ms: 0,
    },
    // 16-bit RGB565
    InitOp {
        cmd: cmd::COLMOD,
        data: &[0x05],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::NORON,
        data: &[],
        settle_ms: 0,
    },
    InitOp {
        cmd: cmd::DISPON,
        data: &[],
        settle_ms: 0,
    },
];

impl<SPI, PIN> St7789<SPI, PIN>
where
    SPI: SpiBus,
    PIN: OutputPin,
{
    /// Run the controller's power-up sequence
    ///
    /// Blocks for the full duration, dominated by the 125 ms of mandatory
    /// settling. On success the backlight is on and the device is Ready.
    /// A bus error aborts the sequence with the device left Initializing;
    /// there is no mid-sequence recovery.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<SPI::Error>> {
        for op in INIT_SEQUENCE {
            self.send(false, op.cmd).map_err(Error::Bus)?;
            if !op.data.is_empty() {
                self.send_burst(true, op.data).map_err(Error::Bus)?;
            }
            if op.settle_ms > 0 {
                delay.delay_ms(op.settle_ms);
            }
        }

        self.backlight.set_high();
        self.state = DeviceState::Ready;
        Ok(())
    }
}
