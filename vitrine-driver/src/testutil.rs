//! Shared mocks for driver tests
//!
//! Pins, bus, delay, and board all append into one ordered trace, so tests
//! can assert the exact interleaving of line toggles, transfers, and
//! settling delays.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use vitrine_hal::{ClaimError, DisplayBoard, OutputPin, SpiBus, SpiConfig};

/// One observable hardware action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PinSet { pin: u32, high: bool },
    SpiWrite { bus: u32, bytes: Vec<u8> },
    DelayMs(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Replay a trace into framed transactions `(is_data, bytes)`
///
/// Panics if any transfer happens with the select line released, so every
/// test that goes through here also checks the framing discipline.
pub fn transactions(events: &[Event], dc: u32, cs: u32) -> Vec<(bool, Vec<u8>)> {
    let mut dc_level = false;
    let mut selected = false;
    let mut out = Vec::new();
    for event in events {
        match event {
            Event::PinSet { pin, high } if *pin == dc => {
                assert!(!selected, "data/command line changed mid-transaction");
                dc_level = *high;
            }
            Event::PinSet { pin, high } if *pin == cs => selected = !high,
            Event::SpiWrite { bytes, .. } => {
                assert!(selected, "transfer with select line released");
                out.push((dc_level, bytes.clone()));
            }
            _ => {}
        }
    }
    assert!(!selected, "select line left asserted");
    out
}

pub struct TracePin {
    pub pin: u32,
    high: bool,
    trace: Trace,
}

impl TracePin {
    pub fn new(trace: &Trace, pin: u32) -> Self {
        Self {
            pin,
            high: false,
            trace: trace.clone(),
        }
    }
}

impl OutputPin for TracePin {
    fn set_high(&mut self) {
        self.high = true;
        self.trace.borrow_mut().push(Event::PinSet {
            pin: self.pin,
            high: true,
        });
    }

    fn set_low(&mut self) {
        self.high = false;
        self.trace.borrow_mut().push(Event::PinSet {
            pin: self.pin,
            high: false,
        });
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Bus fault injected by tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

pub struct TraceSpi {
    pub bus: u32,
    pub config: SpiConfig,
    /// Fail the Nth write from now (0 = next write)
    pub fail_after: Option<usize>,
    trace: Trace,
}

impl TraceSpi {
    pub fn new(trace: &Trace, bus: u32) -> Self {
        Self {
            bus,
            config: SpiConfig::mode0(1_000_000),
            fail_after: None,
            trace: trace.clone(),
        }
    }
}

impl SpiBus for TraceSpi {
    type Error = BusFault;

    fn write(&mut self, data: &[u8]) -> Result<(), BusFault> {
        if let Some(remaining) = self.fail_after {
            if remaining == 0 {
                return Err(BusFault);
            }
            self.fail_after = Some(remaining - 1);
        }
        self.trace.borrow_mut().push(Event::SpiWrite {
            bus: self.bus,
            bytes: data.to_vec(),
        });
        Ok(())
    }
}

pub struct TraceDelay {
    trace: Trace,
}

impl TraceDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for TraceDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace
            .borrow_mut()
            .push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.borrow_mut().push(Event::DelayMs(ms));
    }
}

/// Board with 30 numbered pins and 2 buses, all recording into one trace
pub struct TraceBoard {
    pub trace: Trace,
    pub claimed_pins: Vec<u32>,
    pub claimed_buses: Vec<u32>,
    /// Injected into the next claimed bus
    pub spi_fail_after: Option<usize>,
}

const PIN_COUNT: u32 = 30;
const BUS_COUNT: u32 = 2;

impl TraceBoard {
    pub fn new() -> Self {
        Self {
            trace: new_trace(),
            claimed_pins: Vec::new(),
            claimed_buses: Vec::new(),
            spi_fail_after: None,
        }
    }
}

impl DisplayBoard for TraceBoard {
    type Pin = TracePin;
    type Spi = TraceSpi;

    fn claim_pin(&mut self, pin: u32, initial_high: bool) -> Result<TracePin, ClaimError> {
        if pin >= PIN_COUNT {
            return Err(ClaimError::InvalidPin);
        }
        if self.claimed_pins.contains(&pin) {
            return Err(ClaimError::PinInUse);
        }
        self.claimed_pins.push(pin);

        let mut claimed = TracePin::new(&self.trace, pin);
        claimed.set_state(initial_high);
        Ok(claimed)
    }

    fn claim_spi(&mut self, bus: u32, config: SpiConfig) -> Result<TraceSpi, ClaimError> {
        if bus >= BUS_COUNT {
            return Err(ClaimError::InvalidBus);
        }
        if self.claimed_buses.contains(&bus) {
            return Err(ClaimError::BusInUse);
        }
        self.claimed_buses.push(bus);

        let mut claimed = TraceSpi::new(&self.trace, bus);
        claimed.config = config;
        claimed.fail_after = self.spi_fail_after.take();
        Ok(claimed)
    }
}
