//! Recording doubles shared by the unit tests

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::config::Signal;
use crate::interface::PanelInterface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Ordered log of line transitions, shared between pins
#[derive(Clone, Debug, Default)]
pub struct Trace(Arc<Mutex<Vec<(Signal, Level)>>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, signal: Signal, level: Level) {
        self.0.lock().unwrap().push((signal, level));
    }

    pub fn events(&self) -> Vec<(Signal, Level)> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    /// Data bits latched on each falling clock edge
    pub fn clocked_bits(&self) -> Vec<bool> {
        let mut data = None;
        let mut bits = Vec::new();
        for (signal, level) in self.events() {
            match signal {
                Signal::DataOut => data = Some(level == Level::High),
                Signal::Clock if level == Level::Low => bits.extend(data),
                _ => {}
            }
        }
        bits
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockError;

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mock error")
    }
}

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug)]
pub struct MockPin {
    signal: Signal,
    trace: Trace,
    fail: bool,
}

impl MockPin {
    pub fn new(signal: Signal, trace: &Trace) -> Self {
        Self {
            signal,
            trace: trace.clone(),
            fail: false,
        }
    }

    pub fn failing(signal: Signal, trace: &Trace) -> Self {
        Self {
            fail: true,
            ..Self::new(signal, trace)
        }
    }

    fn drive(&mut self, level: Level) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.trace.push(self.signal, level);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::Low)
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::High)
    }
}

pub type MockLines = crate::lines::Lines<MockPin, MockPin, MockPin, MockPin, MockPin>;

pub fn mock_lines(trace: &Trace) -> MockLines {
    crate::lines::Lines::new(
        MockPin::new(Signal::ChipSelect, trace),
        MockPin::new(Signal::DataOut, trace),
        MockPin::new(Signal::Clock, trace),
        MockPin::new(Signal::Reset, trace),
        MockPin::new(Signal::PowerEnable, trace),
    )
}

/// Counts requested delays instead of sleeping
#[derive(Clone, Debug, Default)]
pub struct MockDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}

/// Interface-level call, recorded by [`MockInterface`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    InitBus,
    Register(u8, u8),
    AssertReset,
    ReleaseReset,
    PowerOn,
    PowerOff,
}

#[derive(Debug, Default)]
pub struct MockInterface {
    pub calls: Vec<Call>,
    /// Fail the register write with this zero-based position
    pub fail_register_at: Option<usize>,
    pub fail_power_off: bool,
    registers_written: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_writes(&self) -> Vec<(u8, u8)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Register(index, value) => Some((*index, *value)),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, call: Call) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }

    pub fn last_position(&self, call: Call) -> Option<usize> {
        self.calls.iter().rposition(|c| *c == call)
    }
}

impl PanelInterface for MockInterface {
    type Error = MockError;

    fn init_bus(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::InitBus);
        Ok(())
    }

    fn write_register(&mut self, index: u8, value: u8) -> Result<(), Self::Error> {
        let position = self.registers_written;
        self.registers_written += 1;
        if self.fail_register_at == Some(position) {
            return Err(MockError);
        }
        self.calls.push(Call::Register(index, value));
        Ok(())
    }

    fn assert_reset(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::AssertReset);
        Ok(())
    }

    fn release_reset(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::ReleaseReset);
        Ok(())
    }

    fn power_on(&mut self) -> Result<(), Self::Error> {
        self.calls.push(Call::PowerOn);
        Ok(())
    }

    fn power_off(&mut self) -> Result<(), Self::Error> {
        if self.fail_power_off {
            return Err(MockError);
        }
        self.calls.push(Call::PowerOff);
        Ok(())
    }
}
