//! Simulated AD525x used by the unit tests.
//!
//! [`RegisterFile`] models the device's instruction decoder: register
//! writes, the read pointer and the command set. [`SimBus`] exposes it through
//! the Wire-style [`Bus`] trait with fault injection; [`SimI2c`] exposes it as
//! an `embedded-hal` (and, with the `async` feature, `embedded-hal-async`)
//! I2C peripheral.

#![allow(dead_code)]

use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use heapless::{Deque, Vec};

use crate::bus::Bus;
use crate::error::BusError;
use crate::registers::{
    BASE_ADDRESS, CMD_DEC_ALL_RDAC_6DB, CMD_DEC_ALL_RDAC_STEP, CMD_DEC_RDAC_6DB, CMD_DEC_RDAC_STEP,
    CMD_INC_ALL_RDAC_6DB, CMD_INC_ALL_RDAC_STEP, CMD_INC_RDAC_6DB, CMD_INC_RDAC_STEP,
    CMD_RESTORE_ALL_RDAC, CMD_RESTORE_RDAC, CMD_STORE_RDAC, EEMEM_REGISTER, RDAC_COUNT,
    TOLERANCE_REGISTER,
};

/// Address of a device with both address pins low.
pub(crate) const DEVICE_ADDRESS: u8 = BASE_ADDRESS;

/// One completed write transaction.
pub(crate) type Frame = Vec<u8, 4>;

// ---------------------------------------------------------------------------
// Register model
// ---------------------------------------------------------------------------

pub(crate) struct RegisterFile {
    bytes: [u8; 64],
    pointer: u8,
    max: u8,
}

impl RegisterFile {
    pub fn new(max: u8) -> Self {
        Self {
            bytes: [0; 64],
            pointer: 0,
            max,
        }
    }

    pub fn get(&self, register: u8) -> u8 {
        self.bytes[register as usize & 0x3F]
    }

    /// Set a register directly, bypassing the bus (e.g. factory tolerance).
    pub fn set(&mut self, register: u8, value: u8) {
        self.bytes[register as usize & 0x3F] = value;
    }

    /// Decode one write frame the way the device does.
    pub fn write(&mut self, frame: &[u8]) {
        let Some((&instruction, data)) = frame.split_first() else {
            return;
        };

        if instruction & 0x80 != 0 {
            self.command(instruction);
            return;
        }

        self.pointer = instruction & 0x3F;
        let read_only = self.pointer >= TOLERANCE_REGISTER;
        if let (Some(&value), false) = (data.first(), read_only) {
            self.set(self.pointer, value);
        }
    }

    /// Next byte at the read pointer.
    pub fn read_next(&mut self) -> u8 {
        let value = self.get(self.pointer);
        self.pointer = (self.pointer + 1) & 0x3F;
        value
    }

    fn command(&mut self, code: u8) {
        let rdac = code & 0x03;
        let all = 0..RDAC_COUNT;
        match code & 0xF8 {
            CMD_RESTORE_RDAC => self.restore(rdac),
            CMD_STORE_RDAC => self.set(EEMEM_REGISTER | rdac, self.get(rdac)),
            CMD_DEC_RDAC_6DB => self.update(rdac, |v, _| v >> 1),
            CMD_DEC_ALL_RDAC_6DB => all.for_each(|r| self.update(r, |v, _| v >> 1)),
            CMD_DEC_RDAC_STEP => self.update(rdac, |v, _| v.saturating_sub(1)),
            CMD_DEC_ALL_RDAC_STEP => all.for_each(|r| self.update(r, |v, _| v.saturating_sub(1))),
            CMD_RESTORE_ALL_RDAC => all.for_each(|r| self.restore(r)),
            CMD_INC_RDAC_6DB => self.update(rdac, double),
            CMD_INC_ALL_RDAC_6DB => all.for_each(|r| self.update(r, double)),
            CMD_INC_RDAC_STEP => self.update(rdac, step_up),
            CMD_INC_ALL_RDAC_STEP => all.for_each(|r| self.update(r, step_up)),
            _ => {}
        }
    }

    fn restore(&mut self, rdac: u8) {
        self.set(rdac, self.get(EEMEM_REGISTER | rdac));
    }

    fn update(&mut self, rdac: u8, f: impl Fn(u8, u8) -> u8) {
        let value = f(self.get(rdac), self.max);
        self.set(rdac, value);
    }
}

fn double(value: u8, max: u8) -> u8 {
    value.saturating_mul(2).min(max)
}

fn step_up(value: u8, max: u8) -> u8 {
    value.saturating_add(1).min(max)
}

// ---------------------------------------------------------------------------
// Wire-style transport
// ---------------------------------------------------------------------------

pub(crate) struct SimBus {
    pub registers: RegisterFile,
    pub address: u8,
    /// Number of `begin()` calls.
    pub begun: usize,
    /// Number of transactions opened (`begin_transmission` + `request_from`).
    pub transactions: usize,
    /// Non-empty frames that reached the device.
    pub frames: Vec<Frame, 32>,
    /// Report this many bytes from every `request_from`.
    pub short_read: Option<usize>,
    /// Fail every `end_transmission` with this error.
    pub fail_writes: Option<BusError>,
    /// Report the requested length from `request_from` but deliver no bytes.
    pub dry_drain: bool,
    target: u8,
    tx: Frame,
    rx: Deque<u8, 4>,
}

impl SimBus {
    pub fn new(address: u8) -> Self {
        Self::with_max(address, 255)
    }

    pub fn with_max(address: u8, max: u8) -> Self {
        Self {
            registers: RegisterFile::new(max),
            address,
            begun: 0,
            transactions: 0,
            frames: Vec::new(),
            short_read: None,
            fail_writes: None,
            dry_drain: false,
            target: 0,
            tx: Vec::new(),
            rx: Deque::new(),
        }
    }
}

impl Bus for SimBus {
    fn begin(&mut self) {
        self.begun += 1;
    }

    fn begin_transmission(&mut self, address: u8) {
        self.transactions += 1;
        self.target = address;
        self.tx.clear();
    }

    fn write(&mut self, byte: u8) -> usize {
        match self.tx.push(byte) {
            Ok(()) => 1,
            Err(_) => 0,
        }
    }

    fn end_transmission(&mut self) -> Result<(), BusError> {
        if self.target != self.address {
            return Err(BusError::NackOnAddress);
        }
        if let Some(error) = self.fail_writes {
            return Err(error);
        }
        if !self.tx.is_empty() {
            self.registers.write(&self.tx);
            let _ = self.frames.push(self.tx.clone());
        }
        Ok(())
    }

    fn request_from(&mut self, address: u8, length: usize) -> usize {
        self.transactions += 1;
        self.rx.clear();
        if address != self.address {
            return 0;
        }
        if self.dry_drain {
            return length;
        }

        let count = self.short_read.unwrap_or(length);
        for _ in 0..count {
            let _ = self.rx.push_back(self.registers.read_next());
        }
        count
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

// ---------------------------------------------------------------------------
// embedded-hal peripheral
// ---------------------------------------------------------------------------

pub(crate) struct SimI2c {
    pub registers: RegisterFile,
    pub address: u8,
    /// NACK any write frame longer than one byte.
    pub nack_data: bool,
    /// Fail zero-length writes with `ErrorKind::Other`, as several HALs do.
    pub reject_empty_writes: bool,
    /// Number of zero-length writes seen.
    pub empty_writes: usize,
    /// Frames that reached the device.
    pub frames: Vec<Frame, 32>,
}

impl SimI2c {
    pub fn new(address: u8) -> Self {
        Self::with_max(address, 255)
    }

    pub fn with_max(address: u8, max: u8) -> Self {
        Self {
            registers: RegisterFile::new(max),
            address,
            nack_data: false,
            reject_empty_writes: false,
            empty_writes: 0,
            frames: Vec::new(),
        }
    }

    fn execute(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    if bytes.is_empty() {
                        self.empty_writes += 1;
                        if self.reject_empty_writes {
                            return Err(ErrorKind::Other);
                        }
                    }
                    if self.nack_data && bytes.len() > 1 {
                        return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
                    }
                    self.registers.write(*bytes);
                    if !bytes.is_empty() {
                        let frame = Vec::from_slice(*bytes).map_err(|_| ErrorKind::Overrun)?;
                        let _ = self.frames.push(frame);
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers.read_next();
                    }
                }
            }
        }
        Ok(())
    }
}

impl ErrorType for SimI2c {
    type Error = ErrorKind;
}

impl embedded_hal::i2c::I2c for SimI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        self.execute(address, operations)
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c for SimI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.execute(address, operations)
    }
}
