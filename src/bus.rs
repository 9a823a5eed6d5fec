//! Transport seam between the driver and the I2C peripheral.
//!
//! [`Bus`] is a narrow, Wire-style interface: bytes are buffered between
//! `begin_transmission()` and `end_transmission()`, and reads are requested
//! up front then drained one byte at a time. [`I2cBus`] implements it on top
//! of any `embedded-hal` 1.0 blocking I2C peripheral.

use embedded_hal::i2c::{Error as _, I2c};
use heapless::{Deque, Vec};

use crate::error::BusError;

/// Size of the transmit and receive buffers in [`I2cBus`].
pub const WIRE_BUFFER_LENGTH: usize = 32;

/// Byte-oriented I2C transport used by [`Ad525x`](crate::Ad525x).
pub trait Bus {
    /// Start the transport. Must be safe to call more than once.
    fn begin(&mut self);

    /// Open a write transaction to `address` and clear the transmit buffer.
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the open transaction. Returns the number of bytes
    /// queued (0 when the buffer is full).
    fn write(&mut self, byte: u8) -> usize;

    /// Send the queued bytes and close the transaction.
    fn end_transmission(&mut self) -> Result<(), BusError>;

    /// Read `length` bytes from `address` into the receive buffer. Returns the
    /// number of bytes received.
    fn request_from(&mut self, address: u8, length: usize) -> usize;

    /// Number of received bytes not yet consumed by [`read()`](Self::read).
    fn available(&self) -> usize;

    /// Take the next received byte.
    fn read(&mut self) -> Option<u8>;
}

/// [`Bus`] adapter for an `embedded-hal` blocking I2C peripheral.
///
/// Transmit bytes are held until `end_transmission()`, which performs a single
/// I2C write. A transaction that only wraps a `request_from()` has nothing to
/// send and closes without bus traffic, since many HALs reject zero-length
/// writes.
///
/// # Example
///
/// ```no_run
/// use ad525x::{Ad525x, I2cBus};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), ad525x::Error> {
/// let mut pot = Ad525x::ad5254(I2cBus::new(i2c));
/// pot.initialize(0)?;
/// pot.write_wiper(0, 128)?;
/// # Ok(())
/// # }
/// ```
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
    tx: Vec<u8, WIRE_BUFFER_LENGTH>,
    overflowed: bool,
    /// Cleared by `request_from()` inside an open transaction.
    pending_write: bool,
    rx: Deque<u8, WIRE_BUFFER_LENGTH>,
}

impl<I2C> I2cBus<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: Vec::new(),
            overflowed: false,
            pending_write: false,
            rx: Deque::new(),
        }
    }

    /// Give back the wrapped peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Bus for I2cBus<I2C>
where
    I2C: I2c,
{
    /// The peripheral is configured by the HAL before it is handed over, so
    /// there is nothing to start.
    fn begin(&mut self) {}

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.overflowed = false;
        self.pending_write = true;
    }

    fn write(&mut self, byte: u8) -> usize {
        match self.tx.push(byte) {
            Ok(()) => 1,
            Err(_) => {
                self.overflowed = true;
                0
            }
        }
    }

    fn end_transmission(&mut self) -> Result<(), BusError> {
        if self.overflowed {
            self.overflowed = false;
            self.tx.clear();
            return Err(BusError::DataTooLong);
        }

        let pending_write = core::mem::replace(&mut self.pending_write, false);
        if !pending_write && self.tx.is_empty() {
            return Ok(());
        }

        let result = self
            .i2c
            .write(self.address, &self.tx)
            .map_err(|e| BusError::from_kind(e.kind()));
        self.tx.clear();
        result
    }

    fn request_from(&mut self, address: u8, length: usize) -> usize {
        self.rx.clear();
        self.pending_write = false;

        let length = length.min(WIRE_BUFFER_LENGTH);
        let mut buf = [0u8; WIRE_BUFFER_LENGTH];
        if let Err(_e) = self.i2c.read(address, &mut buf[..length]) {
            #[cfg(feature = "defmt")]
            defmt::debug!("ad525x: read from {=u8:#x} failed: {}", address, BusError::from_kind(_e.kind()));
            return 0;
        }

        for &byte in &buf[..length] {
            // Cannot overflow: length is clamped to the queue capacity.
            let _ = self.rx.push_back(byte);
        }
        length
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}
