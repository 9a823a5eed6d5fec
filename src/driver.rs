//! Low-level AD525x bus transactions.
//!
//! Every instruction is a short write; reads are a register-pointer write
//! followed by a separate read request. This module is crate-private;
//! consumers use [`Ad525x`](crate::Ad525x) instead.

use crate::bus::Bus;
use crate::error::Error;

/// Owns the transport and issues the three transaction shapes the device
/// understands.
pub(crate) struct BusDriver<B> {
    bus: B,
}

impl<B> BusDriver<B>
where
    B: Bus,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn begin(&mut self) {
        self.bus.begin();
    }

    pub fn release(self) -> B {
        self.bus
    }

    #[cfg(test)]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    // -----------------------------------------------------------------------
    // Transaction primitives
    // -----------------------------------------------------------------------

    /// Send a single command byte.
    pub fn write_command(&mut self, address: u8, code: u8) -> Result<(), Error> {
        self.bus.begin_transmission(address);
        self.bus.write(code);
        self.end(address)
    }

    /// Write `data` to the register at `register`.
    pub fn write_register(&mut self, address: u8, register: u8, data: u8) -> Result<(), Error> {
        self.bus.begin_transmission(address);
        self.bus.write(register);
        self.bus.write(data);
        self.end(address)
    }

    /// Point the device at `register`, then read `buf.len()` bytes.
    ///
    /// The buffer is only valid on `Ok`. A transport that delivers fewer (or
    /// more) bytes than requested fails with [`Error::BadReadSize`].
    pub fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.bus.begin_transmission(address);
        self.bus.write(register);
        self.end(address)?;

        self.bus.begin_transmission(address);
        let received = self.bus.request_from(address, buf.len());
        if received != buf.len() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ad525x@{=u8:#x}: requested {} bytes, bus returned {}",
                address,
                buf.len(),
                received
            );
            return Err(Error::BadReadSize);
        }

        for byte in buf.iter_mut() {
            *byte = self.bus.read().ok_or(Error::BadReadSize)?;
        }

        self.end(address)
    }

    /// Read a single byte from `register`.
    pub fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Error> {
        let mut buf = [0u8; 1];
        self.read_register(address, register, &mut buf)?;
        Ok(buf[0])
    }

    fn end(&mut self, _address: u8) -> Result<(), Error> {
        self.bus.end_transmission().map_err(|e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("ad525x@{=u8:#x}: transmission failed: {}", _address, e);
            Error::from(e)
        })
    }
}
