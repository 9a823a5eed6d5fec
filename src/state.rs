//! Device handle state shared by the blocking and async front ends.
//!
//! Holds everything that is not the transport: the model, the resolved bus
//! address (present only after a successful `initialize()`), and the last
//! error. Validation that must run before any bus traffic lives here so both
//! front ends reject bad arguments in the same order.

use crate::error::Error;
use crate::registers::{Model, Register, BASE_ADDRESS, MAX_SELECTOR, RDAC_COUNT};

pub(crate) struct DeviceState {
    model: Model,
    address: Option<u8>,
    last_error: Option<Error>,
}

impl DeviceState {
    pub const fn new(model: Model) -> Self {
        Self {
            model,
            address: None,
            last_error: None,
        }
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn address(&self) -> Option<u8> {
        self.address
    }

    pub fn last_error(&self) -> Option<Error> {
        self.last_error
    }

    /// Resolve and latch the bus address. A bad selector leaves the handle
    /// uninitialized, even if an earlier call succeeded.
    pub fn initialize(&mut self, selector: u8) -> Result<u8, Error> {
        if selector > MAX_SELECTOR {
            self.address = None;
            return Err(Error::BadDeviceAddress);
        }

        let address = BASE_ADDRESS | selector;
        self.address = Some(address);
        Ok(address)
    }

    /// Store the outcome of a public operation and hand it back.
    pub fn record<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        self.last_error = result.as_ref().err().copied();
        result
    }

    /// Bus address, or [`Error::NotInitialized`].
    pub fn require_address(&self) -> Result<u8, Error> {
        self.address.ok_or(Error::NotInitialized)
    }

    /// Address and register byte for a read of `register`.
    pub fn read_target(&self, register: Register) -> Result<(u8, u8), Error> {
        let address = self.require_address()?;
        Ok((address, register.address()?))
    }

    /// Address and register byte for a wiper write, after range checks.
    pub fn wiper_write(&self, index: u8, value: u8) -> Result<(u8, u8), Error> {
        let (address, register) = self.read_target(Register::Rdac(index))?;
        if value > self.model.max_wiper_value()? {
            return Err(Error::BadWiperSetting);
        }
        Ok((address, register))
    }

    /// Address and register byte for an EEMEM write.
    ///
    /// Slots aliasing an RDAC reject values *below* the model's maximum.
    /// Existing callers depend on this; see DESIGN.md before changing it.
    pub fn nvmem_write(&self, index: u8, value: u8) -> Result<(u8, u8), Error> {
        let (address, register) = self.read_target(Register::Eemem(index))?;
        let max = self.model.max_wiper_value()?;
        if index < RDAC_COUNT && value < max {
            return Err(Error::BadWiperSetting);
        }
        Ok((address, register))
    }
}
