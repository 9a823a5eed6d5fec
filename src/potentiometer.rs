//! High-level interface for the AD5253/AD5254 quad digital potentiometers.
//!
//! [`Ad525x`] wraps the low-level bus driver with initialization tracking,
//! argument validation, register/command encoding and tolerance decoding.

use crate::bus::Bus;
use crate::driver::BusDriver;
use crate::error::{Error, NO_ERROR_TEXT};
use crate::registers::{Command, Model, Register, TolerancePart, RDAC_COUNT};
use crate::state::DeviceState;
use crate::tolerance::decode_tolerance;

/// Blocking driver for one AD525x on an I2C bus.
///
/// Every operation returns a `Result`. The outcome of the most recent
/// operation is also kept on the handle and can be queried with
/// [`last_error()`](Self::last_error) or [`error_code()`](Self::error_code).
///
/// # Example
///
/// ```no_run
/// use ad525x::{Ad525x, I2cBus};
///
/// # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), ad525x::Error> {
/// let mut pot = Ad525x::ad5253(I2cBus::new(i2c));
///
/// // AD1 low, AD0 high
/// pot.initialize(0b01)?;
///
/// pot.write_wiper(2, 32)?;
/// pot.store_one(2)?;
/// let tolerance = pot.read_tolerance(2)?;
/// # Ok(())
/// # }
/// ```
pub struct Ad525x<B> {
    driver: BusDriver<B>,
    state: DeviceState,
}

impl<B> Ad525x<B>
where
    B: Bus,
{
    /// Create an uninitialized driver for `model`.
    ///
    /// No bus traffic is generated. Call [`initialize()`](Self::initialize)
    /// before any register access or command.
    pub fn new(bus: B, model: Model) -> Self {
        Self {
            driver: BusDriver::new(bus),
            state: DeviceState::new(model),
        }
    }

    /// Create an uninitialized driver for an AD5253 (wiper range 0-63).
    pub fn ad5253(bus: B) -> Self {
        Self::new(bus, Model::Ad5253)
    }

    /// Create an uninitialized driver for an AD5254 (wiper range 0-255).
    pub fn ad5254(bus: B) -> Self {
        Self::new(bus, Model::Ad5254)
    }

    /// Consume the driver and give back the transport.
    pub fn release(self) -> B {
        self.driver.release()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Resolve the device address and start the transport.
    ///
    /// May be called again, e.g. to retry after a bad selector.
    ///
    /// # Arguments
    /// * `selector` — `(AD1 << 1) | AD0`, the levels of the two address pins
    ///   (see [`address_selector`](crate::address_selector))
    ///
    /// # Errors
    /// * [`Error::BadDeviceAddress`] if `selector > 3`; the driver is left
    ///   uninitialized
    pub fn initialize(&mut self, selector: u8) -> Result<(), Error> {
        let result = self.state.initialize(selector).map(|_address| {
            self.driver.begin();
            #[cfg(feature = "defmt")]
            defmt::debug!("ad525x: {} initialized at {=u8:#x}", self.state.model(), _address);
        });
        self.state.record(result)
    }

    /// `true` once [`initialize()`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.address().is_some()
    }

    /// Resolved 7-bit bus address, if initialized.
    pub fn address(&self) -> Option<u8> {
        self.state.address()
    }

    pub fn model(&self) -> Model {
        self.state.model()
    }

    /// Largest wiper value accepted by this model.
    ///
    /// # Errors
    /// * [`Error::NotImplemented`] for [`Model::Generic`]
    pub fn max_wiper_value(&mut self) -> Result<u8, Error> {
        let result = self.state.model().max_wiper_value();
        self.state.record(result)
    }

    // -----------------------------------------------------------------------
    // Error state
    // -----------------------------------------------------------------------

    /// Error from the most recent operation, `None` if it succeeded.
    pub fn last_error(&self) -> Option<Error> {
        self.state.last_error()
    }

    /// Numeric code of the most recent operation's error (0 = success).
    pub fn error_code(&self) -> u8 {
        self.state.last_error().map_or(0, Error::code)
    }

    /// Description of the most recent operation's outcome.
    pub fn error_text(&self) -> &'static str {
        self.state.last_error().map_or(NO_ERROR_TEXT, Error::description)
    }

    // -----------------------------------------------------------------------
    // Wiper (RDAC) registers
    // -----------------------------------------------------------------------

    /// Set the wiper of one potentiometer.
    ///
    /// # Arguments
    /// * `rdac` — Potentiometer index (0–3)
    /// * `value` — Wiper setting, 0 to [`max_wiper_value()`](Self::max_wiper_value)
    ///
    /// # Errors
    /// * [`Error::NotInitialized`] before [`initialize()`](Self::initialize)
    /// * [`Error::BadRegister`] if `rdac >= 4`
    /// * [`Error::NotImplemented`] for [`Model::Generic`]
    /// * [`Error::BadWiperSetting`] if `value` exceeds the model's maximum
    /// * Bus errors from the transport, unchanged
    pub fn write_wiper(&mut self, rdac: u8, value: u8) -> Result<(), Error> {
        let result = self
            .state
            .wiper_write(rdac, value)
            .and_then(|(address, register)| self.driver.write_register(address, register, value));
        self.state.record(result)
    }

    /// Read the wiper of one potentiometer.
    ///
    /// # Arguments
    /// * `rdac` — Potentiometer index (0–3)
    ///
    /// # Errors
    /// * [`Error::NotInitialized`] before [`initialize()`](Self::initialize)
    /// * [`Error::BadRegister`] if `rdac >= 4`
    /// * [`Error::BadReadSize`] or bus errors from the transport
    pub fn read_wiper(&mut self, rdac: u8) -> Result<u8, Error> {
        let result = self.read(Register::Rdac(rdac));
        self.state.record(result)
    }

    /// Read all four wipers in sequence.
    ///
    /// Returns the first error encountered; no partial results are returned.
    pub fn read_all_wipers(&mut self) -> Result<[u8; 4], Error> {
        let mut wipers = [0u8; RDAC_COUNT as usize];
        for (rdac, wiper) in (0..RDAC_COUNT).zip(wipers.iter_mut()) {
            *wiper = self.read_wiper(rdac)?;
        }
        Ok(wipers)
    }

    // -----------------------------------------------------------------------
    // Non-volatile (EEMEM) registers
    // -----------------------------------------------------------------------

    /// Write a non-volatile memory slot.
    ///
    /// Slots 0–3 hold the wiper settings used by [`store_one()`](Self::store_one)
    /// and [`restore_one()`](Self::restore_one); writing them does not move
    /// the wiper. Slots 4–15 are free for user data.
    ///
    /// # Errors
    /// * [`Error::NotInitialized`] before [`initialize()`](Self::initialize)
    /// * [`Error::BadRegister`] if `slot >= 16`
    /// * [`Error::NotImplemented`] for [`Model::Generic`]
    /// * [`Error::BadWiperSetting`] if `slot <= 3` and `value` is below the
    ///   model's maximum
    /// * Bus errors from the transport, unchanged
    pub fn write_nvmem(&mut self, slot: u8, value: u8) -> Result<(), Error> {
        let result = self
            .state
            .nvmem_write(slot, value)
            .and_then(|(address, register)| self.driver.write_register(address, register, value));
        self.state.record(result)
    }

    /// Read a non-volatile memory slot (0–15).
    pub fn read_nvmem(&mut self, slot: u8) -> Result<u8, Error> {
        let result = self.read(Register::Eemem(slot));
        self.state.record(result)
    }

    // -----------------------------------------------------------------------
    // Factory tolerance
    // -----------------------------------------------------------------------

    /// Read the factory-measured R_AB tolerance of one potentiometer, in
    /// signed percent.
    ///
    /// Issues two reads (integer part, then fraction); the first failure
    /// aborts.
    ///
    /// # Example
    /// ```no_run
    /// # fn example<B: ad525x::Bus>(pot: &mut ad525x::Ad525x<B>) -> Result<(), ad525x::Error> {
    /// let tolerance = pot.read_tolerance(0)?;
    /// let actual_ohms = 10_000.0 * (1.0 + tolerance / 100.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_tolerance(&mut self, rdac: u8) -> Result<f32, Error> {
        let result = self.read_tolerance_parts(rdac);
        self.state.record(result)
    }

    fn read_tolerance_parts(&mut self, rdac: u8) -> Result<f32, Error> {
        let integer = self.read(Register::Tolerance {
            rdac,
            part: TolerancePart::Integer,
        })?;
        let fraction = self.read(Register::Tolerance {
            rdac,
            part: TolerancePart::Fraction,
        })?;
        Ok(decode_tolerance(integer, fraction))
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Issue a device command.
    ///
    /// # Errors
    /// * [`Error::NotInitialized`] before [`initialize()`](Self::initialize)
    /// * [`Error::BadRegister`] if a single-RDAC command names an RDAC above 3
    /// * Bus errors from the transport, unchanged
    pub fn command(&mut self, command: Command) -> Result<(), Error> {
        let result = self.state.require_address().and_then(|address| {
            let code = command.code()?;
            self.driver.write_command(address, code)
        });
        self.state.record(result)
    }

    /// Return the device to idle (NOP).
    pub fn reset(&mut self) -> Result<(), Error> {
        self.command(Command::Nop)
    }

    /// Load one wiper from its EEMEM slot.
    pub fn restore_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Restore(rdac))
    }

    /// Load all wipers from EEMEM slots 0–3.
    pub fn restore_all(&mut self) -> Result<(), Error> {
        self.command(Command::RestoreAll)
    }

    /// Save one wiper to its EEMEM slot.
    pub fn store_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Store(rdac))
    }

    /// Step one wiper up by one position. The device saturates at full scale.
    pub fn increment_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Increment(rdac))
    }

    /// Step one wiper down by one position. The device saturates at zero.
    pub fn decrement_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Decrement(rdac))
    }

    /// Double one wiper setting.
    pub fn increment_one_6db(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Increment6dB(rdac))
    }

    /// Halve one wiper setting.
    pub fn decrement_one_6db(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Decrement6dB(rdac))
    }

    /// Step every wiper up by one position.
    pub fn increment_all(&mut self) -> Result<(), Error> {
        self.command(Command::IncrementAll)
    }

    /// Step every wiper down by one position.
    pub fn decrement_all(&mut self) -> Result<(), Error> {
        self.command(Command::DecrementAll)
    }

    /// Double every wiper setting.
    pub fn increment_all_6db(&mut self) -> Result<(), Error> {
        self.command(Command::IncrementAll6dB)
    }

    /// Halve every wiper setting.
    pub fn decrement_all_6db(&mut self) -> Result<(), Error> {
        self.command(Command::DecrementAll6dB)
    }

    fn read(&mut self, register: Register) -> Result<u8, Error> {
        let (address, register) = self.state.read_target(register)?;
        self.driver.read_byte(address, register)
    }
}
