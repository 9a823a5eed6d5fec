//! Async front end over `embedded-hal-async` I2C.
//!
//! [`Ad525xAsync`] mirrors [`Ad525x`](crate::Ad525x) operation for operation,
//! with the same validation order and error codes. Transactions go straight
//! to the peripheral: register reads are a one-byte write followed by a
//! separate read, the same traffic the blocking driver produces through
//! [`I2cBus`](crate::I2cBus).

use embedded_hal::i2c::Error as _;
use embedded_hal_async::i2c::I2c;

use crate::error::{BusError, Error, NO_ERROR_TEXT};
use crate::registers::{Command, Model, Register, TolerancePart, RDAC_COUNT};
use crate::state::DeviceState;
use crate::tolerance::decode_tolerance;

/// Async driver for one AD525x.
///
/// # Example
///
/// ```no_run
/// use ad525x::Ad525xAsync;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) -> Result<(), ad525x::Error> {
/// let mut pot = Ad525xAsync::ad5254(i2c);
/// pot.initialize(0)?;
/// pot.write_wiper(0, 128).await?;
/// let wipers = pot.read_all_wipers().await?;
/// # Ok(())
/// # }
/// ```
pub struct Ad525xAsync<I2C> {
    i2c: I2C,
    state: DeviceState,
}

impl<I2C> Ad525xAsync<I2C>
where
    I2C: I2c,
{
    /// Create an uninitialized driver. No I2C traffic is generated.
    pub fn new(i2c: I2C, model: Model) -> Self {
        Self {
            i2c,
            state: DeviceState::new(model),
        }
    }

    pub fn ad5253(i2c: I2C) -> Self {
        Self::new(i2c, Model::Ad5253)
    }

    pub fn ad5254(i2c: I2C) -> Self {
        Self::new(i2c, Model::Ad5254)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Lifecycle and error state
    // -----------------------------------------------------------------------

    /// Resolve the device address from the `(AD1 << 1) | AD0` selector.
    ///
    /// The peripheral needs no start-up, so this generates no I2C traffic.
    ///
    /// # Errors
    /// * [`Error::BadDeviceAddress`] if `selector > 3`
    pub fn initialize(&mut self, selector: u8) -> Result<(), Error> {
        let result = self.state.initialize(selector).map(|_address| {
            #[cfg(feature = "defmt")]
            defmt::debug!("ad525x: {} initialized at {=u8:#x}", self.state.model(), _address);
        });
        self.state.record(result)
    }

    pub fn is_initialized(&self) -> bool {
        self.state.address().is_some()
    }

    pub fn address(&self) -> Option<u8> {
        self.state.address()
    }

    pub fn model(&self) -> Model {
        self.state.model()
    }

    /// Largest wiper value accepted by this model.
    pub fn max_wiper_value(&mut self) -> Result<u8, Error> {
        let result = self.state.model().max_wiper_value();
        self.state.record(result)
    }

    pub fn last_error(&self) -> Option<Error> {
        self.state.last_error()
    }

    pub fn error_code(&self) -> u8 {
        self.state.last_error().map_or(0, Error::code)
    }

    pub fn error_text(&self) -> &'static str {
        self.state.last_error().map_or(NO_ERROR_TEXT, Error::description)
    }

    // -----------------------------------------------------------------------
    // Registers
    // -----------------------------------------------------------------------

    /// Set the wiper of one potentiometer. See [`Ad525x::write_wiper`](crate::Ad525x::write_wiper).
    pub async fn write_wiper(&mut self, rdac: u8, value: u8) -> Result<(), Error> {
        let result = match self.state.wiper_write(rdac, value) {
            Ok((address, register)) => self.write(address, &[register, value]).await,
            Err(e) => Err(e),
        };
        self.state.record(result)
    }

    pub async fn read_wiper(&mut self, rdac: u8) -> Result<u8, Error> {
        let result = self.read(Register::Rdac(rdac)).await;
        self.state.record(result)
    }

    /// Read all four wipers; the first error aborts.
    pub async fn read_all_wipers(&mut self) -> Result<[u8; 4], Error> {
        let mut wipers = [0u8; RDAC_COUNT as usize];
        for (rdac, wiper) in (0..RDAC_COUNT).zip(wipers.iter_mut()) {
            *wiper = self.read_wiper(rdac).await?;
        }
        Ok(wipers)
    }

    /// Write a non-volatile memory slot. See [`Ad525x::write_nvmem`](crate::Ad525x::write_nvmem).
    pub async fn write_nvmem(&mut self, slot: u8, value: u8) -> Result<(), Error> {
        let result = match self.state.nvmem_write(slot, value) {
            Ok((address, register)) => self.write(address, &[register, value]).await,
            Err(e) => Err(e),
        };
        self.state.record(result)
    }

    pub async fn read_nvmem(&mut self, slot: u8) -> Result<u8, Error> {
        let result = self.read(Register::Eemem(slot)).await;
        self.state.record(result)
    }

    /// Factory R_AB tolerance in signed percent.
    pub async fn read_tolerance(&mut self, rdac: u8) -> Result<f32, Error> {
        let result = self.read_tolerance_parts(rdac).await;
        self.state.record(result)
    }

    async fn read_tolerance_parts(&mut self, rdac: u8) -> Result<f32, Error> {
        let integer = self
            .read(Register::Tolerance {
                rdac,
                part: TolerancePart::Integer,
            })
            .await?;
        let fraction = self
            .read(Register::Tolerance {
                rdac,
                part: TolerancePart::Fraction,
            })
            .await?;
        Ok(decode_tolerance(integer, fraction))
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub async fn command(&mut self, command: Command) -> Result<(), Error> {
        let result = match self.state.require_address() {
            Ok(address) => match command.code() {
                Ok(code) => self.write(address, &[code]).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        self.state.record(result)
    }

    pub async fn reset(&mut self) -> Result<(), Error> {
        self.command(Command::Nop).await
    }

    /// Load one wiper from its EEMEM slot.
    pub async fn restore_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Restore(rdac)).await
    }

    /// Load all wipers from EEMEM slots 0–3.
    pub async fn restore_all(&mut self) -> Result<(), Error> {
        self.command(Command::RestoreAll).await
    }

    /// Save one wiper to its EEMEM slot.
    pub async fn store_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Store(rdac)).await
    }

    /// Step one wiper up by one position.
    pub async fn increment_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Increment(rdac)).await
    }

    /// Step one wiper down by one position.
    pub async fn decrement_one(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Decrement(rdac)).await
    }

    /// Double one wiper setting.
    pub async fn increment_one_6db(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Increment6dB(rdac)).await
    }

    /// Halve one wiper setting.
    pub async fn decrement_one_6db(&mut self, rdac: u8) -> Result<(), Error> {
        self.command(Command::Decrement6dB(rdac)).await
    }

    /// Step every wiper up by one position.
    pub async fn increment_all(&mut self) -> Result<(), Error> {
        self.command(Command::IncrementAll).await
    }

    /// Step every wiper down by one position.
    pub async fn decrement_all(&mut self) -> Result<(), Error> {
        self.command(Command::DecrementAll).await
    }

    /// Double every wiper setting.
    pub async fn increment_all_6db(&mut self) -> Result<(), Error> {
        self.command(Command::IncrementAll6dB).await
    }

    /// Halve every wiper setting.
    pub async fn decrement_all_6db(&mut self) -> Result<(), Error> {
        self.command(Command::DecrementAll6dB).await
    }

    // -----------------------------------------------------------------------
    // Bus primitives
    // -----------------------------------------------------------------------

    async fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Error> {
        self.i2c
            .write(address, bytes)
            .await
            .map_err(|e| Error::from(BusError::from_kind(e.kind())))
    }

    async fn read(&mut self, register: Register) -> Result<u8, Error> {
        let (address, register) = self.state.read_target(register)?;
        self.write(address, &[register]).await?;

        let mut buf = [0u8; 1];
        self.i2c
            .read(address, &mut buf)
            .await
            .map_err(|e| Error::from(BusError::from_kind(e.kind())))?;
        Ok(buf[0])
    }
}
