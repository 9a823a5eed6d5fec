//! Driver for the Analog Devices AD5253/AD5254 quad digital potentiometers.
//!
//! The AD5253 (64 positions) and AD5254 (256 positions) each carry four
//! potentiometers (RDACs), sixteen bytes of non-volatile EEMEM and a
//! factory-programmed tolerance per RDAC, all behind an I2C interface.
//!
//! # Architecture
//!
//! - **[`registers`]** — Register map, command codes and device models.
//! - **[`Bus`]** — The narrow, Wire-style transport the driver talks through.
//!   [`I2cBus`] implements it for any `embedded-hal` blocking I2C peripheral.
//! - **`driver`** (crate-private) — The three transaction shapes: command,
//!   register write, register read.
//! - **[`Ad525x`]** (public) — Validated, high-level API.
//! - **[`Ad525xAsync`]** (feature `async`) — The same API over
//!   `embedded-hal-async`.
//!
//! # Quick start
//!
//! ```no_run
//! use ad525x::{address_selector, Ad525x, I2cBus};
//!
//! # fn example(i2c: impl embedded_hal::i2c::I2c) -> Result<(), ad525x::Error> {
//! let mut pot = Ad525x::ad5254(I2cBus::new(i2c));
//! pot.initialize(address_selector(false, false))?;
//!
//! pot.write_wiper(0, 128)?;
//! pot.increment_one_6db(0)?;
//! let wipers = pot.read_all_wipers()?;
//! # Ok(())
//! # }
//! ```
//!
//! Every operation returns a `Result`; the driver additionally remembers the
//! outcome of the last call ([`Ad525x::last_error`], [`Ad525x::error_code`]).
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] on public types and debug/warning logs
//!   on initialization and bus failures.
//! - **`async`** — [`Ad525xAsync`] over `embedded-hal-async`.

#![no_std]

pub use bus::{Bus, I2cBus, WIRE_BUFFER_LENGTH};
pub use error::{BusError, Error};
pub use potentiometer::Ad525x;
pub use registers::{
    address_selector, Command, Model, Register, TolerancePart, AD5253_MAX, AD5254_MAX,
    BASE_ADDRESS, EEMEM_COUNT, RDAC_COUNT,
};
pub use tolerance::decode_tolerance;

#[cfg(feature = "async")]
pub use asynch::Ad525xAsync;

#[cfg(feature = "async")]
mod asynch;
mod bus;
mod driver;
mod error;
mod potentiometer;
pub mod registers;
mod state;
mod tolerance;

#[cfg(test)]
mod testing;
