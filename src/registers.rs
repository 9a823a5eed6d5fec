//! Register map, command codes and bus address constants for the AD5253/AD5254.
//!
//! Every instruction byte sent to the device is either a register address
//! (top bit clear) or a command (top bit set):
//! - Register address: `PATTERN | index`, where the pattern selects the
//!   RDAC, EEMEM or tolerance space.
//! - Command: `BASE | rdac_index` for single-RDAC commands, or a fixed code
//!   for commands that act on all four RDACs.

use crate::error::Error;

// ---------------------------------------------------------------------------
// Bus address
// ---------------------------------------------------------------------------

/// Base 7-bit I2C address. The full address is `BASE_ADDRESS | (AD1 << 1) | AD0`.
pub const BASE_ADDRESS: u8 = 0x2C;

/// Largest valid address selector (both address pins high).
pub const MAX_SELECTOR: u8 = 0b11;

/// Build the 2-bit address selector from the levels of the AD1 and AD0 pins.
pub const fn address_selector(ad1: bool, ad0: bool) -> u8 {
    ((ad1 as u8) << 1) | ad0 as u8
}

// ---------------------------------------------------------------------------
// Register spaces
// ---------------------------------------------------------------------------

/// Number of RDAC (wiper) registers.
pub const RDAC_COUNT: u8 = 4;

/// Number of EEMEM registers. The first [`RDAC_COUNT`] hold the stored
/// wiper settings used by the store/restore commands.
pub const EEMEM_COUNT: u8 = 16;

/// RDAC register space, bottom 2 bits select the wiper.
pub const RDAC_REGISTER: u8 = 0x00;

/// EEMEM register space, bottom 4 bits select the slot.
pub const EEMEM_REGISTER: u8 = 0x20;

/// Read-only factory tolerance space. Bits 2..1 select the RDAC, bit 0 the part.
pub const TOLERANCE_REGISTER: u8 = 0x38;

/// Which half of a tolerance value to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TolerancePart {
    /// Sign bit and 7-bit integer magnitude.
    Integer = 0,
    /// 8-bit binary fraction.
    Fraction = 1,
}

/// A register the driver can address.
///
/// Indices are validated when the address byte is computed, not on
/// construction, so out-of-range values surface as [`Error::BadRegister`]
/// at the call site that issues the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Volatile wiper setting, index 0-3.
    Rdac(u8),
    /// Non-volatile memory slot, index 0-15.
    Eemem(u8),
    /// Factory tolerance of an RDAC, index 0-3.
    Tolerance { rdac: u8, part: TolerancePart },
}

impl Register {
    /// Instruction byte that addresses this register.
    ///
    /// # Errors
    /// * [`Error::BadRegister`] if the index is out of range for its space
    pub fn address(self) -> Result<u8, Error> {
        match self {
            Register::Rdac(index) => {
                check_rdac(index)?;
                Ok(RDAC_REGISTER | index)
            }
            Register::Eemem(index) => {
                if index >= EEMEM_COUNT {
                    return Err(Error::BadRegister);
                }
                Ok(EEMEM_REGISTER | index)
            }
            Register::Tolerance { rdac, part } => {
                check_rdac(rdac)?;
                Ok(TOLERANCE_REGISTER | (rdac << 1) | part as u8)
            }
        }
    }
}

pub(crate) fn check_rdac(index: u8) -> Result<(), Error> {
    if index >= RDAC_COUNT {
        return Err(Error::BadRegister);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Return the device to idle.
pub const CMD_NOP: u8 = 0x80;
/// Copy EEMEM slot to RDAC (base, OR with RDAC index).
pub const CMD_RESTORE_RDAC: u8 = 0x88;
/// Copy RDAC to EEMEM slot (base, OR with RDAC index).
pub const CMD_STORE_RDAC: u8 = 0x90;
/// Halve one RDAC (base, OR with RDAC index).
pub const CMD_DEC_RDAC_6DB: u8 = 0x98;
/// Halve all RDACs.
pub const CMD_DEC_ALL_RDAC_6DB: u8 = 0xA0;
/// Decrement one RDAC by one step (base, OR with RDAC index).
pub const CMD_DEC_RDAC_STEP: u8 = 0xA8;
/// Decrement all RDACs by one step.
pub const CMD_DEC_ALL_RDAC_STEP: u8 = 0xB0;
/// Copy EEMEM slots 0-3 to all RDACs.
pub const CMD_RESTORE_ALL_RDAC: u8 = 0xB8;
/// Double one RDAC (base, OR with RDAC index).
pub const CMD_INC_RDAC_6DB: u8 = 0xC0;
/// Double all RDACs.
pub const CMD_INC_ALL_RDAC_6DB: u8 = 0xC8;
/// Increment one RDAC by one step (base, OR with RDAC index).
pub const CMD_INC_RDAC_STEP: u8 = 0xD0;
/// Increment all RDACs by one step.
pub const CMD_INC_ALL_RDAC_STEP: u8 = 0xD8;

/// A device command. Commands carry no data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Nop,
    Restore(u8),
    RestoreAll,
    Store(u8),
    Decrement(u8),
    DecrementAll,
    Decrement6dB(u8),
    DecrementAll6dB,
    Increment(u8),
    IncrementAll,
    Increment6dB(u8),
    IncrementAll6dB,
}

impl Command {
    /// Command byte to send.
    ///
    /// # Errors
    /// * [`Error::BadRegister`] if a single-RDAC command names an RDAC above 3
    pub fn code(self) -> Result<u8, Error> {
        let (base, rdac) = match self {
            Command::Nop => return Ok(CMD_NOP),
            Command::RestoreAll => return Ok(CMD_RESTORE_ALL_RDAC),
            Command::DecrementAll => return Ok(CMD_DEC_ALL_RDAC_STEP),
            Command::DecrementAll6dB => return Ok(CMD_DEC_ALL_RDAC_6DB),
            Command::IncrementAll => return Ok(CMD_INC_ALL_RDAC_STEP),
            Command::IncrementAll6dB => return Ok(CMD_INC_ALL_RDAC_6DB),
            Command::Restore(rdac) => (CMD_RESTORE_RDAC, rdac),
            Command::Store(rdac) => (CMD_STORE_RDAC, rdac),
            Command::Decrement(rdac) => (CMD_DEC_RDAC_STEP, rdac),
            Command::Decrement6dB(rdac) => (CMD_DEC_RDAC_6DB, rdac),
            Command::Increment(rdac) => (CMD_INC_RDAC_STEP, rdac),
            Command::Increment6dB(rdac) => (CMD_INC_RDAC_6DB, rdac),
        };
        check_rdac(rdac)?;
        Ok(base | rdac)
    }
}

// ---------------------------------------------------------------------------
// Device models
// ---------------------------------------------------------------------------

/// Maximum wiper value of the AD5253 (64 positions).
pub const AD5253_MAX: u8 = 63;

/// Maximum wiper value of the AD5254 (256 positions).
pub const AD5254_MAX: u8 = 255;

/// Member of the AD525x family. The two parts differ only in wiper resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Model {
    /// Family without a resolved part. Operations that depend on the wiper
    /// range fail with [`Error::NotImplemented`].
    Generic,
    Ad5253,
    Ad5254,
}

impl Model {
    /// Largest wiper setting accepted by this part.
    ///
    /// # Errors
    /// * [`Error::NotImplemented`] for [`Model::Generic`]
    pub const fn max_wiper_value(self) -> Result<u8, Error> {
        match self {
            Model::Generic => Err(Error::NotImplemented),
            Model::Ad5253 => Ok(AD5253_MAX),
            Model::Ad5254 => Ok(AD5254_MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Addressing ───────────────────────────────────────────────────

    #[test]
    fn address_selector_from_pins() {
        assert_eq!(address_selector(false, false), 0);
        assert_eq!(address_selector(false, true), 1);
        assert_eq!(address_selector(true, false), 2);
        assert_eq!(address_selector(true, true), MAX_SELECTOR);
    }

    #[test]
    fn rdac_addresses() {
        assert_eq!(Register::Rdac(0).address(), Ok(0x00));
        assert_eq!(Register::Rdac(3).address(), Ok(0x03));
        assert_eq!(Register::Rdac(4).address(), Err(Error::BadRegister));
    }

    #[test]
    fn eemem_addresses() {
        assert_eq!(Register::Eemem(0).address(), Ok(0x20));
        assert_eq!(Register::Eemem(15).address(), Ok(0x2F));
        assert_eq!(Register::Eemem(16).address(), Err(Error::BadRegister));
    }

    #[test]
    fn tolerance_addresses_interleave_rdac_and_part() {
        let int = |rdac| Register::Tolerance { rdac, part: TolerancePart::Integer };
        let frac = |rdac| Register::Tolerance { rdac, part: TolerancePart::Fraction };

        assert_eq!(int(0).address(), Ok(0x38));
        assert_eq!(frac(0).address(), Ok(0x39));
        assert_eq!(int(2).address(), Ok(0x3C));
        assert_eq!(frac(3).address(), Ok(0x3F));
        assert_eq!(int(4).address(), Err(Error::BadRegister));
    }

    // ── Commands ─────────────────────────────────────────────────────

    #[test]
    fn single_rdac_commands_or_in_index() {
        assert_eq!(Command::Restore(2).code(), Ok(0x8A));
        assert_eq!(Command::Store(1).code(), Ok(0x91));
        assert_eq!(Command::Decrement6dB(3).code(), Ok(0x9B));
        assert_eq!(Command::Decrement(0).code(), Ok(0xA8));
        assert_eq!(Command::Increment6dB(1).code(), Ok(0xC1));
        assert_eq!(Command::Increment(3).code(), Ok(0xD3));
    }

    #[test]
    fn single_rdac_commands_reject_bad_index() {
        assert_eq!(Command::Store(4).code(), Err(Error::BadRegister));
        assert_eq!(Command::Increment(0xFF).code(), Err(Error::BadRegister));
    }

    #[test]
    fn all_rdac_commands_are_fixed() {
        assert_eq!(Command::Nop.code(), Ok(0x80));
        assert_eq!(Command::DecrementAll6dB.code(), Ok(0xA0));
        assert_eq!(Command::DecrementAll.code(), Ok(0xB0));
        assert_eq!(Command::RestoreAll.code(), Ok(0xB8));
        assert_eq!(Command::IncrementAll6dB.code(), Ok(0xC8));
        assert_eq!(Command::IncrementAll.code(), Ok(0xD8));
    }

    // ── Models ───────────────────────────────────────────────────────

    #[test]
    fn model_max_wiper_values() {
        assert_eq!(Model::Ad5253.max_wiper_value(), Ok(63));
        assert_eq!(Model::Ad5254.max_wiper_value(), Ok(255));
        assert_eq!(Model::Generic.max_wiper_value(), Err(Error::NotImplemented));
    }
}
