//! Error types for the potentiometer driver.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Errors that can occur when communicating with an AD525x.
///
/// The numeric codes are stable: 1-4 originate in the bus transport, 5-10
/// in the driver's own validation. Code 0 means "no error" and has no
/// variant; see [`Ad525x::error_code()`](crate::Ad525x::error_code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Error {
    /// Outbound payload exceeded the transport's transmit buffer.
    DataTooLong = 1,
    /// The device did not acknowledge its address.
    NackOnAddress = 2,
    /// The device did not acknowledge a data byte.
    NackOnData = 3,
    /// Any other transport failure.
    OtherBusError = 4,
    /// Register index out of range.
    BadRegister = 5,
    /// Wiper value out of range for the device model.
    BadWiperSetting = 6,
    /// The bus returned a different number of bytes than requested.
    BadReadSize = 7,
    /// Address selector outside [0, 3].
    BadDeviceAddress = 8,
    /// Capability queried on [`Model::Generic`](crate::Model::Generic).
    NotImplemented = 9,
    /// Operation attempted before a successful `initialize()`.
    NotInitialized = 10,
}

/// Description reported for code 0.
pub const NO_ERROR_TEXT: &str = "No error.";

impl Error {
    /// Numeric error code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Look up an error by numeric code. Returns `None` for 0 and unknown codes.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Error::DataTooLong),
            2 => Some(Error::NackOnAddress),
            3 => Some(Error::NackOnData),
            4 => Some(Error::OtherBusError),
            5 => Some(Error::BadRegister),
            6 => Some(Error::BadWiperSetting),
            7 => Some(Error::BadReadSize),
            8 => Some(Error::BadDeviceAddress),
            9 => Some(Error::NotImplemented),
            10 => Some(Error::NotInitialized),
            _ => None,
        }
    }

    /// Human-readable description.
    pub const fn description(self) -> &'static str {
        match self {
            Error::DataTooLong => "Data too long to fit in transmit buffer.",
            Error::NackOnAddress => "Received NACK on transmit of address.",
            Error::NackOnData => "Received NACK on transmit of data.",
            Error::OtherBusError => "Other I2C error.",
            Error::BadRegister => "Invalid register passed to function.",
            Error::BadWiperSetting => "Invalid wiper setting.",
            Error::BadReadSize => "Invalid number of bytes read from register.",
            Error::BadDeviceAddress => {
                "Bad device address - device address must be in [0, 3]."
            }
            Error::NotImplemented => "Function not implemented on interface.",
            Error::NotInitialized => "Communication has not been initialized.",
        }
    }

    /// `true` for errors reported by the bus transport rather than the driver.
    pub const fn is_bus_error(self) -> bool {
        (self as u8) <= Error::OtherBusError as u8
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Failure of a single bus transaction, as reported by a [`Bus`](crate::Bus).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    DataTooLong,
    NackOnAddress,
    NackOnData,
    Other,
}

impl BusError {
    /// Classify an `embedded-hal` I2C error.
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusError::NackOnAddress,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusError::NackOnData,
            _ => BusError::Other,
        }
    }

    /// Interpret a Wire-style transmission status byte (0 = success).
    pub fn from_status(status: u8) -> Result<(), Self> {
        match status {
            0 => Ok(()),
            1 => Err(BusError::DataTooLong),
            2 => Err(BusError::NackOnAddress),
            3 => Err(BusError::NackOnData),
            _ => Err(BusError::Other),
        }
    }
}

// Allow ergonomic `?` propagation from transport failures.
impl From<BusError> for Error {
    fn from(error: BusError) -> Self {
        match error {
            BusError::DataTooLong => Error::DataTooLong,
            BusError::NackOnAddress => Error::NackOnAddress,
            BusError::NackOnData => Error::NackOnData,
            BusError::Other => Error::OtherBusError,
        }
    }
}
