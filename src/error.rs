/* embcordic | error.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Configuration errors */

/******************************************************************************/

use core::fmt;

/******************************************************************************/

/// Reasons a `"W.F"` fixed-point format descriptor is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The descriptor is not exactly two integers separated by a `.`
    Malformed,
    /// The whole or the fractional bit count is negative
    NegativeBits,
    /// The total bit count (carried) exceeds 64
    TooManyBits(u32)
}

/// Errors raised while configuring the precomputation
///
/// The rotation itself never fails: these can only happen before any table exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid fixed-point format
    Format(FormatError),
    /// The iteration count (carried) is zero or negative
    InvalidIterationCount(i64),
    /// The register type cannot hold the format's storage width
    RegisterTooNarrow {
        /// Storage width required by the format, in bits
        required: u32,
        /// Width of the requested register type, in bits
        provided: u32
    }
}

/******************************************************************************/

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => f.write_str("expected two integers separated by '.'"),
            Self::NegativeBits => f.write_str("number of whole and fractional bits must be non-negative"),
            Self::TooManyBits(total) => write!(f, "total number of bits cannot exceed 64 (got {total})")
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(e) => write!(f, "invalid fixed point format: {e}"),
            Self::InvalidIterationCount(n) => write!(f, "number of iterations must be greater than zero (got {n})"),
            Self::RegisterTooNarrow { required, provided } =>
                write!(f, "format needs a {required}-bit register, but a {provided}-bit one was requested")
        }
    }
}

impl core::error::Error for FormatError {}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            _ => None
        }
    }
}

impl From<FormatError> for Error {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

/******************************************************************************/
