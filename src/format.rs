/* embcordic | format.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Fixed-point format descriptor and quantization */

/******************************************************************************/

use core::fmt;
use core::str::FromStr;

use crate::error::FormatError;

/******************************************************************************/

/// Largest register supported by the generated code
pub const MAX_TOTAL_BITS: u32 = 64;

/// Converts a real value to fixed point with `fractional_bits` fractional bits
///
/// The product `value * 2^fractional_bits` is truncated toward zero, also for negative
/// values: `-0.75` with one fractional bit gives `-1`, not `-2`.
/// Values too large for an `i128` saturate, `NaN` gives `0`.
///
/// `fractional_bits` must be below 128.
pub fn quantize(value: f64, fractional_bits: u32) -> i128 {
    (value * scale(fractional_bits)) as i128
}

/// `2^fractional_bits` as a float (exact, it is a power of two)
pub(crate) fn scale(fractional_bits: u32) -> f64 {
    (1u128 << fractional_bits) as f64
}

/******************************************************************************/

/// Signed register width used to store the fixed-point values
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StorageWidth {
    /// `i8`
    W8,
    /// `i16`
    W16,
    /// `i32`
    W32,
    /// `i64`
    W64
}

impl StorageWidth {
    /// Smallest supported width able to hold `total_bits` bits
    ///
    /// Anything above 32 bits maps to 64 bits; callers keep `total_bits` within
    /// [`MAX_TOTAL_BITS`].
    pub const fn for_bits(total_bits: u32) -> Self {
        if total_bits <= 8 {
            Self::W8
        } else if total_bits <= 16 {
            Self::W16
        } else if total_bits <= 32 {
            Self::W32
        } else {
            Self::W64
        }
    }

    /// Width in bits
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64
        }
    }

    /// Name of the matching Rust integer type
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::W8 => "i8",
            Self::W16 => "i16",
            Self::W32 => "i32",
            Self::W64 => "i64"
        }
    }

    /// Name of the matching `<stdint.h>` type
    pub const fn c_type(self) -> &'static str {
        match self {
            Self::W8 => "int8_t",
            Self::W16 => "int16_t",
            Self::W32 => "int32_t",
            Self::W64 => "int64_t"
        }
    }

    /// Reinterprets a quantized value as a two's complement register of this width
    ///
    /// Bits above the register width are dropped, exactly like storing the value into
    /// the register would.
    pub const fn wrap(self, value: i128) -> i128 {
        let shift = 128 - self.bits();
        (value << shift) >> shift
    }
}

/******************************************************************************/

/// Fixed-point format with `whole_bits` integer bits and `fractional_bits` fractional bits
///
/// Usually written as `"W.F"`, e.g. `"2.30"`:
/// ```
/// use embcordic::{FixedPointFormat, StorageWidth};
///
/// let format: FixedPointFormat = "2.30".parse().unwrap();
/// assert_eq!(format.scaling_factor(), 1 << 30);
/// assert_eq!(format.storage_width(), StorageWidth::W32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointFormat {
    whole_bits: u32,
    fractional_bits: u32
}

impl FixedPointFormat {
    /// Creates a new format, checking that it fits in 64 bits
    pub const fn new(whole_bits: u32, fractional_bits: u32) -> Result<Self, FormatError> {
        let total_bits = whole_bits.saturating_add(fractional_bits);
        if total_bits > MAX_TOTAL_BITS {
            return Err(FormatError::TooManyBits(total_bits));
        }
        Ok(Self { whole_bits, fractional_bits })
    }

    /// Number of integer bits
    pub const fn whole_bits(&self) -> u32 {
        self.whole_bits
    }

    /// Number of fractional bits
    pub const fn fractional_bits(&self) -> u32 {
        self.fractional_bits
    }

    /// `whole_bits + fractional_bits`
    pub const fn total_bits(&self) -> u32 {
        self.whole_bits + self.fractional_bits
    }

    /// `2^fractional_bits`
    pub const fn scaling_factor(&self) -> u128 {
        1 << self.fractional_bits
    }

    /// Register width used to store values of this format
    pub const fn storage_width(&self) -> StorageWidth {
        StorageWidth::for_bits(self.total_bits())
    }

    /// Truncating conversion of a real value to this format, see [`quantize()`]
    pub fn quantize(&self, value: f64) -> i128 {
        quantize(value, self.fractional_bits)
    }

    /// Converts a quantized value back to a real value
    pub fn to_real(&self, raw: i128) -> f64 {
        raw as f64 / scale(self.fractional_bits)
    }
}

impl FromStr for FixedPointFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (whole, fractional) = match (parts.next(), parts.next(), parts.next()) {
            (Some(whole), Some(fractional), None) => (whole, fractional),
            _ => return Err(FormatError::Malformed)
        };
        let whole: i64 = whole.parse().map_err(|_| FormatError::Malformed)?;
        let fractional: i64 = fractional.parse().map_err(|_| FormatError::Malformed)?;

        if whole < 0 || fractional < 0 {
            return Err(FormatError::NegativeBits);
        }
        let total_bits = whole.saturating_add(fractional);
        if total_bits > MAX_TOTAL_BITS as i64 {
            return Err(FormatError::TooManyBits(u32::try_from(total_bits).unwrap_or(u32::MAX)));
        }

        // Both fit in a u32 now that their sum is at most 64
        Self::new(whole as u32, fractional as u32)
    }
}

impl fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.whole_bits, self.fractional_bits)
    }
}

/******************************************************************************/
