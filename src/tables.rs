/* embcordic | tables.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/******************************************************************************/

use crate::cordic::Register;
use crate::error::Error;
use crate::format::FixedPointFormat;
use crate::precompute::{self, CordicConfig};

/******************************************************************************/

/// Quantized CORDIC constants, ready to be used by the rotation engine
///
/// `N` is the number of iterations. The structure is usually built at compile time
/// from generated tables (see [`crate::DEFAULT`]), or on the host with
/// [`CordicTables::precompute()`]:
/// ```
/// use embcordic::CordicTables;
///
/// let cordic = CordicTables::<i32, 24>::precompute("2.30".parse().unwrap()).unwrap();
/// let (sin, cos) = cordic.sin_cos(core::f64::consts::FRAC_PI_6);
/// assert!((sin - 0.5).abs() < 1e-6);
/// assert!((cos - 0.866025403784).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CordicTables<T, const N: usize> {
    atan_table: [T; N],
    gain: T,
    fractional_bits: u32
}

impl<T: Copy, const N: usize> CordicTables<T, N> {
    /// Wraps already quantized constants
    ///
    /// No check is performed: the values are expected to come from the precomputation
    /// with the same `fractional_bits`.
    pub const fn from_raw_parts(atan_table: [T; N], gain: T, fractional_bits: u32) -> Self {
        Self { atan_table, gain, fractional_bits }
    }

    /// Quantized `atan(2^-i)` values
    pub const fn atan_table(&self) -> &[T; N] {
        &self.atan_table
    }

    /// Quantized gain constant
    pub const fn gain(&self) -> T {
        self.gain
    }

    /// Number of fractional bits of the fixed-point format
    pub const fn fractional_bits(&self) -> u32 {
        self.fractional_bits
    }
}

impl<T: Register, const N: usize> CordicTables<T, N> {
    /// Runs the precomputation for `N` iterations and stores the result in `T` registers
    ///
    /// Fails if `N` is zero, or if `T` is narrower than the storage width of `format`.
    pub fn precompute(format: FixedPointFormat) -> Result<Self, Error> {
        let config = CordicConfig::new(i64::try_from(N).unwrap_or(i64::MAX), format)?;
        let required = config.storage_width().bits();
        if T::BITS < required {
            return Err(Error::RegisterTooNarrow { required, provided: T::BITS });
        }

        let mut atan_table = [T::ZERO; N];
        for (entry, value) in atan_table.iter_mut().zip(precompute::atan_table(&config)) {
            *entry = T::from_quantized(value);
        }
        let gain = T::from_quantized(precompute::gain(&config));

        Ok(Self::from_raw_parts(atan_table, gain, format.fractional_bits()))
    }
}

/******************************************************************************/
