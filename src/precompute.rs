/* embcordic | precompute.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Host-side computation of the CORDIC constants
 *
 * Everything here runs once per configuration, in f64, and only the final values are
 * quantized. This module is also compiled into the build script, so it may only
 * depend on the `error` and `format` modules.
 */

/******************************************************************************/

use core::ops::Range;

use crate::error::Error;
use crate::format::{FixedPointFormat, StorageWidth};

/******************************************************************************/

/// Iteration count and fixed-point format of a CORDIC implementation
///
/// This is the only input of the precomputation: the same configuration always yields
/// bit-identical tables.
/// ```
/// use embcordic::precompute::{self, CordicConfig};
///
/// let config = CordicConfig::parse(16, "2.30").unwrap();
/// assert_eq!(precompute::gain(&config), 652032874);
/// assert_eq!(precompute::atan_table(&config).len(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CordicConfig {
    iterations: usize,
    format: FixedPointFormat
}

impl CordicConfig {
    /// Creates a configuration, rejecting iteration counts below one
    pub fn new(iterations: i64, format: FixedPointFormat) -> Result<Self, Error> {
        let iterations = usize::try_from(iterations)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(Error::InvalidIterationCount(iterations))?;
        log::debug!(
            "CORDIC configuration: {} iterations, format {} stored as {}",
            iterations,
            format,
            format.storage_width().rust_type()
        );
        Ok(Self { iterations, format })
    }

    /// Creates a configuration from a `"W.F"` format descriptor
    pub fn parse(iterations: i64, format: &str) -> Result<Self, Error> {
        if iterations <= 0 {
            return Err(Error::InvalidIterationCount(iterations));
        }
        Self::new(iterations, format.parse()?)
    }

    /// Number of pseudo-rotations, i.e. the length of the arctangent table
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Fixed-point format of the table, the gain and the rotation registers
    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Register width needed by the format
    pub fn storage_width(&self) -> StorageWidth {
        self.format.storage_width()
    }

    /// `2^fractional_bits`
    pub fn scaling_factor(&self) -> u128 {
        self.format.scaling_factor()
    }
}

/******************************************************************************/

/// `atan(2^-i)`, the rotation angle of iteration `i`
pub fn atan_raw(i: usize) -> f64 {
    let exponent = i32::try_from(i).unwrap_or(i32::MAX);
    libm::atan(libm::ldexp(1.0, -exponent))
}

/// Product of `cos(atan(2^-i))` for the first `iterations` rotations
///
/// This is the inverse of the magnitude growth of the pseudo-rotations. It is computed
/// in f64 all along, so that the quantization error is only introduced once.
/// It decreases towards `0.6072529350088814` as `iterations` grows.
pub fn gain_real(iterations: usize) -> f64 {
    (0..iterations).map(|i| libm::cos(atan_raw(i))).product()
}

/// Quantized gain constant, the initial `x` of every rotation
pub fn gain(config: &CordicConfig) -> i128 {
    let real = gain_real(config.iterations);
    let quantized = config.format.quantize(real);
    log::debug!("CORDIC gain for {} iterations: {} -> {}", config.iterations, real, quantized);
    quantized
}

/// Quantized arctangent table, computed lazily without allocating
pub fn atan_table(config: &CordicConfig) -> AtanTable {
    AtanTable {
        format: config.format,
        indices: 0..config.iterations
    }
}

/******************************************************************************/

/// Iterator over the quantized `atan(2^-i)` values, see [`atan_table()`]
#[derive(Debug, Clone)]
pub struct AtanTable {
    format: FixedPointFormat,
    indices: Range<usize>
}

impl Iterator for AtanTable {
    type Item = i128;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|i| self.format.quantize(atan_raw(i)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl ExactSizeIterator for AtanTable {}

/******************************************************************************/
