/* embcordic | lib.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Fixed-point CORDIC sine and cosine */

/******************************************************************************/

#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/******************************************************************************/

mod cordic;
mod error;
mod format;
/// Host-side computation of the quantized constants
pub mod precompute;
mod tables;

pub use cordic::{Register, RotationState};
pub use error::{Error, FormatError};
pub use format::{quantize, FixedPointFormat, StorageWidth, MAX_TOTAL_BITS};
pub use tables::CordicTables;

/******************************************************************************/

/// Constants generated by the build script
///
/// By default 16 iterations in the `2.30` format. Set the `EMBCORDIC_ITERATIONS` and
/// `EMBCORDIC_FORMAT` environment variables at build time to change them.
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));
}

/// Rotation engine using the [`generated`] tables
///
/// ```
/// let (sin, cos) = embcordic::DEFAULT.sin_cos(0.5);
/// assert!((sin - 0.479425538604).abs() < 1e-3);
/// assert!((cos - 0.877582561890).abs() < 1e-3);
/// ```
pub const DEFAULT: CordicTables<generated::Fixed, { generated::ITERATIONS }> =
    CordicTables::from_raw_parts(generated::ATAN_TABLE, generated::COS_K1, generated::FRACTIONAL_BITS);

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tables() {
        let format = FixedPointFormat::new(generated::WHOLE_BITS, generated::FRACTIONAL_BITS).unwrap();
        assert_eq!(generated::SCALING_FACTOR, format.scaling_factor());
        assert_eq!(
            CordicTables::<generated::Fixed, { generated::ITERATIONS }>::precompute(format),
            Ok(DEFAULT)
        );
    }

    #[test]
    fn test_default_accuracy() {
        // Holds for any configuration with at least 8 iterations and 16 fractional bits
        for theta in [-1.5, -0.5, 0.0, 0.5, 1.5] {
            let (sin, cos) = DEFAULT.sin_cos(theta);
            assert!((sin - f64::sin(theta)).abs() < 0.02);
            assert!((cos - f64::cos(theta)).abs() < 0.02);
        }
    }
}
