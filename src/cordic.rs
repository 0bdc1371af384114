/* embcordic | cordic.rs
 * Copyright (c) 2025 L. Sartory
 * SPDX-License-Identifier: MIT
 */

/* Target-side CORDIC rotation
 *
 * Only integer additions, subtractions and arithmetic shifts happen per iteration.
 * Floating point is used once to quantize the angle and once to scale the outputs.
 */

/******************************************************************************/

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::format::{quantize, scale};
use crate::tables::CordicTables;

/******************************************************************************/

/// Signed integer register holding fixed-point values
///
/// Implemented for the four storage widths: `i8`, `i16`, `i32` and `i64`.
/// All arithmetic wraps on overflow, like the hardware registers it models.
pub trait Register: Copy + Ord + core::fmt::Debug {
    /// Register width in bits
    const BITS: u32;
    /// The value `0`
    const ZERO: Self;

    /// Stores a quantized value, dropping the bits that do not fit
    fn from_quantized(value: i128) -> Self;
    /// Converts the raw register value to a float
    fn to_f64(self) -> f64;
    /// Wrapping addition
    fn wrapping_add(self, rhs: Self) -> Self;
    /// Wrapping subtraction
    fn wrapping_sub(self, rhs: Self) -> Self;
    /// Arithmetic right shift, i.e. floor division by `2^shift`
    ///
    /// Shifting by the register width or more gives `-1` for negative values and `0`
    /// otherwise, which is still the floor of the division.
    fn shr_floor(self, shift: u32) -> Self;
}

macro_rules! impl_register {
    ($($type: ty),*) => {
        $(
            impl Register for $type {
                const BITS: u32 = <$type>::BITS;
                const ZERO: Self = 0;

                #[inline(always)]
                fn from_quantized(value: i128) -> Self {
                    value as $type
                }

                #[inline(always)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline(always)]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$type>::wrapping_add(self, rhs)
                }

                #[inline(always)]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$type>::wrapping_sub(self, rhs)
                }

                #[inline(always)]
                fn shr_floor(self, shift: u32) -> Self {
                    match self.checked_shr(shift) {
                        Some(value) => value,
                        None if self < 0 => -1,
                        None => 0
                    }
                }
            }
        )*
    }
}

impl_register!(i8, i16, i32, i64);

/******************************************************************************/

/// Working registers of one rotation
///
/// `x` and `y` are the vector components (cosine and sine accumulators), `z` is the
/// angle still to be rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState<T> {
    /// Cosine accumulator
    pub x: T,
    /// Sine accumulator
    pub y: T,
    /// Residual angle
    pub z: T
}

impl<T: Register> RotationState<T> {
    /// Starts a rotation of the vector `(gain, 0)` by `z`
    pub fn new(gain: T, z: T) -> Self {
        Self { x: gain, y: T::ZERO, z }
    }

    /// Applies pseudo-rotation `i` by `±atan`
    ///
    /// The direction is positive when `z >= 0`, so a residual angle of exactly zero
    /// still rotates counterclockwise.
    #[inline(always)]
    pub fn step(&mut self, i: u32, atan: T) {
        let (dx, dy) = (self.y.shr_floor(i), self.x.shr_floor(i));
        if self.z >= T::ZERO {
            self.x = self.x.wrapping_sub(dx);
            self.y = self.y.wrapping_add(dy);
            self.z = self.z.wrapping_sub(atan);
        } else {
            self.x = self.x.wrapping_add(dx);
            self.y = self.y.wrapping_sub(dy);
            self.z = self.z.wrapping_add(atan);
        }
    }
}

/******************************************************************************/

impl<T: Register, const N: usize> CordicTables<T, N> {
    /// Converts an angle in radians to a register value, truncating toward zero
    pub fn quantize_angle(&self, theta: f64) -> T {
        T::from_quantized(quantize(theta, self.fractional_bits()))
    }

    /// Runs all the pseudo-rotations on the quantized angle `z`
    ///
    /// The returned `x` and `y` are the cosine and sine of `z`, scaled by
    /// `2^fractional_bits`.
    pub fn rotate(&self, z: T) -> RotationState<T> {
        let mut state = RotationState::new(self.gain(), z);
        for (i, &atan) in self.atan_table().iter().enumerate() {
            state.step(i as u32, atan);
        }
        state
    }

    /// Computes the sine and cosine of `theta`, in radians
    ///
    /// The result is only accurate for `theta` within `[-PI / 2, PI / 2]`: no range
    /// reduction is performed (see [`CordicTables::sin_cos_full_range()`]). The caller
    /// also has to pick a format with enough whole bits for `theta` and for the
    /// intermediate values (up to about `1.65`), otherwise the registers silently wrap.
    pub fn sin_cos(&self, theta: f64) -> (f64, f64) {
        let state = self.rotate(self.quantize_angle(theta));
        let scale = scale(self.fractional_bits());
        (state.y.to_f64() / scale, state.x.to_f64() / scale)
    }

    /// Sine of `theta`, same domain as [`CordicTables::sin_cos()`]
    pub fn sin(&self, theta: f64) -> f64 {
        self.sin_cos(theta).0
    }

    /// Cosine of `theta`, same domain as [`CordicTables::sin_cos()`]
    pub fn cos(&self, theta: f64) -> f64 {
        self.sin_cos(theta).1
    }

    /// Writes the sine and / or cosine of `theta` into the given slots
    ///
    /// Missing slots are skipped. Same domain as [`CordicTables::sin_cos()`].
    pub fn sin_cos_into(&self, theta: f64, sin: Option<&mut f64>, cos: Option<&mut f64>) {
        if sin.is_none() && cos.is_none() {
            return;
        }
        let (sin_val, cos_val) = self.sin_cos(theta);
        if let Some(sin) = sin {
            *sin = sin_val;
        }
        if let Some(cos) = cos {
            *cos = cos_val;
        }
    }

    /// Sine and cosine of any finite angle
    ///
    /// `theta` is first brought back to `[-PI, PI]` by removing the closest number of
    /// full turns, then mirrored into `[-PI / 2, PI / 2]` (the sine is unchanged, the
    /// cosine changes sign). Precision degrades for very large angles.
    pub fn sin_cos_full_range(&self, theta: f64) -> (f64, f64) {
        let turns = theta / TAU;
        let turns = (turns + if turns < 0.0 { -0.5 } else { 0.5 }) as i64;
        let theta = theta - turns as f64 * TAU;

        if theta > FRAC_PI_2 {
            let (sin, cos) = self.sin_cos(PI - theta);
            (sin, -cos)
        } else if theta < -FRAC_PI_2 {
            let (sin, cos) = self.sin_cos(-PI - theta);
            (sin, -cos)
        } else {
            self.sin_cos(theta)
        }
    }
}

/******************************************************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use quickcheck_macros::quickcheck;

    /// Worst error of 16 iterations, bounded by the last rotation angle `atan(2^-15)`
    const EPS_16: f64 = 1.0 / (1 << 14) as f64;
    const EPS_24: f64 = 1.0 / (1 << 20) as f64;

    fn cordic16() -> CordicTables<i32, 16> {
        CordicTables::precompute("2.30".parse().unwrap()).unwrap()
    }

    fn cordic24() -> CordicTables<i32, 24> {
        CordicTables::precompute("2.30".parse().unwrap()).unwrap()
    }

    #[test]
    fn test_shr_floor() {
        assert_eq!(5i32.shr_floor(1), 2);
        assert_eq!((-5i32).shr_floor(1), -3);
        assert_eq!((-1i32).shr_floor(4), -1);
        assert_eq!((-1i8).shr_floor(8), -1);
        assert_eq!(100i8.shr_floor(9), 0);
        assert_eq!(i64::MIN.shr_floor(63), -1);
        assert_eq!(i64::MIN.shr_floor(64), -1);
    }

    #[test]
    fn test_register_wraps() {
        assert_eq!(i8::from_quantized(200), -56);
        assert_eq!(i16::from_quantized(-32769), 32767);
        assert_eq!(Register::wrapping_add(i32::MAX, 1), i32::MIN);
        assert_eq!(Register::wrapping_sub(i8::MIN, 1), i8::MAX);
    }

    #[test]
    fn test_step_direction() {
        // z == 0 rotates in the positive direction
        let mut state = RotationState::new(100i32, 0);
        state.step(0, 10);
        assert_eq!(state, RotationState { x: 100, y: 100, z: -10 });

        let mut state = RotationState::new(100i32, -1);
        state.step(1, 10);
        assert_eq!(state, RotationState { x: 100, y: -50, z: 9 });

        // Negative operands are floored, not truncated
        let mut state = RotationState { x: 7i32, y: -7, z: 3 };
        state.step(1, 1);
        assert_eq!(state, RotationState { x: 11, y: -4, z: 2 });
    }

    #[test]
    fn test_zero_and_quarter_pi() {
        let cordic = cordic16();

        let (sin, cos) = cordic.sin_cos(0.0);
        assert_abs_diff_eq!(sin, 0.0, epsilon = EPS_16);
        assert_abs_diff_eq!(cos, 1.0, epsilon = EPS_16);

        let (sin, cos) = cordic.sin_cos(core::f64::consts::FRAC_PI_4);
        assert_abs_diff_eq!(sin, 0.70710678, epsilon = EPS_16);
        assert_abs_diff_eq!(cos, 0.70710678, epsilon = EPS_16);
    }

    #[test]
    fn test_bit_exact_output() {
        // Register values after 16 iterations, "2.30" format
        let cordic = cordic16();
        let state = cordic.rotate(cordic.quantize_angle(0.0));
        assert_eq!(state, RotationState { x: 1073741822, y: -18890, z: 18890 });
        assert_eq!(cordic.quantize_angle(core::f64::consts::FRAC_PI_4), 843314856);
    }

    #[test]
    fn test_domain_16() {
        let cordic = cordic16();
        for i in 0..=2000 {
            let theta = -FRAC_PI_2 + PI * i as f64 / 2000.0;
            let (sin, cos) = cordic.sin_cos(theta);
            assert_abs_diff_eq!(sin, theta.sin(), epsilon = EPS_16);
            assert_abs_diff_eq!(cos, theta.cos(), epsilon = EPS_16);
        }
    }

    #[test]
    fn test_domain_24() {
        let cordic = cordic24();
        for i in 0..=2000 {
            let theta = -FRAC_PI_2 + PI * i as f64 / 2000.0;
            let (sin, cos) = cordic.sin_cos(theta);
            assert_abs_diff_eq!(sin, theta.sin(), epsilon = EPS_24);
            assert_abs_diff_eq!(cos, theta.cos(), epsilon = EPS_24);
        }
    }

    #[test]
    fn test_narrow_registers() {
        let cordic = CordicTables::<i16, 12>::precompute("2.14".parse().unwrap()).unwrap();
        let (sin, cos) = cordic.sin_cos(0.5);
        assert_abs_diff_eq!(sin, 0.5f64.sin(), epsilon = 1.0 / 256.0);
        assert_abs_diff_eq!(cos, 0.5f64.cos(), epsilon = 1.0 / 256.0);
    }

    #[test]
    fn test_wide_registers() {
        let cordic = CordicTables::<i64, 40>::precompute("2.60".parse().unwrap()).unwrap();
        for theta in [-1.5, -0.25, 0.0, 0.3, 1.2] {
            let (sin, cos) = cordic.sin_cos(theta);
            assert_abs_diff_eq!(sin, f64::sin(theta), epsilon = 1e-11);
            assert_abs_diff_eq!(cos, f64::cos(theta), epsilon = 1e-11);
        }
    }

    #[test]
    fn test_single_outputs() {
        let cordic = cordic16();
        let (sin, cos) = cordic.sin_cos(0.3);
        assert_eq!(cordic.sin(0.3), sin);
        assert_eq!(cordic.cos(0.3), cos);

        let mut sin_only = f64::NAN;
        cordic.sin_cos_into(0.3, Some(&mut sin_only), None);
        assert_eq!(sin_only, sin);

        let mut cos_only = f64::NAN;
        cordic.sin_cos_into(0.3, None, Some(&mut cos_only));
        assert_eq!(cos_only, cos);

        let (mut s, mut c) = (0.0, 0.0);
        cordic.sin_cos_into(0.3, Some(&mut s), Some(&mut c));
        assert_eq!((s, c), (sin, cos));

        cordic.sin_cos_into(0.3, None, None);
    }

    #[test]
    fn test_full_range() {
        let cordic = cordic16();
        for theta in [3.0, -3.0, PI, -PI, 2.0, -2.0, 10.0, -100.0, TAU + 0.3, 0.7] {
            let (sin, cos) = cordic.sin_cos_full_range(theta);
            assert_abs_diff_eq!(sin, theta.sin(), epsilon = EPS_16);
            assert_abs_diff_eq!(cos, theta.cos(), epsilon = EPS_16);
        }
        // Inside the domain, no reduction happens
        assert_eq!(cordic.sin_cos_full_range(0.7), cordic.sin_cos(0.7));
    }

    #[test]
    fn test_out_of_domain_is_not_reduced() {
        // Without reduction the residual angle cannot be eliminated
        let cordic = cordic16();
        let (sin, _) = cordic.sin_cos(PI);
        assert!((sin - PI.sin()).abs() > 0.1);
    }

    #[test]
    fn test_register_overflow_wraps() {
        // An angle of 2.5 does not fit in "2.30" registers and silently wraps around
        let cordic = cordic16();
        assert_eq!(cordic.quantize_angle(2.5), i32::from_quantized(quantize(2.5, 30)));
        assert!(cordic.quantize_angle(2.5) < 0);
    }

    #[quickcheck]
    fn check_odd_even(theta: f64) -> bool {
        if !theta.is_finite() {
            return true;
        }
        let theta = theta.clamp(-FRAC_PI_2, FRAC_PI_2);
        let cordic = cordic16();
        let (sin, cos) = cordic.sin_cos(theta);
        let (sin_neg, cos_neg) = cordic.sin_cos(-theta);
        (sin + sin_neg).abs() <= 2.0 * EPS_16 && (cos - cos_neg).abs() <= 2.0 * EPS_16
    }

    #[quickcheck]
    fn check_unit_length(theta: f64) -> bool {
        if !theta.is_finite() {
            return true;
        }
        let (sin, cos) = cordic24().sin_cos(theta.clamp(-FRAC_PI_2, FRAC_PI_2));
        (sin * sin + cos * cos - 1.0).abs() < 1e-6
    }
}
