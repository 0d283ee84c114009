// ABOUTME: Narrow bignum engine trait, implemented by num-bigint's BigInt

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

/// The handful of operations the evaluator needs from an arbitrary-precision
/// integer type. Keeping this narrow means swapping the backing bignum crate
/// touches only this file.
pub trait BignumEngine: Clone {
    fn from_i64(v: i64) -> Self;
    fn sign(&self) -> i32;
    fn is_zero_value(&self) -> bool;
    fn is_negative_value(&self) -> bool;
    fn to_i64_checked(&self) -> Option<i64>;
    fn to_f64_value(&self) -> f64;
    fn add_to(&self, other: &Self) -> Self;
    fn sub_from(&self, other: &Self) -> Self;
    fn mul_by(&self, other: &Self) -> Self;
    /// Truncating quotient and remainder, `self / other` and `self % other`.
    fn div_rem_by(&self, other: &Self) -> (Self, Self);
    fn pow_by(&self, exp: u32) -> Self;
    /// `n!` computed iteratively; caller guarantees `n >= 0`.
    fn factorial(n: i64) -> Self;
    fn to_decimal_string(&self) -> String;
}

impl BignumEngine for BigInt {
    fn from_i64(v: i64) -> Self {
        BigInt::from(v)
    }

    fn sign(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -1
        } else {
            1
        }
    }

    fn is_zero_value(&self) -> bool {
        Zero::is_zero(self)
    }

    fn is_negative_value(&self) -> bool {
        self.is_negative()
    }

    fn to_i64_checked(&self) -> Option<i64> {
        self.to_i64()
    }

    fn to_f64_value(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    fn add_to(&self, other: &Self) -> Self {
        self + other
    }

    fn sub_from(&self, other: &Self) -> Self {
        self - other
    }

    fn mul_by(&self, other: &Self) -> Self {
        self * other
    }

    fn div_rem_by(&self, other: &Self) -> (Self, Self) {
        Integer::div_rem(self, other)
    }

    fn pow_by(&self, exp: u32) -> Self {
        num_traits::pow::pow(self.clone(), exp as usize)
    }

    fn factorial(n: i64) -> Self {
        let mut acc = BigInt::from(1);
        let mut i: i64 = 2;
        while i <= n {
            acc *= BigInt::from(i);
            i += 1;
        }
        acc
    }

    fn to_decimal_string(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_of_twenty_one_matches_reference_value() {
        let got = BigInt::factorial(21);
        assert_eq!(got.to_decimal_string(), "51090942171709440000");
    }

    #[test]
    fn div_rem_truncates_toward_zero_like_checked_div() {
        let (q, r) = BigInt::from(-7).div_rem_by(&BigInt::from(2));
        assert_eq!(q, BigInt::from(-3));
        assert_eq!(r, BigInt::from(-1));
    }
}
