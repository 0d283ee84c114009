// ABOUTME: Numeric promotion lattice (Int < BigInt < Double) and arithmetic over Value

use num_bigint::BigInt;

use crate::bignum::BignumEngine;
use crate::error::{LError, LErrorKind};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Int,
    Big,
    Dbl,
}

fn rank(v: &Value) -> Option<Rank> {
    match v {
        Value::Int(_) => Some(Rank::Int),
        Value::BigInt(_) => Some(Rank::Big),
        Value::Double(_) => Some(Rank::Dbl),
        _ => None,
    }
}

fn require_numeric(v: &Value) -> Result<(), LError> {
    if rank(v).is_some() {
        Ok(())
    } else {
        Err(LError::with_message(
            LErrorKind::BadOperand,
            format!("expected a number, got {}", v.type_name()),
        ))
    }
}

pub fn to_f64(v: &Value) -> f64 {
    match v {
        Value::Int(i) => *i as f64,
        Value::BigInt(b) => b.to_f64_value(),
        Value::Double(d) => *d,
        _ => f64::NAN,
    }
}

fn to_bigint(v: &Value) -> BigInt {
    match v {
        Value::Int(i) => BigInt::from_i64(*i),
        Value::BigInt(b) => b.clone(),
        _ => BigInt::from_i64(0),
    }
}

/// Narrows a `BigInt` back down to `Int` when it fits in an `i64` (the
/// inverse of overflow-promotion on `+`/`*`).
fn narrow(b: BigInt) -> Value {
    match b.to_i64_checked() {
        Some(i) => Value::Int(i),
        None => Value::BigInt(b),
    }
}

pub fn is_zero(v: &Value) -> bool {
    match v {
        Value::Int(i) => *i == 0,
        Value::BigInt(b) => b.is_zero_value(),
        Value::Double(d) => *d == 0.0,
        _ => false,
    }
}

pub fn is_negative(v: &Value) -> bool {
    match v {
        Value::Int(i) => *i < 0,
        Value::BigInt(b) => b.is_negative_value(),
        Value::Double(d) => *d < 0.0,
        _ => false,
    }
}

macro_rules! numeric_op {
    ($name:ident, $int_op:ident, $big_op:ident) => {
        pub fn $name(a: &Value, b: &Value) -> Result<Value, LError> {
            require_numeric(a)?;
            require_numeric(b)?;
            match (rank(a).unwrap(), rank(b).unwrap()) {
                (Rank::Int, Rank::Int) => {
                    let (x, y) = (as_i64(a), as_i64(b));
                    match x.$int_op(y) {
                        Some(r) => Ok(Value::Int(r)),
                        None => Ok(narrow(to_bigint(a).$big_op(&to_bigint(b)))),
                    }
                }
                (Rank::Dbl, _) | (_, Rank::Dbl) => {
                    Ok(Value::Double(dbl_op(stringify!($name), to_f64(a), to_f64(b))))
                }
                _ => Ok(narrow(to_bigint(a).$big_op(&to_bigint(b)))),
            }
        }
    };
}

fn as_i64(v: &Value) -> i64 {
    match v {
        Value::Int(i) => *i,
        _ => 0,
    }
}

fn dbl_op(op: &str, x: f64, y: f64) -> f64 {
    match op {
        "add" => x + y,
        "sub" => x - y,
        "mul" => x * y,
        _ => f64::NAN,
    }
}

numeric_op!(add, checked_add, add_to);
numeric_op!(sub, checked_sub, sub_from);
numeric_op!(mul, checked_mul, mul_by);

/// Division on two `Int`s stays `Int` when exact, becomes `Double` when it
/// leaves a remainder; any `BigInt`/`Double` operand promotes as usual.
pub fn div(a: &Value, b: &Value) -> Result<Value, LError> {
    require_numeric(a)?;
    require_numeric(b)?;
    if is_zero(b) {
        return Err(LError::new(LErrorKind::DivZero));
    }
    match (rank(a).unwrap(), rank(b).unwrap()) {
        (Rank::Dbl, _) | (_, Rank::Dbl) => Ok(Value::Double(to_f64(a) / to_f64(b))),
        (Rank::Int, Rank::Int) => {
            let (x, y) = (as_i64(a), as_i64(b));
            if x % y == 0 {
                Ok(Value::Int(x / y))
            } else {
                Ok(Value::Double(x as f64 / y as f64))
            }
        }
        _ => {
            let (x, y) = (to_bigint(a), to_bigint(b));
            let (q, r) = x.div_rem_by(&y);
            if r.is_zero_value() {
                Ok(narrow(q))
            } else {
                Ok(Value::Double(x.to_f64_value() / y.to_f64_value()))
            }
        }
    }
}

/// Modulo (`%`): always an integer operation; a `Double` operand is an
/// invalid operand for this builtin.
pub fn rem(a: &Value, b: &Value) -> Result<Value, LError> {
    if matches!(a, Value::Double(_)) || matches!(b, Value::Double(_)) {
        return Err(LError::with_message(
            LErrorKind::BadOperand,
            "`%` requires integer operands",
        ));
    }
    require_numeric(a)?;
    require_numeric(b)?;
    if is_zero(b) {
        return Err(LError::new(LErrorKind::DivZero));
    }
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => match x.checked_rem(*y) {
            Some(r) => Ok(Value::Int(r)),
            None => Ok(Value::Int(0)),
        },
        _ => {
            let (x, y) = (to_bigint(a), to_bigint(b));
            let (_, r) = x.div_rem_by(&y);
            Ok(narrow(r))
        }
    }
}

/// Exponentiation (`^`): non-negative integer exponent only, matching
/// the reference's "power" builtin; `Double` base or exponent is handled
/// via float `powf`.
pub fn pow(a: &Value, b: &Value) -> Result<Value, LError> {
    require_numeric(a)?;
    require_numeric(b)?;
    if matches!(a, Value::Double(_)) || matches!(b, Value::Double(_)) {
        return Ok(Value::Double(to_f64(a).powf(to_f64(b))));
    }
    if is_negative(b) {
        return Err(LError::with_message(
            LErrorKind::BadOperand,
            "`^` requires a non-negative exponent",
        ));
    }
    let exp = match b {
        Value::Int(i) => *i as u32,
        Value::BigInt(big) => big.to_i64_checked().unwrap_or(i64::MAX) as u32,
        _ => 0,
    };
    if let Value::Int(base) = a {
        if let Some(r) = base.checked_pow(exp) {
            return Ok(Value::Int(r));
        }
    }
    Ok(narrow(to_bigint(a).pow_by(exp)))
}

/// Factorial (`!`): defined for non-negative integers; always promotes to
/// `BigInt` since even modest inputs overflow `i64` (`21!` already does).
pub fn factorial(v: &Value) -> Result<Value, LError> {
    require_numeric(v)?;
    if matches!(v, Value::Double(_)) {
        return Err(LError::with_message(
            LErrorKind::BadOperand,
            "`!` requires an integer",
        ));
    }
    if is_negative(v) {
        return Err(LError::with_message(
            LErrorKind::BadOperand,
            "`!` requires a non-negative integer",
        ));
    }
    let n = match v {
        Value::Int(i) => *i,
        Value::BigInt(b) => b.to_i64_checked().unwrap_or(i64::MAX),
        _ => 0,
    };
    Ok(narrow(BigInt::factorial(n)))
}

/// Three-way numeric comparison honoring the symmetric float tolerance for
/// equality; cross-kind comparisons promote through the same lattice as
/// arithmetic.
pub fn compare(a: &Value, b: &Value) -> Result<std::cmp::Ordering, LError> {
    require_numeric(a)?;
    require_numeric(b)?;
    use crate::value::EPSILON;
    use std::cmp::Ordering;
    match (rank(a).unwrap(), rank(b).unwrap()) {
        (Rank::Dbl, _) | (_, Rank::Dbl) => {
            let (x, y) = (to_f64(a), to_f64(b));
            if (x - y).abs() < EPSILON {
                Ok(Ordering::Equal)
            } else {
                Ok(x.partial_cmp(&y).unwrap_or(Ordering::Equal))
            }
        }
        (Rank::Int, Rank::Int) => Ok(as_i64(a).cmp(&as_i64(b))),
        _ => Ok(to_bigint(a).cmp(&to_bigint(b))),
    }
}

pub fn min(a: &Value, b: &Value) -> Result<Value, LError> {
    Ok(if compare(a, b)?.is_le() { a.clone() } else { b.clone() })
}

pub fn max(a: &Value, b: &Value) -> Result<Value, LError> {
    Ok(if compare(a, b)?.is_ge() { a.clone() } else { b.clone() })
}
