//! BigFloat including finite numbers, `NaN`, and `Inf`.
//!
//! Every `BigFloat` carries its own precision in bits. A value constructed without an explicit precision
//! captures the default precision of the thread's default context at construction.
//!
//! Precision of results:
//!
//!  - binary operations produce the larger of the operands' precisions, or the default precision
//!    when the default context is in `PrecisionMode::Ambient`;
//!  - primitive operands (integers, `f32`, `f64`) are converted exactly and do not affect the result precision;
//!  - unary operations keep the operand's precision;
//!  - assignment and compound assignment keep the destination's precision.

use crate::ctx::get_default_base;
use crate::ctx::get_default_prec;
use crate::ctx::get_precision_mode;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::PrecisionMode;
use crate::defs::Radix;
use crate::defs::Sign;
use crate::defs::GUARD_BITS;
use crate::defs::MIN_P;
use crate::num::FloatNumber;
use crate::parser;
use core::cmp::Ordering;
use core::iter::Product;
use core::iter::Sum;
use core::ops::Add;
use core::ops::AddAssign;
use core::ops::Div;
use core::ops::DivAssign;
use core::ops::Mul;
use core::ops::MulAssign;
use core::ops::Neg;
use core::ops::Sub;
use core::ops::SubAssign;
use core::str::FromStr;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::borrow::Cow;

/// Number representation.
#[derive(Debug, Clone)]
pub struct BigFloat {
    p: usize,
    inner: Flavor,
}

#[derive(Debug, Clone)]
enum Flavor {
    Value(FloatNumber),
    NaN(Option<Error>), // error which produced the NaN, if any
    Inf(Sign),          // signed Inf
}

#[inline]
fn clamp_p(p: usize) -> usize {
    p.max(MIN_P)
}

/// A value which can be an operand of arithmetic operations and comparisons with `BigFloat`.
///
/// Implemented for `BigFloat`, `&BigFloat`, and the primitive integer and floating point types.
///
/// A literal on the left-hand side of an operator has no type until the whole expression is checked,
/// so a method called directly on the result needs a typed literal: `(2i32 * &x).sqrt()`, not `(2 * &x).sqrt()`.
pub trait Operand {
    /// Returns the operand as a BigFloat. Primitive values are converted exactly.
    fn as_float(&self) -> Cow<'_, BigFloat>;

    /// Returns true if the precision of the operand takes part in choosing the precision of a result.
    fn carries_precision(&self) -> bool {
        true
    }
}

impl Operand for BigFloat {
    fn as_float(&self) -> Cow<'_, BigFloat> {
        Cow::Borrowed(self)
    }
}

impl Operand for &BigFloat {
    fn as_float(&self) -> Cow<'_, BigFloat> {
        Cow::Borrowed(*self)
    }
}

impl BigFloat {
    /// Returns a new BigFloat with the value of zero and the default precision.
    pub fn new() -> Self {
        Self::with_precision(get_default_prec())
    }

    /// Returns a new BigFloat with the value of zero and precision `p`.
    pub fn with_precision(p: usize) -> Self {
        BigFloat {
            p: clamp_p(p),
            inner: Flavor::Value(FloatNumber::new()),
        }
    }

    /// Returns a new BigFloat with the value of `x` rounded to precision `p`.
    pub fn with_value(x: &Self, p: usize) -> Self {
        let p = clamp_p(p);
        match &x.inner {
            Flavor::Value(v) => Self::result_to_ext(v.round(p), p, false, true),
            other => BigFloat {
                p,
                inner: other.clone(),
            },
        }
    }

    /// Returns `NaN` with the default precision.
    pub fn nan() -> Self {
        BigFloat {
            p: get_default_prec(),
            inner: Flavor::NaN(None),
        }
    }

    /// Returns infinity with sign `s` and the default precision.
    pub fn inf(s: Sign) -> Self {
        BigFloat {
            p: get_default_prec(),
            inner: Flavor::Inf(s),
        }
    }

    /// Creates a BigFloat from f64 with the default precision.
    pub fn from_f64(f: f64) -> Self {
        Self::from_f64_prec(f, get_default_prec())
    }

    /// Creates a BigFloat from f64 with precision `p`.
    /// The conversion is exact if `p` is at least 53.
    pub fn from_f64_prec(f: f64, p: usize) -> Self {
        let p = clamp_p(p);
        if f.is_nan() {
            BigFloat {
                p,
                inner: Flavor::NaN(None),
            }
        } else if f.is_infinite() {
            BigFloat {
                p,
                inner: Flavor::Inf(if f.is_sign_negative() { Sign::Neg } else { Sign::Pos }),
            }
        } else {
            Self::result_to_ext(FloatNumber::from_f64(f, p), p, false, true)
        }
    }

    /// Creates a BigFloat from f32 with the default precision.
    pub fn from_f32(f: f32) -> Self {
        Self::from_f64_prec(f as f64, get_default_prec())
    }

    /// Creates a BigFloat from f32 with precision `p`.
    pub fn from_f32_prec(f: f32, p: usize) -> Self {
        Self::from_f64_prec(f as f64, p)
    }

    /// Creates a BigFloat from an integer with the default precision.
    pub fn from_integer(i: &BigInt) -> Self {
        Self::from_integer_prec(i, get_default_prec())
    }

    /// Creates a BigFloat from an integer with precision `p`.
    pub fn from_integer_prec(i: &BigInt, p: usize) -> Self {
        let p = clamp_p(p);
        Self::result_to_ext(FloatNumber::from_int(i.clone(), p), p, false, true)
    }

    /// Creates a BigFloat from a rational number with the default precision.
    pub fn from_rational(r: &BigRational) -> Self {
        Self::from_rational_prec(r, get_default_prec())
    }

    /// Creates a BigFloat from a rational number with precision `p`.
    pub fn from_rational_prec(r: &BigRational, p: usize) -> Self {
        let p = clamp_p(p);
        Self::result_to_ext(FloatNumber::from_ratio(r.numer(), r.denom(), 0, p), p, false, true)
    }

    /// Parses a number from the string `s` using the default radix and the default precision.
    ///
    /// ## Errors
    ///
    ///  - InvalidNumeral: `s` is not a valid numeral.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Self::parse_radix(s, get_default_base(), get_default_prec())
    }

    /// Parses a number from the string `s` in radix `rdx` with precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidNumeral: `s` is not a valid numeral.
    pub fn parse_radix(s: &str, rdx: Radix, p: usize) -> Result<Self, Error> {
        let p = clamp_p(p);
        let ps = parser::parse(s, rdx);

        if !ps.is_valid() {
            return Err(Error::InvalidNumeral);
        }

        let inner = if ps.is_nan() {
            Flavor::NaN(None)
        } else if ps.is_inf() {
            Flavor::Inf(ps.sign())
        } else {
            let (m, s, e) = ps.raw_parts();
            Flavor::Value(FloatNumber::from_digits(s, m, e, rdx, p)?)
        };

        Ok(BigFloat { p, inner })
    }

    pub(crate) fn from_number(v: FloatNumber, p: usize) -> Self {
        BigFloat {
            p,
            inner: Flavor::Value(v),
        }
    }

    pub(crate) fn from_error(e: Error, p: usize) -> Self {
        Self::result_to_ext(Err(e), clamp_p(p), false, true)
    }

    pub(crate) fn as_number(&self) -> Option<&FloatNumber> {
        match &self.inner {
            Flavor::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the precision of `self` in bits.
    pub fn precision(&self) -> usize {
        self.p
    }

    /// Changes the precision of `self` to `p` rounding the value.
    pub fn set_precision(&mut self, p: usize) {
        *self = Self::with_value(self, p);
    }

    /// Assigns the value of `src` to `self`.
    /// The value is rounded to the precision of `self`, and the precision of `self` does not change.
    pub fn assign<T: Operand>(&mut self, src: T) {
        let src = src.as_float();
        *self = Self::with_value(&src, self.p);
    }

    /// Assigns the value of `f` to `self` keeping the precision of `self`.
    pub fn assign_f64(&mut self, f: f64) {
        self.assign(f);
    }

    /// Assigns the number parsed from `s` in the default radix to `self` keeping the precision of `self`.
    ///
    /// ## Errors
    ///
    ///  - InvalidNumeral: `s` is not a valid numeral. `self` is left unchanged.
    pub fn assign_str(&mut self, s: &str) -> Result<(), Error> {
        *self = Self::parse_radix(s, get_default_base(), self.p)?;
        Ok(())
    }

    /// Returns true if `self` is positive infinity.
    pub fn is_inf_pos(&self) -> bool {
        matches!(self.inner, Flavor::Inf(Sign::Pos))
    }

    /// Returns true if `self` is negative infinity.
    pub fn is_inf_neg(&self) -> bool {
        matches!(self.inner, Flavor::Inf(Sign::Neg))
    }

    /// Returns true if `self` is infinite.
    pub fn is_inf(&self) -> bool {
        matches!(self.inner, Flavor::Inf(_))
    }

    /// Return true if `self` is not a number.
    pub fn is_nan(&self) -> bool {
        matches!(self.inner, Flavor::NaN(_))
    }

    /// Returns true if `self` is zero.
    pub fn is_zero(&self) -> bool {
        matches!(&self.inner, Flavor::Value(v) if v.is_zero())
    }

    /// Returns true if `self` is positive. Zero is positive.
    pub fn is_positive(&self) -> bool {
        match &self.inner {
            Flavor::Value(v) => !v.is_negative(),
            Flavor::Inf(s) => s.is_positive(),
            Flavor::NaN(_) => false,
        }
    }

    /// Returns true if `self` is negative.
    pub fn is_negative(&self) -> bool {
        match &self.inner {
            Flavor::Value(v) => v.is_negative(),
            Flavor::Inf(s) => s.is_negative(),
            Flavor::NaN(_) => false,
        }
    }

    /// Returns the error which produced `self` if `self` is `NaN`.
    pub fn err(&self) -> Option<Error> {
        match &self.inner {
            Flavor::NaN(e) => *e,
            _ => None,
        }
    }

    /// Returns -1 for negative numbers, 1 for positive numbers, and 0 for zero and `NaN`.
    pub fn sgn(&self) -> i32 {
        match &self.inner {
            Flavor::Value(v) if v.is_zero() => 0,
            Flavor::NaN(_) => 0,
            _ if self.is_negative() => -1,
            _ => 1,
        }
    }

    /// Returns the binary exponent `e` of `self` such that `self = f * 2^e`, `0.5 <= |f| < 1`.
    /// Zero has exponent 0. Returns None for `NaN` and `Inf`.
    pub fn exponent(&self) -> Option<Exponent> {
        self.as_number().map(|v| v.exponent())
    }

    /// Returns `f` and `e` such that `self = f * 2^e`, `0.5 <= |f| < 1`.
    /// Returns None for `NaN` and `Inf`.
    pub fn frexp(&self) -> Option<(Self, Exponent)> {
        self.as_number().map(|v| {
            let (f, e) = v.frexp();
            (Self::from_number(f, self.p), e)
        })
    }

    /// Compares `self` to `d2`.
    /// Returns None if either of the values is `NaN`.
    pub fn cmp_value<T: Operand + ?Sized>(&self, d2: &T) -> Option<Ordering> {
        let d2 = d2.as_float();
        match (&self.inner, &d2.inner) {
            (Flavor::NaN(_), _) | (_, Flavor::NaN(_)) => None,
            (Flavor::Value(v1), Flavor::Value(v2)) => Some(v1.cmp(v2)),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => Some(s1.to_int().cmp(&s2.to_int())),
            (Flavor::Inf(s), Flavor::Value(_)) => Some(if s.is_positive() { Ordering::Greater } else { Ordering::Less }),
            (Flavor::Value(_), Flavor::Inf(s)) => Some(if s.is_positive() { Ordering::Less } else { Ordering::Greater }),
        }
    }

    // precision of a binary operation result
    fn result_precision<T: Operand + ?Sized>(&self, d2: &T, d2_p: usize) -> usize {
        match get_precision_mode() {
            PrecisionMode::Ambient => get_default_prec(),
            PrecisionMode::Propagate => {
                if d2.carries_precision() {
                    self.p.max(d2_p)
                } else {
                    self.p
                }
            }
        }
    }

    /// Adds `d2` to `self` and returns the result of the addition.
    pub fn add<T: Operand + ?Sized>(&self, d2: &T) -> Self {
        let d2f = d2.as_float();
        let p = self.result_precision(d2, d2f.p);
        self.add_prec(&d2f, p)
    }

    /// Subtracts `d2` from `self` and returns the result of the subtraction.
    pub fn sub<T: Operand + ?Sized>(&self, d2: &T) -> Self {
        let d2f = d2.as_float();
        let p = self.result_precision(d2, d2f.p);
        self.sub_prec(&d2f, p)
    }

    /// Multiplies `self` by `d2` and returns the result of the multiplication.
    pub fn mul<T: Operand + ?Sized>(&self, d2: &T) -> Self {
        let d2f = d2.as_float();
        let p = self.result_precision(d2, d2f.p);
        self.mul_prec(&d2f, p)
    }

    /// Divides `self` by `d2` and returns the result of the division.
    pub fn div<T: Operand + ?Sized>(&self, d2: &T) -> Self {
        let d2f = d2.as_float();
        let p = self.result_precision(d2, d2f.p);
        self.div_prec(&d2f, p)
    }

    /// Adds `d2` to `self` and returns the result rounded to precision `p`.
    pub fn add_prec(&self, d2: &Self, p: usize) -> Self {
        let p = clamp_p(p);
        match (&self.inner, &d2.inner) {
            (Flavor::NaN(e), _) | (_, Flavor::NaN(e)) => Self::nan_err(*e, p),
            (Flavor::Value(v1), Flavor::Value(v2)) => Self::result_to_ext(v1.add(v2, p), p, false, true),
            (Flavor::Inf(s), Flavor::Value(_)) | (Flavor::Value(_), Flavor::Inf(s)) => Self::inf_p(*s, p),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => {
                if s1 == s2 {
                    Self::inf_p(*s1, p)
                } else {
                    Self::nan_err(None, p)
                }
            }
        }
    }

    /// Subtracts `d2` from `self` and returns the result rounded to precision `p`.
    pub fn sub_prec(&self, d2: &Self, p: usize) -> Self {
        let p = clamp_p(p);
        match (&self.inner, &d2.inner) {
            (Flavor::NaN(e), _) | (_, Flavor::NaN(e)) => Self::nan_err(*e, p),
            (Flavor::Value(v1), Flavor::Value(v2)) => Self::result_to_ext(v1.sub(v2, p), p, false, true),
            (Flavor::Inf(s), Flavor::Value(_)) => Self::inf_p(*s, p),
            (Flavor::Value(_), Flavor::Inf(s)) => Self::inf_p(s.invert(), p),
            (Flavor::Inf(s1), Flavor::Inf(s2)) => {
                if s1 != s2 {
                    Self::inf_p(*s1, p)
                } else {
                    Self::nan_err(None, p)
                }
            }
        }
    }

    /// Multiplies `self` by `d2` and returns the result rounded to precision `p`.
    pub fn mul_prec(&self, d2: &Self, p: usize) -> Self {
        let p = clamp_p(p);
        match (&self.inner, &d2.inner) {
            (Flavor::NaN(e), _) | (_, Flavor::NaN(e)) => Self::nan_err(*e, p),
            (Flavor::Value(v1), Flavor::Value(v2)) => Self::result_to_ext(v1.mul(v2, p), p, false, true),
            (Flavor::Inf(s), Flavor::Value(v)) | (Flavor::Value(v), Flavor::Inf(s)) => {
                if v.is_zero() {
                    // 0 * inf
                    Self::nan_err(None, p)
                } else {
                    Self::inf_p(if v.sign() == *s { Sign::Pos } else { Sign::Neg }, p)
                }
            }
            (Flavor::Inf(s1), Flavor::Inf(s2)) => Self::inf_p(if s1 == s2 { Sign::Pos } else { Sign::Neg }, p),
        }
    }

    /// Divides `self` by `d2` and returns the result rounded to precision `p`.
    pub fn div_prec(&self, d2: &Self, p: usize) -> Self {
        let p = clamp_p(p);
        match (&self.inner, &d2.inner) {
            (Flavor::NaN(e), _) | (_, Flavor::NaN(e)) => Self::nan_err(*e, p),
            (Flavor::Value(v1), Flavor::Value(v2)) => {
                Self::result_to_ext(v1.div(v2, p), p, v1.is_zero(), v1.sign() == v2.sign())
            }
            (Flavor::Inf(s), Flavor::Value(v)) => {
                Self::inf_p(if v.sign() == *s { Sign::Pos } else { Sign::Neg }, p)
            }
            (Flavor::Value(_), Flavor::Inf(_)) => Self::with_precision(p),
            (Flavor::Inf(_), Flavor::Inf(_)) => Self::nan_err(None, p),
        }
    }

    /// Returns `sqrt(self^2 + d2^2)`.
    pub fn hypot<T: Operand + ?Sized>(&self, d2: &T) -> Self {
        let d2f = d2.as_float();
        let p = self.result_precision(d2, d2f.p);
        match (&self.inner, &d2f.inner) {
            (Flavor::Inf(_), _) | (_, Flavor::Inf(_)) => Self::inf_p(Sign::Pos, p),
            (Flavor::NaN(e), _) | (_, Flavor::NaN(e)) => Self::nan_err(*e, p),
            (Flavor::Value(a), Flavor::Value(b)) => {
                // squares are exact
                let res = a
                    .mul(a, 2 * a.bit_len().max(1))
                    .and_then(|a2| b.mul(b, 2 * b.bit_len().max(1)).and_then(|b2| a2.add(&b2, p + GUARD_BITS)))
                    .and_then(|s| s.sqrt(p));
                Self::result_to_ext(res, p, false, true)
            }
        }
    }

    /// Returns `self` multiplied by `2^n`. The result is exact.
    pub fn mul_2exp(&self, n: Exponent) -> Self {
        match &self.inner {
            Flavor::Value(v) => Self::from_number(v.mul_2exp(n), self.p),
            _ => self.clone(),
        }
    }

    /// Returns `self` divided by `2^n`. The result is exact.
    pub fn div_2exp(&self, n: Exponent) -> Self {
        self.mul_2exp(-n)
    }

    /// Returns the value of `self` converted to f64 with rounding to the nearest.
    pub fn to_f64(&self) -> f64 {
        match &self.inner {
            Flavor::Value(v) => v.to_f64(),
            Flavor::Inf(s) => {
                if s.is_positive() {
                    f64::INFINITY
                } else {
                    f64::NEG_INFINITY
                }
            }
            Flavor::NaN(_) => f64::NAN,
        }
    }

    /// Returns the value of `self` converted to f32 with rounding to the nearest.
    pub fn to_f32(&self) -> f32 {
        Self::with_value(self, 24).to_f64() as f32
    }

    /// Returns the integer part of `self` as i64, or None if `self` is not finite or does not fit.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|i| i64::try_from(i).ok())
    }

    /// Returns the integer part of `self` as u64, or None if `self` is not finite or does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|i| u64::try_from(i).ok())
    }

    /// Returns the integer part of `self` as i128, or None if `self` is not finite or does not fit.
    pub fn to_i128(&self) -> Option<i128> {
        self.as_number().and_then(|v| v.to_i128())
    }

    /// Returns the integer part of `self` as u128, or None if `self` is not finite or does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        self.as_number().and_then(|v| v.to_u128())
    }

    /// Returns the integer part of `self`.
    ///
    /// ## Errors
    ///
    ///  - OutOfDomain: `self` is `NaN` or `Inf`.
    pub fn to_integer(&self) -> Result<BigInt, Error> {
        self.as_number().map(|v| v.to_int()).ok_or(Error::OutOfDomain)
    }

    /// Returns the exact value of `self` as a rational number.
    ///
    /// ## Errors
    ///
    ///  - OutOfDomain: `self` is `NaN` or `Inf`.
    pub fn to_rational(&self) -> Result<BigRational, Error> {
        self.as_number().map(|v| v.to_rational()).ok_or(Error::OutOfDomain)
    }

    /// Returns the sign, the digits in radix `rdx`, and the exponent `e` such that `self = 0.d1d2d3... * rdx^e`.
    /// `n` is the number of significant digits; if `n` is 0, enough digits are produced to restore the value
    /// by parsing with the same precision. Trailing zeroes are removed. Zero has no digits.
    ///
    /// ## Errors
    ///
    ///  - OutOfDomain: `self` is `NaN` or `Inf`.
    ///  - MemoryAllocation: failed to allocate memory for the digits.
    pub fn to_digits(&self, rdx: Radix, n: usize) -> Result<(Sign, String, Exponent), Error> {
        match &self.inner {
            Flavor::Value(v) => v.to_digits(rdx, n, self.p),
            _ => Err(Error::OutOfDomain),
        }
    }

    fn nan_err(e: Option<Error>, p: usize) -> Self {
        BigFloat {
            p,
            inner: Flavor::NaN(e),
        }
    }

    fn inf_p(s: Sign, p: usize) -> Self {
        BigFloat {
            p,
            inner: Flavor::Inf(s),
        }
    }

    fn result_to_ext(
        res: Result<FloatNumber, Error>,
        p: usize,
        is_dividend_zero: bool,
        is_same_sign: bool,
    ) -> Self {
        let inner = match res {
            Ok(v) => Flavor::Value(v),
            Err(Error::ExponentOverflow(s)) => Flavor::Inf(s),
            Err(Error::DivisionByZero) => {
                if is_dividend_zero {
                    Flavor::NaN(Some(Error::DivisionByZero))
                } else if is_same_sign {
                    Flavor::Inf(Sign::Pos)
                } else {
                    Flavor::Inf(Sign::Neg)
                }
            }
            Err(e) => Flavor::NaN(Some(e)),
        };

        BigFloat { p, inner }
    }
}

macro_rules! gen_wrapper_exact {
    // exact operation, infallible in the engine
    ($comment:literal, $fname:ident, $pos_inf:expr, $neg_inf:expr) => {
        #[doc=$comment]
        pub fn $fname(&self) -> Self {
            let inner = match &self.inner {
                Flavor::Value(v) => Flavor::Value(v.$fname()),
                Flavor::Inf(s) => {
                    if s.is_positive() {
                        $pos_inf
                    } else {
                        $neg_inf
                    }
                }
                Flavor::NaN(e) => Flavor::NaN(*e),
            };
            BigFloat { p: self.p, inner }
        }
    };
}

macro_rules! gen_wrapper_p {
    // rounded to the precision of self, the engine reports errors
    ($comment:literal, $fname:ident, $engine_fname:ident, $pos_inf:expr, $neg_inf:expr) => {
        #[doc=$comment]
        pub fn $fname(&self) -> Self {
            match &self.inner {
                Flavor::Value(v) => Self::result_to_ext(v.$engine_fname(self.p), self.p, v.is_zero(), true),
                Flavor::Inf(s) => BigFloat {
                    p: self.p,
                    inner: if s.is_positive() { $pos_inf } else { $neg_inf },
                },
                Flavor::NaN(e) => Self::nan_err(*e, self.p),
            }
        }
    };
}

impl BigFloat {
    gen_wrapper_exact!("Returns the absolute value of `self`.", abs, Flavor::Inf(Sign::Pos), Flavor::Inf(Sign::Pos));
    gen_wrapper_exact!("Returns `self` with the opposite sign.", neg, Flavor::Inf(Sign::Neg), Flavor::Inf(Sign::Pos));
    gen_wrapper_exact!("Returns the integer part of `self`.", trunc, Flavor::Inf(Sign::Pos), Flavor::Inf(Sign::Neg));
    gen_wrapper_exact!(
        "Returns the smallest integer greater than or equal to `self`.",
        ceil,
        Flavor::Inf(Sign::Pos),
        Flavor::Inf(Sign::Neg)
    );
    gen_wrapper_exact!(
        "Returns the largest integer less than or equal to `self`.",
        floor,
        Flavor::Inf(Sign::Pos),
        Flavor::Inf(Sign::Neg)
    );

    gen_wrapper_p!(
        "Returns the square root of `self`. The square root of a negative number is `NaN`.",
        sqrt,
        sqrt,
        Flavor::Inf(Sign::Pos),
        Flavor::NaN(Some(Error::InvalidArgument))
    );
    gen_wrapper_p!(
        "Returns the natural logarithm of `self`. The logarithm of zero is negative infinity, and the logarithm of a negative number is `NaN`.",
        log,
        ln,
        Flavor::Inf(Sign::Pos),
        Flavor::NaN(Some(Error::OutOfDomain))
    );
    gen_wrapper_p!(
        "Returns `e` to the power of `self`.",
        exp,
        exp,
        Flavor::Inf(Sign::Pos),
        Flavor::Value(FloatNumber::new())
    );
}

/// Returns `sqrt(a^2 + b^2)`.
pub fn hypot(a: &BigFloat, b: &BigFloat) -> BigFloat {
    a.hypot(b)
}

macro_rules! impl_int_conv {
    ($s:ty, $from_s:ident, $from_s_prec:ident) => {
        impl BigFloat {
            #[doc = concat!("Constructs a BigFloat from `", stringify!($s), "` with the default precision.")]
            pub fn $from_s(i: $s) -> Self {
                Self::$from_s_prec(i, get_default_prec())
            }

            #[doc = concat!("Constructs a BigFloat from `", stringify!($s), "` with precision `p`.")]
            pub fn $from_s_prec(i: $s, p: usize) -> Self {
                let p = clamp_p(p);
                Self::result_to_ext(FloatNumber::from_int(BigInt::from(i), p), p, false, true)
            }
        }

        impl From<$s> for BigFloat {
            fn from(i: $s) -> Self {
                BigFloat::$from_s(i)
            }
        }

        impl Operand for $s {
            fn as_float(&self) -> Cow<'_, BigFloat> {
                Cow::Owned(BigFloat::$from_s_prec(*self, <$s>::BITS as usize))
            }

            fn carries_precision(&self) -> bool {
                false
            }
        }
    };
}

impl_int_conv!(i8, from_i8, from_i8_prec);
impl_int_conv!(i16, from_i16, from_i16_prec);
impl_int_conv!(i32, from_i32, from_i32_prec);
impl_int_conv!(i64, from_i64, from_i64_prec);
impl_int_conv!(i128, from_i128, from_i128_prec);
impl_int_conv!(isize, from_isize, from_isize_prec);

impl_int_conv!(u8, from_u8, from_u8_prec);
impl_int_conv!(u16, from_u16, from_u16_prec);
impl_int_conv!(u32, from_u32, from_u32_prec);
impl_int_conv!(u64, from_u64, from_u64_prec);
impl_int_conv!(u128, from_u128, from_u128_prec);
impl_int_conv!(usize, from_usize, from_usize_prec);

impl Operand for f64 {
    fn as_float(&self) -> Cow<'_, BigFloat> {
        Cow::Owned(BigFloat::from_f64_prec(*self, 53))
    }

    fn carries_precision(&self) -> bool {
        false
    }
}

impl Operand for f32 {
    fn as_float(&self) -> Cow<'_, BigFloat> {
        Cow::Owned(BigFloat::from_f32_prec(*self, 24))
    }

    fn carries_precision(&self) -> bool {
        false
    }
}

impl From<f64> for BigFloat {
    fn from(f: f64) -> Self {
        BigFloat::from_f64(f)
    }
}

impl From<f32> for BigFloat {
    fn from(f: f32) -> Self {
        BigFloat::from_f32(f)
    }
}

impl From<&BigInt> for BigFloat {
    fn from(i: &BigInt) -> Self {
        BigFloat::from_integer(i)
    }
}

impl From<&BigRational> for BigFloat {
    fn from(r: &BigRational) -> Self {
        BigFloat::from_rational(r)
    }
}

#[cfg(feature = "random")]
impl BigFloat {
    /// Returns a random number uniformly distributed in `[0, 1)` with the default precision.
    pub fn random() -> Self {
        use num_bigint::BigUint;

        let p = get_default_prec();
        let words: Vec<u32> = (0..(p + 31) / 32).map(|_| rand::random::<u32>()).collect();
        let m = BigUint::new(words) >> ((32 - p % 32) % 32);

        Self::result_to_ext(
            FloatNumber::from_parts(BigInt::from(m), -(p as Exponent), p),
            p,
            false,
            true,
        )
    }
}

//
// ops traits
//

macro_rules! impl_bin_op {
    ($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident, $prec_fn:ident) => {
        impl<T: Operand> $op_trait<T> for BigFloat {
            type Output = BigFloat;
            fn $op_fn(self, rhs: T) -> Self::Output {
                BigFloat::$op_fn(&self, &rhs)
            }
        }

        impl<T: Operand> $op_trait<T> for &BigFloat {
            type Output = BigFloat;
            fn $op_fn(self, rhs: T) -> Self::Output {
                BigFloat::$op_fn(self, &rhs)
            }
        }

        impl<T: Operand> $assign_trait<T> for BigFloat {
            fn $assign_fn(&mut self, rhs: T) {
                let rhs = rhs.as_float();
                *self = self.$prec_fn(&rhs, self.p);
            }
        }
    };
}

impl_bin_op!(Add, add, AddAssign, add_assign, add_prec);
impl_bin_op!(Sub, sub, SubAssign, sub_assign, sub_prec);
impl_bin_op!(Mul, mul, MulAssign, mul_assign, mul_prec);
impl_bin_op!(Div, div, DivAssign, div_assign, div_prec);

// primitive on the left side of an operation
macro_rules! impl_prim_lhs {
    ($($s:ty)*) => {
        $(
            impl_prim_lhs!(@op $s, Add, add, add_prec);
            impl_prim_lhs!(@op $s, Sub, sub, sub_prec);
            impl_prim_lhs!(@op $s, Mul, mul, mul_prec);
            impl_prim_lhs!(@op $s, Div, div, div_prec);

            impl PartialEq<BigFloat> for $s {
                fn eq(&self, other: &BigFloat) -> bool {
                    other.cmp_value(self) == Some(Ordering::Equal)
                }
            }

            impl PartialOrd<BigFloat> for $s {
                fn partial_cmp(&self, other: &BigFloat) -> Option<Ordering> {
                    other.cmp_value(self).map(|o| o.reverse())
                }
            }
        )*
    };

    (@op $s:ty, $op_trait:ident, $op_fn:ident, $prec_fn:ident) => {
        impl $op_trait<BigFloat> for $s {
            type Output = BigFloat;
            fn $op_fn(self, rhs: BigFloat) -> Self::Output {
                $op_trait::$op_fn(self, &rhs)
            }
        }

        impl $op_trait<&BigFloat> for $s {
            type Output = BigFloat;
            fn $op_fn(self, rhs: &BigFloat) -> Self::Output {
                let lhs = self.as_float();
                let p = match get_precision_mode() {
                    PrecisionMode::Ambient => get_default_prec(),
                    PrecisionMode::Propagate => rhs.p,
                };
                lhs.$prec_fn(rhs, p)
            }
        }
    };
}

impl_prim_lhs!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize f32 f64);

impl Neg for BigFloat {
    type Output = BigFloat;
    fn neg(self) -> Self::Output {
        BigFloat::neg(&self)
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;
    fn neg(self) -> Self::Output {
        BigFloat::neg(self)
    }
}

//
// ordering traits
//

impl<T: Operand> PartialEq<T> for BigFloat {
    fn eq(&self, other: &T) -> bool {
        self.cmp_value(other) == Some(Ordering::Equal)
    }
}

impl<T: Operand> PartialOrd<T> for BigFloat {
    fn partial_cmp(&self, other: &T) -> Option<Ordering> {
        self.cmp_value(other)
    }
}

impl Default for BigFloat {
    fn default() -> BigFloat {
        BigFloat::new()
    }
}

impl FromStr for BigFloat {
    type Err = Error;

    /// Returns the parsed number, or `Error::InvalidNumeral`.
    fn from_str(src: &str) -> Result<BigFloat, Self::Err> {
        BigFloat::parse(src)
    }
}

impl Sum for BigFloat {
    fn sum<I: Iterator<Item = BigFloat>>(iter: I) -> Self {
        iter.reduce(|acc, v| &acc + &v).unwrap_or_default()
    }
}

impl Product for BigFloat {
    fn product<I: Iterator<Item = BigFloat>>(iter: I) -> Self {
        iter.reduce(|acc, v| &acc * &v).unwrap_or_else(|| BigFloat::from_u8(1))
    }
}

impl<'a> Sum<&'a BigFloat> for BigFloat {
    fn sum<I: Iterator<Item = &'a BigFloat>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<BigFloat>, v| match acc {
            Some(acc) => Some(&acc + v),
            None => Some(v.clone()),
        })
        .unwrap_or_default()
    }
}

impl<'a> Product<&'a BigFloat> for BigFloat {
    fn product<I: Iterator<Item = &'a BigFloat>>(iter: I) -> Self {
        iter.fold(None, |acc: Option<BigFloat>, v| match acc {
            Some(acc) => Some(&acc * v),
            None => Some(v.clone()),
        })
        .unwrap_or_else(|| BigFloat::from_u8(1))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::ctx::set_precision_mode;
    use crate::ctx::with_default_context;
    use rand::random;

    #[test]
    fn test_construction() {
        let d = BigFloat::new();
        assert_eq!(d.precision(), get_default_prec());
        assert!(d.is_zero());
        assert_eq!(d.sgn(), 0);

        let d = BigFloat::with_precision(0);
        assert_eq!(d.precision(), MIN_P);

        let d = BigFloat::from_f64_prec(f64::NAN, 64);
        assert!(d.is_nan());
        assert_eq!(d.err(), None);
        assert_eq!(d.sgn(), 0);
        assert!(BigFloat::from_f64(f64::INFINITY).is_inf_pos());
        assert!(BigFloat::from_f32(f32::NEG_INFINITY).is_inf_neg());

        let d = BigFloat::from_i32_prec(-13, 2);
        assert_eq!(d.precision(), 2);
        assert_eq!(d.to_f64(), -12.0);
        assert_eq!(d.sgn(), -1);

        let d = BigFloat::from_u128(u128::MAX);
        assert_eq!(d.to_u128(), Some(u128::MAX));
        assert_eq!(d.to_i64(), None);

        let r = BigRational::new(BigInt::from(1), BigInt::from(3));
        let d = BigFloat::from_rational_prec(&r, 53);
        assert_eq!(d.to_f64(), 1.0 / 3.0);

        let d = BigFloat::with_value(&BigFloat::from_f64_prec(1.0 / 3.0, 53), 10);
        assert_eq!(d.precision(), 10);
        assert_eq!(d.to_f64(), 683.0 / 2048.0);

        let d = BigFloat::from_integer_prec(&BigInt::from(1023), 4);
        assert_eq!(d.to_integer().unwrap(), BigInt::from(1024));
        assert_eq!(BigFloat::nan().to_integer().unwrap_err(), Error::OutOfDomain);
        assert_eq!(BigFloat::inf(Sign::Pos).to_rational().unwrap_err(), Error::OutOfDomain);
        assert_eq!(
            BigFloat::from_f64_prec(-0.375, 53).to_rational().unwrap(),
            BigRational::new(BigInt::from(-3), BigInt::from(8))
        );

        let (f, e) = BigFloat::from_f64_prec(10.0, 64).frexp().unwrap();
        assert_eq!(e, 4);
        assert_eq!(f.to_f64(), 0.625);
        assert_eq!(f.precision(), 64);
        assert!(BigFloat::nan().frexp().is_none());
    }

    #[test]
    fn test_arith() {
        let d1 = BigFloat::from_f64_prec(1.5, 64);
        let d2 = BigFloat::from_f64_prec(-0.25, 128);

        let r = &d1 + &d2;
        assert_eq!(r.precision(), 128);
        assert_eq!(r.to_f64(), 1.25);
        assert_eq!((&d1 - &d2).to_f64(), 1.75);
        assert_eq!((&d1 * &d2).to_f64(), -0.375);
        assert_eq!((&d1 / &d2).to_f64(), -6.0);
        assert_eq!((-&d1).to_f64(), -1.5);

        // primitive operands do not change precision
        let r = &d1 + 2.5;
        assert_eq!(r.precision(), 64);
        assert_eq!(r.to_f64(), 4.0);
        let r = 10u8 - &d1;
        assert_eq!(r.precision(), 64);
        assert_eq!(r.to_f64(), 8.5);
        assert_eq!((3i32 * d1.clone()).to_f64(), 4.5);
        assert_eq!((1i128 / &d2).to_f64(), -4.0);

        // compound assignment keeps the destination precision
        let mut d3 = BigFloat::from_f64_prec(1.0, 2);
        d3 += &d2;
        assert_eq!(d3.precision(), 2);
        assert_eq!(d3.to_f64(), 0.75);
        d3 *= 3;
        assert_eq!(d3.to_f64(), 2.0);
        d3 -= 0.5f32;
        assert_eq!(d3.to_f64(), 1.5);
        d3 /= d1.clone();
        assert_eq!(d3.to_f64(), 1.0);

        // inf and nan
        let zero = BigFloat::with_precision(64);
        let one = BigFloat::from_f64_prec(1.0, 64);
        assert!((&one / &zero).is_inf_pos());
        assert!((-&one / &zero).is_inf_neg());
        let n = &zero / &zero;
        assert!(n.is_nan());
        assert_eq!(n.err(), Some(Error::DivisionByZero));
        let inf = BigFloat::inf(Sign::Pos);
        assert!((&inf - &inf).is_nan());
        assert!((&inf + &inf).is_inf_pos());
        assert!((&inf * &zero).is_nan());
        assert!((&one / &inf).is_zero());
        assert!((&inf * -2).is_inf_neg());
        assert!((&n + &one).is_nan());
        assert_eq!((&n + &one).err(), Some(Error::DivisionByZero));

        for _ in 0..1000 {
            let f1 = random::<f64>() * 1000.0 - 500.0;
            let f2 = random::<f64>() * 2.0 - 1.0;
            let d1 = BigFloat::from_f64_prec(f1, 53);
            let d2 = BigFloat::from_f64_prec(f2, 53);
            assert_eq!((&d1 + &d2).to_f64(), f1 + f2);
            assert_eq!((&d1 - &d2).to_f64(), f1 - f2);
            assert_eq!((&d1 * &d2).to_f64(), f1 * f2);
            assert_eq!((&d1 / &d2).to_f64(), f1 / f2);
            assert_eq!(d1.abs().sqrt().to_f64(), f1.abs().sqrt());
        }
    }

    #[test]
    fn test_precision_mode() {
        let d1 = BigFloat::from_f64_prec(1.5, 64);
        let d2 = BigFloat::from_f64_prec(-0.25, 128);

        with_default_context(|ctx| {
            ctx.precision(100);
        });
        set_precision_mode(PrecisionMode::Ambient);
        assert_eq!((&d1 + &d2).precision(), 100);
        assert_eq!((&d1 * 2).precision(), 100);
        assert_eq!((2i32 * &d1).precision(), 100);

        set_precision_mode(PrecisionMode::Propagate);
        assert_eq!((&d1 + &d2).precision(), 128);
        assert_eq!((&d1 * 2).precision(), 64);
        with_default_context(|ctx| {
            ctx.precision(crate::defs::DEFAULT_P);
        });
    }

    #[test]
    fn test_unary() {
        let d = BigFloat::from_f64_prec(-2.5, 10);

        assert_eq!(d.abs().to_f64(), 2.5);
        assert_eq!((-&d).to_f64(), 2.5);
        assert_eq!(d.trunc().to_f64(), -2.0);
        assert_eq!(d.floor().to_f64(), -3.0);
        assert_eq!(d.ceil().to_f64(), -2.0);
        assert_eq!(d.floor().precision(), 10);
        assert_eq!(d.mul_2exp(3).to_f64(), -20.0);
        assert_eq!(d.div_2exp(1).to_f64(), -1.25);

        let s = d.sqrt();
        assert!(s.is_nan());
        assert_eq!(s.err(), Some(Error::InvalidArgument));

        let l = d.log();
        assert!(l.is_nan());
        assert_eq!(l.err(), Some(Error::OutOfDomain));
        assert!(BigFloat::with_precision(10).log().is_inf_neg());
        assert!(BigFloat::from_f64_prec(1.0, 10).log().is_zero());

        assert!(BigFloat::inf(Sign::Neg).exp().is_zero());
        assert!(BigFloat::inf(Sign::Pos).log().is_inf_pos());
        assert!(BigFloat::inf(Sign::Neg).abs().is_inf_pos());
        assert!((-BigFloat::inf(Sign::Pos)).is_inf_neg());
        assert!(BigFloat::from_f64_prec(1e20, 64).exp().is_inf_pos());
        assert!(BigFloat::from_f64_prec(-1e20, 64).exp().is_zero());

        let e = BigFloat::from_f64_prec(1.0, 53).exp();
        assert_eq!(e.precision(), 53);
        assert_eq!(e.to_f64(), core::f64::consts::E);

        let h = hypot(&BigFloat::from_i8_prec(3, 8), &BigFloat::from_i8_prec(-4, 16));
        assert_eq!(h.precision(), 16);
        assert_eq!(h.to_f64(), 5.0);
        assert!(hypot(&BigFloat::nan(), &BigFloat::inf(Sign::Neg)).is_inf_pos());
    }

    #[test]
    fn test_assign_cmp() {
        let mut d = BigFloat::with_precision(4);
        d.assign(BigFloat::from_f64_prec(1.0 / 3.0, 53));
        assert_eq!(d.precision(), 4);
        assert_eq!(d.to_f64(), 0.34375);

        d.assign_f64(17.0);
        assert_eq!(d.to_f64(), 16.0);

        d.assign_str("0.5e1").unwrap();
        assert_eq!(d.precision(), 4);
        assert_eq!(d.to_f64(), 5.0);
        assert_eq!(d.assign_str("5x").unwrap_err(), Error::InvalidNumeral);
        assert_eq!(d.to_f64(), 5.0);

        d.set_precision(2);
        assert_eq!(d.precision(), 2);
        assert_eq!(d.to_f64(), 4.0);

        let a = BigFloat::from_f64_prec(1.5, 64);
        let b = BigFloat::from_f64_prec(1.5, 128);
        assert!(a == b);
        assert!(a == 1.5);
        assert!(1.5 == a);
        assert!(a < 2);
        assert!(2u64 > a);
        assert!(a > BigFloat::inf(Sign::Neg));
        assert!(BigFloat::nan() != BigFloat::nan());
        assert_eq!(a.cmp_value(&BigFloat::nan()), None);
        assert_eq!(a.cmp_value(&1), Some(Ordering::Greater));

        let v = vec![a.clone(), b.clone(), BigFloat::from_f64_prec(1.0, 10)];
        let s: BigFloat = v.iter().sum();
        assert_eq!(s.to_f64(), 4.0);
        assert_eq!(s.precision(), 128);
        let p: BigFloat = v.into_iter().product();
        assert_eq!(p.to_f64(), 2.25);

        let x: BigFloat = "  -12.5 ".parse().unwrap();
        assert_eq!(x.to_f64(), -12.5);
        assert_eq!("abc".parse::<BigFloat>().unwrap_err(), Error::InvalidNumeral);
        assert!(BigFloat::parse("-inf").unwrap().is_inf_neg());
        assert!(BigFloat::parse("NaN").unwrap().is_nan());
        assert_eq!(BigFloat::parse_radix("-ff.8", Radix::Hex, 16).unwrap().to_f64(), -255.5);
        assert_eq!(BigFloat::parse_radix("1.1@3", Radix::Bin, 16).unwrap().to_f64(), 12.0);
    }

    #[cfg(feature = "random")]
    #[test]
    fn test_rand() {
        for _ in 0..1000 {
            let d = BigFloat::random();
            assert_eq!(d.precision(), get_default_prec());
            assert!(d >= 0);
            assert!(d < 1);
        }
    }
}
