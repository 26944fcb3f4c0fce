//! FloatNumber definition and basic arithmetic, comparison, and number manipulation operations.
//!
//! `FloatNumber` is a finite binary floating point number `m * 2^e` with an arbitrary-precision integer mantissa.
//! It does not store its precision: every operation takes the precision of the result as an argument,
//! and the result is rounded half to even to that many significant bits.

use core::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign as BigSign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::common::consts::TEN;
use crate::defs::{Error, Exponent, Radix, Sign, GUARD_BITS, MIN_P, RADIX_POWER_MAX, SCALE_ATTEMPTS};

/// Finite floating point number.
#[derive(Debug, Clone)]
pub(crate) struct FloatNumber {
    m: BigInt,
    e: Exponent,
}

/// Check the precision `p` is usable.
#[inline]
pub(crate) fn check_p(p: usize) -> Result<(), Error> {
    if p < MIN_P {
        Err(Error::InvalidArgument)
    } else {
        Ok(())
    }
}

/// Returns the number of digits in radix `rdx` needed to represent `p` bits.
pub(crate) fn digits_for_precision(p: usize, rdx: Radix) -> usize {
    match rdx {
        Radix::Bin => p + 1,
        Radix::Oct => (p + 2) / 3 + 1,
        Radix::Hex => (p + 3) / 4 + 1,
        Radix::Dec => ((p as f64) * core::f64::consts::LOG10_2).ceil() as usize + 1,
    }
}

impl FloatNumber {
    /// Returns zero.
    pub fn new() -> Self {
        FloatNumber {
            m: BigInt::zero(),
            e: 0,
        }
    }

    /// Constructs a number `m * 2^e` rounded to precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: the precision is incorrect.
    pub fn from_parts(m: BigInt, e: Exponent, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        if m.is_zero() {
            return Ok(Self::new());
        }

        let bits = m.bits() as usize;
        if bits <= p {
            return Ok(FloatNumber { m, e });
        }

        let sh = bits - p;
        let (sign, mag) = m.into_parts();
        let mut q = &mag >> sh;
        let rem = mag - (&q << sh);
        let half = BigUint::one() << (sh - 1);

        let round_up = match rem.cmp(&half) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => q.is_odd(),
        };

        let mut e = e + sh as Exponent;
        if round_up {
            q += 1u32;
            if q.bits() as usize > p {
                // carry produced a power of two
                q >>= 1usize;
                e += 1;
            }
        }

        Ok(FloatNumber {
            m: BigInt::from_biguint(sign, q),
            e,
        })
    }

    /// Constructs a number `(n / d) * 2^e` rounded to precision `p`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d` is zero.
    ///  - InvalidArgument: the precision is incorrect.
    pub fn from_ratio(n: &BigInt, d: &BigInt, e: Exponent, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        if d.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if n.is_zero() {
            return Ok(Self::new());
        }

        let sign = if n.is_negative() == d.is_negative() { BigSign::Plus } else { BigSign::Minus };
        let (nm, dm) = (n.magnitude(), d.magnitude());

        // quotient must have at least p + 2 bits so that the sticky bit is below the rounding bit
        let s = (p + 2 + dm.bits() as usize).saturating_sub(nm.bits() as usize);
        let (mut q, r) = (nm << s).div_rem(dm);
        let mut e = e - s as Exponent;

        if !r.is_zero() {
            q <<= 1usize;
            q += 1u32;
            e -= 1;
        }

        Self::from_parts(BigInt::from_biguint(sign, q), e, p)
    }

    /// Constructs a number from an integer exactly.
    pub fn from_i64(i: i64) -> Self {
        FloatNumber {
            m: BigInt::from(i),
            e: 0,
        }
    }

    /// Constructs a number from an integer with precision `p`.
    pub fn from_int(i: BigInt, p: usize) -> Result<Self, Error> {
        Self::from_parts(i, 0, p)
    }

    /// Constructs a number from a finite f64 value with precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `f` is not finite, or the precision is incorrect.
    pub fn from_f64(f: f64, p: usize) -> Result<Self, Error> {
        if !f.is_finite() {
            return Err(Error::InvalidArgument);
        }

        let bits = f.to_bits();
        let neg = bits >> 63 != 0;
        let be = ((bits >> 52) & 0x7ff) as Exponent;
        let frac = bits & ((1u64 << 52) - 1);

        let (m, e) = if be == 0 { (frac, -1074) } else { (frac | (1u64 << 52), be - 1075) };

        let mut m = BigInt::from(m);
        if neg {
            m = -m;
        }

        Self::from_parts(m, e, p)
    }

    /// Constructs a number from digits in radix `rdx`.
    /// The value is `0.d1d2d3... * rdx^exp`, where `d1, d2, d3, ...` are `digits`.
    ///
    /// ## Errors
    ///
    ///  - InvalidNumeral: a digit is outside of the radix.
    ///  - InvalidArgument: the precision is incorrect.
    pub fn from_digits(
        sign: Sign,
        digits: &[u8],
        exp: Exponent,
        rdx: Radix,
        p: usize,
    ) -> Result<Self, Error> {
        check_p(p)?;

        if digits.is_empty() {
            return Ok(Self::new());
        }

        let d = BigUint::from_radix_be(digits, rdx.base()).ok_or(Error::InvalidNumeral)?;
        if d.is_zero() {
            return Ok(Self::new());
        }

        let bsign = if sign.is_negative() { BigSign::Minus } else { BigSign::Plus };
        let d = BigInt::from_biguint(bsign, d);

        let scale = exp - digits.len() as Exponent;

        if let Some(b) = rdx.digit_bits() {
            return Self::from_parts(d, scale * b, p);
        }

        let n = scale.unsigned_abs();
        if n <= (p + d.bits() as usize + 64) as u64 {
            let n = u32::try_from(n).map_err(|_| Error::ExponentOverflow(sign))?;
            let f = BigInt::from(BigUint::from(10u32).pow(n));
            return if scale >= 0 {
                Self::from_parts(d * f, 0, p)
            } else {
                Self::from_ratio(&d, &f, 0, p)
            };
        }

        // The exact value is neither representable nor a tie at this scale,
        // so raising the working precision eventually decides the rounding.
        let x = FloatNumber { m: d, e: 0 };
        let mut w = p + GUARD_BITS + 2 * bit_len_u64(n);
        loop {
            let (y, ee) = x.scale_dec(scale, w)?;
            let err = FloatNumber {
                m: BigInt::one(),
                e: ee,
            };

            let lo = y.sub(&err, p)?;
            let hi = y.add(&err, p)?;
            if lo.cmp(&hi) == Ordering::Equal {
                return Ok(lo);
            }

            w += w / 2;
        }
    }

    /// Returns `self` raised to the power `n`, computed with precision `p`.
    /// The relative error of the result is below `2^(bits(n) + 2 - p)`.
    pub fn powi(&self, n: u64, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        let mut ret = Self::from_i64(1);
        for i in (0..bit_len_u64(n)).rev() {
            ret = ret.mul(&ret, p)?;
            if n & (1 << i) != 0 {
                ret = ret.mul(self, p)?;
            }
        }

        Ok(ret)
    }

    /// Returns an approximation of `self * 10^n` computed with working precision `w`,
    /// and the exponent `ee` such that the absolute error of the approximation is below `2^ee`.
    fn scale_dec(&self, n: Exponent, w: usize) -> Result<(Self, Exponent), Error> {
        let l = bit_len_u64(n.unsigned_abs());
        let pwr = TEN.powi(n.unsigned_abs(), w)?;

        let y = if n >= 0 { self.mul(&pwr, w)? } else { self.div(&pwr, w)? };
        let ee = y.exponent() + (l + 4) as Exponent - w as Exponent;

        Ok((y, ee))
    }

    /// Returns true if `self` is zero.
    pub fn is_zero(&self) -> bool {
        self.m.is_zero()
    }

    /// Returns true if `self` is negative.
    pub fn is_negative(&self) -> bool {
        self.m.is_negative()
    }

    /// Returns true if `self` is positive.
    pub fn is_positive(&self) -> bool {
        self.m.is_positive()
    }

    /// Returns the sign of `self`. Zero is positive.
    pub fn sign(&self) -> Sign {
        if self.m.is_negative() {
            Sign::Neg
        } else {
            Sign::Pos
        }
    }

    /// Returns the number of significant bits of the mantissa.
    pub fn bit_len(&self) -> usize {
        self.m.bits() as usize
    }

    /// Returns the exponent `E` such that `self = f * 2^E`, `0.5 <= |f| < 1`.
    /// Zero has exponent 0.
    pub fn exponent(&self) -> Exponent {
        if self.is_zero() {
            0
        } else {
            self.e + self.m.bits() as Exponent
        }
    }

    /// Returns the normalized value `f` and the exponent `E` such that `self = f * 2^E`, `0.5 <= |f| < 1`.
    pub fn frexp(&self) -> (Self, Exponent) {
        let e = self.exponent();
        (self.mul_2exp(-e), e)
    }

    /// Returns `self` rounded to precision `p`.
    pub fn round(&self, p: usize) -> Result<Self, Error> {
        Self::from_parts(self.m.clone(), self.e, p)
    }

    /// Returns `self * 2^n`.
    pub fn mul_2exp(&self, n: Exponent) -> Self {
        if self.is_zero() {
            return Self::new();
        }

        FloatNumber {
            m: self.m.clone(),
            e: self.e + n,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        FloatNumber {
            m: -&self.m,
            e: self.e,
        }
    }

    /// Returns the absolute value of `self`.
    pub fn abs(&self) -> Self {
        FloatNumber {
            m: self.m.abs(),
            e: self.e,
        }
    }

    /// Adds `d2` to `self` and returns the result rounded to precision `p`.
    pub fn add(&self, d2: &Self, p: usize) -> Result<Self, Error> {
        Self::add_parts(&self.m, self.e, &d2.m, d2.e, p)
    }

    /// Subtracts `d2` from `self` and returns the result rounded to precision `p`.
    pub fn sub(&self, d2: &Self, p: usize) -> Result<Self, Error> {
        Self::add_parts(&self.m, self.e, &-&d2.m, d2.e, p)
    }

    fn add_parts(
        m1: &BigInt,
        e1: Exponent,
        m2: &BigInt,
        e2: Exponent,
        p: usize,
    ) -> Result<Self, Error> {
        check_p(p)?;

        if m1.is_zero() {
            return Self::from_parts(m2.clone(), e2, p);
        }

        if m2.is_zero() {
            return Self::from_parts(m1.clone(), e1, p);
        }

        let t1 = e1 + m1.bits() as Exponent;
        let t2 = e2 + m2.bits() as Exponent;

        let ((mb, eb, tb), (ms, es, ts)) =
            if t1 >= t2 { ((m1, e1, t1), (m2, e2, t2)) } else { ((m2, e2, t2), (m1, e1, t1)) };

        // Below `low` the larger operand has no bits, and no bit of the result affects rounding
        // except as a sticky bit.
        let low = eb.min(tb - p as Exponent - 3);

        if ts < low {
            let sticky = if ms.is_negative() { -BigInt::one() } else { BigInt::one() };
            let e = low - 1;
            let m = (mb << (eb - e) as usize) + sticky;
            return Self::from_parts(m, e, p);
        }

        let e = eb.min(es);
        let m = (mb << (eb - e) as usize) + (ms << (es - e) as usize);

        Self::from_parts(m, e, p)
    }

    /// Multiplies `self` by `d2` and returns the result rounded to precision `p`.
    pub fn mul(&self, d2: &Self, p: usize) -> Result<Self, Error> {
        Self::from_parts(&self.m * &d2.m, self.e + d2.e, p)
    }

    /// Divides `self` by `d2` and returns the result rounded to precision `p`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d2` is zero.
    ///  - InvalidArgument: the precision is incorrect.
    pub fn div(&self, d2: &Self, p: usize) -> Result<Self, Error> {
        Self::from_ratio(&self.m, &d2.m, self.e - d2.e, p)
    }

    /// Returns the square root of `self` rounded to precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `self` is negative, or the precision is incorrect.
    pub fn sqrt(&self, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        if self.is_negative() {
            return Err(Error::InvalidArgument);
        }

        if self.is_zero() {
            return Ok(Self::new());
        }

        // root must have at least p + 2 bits, and the exponent must be even
        let bits = self.m.bits() as usize;
        let mut s = (2 * (p + 2)).saturating_sub(bits);
        if (self.e - s as Exponent).rem_euclid(2) != 0 {
            s += 1;
        }

        let n = self.m.magnitude() << s;
        let mut r = num_integer::Roots::sqrt(&n);
        let mut e = (self.e - s as Exponent) / 2;

        if &r * &r != n {
            r <<= 1usize;
            r += 1u32;
            e -= 1;
        }

        Self::from_parts(BigInt::from_biguint(BigSign::Plus, r), e, p)
    }

    /// Compares `self` to `d2`.
    pub fn cmp(&self, d2: &Self) -> Ordering {
        let s1 = self.m.sign();
        let s2 = d2.m.sign();

        if s1 != s2 {
            return s1.cmp(&s2);
        }

        if s1 == BigSign::NoSign {
            return Ordering::Equal;
        }

        let t1 = self.exponent();
        let t2 = d2.exponent();

        let ord = if t1 != t2 {
            t1.cmp(&t2)
        } else {
            let e = self.e.min(d2.e);
            let a = self.m.magnitude() << (self.e - e) as usize;
            let b = d2.m.magnitude() << (d2.e - e) as usize;
            a.cmp(&b)
        };

        if s1 == BigSign::Minus {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Returns true if `self` has a nonzero fractional part.
    pub fn has_fract(&self) -> bool {
        if self.e >= 0 || self.is_zero() {
            false
        } else {
            let tz = self.m.magnitude().trailing_zeros().unwrap_or(0);
            (tz as Exponent) < -self.e
        }
    }

    /// Returns the integer part of `self`.
    pub fn trunc(&self) -> Self {
        if self.e >= 0 {
            return self.clone();
        }

        let (sign, mag) = (self.m.sign(), self.m.magnitude());
        let sh = (-self.e) as u64;
        if sh >= mag.bits() {
            return Self::new();
        }

        FloatNumber {
            m: BigInt::from_biguint(sign, mag >> sh as usize),
            e: 0,
        }
    }

    /// Returns the largest integer less than or equal to `self`.
    pub fn floor(&self) -> Self {
        let t = self.trunc();
        if self.is_negative() && self.has_fract() {
            t.add_int(-1)
        } else {
            t
        }
    }

    /// Returns the smallest integer greater than or equal to `self`.
    pub fn ceil(&self) -> Self {
        let t = self.trunc();
        if self.is_positive() && self.has_fract() {
            t.add_int(1)
        } else {
            t
        }
    }

    // exact addition of a small integer to an integer value
    fn add_int(&self, i: i64) -> Self {
        let m = self.to_bigint_exact() + BigInt::from(i);
        if m.is_zero() {
            Self::new()
        } else {
            FloatNumber { m, e: 0 }
        }
    }

    // self must be an integer or the fractional part is dropped
    fn to_bigint_exact(&self) -> BigInt {
        if self.e >= 0 {
            &self.m << self.e as usize
        } else {
            self.trunc().m
        }
    }

    /// Returns the integer part of `self` as a big integer.
    pub fn to_int(&self) -> BigInt {
        self.trunc().to_bigint_exact()
    }

    /// Returns the integer part of `self` if it fits into i128.
    pub fn to_i128(&self) -> Option<i128> {
        let t = self.trunc();
        if t.exponent() > 128 {
            return None;
        }
        t.to_bigint_exact().to_i128()
    }

    /// Returns the integer part of `self` if it fits into u128.
    pub fn to_u128(&self) -> Option<u128> {
        let t = self.trunc();
        if t.exponent() > 128 {
            return None;
        }
        t.to_bigint_exact().to_u128()
    }

    /// Returns the exact value of `self` as a fraction.
    pub fn to_rational(&self) -> BigRational {
        if self.e >= 0 {
            BigRational::from_integer(&self.m << self.e as usize)
        } else {
            BigRational::new(self.m.clone(), BigInt::one() << (-self.e) as usize)
        }
    }

    /// Returns `self` rounded to the nearest f64 value.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }

        let e = self.exponent();
        if e > f64::MAX_EXP as Exponent + 1 {
            return if self.is_negative() { f64::NEG_INFINITY } else { f64::INFINITY };
        }

        if e < f64::MIN_EXP as Exponent - 54 {
            return if self.is_negative() { -0.0 } else { 0.0 };
        }

        // precision of 53 bits fits the mantissa into an i64 without loss
        let r = match self.round(53) {
            Ok(r) => r,
            Err(_) => return f64::NAN,
        };
        let m = r.m.to_f64().unwrap_or(f64::NAN);

        ldexp(m, r.e)
    }

    /// Converts `self` to digits in radix `rdx`.
    /// Returns the sign, the digits, and the exponent `k` such that `self = 0.d1d2d3... * rdx^k`.
    /// `n` is the number of significant digits to produce; if `n` is 0, the number of digits is
    /// derived from the precision `p` so that parsing the digits back at precision `p` restores the value.
    /// Trailing zeroes are removed from the digits.
    ///
    /// ## Errors
    ///
    ///  - MemoryAllocation: failed to allocate memory for the digits.
    ///  - ExponentOverflow: the exponent is too large for the conversion.
    pub fn to_digits(
        &self,
        rdx: Radix,
        n: usize,
        p: usize,
    ) -> Result<(Sign, String, Exponent), Error> {
        if self.is_zero() {
            return Ok((Sign::Pos, String::new(), 0));
        }

        let n = if n == 0 { digits_for_precision(p, rdx) } else { n };
        let r = BigUint::from(rdx.base());
        let lo = r.pow(u32::try_from(n - 1).map_err(|_| Error::MemoryAllocation)?);
        let hi = &lo * &r;

        let log_r_2 = 1.0 / (rdx.base() as f64).log2();
        let mut k = ((self.exponent() as f64) * log_r_2).floor() as Exponent + 1;

        let q = loop {
            let q = self.scaled_round(rdx, n as Exponent - k)?;

            if q >= hi {
                k += 1;
            } else if q < lo {
                k -= 1;
            } else {
                break q;
            }
        };

        let s = q.to_str_radix(rdx.base());
        let trimmed = s.trim_end_matches('0');

        let mut digits = String::new();
        digits.try_reserve_exact(trimmed.len())?;
        digits.push_str(trimmed);

        Ok((self.sign(), digits, k))
    }

    /// Returns `|self| * rdx^shift` rounded half to even to an integer.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the power of the radix is too large to scale the number.
    pub fn scaled_round(&self, rdx: Radix, shift: Exponent) -> Result<BigUint, Error> {
        if self.is_zero() {
            return Ok(BigUint::zero());
        }

        if shift.unsigned_abs() > RADIX_POWER_MAX as u64 {
            return Err(Error::ExponentOverflow(if shift > 0 { Sign::Pos } else { Sign::Neg }));
        }

        let mag = self.m.magnitude();

        if let Some(b) = rdx.digit_bits() {
            return Ok(round_shift(mag, self.e + shift * b));
        }

        // upper bound of the binary exponent of the result
        let b_hi = self.exponent() + (shift as f64 * core::f64::consts::LOG2_10).ceil() as Exponent + 4;
        if b_hi < -1 {
            return Ok(BigUint::zero());
        }

        // exact scaling costs about as much as the result itself
        let cost = shift.unsigned_abs() * 4 + self.e.unsigned_abs();
        if cost <= 2 * (b_hi as u64 + self.bit_len() as u64) + 4096 {
            return self.scaled_round_exact(shift);
        }

        let x = self.abs();
        let mut w = b_hi as usize + GUARD_BITS + 2 * bit_len_u64(shift.unsigned_abs());
        let mut attempt = 1;
        loop {
            let (y, ee) = x.scale_dec(shift, w)?;

            // the error is below half a unit, and the rounding is decided
            // if the fraction is farther from one half than the error
            if y.e >= 0 || attempt == SCALE_ATTEMPTS {
                return Ok(round_shift(y.m.magnitude(), y.e));
            }

            let sh = (-y.e) as usize;
            let ym = y.m.magnitude();
            let rem = ym - ((ym >> sh) << sh);
            let half = BigUint::one() << (sh - 1);
            let dist = if rem > half { rem - &half } else { &half - rem };
            let tol = BigUint::one() << (ee + sh as Exponent).max(0) as usize;

            if dist > tol {
                return Ok(round_shift(ym, y.e));
            }

            w += w / 2;
            attempt += 1;
        }
    }

    fn scaled_round_exact(&self, shift: Exponent) -> Result<BigUint, Error> {
        let pwr = u32::try_from(shift.unsigned_abs())
            .map(|n| BigUint::from(10u32).pow(n))
            .map_err(|_| Error::ExponentOverflow(Sign::Pos))?;

        let mut num = self.m.magnitude().clone();
        let mut den = BigUint::one();

        if shift >= 0 {
            num *= pwr;
        } else {
            den = pwr;
        }

        if self.e >= 0 {
            num <<= self.e as usize;
        } else {
            den <<= (-self.e) as usize;
        }

        let (mut q, rem) = num.div_rem(&den);
        let rem2: BigUint = rem << 1usize;

        let round_up = match rem2.cmp(&den) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => q.is_odd(),
        };

        if round_up {
            q += 1u32;
        }

        Ok(q)
    }
}

/// Returns the number of significant bits of `n`.
#[inline]
fn bit_len_u64(n: u64) -> usize {
    (64 - n.leading_zeros()) as usize
}

/// Returns `m * 2^t` rounded half to even to an integer.
fn round_shift(m: &BigUint, t: Exponent) -> BigUint {
    if t >= 0 {
        return m << t as usize;
    }

    let sh = t.unsigned_abs();
    if sh > m.bits() {
        return BigUint::zero();
    }

    let q = m >> sh as usize;
    let rem = m - (&q << sh as usize);
    let half = BigUint::one() << (sh - 1) as usize;

    let round_up = match rem.cmp(&half) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => q.is_odd(),
    };

    if round_up {
        q + 1u32
    } else {
        q
    }
}

/// Returns `x * 2^e`.
fn ldexp(mut x: f64, mut e: Exponent) -> f64 {
    const STEP: Exponent = 1000;

    while e > STEP && x.is_finite() {
        x *= 2f64.powi(STEP as i32);
        e -= STEP;
    }

    while e < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP as i32);
        e += STEP;
    }

    x * 2f64.powi(e as i32)
}
