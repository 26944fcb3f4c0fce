//! Exponentiation.

use crate::common::consts::ONE;
use crate::common::util::exp_series_len;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::Sign;
use crate::defs::EXP_ARG_MAX_EXPONENT;
use crate::defs::GUARD_BITS;
use crate::num::check_p;
use crate::num::FloatNumber;
use crate::ops::consts::ln2_agm;
use log::trace;

impl FloatNumber {
    /// Computes `e` to the power of `self` with precision `p`.
    ///
    /// The argument is halved `k` times so that `y = self / 2^k` lies in `[0.5, 1)`, then reduced to
    /// `r = y - n * ln(2)`. `e^r` is computed by the backward recurrence `E = 1 + r * E / i`
    /// of the Taylor series, multiplied by `2^n`, and squared `k` times.
    /// A negative argument is computed as `1 / e^|self|`.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the result is too large.
    ///  - InvalidArgument: the precision is incorrect.
    ///  - NoConvergence: the iteration limit was reached.
    pub fn exp(&self, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        if self.is_zero() {
            return ONE.round(p);
        }

        if self.exponent() > EXP_ARG_MAX_EXPONENT {
            return if self.is_negative() {
                Ok(Self::new())
            } else {
                Err(Error::ExponentOverflow(Sign::Pos))
            };
        }

        if self.is_negative() {
            let ret = self.abs().exp(p + 2)?;
            return ONE.div(&ret, p);
        }

        let k = self.exponent().max(0);
        let w = p + GUARD_BITS + k as usize;

        let y = self.mul_2exp(-k);
        let ln2 = ln2_agm(w)?;
        let n = y.div(&ln2, w)?.floor();
        let r = y.sub(&ln2.mul(&n, w)?, w)?;

        let mut ret = ONE.clone();
        if !r.is_zero() {
            let l = exp_series_len(r.exponent(), w);
            trace!("exp: {} series terms at working precision {}", l, w);

            for i in (1..=l).rev() {
                let t = r.mul(&ret, w)?.div(&FloatNumber::from_i64(i as i64), w)?;
                ret = ONE.add(&t, w)?;
            }
        }

        let n = n.to_i128().unwrap_or(0) as Exponent;
        ret = ret.mul_2exp(n);

        for _ in 0..k {
            ret = ret.mul(&ret, w)?;
        }

        ret.round(p)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    #[test]
    fn test_exp() {
        let p = 53;

        assert_eq!(FloatNumber::new().exp(p).unwrap().to_f64(), 1.0);
        assert_eq!(ONE.exp(p).unwrap().to_f64(), core::f64::consts::E);
        assert_eq!(ONE.neg().exp(p).unwrap().to_f64(), 1.0 / core::f64::consts::E);

        for _ in 0..100 {
            let f = (random::<f64>() - 0.5) * 1400.0;
            let n = FloatNumber::from_f64(f, p).unwrap();
            let e = n.exp(p).unwrap().to_f64();
            let expected = f.exp();
            assert!((e - expected).abs() <= expected * 4.0 * f64::EPSILON, "{} {} {}", f, e, expected);
        }

        // overflow and underflow
        let big = ONE.mul_2exp(60);
        assert_eq!(big.exp(p).unwrap_err(), Error::ExponentOverflow(Sign::Pos));
        assert!(big.neg().exp(p).unwrap().is_zero());

        // a large but representable result
        let x = FloatNumber::from_i64(100000);
        let e = x.exp(64).unwrap();
        assert_eq!(e.exponent(), 144270);
    }
}
