//! π number

use crate::common::consts::ONE;
use crate::common::consts::TWO;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::AGM_MAX_ITER;
use crate::defs::GUARD_BITS;
use crate::num::check_p;
use crate::num::FloatNumber;
use crate::ops::agm::is_converged;
use log::{debug, trace};

/// Computes π with working precision `w` using the Brent-Salamin iteration.
///
/// `a0 = 1, b0 = 1/sqrt(2), t0 = 1/4, p0 = 1`,
/// `a' = (a + b)/2, b' = sqrt(a*b), t' = t - p*(a - a')^2, p' = 2*p`,
/// the estimate is `(a + b)^2 / (4*t)`.
pub(crate) fn pi_agm(w: usize) -> Result<FloatNumber, Error> {
    check_p(w)?;

    let mut a = ONE.clone();
    let mut b = TWO.sqrt(w)?.mul_2exp(-1);
    let mut t = ONE.mul_2exp(-2);
    let mut k: Exponent = 0;
    let mut prev: Option<FloatNumber> = None;

    for iter in 0..AGM_MAX_ITER {
        let an = a.add(&b, w)?.mul_2exp(-1);
        let bn = a.mul(&b, w)?.sqrt(w)?;
        let d = a.sub(&an, w)?;

        t = t.sub(&d.mul(&d, w)?.mul_2exp(k), w)?;
        k += 1;
        a = an;
        b = bn;

        let s = a.add(&b, w)?;
        let est = s.mul(&s, w)?.div(&t.mul_2exp(2), w)?;

        if let Some(prev) = &prev {
            if is_converged(&est, prev, w)? {
                trace!("pi converged after {} iterations at precision {}", iter + 1, w);
                return Ok(est);
            }
        }

        prev = Some(est);
    }

    Err(Error::NoConvergence)
}

/// Returns π with precision `p`.
pub(crate) fn compute_pi(p: usize) -> Result<FloatNumber, Error> {
    check_p(p)?;
    debug!("computing pi with precision {}", p);
    pi_agm(p + GUARD_BITS)?.round(p)
}

/// Holds the value of π computed for the most recently requested precision.
#[derive(Debug, Default)]
pub struct PiCache {
    val: Option<(usize, FloatNumber)>,
}

impl PiCache {
    pub fn new() -> Self {
        PiCache { val: None }
    }

    /// Returns the value of π with precision `p`.
    /// The cached value is reused if it has precision `p`, and replaced otherwise.
    pub fn for_prec(&mut self, p: usize) -> Result<FloatNumber, Error> {
        if let Some((cp, v)) = &self.val {
            if *cp == p {
                return Ok(v.clone());
            }
        }

        let v = compute_pi(p)?;
        self.val = Some((p, v.clone()));

        Ok(v)
    }

    /// Drops the cached value.
    pub fn invalidate(&mut self) {
        self.val = None;
    }

    /// Returns the precision of the cached value.
    pub fn precision(&self) -> Option<usize> {
        self.val.as_ref().map(|(p, _)| *p)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::defs::Radix;
    use crate::defs::Sign;

    #[test]
    fn test_pi() {
        // 3.14159265358979323846264338327950288419716939937510582097494459230781640628620899
        let digits = "314159265358979323846264338327950288419716939937510582097494459230781640628620899";
        let digits: Vec<u8> = digits.bytes().map(|c| c - b'0').collect();

        for p in [1, 2, 10, 53, 64, 100, 200] {
            let reference = FloatNumber::from_digits(Sign::Pos, &digits, 1, Radix::Dec, p).unwrap();
            let pi = compute_pi(p).unwrap();
            assert_eq!(pi.cmp(&reference), core::cmp::Ordering::Equal, "precision {}", p);
        }

        assert_eq!(compute_pi(0).unwrap_err(), Error::InvalidArgument);
    }

    #[test]
    fn test_pi_cache() {
        let mut cache = PiCache::new();
        assert_eq!(cache.precision(), None);

        let v1 = cache.for_prec(64).unwrap();
        assert_eq!(cache.precision(), Some(64));
        assert_eq!(v1.to_f64(), core::f64::consts::PI);

        let v2 = cache.for_prec(128).unwrap();
        assert_eq!(cache.precision(), Some(128));
        assert!(v2.bit_len() > 64);

        cache.invalidate();
        assert_eq!(cache.precision(), None);
    }
}
