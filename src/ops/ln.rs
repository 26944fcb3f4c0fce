//! Natural logarithm.

use crate::common::consts::FOUR;
use crate::common::consts::ONE;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::Sign;
use crate::defs::GUARD_BITS;
use crate::num::check_p;
use crate::num::FloatNumber;
use crate::ops::agm::agm;
use crate::ops::consts::ln2_agm;
use crate::ops::consts::pi_agm;
use core::cmp::Ordering;
use log::trace;

impl FloatNumber {
    /// Computes the natural logarithm of `self` with precision `p`.
    ///
    /// The argument is scaled to `s = self * 2^m` with `s >= 2^(w/2 + 1)` for the working precision `w`,
    /// and then `ln(self) = pi / (2 * AGM(1, 4/s)) - m * ln(2)`.
    /// If the subtraction cancels too many bits, the computation is repeated with a larger working precision.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: `self` is zero, the result is negative infinity.
    ///  - OutOfDomain: `self` is negative.
    ///  - InvalidArgument: the precision is incorrect.
    ///  - NoConvergence: the iteration limit was reached.
    pub fn ln(&self, p: usize) -> Result<Self, Error> {
        check_p(p)?;

        if self.is_zero() {
            return Err(Error::ExponentOverflow(Sign::Neg));
        }

        if self.is_negative() {
            return Err(Error::OutOfDomain);
        }

        if self.cmp(&ONE) == Ordering::Equal {
            return Ok(Self::new());
        }

        let mut extra = GUARD_BITS;

        loop {
            let w = p + extra;
            let m = (w / 2 + 2) as Exponent - self.exponent();

            let s = self.mul_2exp(m);
            let b = FOUR.div(&s, w)?;
            let a = agm(&ONE, &b, w)?;
            let ln_s = pi_agm(w)?.div(&a.mul_2exp(1), w)?;

            let ml2 = ln2_agm(w)?.mul(&FloatNumber::from_i64(m), w)?;
            let ret = ln_s.sub(&ml2, w)?;

            // bits lost in the subtraction
            let lost = if ret.is_zero() {
                w
            } else {
                (ln_s.exponent().max(ml2.exponent()) - ret.exponent()).max(0) as usize
            };

            if lost + 8 <= extra {
                return ret.round(p);
            }

            trace!("ln: {} bits cancelled at working precision {}", lost, w);
            extra += lost + GUARD_BITS;
        }
    }
}
