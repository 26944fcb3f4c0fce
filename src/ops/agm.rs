//! Arithmetic-geometric mean.

use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::AGM_MAX_ITER;
use crate::num::check_p;
use crate::num::FloatNumber;
use log::trace;

/// Returns true if `a` and `b` agree to the working precision `w`, i.e. `|a - b| < 2^-(w-4) * |a|`.
/// A few units in the last place are tolerated, since `a` and `b` are rounded at each step.
pub(crate) fn is_converged(a: &FloatNumber, b: &FloatNumber, w: usize) -> Result<bool, Error> {
    let d = a.sub(b, w)?;
    let tol = w.saturating_sub(4) as Exponent;

    Ok(d.is_zero() || d.exponent() <= a.exponent() - tol)
}

/// Returns the arithmetic-geometric mean of `a` and `b` computed with working precision `w`.
/// Iterates `a' = (a + b) / 2`, `b' = sqrt(a * b)` until `a` and `b` agree to the working precision.
/// Both arguments must be positive.
///
/// ## Errors
///
///  - InvalidArgument: the precision is incorrect, or an argument is negative.
///  - NoConvergence: the iteration limit was reached.
pub(crate) fn agm(a: &FloatNumber, b: &FloatNumber, w: usize) -> Result<FloatNumber, Error> {
    check_p(w)?;

    if a.is_negative() || b.is_negative() {
        return Err(Error::InvalidArgument);
    }

    let mut a = a.round(w)?;
    let mut b = b.round(w)?;

    for iter in 0..AGM_MAX_ITER {
        if is_converged(&a, &b, w)? {
            trace!("agm converged after {} iterations at precision {}", iter, w);
            return Ok(a);
        }

        let an = a.add(&b, w)?.mul_2exp(-1);
        let bn = a.mul(&b, w)?.sqrt(w)?;

        a = an;
        b = bn;
    }

    Err(Error::NoConvergence)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::ONE;
    use crate::common::consts::TWO;

    #[test]
    fn test_agm() {
        let p = 128;

        // agm(x, x) = x
        let x = FloatNumber::from_f64(1.25, p).unwrap();
        assert!(is_converged(&agm(&x, &x, p).unwrap(), &x, p).unwrap());

        // agm(1, sqrt(2)) = 1.19814023473559220743...
        let s2 = TWO.sqrt(p).unwrap();
        let m = agm(&ONE, &s2, p).unwrap();
        assert!((m.to_f64() - 1.1981402347355922).abs() < 1e-15);

        // the mean lies between the geometric and the arithmetic means of the arguments
        let am = ONE.add(&s2, p).unwrap().mul_2exp(-1);
        let gm = s2.sqrt(p).unwrap();
        assert_eq!(m.cmp(&am), core::cmp::Ordering::Less);
        assert_eq!(m.cmp(&gm), core::cmp::Ordering::Greater);

        // agm is symmetric
        let m2 = agm(&s2, &ONE, p).unwrap();
        assert!(is_converged(&m, &m2, p).unwrap());

        // a zero argument never converges
        assert_eq!(agm(&ONE, &FloatNumber::new(), p).unwrap_err(), Error::NoConvergence);
        assert_eq!(agm(&ONE, &ONE.neg(), p).unwrap_err(), Error::InvalidArgument);
        assert_eq!(agm(&ONE, &ONE, 0).unwrap_err(), Error::InvalidArgument);
    }
}
