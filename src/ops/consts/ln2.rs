//! ln(2)

use crate::common::consts::ONE;
use crate::common::util::log2_ceil;
use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::GUARD_BITS;
use crate::num::check_p;
use crate::num::FloatNumber;
use crate::ops::agm::agm;
use crate::ops::consts::pi::pi_agm;
use log::debug;

/// Computes ln(2) with working precision `w`.
///
/// For large `s`, `ln(s) ~ pi / (2 * AGM(1, 4/s))` with relative error about `4/s^2`.
/// With `s = 2^h` this gives `ln(2) = pi / (2 * h * AGM(1, 2^(2-h)))`.
pub(crate) fn ln2_agm(w: usize) -> Result<FloatNumber, Error> {
    check_p(w)?;

    let wp = w + log2_ceil(w) + 4;
    let h = (wp + log2_ceil(wp)) / 2 + 2;

    let pi = pi_agm(wp)?;
    let b = ONE.mul_2exp(2 - h as Exponent);
    let m = agm(&ONE, &b, wp)?;
    let den = m.mul(&FloatNumber::from_i64(2 * h as i64), wp)?;

    pi.div(&den, wp)?.round(w)
}

/// Returns ln(2) with precision `p`.
pub(crate) fn compute_ln2(p: usize) -> Result<FloatNumber, Error> {
    check_p(p)?;
    debug!("computing ln(2) with precision {}", p);
    ln2_agm(p + GUARD_BITS)?.round(p)
}

/// Holds the value of ln(2) computed for the most recently requested precision.
#[derive(Debug, Default)]
pub struct Ln2Cache {
    val: Option<(usize, FloatNumber)>,
}

impl Ln2Cache {
    pub fn new() -> Self {
        Ln2Cache { val: None }
    }

    /// Returns the value of ln(2) with precision `p`.
    /// The cached value is reused if it has precision `p`, and replaced otherwise.
    pub fn for_prec(&mut self, p: usize) -> Result<FloatNumber, Error> {
        if let Some((cp, v)) = &self.val {
            if *cp == p {
                return Ok(v.clone());
            }
        }

        let v = compute_ln2(p)?;
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
