mod ln2;
mod pi;

pub(crate) use crate::ops::consts::ln2::compute_ln2;
pub(crate) use crate::ops::consts::ln2::ln2_agm;
pub(crate) use crate::ops::consts::pi::compute_pi;
pub(crate) use crate::ops::consts::pi::pi_agm;

use crate::ops::consts::ln2::Ln2Cache;
use crate::ops::consts::pi::PiCache;
use crate::BigFloat;
use crate::Error;
use log::debug;

/// Constants cache contains the arbitrary-precision mathematical constants π and ln(2).
///
/// Each constant is kept in a single slot together with the precision it was computed with.
/// A request with a different precision replaces the slot.
#[derive(Debug, Default)]
pub struct Consts {
    pi: PiCache,
    ln2: Ln2Cache,
}

impl Consts {
    /// Initializes an empty constants cache.
    pub fn new() -> Self {
        Consts {
            pi: PiCache::new(),
            ln2: Ln2Cache::new(),
        }
    }

    /// Returns the value of the pi number with precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: precision is incorrect.
    ///  - NoConvergence: the iteration limit was reached.
    pub fn pi(&mut self, p: usize) -> Result<BigFloat, Error> {
        self.pi.for_prec(p).map(|v| BigFloat::from_number(v, p))
    }

    /// Returns the value of the natural logarithm of 2 with precision `p`.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: precision is incorrect.
    ///  - NoConvergence: the iteration limit was reached.
    pub fn ln_2(&mut self, p: usize) -> Result<BigFloat, Error> {
        self.ln2.for_prec(p).map(|v| BigFloat::from_number(v, p))
    }

    /// Drops the cached value of the pi number.
    pub fn invalidate_pi(&mut self) {
        debug!("pi cache reset");
        self.pi.invalidate();
    }

    /// Drops the cached value of the natural logarithm of 2.
    pub fn invalidate_ln_2(&mut self) {
        debug!("ln(2) cache reset");
        self.ln2.invalidate();
    }

    /// Returns the precision of the cached pi number, or None if nothing is cached.
    pub fn pi_precision(&self) -> Option<usize> {
        self.pi.precision()
    }

    /// Returns the precision of the cached natural logarithm of 2, or None if nothing is cached.
    pub fn ln_2_precision(&self) -> Option<usize> {
        self.ln2.precision()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_consts() {
        let mut cc = Consts::new();

        assert_eq!(cc.pi_precision(), None);
        assert_eq!(cc.ln_2_precision(), None);

        let pi = cc.pi(53).unwrap();
        assert_eq!(pi.precision(), 53);
        assert_eq!(pi.to_f64(), core::f64::consts::PI);
        assert_eq!(cc.pi_precision(), Some(53));
        assert_eq!(cc.ln_2_precision(), None);

        let ln2 = cc.ln_2(24).unwrap();
        assert_eq!(ln2.to_f64() as f32, core::f32::consts::LN_2);
        assert_eq!(cc.ln_2_precision(), Some(24));

        // a different precision replaces the slot
        cc.pi(100).unwrap();
        assert_eq!(cc.pi_precision(), Some(100));

        cc.invalidate_pi();
        assert_eq!(cc.pi_precision(), None);
        assert_eq!(cc.ln_2_precision(), Some(24));

        cc.invalidate_ln_2();
        assert_eq!(cc.ln_2_precision(), None);

        assert_eq!(cc.pi(0).unwrap_err(), Error::InvalidArgument);
    }
}
