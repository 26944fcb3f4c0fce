//! All operations on numbers are performed in some context.
//!
//! Each thread has a default context. Values constructed without an explicit precision, parsing and
//! formatting without an explicit radix, and the constant functions use the default context.
//! Changes to the default context made in one thread are not visible in other threads.

use crate::defs::Radix;
use crate::defs::DEFAULT_MODE;
use crate::defs::DEFAULT_P;
use crate::defs::DEFAULT_RADIX;
use crate::defs::MIN_P;
use crate::ops::consts::compute_ln2;
use crate::ops::consts::compute_pi;
use crate::BigFloat;
use crate::Consts;
use crate::Error;
use crate::PrecisionMode;
use ::log::debug;
use core::cell::RefCell;
use std::rc::Rc;

/// Context contains default parameters for all operations.
#[derive(Clone, Debug)]
pub struct Context {
    cc: Rc<RefCell<Consts>>,
    p: usize,
    rdx: Radix,
    mode: PrecisionMode,
    value: BigFloat,
}

thread_local! {
    static DEFAULT_CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

impl Context {
    /// Create a new context with default parameters.
    pub fn new() -> Self {
        Context {
            cc: Rc::new(RefCell::new(Consts::new())),
            p: DEFAULT_P,
            rdx: DEFAULT_RADIX,
            mode: DEFAULT_MODE,
            value: BigFloat::with_precision(DEFAULT_P),
        }
    }

    /// Sets the precision of the context. Precision below the minimum is raised to the minimum.
    pub fn precision(&mut self, p: usize) -> &mut Self {
        self.p = p.max(MIN_P);
        self
    }

    /// Sets the radix used for parsing and formatting.
    pub fn radix(&mut self, rdx: Radix) -> &mut Self {
        self.rdx = rdx;
        self
    }

    /// Sets the precision mode of the context.
    pub fn precision_mode(&mut self, mode: PrecisionMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Sets the constant cache of the context.
    pub fn constant_cache(&mut self, cc: Rc<RefCell<Consts>>) -> &mut Self {
        self.cc = cc;
        self
    }

    /// Sets the current value of the context. The value is rounded to the precision of the context.
    pub fn value(&mut self, value: &BigFloat) -> &mut Self {
        self.value = BigFloat::with_value(value, self.p);
        self
    }

    /// Returns the precision of the context.
    pub fn get_precision(&self) -> usize {
        self.p
    }

    /// Returns the radix of the context.
    pub fn get_radix(&self) -> Radix {
        self.rdx
    }

    /// Returns the precision mode of the context.
    pub fn get_precision_mode(&self) -> PrecisionMode {
        self.mode
    }

    /// Returns the constant cache of the context.
    pub fn get_consts(&self) -> Rc<RefCell<Consts>> {
        self.cc.clone()
    }

    /// Returns the current value of the context.
    pub fn get_value(&self) -> BigFloat {
        self.value.clone()
    }

    /// Returns the value of pi with the precision of the context.
    /// The value is taken from the constant cache if it was computed with the same precision before.
    pub fn const_pi(&self) -> BigFloat {
        let res = self.cc.borrow_mut().pi(self.p);
        res.unwrap_or_else(|e| BigFloat::from_error(e, self.p))
    }

    /// Returns the value of the natural logarithm of 2 with the precision of the context.
    /// The value is taken from the constant cache if it was computed with the same precision before.
    pub fn const_log2(&self) -> BigFloat {
        let res = self.cc.borrow_mut().ln_2(self.p);
        res.unwrap_or_else(|e| BigFloat::from_error(e, self.p))
    }

    /// Drops the cached value of pi.
    pub fn reset_pi_cache(&self) {
        self.cc.borrow_mut().invalidate_pi();
    }

    /// Drops the cached value of the natural logarithm of 2.
    pub fn reset_log2_cache(&self) {
        self.cc.borrow_mut().invalidate_ln_2();
    }

    /// Parses a number using the radix and the precision of the context.
    ///
    /// ## Errors
    ///
    ///  - InvalidNumeral: `s` is not a valid numeral.
    pub fn parse(&self, s: &str) -> Result<BigFloat, Error> {
        BigFloat::parse_radix(s, self.rdx, self.p)
    }

    /// Replaces the current value with its square root.
    pub fn sqrt(&mut self) -> &mut Self {
        self.value = self.value.sqrt();
        self
    }

    /// Replaces the current value with its natural logarithm.
    pub fn log(&mut self) -> &mut Self {
        self.value = self.value.log();
        self
    }

    /// Replaces the current value with `e` to the power of the current value.
    pub fn exp(&mut self) -> &mut Self {
        self.value = self.value.exp();
        self
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}

/// Create a new context with precision `p`.
pub fn with_precision(p: usize) -> Context {
    let mut ctx = Context::new();
    ctx.precision(p);
    ctx.value(&BigFloat::with_precision(p));
    ctx
}

/// Create a new context with constant cache `cc`.
pub fn with_consts(cc: Rc<RefCell<Consts>>) -> Context {
    let mut ctx = Context::new();
    ctx.constant_cache(cc);
    ctx
}

/// Returns a copy of the default context of the current thread.
/// The copy shares the constant cache with the default context.
pub fn default_context() -> Context {
    DEFAULT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Runs `f` with the default context of the current thread and keeps the changes `f` makes to it.
///
/// `f` receives a copy of the default context, so it can use functions relying on the default context,
/// but changes made to the default context inside `f` by other means are overwritten.
pub fn with_default_context<R, F: FnOnce(&mut Context) -> R>(f: F) -> R {
    let mut ctx = default_context();
    let ret = f(&mut ctx);
    DEFAULT_CONTEXT.with(|c| *c.borrow_mut() = ctx);
    ret
}

/// Sets the default precision of the current thread.
pub fn set_default_prec(p: usize) {
    DEFAULT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().precision(p);
    });
    debug!("default precision is set to {}", p.max(MIN_P));
}

/// Returns the default precision of the current thread.
pub fn get_default_prec() -> usize {
    DEFAULT_CONTEXT.with(|ctx| ctx.borrow().p)
}

/// Sets the default radix of the current thread.
pub fn set_default_base(rdx: Radix) {
    DEFAULT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().radix(rdx);
    });
}

/// Returns the default radix of the current thread.
pub fn get_default_base() -> Radix {
    DEFAULT_CONTEXT.with(|ctx| ctx.borrow().rdx)
}

/// Sets the precision mode of the current thread.
pub fn set_precision_mode(mode: PrecisionMode) {
    DEFAULT_CONTEXT.with(|ctx| {
        ctx.borrow_mut().precision_mode(mode);
    });
}

/// Returns the precision mode of the current thread.
pub fn get_precision_mode() -> PrecisionMode {
    DEFAULT_CONTEXT.with(|ctx| ctx.borrow().mode)
}

/// Returns the value of pi with the default precision.
/// Repeated calls with an unchanged default precision return the cached value.
pub fn const_pi() -> BigFloat {
    default_context().const_pi()
}

/// Returns the value of the natural logarithm of 2 with the default precision.
/// Repeated calls with an unchanged default precision return the cached value.
pub fn const_log2() -> BigFloat {
    default_context().const_log2()
}

/// Returns the value of pi with precision `p` computed anew, bypassing the constant cache.
/// Zero precision gives `NaN` carrying `Error::InvalidArgument`.
pub fn const_pi_prec(p: usize) -> BigFloat {
    match compute_pi(p) {
        Ok(v) => BigFloat::from_number(v, p),
        Err(e) => BigFloat::from_error(e, p),
    }
}

/// Returns the value of the natural logarithm of 2 with precision `p` computed anew, bypassing the constant cache.
/// Zero precision gives `NaN` carrying `Error::InvalidArgument`.
pub fn const_log2_prec(p: usize) -> BigFloat {
    match compute_ln2(p) {
        Ok(v) => BigFloat::from_number(v, p),
        Err(e) => BigFloat::from_error(e, p),
    }
}

/// Drops the cached value of pi in the default context.
pub fn reset_pi_cache() {
    default_context().reset_pi_cache();
}

/// Drops the cached value of the natural logarithm of 2 in the default context.
pub fn reset_log2_cache() {
    default_context().reset_log2_cache();
}

/// Returns the natural logarithm of `x`.
pub fn log(x: &BigFloat) -> BigFloat {
    x.log()
}

/// Returns `e` to the power of `x`.
pub fn exp(x: &BigFloat) -> BigFloat {
    x.exp()
}
