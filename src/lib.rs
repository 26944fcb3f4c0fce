//! Agm-float is a library of binary floating point numbers with arbitrary precision.
//!
//! Every number carries its own precision in bits. Numbers created without an explicit precision get the default
//! precision of the thread's default context, which is 512 bits unless changed. The result of a binary operation
//! gets the larger of the operands' precisions, unary operations keep the precision of the operand, and
//! assignment keeps the precision of the destination. Primitive operands (integers, `f32`, `f64`) are converted
//! exactly and do not affect the precision of the result.
//!
//! Besides the arithmetic the library provides the natural logarithm and the exponent,
//! and the constants π and ln(2) computed with the arithmetic-geometric mean and cached for the default precision.
//!
//! ## Examples
//!
//! ```
//! use agm_float::{const_pi, set_default_prec, BigFloat};
//!
//! set_default_prec(128);
//!
//! let two = BigFloat::from_u8(2);
//! let x = two.sqrt();
//! assert_eq!(x.precision(), 128);
//!
//! let y = &x * &x;
//! assert!((&y - 2).abs() < BigFloat::from_f64(1e-35));
//!
//! // cached for the default precision
//! let pi = const_pi();
//! assert_eq!(pi.precision(), 128);
//! assert_eq!(pi.to_f64(), core::f64::consts::PI);
//!
//! let s = format!("{:.10}", pi);
//! assert_eq!(s, "3.141592654");
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::module_inception)]

mod common;
pub mod ctx;
mod defs;
mod float;
mod num;
mod ops;
mod parser;
mod strop;

#[cfg(feature = "serde")]
mod for_3rd;

pub use crate::ctx::const_log2;
pub use crate::ctx::const_log2_prec;
pub use crate::ctx::const_pi;
pub use crate::ctx::const_pi_prec;
pub use crate::ctx::default_context;
pub use crate::ctx::exp;
pub use crate::ctx::get_default_base;
pub use crate::ctx::get_default_prec;
pub use crate::ctx::get_precision_mode;
pub use crate::ctx::log;
pub use crate::ctx::reset_log2_cache;
pub use crate::ctx::reset_pi_cache;
pub use crate::ctx::set_default_base;
pub use crate::ctx::set_default_prec;
pub use crate::ctx::set_precision_mode;
pub use crate::ctx::with_default_context;
pub use crate::ctx::Context;
pub use crate::defs::Error;
pub use crate::defs::Exponent;
pub use crate::defs::PrecisionMode;
pub use crate::defs::Radix;
pub use crate::defs::Sign;
pub use crate::defs::AGM_MAX_ITER;
pub use crate::defs::DEFAULT_MODE;
pub use crate::defs::DEFAULT_P;
pub use crate::defs::DEFAULT_RADIX;
pub use crate::defs::GUARD_BITS;
pub use crate::defs::MIN_P;
pub use crate::float::hypot;
pub use crate::float::BigFloat;
pub use crate::float::Operand;
pub use crate::ops::consts::Consts;
pub use crate::strop::Align;
pub use crate::strop::FormatSpec;
pub use crate::strop::Notation;

/// Arbitrary precision integer.
pub use num_bigint::BigInt as Integer;

/// Arbitrary precision rational number.
pub use num_rational::BigRational as Rational;
