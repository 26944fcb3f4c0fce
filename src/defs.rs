//! Definitions.

use core::fmt::Display;
use std::collections::TryReserveError;

/// A binary exponent.
pub type Exponent = i64;

/// Default precision in bits (about 154 decimal digits).
pub const DEFAULT_P: usize = 512;

/// Default radix for parsing and formatting.
pub const DEFAULT_RADIX: Radix = Radix::Dec;

/// Default precision mode.
pub const DEFAULT_MODE: PrecisionMode = PrecisionMode::Propagate;

/// Smallest precision a value can have. Smaller requests are raised to it.
pub const MIN_P: usize = 1;

/// Extra bits carried by the transcendental algorithms on top of the requested precision.
pub const GUARD_BITS: usize = 32;

/// Upper bound on the number of AGM iterations before giving up.
pub const AGM_MAX_ITER: usize = 256;

/// Largest magnitude of an exponent accepted by the parser.
pub(crate) const EXPONENT_MAX: Exponent = 1 << 52;

/// Largest binary exponent of the argument of `exp` before the result is considered overflown.
pub(crate) const EXP_ARG_MAX_EXPONENT: Exponent = 48;

/// Largest magnitude of a power of the radix used to scale a number during conversion to digits.
pub(crate) const RADIX_POWER_MAX: Exponent = 1 << 53;

/// Number of times the working precision of a decimal scaling is raised before the rounding is taken as is.
pub(crate) const SCALE_ATTEMPTS: usize = 8;

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    /// Negative.
    Neg = -1,

    /// Positive.
    Pos = 1,
}

impl Sign {
    /// Changes the sign to the opposite.
    pub fn invert(&self) -> Self {
        match *self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Returns true if `self` is positive.
    pub fn is_positive(&self) -> bool {
        *self == Sign::Pos
    }

    /// Returns true if `self` is negative.
    pub fn is_negative(&self) -> bool {
        *self == Sign::Neg
    }

    /// Returns 1 for the positive sign and -1 for the negative sign.
    pub fn to_int(&self) -> i8 {
        *self as i8
    }
}

/// Possible errors.
#[derive(Debug, Clone, Copy)]
pub enum Error {
    /// The exponent value becomes greater than the upper limit of the range of exponent values.
    ExponentOverflow(Sign),

    /// Divizor is zero.
    DivisionByZero,

    /// Invalid argument, e.g. zero precision or the square root of a negative number.
    InvalidArgument,

    /// The string is not a valid numeral in the requested radix.
    InvalidNumeral,

    /// The argument is outside of the domain of the function.
    OutOfDomain,

    /// An iterative algorithm did not converge within the iteration limit.
    NoConvergence,

    /// Memory allocation error.
    MemoryAllocation,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let repr = match self {
            Error::ExponentOverflow(s) => {
                if s.is_positive() {
                    "positive overflow"
                } else {
                    "negative overflow"
                }
            }
            Error::DivisionByZero => "division by zero",
            Error::InvalidArgument => "invalid argument",
            Error::InvalidNumeral => "invalid numeral",
            Error::OutOfDomain => "argument out of domain",
            Error::NoConvergence => "iteration did not converge",
            Error::MemoryAllocation => "memory allocation failure",
        };
        f.write_str(repr)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ExponentOverflow(l0), Self::ExponentOverflow(r0)) => l0 == r0,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Eq for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::MemoryAllocation
    }
}

/// Radix.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Radix {
    /// Binary.
    Bin = 2,

    /// Octal.
    Oct = 8,

    /// Decimal.
    Dec = 10,

    /// Hexadecimal.
    Hex = 16,
}

impl Radix {
    /// Returns the numeric base.
    pub fn base(&self) -> u32 {
        *self as u32
    }

    /// Returns the number of bits in a digit if the radix is a power of two.
    pub(crate) fn digit_bits(&self) -> Option<Exponent> {
        match self {
            Radix::Bin => Some(1),
            Radix::Oct => Some(3),
            Radix::Dec => None,
            Radix::Hex => Some(4),
        }
    }
}

/// Defines how the precision of the result of a binary operation is chosen.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum PrecisionMode {
    /// The result gets the larger of the operands' precisions.
    Propagate,

    /// The result gets the default precision of the context, regardless of the operands.
    /// Skips the precision comparison, at the cost of results depending on the ambient setting.
    Ambient,
}
