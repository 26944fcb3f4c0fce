//! High-level operations on the numbers.

pub(crate) mod agm;
pub mod consts;
mod exp;
mod ln;
