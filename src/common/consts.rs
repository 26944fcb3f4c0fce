//! Static constants.

use crate::num::FloatNumber;
use lazy_static::lazy_static;

lazy_static! {
    pub(crate) static ref ONE: FloatNumber = FloatNumber::from_i64(1);
    pub(crate) static ref TWO: FloatNumber = FloatNumber::from_i64(2);
    pub(crate) static ref FOUR: FloatNumber = FloatNumber::from_i64(4);
    pub(crate) static ref TEN: FloatNumber = FloatNumber::from_i64(10);
}
