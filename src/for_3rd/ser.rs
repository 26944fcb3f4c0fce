//! Serialization of BigFloat.
//! Serialization to a string uses decimal radix and as many digits as needed to restore the value
//! with the same precision.

use crate::BigFloat;
use serde::{Serialize, Serializer};

impl Serialize for BigFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
