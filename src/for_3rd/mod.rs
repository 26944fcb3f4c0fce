//! Serialization and deserialization with serde.

mod de;
mod ser;
