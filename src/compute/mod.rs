//! Codec, coordinate validation and distance helpers. Nothing in here holds
//! state or takes a lock.

pub mod geohash;
pub mod spatial;
pub mod validation;
