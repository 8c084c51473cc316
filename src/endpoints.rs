//! Typed calls for the API resources.

pub mod measurements;
pub mod probes;
