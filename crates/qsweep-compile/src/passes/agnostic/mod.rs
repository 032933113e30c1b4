//! Passes that work for any device.

pub mod cancel;
pub mod unroll;

pub use cancel::CancelInverses;
pub use unroll::Unroll3q;
