//! Built-in passes.

pub mod agnostic;
pub mod target;

pub use agnostic::{CancelInverses, Unroll3q};
pub use target::{BasicRouting, BasisTranslation, RoutingStats, TrivialLayout};
