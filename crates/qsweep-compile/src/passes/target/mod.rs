//! Passes that need to know the device: its coupling map or basis gates.

pub mod layout;
pub mod routing;
pub mod translation;

pub use layout::TrivialLayout;
pub use routing::{BasicRouting, RoutingStats};
pub use translation::BasisTranslation;
