pub mod action;
pub mod case;
pub mod config;
pub mod primitives;
pub mod snapshot;

pub use action::*;
pub use case::*;
pub use config::*;
pub use primitives::*;
pub use snapshot::*;
