pub mod client;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod notifications;
pub mod proof;
pub mod reader;
pub mod scheduler;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::*;
pub use dispatcher::*;
pub use engine::{CycleError, CycleOutcome, CycleStep, Reconcile, ReconciliationEngine};
pub use error::*;
pub use notifications::*;
pub use proof::*;
pub use reader::*;
pub use scheduler::*;
pub use types::*;
