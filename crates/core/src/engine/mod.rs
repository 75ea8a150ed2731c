pub mod core;
pub mod outcome;

pub use self::core::{Reconcile, ReconciliationEngine};
pub use outcome::{CycleError, CycleOutcome, CycleStep};
