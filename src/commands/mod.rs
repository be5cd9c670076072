//! Command implementations

pub mod simple;
pub mod simulate;

pub use simple::{Command, SimpleError, run_simple};
pub use simulate::{ProgressObserver, SimulationReport, run_simulation};
