/*!
 * Process Module
 * Process specs, timing records, admission and the arrival feed
 */

pub mod arrival;
pub mod types;
mod validation;

pub use arrival::ArrivalFeed;
pub use types::{ProcessLocation, ProcessRecord, ProcessReport, ProcessSpec};

pub(crate) use validation::admit_all;
