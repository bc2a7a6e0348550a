//! Application-level configuration.
//!
//! - [`ReviewOptions`]: feedback loop control (rounds, epsilons, timeout, threshold)

pub mod review_options;

pub use review_options::ReviewOptions;
