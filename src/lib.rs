//! Tennis match scoring and doubles tournament web app: library with models and engines.
//!
//! Both engines are pure: every transition takes a state by reference and returns a new
//! one (or an error), so a failed call never disturbs the caller's snapshot.

pub mod logic;
pub mod models;

pub use logic::*;
pub use models::*;
