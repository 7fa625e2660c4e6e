//! Domain types for Econgadget

pub mod dataset;
pub mod observation;
pub mod term;

pub use dataset::Dataset;
pub use observation::Observation;
pub use term::TermRecord;
