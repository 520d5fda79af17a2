//! Read entities definitions.

pub mod agreement;
pub mod contract;
pub mod equipment;
pub mod person;
