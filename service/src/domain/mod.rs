//! Domain definitions.

pub mod agreement;
pub mod contract;
pub mod equipment;
pub mod person;

pub use self::{
    agreement::Agreement, contract::Possession, equipment::Equipment,
    person::Person,
};
