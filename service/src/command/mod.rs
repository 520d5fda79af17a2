//! [`Command`] definition.

pub mod create_agreement_execution;
pub mod create_equipment;
pub mod create_person;
pub mod create_possession_contract;
pub mod delete_agreement_execution;
pub mod delete_person;
pub mod delete_possession_contract;
pub mod update_agreement_execution;
pub mod update_person;
pub mod update_possession_contract;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_agreement_execution::CreateAgreementExecution,
    create_equipment::CreateEquipment, create_person::CreatePerson,
    create_possession_contract::CreatePossessionContract,
    delete_agreement_execution::DeleteAgreementExecution,
    delete_person::DeletePerson,
    delete_possession_contract::DeletePossessionContract,
    update_agreement_execution::UpdateAgreementExecution,
    update_person::UpdatePerson,
    update_possession_contract::UpdatePossessionContract,
};
