//! [`Command`] for updating an existing [`Possession`] contract.

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, Possession},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Possession`] contract.
///
/// Only the enumerated fields may change; the contracting parties are fixed
/// once the contract is created. An outer [`Option`] distinguishes "leave as
/// is" from "set to the inner value".
#[derive(Clone, Copy, Debug)]
pub struct UpdatePossessionContract {
    /// ID of the [`Possession`] contract to update.
    pub id: contract::Id,

    /// New [`contract::Kind`] of the contract.
    pub kind: Option<contract::Kind>,

    /// New start date of the possession.
    pub start_date: Option<Option<contract::StartDateTime>>,

    /// New expiration of the contract.
    pub expires_at: Option<Option<contract::ExpirationDateTime>>,

    /// New payment due under the contract.
    pub payment: Option<Option<Money>>,
}

impl<Db, Fs> Command<UpdatePossessionContract> for Service<Db, Fs>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Possession, contract::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Possession>, contract::Id>>,
            Ok = Option<Possession>,
            Err = Traced<database::Error>,
        > + Database<Update<Possession>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Possession;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePossessionContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePossessionContract {
            id,
            kind,
            start_date,
            expires_at,
            payment,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same contract.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut contract = tx
            .execute(Select(By::<Option<Possession>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(id))
            .map_err(tracerr::wrap!())?;

        let mut draft = contract.to_draft();
        if let Some(kind) = kind {
            draft.kind = Some(kind);
        }
        if let Some(start_date) = start_date {
            draft.start_date = start_date;
        }
        if let Some(expires_at) = expires_at {
            draft.expires_at = expires_at;
        }
        if let Some(payment) = payment {
            draft.payment = payment;
        }

        let validated = draft
            .validate(&self.config().allowed_contract_kinds)
            .map_err(E::InvalidDraft)
            .map_err(tracerr::wrap!())?;

        contract.kind = validated.kind;
        contract.start_date = validated.start_date;
        contract.expires_at = validated.expires_at;
        contract.payment = validated.payment;

        tx.execute(Update(contract.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(contract)
    }
}

/// Error of [`UpdatePossessionContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Updated contract violates validation rules.
    #[display("invalid contract: {_0}")]
    InvalidDraft(#[error(not(source))] contract::Violations),

    /// [`Possession`] contract with the provided ID does not exist.
    #[display("`Possession(id: {_0})` contract does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),
}
