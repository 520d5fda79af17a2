//! [`Command`] for updating an existing [`Agreement`] execution.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{agreement, Agreement},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Agreement`] execution.
///
/// Only the signing date may change; the hosted document and its URL stay
/// as they were recorded.
#[derive(Clone, Copy, Debug)]
pub struct UpdateAgreementExecution {
    /// ID of the [`Agreement`] execution to update.
    pub id: agreement::Id,

    /// New [`DateTime`] when the agreement was signed.
    ///
    /// [`DateTime`]: common::DateTime
    pub date_signed: agreement::SigningDateTime,
}

impl<Db, Fs> Command<UpdateAgreementExecution> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Agreement>, agreement::Id>>,
            Ok = Option<Agreement>,
            Err = Traced<database::Error>,
        > + Database<Update<Agreement>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Agreement;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateAgreementExecution,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateAgreementExecution { id, date_signed } = cmd;

        let mut agreement = self
            .database()
            .execute(Select(By::<Option<Agreement>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AgreementNotExists(id))
            .map_err(tracerr::wrap!())?;

        agreement.date_signed = date_signed;

        self.database()
            .execute(Update(agreement.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(agreement)
    }
}

/// Error of [`UpdateAgreementExecution`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Agreement`] execution with the provided ID does not exist.
    #[display("`Agreement(id: {_0})` execution does not exist")]
    AgreementNotExists(#[error(not(source))] agreement::Id),
}
