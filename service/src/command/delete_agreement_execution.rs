//! [`Command`] for deleting an [`Agreement`] execution.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{agreement, Agreement},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Agreement`] execution.
///
/// Only the record is removed; the hosted document stays on the file storage
/// as an audit trail.
#[derive(Clone, Copy, Debug)]
pub struct DeleteAgreementExecution {
    /// ID of the [`Agreement`] execution to delete.
    pub id: agreement::Id,
}

impl<Db, Fs> Command<DeleteAgreementExecution> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Agreement>, agreement::Id>>,
            Ok = Option<Agreement>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Agreement, agreement::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteAgreementExecution,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteAgreementExecution { id } = cmd;

        self.database()
            .execute(Select(By::<Option<Agreement>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::AgreementNotExists(id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteAgreementExecution`] [`Command`] execution.
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
