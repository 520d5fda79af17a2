//! [`Command`] for deleting a [`Possession`] contract.

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, Possession},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Possession`] contract.
///
/// The contract is removed entirely, freeing its `(person, equipment)` pair
/// for a future contract.
#[derive(Clone, Copy, Debug)]
pub struct DeletePossessionContract {
    /// ID of the [`Possession`] contract to delete.
    pub id: contract::Id,
}

impl<Db, Fs> Command<DeletePossessionContract> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Possession>, contract::Id>>,
            Ok = Option<Possession>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Possession, contract::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePossessionContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePossessionContract { id } = cmd;

        self.database()
            .execute(Select(By::<Option<Possession>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeletePossessionContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Possession`] contract with the provided ID does not exist.
    #[display("`Possession(id: {_0})` contract does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),
}
