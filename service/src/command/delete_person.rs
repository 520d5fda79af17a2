//! [`Command`] for deleting a [`Person`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{person, Person},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Person`].
///
/// The [`Person`] is only marked as deleted, so existing [`Possession`]
/// contracts and [`Agreement`] executions keep referring to it.
///
/// [`Agreement`]: crate::domain::Agreement
/// [`Possession`]: crate::domain::Possession
#[derive(Clone, Copy, Debug)]
pub struct DeletePerson {
    /// ID of the [`Person`] to delete.
    pub id: person::Id,
}

impl<Db, Fs> Command<DeletePerson> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Person>, person::Id>>,
            Ok = Option<Person>,
            Err = Traced<database::Error>,
        > + Database<Update<Person>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeletePerson) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePerson { id } = cmd;

        let mut person = self
            .database()
            .execute(Select(By::<Option<Person>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PersonNotExists(id))
            .map_err(tracerr::wrap!())?;

        person.deleted_at = Some(DateTime::now().coerce());

        self.database()
            .execute(Update(person))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeletePerson`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Person`] with the provided ID does not exist.
    #[display("`Person(id: {_0})` does not exist")]
    PersonNotExists(#[error(not(source))] person::Id),
}
