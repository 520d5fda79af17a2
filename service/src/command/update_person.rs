//! [`Command`] for updating an existing [`Person`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{person, Person},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Person`].
///
/// All mutable fields are replaced with the provided values.
#[derive(Clone, Debug)]
pub struct UpdatePerson {
    /// ID of the [`Person`] to update.
    pub id: person::Id,

    /// New [`person::Name`] of the [`Person`].
    pub name: person::Name,

    /// New [`person::Email`] of the [`Person`] ([`None`] clears it).
    pub email: Option<person::Email>,

    /// New [`person::Phone`] of the [`Person`] ([`None`] clears it).
    pub phone: Option<person::Phone>,
}

impl<Db, Fs> Command<UpdatePerson> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Person>, person::Id>>,
            Ok = Option<Person>,
            Err = Traced<database::Error>,
        > + Database<Update<Person>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Person;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdatePerson) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePerson {
            id,
            name,
            email,
            phone,
        } = cmd;

        let mut person = self
            .database()
            .execute(Select(By::<Option<Person>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PersonNotExists(id))
            .map_err(tracerr::wrap!())?;

        person.name = name;
        person.email = email;
        person.phone = phone;

        self.database()
            .execute(Update(person.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(person)
    }
}

/// Error of [`UpdatePerson`] [`Command`] execution.
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
