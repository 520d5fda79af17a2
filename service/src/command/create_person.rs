//! [`Command`] for creating a new [`Person`].

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{person, Person},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Person`].
#[derive(Clone, Debug)]
pub struct CreatePerson {
    /// [`person::Name`] of a new [`Person`].
    pub name: person::Name,

    /// [`person::Email`] of a new [`Person`].
    pub email: Option<person::Email>,

    /// [`person::Phone`] of a new [`Person`].
    pub phone: Option<person::Phone>,
}

impl<Db, Fs> Command<CreatePerson> for Service<Db, Fs>
where
    Db: Database<Insert<Person>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Person;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreatePerson) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePerson { name, email, phone } = cmd;

        let person = Person {
            id: person::Id::new(),
            name,
            email,
            phone,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };
        self.database()
            .execute(Insert(person.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(person)
    }
}

/// Error of [`CreatePerson`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}
