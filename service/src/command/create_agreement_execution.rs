//! [`Command`] for recording a new [`Agreement`] execution.

use common::{
    operations::{By, Delete, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{agreement, person, Agreement, Person},
    infra::{database, storage, Database, Storage},
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Agreement`] execution.
///
/// The signed document is uploaded to the external file [`Storage`] first,
/// and the [`Agreement`] is recorded only once the upload succeeded. If
/// recording fails afterwards, the uploaded document is removed again on a
/// best-effort basis.
#[derive(Clone, Debug)]
pub struct CreateAgreementExecution {
    /// ID of the [`Person`] who signed the agreement.
    pub person_id: person::Id,

    /// [`DateTime`] when the agreement was signed.
    pub date_signed: agreement::SigningDateTime,

    /// Raw bytes of the signed document.
    pub document: Vec<u8>,
}

impl<Db, Fs> Command<CreateAgreementExecution> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Person>, person::Id>>,
            Ok = Option<Person>,
            Err = Traced<database::Error>,
        > + Database<Insert<Agreement>, Ok = (), Err = Traced<database::Error>>,
    Fs: Storage<
            Insert<storage::File>,
            Ok = agreement::Url,
            Err = Traced<storage::Error>,
        > + Storage<
            Delete<By<storage::File, storage::Key>>,
            Ok = (),
            Err = Traced<storage::Error>,
        >,
{
    type Ok = Agreement;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateAgreementExecution,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateAgreementExecution {
            person_id,
            date_signed,
            document,
        } = cmd;

        let person = self
            .database()
            .execute(Select(By::<Option<Person>, _>::new(person_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PersonNotExists(person_id))
            .map_err(tracerr::wrap!())?;

        let key = storage::Key::new(date_signed, &person.name);
        let url = self
            .storage()
            .execute(Insert(storage::File {
                key: key.clone(),
                bytes: document,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let agreement = Agreement {
            id: agreement::Id::new(),
            person_id,
            date_signed,
            url,
            created_at: DateTime::now().coerce(),
        };
        if let Err(e) = self
            .database()
            .execute(Insert(agreement.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
        {
            // Compensate the already performed upload, so the document
            // doesn't stay hosted without a record referring to it.
            if let Err(removal) = self
                .storage()
                .execute(Delete(By::<storage::File, _>::new(key)))
                .await
            {
                tracing::warn!(
                    error = %removal,
                    "failed to remove uploaded document after `Agreement` \
                     recording failed",
                );
            }
            return Err(e);
        }

        Ok(agreement)
    }
}

/// Error of [`CreateAgreementExecution`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// File [`Storage`] error.
    #[display("`Storage` operation failed: {_0}")]
    #[from]
    Fs(storage::Error),

    /// [`Person`] with the provided ID does not exist.
    #[display("`Person(id: {_0})` does not exist")]
    PersonNotExists(#[error(not(source))] person::Id),
}
