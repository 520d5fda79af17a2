//! [`Command`] for creating a new [`Possession`] contract.

use common::{
    operations::{By, Insert, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, equipment, person, Equipment, Person, Possession},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Possession`] contract.
#[derive(Clone, Copy, Debug)]
pub struct CreatePossessionContract {
    /// [`contract::Draft`] of a new [`Possession`] contract.
    pub draft: contract::Draft,
}

impl<Db, Fs> Command<CreatePossessionContract> for Service<Db, Fs>
where
    Db: Database<
            Select<By<Option<Person>, person::Id>>,
            Ok = Option<Person>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Equipment>, equipment::Id>>,
            Ok = Option<Equipment>,
            Err = Traced<database::Error>,
        > + Database<Insert<Possession>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Possession;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePossessionContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePossessionContract { draft } = cmd;

        let contract::Validated {
            kind,
            person_id,
            equipment_id,
            start_date,
            expires_at,
            payment,
        } = draft
            .validate(&self.config().allowed_contract_kinds)
            .map_err(E::InvalidDraft)
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Select(By::<Option<Person>, _>::new(person_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PersonNotExists(person_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        self.database()
            .execute(Select(By::<Option<Equipment>, _>::new(equipment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::EquipmentNotExists(equipment_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let contract = Possession {
            id: contract::Id::new(),
            person_id,
            equipment_id,
            kind,
            start_date,
            expires_at,
            payment,
            created_at: DateTime::now().coerce(),
        };
        // A concurrent contract upon the same `(person_id, equipment_id)`
        // pair loses here on the unique constraint, not on a pre-check.
        self.database()
            .execute(Insert(contract.clone()))
            .await
            .map_err(|e| {
                if e.as_ref().is_unique_violation(Some(
                    Possession::UNIQUE_PERSON_EQUIPMENT,
                )) {
                    tracerr::new!(E::AlreadyPossessed {
                        person_id,
                        equipment_id,
                    })
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        Ok(contract)
    }
}

/// Error of [`CreatePossessionContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`contract::Draft`] violates validation rules.
    #[display("invalid contract: {_0}")]
    InvalidDraft(#[error(not(source))] contract::Violations),

    /// [`Person`] with the provided ID does not exist.
    #[display("`Person(id: {_0})` does not exist")]
    PersonNotExists(#[error(not(source))] person::Id),

    /// [`Equipment`] with the provided ID does not exist.
    #[display("`Equipment(id: {_0})` does not exist")]
    EquipmentNotExists(#[error(not(source))] equipment::Id),

    /// [`Person`] already possesses the [`Equipment`] under another contract.
    #[display(
        "`Person(id: {person_id})` already possesses \
         `Equipment(id: {equipment_id})`"
    )]
    AlreadyPossessed {
        /// ID of the possessing [`Person`].
        person_id: person::Id,

        /// ID of the possessed [`Equipment`].
        equipment_id: equipment::Id,
    },
}
