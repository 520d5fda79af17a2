//! [`Command`] for creating a new [`Equipment`] item.

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{equipment, Equipment},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Equipment`] item.
#[derive(Clone, Debug)]
pub struct CreateEquipment {
    /// [`equipment::Make`] of a new [`Equipment`] item.
    pub make: equipment::Make,

    /// [`equipment::Model`] of a new [`Equipment`] item.
    pub model: equipment::Model,
}

impl<Db, Fs> Command<CreateEquipment> for Service<Db, Fs>
where
    Db: Database<Insert<Equipment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Equipment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateEquipment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateEquipment { make, model } = cmd;

        let equipment = Equipment {
            id: equipment::Id::new(),
            make,
            model,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };
        self.database()
            .execute(Insert(equipment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(equipment)
    }
}

/// Error of [`CreateEquipment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),
}
