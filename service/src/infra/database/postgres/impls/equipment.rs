//! [`Equipment`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{equipment, Equipment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Equipment>, equipment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Equipment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Equipment>, equipment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: equipment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, make, model, created_at, deleted_at \
            FROM equipment \
            WHERE id = $1::UUID \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Equipment {
                id: row.get("id"),
                make: row.get("make"),
                model: row.get("model"),
                created_at: row.get("created_at"),
                deleted_at: row.get("deleted_at"),
            }))
    }
}

impl<C> Database<Insert<Equipment>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Equipment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(equipment): Insert<Equipment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(equipment))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Equipment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(equipment): Update<Equipment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Equipment {
            id,
            make,
            model,
            created_at,
            deleted_at,
        } = equipment;

        const SQL: &str = "\
            INSERT INTO equipment (\
                id, make, model, created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, \
                $4::TIMESTAMPTZ, $5::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET make = EXCLUDED.make, \
                model = EXCLUDED.model, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(SQL, &[&id, &make, &model, &created_at, &deleted_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::equipment::list::Page, read::equipment::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::equipment::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::equipment::list::Page, read::equipment::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::equipment::list::Selector {
            arguments,
            filter: read::equipment::list::Filter,
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap() + 1;
        let offset = i64::try_from(arguments.offset()).unwrap();

        const SQL: &str = "\
            SELECT id, make, model, created_at, deleted_at \
            FROM equipment \
            WHERE deleted_at IS NULL \
            ORDER BY created_at DESC, id DESC \
            LIMIT $1::INT8 OFFSET $2::INT8";
        let rows = self
            .query(SQL, &[&limit, &offset])
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let items =
            rows.into_iter().take(arguments.limit()).map(|row| Equipment {
                id: row.get("id"),
                make: row.get("make"),
                model: row.get("model"),
                created_at: row.get("created_at"),
                deleted_at: row.get("deleted_at"),
            });

        Ok(read::equipment::list::Page::new(arguments, items, has_more))
    }
}

impl<C> Database<Select<By<read::equipment::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::equipment::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::equipment::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM equipment \
            WHERE deleted_at IS NULL";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
