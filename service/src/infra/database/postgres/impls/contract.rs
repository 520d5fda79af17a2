//! [`Possession`] contract related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{contract, Possession},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Possession>, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Possession>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Possession>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contract::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, person_id, equipment_id, kind, \
                   start_date, expires_at, payment, \
                   created_at \
            FROM possession_contracts \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Possession {
                id: row.get("id"),
                person_id: row.get("person_id"),
                equipment_id: row.get("equipment_id"),
                kind: row.get("kind"),
                start_date: row.get("start_date"),
                expires_at: row.get("expires_at"),
                payment: row.get("payment"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Possession>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contract): Insert<Possession>,
    ) -> Result<Self::Ok, Self::Err> {
        let Possession {
            id,
            person_id,
            equipment_id,
            kind,
            start_date,
            expires_at,
            payment,
            created_at,
        } = contract;

        // No `ON CONFLICT` clause: a violation of the unique
        // `(person_id, equipment_id)` constraint must surface as an error.
        const SQL: &str = "\
            INSERT INTO possession_contracts (\
                id, person_id, equipment_id, kind, \
                start_date, expires_at, payment, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::INT2, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ, $7::INT8, \
                $8::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &person_id,
                &equipment_id,
                &kind,
                &start_date,
                &expires_at,
                &payment,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Possession>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Possession>,
    ) -> Result<Self::Ok, Self::Err> {
        let Possession {
            id,
            person_id,
            equipment_id,
            kind,
            start_date,
            expires_at,
            payment,
            created_at: _,
        } = contract;

        const SQL: &str = "\
            UPDATE possession_contracts \
            SET person_id = $2::UUID, \
                equipment_id = $3::UUID, \
                kind = $4::INT2, \
                start_date = $5::TIMESTAMPTZ, \
                expires_at = $6::TIMESTAMPTZ, \
                payment = $7::INT8 \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &person_id,
                &equipment_id,
                &kind,
                &start_date,
                &expires_at,
                &payment,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Possession, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Possession, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contract::Id = by.into_inner();

        // Hard delete, so the `(person_id, equipment_id)` pair may be
        // contracted again later.
        const SQL: &str = "\
            DELETE FROM possession_contracts \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Possession, contract::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Possession, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contract::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM possession_contracts \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::contract::list::Page, read::contract::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::contract::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::contract::list::Page, read::contract::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::contract::list::Selector {
            arguments,
            filter: read::contract::list::Filter { person_id },
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap() + 1;
        let offset = i64::try_from(arguments.offset()).unwrap();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];

        let person_idx = person_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });

        let sql = format!(
            "SELECT id, person_id, equipment_id, kind, \
                    start_date, expires_at, payment, \
                    created_at \
             FROM possession_contracts \
             WHERE TRUE \
                   {person_filtering} \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1::INT8 OFFSET $2::INT8",
            person_filtering =
                person_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND person_id = ${idx}::UUID"))
                }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let items =
            rows.into_iter().take(arguments.limit()).map(|row| Possession {
                id: row.get("id"),
                person_id: row.get("person_id"),
                equipment_id: row.get("equipment_id"),
                kind: row.get("kind"),
                start_date: row.get("start_date"),
                expires_at: row.get("expires_at"),
                payment: row.get("payment"),
                created_at: row.get("created_at"),
            });

        Ok(read::contract::list::Page::new(arguments, items, has_more))
    }
}

impl<C> Database<Select<By<read::contract::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::contract::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::contract::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM possession_contracts";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
