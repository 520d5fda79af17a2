//! [`Agreement`] execution related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{agreement, Agreement},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Agreement>, agreement::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Agreement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Agreement>, agreement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: agreement::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, person_id, date_signed, url, created_at \
            FROM agreement_executions \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Agreement {
                id: row.get("id"),
                person_id: row.get("person_id"),
                date_signed: row.get("date_signed"),
                url: row.get("url"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Agreement>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(agreement): Insert<Agreement>,
    ) -> Result<Self::Ok, Self::Err> {
        let Agreement {
            id,
            person_id,
            date_signed,
            url,
            created_at,
        } = agreement;

        const SQL: &str = "\
            INSERT INTO agreement_executions (\
                id, person_id, date_signed, url, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::TIMESTAMPTZ, $4::VARCHAR, $5::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &person_id, &date_signed, &url, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<Agreement>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(agreement): Update<Agreement>,
    ) -> Result<Self::Ok, Self::Err> {
        let Agreement {
            id,
            person_id,
            date_signed,
            url,
            created_at: _,
        } = agreement;

        const SQL: &str = "\
            UPDATE agreement_executions \
            SET person_id = $2::UUID, \
                date_signed = $3::TIMESTAMPTZ, \
                url = $4::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &person_id, &date_signed, &url])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Agreement, agreement::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Agreement, agreement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: agreement::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM agreement_executions \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::agreement::list::Page, read::agreement::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::agreement::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::agreement::list::Page, read::agreement::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::agreement::list::Selector {
            arguments,
            filter: read::agreement::list::Filter { person_id },
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap() + 1;
        let offset = i64::try_from(arguments.offset()).unwrap();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit, &offset];

        let person_idx = person_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });

        let sql = format!(
            "SELECT id, person_id, date_signed, url, created_at \
             FROM agreement_executions \
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
            rows.into_iter().take(arguments.limit()).map(|row| Agreement {
                id: row.get("id"),
                person_id: row.get("person_id"),
                date_signed: row.get("date_signed"),
                url: row.get("url"),
                created_at: row.get("created_at"),
            });

        Ok(read::agreement::list::Page::new(arguments, items, has_more))
    }
}

impl<C> Database<Select<By<read::agreement::list::TotalCount, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::agreement::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::agreement::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM agreement_executions";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
