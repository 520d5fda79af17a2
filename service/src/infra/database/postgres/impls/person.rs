//! [`Person`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{person, Person},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Person>, person::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Person>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Person>, person::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: person::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, email, phone, created_at, deleted_at \
            FROM people \
            WHERE id = $1::UUID \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Person {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                phone: row.get("phone"),
                created_at: row.get("created_at"),
                deleted_at: row.get("deleted_at"),
            }))
    }
}

impl<C> Database<Insert<Person>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Person>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(person): Insert<Person>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(person)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Person>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(person): Update<Person>,
    ) -> Result<Self::Ok, Self::Err> {
        let Person {
            id,
            name,
            email,
            phone,
            created_at,
            deleted_at,
        } = person;

        const SQL: &str = "\
            INSERT INTO people (\
                id, name, email, phone, created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, \
                $3::VARCHAR, $4::VARCHAR, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(SQL, &[&id, &name, &email, &phone, &created_at, &deleted_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<read::person::list::Page, read::person::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::person::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::person::list::Page, read::person::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::person::list::Selector {
            arguments,
            filter: read::person::list::Filter,
        } = by.into_inner();

        let limit = i64::try_from(arguments.limit()).unwrap() + 1;
        let offset = i64::try_from(arguments.offset()).unwrap();

        const SQL: &str = "\
            SELECT id, name, email, phone, created_at, deleted_at \
            FROM people \
            WHERE deleted_at IS NULL \
            ORDER BY created_at DESC, id DESC \
            LIMIT $1::INT8 OFFSET $2::INT8";
        let rows = self
            .query(SQL, &[&limit, &offset])
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let items = rows.into_iter().take(arguments.limit()).map(|row| Person {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            phone: row.get("phone"),
            created_at: row.get("created_at"),
            deleted_at: row.get("deleted_at"),
        });

        Ok(read::person::list::Page::new(arguments, items, has_more))
    }
}

impl<C> Database<Select<By<read::person::list::TotalCount, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::person::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::person::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT8 \
            FROM people \
            WHERE deleted_at IS NULL";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i64>(0).into())
    }
}
