//! [`Person`]-related API definitions.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::Handler as _;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{command, domain, query, read};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service};

define_error! {
    enum PersonError {
        #[code = "PERSON_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Person` with the provided ID does not exist"]
        NotExists,
    }
}

/// A person.
#[derive(Clone, Debug, Serialize)]
pub struct Person {
    /// Unique identifier of this [`Person`].
    pub id: Uuid,

    /// Full name of this [`Person`].
    pub name: String,

    /// Email address of this [`Person`].
    pub email: Option<String>,

    /// Phone number of this [`Person`].
    pub phone: Option<String>,

    /// RFC 3339 timestamp of when this [`Person`] was created.
    pub created_at: String,
}

impl From<domain::Person> for Person {
    fn from(person: domain::Person) -> Self {
        Self {
            id: person.id.into(),
            name: person.name.to_string(),
            email: person.email.map(|e| e.to_string()),
            phone: person.phone.map(|p| p.to_string()),
            created_at: person.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating or updating a [`Person`].
#[derive(Clone, Debug, Deserialize)]
pub struct PersonRequest {
    /// Full name of the [`Person`].
    #[serde(default)]
    pub name: Option<String>,

    /// Email address of the [`Person`].
    #[serde(default)]
    pub email: Option<String>,

    /// Phone number of the [`Person`].
    #[serde(default)]
    pub phone: Option<String>,
}

impl PersonRequest {
    /// Parses this [`PersonRequest`] into validated domain values.
    ///
    /// # Errors
    ///
    /// With all the violated fields reported at once.
    fn parse(
        self,
    ) -> Result<
        (
            domain::person::Name,
            Option<domain::person::Email>,
            Option<domain::person::Phone>,
        ),
        Error,
    > {
        let Self { name, email, phone } = self;

        let mut violations = BTreeMap::new();

        let name = match name.as_deref().map(str::trim) {
            None | Some("") => {
                _ = violations.insert("name", "can't be blank");
                None
            }
            Some(_) => {
                let name = name.and_then(|n| domain::person::Name::new(n));
                if name.is_none() {
                    _ = violations.insert("name", "is invalid");
                }
                name
            }
        };

        let email = match email.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(address) => {
                let email = domain::person::Email::new(address);
                if email.is_none() {
                    _ = violations.insert("email", "is invalid");
                }
                email
            }
        };

        let phone = match phone.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(number) => {
                let phone = domain::person::Phone::new(number);
                if phone.is_none() {
                    _ = violations.insert("phone", "is invalid");
                }
                phone
            }
        };

        match name {
            Some(name) if violations.is_empty() => Ok((name, email, phone)),
            Some(_) | None => Err(Error::unprocessable(violations)),
        }
    }
}

/// Response of a successful [`Person`] mutation.
#[derive(Clone, Debug, Serialize)]
pub struct MutationResponse {
    /// Human-readable result message.
    pub message: String,

    /// Affected [`Person`].
    pub person: Person,
}

/// Response of a [`Person`]s list request.
#[derive(Clone, Debug, Serialize)]
pub struct ListResponse {
    /// [`Person`]s on the requested page.
    pub items: Vec<Person>,

    /// 1-based number of the returned page.
    pub page: usize,

    /// Number of items requested per page.
    pub per_page: usize,

    /// Indicator whether a next page exists.
    pub has_next_page: bool,

    /// Total count of [`Person`]s.
    pub total_count: i64,
}

/// `GET /people` handler.
#[tracing::instrument(skip_all, fields(http.route = "/people"))]
pub async fn list(
    Extension(service): Extension<Service>,
    Query(page): Query<api::PageQuery>,
) -> Result<Json<ListResponse>, Error> {
    let arguments = page.arguments()?;

    let page = service
        .execute(query::people::List::by(read::person::list::Selector {
            arguments,
            filter: read::person::list::Filter,
        }))
        .await
        .map_err(AsError::into_error)?;
    let total_count: i64 = service
        .execute(query::people::TotalCount::by(()))
        .await
        .map_err(AsError::into_error)?
        .into();

    let info = page.info();
    Ok(Json(ListResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        page: info.page,
        per_page: info.per_page,
        has_next_page: info.has_next_page,
        total_count,
    }))
}

/// `GET /people/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/people/:id", %id))]
pub async fn show(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, Error> {
    service
        .execute(query::person::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|person| Json(person.into()))
        .ok_or_else(|| PersonError::NotExists.into())
}

/// `POST /people` handler.
#[tracing::instrument(skip_all, fields(http.route = "/people"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(request): Json<PersonRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), Error> {
    let (name, email, phone) = request.parse()?;

    let person = service
        .execute(command::CreatePerson { name, email, phone })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Person was successfully created.".to_string(),
            person: person.into(),
        }),
    ))
}

/// `PUT /people/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/people/:id", %id))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Json(request): Json<PersonRequest>,
) -> Result<Json<MutationResponse>, Error> {
    let (name, email, phone) = request.parse()?;

    let person = service
        .execute(command::UpdatePerson {
            id: id.into(),
            name,
            email,
            phone,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(MutationResponse {
        message: "Person was successfully updated.".to_string(),
        person: person.into(),
    }))
}

/// Response of a successful [`Person`] deletion.
#[derive(Clone, Debug, Serialize)]
pub struct DeletionResponse {
    /// Human-readable result message.
    pub message: String,
}

/// `DELETE /people/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/people/:id", %id))]
pub async fn destroy(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletionResponse>, Error> {
    service
        .execute(command::DeletePerson { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(DeletionResponse {
        message: "Person was successfully destroyed.".to_string(),
    }))
}
