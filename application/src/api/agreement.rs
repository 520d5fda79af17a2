//! Agreement execution related API definitions.

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, Path, Query},
    Extension, Json,
};
use common::Handler as _;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{command, domain, query, read};
use uuid::Uuid;

use crate::{
    api::{self, contract::parse_datetime, MultipartError},
    define_error, AsError, Error, Service,
};

define_error! {
    enum AgreementError {
        #[code = "AGREEMENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Agreement` execution with the provided ID does not exist"]
        NotExists,
    }
}

/// A recorded agreement execution.
#[derive(Clone, Debug, Serialize)]
pub struct Agreement {
    /// Unique identifier of this [`Agreement`] execution.
    pub id: Uuid,

    /// ID of the person who signed the agreement.
    pub person_id: Uuid,

    /// RFC 3339 timestamp of when the agreement was signed.
    pub date_signed: String,

    /// URL of the hosted signed document.
    pub url: String,

    /// RFC 3339 timestamp of when this [`Agreement`] execution was recorded.
    pub created_at: String,
}

impl From<domain::Agreement> for Agreement {
    fn from(agreement: domain::Agreement) -> Self {
        Self {
            id: agreement.id.into(),
            person_id: agreement.person_id.into(),
            date_signed: agreement.date_signed.to_rfc3339(),
            url: agreement.url.to_string(),
            created_at: agreement.created_at.to_rfc3339(),
        }
    }
}

/// Response of a successful [`Agreement`] mutation.
#[derive(Clone, Debug, Serialize)]
pub struct MutationResponse {
    /// Human-readable result message.
    pub message: String,

    /// Affected [`Agreement`] execution.
    pub agreement_execution: Agreement,
}

/// Response of an [`Agreement`] executions list request.
#[derive(Clone, Debug, Serialize)]
pub struct ListResponse {
    /// [`Agreement`] executions on the requested page.
    pub items: Vec<Agreement>,

    /// 1-based number of the returned page.
    pub page: usize,

    /// Number of items requested per page.
    pub per_page: usize,

    /// Indicator whether a next page exists.
    pub has_next_page: bool,

    /// Total count of [`Agreement`] executions.
    pub total_count: i64,
}

/// Query parameters of an [`Agreement`] executions list request.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based number of the requested page.
    pub page: Option<usize>,

    /// Number of items per page.
    pub per_page: Option<usize>,

    /// ID of a person to return the [`Agreement`] executions of only.
    pub person_id: Option<Uuid>,
}

/// `GET /agreement-executions` handler.
#[tracing::instrument(skip_all, fields(http.route = "/agreement-executions"))]
pub async fn list(
    Extension(service): Extension<Service>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ListResponse>, Error> {
    let ListQuery {
        page,
        per_page,
        person_id,
    } = params;
    let arguments = api::PageQuery { page, per_page }.arguments()?;

    let page = service
        .execute(query::agreements::List::by(
            read::agreement::list::Selector {
                arguments,
                filter: read::agreement::list::Filter {
                    person_id: person_id.map(Into::into),
                },
            },
        ))
        .await
        .map_err(AsError::into_error)?;
    let total_count: i64 = service
        .execute(query::agreements::TotalCount::by(()))
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

/// `GET /agreement-executions/:id` handler.
#[tracing::instrument(
    skip_all,
    fields(http.route = "/agreement-executions/:id", %id),
)]
pub async fn show(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agreement>, Error> {
    service
        .execute(query::agreement::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|agreement| Json(agreement.into()))
        .ok_or_else(|| AgreementError::NotExists.into())
}

/// `POST /agreement-executions` handler.
///
/// Expects a `multipart/form-data` body with `person_id` and `date_signed`
/// text fields and a `document` file field.
#[tracing::instrument(skip_all, fields(http.route = "/agreement-executions"))]
pub async fn create(
    Extension(service): Extension<Service>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MutationResponse>), Error> {
    let mut person_id = None;
    let mut date_signed = None;
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| Error::from(MultipartError::Malformed))?
    {
        match field.name() {
            Some("person_id") => {
                person_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| Error::from(MultipartError::Malformed))?,
                );
            }
            Some("date_signed") => {
                date_signed = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| Error::from(MultipartError::Malformed))?,
                );
            }
            Some("document") => {
                document = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|_| Error::from(MultipartError::Malformed))?
                        .to_vec(),
                );
            }
            Some(_) | None => {}
        }
    }

    let mut violations = BTreeMap::new();

    let person_id = match person_id.as_deref().map(str::parse::<Uuid>) {
        Some(Ok(id)) => Some(id),
        Some(Err(_)) => {
            _ = violations.insert("person_id", "is invalid");
            None
        }
        None => {
            _ = violations.insert("person_id", "can't be blank");
            None
        }
    };
    let date_signed = match date_signed.as_deref() {
        Some(raw) => {
            let parsed = parse_datetime(raw);
            if parsed.is_none() {
                _ = violations.insert("date_signed", "is invalid");
            }
            parsed
        }
        None => {
            _ = violations.insert("date_signed", "can't be blank");
            None
        }
    };
    if document.as_ref().map_or(true, |d| d.is_empty()) {
        _ = violations.insert("document", "can't be blank");
    }

    let (Some(person_id), Some(date_signed), Some(document)) =
        (person_id, date_signed, document.filter(|d| !d.is_empty()))
    else {
        return Err(Error::unprocessable(violations));
    };

    let agreement = service
        .execute(command::CreateAgreementExecution {
            person_id: person_id.into(),
            date_signed,
            document,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Agreement execution was successfully created."
                .to_string(),
            agreement_execution: agreement.into(),
        }),
    ))
}

/// Request body for updating an [`Agreement`] execution.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateRequest {
    /// New RFC 3339 timestamp of when the agreement was signed.
    #[serde(default)]
    pub date_signed: Option<String>,
}

/// `PUT /agreement-executions/:id` handler.
#[tracing::instrument(
    skip_all,
    fields(http.route = "/agreement-executions/:id", %id),
)]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<MutationResponse>, Error> {
    let UpdateRequest { date_signed } = request;

    let date_signed = match date_signed.as_deref() {
        Some(raw) => parse_datetime(raw).ok_or_else(|| {
            Error::unprocessable([("date_signed", "is invalid")])
        })?,
        None => {
            return Err(Error::unprocessable([("date_signed", "can't be blank")]))
        }
    };

    let agreement = service
        .execute(command::UpdateAgreementExecution {
            id: id.into(),
            date_signed,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(MutationResponse {
        message: "Agreement execution was successfully updated.".to_string(),
        agreement_execution: agreement.into(),
    }))
}

/// Response of a successful [`Agreement`] execution deletion.
#[derive(Clone, Debug, Serialize)]
pub struct DeletionResponse {
    /// Human-readable result message.
    pub message: String,
}

/// `DELETE /agreement-executions/:id` handler.
#[tracing::instrument(
    skip_all,
    fields(http.route = "/agreement-executions/:id", %id),
)]
pub async fn destroy(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletionResponse>, Error> {
    service
        .execute(command::DeleteAgreementExecution { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(DeletionResponse {
        message: "Agreement execution was successfully destroyed.".to_string(),
    }))
}
