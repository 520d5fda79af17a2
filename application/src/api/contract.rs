//! Possession contract related API definitions.

use std::{collections::BTreeMap, str::FromStr as _};

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use common::{DateTime, Handler as _, Money};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{command, domain::contract, query, read};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service};

define_error! {
    enum ContractError {
        #[code = "CONTRACT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Possession` contract with the provided ID does not exist"]
        NotExists,
    }
}

/// A possession contract.
#[derive(Clone, Debug, Serialize)]
pub struct Contract {
    /// Unique identifier of this [`Contract`].
    pub id: Uuid,

    /// ID of the person holding the equipment.
    pub person_id: Uuid,

    /// ID of the possessed equipment item.
    pub equipment_id: Uuid,

    /// Kind of this [`Contract`] (`lease`, `sale` or `borrow`).
    pub contract_type: String,

    /// RFC 3339 timestamp of when the possession starts.
    pub start_date: Option<String>,

    /// RFC 3339 timestamp of when this [`Contract`] expires.
    pub expires: Option<String>,

    /// Payment due under this [`Contract`], in dollars.
    pub payment: Option<String>,

    /// RFC 3339 timestamp of when this [`Contract`] was created.
    pub created_at: String,
}

impl From<contract::Possession> for Contract {
    fn from(contract: contract::Possession) -> Self {
        Self {
            id: contract.id.into(),
            person_id: contract.person_id.into(),
            equipment_id: contract.equipment_id.into(),
            contract_type: contract.kind.to_string().to_lowercase(),
            start_date: contract.start_date.map(|d| d.to_rfc3339()),
            expires: contract.expires_at.map(|d| d.to_rfc3339()),
            payment: contract.payment.map(|p| p.to_string()),
            created_at: contract.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating a [`Contract`].
#[derive(Clone, Debug, Deserialize)]
pub struct CreateRequest {
    /// Kind of the [`Contract`] (`lease`, `sale` or `borrow`).
    #[serde(default)]
    pub contract_type: Option<String>,

    /// ID of the person holding the equipment.
    #[serde(default)]
    pub person_id: Option<Uuid>,

    /// ID of the possessed equipment item.
    #[serde(default)]
    pub equipment_id: Option<Uuid>,

    /// RFC 3339 timestamp of when the possession starts.
    #[serde(default)]
    pub start_date: Option<String>,

    /// RFC 3339 timestamp of when the [`Contract`] expires.
    #[serde(default)]
    pub expires: Option<String>,

    /// Payment due under the [`Contract`], in dollars.
    #[serde(default)]
    pub payment: Option<String>,
}

/// Parses the provided kind name into a [`contract::Kind`].
///
/// Unrecognized names become [`None`], which [`contract::Draft`] validation
/// reports on the `contract_type` field.
fn parse_kind(name: &str) -> Option<contract::Kind> {
    contract::Kind::from_str(&name.to_ascii_uppercase()).ok()
}

/// Parses the provided RFC 3339 (or bare `YYYY-MM-DD` date) string into a
/// [`DateTime`].
pub(crate) fn parse_datetime<Of: ?Sized>(
    input: &str,
) -> Option<common::DateTimeOf<Of>> {
    DateTime::from_rfc3339(input)
        .or_else(|_| DateTime::from_rfc3339(&format!("{input}T00:00:00Z")))
        .ok()
        .map(DateTime::coerce)
}

impl CreateRequest {
    /// Parses this [`CreateRequest`] into a [`contract::Draft`].
    ///
    /// # Errors
    ///
    /// If any of the provided fields is malformed. Missing fields are not an
    /// error here, as [`contract::Draft`] validation reports them.
    fn parse(self) -> Result<contract::Draft, Error> {
        let Self {
            contract_type,
            person_id,
            equipment_id,
            start_date,
            expires,
            payment,
        } = self;

        let mut violations = BTreeMap::new();

        let kind = contract_type.as_deref().and_then(parse_kind);

        let start_date = start_date.as_deref().map(parse_datetime).map(|d| {
            if d.is_none() {
                _ = violations.insert("start_date", "is invalid");
            }
            d
        });
        let expires = expires.as_deref().map(parse_datetime).map(|d| {
            if d.is_none() {
                _ = violations.insert("expires", "is invalid");
            }
            d
        });
        let payment = payment.as_deref().map(|p| {
            let money = Money::from_str(p).ok();
            if money.is_none() {
                _ = violations.insert("payment", "is not a number");
            }
            money
        });

        if violations.is_empty() {
            Ok(contract::Draft {
                kind,
                person_id: person_id.map(Into::into),
                equipment_id: equipment_id.map(Into::into),
                start_date: start_date.flatten(),
                expires_at: expires.flatten(),
                payment: payment.flatten(),
            })
        } else {
            Err(Error::unprocessable(violations))
        }
    }
}

/// Request body for updating a [`Contract`].
///
/// An absent field is left as is, while an explicit `null` clears it.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateRequest {
    /// New kind of the [`Contract`].
    #[serde(default)]
    pub contract_type: Option<String>,

    /// New start of the possession.
    #[serde(default)]
    pub start_date: Option<Option<String>>,

    /// New expiration of the [`Contract`].
    #[serde(default)]
    pub expires: Option<Option<String>>,

    /// New payment due under the [`Contract`], in dollars.
    #[serde(default)]
    pub payment: Option<Option<String>>,
}

/// Response of a successful [`Contract`] mutation.
#[derive(Clone, Debug, Serialize)]
pub struct MutationResponse {
    /// Human-readable result message.
    pub message: String,

    /// Affected [`Contract`].
    pub contract: Contract,
}

/// Response of a [`Contract`]s list request.
#[derive(Clone, Debug, Serialize)]
pub struct ListResponse {
    /// [`Contract`]s on the requested page.
    pub items: Vec<Contract>,

    /// 1-based number of the returned page.
    pub page: usize,

    /// Number of items requested per page.
    pub per_page: usize,

    /// Indicator whether a next page exists.
    pub has_next_page: bool,

    /// Total count of [`Contract`]s.
    pub total_count: i64,
}

/// Query parameters of a [`Contract`]s list request.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ListQuery {
    /// 1-based number of the requested page.
    pub page: Option<usize>,

    /// Number of items per page.
    pub per_page: Option<usize>,

    /// ID of a person to return the [`Contract`]s of only.
    pub person_id: Option<Uuid>,
}

/// `GET /contracts` handler.
#[tracing::instrument(skip_all, fields(http.route = "/contracts"))]
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
        .execute(query::contracts::List::by(read::contract::list::Selector {
            arguments,
            filter: read::contract::list::Filter {
                person_id: person_id.map(Into::into),
            },
        }))
        .await
        .map_err(AsError::into_error)?;
    let total_count: i64 = service
        .execute(query::contracts::TotalCount::by(()))
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

/// `GET /contracts/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/contracts/:id", %id))]
pub async fn show(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Contract>, Error> {
    service
        .execute(query::contract::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|contract| Json(contract.into()))
        .ok_or_else(|| ContractError::NotExists.into())
}

/// `POST /contracts` handler.
#[tracing::instrument(skip_all, fields(http.route = "/contracts"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(request): Json<CreateRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), Error> {
    let draft = request.parse()?;

    let contract = service
        .execute(command::CreatePossessionContract { draft })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Contract was successfully created.".to_string(),
            contract: contract.into(),
        }),
    ))
}

/// `PUT /contracts/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/contracts/:id", %id))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<MutationResponse>, Error> {
    let UpdateRequest {
        contract_type,
        start_date,
        expires,
        payment,
    } = request;

    let mut violations = BTreeMap::new();

    // An unrecognized kind must not silently keep the old one.
    let kind = contract_type.as_deref().map(|name| {
        let kind = parse_kind(name);
        if kind.is_none() {
            _ = violations
                .insert("contract_type", "is not included in the list");
        }
        kind
    });
    let start_date = start_date.map(|d| {
        d.as_deref().map(parse_datetime).map(|parsed| {
            if parsed.is_none() {
                _ = violations.insert("start_date", "is invalid");
            }
            parsed
        })
    });
    let expires = expires.map(|d| {
        d.as_deref().map(parse_datetime).map(|parsed| {
            if parsed.is_none() {
                _ = violations.insert("expires", "is invalid");
            }
            parsed
        })
    });
    let payment = payment.map(|p| {
        p.as_deref().map(|raw| {
            let money = Money::from_str(raw).ok();
            if money.is_none() {
                _ = violations.insert("payment", "is not a number");
            }
            money
        })
    });

    if !violations.is_empty() {
        return Err(Error::unprocessable(violations));
    }

    let contract = service
        .execute(command::UpdatePossessionContract {
            id: id.into(),
            kind: kind.flatten(),
            start_date: start_date.map(Option::flatten),
            expires_at: expires.map(Option::flatten),
            payment: payment.map(Option::flatten),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(MutationResponse {
        message: "Contract was successfully updated.".to_string(),
        contract: contract.into(),
    }))
}

/// Response of a successful [`Contract`] deletion.
#[derive(Clone, Debug, Serialize)]
pub struct DeletionResponse {
    /// Human-readable result message.
    pub message: String,
}

/// `DELETE /contracts/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/contracts/:id", %id))]
pub async fn destroy(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletionResponse>, Error> {
    service
        .execute(command::DeletePossessionContract { id: id.into() })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(DeletionResponse {
        message: "Contract was successfully destroyed.".to_string(),
    }))
}
