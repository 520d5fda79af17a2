//! [`Equipment`]-related API definitions.

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
    enum EquipmentError {
        #[code = "EQUIPMENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "`Equipment` with the provided ID does not exist"]
        NotExists,
    }
}

/// An item of equipment.
#[derive(Clone, Debug, Serialize)]
pub struct Equipment {
    /// Unique identifier of this [`Equipment`] item.
    pub id: Uuid,

    /// Make of this [`Equipment`] item.
    pub make: String,

    /// Model of this [`Equipment`] item.
    pub model: String,

    /// RFC 3339 timestamp of when this [`Equipment`] item was created.
    pub created_at: String,
}

impl From<domain::Equipment> for Equipment {
    fn from(equipment: domain::Equipment) -> Self {
        Self {
            id: equipment.id.into(),
            make: equipment.make.to_string(),
            model: equipment.model.to_string(),
            created_at: equipment.created_at.to_rfc3339(),
        }
    }
}

/// Request body for creating an [`Equipment`] item.
#[derive(Clone, Debug, Deserialize)]
pub struct EquipmentRequest {
    /// Make of the [`Equipment`] item.
    #[serde(default)]
    pub make: Option<String>,

    /// Model of the [`Equipment`] item.
    #[serde(default)]
    pub model: Option<String>,
}

impl EquipmentRequest {
    /// Parses this [`EquipmentRequest`] into validated domain values.
    ///
    /// # Errors
    ///
    /// With all the violated fields reported at once.
    fn parse(
        self,
    ) -> Result<(domain::equipment::Make, domain::equipment::Model), Error>
    {
        let Self { make, model } = self;

        let mut violations = BTreeMap::new();

        let make = match make.as_deref().map(str::trim) {
            None | Some("") => {
                _ = violations.insert("make", "can't be blank");
                None
            }
            Some(_) => {
                let make = make.and_then(|m| domain::equipment::Make::new(m));
                if make.is_none() {
                    _ = violations.insert("make", "is invalid");
                }
                make
            }
        };

        let model = match model.as_deref().map(str::trim) {
            None | Some("") => {
                _ = violations.insert("model", "can't be blank");
                None
            }
            Some(_) => {
                let model =
                    model.and_then(|m| domain::equipment::Model::new(m));
                if model.is_none() {
                    _ = violations.insert("model", "is invalid");
                }
                model
            }
        };

        match (make, model) {
            (Some(make), Some(model)) if violations.is_empty() => {
                Ok((make, model))
            }
            _ => Err(Error::unprocessable(violations)),
        }
    }
}

/// Response of a successful [`Equipment`] mutation.
#[derive(Clone, Debug, Serialize)]
pub struct MutationResponse {
    /// Human-readable result message.
    pub message: String,

    /// Affected [`Equipment`] item.
    pub equipment: Equipment,
}

/// Response of an [`Equipment`] list request.
#[derive(Clone, Debug, Serialize)]
pub struct ListResponse {
    /// [`Equipment`] items on the requested page.
    pub items: Vec<Equipment>,

    /// 1-based number of the returned page.
    pub page: usize,

    /// Number of items requested per page.
    pub per_page: usize,

    /// Indicator whether a next page exists.
    pub has_next_page: bool,

    /// Total count of [`Equipment`] items.
    pub total_count: i64,
}

/// `GET /equipment` handler.
#[tracing::instrument(skip_all, fields(http.route = "/equipment"))]
pub async fn list(
    Extension(service): Extension<Service>,
    Query(page): Query<api::PageQuery>,
) -> Result<Json<ListResponse>, Error> {
    let arguments = page.arguments()?;

    let page = service
        .execute(query::equipment::List::by(read::equipment::list::Selector {
            arguments,
            filter: read::equipment::list::Filter,
        }))
        .await
        .map_err(AsError::into_error)?;
    let total_count: i64 = service
        .execute(query::equipment::TotalCount::by(()))
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

/// `GET /equipment/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "/equipment/:id", %id))]
pub async fn show(
    Extension(service): Extension<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<Equipment>, Error> {
    service
        .execute(query::equipment::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .map(|equipment| Json(equipment.into()))
        .ok_or_else(|| EquipmentError::NotExists.into())
}

/// `POST /equipment` handler.
#[tracing::instrument(skip_all, fields(http.route = "/equipment"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(request): Json<EquipmentRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), Error> {
    let (make, model) = request.parse()?;

    let equipment = service
        .execute(command::CreateEquipment { make, model })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            message: "Equipment was successfully created.".to_string(),
            equipment: equipment.into(),
        }),
    ))
}
