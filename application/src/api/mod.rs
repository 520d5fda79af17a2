//! REST API definitions.

pub mod agreement;
pub mod contract;
pub mod equipment;
pub mod person;

use axum::{routing::get, Router};
use common::pagination;
use serde::Deserialize;

use crate::{define_error, Error};

/// Builds the [`Router`] of the REST API.
#[must_use]
pub fn router() -> Router {
    Router::new()
        .route("/people", get(person::list).post(person::create))
        .route(
            "/people/:id",
            get(person::show).put(person::update).delete(person::destroy),
        )
        .route("/equipment", get(equipment::list).post(equipment::create))
        .route("/equipment/:id", get(equipment::show))
        .route("/contracts", get(contract::list).post(contract::create))
        .route(
            "/contracts/:id",
            get(contract::show)
                .put(contract::update)
                .delete(contract::destroy),
        )
        .route(
            "/agreement-executions",
            get(agreement::list).post(agreement::create),
        )
        .route(
            "/agreement-executions/:id",
            get(agreement::show)
                .put(agreement::update)
                .delete(agreement::destroy),
        )
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION_ARGUMENTS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid pagination arguments"]
        Invalid,
    }
}

define_error! {
    enum MultipartError {
        #[code = "MALFORMED_MULTIPART"]
        #[status = BAD_REQUEST]
        #[message = "Malformed multipart request body"]
        Malformed,
    }
}

/// Pagination query parameters of a list request.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based number of the requested page.
    pub page: Option<usize>,

    /// Number of items per page.
    pub per_page: Option<usize>,
}

impl PageQuery {
    /// Converts this [`PageQuery`] into pagination [`Arguments`].
    ///
    /// # Errors
    ///
    /// With a [`PaginationError`] if the parameters are out of bounds.
    ///
    /// [`Arguments`]: pagination::Arguments
    pub fn arguments(self) -> Result<pagination::Arguments, Error> {
        pagination::Arguments::new(self.page, self.per_page)
            .ok_or_else(|| PaginationError::Invalid.into())
    }
}
