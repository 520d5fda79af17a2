//! [`Query`] collection related to multiple [`Agreement`] executions.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Agreement;
use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Agreement`] executions.
pub type List = DatabaseQuery<
    By<read::agreement::list::Page, read::agreement::list::Selector>,
>;

/// Queries total count of [`Agreement`] executions.
pub type TotalCount = DatabaseQuery<By<read::agreement::list::TotalCount, ()>>;
