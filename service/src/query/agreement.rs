//! [`Query`] collection related to a single [`Agreement`] execution.

use common::operations::By;

use crate::domain::{agreement, Agreement};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Agreement`] execution by its [`agreement::Id`].
pub type ById = DatabaseQuery<By<Option<Agreement>, agreement::Id>>;
