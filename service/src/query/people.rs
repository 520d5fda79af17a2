//! [`Query`] collection related to multiple [`Person`]s.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Person;
use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Person`]s.
pub type List =
    DatabaseQuery<By<read::person::list::Page, read::person::list::Selector>>;

/// Queries total count of [`Person`]s.
pub type TotalCount = DatabaseQuery<By<read::person::list::TotalCount, ()>>;
