//! [`Query`] collection related to multiple [`Possession`] contracts.

use common::operations::By;

#[cfg(doc)]
use crate::domain::Possession;
use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Possession`] contracts.
pub type List = DatabaseQuery<
    By<read::contract::list::Page, read::contract::list::Selector>,
>;

/// Queries total count of [`Possession`] contracts.
pub type TotalCount = DatabaseQuery<By<read::contract::list::TotalCount, ()>>;
