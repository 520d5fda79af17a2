//! [`Query`] collection related to [`Equipment`].

use common::operations::By;

use crate::{
    domain::{equipment, Equipment},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Equipment`] by its [`equipment::Id`].
pub type ById = DatabaseQuery<By<Option<Equipment>, equipment::Id>>;

/// Queries a list of [`Equipment`] items.
pub type List = DatabaseQuery<
    By<read::equipment::list::Page, read::equipment::list::Selector>,
>;

/// Queries total count of [`Equipment`] items.
pub type TotalCount = DatabaseQuery<By<read::equipment::list::TotalCount, ()>>;
