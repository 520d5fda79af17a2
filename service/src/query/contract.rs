//! [`Query`] collection related to a single [`Possession`] contract.

use common::operations::By;

use crate::domain::{contract, Possession};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Possession`] contract by its [`contract::Id`].
pub type ById = DatabaseQuery<By<Option<Possession>, contract::Id>>;
