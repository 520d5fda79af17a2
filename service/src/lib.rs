//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use crate::domain::contract;
#[cfg(doc)]
use crate::infra::{Database, Storage};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [`contract::Kind`]s a [`contract::Possession`] is allowed to have.
    ///
    /// [`contract::Possession`]: domain::contract::Possession
    pub allowed_contract_kinds: Vec<contract::Kind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_contract_kinds: vec![
                contract::Kind::Lease,
                contract::Kind::Sale,
                contract::Kind::Borrow,
            ],
        }
    }
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Fs> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// File [`Storage`] of this [`Service`].
    storage: Fs,
}

impl<Db, Fs> Service<Db, Fs> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(config: Config, database: Db, storage: Fs) -> Self {
        Self {
            config,
            database,
            storage,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns file [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &Fs {
        &self.storage
    }
}
