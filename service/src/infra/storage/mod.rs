//! File [`Storage`]-related implementations.

pub mod http;

use derive_more::{Display, Error as StdError, From};

use crate::domain::{agreement, person};

pub use self::http::Http;

/// File storage operation.
pub use common::Handler as Storage;

/// File [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Http`] storage error.
    Http(http::Error),
}

/// File to be placed into a [`Storage`].
#[derive(Clone, Debug)]
pub struct File {
    /// [`Key`] the file is stored under.
    pub key: Key,

    /// Raw bytes of the file.
    pub bytes: Vec<u8>,
}

/// Key a [`File`] is stored under.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Key(String);

impl Key {
    /// Creates a new [`Key`] for a signed agreement document, derived from
    /// the signing date and the signer's name.
    #[must_use]
    pub fn new(
        date_signed: agreement::SigningDateTime,
        signer: &person::Name,
    ) -> Self {
        Self(format!("{}_{signer}", date_signed.to_date_string()))
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::person;

    use super::Key;

    #[test]
    fn key_is_derived_from_date_and_signer() {
        let date = DateTime::from_rfc3339("2013-09-29T00:00:00Z")
            .unwrap()
            .coerce();
        let name = person::Name::new("wildfire").unwrap();
        assert_eq!(Key::new(date, &name).to_string(), "2013-09-29_wildfire");
    }
}
