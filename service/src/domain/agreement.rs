//! [`Agreement`] execution definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::person;
#[cfg(doc)]
use crate::domain::Person;

/// Record of a signed agreement document.
///
/// The document itself lives on an external file-hosting service; only the
/// [`Url`] it returned is stored here.
#[derive(Clone, Debug)]
pub struct Agreement {
    /// ID of this [`Agreement`] execution.
    pub id: Id,

    /// ID of the [`Person`] who signed the agreement.
    pub person_id: person::Id,

    /// [`DateTime`] when the agreement was signed.
    pub date_signed: SigningDateTime,

    /// [`Url`] of the hosted signed document.
    pub url: Url,

    /// [`DateTime`] when this [`Agreement`] execution was created.
    pub created_at: CreationDateTime,
}

/// ID of an [`Agreement`] execution.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// URL of a hosted signed agreement document.
///
/// Stored verbatim as returned by the file-hosting service.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        !url.is_empty() && url.len() <= 2048 && !url.contains(char::is_whitespace)
    }
}

impl std::str::FromStr for Url {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Url`")
    }
}

/// [`DateTime`] when an [`Agreement`] execution was created.
pub type CreationDateTime = DateTimeOf<(Agreement, unit::Creation)>;

/// Marker type indicating an [`Agreement`] signing.
#[derive(Clone, Copy, Debug)]
pub struct Signing;

/// [`DateTime`] when an [`Agreement`] was signed.
pub type SigningDateTime = DateTimeOf<(Agreement, Signing)>;

#[cfg(test)]
mod spec {
    use super::Url;

    #[test]
    fn url_rejects_empty_and_whitespace() {
        assert!(Url::new("").is_none());
        assert!(Url::new("http://host/a b").is_none());
        assert!(Url::new("https://files.example.com/2013-09-29_wildfire")
            .is_some());
    }
}
