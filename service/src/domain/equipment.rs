//! [`Equipment`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Item of equipment tracked by the registry.
#[derive(Clone, Debug)]
pub struct Equipment {
    /// ID of this [`Equipment`].
    pub id: Id,

    /// [`Make`] of this [`Equipment`].
    pub make: Make,

    /// [`Model`] of this [`Equipment`].
    pub model: Model,

    /// [`DateTime`] when this [`Equipment`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Equipment`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of an [`Equipment`].
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

/// Make of an [`Equipment`] item.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Make(String);

impl Make {
    /// Creates a new [`Make`] if the given `make` is valid.
    #[must_use]
    pub fn new(make: impl Into<String>) -> Option<Self> {
        let make = make.into();
        Self::check(&make).then_some(Self(make))
    }

    /// Checks whether the given `make` is a valid [`Make`].
    fn check(make: impl AsRef<str>) -> bool {
        let make = make.as_ref();
        make.trim() == make && !make.is_empty() && make.len() <= 512
    }
}

impl std::str::FromStr for Make {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Make`")
    }
}

/// Model of an [`Equipment`] item.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Model(String);

impl Model {
    /// Creates a new [`Model`] if the given `model` is valid.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Option<Self> {
        let model = model.into();
        Self::check(&model).then_some(Self(model))
    }

    /// Checks whether the given `model` is a valid [`Model`].
    fn check(model: impl AsRef<str>) -> bool {
        let model = model.as_ref();
        model.trim() == model && !model.is_empty() && model.len() <= 512
    }
}

impl std::str::FromStr for Model {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Model`")
    }
}

/// [`DateTime`] when an [`Equipment`] was created.
pub type CreationDateTime = DateTimeOf<(Equipment, unit::Creation)>;

/// [`DateTime`] when an [`Equipment`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Equipment, unit::Deletion)>;
