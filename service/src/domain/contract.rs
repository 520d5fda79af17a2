//! Possession contract definitions.

use std::{collections::BTreeMap, fmt};

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(doc)]
use common::DateTime;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{equipment, person};
#[cfg(doc)]
use crate::domain::{Equipment, Person};

/// Contract putting an [`Equipment`] item in possession of a [`Person`].
#[derive(Clone, Debug)]
pub struct Possession {
    /// ID of this [`Possession`] contract.
    pub id: Id,

    /// ID of the [`Person`] holding the [`Equipment`].
    pub person_id: person::Id,

    /// ID of the possessed [`Equipment`].
    pub equipment_id: equipment::Id,

    /// [`Kind`] of this [`Possession`] contract.
    pub kind: Kind,

    /// [`DateTime`] when the possession starts.
    ///
    /// Required for [`Kind::Lease`] contracts.
    pub start_date: Option<StartDateTime>,

    /// [`DateTime`] when this [`Possession`] contract expires.
    ///
    /// Required for [`Kind::Lease`] contracts.
    pub expires_at: Option<ExpirationDateTime>,

    /// Payment due under this [`Possession`] contract.
    ///
    /// Required to be positive for [`Kind::Lease`] contracts.
    pub payment: Option<Money>,

    /// [`DateTime`] when this [`Possession`] contract was created.
    pub created_at: CreationDateTime,
}

impl Possession {
    /// Name of the database constraint guarding the "one contract per
    /// (person, equipment) pair" invariant.
    pub const UNIQUE_PERSON_EQUIPMENT: &'static str =
        "possession_contracts_person_id_equipment_id_key";

    /// Returns a [`Draft`] with the fields of this [`Possession`] contract.
    #[must_use]
    pub fn to_draft(&self) -> Draft {
        Draft {
            kind: Some(self.kind),
            person_id: Some(self.person_id),
            equipment_id: Some(self.equipment_id),
            start_date: self.start_date,
            expires_at: self.expires_at,
            payment: self.payment,
        }
    }
}

/// ID of a [`Possession`] contract.
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

define_kind! {
    #[doc = "Kind of a [`Possession`] contract."]
    enum Kind {
        #[doc = "The [`Equipment`] is leased for a period of time."]
        Lease = 1,

        #[doc = "The [`Equipment`] is sold outright."]
        Sale = 2,

        #[doc = "The [`Equipment`] is borrowed free of charge."]
        Borrow = 3,
    }
}

/// Candidate [`Possession`] contract with every field optional.
///
/// A [`Draft`] collects whatever the caller submitted; [`Draft::validate()`]
/// decides whether it may become a [`Possession`] contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct Draft {
    /// [`Kind`] of the contract, if recognized.
    pub kind: Option<Kind>,

    /// ID of the [`Person`] party.
    pub person_id: Option<person::Id>,

    /// ID of the [`Equipment`] party.
    pub equipment_id: Option<equipment::Id>,

    /// [`DateTime`] when the possession starts.
    pub start_date: Option<StartDateTime>,

    /// [`DateTime`] when the contract expires.
    pub expires_at: Option<ExpirationDateTime>,

    /// Payment due under the contract.
    pub payment: Option<Money>,
}

impl Draft {
    /// Validates this [`Draft`] against the provided set of allowed
    /// [`Kind`]s.
    ///
    /// Every rule is evaluated independently, so all violated fields are
    /// reported at once:
    /// 1. [`Kind`] is present and drawn from the `allowed` set;
    /// 2. [`Person`] is present;
    /// 3. [`Equipment`] is present;
    /// 4. [`Kind::Lease`] only: start date, expiration and a positive
    ///    payment are all present.
    ///
    /// The "one contract per (person, equipment) pair" invariant is not a
    /// [`Draft`] rule: the database enforces it with a unique constraint.
    ///
    /// # Errors
    ///
    /// Returns all the [`Violations`] of the rules above.
    pub fn validate(self, allowed: &[Kind]) -> Result<Validated, Violations> {
        let Self {
            kind,
            person_id,
            equipment_id,
            start_date,
            expires_at,
            payment,
        } = self;

        let mut violations = Violations::default();

        let kind = kind.filter(|k| allowed.contains(k));
        if kind.is_none() {
            violations.add(Field::ContractType, "is not included in the list");
        }
        if person_id.is_none() {
            violations.add(Field::Person, "can't be blank");
        }
        if equipment_id.is_none() {
            violations.add(Field::Equipment, "can't be blank");
        }

        if kind == Some(Kind::Lease) {
            if start_date.is_none() {
                violations.add(Field::StartDate, "can't be blank");
            }
            if expires_at.is_none() {
                violations.add(Field::Expires, "can't be blank");
            }
            if !payment.is_some_and(Money::is_positive) {
                violations.add(Field::Payment, "must be greater than 0");
            }
        }

        match (kind, person_id, equipment_id) {
            (Some(kind), Some(person_id), Some(equipment_id))
                if violations.is_empty() =>
            {
                Ok(Validated {
                    kind,
                    person_id,
                    equipment_id,
                    start_date,
                    expires_at,
                    payment,
                })
            }
            _ => Err(violations),
        }
    }
}

/// [`Draft`] that passed [`Draft::validate()`].
#[derive(Clone, Copy, Debug)]
pub struct Validated {
    /// [`Kind`] of the contract.
    pub kind: Kind,

    /// ID of the [`Person`] party.
    pub person_id: person::Id,

    /// ID of the [`Equipment`] party.
    pub equipment_id: equipment::Id,

    /// [`DateTime`] when the possession starts.
    pub start_date: Option<StartDateTime>,

    /// [`DateTime`] when the contract expires.
    pub expires_at: Option<ExpirationDateTime>,

    /// Payment due under the contract.
    pub payment: Option<Money>,
}

/// Field of a [`Draft`] a validation rule may be violated on.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    /// Kind of the contract.
    ContractType,

    /// [`Person`] party of the contract.
    Person,

    /// [`Equipment`] party of the contract.
    Equipment,

    /// Start date of the possession.
    StartDate,

    /// Expiration of the contract.
    Expires,

    /// Payment due under the contract.
    Payment,
}

/// Violations of [`Draft`] validation rules, keyed by [`Field`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Violations(BTreeMap<Field, &'static str>);

impl Violations {
    /// Records a violation message for the provided [`Field`].
    fn add(&mut self, field: Field, message: &'static str) {
        _ = self.0.insert(field, message);
    }

    /// Indicates whether no rule was violated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether a violation was recorded for the provided [`Field`].
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterates over the recorded violations.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field} {message}")?;
        }
        Ok(())
    }
}

/// [`DateTime`] when a [`Possession`] contract was created.
pub type CreationDateTime = DateTimeOf<(Possession, unit::Creation)>;

/// Marker type indicating the start of a possession.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// [`DateTime`] when a possession starts.
pub type StartDateTime = DateTimeOf<(Possession, Start)>;

/// Marker type indicating [`Possession`] contract expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] when a [`Possession`] contract expires.
pub type ExpirationDateTime = DateTimeOf<(Possession, Expiration)>;

#[cfg(test)]
mod spec {
    use common::{DateTime, Money};

    use crate::domain::{equipment, person};

    use super::{Draft, Field, Kind};

    const ALLOWED: &[Kind] = &[Kind::Lease, Kind::Sale, Kind::Borrow];

    fn lease_draft() -> Draft {
        Draft {
            kind: Some(Kind::Lease),
            person_id: Some(person::Id::new()),
            equipment_id: Some(equipment::Id::new()),
            start_date: Some(DateTime::now().coerce()),
            expires_at: Some(DateTime::now().coerce()),
            payment: Money::from_dollars("50.50".parse().unwrap()),
        }
    }

    #[test]
    fn accepts_complete_lease() {
        let validated = lease_draft().validate(ALLOWED).unwrap();
        assert_eq!(validated.kind, Kind::Lease);
        assert_eq!(validated.payment.unwrap().cents(), 5050);
    }

    #[test]
    fn accepts_non_lease_without_dates_or_payment() {
        let draft = Draft {
            start_date: None,
            expires_at: None,
            payment: None,
            kind: Some(Kind::Borrow),
            ..lease_draft()
        };
        assert!(draft.validate(ALLOWED).is_ok());
    }

    #[test]
    fn rejects_missing_person() {
        let draft = Draft {
            person_id: None,
            kind: Some(Kind::Sale),
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::Person));
    }

    #[test]
    fn rejects_missing_equipment() {
        let draft = Draft {
            equipment_id: None,
            kind: Some(Kind::Borrow),
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::Equipment));
    }

    #[test]
    fn rejects_missing_kind() {
        let draft = Draft {
            kind: None,
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::ContractType));
    }

    #[test]
    fn rejects_kind_outside_allowed_set() {
        let draft = Draft {
            kind: Some(Kind::Borrow),
            ..lease_draft()
        };
        let violations = draft.validate(&[Kind::Lease]).unwrap_err();
        assert!(violations.contains(Field::ContractType));
    }

    #[test]
    fn rejects_lease_without_expiration() {
        let draft = Draft {
            expires_at: None,
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::Expires));
        assert!(!violations.contains(Field::StartDate));
    }

    #[test]
    fn rejects_lease_without_start_date() {
        let draft = Draft {
            start_date: None,
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::StartDate));
    }

    #[test]
    fn rejects_lease_without_payment() {
        let draft = Draft {
            payment: None,
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::Payment));
    }

    #[test]
    fn rejects_lease_with_zero_payment() {
        let draft = Draft {
            payment: Some(Money::ZERO),
            ..lease_draft()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        assert!(violations.contains(Field::Payment));
    }

    #[test]
    fn reports_all_violated_fields_at_once() {
        let draft = Draft {
            kind: Some(Kind::Lease),
            person_id: None,
            equipment_id: None,
            start_date: None,
            expires_at: None,
            payment: Some(Money::ZERO),
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        for field in [
            Field::Person,
            Field::Equipment,
            Field::StartDate,
            Field::Expires,
            Field::Payment,
        ] {
            assert!(violations.contains(field), "missing `{field}` violation");
        }
        assert!(!violations.contains(Field::ContractType));
    }

    #[test]
    fn violations_render_field_messages() {
        let draft = Draft {
            kind: None,
            ..Draft::default()
        };
        let violations = draft.validate(ALLOWED).unwrap_err();
        let rendered = violations.to_string();
        assert!(rendered.contains("contract_type is not included in the list"));
        assert!(rendered.contains("person can't be blank"));
    }
}
