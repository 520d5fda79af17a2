//! [`Person`] read model definition.

#[cfg(doc)]
use crate::domain::Person;

pub mod list {
    //! [`Person`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::Person;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Person;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter;

    /// Total count of [`Person`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
