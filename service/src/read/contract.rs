//! Possession contract read model definition.

#[cfg(doc)]
use crate::domain::Possession;

pub mod list {
    //! [`Possession`] contracts list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{person, Possession};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Possession;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`person::Id`] to return the contracts of only.
        pub person_id: Option<person::Id>,
    }

    /// Total count of [`Possession`] contracts.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
