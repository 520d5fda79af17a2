//! [`Agreement`] read model definition.

#[cfg(doc)]
use crate::domain::Agreement;

pub mod list {
    //! [`Agreement`] executions list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{person, Agreement};

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Agreement;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`person::Id`] to return the agreements of only.
        pub person_id: Option<person::Id>,
    }

    /// Total count of [`Agreement`] executions.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
