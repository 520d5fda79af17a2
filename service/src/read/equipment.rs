//! [`Equipment`] read model definition.

#[cfg(doc)]
use crate::domain::Equipment;

pub mod list {
    //! [`Equipment`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::Equipment;

    define_pagination!(Node, Filter);

    /// Node in a [`Page`].
    pub type Node = Equipment;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter;

    /// Total count of [`Equipment`] items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i64);
}
