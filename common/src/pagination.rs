//! Abstractions for page-based pagination.

/// A page of `I`tems selected from a list.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,

    /// Indicator whether the list has more items past this [`Page`].
    pub has_more: bool,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided items.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        has_more: bool,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            arguments,
            has_more,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn info(&self) -> PageInfo {
        PageInfo {
            page: self.arguments.page(),
            per_page: self.arguments.per_page(),
            has_next_page: self.has_more,
        }
    }
}

/// Information about a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// 1-based number of the [`Page`].
    pub page: usize,

    /// Number of items requested per [`Page`].
    pub per_page: usize,

    /// Indicator whether a next [`Page`] exists.
    pub has_next_page: bool,
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested page.
    page: usize,

    /// Number of items per page.
    per_page: usize,
}

impl Arguments {
    /// Number of items per page used when none is requested.
    pub const DEFAULT_PER_PAGE: usize = 10;

    /// Maximum allowed number of items per page.
    pub const MAX_PER_PAGE: usize = 100;

    /// Creates a new [`Arguments`] from the optionally provided page number
    /// and page size.
    ///
    /// [`None`] is returned if the page number is zero, the page size is
    /// zero or exceeds [`MAX_PER_PAGE`], or the page number is so large that
    /// the resulting [`offset()`] cannot be represented.
    ///
    /// [`MAX_PER_PAGE`]: Self::MAX_PER_PAGE
    /// [`offset()`]: Self::offset
    #[must_use]
    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Option<Self> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(Self::DEFAULT_PER_PAGE);
        if page == 0 || per_page == 0 || per_page > Self::MAX_PER_PAGE {
            return None;
        }
        // The offset must fit an `INT8` SQL parameter.
        let offset = (page - 1).checked_mul(per_page)?;
        i64::try_from(offset)
            .is_ok()
            .then_some(Self { page, per_page })
    }

    /// Returns the 1-based page number of these [`Arguments`].
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size of these [`Arguments`].
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the maximum number of items to return on this page.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.per_page
    }

    /// Returns the number of items to skip before this page.
    ///
    /// Cannot overflow, as [`new()`] rejects page numbers this large.
    ///
    /// [`new()`]: Self::new
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::Arguments;

    #[test]
    fn defaults_to_first_page() {
        let args = Arguments::new(None, None).unwrap();
        assert_eq!(args.page(), 1);
        assert_eq!(args.per_page(), Arguments::DEFAULT_PER_PAGE);
        assert_eq!(args.offset(), 0);
    }

    #[test]
    fn computes_offset() {
        let args = Arguments::new(Some(3), Some(10)).unwrap();
        assert_eq!(args.offset(), 20);
        assert_eq!(args.limit(), 10);
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(Arguments::new(Some(0), None).is_none());
        assert!(Arguments::new(None, Some(0)).is_none());
        assert!(
            Arguments::new(None, Some(Arguments::MAX_PER_PAGE + 1)).is_none(),
        );
    }

    #[test]
    fn rejects_page_overflowing_offset() {
        assert!(Arguments::new(Some(usize::MAX), None).is_none());
        assert!(
            Arguments::new(Some(usize::MAX), Some(Arguments::MAX_PER_PAGE))
                .is_none(),
        );
    }
}
