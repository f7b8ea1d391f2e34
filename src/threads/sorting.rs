//! Thread list sort orders.

use serde::Serialize;

use super::links::LinkParams;
use super::list::ForumThreads;

/// Column a thread list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// Time of the last post.
    LastPostOn,
    /// Reply count.
    Replies,
    /// Thread ID, i.e. creation order.
    Id,
}

impl SortColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            SortColumn::LastPostOn => "last_post_on",
            SortColumn::Replies => "replies",
            SortColumn::Id => "id",
        }
    }
}

/// An ordering applied to the thread query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    /// Ordering column.
    pub column: SortColumn,
    /// Largest first.
    pub descending: bool,
}

impl SortBy {
    /// ORDER BY clause body.
    ///
    /// Weight goes first and follows the column direction, ID breaks ties.
    pub fn order_by_sql(&self) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        match self.column {
            SortColumn::Id => format!("weight {dir}, id {dir}"),
            column => format!("weight {dir}, {} {dir}, id {dir}", column.as_sql()),
        }
    }
}

impl Default for SortBy {
    fn default() -> Self {
        SORT_ORDERS[0].sort_by
    }
}

/// A named sort order selectable through the `sort-{key}` URL segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// URL key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Ordering applied to the query.
    pub sort_by: SortBy,
}

const fn order(
    key: &'static str,
    name: &'static str,
    column: SortColumn,
    descending: bool,
) -> SortOrder {
    SortOrder {
        key,
        name,
        sort_by: SortBy { column, descending },
    }
}

/// Available sort orders. The first one is the default.
pub static SORT_ORDERS: [SortOrder; 6] = [
    order("recently-replied", "Recently replied", SortColumn::LastPostOn, true),
    order("last-replied", "Last replied", SortColumn::LastPostOn, false),
    order("most-replied", "Most replied", SortColumn::Replies, true),
    order("least-replied", "Least replied", SortColumn::Replies, false),
    order("newest", "Newest", SortColumn::Id, true),
    order("oldest", "Oldest", SortColumn::Id, false),
];

/// A sort order as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortEntry {
    /// URL key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// List URL with this order selected.
    pub url: String,
}

/// Sort order selection for one thread list.
#[derive(Debug, Clone)]
pub struct Sorting {
    current: &'static SortOrder,
}

impl Default for Sorting {
    fn default() -> Self {
        Self::new()
    }
}

impl Sorting {
    /// Start with the default order.
    pub fn new() -> Self {
        Self {
            current: &SORT_ORDERS[0],
        }
    }

    /// Pick the order named in `params`.
    ///
    /// Unknown keys and the default key are removed from the returned
    /// params, so the caller can redirect to the canonical URL.
    pub fn clean(&mut self, params: LinkParams) -> LinkParams {
        let Some(key) = params.sort.as_deref() else {
            return params;
        };

        match SORT_ORDERS.iter().position(|o| o.key == key) {
            Some(index) if index > 0 => {
                self.current = &SORT_ORDERS[index];
                params
            }
            _ => params.with_sort(None),
        }
    }

    /// Active order.
    pub fn order(&self) -> &'static SortOrder {
        self.current
    }

    /// Apply the active order to a thread list.
    pub fn sort(&self, threads: &mut ForumThreads<'_>) {
        threads.sort(self.current.sort_by);
    }

    /// All orders with their URLs. `params` supplies the rest of the link.
    pub fn entries(&self, params: &LinkParams) -> Vec<SortEntry> {
        SORT_ORDERS.iter().map(|order| entry(order, params)).collect()
    }

    /// Entry of the active order.
    pub fn current(&self, params: &LinkParams) -> SortEntry {
        entry(self.current, params)
    }

    /// Entries other than the active one.
    pub fn choices(&self, params: &LinkParams) -> Vec<SortEntry> {
        self.entries(params)
            .into_iter()
            .filter(|e| e.key != self.current.key)
            .collect()
    }
}

fn entry(order: &'static SortOrder, params: &LinkParams) -> SortEntry {
    let sort = (order.key != SORT_ORDERS[0].key).then_some(order.key);
    SortEntry {
        key: order.key,
        name: order.name,
        url: params.with_sort(sort).url(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>) -> LinkParams {
        LinkParams::new("general", 2).with_sort(sort)
    }

    #[test]
    fn test_default_order() {
        let sorting = Sorting::new();
        assert_eq!(sorting.order().key, "recently-replied");
        assert_eq!(SortBy::default(), SORT_ORDERS[0].sort_by);
    }

    #[test]
    fn test_clean_keeps_known_key() {
        let mut sorting = Sorting::new();
        let cleaned = sorting.clean(params(Some("most-replied")));
        assert_eq!(cleaned, params(Some("most-replied")));
        assert_eq!(sorting.order().key, "most-replied");
    }

    #[test]
    fn test_clean_removes_default_key() {
        let mut sorting = Sorting::new();
        let cleaned = sorting.clean(params(Some("recently-replied")));
        assert_eq!(cleaned.sort, None);
        assert_eq!(sorting.order().key, "recently-replied");
    }

    #[test]
    fn test_clean_removes_unknown_key() {
        let mut sorting = Sorting::new();
        let cleaned = sorting.clean(params(Some("alphabetical")).with_show(Some("reported")));
        assert_eq!(cleaned.sort, None);
        assert_eq!(cleaned.show.as_deref(), Some("reported"));
        assert_eq!(sorting.order().key, "recently-replied");
    }

    #[test]
    fn test_clean_without_key() {
        let mut sorting = Sorting::new();
        assert_eq!(sorting.clean(params(None)), params(None));
    }

    #[test]
    fn test_order_by_sql() {
        assert_eq!(
            SORT_ORDERS[0].sort_by.order_by_sql(),
            "weight DESC, last_post_on DESC, id DESC"
        );
        assert_eq!(
            SORT_ORDERS[3].sort_by.order_by_sql(),
            "weight ASC, replies ASC, id ASC"
        );
        assert_eq!(SORT_ORDERS[5].sort_by.order_by_sql(), "weight ASC, id ASC");
    }

    #[test]
    fn test_entries_urls() {
        let sorting = Sorting::new();
        let base = params(None).with_show(Some("reported"));
        let entries = sorting.entries(&base);

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].url, "/forum/general-2/show-reported/");
        assert_eq!(entries[4].url, "/forum/general-2/sort-newest/show-reported/");
    }

    #[test]
    fn test_current_and_choices() {
        let mut sorting = Sorting::new();
        let cleaned = sorting.clean(params(Some("oldest")));

        let current = sorting.current(&cleaned);
        assert_eq!(current.key, "oldest");
        assert_eq!(current.url, "/forum/general-2/sort-oldest/");

        let choices = sorting.choices(&cleaned);
        assert_eq!(choices.len(), 5);
        assert!(choices.iter().all(|c| c.key != "oldest"));
        assert_eq!(choices[0].url, "/forum/general-2/");
    }
}
