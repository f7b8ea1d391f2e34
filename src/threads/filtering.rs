//! Thread list filters.
//!
//! Which filters a viewer may pick depends on the forum ACL and on the labels
//! attached to the forum. The active filter is chosen by the `show-{key}` URL
//! segment.

use std::cell::OnceCell;

use serde::Serialize;

use super::links::LinkParams;
use super::list::ForumThreads;
use crate::forum::ForumContext;

/// A filter that narrows the thread query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadFilter {
    /// Threads started by the viewer.
    MyThreads,
    /// Threads with reported posts.
    Reported,
    /// Threads awaiting approval.
    ModeratedThreads,
    /// Threads with posts awaiting approval.
    ModeratedPosts,
    /// Threads carrying a label.
    Label {
        /// Label ID.
        id: i64,
        /// Label slug, used as the URL key.
        slug: String,
    },
}

impl ThreadFilter {
    /// URL key.
    pub fn key(&self) -> &str {
        match self {
            ThreadFilter::MyThreads => "my-threads",
            ThreadFilter::Reported => "reported",
            ThreadFilter::ModeratedThreads => "moderated-threads",
            ThreadFilter::ModeratedPosts => "moderated-posts",
            ThreadFilter::Label { slug, .. } => slug,
        }
    }
}

/// A filter the viewer may pick in this forum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// The filter.
    pub filter: ThreadFilter,
    /// Display name.
    pub name: String,
    /// CSS class of label filters.
    pub css_class: Option<String>,
}

impl FilterOption {
    fn new(filter: ThreadFilter, name: &str) -> Self {
        Self {
            filter,
            name: name.to_string(),
            css_class: None,
        }
    }

    /// Whether this option filters by label.
    pub fn is_label(&self) -> bool {
        matches!(self.filter, ThreadFilter::Label { .. })
    }
}

/// A filter as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterEntry {
    /// URL key, `None` for the unfiltered list.
    #[serde(rename = "type")]
    pub key: Option<String>,
    /// Display name.
    pub name: String,
    /// List URL with this filter selected.
    pub url: String,
    /// Whether this entry filters by label.
    pub is_label: bool,
    /// CSS class of label filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
}

/// Filters offered in a forum, in display order.
///
/// Earlier options win when keys collide, so a label whose slug equals a
/// built-in key can never be selected.
pub fn available_filters(context: &ForumContext) -> Vec<FilterOption> {
    let acl = &context.acl;
    let mut options = Vec::new();

    if acl.can_see_all_threads {
        options.push(FilterOption::new(ThreadFilter::MyThreads, "My threads"));
    }
    if acl.can_see_reports {
        options.push(FilterOption::new(ThreadFilter::Reported, "With reported posts"));
    }
    if acl.can_review_moderated_content {
        options.push(FilterOption::new(
            ThreadFilter::ModeratedThreads,
            "Moderated threads",
        ));
        options.push(FilterOption::new(
            ThreadFilter::ModeratedPosts,
            "With moderated posts",
        ));
    }

    options.extend(context.labels.iter().map(|label| FilterOption {
        filter: ThreadFilter::Label {
            id: label.id,
            slug: label.slug.clone(),
        },
        name: label.name.clone(),
        css_class: label.css_class.clone(),
    }));

    options
}

/// Filter selection for one thread list.
#[derive(Debug)]
pub struct Filtering {
    options: Vec<FilterOption>,
    default_name: &'static str,
    active: Option<usize>,
    entries: OnceCell<Vec<FilterEntry>>,
}

impl Filtering {
    /// Set up the filters available in a forum. No filter is active.
    pub fn new(context: &ForumContext) -> Self {
        let default_name = if context.acl.can_see_all_threads {
            "All threads"
        } else {
            "Your threads"
        };

        Self {
            options: available_filters(context),
            default_name,
            active: None,
            entries: OnceCell::new(),
        }
    }

    /// Pick the filter named in `params`.
    ///
    /// A key that names no available filter is removed from the returned
    /// params, so the caller can redirect to the canonical URL.
    pub fn clean(&mut self, params: LinkParams) -> LinkParams {
        let Some(key) = params.show.as_deref() else {
            return params;
        };

        match self.options.iter().position(|o| o.filter.key() == key) {
            Some(index) => {
                self.active = Some(index);
                params
            }
            None => params.with_show(None),
        }
    }

    /// Active filter.
    pub fn active(&self) -> Option<&ThreadFilter> {
        self.active.map(|index| &self.options[index].filter)
    }

    /// Whether a filter is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Apply the active filter to a thread list.
    pub fn filter(&self, threads: &mut ForumThreads<'_>) {
        threads.filter(self.active().cloned());
    }

    /// The unfiltered entry followed by one entry per option.
    ///
    /// Built on first use; `params` supplies the rest of the link.
    pub fn entries(&self, params: &LinkParams) -> &[FilterEntry] {
        self.entries.get_or_init(|| {
            let mut entries = vec![FilterEntry {
                key: None,
                name: self.default_name.to_string(),
                url: params.with_show(None).url(None),
                is_label: false,
                css_class: None,
            }];
            entries.extend(self.options.iter().map(|option| {
                let key = option.filter.key();
                FilterEntry {
                    key: Some(key.to_string()),
                    name: option.name.clone(),
                    url: params.with_show(Some(key)).url(None),
                    is_label: option.is_label(),
                    css_class: option.css_class.clone(),
                }
            }));
            entries
        })
    }

    /// Entry of the active filter, or the unfiltered entry.
    pub fn current(&self, params: &LinkParams) -> &FilterEntry {
        let entries = self.entries(params);
        &entries[self.active.map_or(0, |index| index + 1)]
    }

    /// Entries the viewer can switch to.
    ///
    /// With a filter active that is everything but the current entry,
    /// otherwise every filter without the unfiltered entry.
    pub fn choices(&self, params: &LinkParams) -> Vec<&FilterEntry> {
        let entries = self.entries(params);
        match self.active {
            Some(index) => entries
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index + 1)
                .map(|(_, e)| e)
                .collect(),
            None => entries.iter().skip(1).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::{Forum, ForumAcl, ForumKind, Label};

    fn context(acl: ForumAcl, labels: Vec<Label>) -> ForumContext {
        ForumContext {
            forum: Forum {
                id: 2,
                parent_id: None,
                kind: ForumKind::Forum,
                name: "General".to_string(),
                slug: "general".to_string(),
                description: None,
                redirect_url: None,
                lft: 1,
                rght: 2,
                level: 0,
            },
            acl,
            labels,
        }
    }

    fn label(id: i64, slug: &str) -> Label {
        Label {
            id,
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            css_class: Some(format!("label-{slug}")),
        }
    }

    fn keys(options: &[FilterOption]) -> Vec<&str> {
        options.iter().map(|o| o.filter.key()).collect()
    }

    fn params(show: Option<&str>) -> LinkParams {
        LinkParams::new("general", 2).with_show(show)
    }

    #[test]
    fn test_available_filters_moderator() {
        let ctx = context(ForumAcl::moderator(), vec![label(1, "bug")]);
        let options = available_filters(&ctx);
        assert_eq!(
            keys(&options),
            vec!["my-threads", "reported", "moderated-threads", "moderated-posts", "bug"]
        );
        assert!(options[4].is_label());
        assert_eq!(options[4].css_class.as_deref(), Some("label-bug"));
    }

    #[test]
    fn test_available_filters_restricted() {
        let acl = ForumAcl {
            can_see: true,
            can_browse: true,
            can_see_own_threads: true,
            ..ForumAcl::default()
        };
        let ctx = context(acl, vec![label(1, "bug"), label(2, "idea")]);
        assert_eq!(keys(&available_filters(&ctx)), vec!["bug", "idea"]);
    }

    #[test]
    fn test_clean_known_and_unknown() {
        let ctx = context(ForumAcl::member(), vec![label(1, "bug")]);

        let mut filtering = Filtering::new(&ctx);
        assert_eq!(filtering.clean(params(Some("bug"))), params(Some("bug")));
        assert_eq!(
            filtering.active(),
            Some(&ThreadFilter::Label {
                id: 1,
                slug: "bug".to_string()
            })
        );

        let mut filtering = Filtering::new(&ctx);
        assert_eq!(filtering.clean(params(Some("reported"))), params(None));
        assert!(!filtering.is_active());
    }

    #[test]
    fn test_clean_label_collision_prefers_builtin() {
        let ctx = context(ForumAcl::moderator(), vec![label(1, "reported")]);
        let mut filtering = Filtering::new(&ctx);
        filtering.clean(params(Some("reported")));
        assert_eq!(filtering.active(), Some(&ThreadFilter::Reported));
    }

    #[test]
    fn test_entries_and_default_name() {
        let ctx = context(ForumAcl::member(), vec![label(1, "bug")]);
        let filtering = Filtering::new(&ctx);
        let base = params(None).with_sort(Some("newest"));
        let entries = filtering.entries(&base);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].key, None);
        assert_eq!(entries[0].name, "All threads");
        assert_eq!(entries[0].url, "/forum/general-2/sort-newest/");
        assert_eq!(entries[1].url, "/forum/general-2/sort-newest/show-my-threads/");
        assert!(entries[2].is_label);

        let own_only = ForumAcl {
            can_see_all_threads: false,
            can_see_own_threads: true,
            ..ForumAcl::member()
        };
        let filtering = Filtering::new(&context(own_only, vec![]));
        assert_eq!(filtering.entries(&base)[0].name, "Your threads");
    }

    #[test]
    fn test_current_and_choices_without_filter() {
        let ctx = context(ForumAcl::moderator(), vec![]);
        let filtering = Filtering::new(&ctx);
        let base = params(None);

        assert_eq!(filtering.current(&base).key, None);
        let choices = filtering.choices(&base);
        assert_eq!(choices.len(), 4);
        assert!(choices.iter().all(|c| c.key.is_some()));
    }

    #[test]
    fn test_current_and_choices_with_filter() {
        let ctx = context(ForumAcl::moderator(), vec![]);
        let mut filtering = Filtering::new(&ctx);
        let cleaned = filtering.clean(params(Some("moderated-posts")));

        assert_eq!(
            filtering.current(&cleaned).key.as_deref(),
            Some("moderated-posts")
        );
        let choices = filtering.choices(&cleaned);
        assert_eq!(choices.len(), 4);
        assert_eq!(choices[0].key, None);
        assert!(choices
            .iter()
            .all(|c| c.key.as_deref() != Some("moderated-posts")));
    }

    #[test]
    fn test_entry_serializes_type() {
        let ctx = context(ForumAcl::member(), vec![]);
        let filtering = Filtering::new(&ctx);
        let json = serde_json::to_value(&filtering.entries(&params(None))[1]).unwrap();
        assert_eq!(json["type"], "my-threads");
        assert_eq!(json["is_label"], false);
        assert!(json.get("css_class").is_none());
    }
}
