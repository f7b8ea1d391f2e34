//! Forum thread-list URLs.
//!
//! A list URL is `/forum/{slug}-{id}/` followed by optional `sort-{key}/`,
//! `show-{key}/` and `{page}/` segments, in that order.

use serde::Serialize;

/// Parameters that identify one thread-list view, minus the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkParams {
    /// Forum slug as it appears in the URL.
    pub forum_slug: String,
    /// Forum ID.
    pub forum_id: i64,
    /// Sort order key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Filter key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,
}

impl LinkParams {
    /// Params of a forum's unsorted, unfiltered list.
    pub fn new(forum_slug: impl Into<String>, forum_id: i64) -> Self {
        Self {
            forum_slug: forum_slug.into(),
            forum_id,
            sort: None,
            show: None,
        }
    }

    /// Copy with a different sort key.
    pub fn with_sort(&self, sort: Option<&str>) -> Self {
        Self {
            sort: sort.map(str::to_string),
            ..self.clone()
        }
    }

    /// Copy with a different filter key.
    pub fn with_show(&self, show: Option<&str>) -> Self {
        Self {
            show: show.map(str::to_string),
            ..self.clone()
        }
    }

    /// Build the URL, with `page` appended when given.
    pub fn url(&self, page: Option<u32>) -> String {
        let mut url = format!("/forum/{}-{}/", self.forum_slug, self.forum_id);
        if let Some(sort) = &self.sort {
            url.push_str(&format!("sort-{}/", urlencoding::encode(sort)));
        }
        if let Some(show) = &self.show {
            url.push_str(&format!("show-{}/", urlencoding::encode(show)));
        }
        if let Some(page) = page {
            url.push_str(&format!("{page}/"));
        }
        url
    }
}

/// A parsed thread-list request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumPath {
    /// Link params from the path.
    pub params: LinkParams,
    /// Requested page, if any.
    pub page: Option<u32>,
}

impl ForumPath {
    /// Parse the part of the path after `/forum/`.
    ///
    /// Returns `None` when the path does not name a thread list.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

        let (forum_slug, forum_id) = segments.next()?.rsplit_once('-')?;
        if forum_slug.is_empty() {
            return None;
        }
        let forum_id: i64 = forum_id.parse().ok()?;
        let mut params = LinkParams::new(forum_slug, forum_id);

        if let Some(sort) = segments.peek().and_then(|s| s.strip_prefix("sort-")) {
            params.sort = Some(decode_key(sort)?);
            segments.next();
        }
        if let Some(show) = segments.peek().and_then(|s| s.strip_prefix("show-")) {
            params.show = Some(decode_key(show)?);
            segments.next();
        }

        let page = match segments.next() {
            Some(segment) if segment.bytes().all(|b| b.is_ascii_digit()) => {
                Some(segment.parse().ok()?)
            }
            Some(_) => return None,
            None => None,
        };

        if segments.next().is_some() {
            return None;
        }

        Some(Self { params, page })
    }
}

fn decode_key(raw: &str) -> Option<String> {
    let key = urlencoding::decode(raw).ok()?;
    (!key.is_empty()).then(|| key.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_plain() {
        let params = LinkParams::new("general", 4);
        assert_eq!(params.url(None), "/forum/general-4/");
        assert_eq!(params.url(Some(3)), "/forum/general-4/3/");
    }

    #[test]
    fn test_url_with_sort_and_show() {
        let params = LinkParams::new("general", 4)
            .with_sort(Some("newest"))
            .with_show(Some("reported"));
        assert_eq!(params.url(Some(2)), "/forum/general-4/sort-newest/show-reported/2/");
        assert_eq!(params.with_sort(None).url(None), "/forum/general-4/show-reported/");
    }

    #[test]
    fn test_parse_plain() {
        let path = ForumPath::parse("general-4/").unwrap();
        assert_eq!(path.params, LinkParams::new("general", 4));
        assert_eq!(path.page, None);
    }

    #[test]
    fn test_parse_slug_with_dashes() {
        let path = ForumPath::parse("off-topic-chat-12").unwrap();
        assert_eq!(path.params.forum_slug, "off-topic-chat");
        assert_eq!(path.params.forum_id, 12);
    }

    #[test]
    fn test_parse_full() {
        let path = ForumPath::parse("general-4/sort-oldest/show-my-threads/3/").unwrap();
        assert_eq!(path.params.sort.as_deref(), Some("oldest"));
        assert_eq!(path.params.show.as_deref(), Some("my-threads"));
        assert_eq!(path.page, Some(3));
    }

    #[test]
    fn test_parse_show_only() {
        let path = ForumPath::parse("general-4/show-bug/").unwrap();
        assert_eq!(path.params.sort, None);
        assert_eq!(path.params.show.as_deref(), Some("bug"));
    }

    #[test]
    fn test_parse_round_trips_url() {
        let params = LinkParams::new("general", 4)
            .with_sort(Some("most-replied"))
            .with_show(Some("moderated-posts"));
        let url = params.url(Some(7));
        let path = ForumPath::parse(url.trim_start_matches("/forum/")).unwrap();
        assert_eq!(path.params, params);
        assert_eq!(path.page, Some(7));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(ForumPath::parse("").is_none());
        assert!(ForumPath::parse("general").is_none());
        assert!(ForumPath::parse("general-abc/").is_none());
        assert!(ForumPath::parse("-4/").is_none());
        assert!(ForumPath::parse("general-4/show-x/sort-y/").is_none());
        assert!(ForumPath::parse("general-4/sort-/").is_none());
        assert!(ForumPath::parse("general-4/2/3/").is_none());
        assert!(ForumPath::parse("general-4/latest/").is_none());
        assert!(ForumPath::parse("general-4/99999999999/").is_none());
    }
}
