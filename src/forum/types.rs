//! Forum model for forumlist.
//!
//! Forums form a tree stored as a nested set: every node carries `lft` and
//! `rght` bounds that enclose the bounds of all its descendants.

use std::fmt;
use std::str::FromStr;

use super::acl::ForumAcl;
use super::label::Label;

/// What a node in the forum tree is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForumKind {
    /// Groups other forums, holds no threads.
    Category,
    /// Regular forum with a thread list.
    #[default]
    Forum,
    /// Link to an external address.
    Redirect,
}

impl ForumKind {
    /// Convert kind to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ForumKind::Category => "category",
            ForumKind::Forum => "forum",
            ForumKind::Redirect => "redirect",
        }
    }
}

impl fmt::Display for ForumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ForumKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" => Ok(ForumKind::Category),
            "forum" => Ok(ForumKind::Forum),
            "redirect" => Ok(ForumKind::Redirect),
            _ => Err(format!("unknown forum kind: {s}")),
        }
    }
}

/// Forum entity.
#[derive(Debug, Clone)]
pub struct Forum {
    /// Unique forum ID.
    pub id: i64,
    /// Parent node, `None` for top-level nodes.
    pub parent_id: Option<i64>,
    /// Node kind.
    pub kind: ForumKind,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Target address for redirect forums.
    pub redirect_url: Option<String>,
    /// Nested set left bound.
    pub lft: i64,
    /// Nested set right bound.
    pub rght: i64,
    /// Depth in the tree, 0 for top-level nodes.
    pub level: i64,
}

impl Forum {
    /// Whether any node sits below this one.
    pub fn has_children(&self) -> bool {
        self.lft + 1 < self.rght
    }

    /// Canonical URL of the forum's thread list.
    pub fn url(&self) -> String {
        format!("/forum/{}-{}/", self.slug, self.id)
    }
}

/// Data for creating a new forum.
#[derive(Debug, Clone)]
pub struct NewForum {
    /// Display name.
    pub name: String,
    /// Node kind (defaults to Forum).
    pub kind: ForumKind,
    /// Parent node.
    pub parent_id: Option<i64>,
    /// Description.
    pub description: Option<String>,
    /// Target address for redirect forums.
    pub redirect_url: Option<String>,
}

impl NewForum {
    /// Create a new top-level forum.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ForumKind::Forum,
            parent_id: None,
            description: None,
            redirect_url: None,
        }
    }

    /// Set the node kind.
    pub fn with_kind(mut self, kind: ForumKind) -> Self {
        self.kind = kind;
        self
    }

    /// Place the forum under a parent node.
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Make this a redirect forum pointing at `url`.
    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.kind = ForumKind::Redirect;
        self.redirect_url = Some(url.into());
        self
    }
}

/// A forum loaded for one viewer: the node with the viewer's ACL and the
/// labels usable in it.
#[derive(Debug, Clone)]
pub struct ForumContext {
    /// The forum.
    pub forum: Forum,
    /// Precomputed permissions of the viewer's role.
    pub acl: ForumAcl,
    /// Labels attached to the forum.
    pub labels: Vec<Label>,
}

impl ForumContext {
    /// Find a label by ID.
    pub fn label_by_id(&self, id: i64) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }
}
