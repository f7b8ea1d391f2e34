//! Precomputed forum permissions.
//!
//! ACLs are computed elsewhere and stored per forum and role as a JSON object
//! of boolean flags. Missing flags and missing rows mean "denied".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::db::{DbPool, Role};
use crate::{ForumError, Result};

/// Permission flags of one role in one forum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumAcl {
    /// Forum is listed and its existence is revealed.
    pub can_see: bool,
    /// Forum's thread list can be opened.
    pub can_browse: bool,
    /// Threads started by anyone are listed.
    pub can_see_all_threads: bool,
    /// Only the viewer's own threads are listed.
    pub can_see_own_threads: bool,
    /// Reported-posts filter is offered.
    pub can_see_reports: bool,
    /// Moderated content is listed and its filters are offered.
    pub can_review_moderated_content: bool,
    /// Hidden threads are listed.
    pub can_hide_threads: bool,
}

impl ForumAcl {
    /// ACL of a member in a public forum.
    pub fn member() -> Self {
        Self {
            can_see: true,
            can_browse: true,
            can_see_all_threads: true,
            ..Self::default()
        }
    }

    /// ACL of a moderator: everything granted.
    pub fn moderator() -> Self {
        Self {
            can_see: true,
            can_browse: true,
            can_see_all_threads: true,
            can_see_own_threads: false,
            can_see_reports: true,
            can_review_moderated_content: true,
            can_hide_threads: true,
        }
    }

    /// Decode an ACL mapping. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ForumError::Validation(format!("malformed forum ACL: {e}")))
    }
}

/// Repository for stored forum ACLs.
pub struct AclRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AclRepository<'a> {
    /// Create a new AclRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Store the ACL of `role` in a forum, replacing any previous one.
    pub async fn set(&self, forum_id: i64, role: Role, acl: &ForumAcl) -> Result<()> {
        let json = serde_json::to_string(acl)
            .map_err(|e| ForumError::Internal(format!("failed to encode ACL: {e}")))?;

        sqlx::query(
            "INSERT INTO forum_acls (forum_id, role, acl) VALUES (?, ?, ?)
             ON CONFLICT(forum_id, role) DO UPDATE SET acl = excluded.acl",
        )
        .bind(forum_id)
        .bind(role.as_str())
        .bind(json)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Get the ACL of `role` in a forum. No stored ACL denies everything.
    pub async fn get(&self, forum_id: i64, role: Role) -> Result<ForumAcl> {
        let json: Option<String> =
            sqlx::query_scalar("SELECT acl FROM forum_acls WHERE forum_id = ? AND role = ?")
                .bind(forum_id)
                .bind(role.as_str())
                .fetch_optional(self.pool)
                .await?;

        match json {
            Some(json) => ForumAcl::from_json(&json),
            None => Ok(ForumAcl::default()),
        }
    }

    /// Get the ACLs of `role` for several forums at once.
    ///
    /// Forums without a stored ACL are absent from the map.
    pub async fn get_many(&self, forum_ids: &[i64], role: Role) -> Result<HashMap<i64, ForumAcl>> {
        if forum_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT forum_id, acl FROM forum_acls WHERE role = ",
        );
        query.push_bind(role.as_str());
        query.push(" AND forum_id IN (");
        let mut separated = query.separated(", ");
        for id in forum_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<(i64, String)> = query.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter()
            .map(|(forum_id, json)| Ok((forum_id, ForumAcl::from_json(&json)?)))
            .collect()
    }
}
