//! Database schema and migrations for forumlist.
//!
//! Migrations are applied in order. The schema_version table tracks which
//! migrations have been applied. Timestamps are written by the application
//! as RFC 3339 strings so they compare correctly as text.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    slug        TEXT NOT NULL UNIQUE,
    role        TEXT NOT NULL DEFAULT 'member',  -- 'member', 'moderator', 'admin'
    joined_on   TEXT NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1
);
"#,
    // v2: forum tree (nested set) and precomputed per-role ACLs
    r#"
CREATE TABLE forums (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    parent_id     INTEGER REFERENCES forums(id) ON DELETE CASCADE,
    kind          TEXT NOT NULL DEFAULT 'forum',  -- 'category', 'forum', 'redirect'
    name          TEXT NOT NULL,
    slug          TEXT NOT NULL,
    description   TEXT,
    redirect_url  TEXT,
    lft           INTEGER NOT NULL,
    rght          INTEGER NOT NULL,
    level         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_forums_tree ON forums(lft, rght);
CREATE INDEX idx_forums_parent_id ON forums(parent_id);

CREATE TABLE forum_acls (
    forum_id    INTEGER NOT NULL REFERENCES forums(id) ON DELETE CASCADE,
    role        TEXT NOT NULL,                    -- 'guest', 'member', 'moderator', 'admin'
    acl         TEXT NOT NULL,                    -- JSON object of permission flags
    PRIMARY KEY (forum_id, role)
);
"#,
    // v3: thread labels
    r#"
CREATE TABLE labels (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    slug        TEXT NOT NULL UNIQUE,
    css_class   TEXT
);

CREATE TABLE forum_labels (
    forum_id    INTEGER NOT NULL REFERENCES forums(id) ON DELETE CASCADE,
    label_id    INTEGER NOT NULL REFERENCES labels(id) ON DELETE CASCADE,
    PRIMARY KEY (forum_id, label_id)
);
"#,
    // v4: threads
    r#"
CREATE TABLE threads (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    forum_id             INTEGER NOT NULL REFERENCES forums(id) ON DELETE CASCADE,
    label_id             INTEGER REFERENCES labels(id) ON DELETE SET NULL,
    title                TEXT NOT NULL,
    slug                 TEXT NOT NULL,
    weight               INTEGER NOT NULL DEFAULT 0,  -- 0 default, 1 pinned, 2 announcement
    starter_id           INTEGER REFERENCES users(id) ON DELETE SET NULL,
    starter_name         TEXT NOT NULL,
    replies              INTEGER NOT NULL DEFAULT 0,
    started_on           TEXT NOT NULL,
    last_post_on         TEXT NOT NULL,
    last_poster_name     TEXT NOT NULL,
    is_moderated         INTEGER NOT NULL DEFAULT 0,
    is_hidden            INTEGER NOT NULL DEFAULT 0,
    is_closed            INTEGER NOT NULL DEFAULT 0,
    has_reported_posts   INTEGER NOT NULL DEFAULT 0,
    has_moderated_posts  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX idx_threads_forum_weight ON threads(forum_id, weight);
CREATE INDEX idx_threads_starter_id ON threads(starter_id);
CREATE INDEX idx_threads_last_post_on ON threads(last_post_on);
"#,
    // v5: read tracking
    r#"
CREATE TABLE thread_reads (
    user_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    thread_id     INTEGER NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
    forum_id      INTEGER NOT NULL REFERENCES forums(id) ON DELETE CASCADE,
    last_read_on  TEXT NOT NULL,
    PRIMARY KEY (user_id, thread_id)
);

CREATE TABLE forum_reads (
    user_id          INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    forum_id         INTEGER NOT NULL REFERENCES forums(id) ON DELETE CASCADE,
    last_cleared_on  TEXT NOT NULL,
    PRIMARY KEY (user_id, forum_id)
);
"#,
];
