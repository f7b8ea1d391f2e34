//! Forum thread list handler.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

use crate::db::{DbPool, UserRepository, Viewer};
use crate::forum::{AclRepository, Forum, ForumContext, ForumKind, ForumRepository, LabelRepository};
use crate::threads::{Filtering, ForumPath, ForumThreads, LinkParams, PageError, Sorting};
use crate::web::dto::{
    ApiResponse, FilteringResponse, ForumResponse, ForumThreadsResponse, PageResponse,
    PaginatorResponse, SortingResponse, ThreadItemResponse,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::{JwtClaims, OptionalAuthUser};
use crate::ForumError;

/// GET /forum/{slug}-{id}/[sort-{key}/][show-{key}/][{page}/] - List threads in a forum.
pub async fn forum_threads(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(auth): OptionalAuthUser,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let ForumPath { params, page } = ForumPath::parse(path.trim_start_matches('/'))
        .ok_or_else(|| ApiError::not_found("Page not found"))?;

    let pool = state.db.pool();
    let viewer = load_viewer(pool, auth).await?;

    let forum = ForumRepository::new(pool)
        .get_by_id(params.forum_id)
        .await?
        .filter(|f| f.kind != ForumKind::Category)
        .ok_or_else(|| ApiError::not_found("Forum not found"))?;

    let acl = AclRepository::new(pool).get(forum.id, viewer.role()).await?;
    if !acl.can_see {
        return Err(ApiError::not_found("Forum not found"));
    }
    if !acl.can_browse {
        return Err(ApiError::forbidden("You don't have permission to browse this forum"));
    }

    if forum.kind == ForumKind::Redirect {
        // A stored target that cannot be a header value counts as missing.
        let target = forum
            .redirect_url
            .as_deref()
            .and_then(|url| HeaderValue::try_from(url).ok())
            .ok_or_else(|| ApiError::not_found("Forum not found"))?;
        return Ok((StatusCode::SEE_OTHER, [(LOCATION, target)]).into_response());
    }

    if params.forum_slug != forum.slug {
        let canonical = LinkParams {
            forum_slug: forum.slug.clone(),
            ..params
        };
        return Ok(Redirect::permanent(&canonical.url(page)).into_response());
    }

    let labels = LabelRepository::new(pool).get_forum_labels(forum.id).await?;
    let subforums = if forum.has_children() {
        visible_subforums(pool, &forum, &viewer).await?
    } else {
        Vec::new()
    };
    let path = ForumRepository::new(pool).path(&forum).await?;

    let context = ForumContext { forum, acl, labels };

    // Anonymous visitors always get the default list.
    let mut cleaned = params.clone();
    if !viewer.is_authenticated() {
        cleaned.sort = None;
        cleaned.show = None;
    }

    let mut sorting = Sorting::new();
    let cleaned = sorting.clean(cleaned);

    let mut filtering = Filtering::new(&context);
    let cleaned = filtering.clean(cleaned);

    let mut threads = ForumThreads::new(pool, &context, &viewer, &state.threads);
    sorting.sort(&mut threads);
    filtering.filter(&mut threads);

    // Cleaned params redirect with 303 See Other, not 302.
    if cleaned != params {
        tracing::debug!("Redirecting {} to {}", params.url(page), cleaned.url(None));
        return Ok(Redirect::to(&cleaned.url(None)).into_response());
    }

    let items = match threads.list(page).await {
        Ok(items) => items,
        Err(ForumError::Page(PageError::ExplicitFirstPage)) => {
            return Ok(Redirect::to(&cleaned.url(None)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let response = ForumThreadsResponse {
        forum: ForumResponse::from(&context.forum),
        path: path.iter().map(ForumResponse::from).collect(),
        subforums: subforums.iter().map(ForumResponse::from).collect(),
        labels: context.labels.clone(),
        threads: items.into_iter().map(ThreadItemResponse::from).collect(),
        page: PageResponse::new(threads.page()?, &cleaned),
        paginator: PaginatorResponse::from(threads.paginator()?),
        sorting: SortingResponse {
            current: sorting.current(&cleaned),
            choices: sorting.choices(&cleaned),
        },
        filtering: FilteringResponse {
            is_active: filtering.is_active(),
            current: filtering.current(&cleaned).clone(),
            choices: filtering.choices(&cleaned).into_iter().cloned().collect(),
        },
        link_params: cleaned,
    };

    Ok(Json(ApiResponse::new(response)).into_response())
}

/// Resolve token claims to a viewer. Unknown or inactive users browse anonymously.
async fn load_viewer(pool: &DbPool, claims: Option<JwtClaims>) -> Result<Viewer, ApiError> {
    let Some(claims) = claims else {
        return Ok(Viewer::Anonymous);
    };

    match UserRepository::new(pool).get_active(claims.sub).await? {
        Some(user) => Ok(Viewer::User(user)),
        None => {
            tracing::debug!("Token for unknown or inactive user {}", claims.sub);
            Ok(Viewer::Anonymous)
        }
    }
}

/// Direct children of `forum` the viewer may see.
async fn visible_subforums(
    pool: &DbPool,
    forum: &Forum,
    viewer: &Viewer,
) -> Result<Vec<Forum>, ApiError> {
    let children = ForumRepository::new(pool).children(forum).await?;
    let ids: Vec<i64> = children.iter().map(|f| f.id).collect();
    let acls = AclRepository::new(pool).get_many(&ids, viewer.role()).await?;

    Ok(children
        .into_iter()
        .filter(|f| acls.get(&f.id).is_some_and(|acl| acl.can_see))
        .collect())
}
