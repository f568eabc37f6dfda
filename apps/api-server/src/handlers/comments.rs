//! Comment handlers.
//!
//! Editing a comment is author-only; deleting one is open to any
//! authenticated caller, unlike post deletion (see DESIGN.md).

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use forum_core::domain::Comment;
use forum_shared::ApiResponse;
use forum_shared::dto::{CommentBodyRequest, CommentResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) fn comment_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author_id: comment.author_id,
        post_id: comment.post_id,
        content: comment.content,
        modified_at: comment.modified_at,
    }
}

fn validated_content(req: CommentBodyRequest) -> AppResult<String> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation(vec![
            "content: must not be empty".to_string(),
        ]));
    }
    Ok(req.content)
}

/// GET /api/posts/{id}/comments
pub async fn list_for_post(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.comments.list_for_post(path.into_inner()).await?;
    let body: Vec<CommentResponse> = comments.into_iter().map(comment_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts/{id}/comments - the post must exist.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentBodyRequest>,
) -> AppResult<HttpResponse> {
    let content = validated_content(body.into_inner())?;

    let comment = state
        .comments
        .create(identity.user_id, path.into_inner(), content)
        .await?;

    tracing::debug!(comment_id = %comment.id, post_id = %comment.post_id, "Comment created");

    Ok(HttpResponse::Created().json(comment_response(comment)))
}

/// PUT /api/comments/{id} - author-only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentBodyRequest>,
) -> AppResult<HttpResponse> {
    let content = validated_content(body.into_inner())?;

    let comment = state
        .comments
        .update(path.into_inner(), identity.user_id, content)
        .await?;

    Ok(HttpResponse::Ok().json(comment_response(comment)))
}

/// DELETE /api/comments/{id} - no ownership check (see module docs).
pub async fn remove(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.delete(path.into_inner()).await?;

    tracing::debug!(comment_id = %comment.id, "Comment deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        comment_response(comment),
        "The comment was deleted.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    fn caller() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            email: "u@example.com".to_string(),
        }
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = validated_content(CommentBodyRequest {
            content: "  \n".to_string(),
        })
        .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec!["content: must not be empty".to_string()]);
            }
            other => panic!("expected a validation error, got {}", other),
        }
    }

    #[tokio::test]
    async fn create_with_blank_content_is_422_before_any_lookup() {
        let state = web::Data::new(crate::state::AppState::new(None).await);

        // Validation fires before the post lookup, so a random id is fine.
        let result = create(
            state,
            caller(),
            web::Path::from(Uuid::new_v4()),
            web::Json(CommentBodyRequest {
                content: "".to_string(),
            }),
        )
        .await;

        let Err(err) = result else {
            panic!("blank content should not create a comment");
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn update_with_blank_content_is_422() {
        let state = web::Data::new(crate::state::AppState::new(None).await);

        let result = update(
            state,
            caller(),
            web::Path::from(Uuid::new_v4()),
            web::Json(CommentBodyRequest {
                content: "   ".to_string(),
            }),
        )
        .await;

        let Err(err) = result else {
            panic!("blank content should not update a comment");
        };
        assert!(matches!(err, AppError::Validation(_)));
    }
}
