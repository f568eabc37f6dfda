//! Post handlers: list, read (with comments), create, update, delete.
//!
//! Update and delete are author-only; the service enforces the ownership
//! check against the caller's identity.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use forum_core::domain::{Approval, Post};
use forum_core::service::{NewPost, PostPatch};
use forum_shared::ApiResponse;
use forum_shared::dto::{
    CreatePostRequest, PostDetailResponse, PostResponse, UpdatePostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

use super::comments::comment_response;

pub(super) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        subject: post.subject,
        content: post.content,
        tag: post.tag,
        approval: match post.approval {
            Approval::Given => "given",
            Approval::NotGiven => "not_given",
        }
        .to_string(),
        modified_at: post.modified_at,
    }
}

fn parse_approval(raw: &str) -> Result<Approval, String> {
    match raw {
        "given" => Ok(Approval::Given),
        "not_given" => Ok(Approval::NotGiven),
        _ => Err("approval: must be 'given' or 'not_given'".to_string()),
    }
}

fn require_filled(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push(format!("{}: must not be empty", field));
    }
}

/// GET /api/posts
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(post_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id} - one post plus its comments.
pub async fn get_one(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.posts.get(id).await?;
    let comments = state.comments.list_for_post(id).await?;

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: post_response(post),
        comments: comments.into_iter().map(comment_response).collect(),
    }))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    require_filled("subject", &req.subject, &mut errors);
    require_filled("content", &req.content, &mut errors);
    require_filled("tag", &req.tag, &mut errors);
    let approval = match parse_approval(&req.approval) {
        Ok(a) => a,
        Err(msg) => {
            errors.push(msg);
            return Err(AppError::Validation(errors));
        }
    };
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = state
        .posts
        .create(
            identity.user_id,
            NewPost {
                subject: req.subject,
                content: req.content,
                tag: req.tag,
                approval,
            },
        )
        .await?;

    tracing::debug!(post_id = %post.id, author = %identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// PUT /api/posts/{id} - author-only. Omitted fields keep their values;
/// approval and author cannot be changed here.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if let Some(subject) = &req.subject {
        require_filled("subject", subject, &mut errors);
    }
    if let Some(content) = &req.content {
        require_filled("content", content, &mut errors);
    }
    if let Some(tag) = &req.tag {
        require_filled("tag", tag, &mut errors);
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = state
        .posts
        .update(
            path.into_inner(),
            identity.user_id,
            PostPatch {
                subject: req.subject,
                content: req.content,
                tag: req.tag,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post_response(post)))
}

/// DELETE /api/posts/{id} - author-only. Comments are left behind.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id, identity.user_id).await?;

    tracing::debug!(post_id = %id, "Post deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "The post was deleted.")))
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

    async fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(None).await)
    }

    #[test]
    fn approval_values_outside_choices_are_rejected() {
        assert!(parse_approval("given").is_ok());
        assert!(parse_approval("not_given").is_ok());
        assert!(parse_approval("Given").is_err());
        assert!(parse_approval("maybe").is_err());
        assert!(parse_approval("").is_err());
    }

    #[tokio::test]
    async fn create_rejects_blank_fields_and_bad_approval_with_422() {
        let req = CreatePostRequest {
            subject: "   ".to_string(),
            content: "".to_string(),
            tag: "pets".to_string(),
            approval: "maybe".to_string(),
        };

        let result = create(state().await, caller(), web::Json(req)).await;
        let Err(err) = result else {
            panic!("blank fields should not create a post");
        };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        match err {
            AppError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.starts_with("subject:")));
                assert!(errors.iter().any(|e| e.starts_with("content:")));
                assert!(errors.iter().any(|e| e.starts_with("approval:")));
            }
            other => panic!("expected a validation error, got {}", other),
        }
    }

    #[tokio::test]
    async fn create_accepts_valid_input() {
        let req = CreatePostRequest {
            subject: "Field day".to_string(),
            content: "We went outside.".to_string(),
            tag: "school".to_string(),
            approval: "given".to_string(),
        };

        let response = create(state().await, caller(), web::Json(req)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn update_rejects_blank_supplied_fields() {
        let state = state().await;
        let identity = caller();

        let created = create(
            state.clone(),
            identity.clone(),
            web::Json(CreatePostRequest {
                subject: "Field day".to_string(),
                content: "We went outside.".to_string(),
                tag: "school".to_string(),
                approval: "given".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);

        let posts = state.posts.list().await.unwrap();
        let patch = UpdatePostRequest {
            subject: Some("  ".to_string()),
            ..Default::default()
        };

        let result = update(
            state.clone(),
            identity,
            web::Path::from(posts[0].id),
            web::Json(patch),
        )
        .await;
        let Err(err) = result else {
            panic!("blank subject should not update the post");
        };
        assert!(matches!(err, AppError::Validation(_)));

        // Stored subject untouched after the rejected update.
        let unchanged = state.posts.list().await.unwrap();
        assert_eq!(unchanged[0].subject, "Field day");
    }
}
