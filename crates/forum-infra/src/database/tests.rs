#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post};
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use forum_core::domain::{Comment, Post};
    use forum_core::ports::{BaseRepository, CommentRepository};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn find_post_by_id_maps_row_to_domain() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post::Model {
                id: post_id,
                author_id,
                subject: "Field day".to_owned(),
                content: "We went outside.".to_owned(),
                tag: "school".to_owned(),
                approval: post::Approval::Given,
                modified_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.expect("row should map to a post");
        assert_eq!(post.id, post_id);
        assert_eq!(post.author_id, author_id);
        assert_eq!(post.subject, "Field day");
        assert_eq!(post.approval, forum_core::domain::Approval::Given);
    }

    #[tokio::test]
    async fn find_comments_by_post_id() {
        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    author_id,
                    post_id,
                    content: "First".to_owned(),
                    modified_at: now.into(),
                },
                comment::Model {
                    id: uuid::Uuid::new_v4(),
                    author_id,
                    post_id,
                    content: "Second".to_owned(),
                    modified_at: now.into(),
                },
            ]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments: Vec<Comment> = repo.find_by_post_id(post_id).await.unwrap();

        assert_eq!(comments.len(), 2);
        assert!(comments.iter().all(|c| c.post_id == post_id));
    }

    #[tokio::test]
    async fn save_reports_non_pk_unique_conflict_instead_of_updating() {
        use crate::database::postgres_repo::PostgresUserRepository;
        use forum_core::domain::User;
        use sea_orm::{DbErr, RuntimeErr};

        // A fresh id colliding on the email column must not fall back to an
        // update by that id; report the conflict as-is.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"users_email_key\"".to_owned(),
            ))])
            .into_connection();

        let repo = PostgresUserRepository::new(db);
        let user = User::new("taken@example.com".to_owned(), "hash".to_owned());

        let err = BaseRepository::<User, _>::save(&repo, user).await.unwrap_err();
        assert!(matches!(err, forum_core::error::RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn save_falls_back_to_update_on_pk_conflict() {
        use sea_orm::{DbErr, RuntimeErr};

        let post_id = uuid::Uuid::new_v4();
        let author_id = uuid::Uuid::new_v4();
        let now = chrono::Utc::now();
        let row = post::Model {
            id: post_id,
            author_id,
            subject: "Field day, revised".to_owned(),
            content: "We stayed inside.".to_owned(),
            tag: "school".to_owned(),
            approval: post::Approval::Given,
            modified_at: now.into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"posts_pkey\"".to_owned(),
            ))])
            .append_query_results(vec![vec![row.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let saved: Post = repo.save(row.into()).await.unwrap();
        assert_eq!(saved.id, post_id);
        assert_eq!(saved.subject, "Field day, revised");
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let err = BaseRepository::<Post, _>::delete(&repo, uuid::Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, forum_core::error::RepoError::NotFound));
    }
}
