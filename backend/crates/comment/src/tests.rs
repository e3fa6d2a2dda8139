//! Router-level tests for the comment crate
//!
//! Handlers run against in-memory repositories through `oneshot`.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response, header};
    use chrono::{DateTime, Utc};
    use kernel::id::{BlogId, CommentId, WriterId};
    use kernel::query::ListSpec;
    use serde_json::Value;
    use writer::AuthConfig;
    use writer::AuthGuardState;
    use writer::domain::entity::{Writer, WriterListing};
    use writer::domain::repository::{WriterQuery, WriterRepository};
    use writer::domain::value_object::{
        bio::Bio,
        email::Email,
        writer_name::WriterName,
        writer_password::{RawPassword, WriterPassword},
    };
    use writer::error::WriterResult;

    use crate::domain::entity::{Comment, CommentView, DeleteOutcome, LikeOutcome};
    use crate::domain::repository::{CommentRepository, CommentSort};
    use crate::domain::value_object::comment_content::CommentContent;
    use crate::error::{CommentError, CommentResult};
    use crate::presentation::router::comment_router_generic;

    pub const SECRET: &[u8] = b"comment-test-secret";

    /// Only what the auth guard needs
    #[derive(Default)]
    pub struct MemoryWriters {
        writers: Mutex<Vec<Writer>>,
    }

    impl MemoryWriters {
        pub fn seed(&self, name: &str, email: &str) -> Writer {
            let raw = RawPassword::new("Secret123".to_string()).unwrap();
            let writer = Writer::new(
                WriterName::new(name).unwrap(),
                Email::new(email).unwrap(),
                WriterPassword::from_raw(&raw, None).unwrap(),
                Bio::default(),
            );
            self.writers.lock().unwrap().push(writer.clone());
            writer
        }

        pub fn remove(&self, id: WriterId) {
            self.writers.lock().unwrap().retain(|w| w.id != id);
        }

        fn get(&self, id: WriterId) -> Option<Writer> {
            self.writers
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == id)
                .cloned()
        }
    }

    impl WriterRepository for MemoryWriters {
        async fn create(&self, writer: &Writer) -> WriterResult<()> {
            self.writers.lock().unwrap().push(writer.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: WriterId) -> WriterResult<Option<Writer>> {
            Ok(self.get(id))
        }

        async fn find_by_email(&self, email: &Email) -> WriterResult<Option<Writer>> {
            Ok(self
                .writers
                .lock()
                .unwrap()
                .iter()
                .find(|w| &w.email == email)
                .cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> WriterResult<bool> {
            Ok(self.find_by_email(email).await?.is_some())
        }

        async fn list(&self, _query: &WriterQuery) -> WriterResult<(Vec<WriterListing>, u64)> {
            Ok((Vec::new(), 0))
        }

        async fn update(&self, writer: &Writer) -> WriterResult<()> {
            let mut writers = self.writers.lock().unwrap();
            if let Some(slot) = writers.iter_mut().find(|w| w.id == writer.id) {
                *slot = writer.clone();
            }
            Ok(())
        }

        async fn delete(&self, id: WriterId) -> WriterResult<bool> {
            let mut writers = self.writers.lock().unwrap();
            let before = writers.len();
            writers.retain(|w| w.id != id);
            Ok(writers.len() < before)
        }
    }

    /// Mirrors the Postgres statements; ordering by creation sequence
    pub struct MemoryCommentRepository {
        writers: Arc<MemoryWriters>,
        /// blog -> (owner, title)
        blogs: Mutex<HashMap<BlogId, (WriterId, String)>>,
        comments: Mutex<Vec<Comment>>,
    }

    impl MemoryCommentRepository {
        pub fn new(writers: Arc<MemoryWriters>) -> Self {
            Self {
                writers,
                blogs: Mutex::new(HashMap::new()),
                comments: Mutex::new(Vec::new()),
            }
        }

        pub fn add_blog(&self, owner: WriterId, title: &str) -> BlogId {
            let id = BlogId::new();
            self.blogs
                .lock()
                .unwrap()
                .insert(id, (owner, title.to_string()));
            id
        }

        pub fn get(&self, id: CommentId) -> Option<Comment> {
            self.comments
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == id)
                .cloned()
        }

        pub fn len(&self) -> usize {
            self.comments.lock().unwrap().len()
        }

        fn view(&self, comment: Comment) -> CommentView {
            let author = self.writers.get(comment.author_id).map(|w| w.summary());
            let blog_title = self
                .blogs
                .lock()
                .unwrap()
                .get(&comment.blog_id)
                .map(|(_, title)| title.clone());
            CommentView {
                comment,
                author,
                blog_title,
            }
        }

        fn page(
            &self,
            keep: impl Fn(&Comment) -> bool,
            spec: &ListSpec<CommentSort>,
        ) -> (Vec<CommentView>, u64) {
            assert_eq!(spec.sort.key, CommentSort::CreatedAt);
            let mut matching: Vec<Comment> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| keep(c))
                .cloned()
                .collect();
            // Insertion order stands in for created_at; newest first
            matching.reverse();

            let total = matching.len() as u64;
            let items = matching
                .into_iter()
                .skip(spec.page.offset() as usize)
                .take(spec.page.limit as usize)
                .map(|c| self.view(c))
                .collect();
            (items, total)
        }
    }

    impl CommentRepository for MemoryCommentRepository {
        async fn create(&self, comment: &Comment) -> CommentResult<()> {
            if !self.blogs.lock().unwrap().contains_key(&comment.blog_id) {
                return Err(CommentError::BlogNotFound);
            }
            let mut comments = self.comments.lock().unwrap();
            if let Some(parent_id) = comment.parent_id {
                let parent = comments
                    .iter_mut()
                    .find(|c| c.id == parent_id && c.blog_id == comment.blog_id)
                    .ok_or(CommentError::ParentNotFound)?;
                parent.reply_count += 1;
            }
            comments.push(comment.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<CommentView>> {
            Ok(self.get(id).map(|c| self.view(c)))
        }

        async fn replies(
            &self,
            parents: &[CommentId],
            approved_only: bool,
        ) -> CommentResult<Vec<CommentView>> {
            let replies: Vec<Comment> = self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.parent_id.is_some_and(|p| parents.contains(&p)))
                .filter(|c| !approved_only || c.is_approved)
                .cloned()
                .collect();
            Ok(replies.into_iter().map(|c| self.view(c)).collect())
        }

        async fn list_top_level(
            &self,
            blog_id: BlogId,
            spec: &ListSpec<CommentSort>,
        ) -> CommentResult<(Vec<CommentView>, u64)> {
            Ok(self.page(
                |c| c.blog_id == blog_id && c.parent_id.is_none() && c.is_approved,
                spec,
            ))
        }

        async fn list_by_author(
            &self,
            author_id: WriterId,
            spec: &ListSpec<CommentSort>,
        ) -> CommentResult<(Vec<CommentView>, u64)> {
            Ok(self.page(|c| c.author_id == author_id, spec))
        }

        async fn update_content(
            &self,
            id: CommentId,
            author_id: WriterId,
            content: &CommentContent,
            now: DateTime<Utc>,
        ) -> CommentResult<bool> {
            let mut comments = self.comments.lock().unwrap();
            match comments
                .iter_mut()
                .find(|c| c.id == id && c.author_id == author_id)
            {
                Some(comment) => {
                    comment.content = content.clone();
                    comment.updated_at = now;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(
            &self,
            id: CommentId,
            author_id: WriterId,
        ) -> CommentResult<Option<DeleteOutcome>> {
            let mut comments = self.comments.lock().unwrap();
            let Some(target) = comments
                .iter()
                .find(|c| c.id == id && c.author_id == author_id)
                .cloned()
            else {
                return Ok(None);
            };

            let before = comments.len();
            comments.retain(|c| c.parent_id != Some(id));
            let replies_removed = (before - comments.len()) as u64;
            comments.retain(|c| c.id != id);
            if let Some(parent_id) = target.parent_id {
                if let Some(parent) = comments.iter_mut().find(|c| c.id == parent_id) {
                    parent.reply_count -= 1;
                }
            }

            Ok(Some(DeleteOutcome {
                replies_removed,
                parent_id: target.parent_id,
            }))
        }

        async fn toggle_like(
            &self,
            id: CommentId,
            writer_id: WriterId,
        ) -> CommentResult<Option<LikeOutcome>> {
            let mut comments = self.comments.lock().unwrap();
            let Some(comment) = comments.iter_mut().find(|c| c.id == id) else {
                return Ok(None);
            };
            let liked = if comment.likes.contains(&writer_id) {
                comment.likes.retain(|w| *w != writer_id);
                false
            } else {
                comment.likes.push(writer_id);
                true
            };
            Ok(Some(LikeOutcome {
                liked,
                count: comment.likes.len() as u64,
            }))
        }

        async fn set_approved(&self, id: CommentId, approved: bool) -> CommentResult<bool> {
            let mut comments = self.comments.lock().unwrap();
            match comments.iter_mut().find(|c| c.id == id) {
                Some(comment) => {
                    comment.is_approved = approved;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    pub fn config() -> AuthConfig {
        AuthConfig::with_secret(SECRET)
    }

    pub struct TestApp {
        pub writers: Arc<MemoryWriters>,
        pub comments: Arc<MemoryCommentRepository>,
        pub router: Router,
    }

    pub fn app() -> TestApp {
        let writers = Arc::new(MemoryWriters::default());
        let comments = Arc::new(MemoryCommentRepository::new(writers.clone()));
        let guard = AuthGuardState::new(writers.clone(), Arc::new(config().token_service()));
        let router = comment_router_generic(comments.clone(), guard);
        TestApp {
            writers,
            comments,
            router,
        }
    }

    pub fn token_for(id: WriterId) -> String {
        config().token_service().issue(id.into_uuid()).unwrap()
    }

    pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod comment_tests {
    use axum::Router;
    use axum::http::StatusCode;
    use kernel::id::{BlogId, CommentId};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::*;

    async fn post_comment(
        router: &Router,
        token: &str,
        blog: BlogId,
        parent: Option<&str>,
        content: &str,
    ) -> Value {
        let mut body = json!({"content": content, "blog": blog.to_string()});
        if let Some(parent) = parent {
            body["parentComment"] = json!(parent);
        }
        let response = router
            .clone()
            .oneshot(json_request("POST", "/", body, Some(token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }

    fn comment_id(value: &Value) -> CommentId {
        CommentId::parse_field("id", value["id"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_create_comment_and_reply_updates_counter() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Threads in Rust");

        let top = post_comment(&app.router, &token, blog, None, "  Great post ").await;
        assert_eq!(top["content"], "Great post");
        assert_eq!(top["author"]["name"], "Alice");
        assert_eq!(top["blog"]["title"], "Threads in Rust");
        assert!(top["parentComment"].is_null());
        assert_eq!(top["isApproved"], true);

        let top_id = top["id"].as_str().unwrap();
        let first = post_comment(&app.router, &token, blog, Some(top_id), "first reply").await;
        post_comment(&app.router, &token, blog, Some(top_id), "second reply").await;
        assert_eq!(first["parentComment"], top["id"]);
        assert_eq!(app.comments.get(comment_id(&top)).unwrap().reply_count, 2);

        let response = app
            .router
            .oneshot(empty_request("GET", &format!("/blog/{}", blog), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Comments fetched successfully");
        assert_eq!(body["data"]["total"], 1);
        let thread = &body["data"]["comments"][0];
        assert_eq!(thread["replyCount"], 2);
        assert_eq!(thread["replies"][0]["content"], "first reply");
        assert_eq!(thread["replies"][1]["content"], "second reply");
    }

    #[tokio::test]
    async fn test_create_on_missing_blog_or_foreign_parent() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let other = app.comments.add_blog(alice.id, "Blog two");
        let parent = post_comment(&app.router, &token, other, None, "elsewhere").await;

        let missing = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/",
                json!({"content": "hello", "blog": BlogId::new().to_string()}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await["message"], "Blog not found");

        let foreign = app
            .router
            .oneshot(json_request(
                "POST",
                "/",
                json!({"content": "hello", "blog": blog.to_string(), "parentComment": parent["id"]}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(foreign).await["message"], "Parent comment not found");
        assert_eq!(app.comments.get(comment_id(&parent)).unwrap().reply_count, 0);
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");

        let response = app
            .router
            .oneshot(json_request(
                "POST",
                "/",
                json!({"content": "   ", "blog": "nope"}),
                Some(&token_for(alice.id)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "content");
        assert_eq!(body["errors"][1]["field"], "blog");
    }

    #[tokio::test]
    async fn test_non_author_edit_matches_missing_comment() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let bob = app.writers.seed("Bob", "bob@example.com");
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token_for(alice.id), blog, None, "mine").await;
        let bob_token = token_for(bob.id);

        let foreign = app
            .router
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{}", comment["id"].as_str().unwrap()),
                json!({"content": "hijacked"}),
                Some(&bob_token),
            ))
            .await
            .unwrap();
        let missing = app
            .router
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{}", CommentId::new()),
                json!({"content": "hijacked"}),
                Some(&bob_token),
            ))
            .await
            .unwrap();
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
        assert_eq!(foreign.status(), missing.status());
        assert_eq!(body_json(foreign).await, body_json(missing).await);

        let delete = app
            .router
            .oneshot(empty_request(
                "DELETE",
                &format!("/{}", comment["id"].as_str().unwrap()),
                Some(&bob_token),
            ))
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_author_can_edit() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token, blog, None, "typo").await;

        let response = app
            .router
            .oneshot(json_request(
                "PUT",
                &format!("/{}", comment["id"].as_str().unwrap()),
                json!({"content": "fixed"}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Comment updated successfully");
        assert_eq!(body["data"]["content"], "fixed");
    }

    #[tokio::test]
    async fn test_delete_cascades_one_level_and_decrements_parent() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");

        let root = post_comment(&app.router, &token, blog, None, "root").await;
        let root_id = root["id"].as_str().unwrap();
        let middle = post_comment(&app.router, &token, blog, Some(root_id), "middle").await;
        let middle_id = middle["id"].as_str().unwrap();
        post_comment(&app.router, &token, blog, Some(root_id), "sibling").await;
        for i in 0..2 {
            post_comment(&app.router, &token, blog, Some(middle_id), &format!("leaf {}", i)).await;
        }
        assert_eq!(app.comments.len(), 5);

        let response = app
            .router
            .oneshot(empty_request("DELETE", &format!("/{}", middle_id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "Comment and its replies deleted successfully"
        );

        assert_eq!(app.comments.len(), 2);
        assert!(app.comments.get(comment_id(&middle)).is_none());
        assert_eq!(app.comments.get(comment_id(&root)).unwrap().reply_count, 1);
    }

    #[tokio::test]
    async fn test_like_toggle_restores_membership() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let bob = app.writers.seed("Bob", "bob@example.com");
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token_for(alice.id), blog, None, "like me").await;
        let uri = format!("/{}/like", comment["id"].as_str().unwrap());

        let liked = app
            .router
            .clone()
            .oneshot(empty_request("POST", &uri, Some(&token_for(bob.id))))
            .await
            .unwrap();
        let liked = body_json(liked).await;
        assert_eq!(liked["message"], "Comment liked");
        assert_eq!(liked["data"], json!({"liked": true, "likeCount": 1}));

        let unliked = app
            .router
            .clone()
            .oneshot(empty_request("POST", &uri, Some(&token_for(bob.id))))
            .await
            .unwrap();
        let unliked = body_json(unliked).await;
        assert_eq!(unliked["message"], "Comment unliked");
        assert_eq!(unliked["data"]["liked"], false);
        assert!(app.comments.get(comment_id(&comment)).unwrap().likes.is_empty());

        let missing = app
            .router
            .oneshot(empty_request(
                "POST",
                &format!("/{}/like", CommentId::new()),
                Some(&token_for(bob.id)),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_moderation_by_any_writer_hides_from_listing() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let bob = app.writers.seed("Bob", "bob@example.com");
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token_for(bob.id), blog, None, "spam spam").await;
        let uri = format!("/{}/moderate", comment["id"].as_str().unwrap());

        let rejected = app
            .router
            .clone()
            .oneshot(json_request(
                "PATCH",
                &uri,
                json!({"isApproved": false}),
                Some(&token_for(bob.id)),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::OK);
        let body = body_json(rejected).await;
        assert_eq!(body["message"], "Comment rejected successfully");
        assert_eq!(body["data"]["isApproved"], false);

        let listing = app
            .router
            .clone()
            .oneshot(empty_request("GET", &format!("/blog/{}", blog), None))
            .await
            .unwrap();
        assert_eq!(body_json(listing).await["data"]["total"], 0);

        let single = app
            .router
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/{}", comment["id"].as_str().unwrap()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(single.status(), StatusCode::OK);
        assert_eq!(body_json(single).await["data"]["replies"], json!([]));

        let authored = app
            .router
            .clone()
            .oneshot(empty_request("GET", &format!("/writer/{}", bob.id), None))
            .await
            .unwrap();
        let body = body_json(authored).await;
        assert_eq!(body["message"], "Author's comments fetched successfully");
        assert_eq!(body["data"]["total"], 1);

        let approved = app
            .router
            .oneshot(json_request(
                "PATCH",
                &uri,
                json!({"isApproved": "true"}),
                Some(&token_for(alice.id)),
            ))
            .await
            .unwrap();
        assert_eq!(approved.status(), StatusCode::OK);
        let body = body_json(approved).await;
        assert_eq!(body["message"], "Comment approved successfully");
        assert_eq!(body["data"]["isApproved"], true);
    }

    #[tokio::test]
    async fn test_moderation_rejects_non_boolean_flag() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token, blog, None, "keep me").await;
        let uri = format!("/{}/moderate", comment["id"].as_str().unwrap());

        let response = app
            .router
            .clone()
            .oneshot(json_request("PATCH", &uri, json!({"isApproved": "yes"}), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"][0]["field"], "isApproved");
        assert_eq!(body["errors"][0]["value"], "yes");

        let missing = app
            .router
            .oneshot(json_request("PATCH", &uri, json!({}), Some(&token)))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(missing).await["errors"][0]["field"], "isApproved");
        assert!(app.comments.get(comment_id(&comment)).unwrap().is_approved);
    }

    #[tokio::test]
    async fn test_comment_outlives_its_author() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let bob = app.writers.seed("Bob", "bob@example.com");
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let comment = post_comment(&app.router, &token_for(bob.id), blog, None, "from bob").await;

        app.writers.remove(bob.id);

        let response = app
            .router
            .clone()
            .oneshot(empty_request(
                "GET",
                &format!("/{}", comment["id"].as_str().unwrap()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["content"], "from bob");
        assert!(body["data"]["author"].is_null());

        let listing = app
            .router
            .oneshot(empty_request("GET", &format!("/blog/{}", blog), None))
            .await
            .unwrap();
        assert_eq!(body_json(listing).await["data"]["total"], 1);
    }

    #[tokio::test]
    async fn test_deleting_every_reply_zeroes_counter() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");

        let root = post_comment(&app.router, &token, blog, None, "root").await;
        let root_id = root["id"].as_str().unwrap();
        let mut replies = Vec::new();
        for i in 0..3 {
            let content = format!("reply {}", i);
            let reply = post_comment(&app.router, &token, blog, Some(root_id), &content).await;
            replies.push(reply["id"].as_str().unwrap().to_string());
        }
        assert_eq!(app.comments.get(comment_id(&root)).unwrap().reply_count, 3);

        for (i, reply) in replies.iter().enumerate() {
            let response = app
                .router
                .clone()
                .oneshot(empty_request("DELETE", &format!("/{}", reply), Some(&token)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                app.comments.get(comment_id(&root)).unwrap().reply_count,
                2 - i as u32
            );
        }

        let response = app
            .router
            .oneshot(empty_request("GET", &format!("/{}", root_id), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["replyCount"], 0);
        assert_eq!(body["data"]["replies"], json!([]));
    }

    #[tokio::test]
    async fn test_deleting_mid_level_reply_decrements_grandparent_chain_once() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");

        let root = post_comment(&app.router, &token, blog, None, "root").await;
        let root_id = root["id"].as_str().unwrap();
        let middle = post_comment(&app.router, &token, blog, Some(root_id), "middle").await;
        let middle_id = middle["id"].as_str().unwrap();
        let leaf = post_comment(&app.router, &token, blog, Some(middle_id), "leaf").await;
        let leaf_id = leaf["id"].as_str().unwrap();
        post_comment(&app.router, &token, blog, Some(leaf_id), "below leaf").await;
        assert_eq!(app.comments.get(comment_id(&middle)).unwrap().reply_count, 1);

        let response = app
            .router
            .oneshot(empty_request("DELETE", &format!("/{}", leaf_id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(app.comments.get(comment_id(&middle)).unwrap().reply_count, 0);
        assert_eq!(app.comments.get(comment_id(&root)).unwrap().reply_count, 1);
        assert_eq!(app.comments.len(), 2);
    }

    #[tokio::test]
    async fn test_listing_paginates_top_level_only() {
        let app = app();
        let alice = app.writers.seed("Alice", "alice@example.com");
        let token = token_for(alice.id);
        let blog = app.comments.add_blog(alice.id, "Blog one");
        let mut first = Value::Null;
        for i in 0..3 {
            let c = post_comment(&app.router, &token, blog, None, &format!("comment {}", i)).await;
            if i == 0 {
                first = c;
            }
        }
        post_comment(&app.router, &token, blog, first["id"].as_str(), "a reply").await;

        let response = app
            .router
            .oneshot(empty_request("GET", &format!("/blog/{}?page=2&limit=2", blog), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["totalPages"], 2);
        assert_eq!(body["data"]["currentPage"], 2);
        let page = body["data"]["comments"].as_array().unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["content"], "comment 0");
        assert_eq!(page[0]["replies"][0]["content"], "a reply");
    }

    #[tokio::test]
    async fn test_write_routes_require_token() {
        let app = app();
        let response = app
            .router
            .oneshot(json_request(
                "POST",
                "/",
                json!({"content": "hi", "blog": BlogId::new().to_string()}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
