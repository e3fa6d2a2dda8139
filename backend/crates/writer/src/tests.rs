//! Router-level tests for the writer crate
//!
//! Handlers run against an in-memory repository through `oneshot`.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, Response, header};
    use kernel::id::WriterId;
    use platform::rate_limit::{InMemoryRateLimitStore, RateLimitConfig, RateLimiter};
    use serde_json::Value;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::{Writer, WriterListing};
    use crate::domain::repository::{WriterBlogStats, WriterQuery, WriterRepository};
    use crate::domain::value_object::email::Email;
    use crate::error::{WriterError, WriterResult};
    use crate::presentation::router::{auth_router_generic, writer_router_generic};

    pub const SECRET: &[u8] = b"writer-test-secret";

    #[derive(Default)]
    pub struct MemoryWriterRepository {
        writers: Mutex<Vec<Writer>>,
        /// writer -> (total, published)
        blogs: Mutex<HashMap<WriterId, (u64, u64)>>,
    }

    impl MemoryWriterRepository {
        pub fn set_blogs(&self, writer_id: WriterId, total: u64, published: u64) {
            self.blogs
                .lock()
                .unwrap()
                .insert(writer_id, (total, published));
        }

        pub fn get(&self, id: WriterId) -> Option<Writer> {
            self.writers
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id == id)
                .cloned()
        }
    }

    impl WriterRepository for MemoryWriterRepository {
        async fn create(&self, writer: &Writer) -> WriterResult<()> {
            let mut writers = self.writers.lock().unwrap();
            if writers.iter().any(|w| w.email == writer.email) {
                return Err(WriterError::EmailTaken);
            }
            writers.push(writer.clone());
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

        async fn list(&self, query: &WriterQuery) -> WriterResult<(Vec<WriterListing>, u64)> {
            let blogs = self.blogs.lock().unwrap().clone();
            let mut matching: Vec<Writer> = self
                .writers
                .lock()
                .unwrap()
                .iter()
                .filter(|w| query.is_active.is_none_or(|active| w.is_active == active))
                .filter(|w| {
                    query.spec.search.as_ref().is_none_or(|s| {
                        s.matches(w.name.as_str()) || s.matches(w.email.as_str())
                    })
                })
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            let total = matching.len() as u64;
            let items = matching
                .into_iter()
                .skip(query.spec.page.offset() as usize)
                .take(query.spec.page.limit as usize)
                .map(|writer| WriterListing {
                    blog_count: blogs.get(&writer.id).map_or(0, |b| b.0),
                    writer,
                })
                .collect();
            Ok((items, total))
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

    impl WriterBlogStats for MemoryWriterRepository {
        async fn count_blogs(
            &self,
            writer_id: WriterId,
            published: Option<bool>,
        ) -> WriterResult<u64> {
            let (total, live) = self
                .blogs
                .lock()
                .unwrap()
                .get(&writer_id)
                .copied()
                .unwrap_or((0, 0));
            Ok(match published {
                None => total,
                Some(true) => live,
                Some(false) => total - live,
            })
        }
    }

    pub fn config() -> AuthConfig {
        AuthConfig::with_secret(SECRET)
    }

    pub fn auth_app(repo: Arc<MemoryWriterRepository>, max_attempts: u32) -> Router {
        let limiter = RateLimiter::new(
            Arc::new(InMemoryRateLimitStore::new()),
            RateLimitConfig::new(max_attempts, 900),
            "auth",
            "Too many authentication attempts, please try again later.",
        );
        auth_router_generic(repo, config(), limiter)
    }

    pub fn writer_app(repo: Arc<MemoryWriterRepository>) -> Router {
        writer_router_generic(repo, config())
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
mod auth_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::support::*;

    fn signup_body() -> serde_json::Value {
        json!({
            "name": "Alice Smith",
            "email": "  Alice@Example.com ",
            "password": "Secret123"
        })
    }

    #[tokio::test]
    async fn test_signup_returns_token_and_hides_hash() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let app = auth_app(repo, 10);

        let response = app
            .oneshot(json_request("POST", "/signup", signup_body(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Writer registered successfully");
        assert_eq!(body["data"]["writer"]["email"], "alice@example.com");
        assert_eq!(body["data"]["writer"]["isActive"], true);
        assert!(body["data"]["writer"].get("passwordHash").is_none());
        assert_eq!(body["data"]["writerId"], body["data"]["writer"]["id"]);
        assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_signup_twice_conflicts() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let app = auth_app(repo, 10);

        let first = app
            .clone()
            .oneshot(json_request("POST", "/signup", signup_body(), None))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(json_request("POST", "/signup", signup_body(), None))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let body = body_json(second).await;
        assert_eq!(body["message"], "Writer with this email already exists");
    }

    #[tokio::test]
    async fn test_signup_reports_every_invalid_field() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 10);

        let response = app
            .oneshot(json_request(
                "POST",
                "/signup",
                json!({"name": "A", "email": "nope", "password": "short"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 10);

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_login_success_and_wrong_password() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let app = auth_app(repo, 10);

        app.clone()
            .oneshot(json_request("POST", "/signup", signup_body(), None))
            .await
            .unwrap();

        let ok = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "alice@example.com", "password": "Secret123"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(body_json(ok).await["message"], "Login successful");

        let wrong = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "alice@example.com", "password": "Wrong1234"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        let wrong_body = body_json(wrong).await;

        let unknown = app
            .oneshot(json_request(
                "POST",
                "/login",
                json!({"email": "nobody@example.com", "password": "Secret123"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(unknown).await, wrong_body);
    }

    #[tokio::test]
    async fn test_login_rate_limited() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 2);
        let attempt = || {
            json_request(
                "POST",
                "/login",
                json!({"email": "nobody@example.com", "password": "x"}),
                None,
            )
        };

        for _ in 0..2 {
            let response = app.clone().oneshot(attempt()).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let blocked = app.oneshot(attempt()).await.unwrap();
        assert_eq!(blocked.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(blocked.headers().contains_key("retry-after"));
        assert!(body_json(blocked).await["retryAfter"].as_u64().is_some());
    }

    #[tokio::test]
    async fn test_refresh_requires_token() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 10);

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/refresh", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Access token required");

        let response = app
            .oneshot(empty_request("POST", "/refresh", Some("garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_refresh_rejects_unknown_writer() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 10);
        let token = token_for(kernel::id::WriterId::new());

        let response = app
            .oneshot(empty_request("POST", "/refresh", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid or inactive writer");
    }

    #[tokio::test]
    async fn test_logout_is_stateless() {
        let app = auth_app(Arc::new(MemoryWriterRepository::default()), 10);
        let response = app
            .oneshot(empty_request("POST", "/logout", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Logged out successfully");
    }
}

#[cfg(test)]
mod writer_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::support::*;
    use crate::domain::entity::Writer;
    use crate::domain::repository::WriterRepository;
    use crate::domain::value_object::{
        bio::Bio,
        email::Email,
        writer_name::WriterName,
        writer_password::{RawPassword, WriterPassword},
    };

    async fn seed(repo: &MemoryWriterRepository, name: &str, email: &str) -> Writer {
        let raw = RawPassword::new("Secret123".to_string()).unwrap();
        let writer = Writer::new(
            WriterName::new(name).unwrap(),
            Email::new(email).unwrap(),
            WriterPassword::from_raw(&raw, None).unwrap(),
            Bio::default(),
        );
        repo.create(&writer).await.unwrap();
        writer
    }

    #[tokio::test]
    async fn test_get_writer_includes_blog_count() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let alice = seed(&repo, "Alice", "alice@example.com").await;
        repo.set_blogs(alice.id, 3, 2);
        let app = writer_app(repo);

        let response = app
            .clone()
            .oneshot(empty_request("GET", &format!("/{}", alice.id), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["blogCount"], 3);

        let response = app
            .oneshot(empty_request("GET", &format!("/{}/stats", alice.id), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(
            body["data"]["stats"],
            json!({"totalBlogs": 3, "publishedBlogs": 2, "draftBlogs": 1})
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_validation_error() {
        let app = writer_app(Arc::new(MemoryWriterRepository::default()));

        let response = app
            .oneshot(empty_request("GET", "/not-a-uuid", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["field"], "id");
        assert_eq!(body["errors"][0]["message"], "Invalid ID format");
    }

    #[tokio::test]
    async fn test_missing_writer_is_not_found() {
        let app = writer_app(Arc::new(MemoryWriterRepository::default()));

        let response = app
            .oneshot(empty_request(
                "GET",
                &format!("/{}", kernel::id::WriterId::new()),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_writers_paginates_and_searches() {
        let repo = Arc::new(MemoryWriterRepository::default());
        seed(&repo, "Alice", "alice@example.com").await;
        seed(&repo, "Bob", "bob@example.com").await;
        seed(&repo, "Carol", "carol@example.com").await;
        let app = writer_app(repo);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/?page=2&limit=2", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["totalPages"], 2);
        assert_eq!(body["data"]["currentPage"], 2);
        assert_eq!(body["data"]["writers"].as_array().unwrap().len(), 1);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/?search=BOB", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["writers"][0]["name"], "Bob");

        let response = app
            .oneshot(empty_request("GET", "/?limit=0&sortBy=password", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["limit", "sortBy"]);
    }

    #[tokio::test]
    async fn test_update_is_self_only() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let alice = seed(&repo, "Alice", "alice@example.com").await;
        let bob = seed(&repo, "Bob", "bob@example.com").await;
        let app = writer_app(repo.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{}", alice.id),
                json!({"bio": "hijacked"}),
                Some(&token_for(bob.id)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await["message"],
            "Access denied: You can only modify your own resources"
        );

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/{}", alice.id),
                json!({"bio": "Writes about Rust", "socialLinks": {"website": "https://alice.dev"}}),
                Some(&token_for(alice.id)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["bio"], "Writes about Rust");
        assert_eq!(body["data"]["socialLinks"]["website"], "https://alice.dev");
        assert_eq!(repo.get(alice.id).unwrap().bio.as_str(), "Writes about Rust");
    }

    #[tokio::test]
    async fn test_update_without_token_is_unauthorized() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let alice = seed(&repo, "Alice", "alice@example.com").await;
        let app = writer_app(repo);

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/{}", alice.id),
                json!({"bio": "x"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivated_writer_token_is_rejected() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let alice = seed(&repo, "Alice", "alice@example.com").await;
        let token = token_for(alice.id);
        let app = writer_app(repo.clone());

        let response = app
            .clone()
            .oneshot(empty_request(
                "PATCH",
                &format!("/{}/deactivate", alice.id),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["isActive"], false);
        assert!(!repo.get(alice.id).unwrap().is_active);

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/{}", alice.id),
                json!({"bio": "back"}),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Invalid or inactive writer");
    }

    #[tokio::test]
    async fn test_delete_blocked_while_writer_has_blogs() {
        let repo = Arc::new(MemoryWriterRepository::default());
        let alice = seed(&repo, "Alice", "alice@example.com").await;
        repo.set_blogs(alice.id, 1, 0);
        let token = token_for(alice.id);
        let app = writer_app(repo.clone());

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/{}", alice.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        repo.set_blogs(alice.id, 0, 0);
        let response = app
            .oneshot(empty_request("DELETE", &format!("/{}", alice.id), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Writer deleted successfully");
        assert!(repo.get(alice.id).is_none());
    }
}
