//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, CommentId, WriterId};
use kernel::query::ListSpec;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Comment, CommentView, DeleteOutcome, LikeOutcome};
use crate::domain::repository::{CommentRepository, CommentSort};
use crate::domain::value_object::comment_content::CommentContent;
use crate::error::{CommentError, CommentResult};

const COMMENT_VIEW_SELECT: &str = r#"
    SELECT
        c.id,
        c.content,
        c.author_id,
        c.blog_id,
        c.parent_comment_id,
        c.is_approved,
        c.likes,
        c.reply_count,
        c.created_at,
        c.updated_at,
        w.name AS author_name,
        w.email AS author_email,
        w.profile_image AS author_profile_image,
        b.title AS blog_title
    FROM comments c
    LEFT JOIN writers w ON w.id = c.author_id
    LEFT JOIN blogs b ON b.id = c.blog_id
"#;

/// PostgreSQL-backed comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page(
        &self,
        filter: impl Fn(&mut QueryBuilder<'_, Postgres>),
        spec: &ListSpec<CommentSort>,
    ) -> CommentResult<(Vec<CommentView>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM comments c WHERE TRUE");
        filter(&mut count);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(COMMENT_VIEW_SELECT);
        select.push(" WHERE TRUE");
        filter(&mut select);
        select.push(" ORDER BY ");
        select.push(spec.sort.order_by("c.id"));
        select.push(" LIMIT ");
        select.push_bind(spec.page.limit_i64());
        select.push(" OFFSET ");
        select.push_bind(spec.page.offset());

        let rows = select
            .build_query_as::<CommentViewRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((
            rows.into_iter().map(CommentViewRow::into_view).collect(),
            total.max(0) as u64,
        ))
    }
}

impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &Comment) -> CommentResult<()> {
        let mut tx = self.pool.begin().await?;

        // Row lock keeps the blog alive until commit.
        let blog = sqlx::query_scalar::<_, Uuid>("SELECT id FROM blogs WHERE id = $1 FOR SHARE")
            .bind(comment.blog_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await?;
        if blog.is_none() {
            return Err(CommentError::BlogNotFound);
        }

        if let Some(parent_id) = comment.parent_id {
            let bumped = sqlx::query(
                r#"
                UPDATE comments
                SET reply_count = reply_count + 1
                WHERE id = $1 AND blog_id = $2
                "#,
            )
            .bind(parent_id.as_uuid())
            .bind(comment.blog_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();
            if bumped == 0 {
                return Err(CommentError::ParentNotFound);
            }
        }

        sqlx::query(
            r#"
            INSERT INTO comments (
                id,
                content,
                author_id,
                blog_id,
                parent_comment_id,
                is_approved,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.id.as_uuid())
        .bind(comment.content.as_str())
        .bind(comment.author_id.as_uuid())
        .bind(comment.blog_id.as_uuid())
        .bind(comment.parent_id.map(CommentId::into_uuid))
        .bind(comment.is_approved)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<CommentView>> {
        let sql = format!("{COMMENT_VIEW_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CommentViewRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CommentViewRow::into_view))
    }

    async fn replies(
        &self,
        parents: &[CommentId],
        approved_only: bool,
    ) -> CommentResult<Vec<CommentView>> {
        let parents: Vec<Uuid> = parents.iter().map(|id| id.into_uuid()).collect();
        let sql = format!(
            "{COMMENT_VIEW_SELECT} \
             WHERE c.parent_comment_id = ANY($1) AND (NOT $2 OR c.is_approved) \
             ORDER BY c.created_at ASC, c.id ASC"
        );
        let rows = sqlx::query_as::<_, CommentViewRow>(&sql)
            .bind(&parents)
            .bind(approved_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CommentViewRow::into_view).collect())
    }

    async fn list_top_level(
        &self,
        blog_id: BlogId,
        spec: &ListSpec<CommentSort>,
    ) -> CommentResult<(Vec<CommentView>, u64)> {
        let blog_id = blog_id.into_uuid();
        self.page(
            |qb| {
                qb.push(" AND c.blog_id = ");
                qb.push_bind(blog_id);
                qb.push(" AND c.parent_comment_id IS NULL AND c.is_approved");
            },
            spec,
        )
        .await
    }

    async fn list_by_author(
        &self,
        author_id: WriterId,
        spec: &ListSpec<CommentSort>,
    ) -> CommentResult<(Vec<CommentView>, u64)> {
        let author_id = author_id.into_uuid();
        self.page(
            |qb| {
                qb.push(" AND c.author_id = ");
                qb.push_bind(author_id);
            },
            spec,
        )
        .await
    }

    async fn update_content(
        &self,
        id: CommentId,
        author_id: WriterId,
        content: &CommentContent,
        now: DateTime<Utc>,
    ) -> CommentResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE comments
            SET content = $3, updated_at = $4
            WHERE id = $1 AND author_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(author_id.as_uuid())
        .bind(content.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(
        &self,
        id: CommentId,
        author_id: WriterId,
    ) -> CommentResult<Option<DeleteOutcome>> {
        let mut tx = self.pool.begin().await?;

        let target = sqlx::query_scalar::<_, Option<Uuid>>(
            "SELECT parent_comment_id FROM comments WHERE id = $1 AND author_id = $2 FOR UPDATE",
        )
        .bind(id.as_uuid())
        .bind(author_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(parent) = target else {
            return Ok(None);
        };

        // One level only: replies of replies keep a dangling parent.
        let replies_removed = sqlx::query("DELETE FROM comments WHERE parent_comment_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        if let Some(parent) = parent {
            sqlx::query("UPDATE comments SET reply_count = reply_count - 1 WHERE id = $1")
                .bind(parent)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(DeleteOutcome {
            replies_removed,
            parent_id: parent.map(CommentId::from_uuid),
        }))
    }

    async fn toggle_like(
        &self,
        id: CommentId,
        writer_id: WriterId,
    ) -> CommentResult<Option<LikeOutcome>> {
        let row = sqlx::query_as::<_, (bool, i32)>(
            r#"
            UPDATE comments SET likes = CASE
                WHEN $2 = ANY(likes) THEN array_remove(likes, $2)
                ELSE array_append(likes, $2)
            END
            WHERE id = $1
            RETURNING $2 = ANY(likes) AS liked, cardinality(likes) AS count
            "#,
        )
        .bind(id.as_uuid())
        .bind(writer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(liked, count)| LikeOutcome {
            liked,
            count: count.max(0) as u64,
        }))
    }

    async fn set_approved(&self, id: CommentId, approved: bool) -> CommentResult<bool> {
        let updated = sqlx::query(
            "UPDATE comments SET is_approved = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(approved)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}

#[derive(sqlx::FromRow)]
struct CommentViewRow {
    id: Uuid,
    content: String,
    author_id: Uuid,
    blog_id: Uuid,
    parent_comment_id: Option<Uuid>,
    is_approved: bool,
    likes: Vec<Uuid>,
    reply_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    author_email: Option<String>,
    author_profile_image: Option<String>,
    blog_title: Option<String>,
}

impl CommentViewRow {
    fn into_view(self) -> CommentView {
        let author_id = WriterId::from_uuid(self.author_id);
        CommentView {
            comment: Comment {
                id: CommentId::from_uuid(self.id),
                content: CommentContent::from_db(self.content),
                author_id,
                blog_id: BlogId::from_uuid(self.blog_id),
                parent_id: self.parent_comment_id.map(CommentId::from_uuid),
                is_approved: self.is_approved,
                likes: self.likes.into_iter().map(WriterId::from_uuid).collect(),
                reply_count: self.reply_count.max(0) as u32,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: match (self.author_name, self.author_email) {
                (Some(name), Some(email)) => Some(AuthorSummary {
                    id: author_id,
                    name,
                    email,
                    profile_image: self.author_profile_image,
                }),
                _ => None,
            },
            blog_title: self.blog_title,
        }
    }
}
