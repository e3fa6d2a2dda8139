//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::{BlogId, WriterId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{Blog, BlogView, ToggleOutcome};
use crate::domain::repository::{BlogQuery, BlogRepository, BlogSet};
use crate::domain::value_object::{
    content::{Content, Excerpt},
    tags::Tags,
    title::Title,
};
use crate::error::BlogResult;

const BLOG_VIEW_SELECT: &str = r#"
    SELECT
        b.id,
        b.title,
        b.content,
        b.excerpt,
        b.cover_image,
        b.tags,
        b.is_published,
        b.published_at,
        b.writer_id,
        b.likes,
        b.favorites,
        b.created_at,
        b.updated_at,
        w.name AS writer_name,
        w.email AS writer_email,
        w.profile_image AS writer_profile_image
    FROM blogs b
    JOIN writers w ON w.id = b.writer_id
"#;

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BlogRepository for PgBlogRepository {
    async fn create(&self, blog: &Blog) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blogs (
                id,
                title,
                content,
                excerpt,
                cover_image,
                tags,
                is_published,
                published_at,
                writer_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(blog.id.as_uuid())
        .bind(blog.title.as_str())
        .bind(blog.content.as_str())
        .bind(blog.excerpt.as_str())
        .bind(blog.cover_image.as_deref())
        .bind(blog.tags.as_slice())
        .bind(blog.is_published)
        .bind(blog.published_at)
        .bind(blog.writer_id.as_uuid())
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: BlogId) -> BlogResult<Option<BlogView>> {
        let sql = format!("{BLOG_VIEW_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BlogViewRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BlogViewRow::into_view))
    }

    async fn list(&self, query: &BlogQuery) -> BlogResult<(Vec<BlogView>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM blogs b WHERE TRUE");
        push_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(BLOG_VIEW_SELECT);
        select.push(" WHERE TRUE");
        push_filters(&mut select, query);
        select.push(" ORDER BY ");
        select.push(query.spec.sort.order_by("b.id"));
        select.push(" LIMIT ");
        select.push_bind(query.spec.page.limit_i64());
        select.push(" OFFSET ");
        select.push_bind(query.spec.page.offset());

        let rows = select.build_query_as::<BlogViewRow>().fetch_all(&self.pool).await?;

        Ok((
            rows.into_iter().map(BlogViewRow::into_view).collect(),
            total.max(0) as u64,
        ))
    }

    async fn update(&self, blog: &Blog) -> BlogResult<()> {
        sqlx::query(
            r#"
            UPDATE blogs SET
                title = $2,
                content = $3,
                excerpt = $4,
                cover_image = $5,
                tags = $6,
                is_published = $7,
                published_at = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(blog.id.as_uuid())
        .bind(blog.title.as_str())
        .bind(blog.content.as_str())
        .bind(blog.excerpt.as_str())
        .bind(blog.cover_image.as_deref())
        .bind(blog.tags.as_slice())
        .bind(blog.is_published)
        .bind(blog.published_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: BlogId) -> BlogResult<bool> {
        let deleted = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn toggle(
        &self,
        id: BlogId,
        set: BlogSet,
        writer_id: WriterId,
    ) -> BlogResult<Option<ToggleOutcome>> {
        let column = set.column();
        // Single statement: membership test and array rewrite see the same row.
        let sql = format!(
            "UPDATE blogs SET {column} = CASE \
                 WHEN $2 = ANY({column}) THEN array_remove({column}, $2) \
                 ELSE array_append({column}, $2) \
             END \
             WHERE id = $1 \
             RETURNING $2 = ANY({column}) AS active, cardinality({column}) AS count"
        );

        let row = sqlx::query_as::<_, (bool, i32)>(&sql)
            .bind(id.as_uuid())
            .bind(writer_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(active, count)| ToggleOutcome {
            active,
            count: count.max(0) as u64,
        }))
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &BlogQuery) {
    if let Some(search) = &query.spec.search {
        let pattern = search.like_pattern();
        qb.push(" AND (b.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR b.content ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR EXISTS (SELECT 1 FROM unnest(b.tags) AS tag WHERE tag ILIKE ");
        qb.push_bind(pattern);
        qb.push("))");
    }
    if let Some(writer_id) = query.writer_id {
        qb.push(" AND b.writer_id = ");
        qb.push_bind(writer_id.into_uuid());
    }
    if let Some(is_published) = query.is_published {
        qb.push(" AND b.is_published = ");
        qb.push_bind(is_published);
    }
    if let Some((set, writer_id)) = query.member_of {
        qb.push(" AND ");
        qb.push_bind(writer_id.into_uuid());
        qb.push(format!(" = ANY(b.{})", set.column()));
    }
}

#[derive(sqlx::FromRow)]
struct BlogViewRow {
    id: Uuid,
    title: String,
    content: String,
    excerpt: String,
    cover_image: Option<String>,
    tags: Vec<String>,
    is_published: bool,
    published_at: Option<DateTime<Utc>>,
    writer_id: Uuid,
    likes: Vec<Uuid>,
    favorites: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    writer_name: String,
    writer_email: String,
    writer_profile_image: Option<String>,
}

impl BlogViewRow {
    fn into_view(self) -> BlogView {
        let writer_id = WriterId::from_uuid(self.writer_id);
        BlogView {
            blog: Blog {
                id: BlogId::from_uuid(self.id),
                title: Title::from_db(self.title),
                content: Content::from_db(self.content),
                excerpt: Excerpt::from_db(self.excerpt),
                cover_image: self.cover_image,
                tags: Tags::from_db(self.tags),
                is_published: self.is_published,
                published_at: self.published_at,
                writer_id,
                likes: self.likes.into_iter().map(WriterId::from_uuid).collect(),
                favorites: self.favorites.into_iter().map(WriterId::from_uuid).collect(),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            writer: AuthorSummary {
                id: writer_id,
                name: self.writer_name,
                email: self.writer_email,
                profile_image: self.writer_profile_image,
            },
        }
    }
}
