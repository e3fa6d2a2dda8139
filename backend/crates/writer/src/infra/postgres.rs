//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::WriterId;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::{SocialLinks, Writer, WriterListing};
use crate::domain::repository::{WriterBlogStats, WriterQuery, WriterRepository};
use crate::domain::value_object::{
    bio::Bio, email::Email, writer_name::WriterName, writer_password::WriterPassword,
};
use crate::error::{WriterError, WriterResult};

const WRITER_COLUMNS: &str = r#"
    w.id,
    w.name,
    w.email,
    w.password_hash,
    w.bio,
    w.profile_image,
    w.website,
    w.twitter,
    w.linkedin,
    w.is_active,
    w.created_at,
    w.updated_at
"#;

/// PostgreSQL-backed writer repository
#[derive(Clone)]
pub struct PgWriterRepository {
    pool: PgPool,
}

impl PgWriterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> WriterResult<Option<Writer>> {
        let sql = format!("SELECT {WRITER_COLUMNS} FROM writers w WHERE {column} = $1");
        let row = sqlx::query_as::<_, WriterRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(WriterRow::into_writer).transpose()
    }
}

// ============================================================================
// Writer Repository Implementation
// ============================================================================

impl WriterRepository for PgWriterRepository {
    async fn create(&self, writer: &Writer) -> WriterResult<()> {
        sqlx::query(
            r#"
            INSERT INTO writers (
                id,
                name,
                email,
                password_hash,
                bio,
                profile_image,
                website,
                twitter,
                linkedin,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(writer.id.as_uuid())
        .bind(writer.name.as_str())
        .bind(writer.email.as_str())
        .bind(writer.password_hash.as_phc_string())
        .bind(writer.bio.as_str())
        .bind(writer.profile_image.as_deref())
        .bind(writer.social_links.website.as_deref())
        .bind(writer.social_links.twitter.as_deref())
        .bind(writer.social_links.linkedin.as_deref())
        .bind(writer.is_active)
        .bind(writer.created_at)
        .bind(writer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => WriterError::EmailTaken,
            other => WriterError::Database(other),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: WriterId) -> WriterResult<Option<Writer>> {
        let sql = format!("SELECT {WRITER_COLUMNS} FROM writers w WHERE w.id = $1");
        let row = sqlx::query_as::<_, WriterRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(WriterRow::into_writer).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> WriterResult<Option<Writer>> {
        self.find_one("w.email", email.as_str()).await
    }

    async fn exists_by_email(&self, email: &Email) -> WriterResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM writers WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self, query: &WriterQuery) -> WriterResult<(Vec<WriterListing>, u64)> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM writers w WHERE TRUE");
        push_filters(&mut count, query);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {WRITER_COLUMNS}, \
             (SELECT COUNT(*) FROM blogs b WHERE b.writer_id = w.id) AS blog_count \
             FROM writers w WHERE TRUE"
        ));
        push_filters(&mut select, query);
        select.push(" ORDER BY ");
        select.push(query.spec.sort.order_by("w.id"));
        select.push(" LIMIT ");
        select.push_bind(query.spec.page.limit_i64());
        select.push(" OFFSET ");
        select.push_bind(query.spec.page.offset());

        let rows = select.build_query_as::<WriterListingRow>().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(WriterListingRow::into_listing)
            .collect::<WriterResult<Vec<_>>>()?;

        Ok((items, total.max(0) as u64))
    }

    async fn update(&self, writer: &Writer) -> WriterResult<()> {
        sqlx::query(
            r#"
            UPDATE writers SET
                name = $2,
                bio = $3,
                profile_image = $4,
                website = $5,
                twitter = $6,
                linkedin = $7,
                is_active = $8,
                updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(writer.id.as_uuid())
        .bind(writer.name.as_str())
        .bind(writer.bio.as_str())
        .bind(writer.profile_image.as_deref())
        .bind(writer.social_links.website.as_deref())
        .bind(writer.social_links.twitter.as_deref())
        .bind(writer.social_links.linkedin.as_deref())
        .bind(writer.is_active)
        .bind(writer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: WriterId) -> WriterResult<bool> {
        let deleted = sqlx::query("DELETE FROM writers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                // A blog created between the count and the delete
                sqlx::Error::Database(db) if db.constraint() == Some("blogs_writer_id_fkey") => {
                    WriterError::HasBlogs
                }
                other => WriterError::Database(other),
            })?
            .rows_affected();

        Ok(deleted > 0)
    }
}

impl WriterBlogStats for PgWriterRepository {
    async fn count_blogs(&self, writer_id: WriterId, published: Option<bool>) -> WriterResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM blogs WHERE writer_id = $1 AND ($2::BOOLEAN IS NULL OR is_published = $2)",
        )
        .bind(writer_id.as_uuid())
        .bind(published)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &WriterQuery) {
    if let Some(search) = &query.spec.search {
        let pattern = search.like_pattern();
        qb.push(" AND (w.name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR w.email ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(is_active) = query.is_active {
        qb.push(" AND w.is_active = ");
        qb.push_bind(is_active);
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct WriterRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    bio: String,
    profile_image: Option<String>,
    website: Option<String>,
    twitter: Option<String>,
    linkedin: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WriterRow {
    fn into_writer(self) -> WriterResult<Writer> {
        Ok(Writer {
            id: WriterId::from(self.id),
            name: WriterName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash: WriterPassword::from_phc_string(self.password_hash)?,
            bio: Bio::from_db(self.bio),
            profile_image: self.profile_image,
            social_links: SocialLinks {
                website: self.website,
                twitter: self.twitter,
                linkedin: self.linkedin,
            },
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WriterListingRow {
    #[sqlx(flatten)]
    writer: WriterRow,
    blog_count: i64,
}

impl WriterListingRow {
    fn into_listing(self) -> WriterResult<WriterListing> {
        Ok(WriterListing {
            writer: self.writer.into_writer()?,
            blog_count: self.blog_count.max(0) as u64,
        })
    }
}
