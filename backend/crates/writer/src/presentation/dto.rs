//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::WriterId;
use kernel::query::ListParams;
use serde::{Deserialize, Serialize};

use crate::application::{AuthOutput, SocialLinksInput, UpdateWriterInput};
use crate::domain::entity::{BlogStats, SocialLinks, Writer, WriterListing};

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup and login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub writer: WriterResponse,
    pub token: String,
    pub writer_id: WriterId,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            writer_id: output.writer.id,
            writer: WriterResponse::from(&output.writer),
            token: output.token,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub token: String,
    pub writer: WriterResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentWriterResponse {
    pub writer: WriterResponse,
}

// ============================================================================
// Writer
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinksDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl From<&SocialLinks> for SocialLinksDto {
    fn from(links: &SocialLinks) -> Self {
        Self {
            website: links.website.clone(),
            twitter: links.twitter.clone(),
            linkedin: links.linkedin.clone(),
        }
    }
}

/// Public writer profile; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterResponse {
    pub id: WriterId,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub profile_image: Option<String>,
    pub social_links: SocialLinksDto,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_count: Option<u64>,
}

impl From<&Writer> for WriterResponse {
    fn from(writer: &Writer) -> Self {
        Self {
            id: writer.id,
            name: writer.name.to_string(),
            email: writer.email.to_string(),
            bio: writer.bio.as_str().to_string(),
            profile_image: writer.profile_image.clone(),
            social_links: SocialLinksDto::from(&writer.social_links),
            is_active: writer.is_active,
            created_at: writer.created_at,
            updated_at: writer.updated_at,
            blog_count: None,
        }
    }
}

impl From<WriterListing> for WriterResponse {
    fn from(listing: WriterListing) -> Self {
        Self {
            blog_count: Some(listing.blog_count),
            ..Self::from(&listing.writer)
        }
    }
}

/// PUT /api/writer/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWriterRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub social_links: Option<SocialLinksDto>,
}

impl From<UpdateWriterRequest> for UpdateWriterInput {
    fn from(req: UpdateWriterRequest) -> Self {
        Self {
            name: req.name,
            bio: req.bio,
            profile_image: req.profile_image,
            social_links: req.social_links.map(|links| SocialLinksInput {
                website: links.website,
                twitter: links.twitter,
                linkedin: links.linkedin,
            }),
        }
    }
}

/// GET /api/writer query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriterListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub is_active: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total_blogs: u64,
    pub published_blogs: u64,
    pub draft_blogs: u64,
}

impl From<BlogStats> for StatsDto {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_blogs: stats.total_blogs,
            published_blogs: stats.published_blogs,
            draft_blogs: stats.draft_blogs(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WriterStatsResponse {
    pub writer: WriterResponse,
    pub stats: StatsDto,
}
