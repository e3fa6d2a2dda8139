//! Writer Entity
//!
//! A registered author. Owns blogs and comments; soft-deleted through
//! `is_active`.

use chrono::{DateTime, Utc};
use kernel::author::AuthorSummary;
use kernel::id::WriterId;

use crate::domain::value_object::{
    bio::Bio, email::Email, writer_name::WriterName, writer_password::WriterPassword,
};

/// Optional profile links; each is an absolute http(s) URL when present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Writer {
    pub id: WriterId,
    pub name: WriterName,
    pub email: Email,
    /// Never serialized
    pub password_hash: WriterPassword,
    pub bio: Bio,
    pub profile_image: Option<String>,
    pub social_links: SocialLinks,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Writer {
    /// New active writer with empty profile
    pub fn new(name: WriterName, email: Email, password_hash: WriterPassword, bio: Bio) -> Self {
        let now = Utc::now();
        Self {
            id: WriterId::new(),
            name,
            email,
            password_hash,
            bio,
            profile_image: None,
            social_links: SocialLinks::default(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Apply a validated profile patch; absent fields stay unchanged
    pub fn apply(&mut self, patch: WriterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(profile_image) = patch.profile_image {
            self.profile_image = profile_image;
        }
        if let Some(links) = patch.social_links {
            if let Some(website) = links.website {
                self.social_links.website = website;
            }
            if let Some(twitter) = links.twitter {
                self.social_links.twitter = twitter;
            }
            if let Some(linkedin) = links.linkedin {
                self.social_links.linkedin = linkedin;
            }
        }
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn summary(&self) -> AuthorSummary {
        AuthorSummary {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.to_string(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Validated partial update
///
/// The outer `Option` means "field present in the request"; the inner one
/// (for URLs) means "set" versus "clear".
#[derive(Debug, Clone, Default)]
pub struct WriterPatch {
    pub name: Option<WriterName>,
    pub bio: Option<Bio>,
    pub profile_image: Option<Option<String>>,
    pub social_links: Option<SocialLinksPatch>,
}

#[derive(Debug, Clone, Default)]
pub struct SocialLinksPatch {
    pub website: Option<Option<String>>,
    pub twitter: Option<Option<String>>,
    pub linkedin: Option<Option<String>>,
}

/// Writer together with the number of blogs they own
#[derive(Debug, Clone)]
pub struct WriterListing {
    pub writer: Writer,
    pub blog_count: u64,
}

/// Blog counters shown on the stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlogStats {
    pub total_blogs: u64,
    pub published_blogs: u64,
}

impl BlogStats {
    pub fn draft_blogs(&self) -> u64 {
        self.total_blogs.saturating_sub(self.published_blogs)
    }
}
