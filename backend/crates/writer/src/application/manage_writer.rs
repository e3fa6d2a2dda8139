//! Manage Writer Use Case
//!
//! Self-service mutations: profile update, deactivation and hard delete.
//! Every operation requires the caller to be the target writer.

use std::sync::Arc;

use kernel::id::WriterId;
use kernel::validation::{Validator, optional_web_url};

use crate::domain::entity::{SocialLinksPatch, Writer, WriterPatch};
use crate::domain::repository::{WriterBlogStats, WriterRepository};
use crate::domain::value_object::{bio::Bio, writer_name::WriterName};
use crate::error::{WriterError, WriterResult};

#[derive(Debug, Default)]
pub struct UpdateWriterInput {
    pub name: Option<String>,
    pub bio: Option<String>,
    /// `Some("")` clears the image
    pub profile_image: Option<String>,
    pub social_links: Option<SocialLinksInput>,
}

#[derive(Debug, Default)]
pub struct SocialLinksInput {
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

pub struct ManageWriterUseCase<W>
where
    W: WriterRepository + WriterBlogStats,
{
    repo: Arc<W>,
}

impl<W> ManageWriterUseCase<W>
where
    W: WriterRepository + WriterBlogStats,
{
    pub fn new(repo: Arc<W>) -> Self {
        Self { repo }
    }

    pub async fn update(
        &self,
        caller: WriterId,
        target: WriterId,
        input: UpdateWriterInput,
    ) -> WriterResult<Writer> {
        ensure_self(caller, target)?;
        let patch = validate_patch(input)?;

        let mut writer = self.load(target).await?;
        writer.apply(patch);
        self.repo.update(&writer).await?;

        tracing::info!(writer_id = %writer.id, "Writer profile updated");

        Ok(writer)
    }

    pub async fn deactivate(&self, caller: WriterId, target: WriterId) -> WriterResult<Writer> {
        ensure_self(caller, target)?;

        let mut writer = self.load(target).await?;
        writer.deactivate();
        self.repo.update(&writer).await?;

        tracing::info!(writer_id = %writer.id, "Writer deactivated");

        Ok(writer)
    }

    /// Hard delete; refused while the writer still owns blogs
    pub async fn delete(&self, caller: WriterId, target: WriterId) -> WriterResult<()> {
        ensure_self(caller, target)?;

        if self.repo.count_blogs(target, None).await? > 0 {
            return Err(WriterError::HasBlogs);
        }
        if !self.repo.delete(target).await? {
            return Err(WriterError::WriterNotFound);
        }

        tracing::info!(writer_id = %target, "Writer deleted");

        Ok(())
    }

    async fn load(&self, id: WriterId) -> WriterResult<Writer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(WriterError::WriterNotFound)
    }
}

fn ensure_self(caller: WriterId, target: WriterId) -> WriterResult<()> {
    if caller == target {
        Ok(())
    } else {
        Err(WriterError::NotSelf)
    }
}

fn validate_patch(input: UpdateWriterInput) -> WriterResult<WriterPatch> {
    let mut v = Validator::new();

    let name = input.name.and_then(|raw| v.check(WriterName::new(raw)));
    let bio = input.bio.and_then(|raw| v.check(Bio::new(raw)));
    let profile_image = input
        .profile_image
        .and_then(|raw| v.check(optional_web_url("profileImage", Some(&raw))));

    let social_links = input.social_links.map(|links| SocialLinksPatch {
        website: links
            .website
            .and_then(|raw| v.check(optional_web_url("socialLinks.website", Some(&raw)))),
        twitter: links
            .twitter
            .and_then(|raw| v.check(optional_web_url("socialLinks.twitter", Some(&raw)))),
        linkedin: links
            .linkedin
            .and_then(|raw| v.check(optional_web_url("socialLinks.linkedin", Some(&raw)))),
    });

    v.finish()?;

    Ok(WriterPatch {
        name,
        bio,
        profile_image,
        social_links,
    })
}
