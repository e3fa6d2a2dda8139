//! Author summary
//!
//! Blogs and comments embed a small public view of the writer who made them.

use serde::Serialize;

use crate::id::WriterId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: WriterId,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}
