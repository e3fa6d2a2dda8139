//! Blog Tags

use kernel::error::app_error::AppResult;
use kernel::validation::length_between;

pub const TAG_MIN_LENGTH: usize = 1;
pub const TAG_MAX_LENGTH: usize = 50;

/// Ordered tag list; each tag 1 to 50 characters after trimming
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new(raw: Vec<String>) -> AppResult<Self> {
        raw.iter()
            .map(|tag| {
                length_between(
                    "tags",
                    tag,
                    TAG_MIN_LENGTH,
                    TAG_MAX_LENGTH,
                    "Each tag must be between 1 and 50 characters",
                )
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Self)
    }

    pub fn from_db(tags: Vec<String>) -> Self {
        Self(tags)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_trimmed() {
        let tags = Tags::new(vec![" rust ".into(), "axum".into()]).unwrap();
        assert_eq!(tags.as_slice(), ["rust", "axum"]);
    }

    #[test]
    fn test_tag_bounds() {
        assert!(Tags::new(vec!["  ".into()]).is_err());
        assert!(Tags::new(vec!["t".repeat(51)]).is_err());
        assert!(Tags::new(Vec::new()).unwrap().as_slice().is_empty());
    }
}
