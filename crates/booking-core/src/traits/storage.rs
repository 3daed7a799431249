//! Image storage port
//!
//! Entities only hold relative paths; the bytes live in an [`ImageStore`].
//! Cleanup of replaced or orphaned files is an explicit call made by the
//! services that change those paths.

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Which kind of image a path refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    EventImage,
    ProfilePicture,
}

impl ImageKind {
    /// Placeholder used when no image was supplied. Never deleted.
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::EventImage => "event_images/default.png",
            Self::ProfilePicture => "profile_pictures/default.png",
        }
    }

    /// Directory (relative to the storage root) holding this kind of image
    pub const fn directory(self) -> &'static str {
        match self {
            Self::EventImage => "event_images",
            Self::ProfilePicture => "profile_pictures",
        }
    }

    #[inline]
    pub fn is_default(self, path: &str) -> bool {
        path == self.default_path()
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Delete the file at `path`.
    ///
    /// Returns `false` when there was nothing to delete.
    async fn remove(&self, path: &str) -> RepoResult<bool>;
}
