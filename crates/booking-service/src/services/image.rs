//! Image lifecycle
//!
//! Entities store relative image paths. When a path is replaced or its
//! owner deleted, the service that made the change calls [`ImageService`]
//! so the old file is removed. Default placeholders are never deleted.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use booking_core::{DomainError, ImageKind, ImageStore, RepoResult};
use tracing::{debug, instrument, warn};

use super::context::ServiceContext;

/// Image files on the local filesystem, resolved under an upload root
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `path` under the root, refusing anything that could escape it
    fn resolve(&self, path: &str) -> RepoResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));

        if path.is_empty() || escapes {
            return Err(DomainError::StorageError(format!("invalid image path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn remove(&self, path: &str) -> RepoResult<bool> {
        let full = self.resolve(path)?;

        match tokio::fs::remove_file(&full).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::StorageError(format!(
                "failed to remove {}: {e}",
                full.display()
            ))),
        }
    }
}

/// Explicit replace/delete operations over the context's [`ImageStore`]
pub struct ImageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ImageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The path that will be stored for a requested image.
    /// An empty or missing request means "reset to the default".
    pub fn target_path(kind: ImageKind, requested: Option<&str>) -> String {
        match requested.map(str::trim) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => kind.default_path().to_string(),
        }
    }

    /// Swap `current` for `new`, returning the new path.
    ///
    /// The old file is removed when it changes and is not the default.
    /// Callers persist [`Self::target_path`] before calling this, so a failed
    /// write never leaves a row pointing at a deleted file.
    #[instrument(skip(self))]
    pub async fn replace_image(&self, kind: ImageKind, current: &str, new: Option<&str>) -> String {
        let next = Self::target_path(kind, new);

        if next != current {
            self.remove_quietly(kind, current).await;
        }
        next
    }

    /// Remove the file at `current` unless it is the default
    #[instrument(skip(self))]
    pub async fn delete_image(&self, kind: ImageKind, current: &str) {
        self.remove_quietly(kind, current).await;
    }

    // The owning row has already changed by the time we get here, so a
    // storage failure is logged rather than surfaced.
    async fn remove_quietly(&self, kind: ImageKind, path: &str) {
        if path.is_empty() || kind.is_default(path) {
            return;
        }

        match self.ctx.image_store().remove(path).await {
            Ok(true) => debug!(path, "Removed image"),
            Ok(false) => debug!(path, "Image already absent"),
            Err(e) => warn!(path, error = %e, "Failed to remove image"),
        }
    }
}
