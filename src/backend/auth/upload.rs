/**
 * Avatar Upload Policy
 *
 * Guards avatar uploads during registration:
 *
 * 1. Only parts whose declared top-level media type is `image` are accepted;
 *    anything else is rejected before a single byte reaches the disk. SVG is
 *    refused too, since uploads are served back from the same origin.
 * 2. Accepted files get a server-generated name `user-<millis>-<seq>.<subtype>`;
 *    the client-supplied filename is ignored.
 * 3. Files land in one fixed, configured directory.
 *
 * The stored avatar reference is the public path `uploads/<filename>`, which
 * the router serves statically.
 */

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Public path prefix under which uploaded files are served
pub const PUBLIC_PREFIX: &str = "uploads";

/// Avatar reference used when registration carries no file
pub const AVATAR_PLACEHOLDER: &str = "uploads/avatar.jpg";

/// Image subtype that can carry script and is never stored
const SCRIPTABLE_SUBTYPE: &str = "svg+xml";

/// Upload rejection or storage failure
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("the file must be an image")]
    NotAnImage {
        /// Declared media type, for logging only
        content_type: String,
    },

    #[error("upload i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Server-assigned metadata for an accepted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    /// Top-level media type, always `image`
    pub media_type: String,
    /// Media subtype, used as the file extension
    pub subtype: String,
    /// Generated file name
    pub filename: String,
    /// Absolute or configured-relative destination path
    pub destination: PathBuf,
}

impl UploadDescriptor {
    /// Reference stored on the account and served back to clients
    pub fn avatar_ref(&self) -> String {
        format!("{}/{}", PUBLIC_PREFIX, self.filename)
    }
}

/// Accepts or rejects uploads and writes accepted ones to disk
#[derive(Debug)]
pub struct UploadPolicy {
    dir: PathBuf,
    sequence: AtomicU64,
}

/// Split `type/subtype; params` into lowercase parts, rejecting unsafe subtypes
fn split_media_type(content_type: &str) -> Option<(String, String)> {
    let essence = content_type.split(';').next()?.trim();
    let (top, sub) = essence.split_once('/')?;
    let sub = sub.trim();
    let safe = !sub.is_empty()
        && !sub.starts_with('.')
        && sub
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'));
    safe.then(|| (top.trim().to_ascii_lowercase(), sub.to_ascii_lowercase()))
}

impl UploadPolicy {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Destination directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate a part's declared media type and assign its storage name
    pub fn accept(&self, content_type: Option<&str>) -> Result<UploadDescriptor, UploadError> {
        let declared = content_type.unwrap_or_default();
        let Some((media_type, subtype)) = split_media_type(declared) else {
            return Err(UploadError::NotAnImage {
                content_type: declared.to_string(),
            });
        };
        if media_type != "image" || subtype == SCRIPTABLE_SUBTYPE {
            return Err(UploadError::NotAnImage {
                content_type: declared.to_string(),
            });
        }

        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let filename = format!("user-{}-{}.{}", millis, seq, subtype);
        let destination = self.dir.join(&filename);

        Ok(UploadDescriptor {
            media_type,
            subtype,
            filename,
            destination,
        })
    }

    /// Write an accepted upload to its destination
    pub async fn persist(&self, descriptor: &UploadDescriptor, bytes: &[u8]) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&descriptor.destination, bytes).await?;
        tracing::debug!("Stored avatar {} ({} bytes)", descriptor.filename, bytes.len());
        Ok(())
    }

    /// Remove a persisted upload whose registration did not complete
    pub async fn discard(&self, descriptor: &UploadDescriptor) {
        match tokio::fs::remove_file(&descriptor.destination).await {
            Ok(()) => tracing::info!("Removed orphaned avatar {}", descriptor.filename),
            Err(e) => tracing::warn!("Failed to remove orphaned avatar {}: {:?}", descriptor.filename, e),
        }
    }
}
