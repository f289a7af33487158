//! Content-root file resolution.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::media_type::media_type_for;

/// A read from the content root failed for a reason other than absence.
///
/// Absence is not an error at this layer: a missing file resolves to the
/// fallback document. Only the read itself failing (permissions, I/O, or
/// the fallback document being missing too) surfaces here.
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", .path.display())]
pub struct AssetError {
    /// Path whose read failed.
    pub path: PathBuf,
    /// Underlying filesystem error.
    #[source]
    pub source: io::Error,
}

/// A resolved asset, ready to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Path that was read, relative to the content root.
    pub path: PathBuf,
    /// Media type derived from the requested name.
    pub media_type: &'static str,
    /// Content-encoding marker, set when a compressed sibling was served.
    pub encoding: Option<&'static str>,
    /// True when the fallback document was substituted for a missing file.
    pub substituted: bool,
    /// File contents at response time.
    pub bytes: Vec<u8>,
}

/// Resolves request paths to files under a fixed content root.
///
/// Nothing is cached: every fetch reads the file fresh, so responses always
/// reflect current on-disk contents.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    default_document: String,
    fallback_document: String,
}

impl AssetStore {
    /// Create a store over `root`.
    ///
    /// `default_document` is substituted for the root path `/`;
    /// `fallback_document` is the body served when a requested file is absent.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        default_document: impl Into<String>,
        fallback_document: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            default_document: default_document.into(),
            fallback_document: fallback_document.into(),
        }
    }

    /// Content root this store resolves under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request path and read the asset's bytes.
    ///
    /// Resolution order: the exact file, then a `.gz` sibling (served with a
    /// gzip content-encoding marker, bytes passed through untouched), then
    /// the fallback document. A fallback substitution still reports the
    /// media type of the *requested* name, matching the device firmware's
    /// behavior.
    ///
    /// # Errors
    /// Returns [`AssetError`] when a read fails for any reason other than
    /// the file being absent. A missing fallback document fails the same
    /// way: there is nothing left to substitute.
    pub async fn fetch(&self, request_path: &str) -> Result<Asset, AssetError> {
        let relative = if request_path == "/" {
            self.default_document.clone()
        } else {
            request_path.trim_start_matches('/').to_owned()
        };
        let path = self.root.join(&relative);
        let media_type = media_type_for(&path);

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::info!("sent {relative} => {media_type}");
                Ok(Asset {
                    path: relative.into(),
                    media_type,
                    encoding: None,
                    substituted: false,
                    bytes,
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.fetch_missing(&relative, media_type).await
            }
            Err(source) => {
                tracing::warn!("error {relative} => {media_type}: {source}");
                Err(AssetError { path, source })
            }
        }
    }

    /// Second-chance resolution once the exact file is known to be absent.
    async fn fetch_missing(
        &self,
        relative: &str,
        media_type: &'static str,
    ) -> Result<Asset, AssetError> {
        // Deployment images may carry only the compressed form of an asset.
        let gz_relative = format!("{relative}.gz");
        let gz_path = self.root.join(&gz_relative);
        match tokio::fs::read(&gz_path).await {
            Ok(bytes) => {
                tracing::info!("sent {gz_relative} => {media_type} (gzip)");
                return Ok(Asset {
                    path: gz_relative.into(),
                    media_type,
                    encoding: Some("gzip"),
                    substituted: false,
                    bytes,
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                tracing::warn!("error {gz_relative} => {media_type}: {source}");
                return Err(AssetError {
                    path: gz_path,
                    source,
                });
            }
        }

        // Absence is reported as success with the fallback document's body,
        // still labelled with the requested media type.
        let fallback_path = self.root.join(&self.fallback_document);
        match tokio::fs::read(&fallback_path).await {
            Ok(bytes) => {
                tracing::info!(
                    "missing {relative} => {media_type}, substituting {}",
                    self.fallback_document
                );
                Ok(Asset {
                    path: self.fallback_document.clone().into(),
                    media_type,
                    encoding: None,
                    substituted: true,
                    bytes,
                })
            }
            Err(source) => {
                tracing::warn!(
                    "error reading fallback {}: {source}",
                    self.fallback_document
                );
                Err(AssetError {
                    path: fallback_path,
                    source,
                })
            }
        }
    }
}
