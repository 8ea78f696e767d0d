// src/assets/service.rs — Plugin script lifecycle over the asset store
//
// Every store call is blocking filesystem I/O and runs on tokio's blocking
// pool. Store errors stop here and come back out as response envelopes.

use axum::body::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

use crate::api::types::{ApiResponse, ResponseCode};
use crate::assets::name::AssetName;
use crate::assets::store::{AssetStore, StagedScript};
use crate::infra::errors::{LucenceError, Result};

/// Reply to an upload whose name is already taken.
pub const CONFLICT_MESSAGE: &str = "Plugin has existed.";

/// Cheap to clone; all clones share one store root.
#[derive(Debug, Clone)]
pub struct AssetService {
    store: Arc<AssetStore>,
}

impl AssetService {
    /// Activation hook: prepare the root directory and hand back the service.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let store = AssetStore::new(root);
        store.init()?;
        tracing::info!("detected plugin directory {}", store.root().display());
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub fn root(&self) -> &Path {
        self.store.root()
    }

    /// Store a new script. Fails if the name is taken; existing content is kept.
    pub async fn upload_script(&self, name: &str, content: Bytes) -> ApiResponse<()> {
        let mut upload = match self.begin_upload(name).await {
            Ok(upload) => upload,
            Err(denied) => return denied,
        };
        if let Err(e) = upload.write_chunk(&content).await {
            return upload_failure(upload.name(), e);
        }
        upload.finish().await
    }

    /// Start a streamed upload of `name`. A taken or invalid name is
    /// rejected here, before any body bytes are read.
    pub async fn begin_upload(
        &self,
        name: &str,
    ) -> std::result::Result<ScriptUpload, ApiResponse<()>> {
        let name = AssetName::parse(name).map_err(|e| ApiResponse::from_error(&e))?;
        let store = Arc::clone(&self.store);
        let target = name.clone();
        let staged = match blocking(move || store.stage(&target)).await {
            Ok(staged) => staged,
            Err(e) => return Err(upload_failure(&name, e)),
        };
        let file = match staged.as_file().try_clone() {
            Ok(file) => tokio::fs::File::from_std(file),
            Err(e) => return Err(upload_failure(&name, e.into())),
        };
        Ok(ScriptUpload {
            store: Arc::clone(&self.store),
            staged,
            file,
            received: 0,
        })
    }

    /// Path of the script for the HTTP layer to stream back.
    pub fn fetch_script_path(&self, name: &str) -> Result<PathBuf> {
        let name = AssetName::parse(name)?;
        Ok(self.store.resolve_path(&name))
    }

    pub async fn read_script(&self, name: &str) -> Result<Vec<u8>> {
        let name = AssetName::parse(name)?;
        let store = Arc::clone(&self.store);
        blocking(move || store.read(&name)).await
    }

    /// Remove a script. Succeeds whether or not it existed.
    pub async fn delete_script(&self, name: &str) -> ApiResponse<()> {
        let name = match AssetName::parse(name) {
            Ok(name) => name,
            Err(e) => return ApiResponse::from_error(&e),
        };
        let store = Arc::clone(&self.store);
        let target = name.clone();
        match blocking(move || store.delete(&target)).await {
            Ok(()) => ApiResponse::info(ResponseCode::Success, "Delete file successfully."),
            Err(e) => {
                tracing::error!(
                    "Error occurred while deleting plugin file {}: {}",
                    name.file_name(),
                    e
                );
                ApiResponse::from_error(&e)
            }
        }
    }

    pub async fn list_scripts(&self) -> Result<Vec<AssetName>> {
        let store = Arc::clone(&self.store);
        blocking(move || store.list()).await
    }
}

/// A script upload in progress. Dropping it before [`finish`](Self::finish)
/// discards everything written so far.
#[derive(Debug)]
pub struct ScriptUpload {
    store: Arc<AssetStore>,
    staged: StagedScript,
    file: tokio::fs::File,
    received: u64,
}

impl ScriptUpload {
    pub fn name(&self) -> &AssetName {
        self.staged.name()
    }

    /// Bytes written so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.file.write_all(chunk).await?;
        self.received += chunk.len() as u64;
        Ok(())
    }

    /// Publish the script under its name.
    pub async fn finish(mut self) -> ApiResponse<()> {
        if let Err(e) = self.file.flush().await {
            return upload_failure(self.name(), e.into());
        }
        let ScriptUpload {
            store,
            staged,
            file,
            ..
        } = self;
        drop(file);

        let name = staged.name().clone();
        match blocking(move || store.commit(staged)).await {
            Ok(()) => ApiResponse::info(ResponseCode::Success, "Plugin uploaded successfully."),
            Err(e) => upload_failure(&name, e),
        }
    }
}

fn upload_failure(name: &AssetName, err: LucenceError) -> ApiResponse<()> {
    tracing::warn!("Upload of plugin '{}' rejected: {}", name, err);
    match err {
        LucenceError::Conflict { .. } => ApiResponse::fail(CONFLICT_MESSAGE),
        other => ApiResponse::from_error(&other),
    }
}

/// Run a store call on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_service() -> (TempDir, AssetService) {
        let dir = TempDir::new().unwrap();
        let service = AssetService::init(dir.path().join("lucence")).unwrap();
        (dir, service)
    }

    #[tokio::test]
    async fn test_init_creates_root() {
        let (dir, service) = test_service();
        assert!(dir.path().join("lucence").is_dir());
        assert_eq!(service.root(), dir.path().join("lucence"));
    }

    #[tokio::test]
    async fn test_upload_read_delete_cycle() {
        let (_dir, service) = test_service();

        let resp = service
            .upload_script("katex-extra", Bytes::from_static(b"console.log(1)"))
            .await;
        assert!(resp.is_success(), "{resp:?}");
        assert!(resp.data.is_none());
        assert_eq!(
            service.read_script("katex-extra").await.unwrap(),
            b"console.log(1)"
        );

        let resp = service
            .upload_script("katex-extra", Bytes::from_static(b"console.log(2)"))
            .await;
        assert_eq!(resp.code, ResponseCode::Fail);
        assert_eq!(resp.message, "Plugin has existed.");
        assert_eq!(
            service.read_script("katex-extra").await.unwrap(),
            b"console.log(1)"
        );

        let resp = service.delete_script("katex-extra").await;
        assert!(resp.is_success());
        assert!(matches!(
            service.read_script("katex-extra").await.unwrap_err(),
            LucenceError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_succeeds() {
        let (_dir, service) = test_service();
        let resp = service.delete_script("never-there").await;
        assert_eq!(resp.code, ResponseCode::Success);
        assert_eq!(resp.message, "Delete file successfully.");
    }

    #[tokio::test]
    async fn test_delete_failure_is_server_error() {
        let (_dir, service) = test_service();
        std::fs::create_dir(service.root().join("stuck.js")).unwrap();

        let resp = service.delete_script("stuck").await;
        assert_eq!(resp.code, ResponseCode::ServerError);
        assert!(resp.message.starts_with("IO error"), "{}", resp.message);
        assert!(service.root().join("stuck.js").is_dir());
    }

    #[tokio::test]
    async fn test_streamed_upload_in_chunks() {
        let (_dir, service) = test_service();
        let mut upload = service.begin_upload("chunked").await.unwrap();
        upload.write_chunk(b"console.").await.unwrap();
        upload.write_chunk(b"log(3)").await.unwrap();
        assert_eq!(upload.received(), 14);
        assert!(service.list_scripts().await.unwrap().is_empty());

        assert!(upload.finish().await.is_success());
        assert_eq!(
            service.read_script("chunked").await.unwrap(),
            b"console.log(3)"
        );
    }

    #[tokio::test]
    async fn test_abandoned_upload_leaves_no_files() {
        let (_dir, service) = test_service();
        let mut upload = service.begin_upload("dropped").await.unwrap();
        upload.write_chunk(b"half a scr").await.unwrap();
        drop(upload);

        let leftovers: Vec<_> = std::fs::read_dir(service.root()).unwrap().collect();
        assert!(leftovers.is_empty(), "temp file not cleaned up");
    }

    #[tokio::test]
    async fn test_begin_upload_rejects_taken_name() {
        let (_dir, service) = test_service();
        service
            .upload_script("taken", Bytes::from_static(b"1"))
            .await;
        let denied = service.begin_upload("taken").await.unwrap_err();
        assert_eq!(denied.code, ResponseCode::Fail);
        assert_eq!(denied.message, CONFLICT_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_names_rejected() {
        let (dir, service) = test_service();
        let resp = service
            .upload_script("../escape", Bytes::from_static(b"x"))
            .await;
        assert_eq!(resp.code, ResponseCode::Fail);
        assert!(!dir.path().join("escape.js").exists());

        let resp = service.delete_script("../../etc/passwd").await;
        assert_eq!(resp.code, ResponseCode::Fail);

        assert!(service.fetch_script_path("a/b").is_err());
    }

    #[tokio::test]
    async fn test_fetch_script_path() {
        let (_dir, service) = test_service();
        let path = service.fetch_script_path("mermaid-ext").unwrap();
        assert_eq!(path, service.root().join("mermaid-ext.js"));
    }

    #[tokio::test]
    async fn test_list_scripts_sorted() {
        let (_dir, service) = test_service();
        for name in ["zeta", "alpha", "mid"] {
            service
                .upload_script(name, Bytes::from_static(b"//"))
                .await;
        }
        let names: Vec<String> = service
            .list_scripts()
            .await
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
