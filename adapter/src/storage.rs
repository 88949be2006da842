use async_trait::async_trait;
use kernel::repository::report::ReportStorage;
use shared::error::{AppError, AppResult};
use std::{
    io,
    path::{Path, PathBuf},
};

/// Report documents kept as plain files in one directory.
pub struct FsReportStorage {
    root: PathBuf,
}

impl FsReportStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    // Only bare file names are accepted so nothing escapes the directory.
    fn path_of(&self, filename: &str) -> AppResult<PathBuf> {
        match Path::new(filename).file_name() {
            Some(name) if name == filename => Ok(self.root.join(name)),
            _ => Err(AppError::ReportStorageError(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid report file name: {filename}"),
            ))),
        }
    }
}

#[async_trait]
impl ReportStorage for FsReportStorage {
    async fn save(&self, filename: &str, contents: &str) -> AppResult<()> {
        let path = self.path_of(filename)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(AppError::ReportStorageError)?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(AppError::ReportStorageError)?;
        tracing::debug!(path = %path.display(), "report written");
        Ok(())
    }

    async fn load(&self, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.path_of(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::EntityNotFound(
                format!("report file {filename} is missing"),
            )),
            Err(e) => Err(AppError::ReportStorageError(e)),
        }
    }

    async fn remove(&self, filename: &str) -> AppResult<()> {
        let path = self.path_of(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::ReportStorageError(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn saved_reports_can_be_loaded_back() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let storage = FsReportStorage::new(dir.path().join("reports_files"));

        storage.save("report_1.txt", "End of report.\n").await?;
        assert_eq!(storage.load("report_1.txt").await?, b"End of report.\n");

        storage.remove("report_1.txt").await?;
        assert!(matches!(
            storage.load("report_1.txt").await,
            Err(AppError::EntityNotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn paths_outside_the_directory_are_refused() {
        let dir = TempDir::new().unwrap();
        let storage = FsReportStorage::new(dir.path());
        assert!(storage.save("../escape.txt", "x").await.is_err());
        assert!(storage.load("/etc/passwd").await.is_err());
    }
}
