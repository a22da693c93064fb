use crate::ports::outbound::OutputPresenter;
use crate::shared::error::SbomError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// FileSystemWriter adapter for writing output to files
///
/// This adapter implements the OutputPresenter port for file output.
/// Content goes to a temporary file next to the destination, which is then
/// renamed over it, so readers never observe a partially written SBOM.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn parent_directory(&self) -> &Path {
        match self.output_path.parent() {
            Some(parent) if parent != Path::new("") => parent,
            _ => Path::new("."),
        }
    }

    /// Temporary file in `parent` carrying the mode the output should end up with
    ///
    /// An existing destination keeps its mode; a new one gets `0o666` minus the
    /// process umask, the same as a plain `fs::write`.
    fn create_temp_file(&self, parent: &Path) -> Result<NamedTempFile> {
        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let temp_file = builder
            .tempfile_in(parent)
            .map_err(|e| self.write_error(format!("Failed to create temporary file: {}", e)))?;

        if let Ok(existing) = fs::metadata(&self.output_path) {
            fs::set_permissions(temp_file.path(), existing.permissions())
                .map_err(|e| self.write_error(format!("Failed to copy file permissions: {}", e)))?;
        }
        Ok(temp_file)
    }

    fn write_error(&self, details: impl Into<String>) -> anyhow::Error {
        SbomError::FileWriteError {
            path: self.output_path.clone(),
            details: details.into(),
        }
        .into()
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        let parent = self.parent_directory();
        if !parent.is_dir() {
            return Err(self.write_error(format!(
                "Parent directory does not exist: {}",
                parent.display()
            )));
        }
        validate_not_symlink(&self.output_path, "write SBOM output")?;

        let mut temp_file = self.create_temp_file(parent)?;
        temp_file
            .write_all(content.as_bytes())
            .and_then(|_| temp_file.flush())
            .map_err(|e| self.write_error(e.to_string()))?;
        temp_file
            .persist(&self.output_path)
            .map_err(|e| self.write_error(format!("Failed to replace output file: {}", e.error)))?;

        tracing::debug!(path = %self.output_path.display(), bytes = content.len(), "SBOM written");
        Ok(())
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .and_then(|_| stdout.flush())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.json");

        let writer = FileSystemWriter::new(output_path.clone());
        let result = writer.present("test content");

        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "test content");
    }

    #[test]
    fn test_file_writer_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("output.json");
        fs::write(&output_path, "old content that is longer").unwrap();

        FileSystemWriter::new(output_path.clone()).present("new").unwrap();

        assert_eq!(fs::read_to_string(&output_path).unwrap(), "new");
        let leftovers = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let output_path = PathBuf::from("/nonexistent/directory/output.json");

        let writer = FileSystemWriter::new(output_path);
        let result = writer.present("test content");

        assert!(result.is_err());
        let err_string = format!("{}", result.unwrap_err());
        assert!(err_string.contains("Parent directory does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_rejects_symlink_destination() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "original").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = FileSystemWriter::new(link).present("attack");

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_new_file_mode_matches_fs_write() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.json");
        let plain_path = temp_dir.path().join("plain.json");

        FileSystemWriter::new(output_path.clone()).present("{}").unwrap();
        fs::write(&plain_path, "{}").unwrap();

        let written = fs::metadata(&output_path).unwrap().permissions().mode() & 0o777;
        let plain = fs::metadata(&plain_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(written, plain);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_writer_keeps_existing_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("sbom.json");
        fs::write(&output_path, "old").unwrap();
        fs::set_permissions(&output_path, fs::Permissions::from_mode(0o640)).unwrap();

        FileSystemWriter::new(output_path.clone()).present("new").unwrap();

        let mode = fs::metadata(&output_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "new");
    }

    #[test]
    fn test_stdout_presenter_success() {
        let presenter = StdoutPresenter::new();
        let result = presenter.present("test output");
        assert!(result.is_ok());
    }
}
