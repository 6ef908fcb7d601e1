use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use thiserror::Error;
use tracing::warn;

use crate::constants::{DATA_DIR_ENV, MAX_BACKUPS, PROJECT, STORAGE_KEY};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Durable string slots addressed by a fixed key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keeps each key in `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open_default() -> Self {
        Self::new(get_data_dir())
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::io(&path, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        atomic_write(&self.path_for(key), value)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).ok();
        return dir;
    }

    let local = PathBuf::from(".").join(format!("{}.json", STORAGE_KEY));
    if local.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = project_dirs() {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
    }
    get_data_dir()
}

pub fn get_log_path() -> PathBuf {
    get_state_dir().join("caloria.log")
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(PROJECT.qualifier, PROJECT.organization, PROJECT.application)
}

/// Writes a user-chosen file in one step. No backups are kept next to it.
pub fn write_export_file(path: &Path, content: &str) -> Result<(), StorageError> {
    replace_file(path, content)
}

pub fn create_backup(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| StorageError::io(&backup_dir, e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| StorageError::io(&backup_path, e))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.file_name());

        while backups.len() > MAX_BACKUPS {
            let oldest = backups.remove(0);
            let _ = fs::remove_file(oldest.path());
        }
    }

    Ok(())
}

/// Backs up the current file, then replaces it. A failed backup does not stop the write.
pub fn atomic_write(path: &Path, content: &str) -> Result<(), StorageError> {
    if path.exists() {
        if let Err(e) = create_backup(path) {
            warn!(error = %e, path = %path.display(), "backup failed, writing anyway");
        }
    }
    replace_file(path, content)
}

fn replace_file(path: &Path, content: &str) -> Result<(), StorageError> {
    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}
