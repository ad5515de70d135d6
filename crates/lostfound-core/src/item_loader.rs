use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::ItemRecord;

/// Reads item collections exported by the storage collaborator.
///
/// A path is either a single `.json` file holding an array of records or a
/// directory that is walked recursively for such files.
#[derive(Default)]
pub struct ItemLoader;

impl ItemLoader {
    pub fn new() -> Self { Self }

    pub fn load_path(&self, path: &Path) -> Result<Vec<ItemRecord>> {
        self.load_files(&self.list_json_files(path)?)
    }

    pub fn load_path_limited(&self, path: &Path, limit: usize) -> Result<Vec<ItemRecord>> {
        let mut files = self.list_json_files(path)?;
        if files.len() > limit {
            files.truncate(limit);
            tracing::info!(limit, "limited item files");
        }
        self.load_files(&files)
    }

    fn load_files(&self, files: &[PathBuf]) -> Result<Vec<ItemRecord>> {
        let mut records = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            tracing::debug!(file = %file_path.display(), "loading item file {}/{}", file_index + 1, files.len());
            records.extend(self.read_file(file_path)?);
        }
        tracing::info!(files = files.len(), records = records.len(), "loaded item records");
        Ok(records)
    }

    fn read_file(&self, file_path: &Path) -> Result<Vec<ItemRecord>> {
        let content = fs::read_to_string(file_path)?;
        let records: Vec<ItemRecord> = serde_json::from_str(&content)?;
        Ok(records)
    }

    fn list_json_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(Error::NotFound(root.display().to_string()));
        }
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        if json_files.is_empty() {
            tracing::warn!(root = %root.display(), "no .json item files found");
        }
        json_files.sort();
        Ok(json_files)
    }
}
