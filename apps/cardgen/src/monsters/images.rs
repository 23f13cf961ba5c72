//! Background image index built from a local directory of illustrations.
//!
//! Files are matched by stem, case-insensitively. The stored reference is the
//! public URL the card renderer will fetch: `{remote_root}/{file name}`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    by_stem: HashMap<String, String>,
}

impl ImageIndex {
    /// An index with no images; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: &Path, remote_root: &str) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to list images in '{}'", dir.display()))?;

        let mut file_names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read '{}'", dir.display()))?;
            if entry.file_type()?.is_file() {
                file_names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        let index = Self::from_file_names(file_names, remote_root);
        info!(count = index.len(), dir = %dir.display(), "Loaded local images");
        Ok(index)
    }

    pub fn from_file_names<I, S>(file_names: I, remote_root: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let remote_root = remote_root.trim_end_matches('/');
        let by_stem = file_names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                let stem = Path::new(name)
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                (stem, format!("{remote_root}/{name}"))
            })
            .collect();
        ImageIndex { by_stem }
    }

    pub fn len(&self) -> usize {
        self.by_stem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_stem.is_empty()
    }

    /// Resolves the image for a creature. The English name is preferred as the
    /// key; spaces and slashes become underscores to match file naming.
    pub fn resolve(&self, name: &str, en_name: Option<&str>) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let key = image_key(en_name.unwrap_or(name));
        let found = self.by_stem.get(&key.to_lowercase()).cloned();
        if found.is_none() {
            warn!(name, key = %key, "Couldn't find image for creature");
        }
        found
    }
}

fn image_key(name: &str) -> String {
    name.replace([' ', '/'], "_")
}
