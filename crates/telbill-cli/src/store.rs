//! Single-slot store holding the most recently parsed bill.
//!
//! Only `process` writes to it; `last` reads it back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use telbill_core::StructuredBill;

const LAST_RESULT_FILE: &str = "last.json";

/// File-backed last-result store.
pub struct LastResultStore {
    dir: PathBuf,
}

impl LastResultStore {
    /// Open the store in `dir`, or in the user cache directory.
    pub fn open(dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => dirs::cache_dir()
                .context("No cache directory available; pass --store-dir")?
                .join("telbill"),
        };
        Ok(Self { dir })
    }

    /// Path of the stored result.
    pub fn path(&self) -> PathBuf {
        self.dir.join(LAST_RESULT_FILE)
    }

    /// Replace the stored result.
    pub fn save(&self, bill: &StructuredBill) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create store directory {}", self.dir.display()))?;

        // Write then rename so a reader never sees a half-written file
        let tmp = self.dir.join(format!("{}.tmp", LAST_RESULT_FILE));
        fs::write(&tmp, serde_json::to_vec(bill)?)?;
        fs::rename(&tmp, self.path())?;

        debug!("Stored last result at {}", self.path().display());
        Ok(())
    }

    /// Load the stored result, if any.
    pub fn load(&self) -> anyhow::Result<Option<StructuredBill>> {
        load_from(&self.path())
    }

    /// Remove the stored result.
    pub fn clear(&self) -> anyhow::Result<bool> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

fn load_from(path: &Path) -> anyhow::Result<Option<StructuredBill>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read(path)?;
    let bill = serde_json::from_slice(&content)
        .with_context(|| format!("Stored result at {} is corrupt", path.display()))?;
    Ok(Some(bill))
}
