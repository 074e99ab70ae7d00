//! Loading level files from disk into a catalog.

use std::path::{Path, PathBuf};

use anyhow::Context;
use dictation_core::{parse_level, Catalog};

/// Load every `*.json` level file in `dir`, in file name order.
///
/// Files that fail to read or parse are logged and skipped.
pub async fn load_catalog_dir(dir: &Path) -> anyhow::Result<Catalog> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("failed to read items directory {}", dir.display()))?;

    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut catalog = Catalog::new();
    for path in paths {
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "failed to read level file");
                continue;
            }
        };

        match parse_level(&content) {
            Ok(set) => catalog.add_level(set),
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping invalid level file");
            }
        }
    }

    tracing::info!(items = catalog.len(), dir = %dir.display(), "catalog loaded");
    Ok(catalog)
}
