use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::catalog::MAX_TRACKS;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// File stem for slot `index`, e.g. `Track07`.
pub fn slot_stem(prefix: &str, index: usize) -> String {
    format!("{prefix}{index:02}")
}

/// Resolve the file path of every disc slot under `dir`.
///
/// The directory is listed once. A slot maps to the file whose stem is
/// `{prefix}{NN}` (case-insensitive); when several extensions exist the one
/// listed first in `settings.extensions` wins. Slots without a file get the
/// canonical path with the preferred extension, which the length reader then
/// reports as missing.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let exts = normalized_extensions(settings);
    let fallback_ext = exts.first().map(String::as_str).unwrap_or("ogg");

    // stem (lowercase) -> (extension rank, path)
    let mut found: HashMap<String, (usize, PathBuf)> = HashMap::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        let Some(rank) = exts.iter().position(|e| *e == ext) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let stem = stem.to_ascii_lowercase();
        match found.get(&stem) {
            Some((best, _)) if *best <= rank => {}
            _ => {
                found.insert(stem, (rank, path.to_path_buf()));
            }
        }
    }

    (0..MAX_TRACKS)
        .map(|i| {
            let stem = slot_stem(&settings.file_prefix, i);
            match found.remove(&stem.to_ascii_lowercase()) {
                Some((_, path)) => path,
                None => dir.join(format!("{stem}.{fallback_ext}")),
            }
        })
        .collect()
}
