//! On-disk conventions the downstream installer depends on: the split
//! directory name and the sortable zero-padded part names.

use std::path::{Path, PathBuf};

/// Largest file a FAT32 volume accepts: 4 GiB minus one byte.
pub const PART_LIMIT: u64 = 4 * 1024 * 1024 * 1024 - 1;

/// Installers expect at least "00", "01", ... even for two-part splits.
pub const MIN_NAME_WIDTH: usize = 2;

/// Directory the parts land in: `<stem>_split[.<ext>]` beside the source.
/// The kept extension is what marks the directory as a split package.
pub fn split_dir_name(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{stem}_split.{}", ext.to_string_lossy()),
        None => format!("{stem}_split"),
    };
    source.with_file_name(name)
}

/// A caller-chosen output directory still gets the source's extension
/// appended when it lacks it, so the suffix convention holds either way.
pub fn adapt_output_dir(dir: &Path, source: &Path) -> PathBuf {
    let Some(ext) = source.extension() else {
        return dir.to_path_buf();
    };
    if dir.extension() == Some(ext) {
        return dir.to_path_buf();
    }
    let mut name = dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(ext);
    dir.with_file_name(name)
}

/// Width that keeps lexicographic order equal to ordinal order for this
/// many parts. Never below [`MIN_NAME_WIDTH`].
pub fn name_width(part_count: u64) -> usize {
    let mut digits = 1;
    let mut max_ordinal = part_count.saturating_sub(1);
    while max_ordinal >= 10 {
        digits += 1;
        max_ordinal /= 10;
    }
    digits.max(MIN_NAME_WIDTH)
}

pub fn part_name(ordinal: u64, width: usize) -> String {
    format!("{ordinal:0width$}")
}

/// Part files currently present under `dir`, in installer (sorted) order.
pub fn existing_parts(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut parts: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    parts.sort();
    Ok(parts)
}
