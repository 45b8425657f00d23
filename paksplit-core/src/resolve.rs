//! Input Resolver: stats the source, derives the output directory and
//! checks the free-space precondition. Creates nothing on disk.

use std::path::{Path, PathBuf};

use sysinfo::Disks;

use crate::error::{Result, SplitError};
use crate::layout;
use crate::split::writer::SplitMode;

#[derive(Clone, Debug)]
pub struct ResolvedSource {
    pub path: PathBuf,
    /// Read once at job start; the caller guarantees no concurrent writers.
    pub len: u64,
    pub dir: PathBuf,
}

pub fn resolve(
    source: &Path,
    mode: SplitMode,
    output_dir: Option<&Path>,
    chunk_size: u64,
) -> Result<ResolvedSource> {
    let md = std::fs::metadata(source).map_err(|_| SplitError::NotFound(source.to_path_buf()))?;
    if !md.is_file() {
        return Err(SplitError::NotFound(source.to_path_buf()));
    }
    let len = md.len();

    let dir = match output_dir {
        Some(d) => layout::adapt_output_dir(d, source),
        None => layout::split_dir_name(source),
    };
    // Refuse to merge with stale output from a prior run.
    if dir.exists() {
        return Err(SplitError::AlreadyExists(dir));
    }

    let needed = required_free(mode, len, chunk_size);
    let probe = dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if let Some(available) = available_space_for(probe) {
        if available < needed {
            return Err(SplitError::InsufficientSpace {
                path: dir,
                needed,
                available,
            });
        }
    }

    Ok(ResolvedSource {
        path: source.to_path_buf(),
        len,
        dir,
    })
}

/// Free-space floor before anything is written: copy mode may duplicate the
/// whole source, in-place mode only ever holds one transient part.
pub fn required_free(mode: SplitMode, total_len: u64, chunk_size: u64) -> u64 {
    match mode {
        SplitMode::Copy => chunk_size.max(total_len),
        SplitMode::InPlace => chunk_size,
    }
}

/// Available bytes on the mounted volume holding `path`: the disk whose
/// mount point is the longest prefix wins. `None` when no volume matches;
/// the precondition is then skipped and actual writes surface any shortage.
fn available_space_for(path: &Path) -> Option<u64> {
    let abs = std::fs::canonicalize(path).ok()?;
    let disks = Disks::new_with_refreshed_list();

    let mut best: Option<(usize, u64)> = None; // (mount_point_len, available_bytes)
    for disk in disks.list() {
        let mount = disk.mount_point();
        if abs.starts_with(mount) {
            let len = mount.as_os_str().len();
            if best.is_none() || len > best.unwrap().0 {
                best = Some((len, disk.available_space()));
            }
        }
    }
    best.map(|(_, bytes)| bytes)
}
