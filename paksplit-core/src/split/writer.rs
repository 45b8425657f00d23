use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::domain::{PartRow, SplitReport};
use crate::error::{Result, SplitError};
use crate::layout::{self, PART_LIMIT};
use crate::resolve::{self, ResolvedSource};
use crate::split::plan::{PartPlan, plan_parts};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Stream parts off the original; the source is never opened for write.
    #[default]
    Copy,
    /// Consume the original as parts are carved. Needs only one part of
    /// transient space, but a failure mid-run cannot be rolled back.
    InPlace,
}

#[derive(Clone, Default)]
pub struct SplitOptions {
    pub mode: SplitMode,
    /// Part size bound in bytes. 0 means the FAT32 limit.
    pub chunk_size: u64,
    /// Write parts here instead of beside the source (copy mode).
    pub output_dir: Option<PathBuf>,
}

fn effective_chunk_size(opts: Option<&SplitOptions>) -> u64 {
    let val = opts.map(|o| o.chunk_size).unwrap_or(0);
    if val == 0 { PART_LIMIT } else { val }
}

/// Split `source` into bounded parts whose sorted concatenation reproduces
/// it byte-for-byte. One forward pass, one bounded buffer, no parallelism.
pub fn split(source: &Path, opts: Option<&SplitOptions>) -> Result<SplitReport> {
    let mode = opts.map(|o| o.mode).unwrap_or_default();
    let chunk_size = effective_chunk_size(opts);
    let output_dir = opts.and_then(|o| o.output_dir.as_deref());

    let src = resolve::resolve(source, mode, output_dir, chunk_size)?;
    let parts = plan_parts(src.len, chunk_size);

    if parts.len() == 1 {
        println!("{} fits in a single part", src.path.display());
    } else {
        println!(
            "splitting {} ({} bytes) into {} parts",
            src.path.display(),
            src.len,
            parts.len()
        );
    }

    match mode {
        SplitMode::Copy => split_copy(&src, &parts),
        SplitMode::InPlace => split_in_place(&src, &parts),
    }
}

fn create_out_dir(dir: &Path) -> Result<()> {
    fs::create_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => SplitError::AlreadyExists(dir.to_path_buf()),
        _ => SplitError::Io(e),
    })
}

/// Copy exactly `len` bytes through the bounded buffer.
fn copy_exact<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    len: u64,
    buf: &mut [u8],
) -> std::io::Result<()> {
    let mut left = len;
    while left > 0 {
        let want = left.min(buf.len() as u64) as usize;
        let n = src.read(&mut buf[..want])?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "source ended before the planned part length",
            ));
        }
        dst.write_all(&buf[..n])?;
        left -= n as u64;
    }
    Ok(())
}

/// Safe mode: one forward read cursor over the untouched original, parts
/// written in ascending order. Already-written parts stay on any failure.
fn split_copy(src: &ResolvedSource, parts: &[PartPlan]) -> Result<SplitReport> {
    create_out_dir(&src.dir)?;
    let width = layout::name_width(parts.len() as u64);

    let mut f = File::open(&src.path)?;
    let mut buf = vec![0u8; 1 << 16];
    let mut rows = Vec::with_capacity(parts.len());

    for p in parts {
        let path = src.dir.join(layout::part_name(p.ordinal, width));
        let mut out = File::create(&path)?;
        copy_exact(&mut f, &mut out, p.len, &mut buf)?;
        out.flush()?;
        println!("part {}/{} written ({} bytes)", p.ordinal + 1, parts.len(), p.len);
        rows.push(PartRow {
            ordinal: p.ordinal,
            start: p.start,
            len: p.len,
            path,
        });
    }

    Ok(SplitReport {
        dir: src.dir.clone(),
        total_len: src.len,
        parts: rows,
    })
}

/// Destructive mode: move the original into the output directory as part 0,
/// then carve the higher parts off its tail, truncating after each flush.
/// The rename fails cleanly (e.g. across filesystems) while the original is
/// still intact; everything after it is past the point of no return.
fn split_in_place(src: &ResolvedSource, parts: &[PartPlan]) -> Result<SplitReport> {
    create_out_dir(&src.dir)?;
    let width = layout::name_width(parts.len() as u64);
    let head_path = src.dir.join(layout::part_name(0, width));

    fs::rename(&src.path, &head_path)?;

    let mut carved = 0u64;
    match carve_tail(&head_path, parts, &src.dir, width, &mut carved) {
        Ok(rows) => Ok(SplitReport {
            dir: src.dir.clone(),
            total_len: src.len,
            parts: rows,
        }),
        Err(source) => Err(SplitError::Destructive {
            path: src.path.clone(),
            consumed: carved,
            source,
        }),
    }
}

fn carve_tail(
    head_path: &Path,
    parts: &[PartPlan],
    dir: &Path,
    width: usize,
    carved: &mut u64,
) -> std::io::Result<Vec<PartRow>> {
    let total = parts.len();
    let mut buf = vec![0u8; 1 << 16];
    let mut rows = Vec::with_capacity(total);

    let mut f = OpenOptions::new().read(true).write(true).open(head_path)?;
    for p in parts.iter().skip(1).rev() {
        let path = dir.join(layout::part_name(p.ordinal, width));
        f.seek(SeekFrom::End(-(p.len as i64)))?;
        let mut out = File::create(&path)?;
        copy_exact(&mut f, &mut out, p.len, &mut buf)?;
        out.flush()?;
        f.set_len(p.start)?;
        *carved += p.len;
        println!("part {}/{} carved ({} bytes)", p.ordinal + 1, total, p.len);
        rows.push(PartRow {
            ordinal: p.ordinal,
            start: p.start,
            len: p.len,
            path,
        });
    }

    rows.push(PartRow {
        ordinal: 0,
        start: 0,
        len: parts[0].len,
        path: head_path.to_path_buf(),
    });
    rows.sort_by_key(|r| r.ordinal);
    println!("part 1/{} kept in place ({} bytes)", total, parts[0].len);
    Ok(rows)
}
