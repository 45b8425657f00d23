use std::fs;
use std::path::{Path, PathBuf};

use paksplit_core::error::SplitError;
use paksplit_core::{SplitMode, SplitOptions, split};

fn opts(mode: SplitMode, chunk_size: u64) -> SplitOptions {
    SplitOptions {
        mode,
        chunk_size,
        output_dir: None,
    }
}

fn write_source(dir: &Path, name: &str, len: usize) -> PathBuf {
    let bytes: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    let path = dir.join(name);
    fs::write(&path, &bytes).unwrap();
    path
}

/// Reassemble the way the installer does: read parts in filename-sorted
/// order and concatenate their bytes.
fn concat_sorted(dir: &Path) -> Vec<u8> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    let mut all = Vec::new();
    for p in paths {
        all.extend(fs::read(p).unwrap());
    }
    all
}

#[test]
fn copy_mode_round_trips_and_sizes_parts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "image.pkg", 1_000);
    let before = blake3::hash(&fs::read(&src).unwrap());

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();

    assert_eq!(report.dir, tmp.path().join("image_split.pkg"));
    assert_eq!(report.total_len, 1_000);
    assert_eq!(report.parts.len(), 4);
    for p in &report.parts[..3] {
        assert_eq!(p.len, 256);
    }
    assert_eq!(report.parts[3].len, 232);

    assert_eq!(blake3::hash(&concat_sorted(&report.dir)), before);
    // the original is byte-identical after a copy-mode job
    assert_eq!(blake3::hash(&fs::read(&src).unwrap()), before);
}

#[test]
fn copy_mode_exact_multiple_has_no_empty_tail() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "even.pkg", 512);

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();

    assert_eq!(report.parts.len(), 2);
    assert!(report.parts.iter().all(|p| p.len == 256));
    assert_eq!(fs::read_dir(&report.dir).unwrap().count(), 2);
}

#[test]
fn sub_chunk_source_still_becomes_one_part() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "small.pkg", 100);

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();

    assert_eq!(report.parts.len(), 1);
    assert_eq!(report.parts[0].len, 100);
    assert_eq!(concat_sorted(&report.dir), fs::read(&src).unwrap());
}

#[test]
fn empty_source_yields_one_empty_part() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "empty.pkg", 0);

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();

    assert_eq!(report.parts.len(), 1);
    assert_eq!(report.parts[0].len, 0);
    assert!(concat_sorted(&report.dir).is_empty());
}

#[test]
fn part_names_sort_in_ordinal_order() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "image.pkg", 1_000);

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();

    let names: Vec<String> = report
        .parts
        .iter()
        .map(|p| p.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["00", "01", "02", "03"]);

    let mut offset = 0u64;
    for (i, p) in report.parts.iter().enumerate() {
        assert_eq!(p.ordinal, i as u64);
        assert_eq!(p.start, offset);
        offset += p.len;
    }
}

#[test]
fn names_widen_past_ninety_nine_parts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "long.pkg", 300);
    let before = blake3::hash(&fs::read(&src).unwrap());

    let report = split(&src, Some(&opts(SplitMode::Copy, 2))).unwrap();

    assert_eq!(report.parts.len(), 150);
    let first = report.parts[0].path.file_name().unwrap().to_string_lossy().into_owned();
    let last = report.parts[149].path.file_name().unwrap().to_string_lossy().into_owned();
    assert_eq!(first, "000");
    assert_eq!(last, "149");
    assert_eq!(blake3::hash(&concat_sorted(&report.dir)), before);
}

#[test]
fn in_place_mode_consumes_the_original() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "image.pkg", 1_000);
    let before = blake3::hash(&fs::read(&src).unwrap());

    let report = split(&src, Some(&opts(SplitMode::InPlace, 256))).unwrap();

    assert!(!src.exists());
    assert_eq!(report.parts.len(), 4);
    assert_eq!(report.parts.iter().map(|p| p.len).sum::<u64>(), 1_000);
    assert_eq!(blake3::hash(&concat_sorted(&report.dir)), before);
}

#[test]
fn in_place_single_part_is_a_rename() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "small.pkg", 100);
    let before = fs::read(&src).unwrap();

    let report = split(&src, Some(&opts(SplitMode::InPlace, 256))).unwrap();

    assert!(!src.exists());
    assert_eq!(report.parts.len(), 1);
    assert_eq!(fs::read(&report.parts[0].path).unwrap(), before);
}

#[test]
fn second_run_collides_and_leaves_output_alone() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "image.pkg", 1_000);

    let report = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap();
    let before = blake3::hash(&concat_sorted(&report.dir));

    let err = split(&src, Some(&opts(SplitMode::Copy, 256))).unwrap_err();
    assert!(matches!(err, SplitError::AlreadyExists(_)));

    assert_eq!(fs::read_dir(&report.dir).unwrap().count(), 4);
    assert_eq!(blake3::hash(&concat_sorted(&report.dir)), before);
}

#[test]
fn missing_source_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = split(&tmp.path().join("nope.pkg"), Some(&opts(SplitMode::Copy, 256))).unwrap_err();
    assert!(matches!(err, SplitError::NotFound(_)));
}

#[test]
fn directory_source_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let err = split(tmp.path(), Some(&opts(SplitMode::Copy, 256))).unwrap_err();
    assert!(matches!(err, SplitError::NotFound(_)));
}

#[test]
fn custom_output_dir_keeps_the_suffix_convention() {
    let tmp = tempfile::tempdir().unwrap();
    let src = write_source(tmp.path(), "game.nsp", 600);
    let before = blake3::hash(&fs::read(&src).unwrap());

    let opts = SplitOptions {
        mode: SplitMode::Copy,
        chunk_size: 256,
        output_dir: Some(tmp.path().join("sdcard")),
    };
    let report = split(&src, Some(&opts)).unwrap();

    assert_eq!(report.dir, tmp.path().join("sdcard.nsp"));
    assert_eq!(report.parts.len(), 3);
    assert_eq!(blake3::hash(&concat_sorted(&report.dir)), before);
}
