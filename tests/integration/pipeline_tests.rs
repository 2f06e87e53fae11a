use regex::Regex;
use sizedupe::duplicates::{
    filter_groups, group_by_size, groups_with_at_least, groups_with_exactly, FinderConfig,
    GroupFilter, SizeGroupFinder,
};
use sizedupe::scanner::{scan_directory, FileEntry, ScannerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, len: usize) {
    fs::write(dir.join(name), vec![b'x'; len]).unwrap();
}

fn sorted_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut paths = paths.to_vec();
    paths.sort();
    paths
}

#[test]
fn test_notes_directory_end_to_end() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a.txt", 12);
    write_file(dir.path(), "b.txt", 12);
    write_file(dir.path(), "c.py", 5);
    write_file(dir.path(), "notes.md", 12);

    let pattern = Regex::new(r".+\.(?:py|txt)$").unwrap();
    let files = scan_directory(dir.path(), Some(&pattern), 10).unwrap();

    let mut scanned: Vec<FileEntry> = files.clone();
    scanned.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(
        scanned,
        vec![
            FileEntry::new(dir.path().join("a.txt"), 12),
            FileEntry::new(dir.path().join("b.txt"), 12),
        ]
    );

    let groups = group_by_size(files);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 12);
    assert_eq!(
        sorted_paths(&groups[0].paths),
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );

    let at_least_two = groups_with_at_least(2, groups.clone());
    assert_eq!(at_least_two, groups);

    let exactly_three = groups_with_exactly(3, groups);
    assert!(exactly_three.is_empty());
}

#[test]
fn test_empty_directory_propagates_empty() {
    let dir = tempdir().unwrap();

    let files = scan_directory(dir.path(), None, 0).unwrap();
    assert!(files.is_empty());

    let groups = group_by_size(files);
    assert!(groups.is_empty());

    assert!(groups_with_at_least(2, groups).is_empty());
}

#[test]
fn test_every_eligible_file_appears_once() {
    let dir = tempdir().unwrap();
    for (i, len) in [0usize, 3, 7, 7, 10, 10, 10, 42].iter().enumerate() {
        write_file(dir.path(), &format!("f{i}.bin"), *len);
    }
    fs::create_dir(dir.path().join("nested")).unwrap();
    write_file(&dir.path().join("nested"), "deep.bin", 10);

    let files = scan_directory(dir.path(), None, 7).unwrap();

    assert_eq!(files.len(), 6);
    assert!(files.iter().all(|f| f.size >= 7));
    let mut paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 6);

    let groups = group_by_size(files);
    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, 6);
    for group in &groups {
        for path in &group.paths {
            assert_eq!(fs::metadata(path).unwrap().len(), group.size);
        }
    }
}

#[test]
fn test_zero_byte_files_form_a_group() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "empty1", 0);
    write_file(dir.path(), "empty2", 0);

    let (groups, summary) = SizeGroupFinder::with_defaults().find(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(summary.reclaimable_space, 0);
}

#[test]
fn test_generic_predicate() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "small1", 1);
    write_file(dir.path(), "small2", 1);
    write_file(dir.path(), "big1", 100);
    write_file(dir.path(), "big2", 100);

    let groups = group_by_size(scan_directory(dir.path(), None, 0).unwrap());
    let big = filter_groups(groups, |g| g.size >= 50 && g.has_duplicates());

    assert_eq!(big.len(), 1);
    assert_eq!(big[0].size, 100);
}

#[test]
fn test_finder_matches_manual_pipeline() {
    let dir = tempdir().unwrap();
    for (name, len) in [("a", 4), ("b", 4), ("c", 4), ("d", 9), ("e", 9), ("f", 1)] {
        write_file(dir.path(), name, len);
    }

    let manual = groups_with_exactly(2, group_by_size(scan_directory(dir.path(), None, 0).unwrap()));

    let finder = SizeGroupFinder::new(FinderConfig::default().with_filter(GroupFilter::Exactly(2)));
    let (groups, summary) = finder.find(dir.path()).unwrap();

    assert_eq!(groups.len(), manual.len());
    assert_eq!(groups[0].size, 9);
    assert_eq!(sorted_paths(&groups[0].paths), sorted_paths(&manual[0].paths));
    assert_eq!(summary.scan.kept, 6);
    assert_eq!(summary.grouping.unique_sizes, 3);
    assert_eq!(summary.matched_files, 2);
    assert_eq!(summary.reclaimable_space, 9);
}

#[test]
fn test_finder_min_size_and_pattern() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "photo1.jpg", 50);
    write_file(dir.path(), "photo2.jpg", 50);
    write_file(dir.path(), "thumb.jpg", 5);
    write_file(dir.path(), "copy_photo.jpg", 50);

    let scanner = ScannerConfig::new(Some(Regex::new("photo").unwrap()), 10);
    let finder = SizeGroupFinder::new(FinderConfig::default().with_scanner(scanner));
    let (groups, summary) = finder.find(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        sorted_paths(&groups[0].paths),
        vec![dir.path().join("photo1.jpg"), dir.path().join("photo2.jpg")]
    );
    assert_eq!(summary.scan.below_min_size, 1);
    // "photo" occurs in copy_photo.jpg, but not at the start
    assert_eq!(summary.scan.pattern_mismatch, 1);
}
