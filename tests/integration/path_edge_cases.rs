use sizedupe::duplicates::SizeGroupFinder;
use sizedupe::scanner::{scan_directory, ScanError, Scanner, ScannerConfig};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_paths_with_spaces_and_unicode() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("my notes.txt"))
        .unwrap()
        .write_all(b"content")
        .unwrap();
    File::create(dir.path().join("café.txt"))
        .unwrap()
        .write_all(b"content")
        .unwrap();

    let (groups, _) = SizeGroupFinder::with_defaults().find(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0]
        .paths
        .iter()
        .any(|p| p.to_string_lossy().contains("my notes")));
    assert!(groups[0]
        .paths
        .iter()
        .any(|p| p.to_string_lossy().contains("café")));
}

#[test]
fn test_paths_with_newlines() {
    let dir = tempdir().unwrap();

    // Windows does not allow newlines in filenames.
    if cfg!(not(windows)) {
        File::create(dir.path().join("file_with\nnewline.txt"))
            .unwrap()
            .write_all(b"content")
            .unwrap();
        File::create(dir.path().join("plain.txt"))
            .unwrap()
            .write_all(b"content")
            .unwrap();

        let (groups, _) = SizeGroupFinder::with_defaults().find(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups[0]
            .paths
            .iter()
            .any(|p| p.to_string_lossy().contains('\n')));
    }
}

#[test]
fn test_only_subdirectories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("one")).unwrap();
    fs::create_dir(dir.path().join("two")).unwrap();
    fs::write(dir.path().join("one").join("x.txt"), b"same").unwrap();
    fs::write(dir.path().join("two").join("y.txt"), b"same").unwrap();

    let (files, stats) = Scanner::new(dir.path(), ScannerConfig::default())
        .scan()
        .unwrap();

    assert!(files.is_empty());
    assert_eq!(stats.not_regular, 2);
}

#[test]
fn test_relative_directory_paths_are_kept_relative() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"12345").unwrap();

    let files = scan_directory(dir.path(), None, 0).unwrap();
    assert_eq!(files[0].path, dir.path().join("a.txt"));

    // A relative root yields relative entry paths.
    let relative = Path::new(".");
    if let Ok(files) = scan_directory(relative, None, 0) {
        assert!(files.iter().all(|f| f.path.starts_with(relative)));
    }
}

#[test]
#[cfg(unix)]
fn test_special_files_are_skipped() {
    use std::os::unix::net::UnixListener;

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("regular.txt"), b"data").unwrap();
    let _listener = UnixListener::bind(dir.path().join("socket")).unwrap();

    let (files, stats) = Scanner::new(dir.path(), ScannerConfig::default())
        .scan()
        .unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("regular.txt"));
    assert_eq!(stats.not_regular, 1);
}

#[test]
#[cfg(unix)]
fn test_unreadable_directory_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("a.txt"), b"data").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can list the directory anyway.
    let readable = fs::read_dir(&locked).is_ok();
    let result = scan_directory(&locked, None, 0);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if readable {
        assert!(result.is_ok());
    } else {
        match result {
            Err(err @ ScanError::PermissionDenied(_)) => assert!(err.is_invalid_directory()),
            other => panic!("Expected PermissionDenied, got {:?}", other),
        }
    }
}
