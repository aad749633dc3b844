use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_path").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn free_path_is_returned_unchanged() {
    let dir = scratch("free");
    let p = dir.join("out.gif");
    assert_eq!(unique_output_path(&p), p);
}

#[test]
fn collisions_get_incrementing_suffix() {
    let dir = scratch("collide");
    let p = dir.join("out.gif");
    std::fs::write(&p, b"original").unwrap();

    let first = unique_output_path(&p);
    assert_eq!(first, dir.join("out_1.gif"));
    std::fs::write(&first, b"x").unwrap();

    assert_eq!(unique_output_path(&p), dir.join("out_2.gif"));
    assert_eq!(std::fs::read(&p).unwrap(), b"original");
}

#[test]
fn extensionless_paths_are_suffixed_too() {
    let dir = scratch("noext");
    let p = dir.join("rain");
    std::fs::write(&p, b"").unwrap();
    assert_eq!(unique_output_path(&p), dir.join("rain_1"));
}

#[test]
fn create_unique_file_skips_taken_names() {
    let dir = scratch("create_new");
    let p = dir.join("out.gif");
    std::fs::write(&p, b"first").unwrap();
    std::fs::write(dir.join("out_1.gif"), b"second").unwrap();

    let (path, _file) = create_unique_file(&p).unwrap();
    assert_eq!(path, dir.join("out_2.gif"));
    assert_eq!(std::fs::read(&p).unwrap(), b"first");
    assert_eq!(std::fs::read(dir.join("out_1.gif")).unwrap(), b"second");

    let (next, _file) = create_unique_file(&p).unwrap();
    assert_eq!(next, dir.join("out_3.gif"));
}

#[test]
fn create_unique_file_uses_free_path_as_is() {
    let dir = scratch("create_free");
    let p = dir.join("rain.gif");
    let (path, _file) = create_unique_file(&p).unwrap();
    assert_eq!(path, p);
    assert!(p.is_file());
}

#[test]
fn create_unique_file_reports_missing_directory() {
    let dir = scratch("create_missing");
    let p = dir.join("nope").join("out.gif");
    assert!(create_unique_file(&p).is_err());
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let dir = scratch("parents");
    let p = dir.join("a").join("b").join("out.gif");
    ensure_parent_dir(&p).unwrap();
    assert!(dir.join("a").join("b").is_dir());
    ensure_parent_dir(Path::new("bare.gif")).unwrap();
}
