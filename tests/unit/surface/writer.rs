use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("surface_writer").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn home_only_writes_home_png() {
    let dir = scratch("home_only");
    let mut writer = DirectorySurfaceWriter::new(&dir);
    let buf = PixelBuffer::filled(3, 2, [10, 20, 30, 255]).unwrap();
    writer.write(&buf, SurfaceFlags::HOME).unwrap();

    assert!(dir.join("home.png").is_file());
    assert!(!dir.join("lock.png").exists());

    let img = image::open(dir.join("home.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn both_writes_both_files_and_leaves_no_staging() {
    let dir = scratch("both");
    let mut writer = DirectorySurfaceWriter::new(&dir);
    let buf = PixelBuffer::filled(1, 1, [0, 0, 0, 0]).unwrap();
    writer.write(&buf, SurfaceFlags::all()).unwrap();

    assert!(dir.join("home.png").is_file());
    assert!(dir.join("lock.png").is_file());
    let leftovers = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn empty_flags_are_rejected() {
    let mut writer = DirectorySurfaceWriter::new(scratch("empty"));
    let buf = PixelBuffer::filled(1, 1, [0, 0, 0, 0]).unwrap();
    assert!(writer.write(&buf, SurfaceFlags::empty()).is_err());
}

#[test]
fn memory_writer_records_in_order() {
    let mut writer = MemorySurfaceWriter::new();
    let a = PixelBuffer::filled(1, 1, [1, 1, 1, 1]).unwrap();
    let b = PixelBuffer::filled(1, 1, [2, 2, 2, 2]).unwrap();
    writer.write(&a, SurfaceFlags::HOME).unwrap();
    writer.write(&b, SurfaceFlags::LOCK).unwrap();
    assert_eq!(writer.writes()[0], (SurfaceFlags::HOME, a));
    assert_eq!(writer.writes()[1], (SurfaceFlags::LOCK, b));
    assert_eq!(writer.count_touching(SurfaceFlags::all()), 2);
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn both_is_all_or_nothing_when_a_surface_is_blocked() {
    let dir = scratch("blocked_lock");
    std::fs::create_dir_all(dir.join("lock.png").join("blocker")).unwrap();
    std::fs::write(dir.join("home.png"), b"previous home").unwrap();

    let mut writer = DirectorySurfaceWriter::new(&dir);
    let buf = PixelBuffer::filled(2, 2, [5, 6, 7, 255]).unwrap();
    assert!(writer.write(&buf, SurfaceFlags::all()).is_err());

    assert_eq!(std::fs::read(dir.join("home.png")).unwrap(), b"previous home");
    assert!(dir.join("lock.png").join("blocker").is_dir());
    assert_eq!(entries(&dir), ["home.png", "lock.png"]);
}

#[test]
fn failed_commit_restores_previous_surfaces() {
    let dir = scratch("rollback");
    std::fs::create_dir_all(&dir).unwrap();
    let home = dir.join("home.png");
    let lock = dir.join("lock.png");
    std::fs::write(&home, b"old home").unwrap();
    std::fs::write(&lock, b"old lock").unwrap();
    std::fs::write(dir.join("home.png.tmp"), b"new").unwrap();

    // Second staged file is missing, so its rename fails after home was swapped in.
    let staged = [
        (dir.join("home.png.tmp"), home.clone()),
        (dir.join("lock.png.tmp"), lock.clone()),
    ];
    assert!(commit_staged(&staged).is_err());

    assert_eq!(std::fs::read(&home).unwrap(), b"old home");
    assert_eq!(std::fs::read(&lock).unwrap(), b"old lock");
    assert_eq!(entries(&dir), ["home.png", "lock.png"]);
}

#[test]
fn overwrite_replaces_both_and_drops_backups() {
    let dir = scratch("overwrite");
    let mut writer = DirectorySurfaceWriter::new(&dir);
    let first = PixelBuffer::filled(1, 1, [1, 1, 1, 255]).unwrap();
    let second = PixelBuffer::filled(1, 1, [9, 9, 9, 255]).unwrap();
    writer.write(&first, SurfaceFlags::all()).unwrap();
    writer.write(&second, SurfaceFlags::all()).unwrap();

    for name in ["home.png", "lock.png"] {
        let img = image::open(dir.join(name)).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [9, 9, 9, 255]);
    }
    assert_eq!(entries(&dir), ["home.png", "lock.png"]);
}
