use memov2_core::config::loader::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_explicit_config_ok() {
    let tmp = tempdir().unwrap();
    let base = tmp.path().join("data");
    let cfg_path = tmp.path().join("config.toml");
    let toml = format!(
        r#"
base_dir = "{}"
todos_foldername = "t/"
memos_foldername = "m"
todos_daystoseek = 3
editor_command = ["true"]

[logging]
level = "debug"
"#,
        base.display()
    );
    write_file(&cfg_path, &toml);

    let rc = ConfigLoader::load_or_init(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.base_dir, base);
    assert_eq!(rc.todos_dir, base.join("t"));
    assert_eq!(rc.memos_dir, base.join("m"));
    assert_eq!(rc.todos_days_to_seek, 3);
    assert_eq!(rc.editor_command, vec!["true"]);
    assert_eq!(rc.logging.level, "debug");
    assert!(rc.todos_dir.is_dir());
    assert!(rc.memos_dir.is_dir());
}

#[test]
fn missing_config_is_created_with_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("memov2/config.toml");

    let rc = ConfigLoader::load_or_init(Some(&cfg_path)).expect("should init");

    assert!(cfg_path.is_file());
    assert_eq!(rc.base_dir, tmp.path().join("memov2/dailymemo/"));
    assert_eq!(rc.todos_dir, tmp.path().join("memov2/dailymemo/todos"));
    assert_eq!(rc.memos_dir, tmp.path().join("memov2/dailymemo/memos"));
    assert_eq!(rc.todos_days_to_seek, 10);
    assert_eq!(rc.editor_command[0], "code");
    assert_eq!(rc.logging.level, "warn");
    assert!(rc.todos_dir.is_dir() && rc.memos_dir.is_dir());

    let text = fs::read_to_string(&cfg_path).unwrap();
    assert!(text.contains("todos_foldername = \"todos/\""));
    assert!(text.contains("todos_daystoseek = 10"));
}

#[test]
fn base_dir_defaults_next_to_config_file() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("memov2/config.toml");
    write_file(&cfg_path, "todos_daystoseek = 5\n");

    let rc = ConfigLoader::load_or_init(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.base_dir, tmp.path().join("memov2/dailymemo"));
    assert_eq!(rc.todos_dir, tmp.path().join("memov2/dailymemo/todos"));
    assert_eq!(rc.memos_dir, tmp.path().join("memov2/dailymemo/memos"));
    assert_eq!(rc.todos_days_to_seek, 5);
    assert!(rc.todos_dir.is_dir() && rc.memos_dir.is_dir());
    assert_eq!(fs::read_to_string(&cfg_path).unwrap(), "todos_daystoseek = 5\n");
}

#[test]
fn second_load_reads_written_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");

    let first = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap();
    let second = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap();
    assert_eq!(first.base_dir, second.base_dir);
    assert_eq!(first.memos_dir, second.memos_dir);
}

#[test]
fn log_file_path_is_expanded() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = format!(
        "base_dir = \"{}\"\n\n[logging]\nlevel = \"info\"\nfile = \"{}/memov2.log\"\n",
        tmp.path().join("data").display(),
        tmp.path().display()
    );
    write_file(&cfg_path, &toml);

    let rc = ConfigLoader::load_or_init(Some(&cfg_path)).unwrap();
    assert_eq!(rc.logging.file, Some(tmp.path().join("memov2.log")));
    assert_eq!(rc.logging.file_level, None);
}
