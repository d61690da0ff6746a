use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// Command isolated from the caller's environment, config dir and `.env`
fn movie_rename(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("movie-rename").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("TMDB_API_KEY")
        .env_remove("TMDB_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("movie-rename.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();

    movie_rename(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rename movie files"));
}

#[test]
fn test_version_flag() {
    let home = tempdir().unwrap();

    movie_rename(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_nonexistent_path() {
    let home = tempdir().unwrap();

    movie_rename(home.path())
        .arg("/nonexistent/path/12345")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_missing_config_file() {
    let home = tempdir().unwrap();

    movie_rename(home.path())
        .args(["--config", "/nonexistent/movie-rename.toml"])
        .arg(home.path())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_template_in_config() {
    let home = tempdir().unwrap();
    let config = write_config(home.path(), "movie_format = \"{n} {x}\"\n");

    movie_rename(home.path())
        .arg("--config")
        .arg(&config)
        .arg(home.path())
        .assert()
        .code(4);
}

#[test]
fn test_unknown_action_in_config() {
    let home = tempdir().unwrap();
    let config = write_config(home.path(), "action = \"symlink\"\n");

    movie_rename(home.path())
        .arg("--config")
        .arg(&config)
        .arg(home.path())
        .assert()
        .code(4);
}

#[test]
fn test_empty_directory_needs_no_key() {
    let home = tempdir().unwrap();
    let movies = tempdir().unwrap();

    movie_rename(home.path())
        .arg(movies.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No movie files to rename"));
}

#[test]
fn test_missing_key_with_movies() {
    let home = tempdir().unwrap();
    let movies = tempdir().unwrap();
    std::fs::write(movies.path().join("Heat.1995.mkv"), b"movie").unwrap();

    movie_rename(home.path())
        .arg(movies.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_lookup_failure_leaves_files_alone() {
    let home = tempdir().unwrap();
    let movies = tempdir().unwrap();
    let source = movies.path().join("Heat.1995.mkv");
    std::fs::write(&source, b"movie").unwrap();
    let config = write_config(home.path(), "action = \"move\"\n");

    movie_rename(home.path())
        .env("TMDB_API_KEY", "dummy")
        .env("TMDB_BASE_URL", "http://127.0.0.1:9")
        .arg("--config")
        .arg(&config)
        .arg(movies.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Lookup failed"));

    assert!(source.exists());
    assert_eq!(std::fs::read_dir(movies.path()).unwrap().count(), 1);
}

#[test]
fn test_demo_without_key() {
    let home = tempdir().unwrap();

    movie_rename(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sample file names"))
        .stdout(predicate::str::contains("Parsed: \"The Matrix\" (1999)"))
        .stdout(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_verbose_flag() {
    let home = tempdir().unwrap();
    let movies = tempdir().unwrap();

    movie_rename(home.path())
        .args(["-vv"])
        .arg(movies.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration loaded"));
}
