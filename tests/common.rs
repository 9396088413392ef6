#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rc() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Fresh application directory inside the system temp dir
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rollcall_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a CSV roster next to the test home and return its path
pub fn write_roster(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_roster.csv", name));
    fs::write(&path, content).expect("write roster");
    path.to_string_lossy().to_string()
}

/// Home with a three-student roster already imported
pub fn home_with_roster(name: &str) -> String {
    let home = setup_home(name);
    let roster = write_roster(
        name,
        "student_id,name,class\n1001,Anna Rossi,3A\n1002,Bruno Bianchi,3A\n1003,Carla Verdi,3B\n",
    );

    rc().args(["--home", &home, "import", &roster])
        .assert()
        .success();

    home
}
