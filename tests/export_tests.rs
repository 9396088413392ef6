use predicates::str::contains;
use std::fs;

mod common;
use common::{home_with_roster, rc, setup_home, temp_out};

#[test]
fn test_export_csv() {
    let home = home_with_roster("export_csv");
    let out = temp_out("export_csv", "csv");

    rc().args(["--home", &home, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,name,status,signed_at"));
    assert!(content.contains("1001,Anna Rossi,absent,"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_json() {
    let home = home_with_roster("export_json");
    let out = temp_out("export_json", "json");

    rc().args(["--home", &home, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["name"], "Carla Verdi");
    assert_eq!(rows[2]["status"], "absent");
}

#[test]
fn test_export_xlsx_default_format() {
    let home = home_with_roster("export_xlsx");
    let out = temp_out("export_xlsx", "xlsx");

    rc().args(["--home", &home, "export", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    assert!(fs::metadata(&out).expect("xlsx written").len() > 0);
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let home = home_with_roster("export_overwrite");
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    rc().args(["--home", &home, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rc().args([
        "--home", &home, "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Bruno Bianchi"));
}

#[test]
fn test_export_without_roster_fails() {
    let home = setup_home("export_empty");
    let out = temp_out("export_empty", "csv");

    rc().args(["--home", &home, "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("No roster loaded"));
}

#[test]
fn test_session_export_keeps_attendance() {
    let home = home_with_roster("export_session");
    let out = temp_out("export_session", "csv");

    rc().args(["--home", &home, "session"])
        .write_stdin(format!("select 3\nsign\nexport {}\nquit\n", out))
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("1003,Carla Verdi,present,"));
    assert!(content.contains("1001,Anna Rossi,absent,"));
}
