use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use rust_xlsxwriter::Workbook;
use std::env;
use std::fs;

mod common;
use common::{home_with_roster, rc, setup_home, write_roster};

#[test]
fn test_import_csv_and_list() {
    let home = setup_home("import_csv");
    let roster = write_roster(
        "import_csv",
        "学号,姓名\n 1 , Anna \n,\n2,Bruno\n",
    );

    rc().args(["--home", &home, "import", &roster])
        .assert()
        .success()
        .stdout(contains("Imported 2 students"))
        .stdout(contains("Total: 2 | Present: 0 | Absent: 2"));

    rc().args(["--home", &home, "list"])
        .assert()
        .success()
        .stdout(contains("Anna"))
        .stdout(contains("Bruno"))
        .stdout(contains("absent"));
}

#[test]
fn test_import_xlsx_numeric_ids() {
    let home = setup_home("import_xlsx");
    let path = env::temp_dir().join("import_xlsx_roster.xlsx");
    fs::remove_file(&path).ok();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Student_ID").unwrap();
    sheet.write_string(0, 1, "学生姓名").unwrap();
    sheet.write_number(1, 0, 2024001).unwrap();
    sheet.write_string(1, 1, "Dario").unwrap();
    sheet.write_number(2, 0, 2024002).unwrap();
    sheet.write_string(2, 1, "Elena").unwrap();
    workbook.save(&path).unwrap();

    rc().args(["--home", &home, "import", &path.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("Imported 2 students"));

    rc().args(["--home", &home, "list"])
        .assert()
        .success()
        .stdout(contains("2024001"))
        .stdout(contains("2024001.0").not())
        .stdout(contains("Elena"));
}

#[test]
fn test_import_missing_name_column() {
    let home = setup_home("import_missing_col");
    let roster = write_roster("import_missing_col", "学号,class\n1,3A\n");

    rc().args(["--home", &home, "import", &roster])
        .assert()
        .failure()
        .stderr(contains("Missing column for 'name'"));
}

#[test]
fn test_import_empty_file() {
    let home = setup_home("import_empty");
    let roster = write_roster("import_empty", "");

    rc().args(["--home", &home, "import", &roster])
        .assert()
        .failure()
        .stderr(contains("no content"));
}

#[test]
fn test_import_unsupported_extension() {
    let home = setup_home("import_txt");
    let path = env::temp_dir().join("import_txt_roster.txt");
    fs::write(&path, "id,name\n1,A\n").unwrap();

    rc().args(["--home", &home, "import", &path.to_string_lossy()])
        .assert()
        .failure()
        .stderr(contains("Unsupported file type"));
}

#[test]
fn test_failed_import_keeps_previous_roster() {
    let home = home_with_roster("import_keep");
    let bad = write_roster("import_keep_bad", "foo,bar\n1,2\n");

    rc().args(["--home", &home, "import", &bad])
        .assert()
        .failure();

    rc().args(["--home", &home, "list"])
        .assert()
        .success()
        .stdout(contains("Anna Rossi"));
}

#[test]
fn test_list_search() {
    let home = home_with_roster("list_search");

    rc().args(["--home", &home, "list", "--search", "Bru"])
        .assert()
        .success()
        .stdout(contains("Bruno Bianchi"))
        .stdout(contains("Anna Rossi").not());

    rc().args(["--home", &home, "list", "--search", "nobody"])
        .assert()
        .success()
        .stdout(contains("No student matches"));
}

#[test]
fn test_list_without_roster() {
    let home = setup_home("list_empty");

    rc().args(["--home", &home, "list"])
        .assert()
        .success()
        .stdout(contains("No roster cached"));
}

#[test]
fn test_pick_is_capped_by_roster_size() {
    let home = home_with_roster("pick_cap");

    rc().args(["--home", &home, "pick", "-n", "5"])
        .assert()
        .success()
        .stdout(contains("Only 3 students"))
        .stdout(contains("Anna Rossi"))
        .stdout(contains("Bruno Bianchi"))
        .stdout(contains("Carla Verdi"));
}
