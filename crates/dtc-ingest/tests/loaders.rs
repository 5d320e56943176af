use std::fs;
use std::path::Path;

use dtc_ingest::{IngestError, load_dealer_table, load_personnel, load_requirement_tables};
use dtc_model::RequirementSource;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn personnel_rows_are_sanitized_and_split() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(
        dir.path(),
        "raw.csv",
        "عنوان نمایندگی,کد پرسنلی,نام و نام خانوادگی,company,عنوان شغل,شغل موازی (ارتقا),عنوان دوره,تلفن\n\
         1234 نمایندگی,100,علي رضايي,BDC,مکانیک دیزل,\"پذیرش, انباردار\",آشنایی با EFI,0912\n\
         1234 نمایندگی,,بدون کد,bdc,,,,\n",
    );
    let records = load_personnel(&path).expect("load personnel");
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.personnel_code, "100");
    assert_eq!(record.full_name, "علی رضایی");
    assert_eq!(record.company, "bdc");
    assert_eq!(record.main_position, "مکانیک دیزل");
    assert_eq!(record.alternate_positions, vec!["پذیرش", "انباردار"]);
    assert!(record.passed_courses.contains("آشناییباefi"));
    assert_eq!(record.extra.get("تلفن").map(String::as_str), Some("0912"));
}

#[test]
fn personnel_without_code_column_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(dir.path(), "raw.csv", "عنوان نمایندگی,نام و نام خانوادگی\nx,y\n");
    let error = load_personnel(&path).expect_err("missing column");
    assert!(matches!(error, IngestError::MissingColumn { .. }));
}

#[test]
fn missing_personnel_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(load_personnel(&dir.path().join("raw.csv")).is_err());
}

#[test]
fn dealer_flags_mark_authorized_categories() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write(
        dir.path(),
        "dealers.csv",
        "کد,نام,شهر,پژو,سمند,دنا\n1234,نمایندگی یک,تهران,p,,P\n5678,نمایندگی دو,قم,,x,\n",
    );
    let table = load_dealer_table(&path).expect("load dealers");
    assert_eq!(table.categories, vec!["پژو", "سمند", "دنا"]);
    let profiles = &table.profiles;
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].dealer_code, "1234");
    assert_eq!(profiles[0].dealer_name.as_deref(), Some("نمایندگی یک"));
    assert_eq!(profiles[0].authorized_categories, vec!["پژو", "دنا"]);
    assert!(profiles[1].authorized_categories.is_empty());
}

#[test]
fn requirement_tables_are_keyed_by_file_stem() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "after/bdc.csv",
        "پست کاری,نام خودرو,نام سرفصل,نام دوره آموزشی\n\
         تکنسین,,ایمنی,ایمنی کارگاه\n\
         تکنسین,پژو,موتور,موتور EF7\n",
    );
    write(dir.path(), "after/broken.csv", "ستون,دیگر\n1,2\n");
    write(dir.path(), "after/notes.txt", "ignored");

    let tables =
        load_requirement_tables(&dir.path().join("after"), RequirementSource::AfterSales)
            .expect("load after-sales");
    assert_eq!(tables.len(), 1);
    let rows = &tables["bdc"];
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].vehicle, None);
    assert_eq!(rows[0].course, "ایمنیکارگاه");
    assert_eq!(rows[1].vehicle.as_deref(), Some("پژو"));
    assert_eq!(rows[1].course, "موتورef7");
}

#[test]
fn sales_tables_ignore_vehicle_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(
        dir.path(),
        "sales/bdc.csv",
        "پست کاری,نام خودرو,نام سرفصل,نام دوره آموزشی\nمشاور,پژو,فن بیان,فن بیان\n",
    );
    let tables = load_requirement_tables(&dir.path().join("sales"), RequirementSource::Sales)
        .expect("load sales");
    assert_eq!(tables["bdc"][0].vehicle, None);
}

#[test]
fn missing_requirement_directory_yields_no_tables() {
    let dir = tempfile::tempdir().expect("temp dir");
    let tables = load_requirement_tables(&dir.path().join("after"), RequirementSource::AfterSales)
        .expect("load");
    assert!(tables.is_empty());
}
