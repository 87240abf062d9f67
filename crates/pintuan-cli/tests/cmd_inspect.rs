//! Integration tests for `pintuan inspect`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::Command;

use rust_xlsxwriter::Workbook;

/// Path to the compiled `pintuan` binary.
fn pintuan_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    // current_exe lives in target/debug/deps; the binary is one level up.
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("pintuan");
    path
}

/// Builds the standard two-product order sheet.
fn standard_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("汇总表").expect("sheet name");
    worksheet
        .write_string(0, 0, "【测试】汇总表")
        .expect("write");
    worksheet.write_string(1, 1, "种类").expect("write");
    worksheet.write_string(1, 2, "A").expect("write");
    worksheet.write_string(1, 3, "B").expect("write");
    worksheet.write_string(2, 1, "单价").expect("write");
    worksheet.write_number(2, 2, 5.0).expect("write");
    worksheet.write_number(2, 3, 2.5).expect("write");
    worksheet.write_string(3, 0, "总金额").expect("write");
    worksheet.write_string(3, 1, "昵称/总数").expect("write");
    worksheet.write_number(4, 0, 5.0).expect("write");
    worksheet.write_string(4, 1, "alice").expect("write");
    worksheet.write_number(4, 2, 1.0).expect("write");
    worksheet.write_number(4, 3, 0.0).expect("write");
    worksheet.write_number(5, 0, 2.5).expect("write");
    worksheet.write_string(5, 1, "bob").expect("write");
    worksheet.write_number(5, 2, 1.0).expect("write");
    worksheet.write_number(5, 3, -1.0).expect("write");
    workbook.save_to_buffer().expect("save workbook")
}

/// Writes `bytes` to a named temporary file and returns it.
fn fixture_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(bytes).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}

// ---------------------------------------------------------------------------
// inspect: human mode
// ---------------------------------------------------------------------------

#[test]
fn inspect_standard_sheet_exit_0() {
    let f = fixture_file(&standard_workbook());
    let out = Command::new(pintuan_bin())
        .args(["inspect", f.path().to_str().expect("path")])
        .output()
        .expect("run pintuan inspect");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
}

#[test]
fn inspect_human_shows_period_and_products() {
    let f = fixture_file(&standard_workbook());
    let out = Command::new(pintuan_bin())
        .args(["inspect", f.path().to_str().expect("path")])
        .output()
        .expect("run pintuan inspect");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("period:"), "stdout: {stdout}");
    assert!(stdout.contains("【测试】"), "stdout: {stdout}");
    assert!(stdout.contains("products:"), "stdout: {stdout}");
    assert!(stdout.contains("A: 5"), "stdout: {stdout}");
    assert!(stdout.contains("B: 2.5"), "stdout: {stdout}");
}

#[test]
fn inspect_human_shows_anchor_rows() {
    let f = fixture_file(&standard_workbook());
    let out = Command::new(pintuan_bin())
        .args(["inspect", f.path().to_str().expect("path")])
        .output()
        .expect("run pintuan inspect");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("title_row:      1"), "stdout: {stdout}");
    assert!(stdout.contains("product_row:    2"), "stdout: {stdout}");
    assert!(stdout.contains("price_row:      3"), "stdout: {stdout}");
    assert!(stdout.contains("totals_row:     4"), "stdout: {stdout}");
    assert!(stdout.contains("data_rows:      2"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// inspect: JSON mode
// ---------------------------------------------------------------------------

#[test]
fn inspect_json_is_valid_and_complete() {
    let f = fixture_file(&standard_workbook());
    let out = Command::new(pintuan_bin())
        .args(["inspect", "-f", "json", f.path().to_str().expect("path")])
        .output()
        .expect("run pintuan inspect -f json");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let value: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("output is not valid JSON");
    assert_eq!(value["sheet"], "汇总表");
    assert_eq!(value["period_name"], "【测试】");
    assert_eq!(value["row_count"], 6);
    assert_eq!(value["data_row_count"], 2);
    assert_eq!(value["product_count"], 2);
    assert_eq!(value["products"][1]["name"], "B");
    assert_eq!(value["products"][1]["unit_price"], 2.5);
}

// ---------------------------------------------------------------------------
// inspect: stdin
// ---------------------------------------------------------------------------

#[test]
fn inspect_reads_from_stdin() {
    let bytes = standard_workbook();
    let mut child = Command::new(pintuan_bin())
        .args(["inspect", "-"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .spawn()
        .expect("spawn pintuan inspect -");
    child
        .stdin
        .as_mut()
        .expect("stdin")
        .write_all(&bytes)
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("period:"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// inspect: error cases
// ---------------------------------------------------------------------------

#[test]
fn inspect_nonexistent_file_exits_2() {
    let out = Command::new(pintuan_bin())
        .args(["inspect", "/no/such/file/ever.xlsx"])
        .output()
        .expect("run pintuan inspect nonexistent");
    assert_eq!(
        out.status.code(),
        Some(2),
        "expected exit 2 for nonexistent file"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not found"), "stderr: {stderr}");
}

#[test]
fn inspect_garbage_bytes_exits_2() {
    let f = fixture_file(b"this is not a workbook");
    let out = Command::new(pintuan_bin())
        .args(["inspect", f.path().to_str().expect("path")])
        .output()
        .expect("run pintuan inspect garbage");
    assert_eq!(
        out.status.code(),
        Some(2),
        "expected exit 2 for unreadable workbook"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("cannot read workbook"), "stderr: {stderr}");
}

#[test]
fn inspect_unknown_sheet_exits_1_with_code() {
    let f = fixture_file(&standard_workbook());
    let out = Command::new(pintuan_bin())
        .args([
            "inspect",
            "--sheet",
            "不存在",
            f.path().to_str().expect("path"),
        ])
        .output()
        .expect("run pintuan inspect --sheet");
    assert_eq!(out.status.code(), Some(1), "expected exit 1");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("MISSING_SHEET"), "stderr: {stderr}");
}
