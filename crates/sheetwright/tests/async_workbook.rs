#![cfg(feature = "async")]

mod common;

use common::{cell, cells, part, shared_strings};
use sheetwright::prelude::*;

#[tokio::test]
async fn test_async_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.xlsx");

    let workbook = AsyncWorkbook::new();
    let data = workbook.add_worksheet_with_name("Data").await.unwrap();
    workbook.add_worksheet_with_name("Summary").await.unwrap();
    workbook.write_string(data, 0, 0, "Hello").await.unwrap();
    workbook.write_number(data, 1, 0, 3.14159).await.unwrap();
    workbook.set_column_width(data, 0, 0.0).await.unwrap();
    workbook.save(&path).await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(shared_strings(&bytes), vec!["Hello"]);

    let sheet = cells(&part(&bytes, "xl/worksheets/sheet1.xml"));
    assert_eq!(cell(&sheet, "A2").value.as_deref(), Some("3.14159"));
    assert!(part(&bytes, "xl/workbook.xml").contains(r#"name="Summary""#));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_async_concurrent_writes_all_land() {
    let workbook = AsyncWorkbook::new();
    let sheet = workbook.add_worksheet().await.unwrap();

    let tasks: Vec<_> = (0..8u16)
        .map(|col| {
            let wb = workbook.clone();
            tokio::spawn(async move {
                for row in 0..25u32 {
                    wb.write_integer(sheet, row, col, row as i64).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let bytes = workbook.save_to_buffer().await.unwrap();
    let sheet = cells(&part(&bytes, "xl/worksheets/sheet1.xml"));
    assert_eq!(sheet.len(), 200);
    assert_eq!(cell(&sheet, "H25").value.as_deref(), Some("24"));
}

#[tokio::test]
async fn test_async_failed_save_keeps_workbook_open() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing").join("out.xlsx");

    let workbook = AsyncWorkbook::new();
    let sheet = workbook.add_worksheet().await.unwrap();

    assert!(matches!(workbook.save(missing).await, Err(Error::Io(_))));
    workbook.write_boolean(sheet, 0, 0, true).await.unwrap();
}
