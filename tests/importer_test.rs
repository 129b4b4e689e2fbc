// ==========================================
// 导入 + API 集成测试
// ==========================================
// 测试目标: 库存表文件 → 记录 → 报告 → 导出文件
// ==========================================

mod test_helpers;

use branch_rebalance::config::RebalanceParams;
use branch_rebalance::importer::{ImportError, InventoryImporter, InventoryImporterImpl};
use branch_rebalance::logging;
use branch_rebalance::{ApiError, ParsedQty, RebalanceApi};
use test_helpers::{csv_with_rows, temp_csv, write_csv};

#[tokio::test]
async fn test_import_csv_basic() {
    logging::init_test();

    let file = temp_csv(&csv_with_rows(&[
        "Milk,A,00123,10,Acme,2.50",
        "Milk,B,123,0,Acme,2.50",
        "Bread,A,456,abc,,",
    ]));

    let importer = InventoryImporterImpl::default();
    let records = importer
        .import_files(vec![file.path().to_path_buf()])
        .await
        .expect("Import should succeed");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].product_name, "Milk");
    assert_eq!(records[0].barcodes_raw, "00123");
    assert_eq!(records[0].on_hand, ParsedQty::Parsed(10));
    assert_eq!(records[0].brand.as_deref(), Some("Acme"));
    assert_eq!(records[0].row_number, 1);

    // 非数字数量 → 0，并保留标记
    assert_eq!(records[2].on_hand, ParsedQty::Defaulted);
    assert_eq!(records[2].brand, None);
}

#[tokio::test]
async fn test_multiple_files_merged_in_order() {
    let (_dir_a, path_a) = write_csv("branch_a.csv", &csv_with_rows(&["Milk,A,123,10,,"]));
    let (_dir_b, path_b) = write_csv("branch_b.csv", &csv_with_rows(&["Milk,B,123,0,,"]));

    let api = RebalanceApi::default();
    let report = api
        .rebalance_files(vec![path_a, path_b], RebalanceParams::default())
        .await
        .expect("rebalance should succeed");

    assert_eq!(report.summary.input_records, 2);
    assert_eq!(report.suggestions[0].branch, "A");
    assert_eq!(report.suggestions[1].branch, "B");
    assert_eq!(report.transfers.len(), 1);
    assert_eq!(report.transfers[0].qty, 3);
}

#[tokio::test]
async fn test_missing_columns_abort_run() {
    let file = temp_csv("name_en,branch_name\nMilk,A\n");

    let api = RebalanceApi::default();
    let err = api
        .rebalance_files(vec![file.path().to_path_buf()], RebalanceParams::default())
        .await
        .unwrap_err();

    assert!(err.is_missing_columns());
    match err {
        ApiError::Import(ImportError::MissingColumns(missing)) => {
            assert_eq!(missing, vec!["barcodes", "available_quantity"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_file_reported() {
    let api = RebalanceApi::default();
    let err = api
        .rebalance_files(
            vec!["does/not/exist.csv".into()],
            RebalanceParams::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Import(ImportError::FileNotFound(_))));
}

#[tokio::test]
async fn test_invalid_params_rejected() {
    let file = temp_csv(&csv_with_rows(&["Milk,A,123,10,,"]));
    let api = RebalanceApi::default();
    let err = api
        .rebalance_files(vec![file.path().to_path_buf()], RebalanceParams::new(1, -1, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Config(_)));
}

#[tokio::test]
async fn test_export_writes_report_files() {
    let file = temp_csv(&csv_with_rows(&["Milk,A,123,10,,", "Milk,B,123,0,,"]));
    let out = tempfile::TempDir::new().expect("Failed to create temp dir");

    let api = RebalanceApi::default();
    let report = api
        .rebalance_files(vec![file.path().to_path_buf()], RebalanceParams::default())
        .await
        .expect("rebalance should succeed");
    let written = api.export(&report, out.path()).expect("export should succeed");

    // 建议表 + 调拨表 + 汇总 + 工作簿
    assert_eq!(written.len(), 4);
    assert!(written.iter().all(|p| p.exists()));

    let suggestions = std::fs::read_to_string(&written[0]).expect("read suggestions");
    let header = suggestions.lines().next().unwrap_or_default();
    assert!(header.starts_with("Product name,Barcodes,Sale Price,Branch"));
    assert!(header.ends_with("Suggested Partner,Action"));
    assert!(suggestions.contains("Prepare Receiving — Expect 3 units from A"));

    let transfers = std::fs::read_to_string(&written[1]).expect("read transfers");
    assert_eq!(transfers.lines().next(), Some("Key,From,To,Qty"));
    assert_eq!(transfers.lines().nth(1), Some("123,A,B,3"));
}

#[tokio::test]
async fn test_export_without_transfers_skips_transfer_file() {
    let file = temp_csv(&csv_with_rows(&["Milk,A,123,1,,"]));
    let out = tempfile::TempDir::new().expect("Failed to create temp dir");

    let api = RebalanceApi::default();
    let report = api
        .rebalance_files(vec![file.path().to_path_buf()], RebalanceParams::default())
        .await
        .expect("rebalance should succeed");
    assert!(report.transfers.is_empty());

    let written = api.export(&report, out.path()).expect("export should succeed");
    assert_eq!(written.len(), 3);
    assert!(written[1].to_string_lossy().ends_with("_summary.json"));
}
