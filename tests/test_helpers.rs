// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试记录构造、临时库存表写出等功能
// ==========================================

#![allow(dead_code)]

use branch_rebalance::InputRecord;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

/// 库存表标准表头
pub const HEADER: &str = "name_en,branch_name,barcodes,available_quantity,brand,sale_price";

/// 构造一条输入记录
pub fn record(name: &str, branch: &str, barcodes: &str, qty: i64) -> InputRecord {
    InputRecord::new(name, branch, barcodes, qty)
}

/// 在临时目录中写出 CSV 库存表
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - PathBuf: 文件路径
pub fn write_csv(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("Failed to write csv");
    (dir, path)
}

/// 写出单个临时 CSV 文件（带 .csv 后缀）
pub fn temp_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// 按行拼出带标准表头的 CSV 内容
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}
