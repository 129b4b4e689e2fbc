// ==========================================
// 门店库存调拨 - 报表层
// ==========================================
// 职责: 结果表导出（CSV / JSON / Excel）
// ==========================================

pub mod csv_export;
pub mod xlsx_export;

pub use csv_export::{report_base_name, write_report, write_table, ExportError, ExportResult};
pub use xlsx_export::{write_workbook, SUGGESTIONS_SHEET, TRANSFERS_SHEET};
