// ==========================================
// 门店库存调拨 - Excel 报表导出
// ==========================================
// 输出: 单个工作簿，BRANCH_SUGGESTIONS 表 + TRANSFERS 表（有调拨时）
// 列名/列序与 CSV 导出一致
// ==========================================

use crate::domain::inventory::{
    BranchSuggestion, RebalanceReport, TransferInstruction, SUGGESTION_COLUMNS, TRANSFER_COLUMNS,
};
use crate::report::csv_export::ExportResult;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::Path;
use tracing::debug;

pub const SUGGESTIONS_SHEET: &str = "BRANCH_SUGGESTIONS";
pub const TRANSFERS_SHEET: &str = "TRANSFERS";

enum Cell<'a> {
    Text(&'a str),
    Number(i64),
}

fn suggestion_cells(s: &BranchSuggestion) -> [Cell<'_>; 13] {
    [
        Cell::Text(&s.product_name),
        Cell::Text(&s.barcodes),
        Cell::Text(&s.sale_price),
        Cell::Text(&s.branch),
        Cell::Number(s.system_qty),
        Cell::Number(s.display_qty),
        Cell::Number(s.backstock),
        Cell::Number(s.need),
        Cell::Number(s.surplus),
        Cell::Text(&s.sku_flag),
        Cell::Number(s.suggested_transfer_qty),
        Cell::Text(&s.suggested_partner),
        Cell::Text(&s.action),
    ]
}

fn transfer_cells(t: &TransferInstruction) -> [Cell<'_>; 4] {
    [
        Cell::Text(t.key.as_str()),
        Cell::Text(&t.from),
        Cell::Text(&t.to),
        Cell::Number(t.qty),
    ]
}

/// 写表头 + 数据行
fn write_sheet<'a, R, const N: usize>(
    sheet: &mut Worksheet,
    header: &[&str],
    rows: R,
) -> Result<(), XlsxError>
where
    R: IntoIterator<Item = [Cell<'a>; N]>,
{
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (idx, cells) in rows.into_iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col as u16, *text)?,
                Cell::Number(n) => sheet.write_number(row, col as u16, *n as f64)?,
            };
        }
    }
    Ok(())
}

/// 导出 Excel 工作簿
///
/// 无调拨时不生成 TRANSFERS 表
pub fn write_workbook(path: &Path, report: &RebalanceReport) -> ExportResult<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUGGESTIONS_SHEET)?;
    write_sheet(
        sheet,
        &SUGGESTION_COLUMNS,
        report.suggestions.iter().map(suggestion_cells),
    )?;

    if !report.transfers.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(TRANSFERS_SHEET)?;
        write_sheet(
            sheet,
            &TRANSFER_COLUMNS,
            report.transfers.iter().map(transfer_cells),
        )?;
    }

    workbook.save(path)?;
    debug!(path = %path.display(), "Excel 报表已写出");
    Ok(())
}
