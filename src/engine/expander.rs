// ==========================================
// 门店库存调拨 - 记录展开
// ==========================================
// 职责: 一条 InputRecord → 每个条码一行（无条码时一行占位）
// 红线: 同记录内重复条码不去重，每行携带完整父记录数量
// ==========================================

use crate::domain::inventory::{ExpandedRow, InputRecord, QuantityProfile};
use crate::domain::types::ProductKey;
use crate::engine::barcode::{normalize_key, split_barcodes};

pub struct RecordExpander;

impl RecordExpander {
    /// 展开单条记录
    ///
    /// # 参数
    /// - record: 输入记录
    /// - qty: 该记录的数量画像（已计算，仅复制）
    pub fn expand(record: &InputRecord, qty: QuantityProfile) -> Vec<ExpandedRow> {
        let make_row = |barcode: String, key: ProductKey| ExpandedRow {
            branch: record.branch.clone(),
            product_name: record.product_name.clone(),
            brand: record.brand.clone().unwrap_or_default(),
            sale_price: record.sale_price.clone().unwrap_or_default(),
            barcode,
            key,
            qty,
        };

        let barcodes = split_barcodes(&record.barcodes_raw);
        if barcodes.is_empty() {
            return vec![make_row(String::new(), ProductKey::unassigned())];
        }

        barcodes
            .into_iter()
            .map(|bc| {
                let key = normalize_key(&bc);
                make_row(bc, key)
            })
            .collect()
    }
}
