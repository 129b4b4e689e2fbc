// ==========================================
// 门店库存调拨 - 库存领域模型
// ==========================================
// 职责: 输入记录 → 展开行 → 聚合行 → 调拨指令 → 建议行
// 红线: 所有实体仅在单次运行内有效，不跨运行共享
// ==========================================

use crate::config::RebalanceParams;
use crate::domain::types::{ParsedQty, ProductKey, SkuFlag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// 建议表输出列（顺序即导出顺序）
pub const SUGGESTION_COLUMNS: [&str; 13] = [
    "Product name",
    "Barcodes",
    "Sale Price",
    "Branch",
    "System Qty",
    "Display Qty",
    "Backstock",
    "Need",
    "Surplus",
    "Sku Flag",
    "Suggested Transfer Qty",
    "Suggested Partner",
    "Action",
];

/// 调拨表输出列
pub const TRANSFER_COLUMNS: [&str; 4] = ["Key", "From", "To", "Qty"];

// ==========================================
// InputRecord - 上传表格中的一行
// ==========================================
// 用途: 导入层写入，引擎层只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub product_name: String,        // name_en
    pub branch: String,              // branch_name
    pub barcodes_raw: String,        // barcodes（可能含多个条码）
    pub on_hand: ParsedQty,          // available_quantity（已强制转换）
    pub brand: Option<String>,       // brand（可选列）
    pub sale_price: Option<String>,  // sale_price（可选列）

    // ===== 元信息 =====
    pub source: String,   // 来源文件
    pub row_number: usize, // 合并表中的行号（从 1 开始）
}

impl InputRecord {
    /// 构造最小记录（测试与内存调用方使用）
    pub fn new(
        product_name: impl Into<String>,
        branch: impl Into<String>,
        barcodes_raw: impl Into<String>,
        on_hand: i64,
    ) -> Self {
        let on_hand = if on_hand < 0 {
            ParsedQty::Clamped(on_hand)
        } else {
            ParsedQty::Parsed(on_hand)
        };
        Self {
            product_name: product_name.into(),
            branch: branch.into(),
            barcodes_raw: barcodes_raw.into(),
            on_hand,
            brand: None,
            sale_price: None,
            source: String::new(),
            row_number: 0,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_sale_price(mut self, sale_price: impl Into<String>) -> Self {
        self.sale_price = Some(sale_price.into());
        self
    }

    pub fn on_hand_qty(&self) -> i64 {
        self.on_hand.value()
    }
}

// ==========================================
// QuantityProfile - 数量模型输出
// ==========================================
// 在 InputRecord 上计算一次，之后只复制、求和，不再重算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityProfile {
    pub system_qty: i64,
    pub display_qty: i64,
    pub backstock: i64,
    pub need: i64,
    pub surplus: i64,
}

// 组内求和饱和到 i64::MAX，不溢出
impl AddAssign for QuantityProfile {
    fn add_assign(&mut self, rhs: Self) {
        self.system_qty = self.system_qty.saturating_add(rhs.system_qty);
        self.display_qty = self.display_qty.saturating_add(rhs.display_qty);
        self.backstock = self.backstock.saturating_add(rhs.backstock);
        self.need = self.need.saturating_add(rhs.need);
        self.surplus = self.surplus.saturating_add(rhs.surplus);
    }
}

// ==========================================
// ExpandedRow - 按条码展开后的行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedRow {
    pub branch: String,
    pub product_name: String,
    pub brand: String,
    pub sale_price: String,
    pub barcode: String, // 原始条码（无条码时为空）
    pub key: ProductKey, // 归一化键（无条码时为未分配键）
    pub qty: QuantityProfile,
}

// ==========================================
// AggregatedRow - (键, 门店) 聚合行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub key: ProductKey,
    pub branch: String,
    pub product_name: String, // 首个成员
    pub brand: String,        // 首个成员
    pub barcodes: String,     // 去重排序后以 ',' 连接
    pub sale_price: String,   // 首个成员
    pub qty: QuantityProfile, // 成员求和
    pub member_count: usize,
}

// ==========================================
// TransferInstruction - 调拨指令
// ==========================================
// 仅由匹配器产生，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInstruction {
    #[serde(rename = "Key")]
    pub key: ProductKey,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Qty")]
    pub qty: i64,
}

// ==========================================
// BranchSuggestion - 建议表输出行
// ==========================================
// 字段名即导出列名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSuggestion {
    #[serde(skip)]
    pub key: ProductKey,
    #[serde(skip)]
    pub brand: String,
    #[serde(skip)]
    pub flag: Option<SkuFlag>,

    #[serde(rename = "Product name")]
    pub product_name: String,
    #[serde(rename = "Barcodes")]
    pub barcodes: String,
    #[serde(rename = "Sale Price")]
    pub sale_price: String,
    #[serde(rename = "Branch")]
    pub branch: String,
    #[serde(rename = "System Qty")]
    pub system_qty: i64,
    #[serde(rename = "Display Qty")]
    pub display_qty: i64,
    #[serde(rename = "Backstock")]
    pub backstock: i64,
    #[serde(rename = "Need")]
    pub need: i64,
    #[serde(rename = "Surplus")]
    pub surplus: i64,
    #[serde(rename = "Sku Flag")]
    pub sku_flag: String,
    #[serde(rename = "Suggested Transfer Qty")]
    pub suggested_transfer_qty: i64,
    #[serde(rename = "Suggested Partner")]
    pub suggested_partner: String,
    #[serde(rename = "Action")]
    pub action: String,
}

// ==========================================
// RebalanceSummary - 单次运行汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub params: RebalanceParams,

    // ===== 输入 =====
    pub input_records: usize,
    pub defaulted_quantities: usize,
    pub clamped_quantities: usize,

    // ===== 中间结果 =====
    pub expanded_rows: usize,
    pub aggregated_rows: usize,
    pub distinct_keys: usize,

    // ===== 调拨 =====
    pub transfers: usize,
    pub units_moved: i64,
    pub unmet_need: i64,
    pub unused_surplus: i64,

    /// 按 Sku Flag 分类计数（TRANSFER/OVERSTOCK/NEED_STOCK/BALANCED）
    pub flag_counts: BTreeMap<String, usize>,
}

// ==========================================
// RebalanceReport - 引擎输出（两张表 + 汇总）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceReport {
    pub suggestions: Vec<BranchSuggestion>,
    pub transfers: Vec<TransferInstruction>,
    pub summary: RebalanceSummary,
}

impl RebalanceReport {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty() && self.transfers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_profile_add_assign() {
        let mut total = QuantityProfile::default();
        total += QuantityProfile {
            system_qty: 5,
            display_qty: 1,
            backstock: 4,
            need: 0,
            surplus: 2,
        };
        total += QuantityProfile {
            system_qty: 0,
            display_qty: 0,
            backstock: 0,
            need: 3,
            surplus: 0,
        };
        assert_eq!(total.system_qty, 5);
        assert_eq!(total.need, 3);
        assert_eq!(total.surplus, 2);
    }

    #[test]
    fn test_quantity_profile_add_assign_saturates() {
        let huge = QuantityProfile {
            system_qty: i64::MAX,
            display_qty: 1,
            backstock: i64::MAX - 1,
            need: 0,
            surplus: i64::MAX - 3,
        };
        let mut total = huge;
        total += huge;
        assert_eq!(total.system_qty, i64::MAX);
        assert_eq!(total.backstock, i64::MAX);
        assert_eq!(total.surplus, i64::MAX);
        assert_eq!(total.display_qty, 2);
    }

    #[test]
    fn test_input_record_negative_is_clamped() {
        let record = InputRecord::new("Milk", "A", "123", -3);
        assert_eq!(record.on_hand, ParsedQty::Clamped(-3));
        assert_eq!(record.on_hand_qty(), 0);
    }

    #[test]
    fn test_transfer_instruction_column_names() {
        let t = TransferInstruction {
            key: ProductKey::new("123"),
            from: "A".to_string(),
            to: "B".to_string(),
            qty: 3,
        };
        let json = serde_json::to_value(&t).unwrap();
        for col in TRANSFER_COLUMNS {
            assert!(json.get(col).is_some(), "missing column {}", col);
        }
    }
}
