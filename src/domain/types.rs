// ==========================================
// 门店库存调拨 - 领域类型定义
// ==========================================
// 职责: 商品键 / SKU 标记 / 数量解析结果
// 红线: 纯值类型，不含 I/O
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 商品键 (Product Key)
// ==========================================
// 条码归一化后的匹配键；空字符串 = 未提供条码（哨兵值）
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductKey(String);

impl ProductKey {
    pub fn new(key: impl Into<String>) -> Self {
        ProductKey(key.into())
    }

    /// 未分配键（无条码行）
    pub fn unassigned() -> Self {
        ProductKey(String::new())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ==========================================
// SKU 标记分类 (Sku Flag Category)
// ==========================================
// 无调拨动作时的兜底分类；有动作时 Sku Flag 直接使用动作文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkuFlag {
    Transfer,  // 存在调拨动作
    Overstock, // 超储
    NeedStock, // 缺货
    Balanced,  // 平衡
}

impl SkuFlag {
    /// 兜底分类的显示文本（Transfer 无固定文本，由动作文本替代）
    pub fn label(&self) -> &'static str {
        match self {
            SkuFlag::Transfer => "Transfer",
            SkuFlag::Overstock => "Overstock — keep or transfer",
            SkuFlag::NeedStock => "Need stock — consider PO",
            SkuFlag::Balanced => "Balanced",
        }
    }

    /// 无调拨动作时的人工指令
    pub fn fallback_action(&self) -> &'static str {
        match self {
            SkuFlag::Overstock => "Review Overstock — Consider markdown or future transfer",
            SkuFlag::NeedStock => "Create PO — Replenish stock for this SKU",
            SkuFlag::Balanced => "No action needed",
            SkuFlag::Transfer => "Review",
        }
    }
}

impl fmt::Display for SkuFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkuFlag::Transfer => write!(f, "TRANSFER"),
            SkuFlag::Overstock => write!(f, "OVERSTOCK"),
            SkuFlag::NeedStock => write!(f, "NEED_STOCK"),
            SkuFlag::Balanced => write!(f, "BALANCED"),
        }
    }
}

// ==========================================
// 数量解析结果 (Parsed Quantity)
// ==========================================
// 区分"真实为 0"与"无法解析被置 0"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParsedQty {
    Parsed(i64),  // 正常解析
    #[default]
    Defaulted,    // 空值/非数字 → 0
    Clamped(i64), // 负数 → 0（保留原值）
}

impl ParsedQty {
    /// 参与计算的有效数量（恒 >= 0）
    pub fn value(&self) -> i64 {
        match self {
            ParsedQty::Parsed(v) => *v,
            ParsedQty::Defaulted | ParsedQty::Clamped(_) => 0,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParsedQty::Defaulted)
    }

    pub fn is_clamped(&self) -> bool {
        matches!(self, ParsedQty::Clamped(_))
    }
}

impl fmt::Display for ParsedQty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedQty::Parsed(v) => write!(f, "{}", v),
            ParsedQty::Defaulted => write!(f, "0 (defaulted)"),
            ParsedQty::Clamped(v) => write!(f, "0 (clamped from {})", v),
        }
    }
}
