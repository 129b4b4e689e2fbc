// ==========================================
// 门店库存调拨 - 建议标注
// ==========================================
// 职责: 调拨指令 → 每个 (商品键, 门店) 的动作文本 / 标记 / 人工指令
// 实现: 先对指令做一次折叠得到旁路账本，再一次性合并到聚合行
// ==========================================

use crate::domain::inventory::{AggregatedRow, BranchSuggestion, TransferInstruction};
use crate::domain::types::{ProductKey, SkuFlag};
use std::collections::HashMap;

const TRANSFER_PREFIX: &str = "Transfer to ";
const RECEIVE_PREFIX: &str = "Receive from ";
const TRANSFER_LABEL: &str = "Prepare Transfer";
const RECEIVE_LABEL: &str = "Prepare Receiving";

// ==========================================
// TransferLedger - 单个 (键, 门店) 的调拨累计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferLedger {
    /// 每条指令一段，如 "Transfer to B x3"
    pub steps: Vec<String>,
    pub transfer_qty: i64,
    pub partners: Vec<String>,
}

impl TransferLedger {
    /// 动作文本，每段以 "; " 结尾
    pub fn action_text(&self) -> String {
        self.steps.iter().map(|s| format!("{}; ", s)).collect()
    }
}

/// 按 (键, 门店) 索引的旁路账本
pub type LedgerTable = HashMap<(ProductKey, String), TransferLedger>;

// ==========================================
// ActionStep - 动作文本中的单条指令
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStep {
    TransferTo { branch: String, qty: i64 },
    ReceiveFrom { branch: String, qty: i64 },
}

impl ActionStep {
    /// 解析 "Transfer to X xN" / "Receive from X xN"
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix(TRANSFER_PREFIX) {
            let (branch, qty) = split_qty(rest)?;
            return Some(ActionStep::TransferTo { branch, qty });
        }
        if let Some(rest) = text.strip_prefix(RECEIVE_PREFIX) {
            let (branch, qty) = split_qty(rest)?;
            return Some(ActionStep::ReceiveFrom { branch, qty });
        }
        None
    }

    /// 人工指令文本
    pub fn describe(&self) -> String {
        match self {
            ActionStep::TransferTo { branch, qty } => {
                format!("{} — Move {} units to {}", TRANSFER_LABEL, qty, branch)
            }
            ActionStep::ReceiveFrom { branch, qty } => {
                format!("{} — Expect {} units from {}", RECEIVE_LABEL, qty, branch)
            }
        }
    }
}

/// "X xN" → (X, N)；门店名本身可含 " x"，取最后一个
fn split_qty(rest: &str) -> Option<(String, i64)> {
    let (branch, qty) = rest.rsplit_once(" x")?;
    let qty = qty.trim().parse::<i64>().ok()?;
    Some((branch.trim().to_string(), qty))
}

pub struct Annotator;

impl Annotator {
    /// 折叠全部调拨指令为旁路账本（来源、目标两侧各记一笔）
    pub fn build_ledger(transfers: &[TransferInstruction]) -> LedgerTable {
        let mut table = LedgerTable::new();
        for t in transfers {
            let src = table.entry((t.key.clone(), t.from.clone())).or_default();
            src.steps.push(format!("{}{} x{}", TRANSFER_PREFIX, t.to, t.qty));
            src.transfer_qty = src.transfer_qty.saturating_add(t.qty);
            src.partners.push(t.to.clone());

            let dst = table.entry((t.key.clone(), t.to.clone())).or_default();
            dst.steps.push(format!("{}{} x{}", RECEIVE_PREFIX, t.from, t.qty));
            dst.transfer_qty = dst.transfer_qty.saturating_add(t.qty);
            dst.partners.push(t.from.clone());
        }
        table
    }

    /// 生成建议表
    pub fn annotate(rows: &[AggregatedRow], transfers: &[TransferInstruction]) -> Vec<BranchSuggestion> {
        let ledger = Self::build_ledger(transfers);
        let empty = TransferLedger::default();

        rows.iter()
            .map(|row| {
                let entry = ledger
                    .get(&(row.key.clone(), row.branch.clone()))
                    .unwrap_or(&empty);
                Self::suggestion_for(row, entry)
            })
            .collect()
    }

    fn suggestion_for(row: &AggregatedRow, ledger: &TransferLedger) -> BranchSuggestion {
        let action_text = ledger.action_text();
        let (flag, sku_flag) = if action_text.trim().is_empty() {
            let flag = Self::classify(row.qty.need, row.qty.surplus);
            (flag, flag.label().to_string())
        } else {
            let trimmed = action_text.trim_end_matches(&[';', ' '][..]);
            (SkuFlag::Transfer, trimmed.to_string())
        };

        let action = if flag == SkuFlag::Transfer {
            Self::human_action(&action_text)
        } else {
            flag.fallback_action().to_string()
        };

        BranchSuggestion {
            key: row.key.clone(),
            brand: row.brand.clone(),
            flag: Some(flag),
            product_name: row.product_name.clone(),
            barcodes: row.barcodes.clone(),
            sale_price: row.sale_price.clone(),
            branch: row.branch.clone(),
            system_qty: row.qty.system_qty,
            display_qty: row.qty.display_qty,
            backstock: row.qty.backstock,
            need: row.qty.need,
            surplus: row.qty.surplus,
            sku_flag,
            suggested_transfer_qty: ledger.transfer_qty,
            suggested_partner: ledger.partners.join(","),
            action,
        }
    }

    /// 无调拨动作时的分类
    pub fn classify(need: i64, surplus: i64) -> SkuFlag {
        if surplus > 0 && need == 0 {
            SkuFlag::Overstock
        } else if need > 0 && surplus == 0 {
            SkuFlag::NeedStock
        } else {
            SkuFlag::Balanced
        }
    }

    /// 动作文本 → 人工指令（只看第一条）
    pub fn human_action(action_text: &str) -> String {
        let first = action_text.split(';').next().unwrap_or("").trim();
        if let Some(step) = ActionStep::parse(first) {
            return step.describe();
        }
        // 解析失败: 按前缀加同样的标签，原文附后
        if first.starts_with(TRANSFER_PREFIX) {
            format!("{} — {}", TRANSFER_LABEL, first)
        } else if first.starts_with(RECEIVE_PREFIX) {
            format!("{} — {}", RECEIVE_LABEL, first)
        } else if first.is_empty() {
            SkuFlag::Transfer.fallback_action().to_string()
        } else {
            // 无法识别的指令原样输出
            first.to_string()
        }
    }
}
