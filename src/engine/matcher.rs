// ==========================================
// 门店库存调拨 - 调拨匹配器
// ==========================================
// 职责: 同一商品键内，把富余门店的库存贪心分配给缺货门店
// 红线: 调拨不跨商品键；单次遍历、无回溯；结果确定
// ==========================================

use crate::config::RebalanceParams;
use crate::domain::inventory::{AggregatedRow, TransferInstruction};
use crate::domain::types::ProductKey;
use std::collections::HashMap;
use tracing::debug;

struct Source<'a> {
    branch: &'a str,
    remaining: i64,
}

struct Destination<'a> {
    branch: &'a str,
    need: i64,
}

pub struct TransferMatcher;

impl TransferMatcher {
    /// 对全部聚合行执行匹配
    ///
    /// # 说明
    /// - 按商品键首次出现顺序逐键匹配
    /// - 未分配键（无条码）不参与匹配
    pub fn match_all(rows: &[AggregatedRow], params: &RebalanceParams) -> Vec<TransferInstruction> {
        let mut key_order: Vec<&ProductKey> = Vec::new();
        let mut by_key: HashMap<&ProductKey, Vec<&AggregatedRow>> = HashMap::new();
        for row in rows.iter().filter(|r| !r.key.is_unassigned()) {
            by_key
                .entry(&row.key)
                .or_insert_with(|| {
                    key_order.push(&row.key);
                    Vec::new()
                })
                .push(row);
        }

        let mut transfers = Vec::new();
        for key in key_order {
            let group = &by_key[key];
            let matched = Self::match_key(key, group, params);
            if !matched.is_empty() {
                debug!(key = %key, branches = group.len(), transfers = matched.len(), "商品键匹配完成");
            }
            transfers.extend(matched);
        }
        transfers
    }

    /// 单个商品键的贪心匹配
    ///
    /// # 规则
    /// 1. 来源: Surplus >= min_transfer_qty 的门店（出现顺序）
    /// 2. 目标: Need >= 1 的门店（出现顺序）
    /// 3. 对每个目标依次扫描来源: qty = min(来源剩余, 目标剩余需求)
    ///    qty >= min_transfer_qty 才生成指令并扣减双方
    /// 4. 目标需求满足即停止扫描
    /// 5. 同一门店不向自身调拨
    pub fn match_key(
        key: &ProductKey,
        rows: &[&AggregatedRow],
        params: &RebalanceParams,
    ) -> Vec<TransferInstruction> {
        let min_qty = params.min_transfer_qty;

        let mut sources: Vec<Source> = rows
            .iter()
            .filter(|r| r.qty.surplus >= min_qty)
            .map(|r| Source {
                branch: &r.branch,
                remaining: r.qty.surplus,
            })
            .collect();

        let destinations: Vec<Destination> = rows
            .iter()
            .filter(|r| r.qty.need >= 1)
            .map(|r| Destination {
                branch: &r.branch,
                need: r.qty.need,
            })
            .collect();

        let mut transfers = Vec::new();
        for dest in &destinations {
            let mut remaining_need = dest.need;
            for source in sources.iter_mut() {
                if source.remaining <= 0 || source.branch == dest.branch {
                    continue;
                }
                let qty = source.remaining.min(remaining_need);
                if qty >= min_qty {
                    transfers.push(TransferInstruction {
                        key: key.clone(),
                        from: source.branch.to_string(),
                        to: dest.branch.to_string(),
                        qty,
                    });
                    source.remaining -= qty;
                    remaining_need -= qty;
                }
                if remaining_need <= 0 {
                    break;
                }
            }
        }
        transfers
    }
}
