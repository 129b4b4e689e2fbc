// ==========================================
// 门店库存调拨 - 引擎编排器
// ==========================================
// 用途: 按固定顺序执行 数量模型 → 展开 → 聚合 → 匹配 → 标注
// 红线: 纯计算，无 I/O；每次调用只依赖输入
// ==========================================

use crate::config::{ConfigResult, RebalanceParams};
use crate::domain::inventory::{InputRecord, RebalanceReport, RebalanceSummary};
use crate::domain::types::SkuFlag;
use crate::engine::aggregator::Aggregator;
use crate::engine::annotator::Annotator;
use crate::engine::expander::RecordExpander;
use crate::engine::matcher::TransferMatcher;
use crate::engine::quantity::QuantityModel;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// RebalanceOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct RebalanceOrchestrator {
    params: RebalanceParams,
}

impl RebalanceOrchestrator {
    /// 创建编排器（参数在此校验一次）
    pub fn new(params: RebalanceParams) -> ConfigResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &RebalanceParams {
        &self.params
    }

    /// 执行完整计算
    ///
    /// # 流程
    /// 1. 数量模型（每条记录计算一次）
    /// 2. 按条码展开
    /// 3. 按 (键, 门店) 聚合
    /// 4. 逐键贪心匹配
    /// 5. 标注建议
    ///
    /// 空输入返回两张空表。
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn run(&self, records: &[InputRecord]) -> RebalanceReport {
        let run_id = Uuid::new_v4().to_string();
        info!(run_id = %run_id, "开始计算调拨建议");

        // 1-2. 数量模型 + 展开
        let expanded: Vec<_> = records
            .iter()
            .flat_map(|r| {
                let qty = QuantityModel::compute(r.on_hand_qty(), &self.params);
                RecordExpander::expand(r, qty)
            })
            .collect();
        debug!(expanded = expanded.len(), "记录展开完成");

        // 3. 聚合
        let aggregated = Aggregator::aggregate(&expanded);

        // 4. 匹配
        let transfers = TransferMatcher::match_all(&aggregated, &self.params);

        // 5. 标注
        let suggestions = Annotator::annotate(&aggregated, &transfers);

        // 汇总（饱和求和）
        let units_moved = saturating_sum(transfers.iter().map(|t| t.qty));
        let total_need = saturating_sum(aggregated.iter().map(|a| a.qty.need));
        let total_surplus = saturating_sum(aggregated.iter().map(|a| a.qty.surplus));
        let distinct_keys = aggregated
            .iter()
            .map(|a| &a.key)
            .collect::<HashSet<_>>()
            .len();

        let mut flag_counts: BTreeMap<String, usize> = BTreeMap::new();
        for s in &suggestions {
            let flag = s.flag.unwrap_or(SkuFlag::Balanced);
            *flag_counts.entry(flag.to_string()).or_insert(0) += 1;
        }

        let summary = RebalanceSummary {
            run_id,
            generated_at: Utc::now(),
            params: self.params,
            input_records: records.len(),
            defaulted_quantities: records.iter().filter(|r| r.on_hand.is_defaulted()).count(),
            clamped_quantities: records.iter().filter(|r| r.on_hand.is_clamped()).count(),
            expanded_rows: expanded.len(),
            aggregated_rows: aggregated.len(),
            distinct_keys,
            transfers: transfers.len(),
            units_moved,
            unmet_need: total_need.saturating_sub(units_moved),
            unused_surplus: total_surplus.saturating_sub(units_moved),
            flag_counts,
        };

        info!(
            run_id = %summary.run_id,
            aggregated = summary.aggregated_rows,
            transfers = summary.transfers,
            units_moved = summary.units_moved,
            unmet_need = summary.unmet_need,
            "调拨建议计算完成"
        );

        RebalanceReport {
            suggestions,
            transfers,
            summary,
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0i64, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RebalanceOrchestrator {
        RebalanceOrchestrator::new(RebalanceParams::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_params() {
        assert!(RebalanceOrchestrator::new(RebalanceParams::new(1, 2, 0)).is_err());
    }

    #[test]
    fn test_empty_input() {
        let report = engine().run(&[]);
        assert!(report.is_empty());
        assert_eq!(report.summary.input_records, 0);
        assert_eq!(report.summary.units_moved, 0);
    }

    #[test]
    fn test_two_branch_scenario() {
        let records = vec![
            InputRecord::new("Milk", "A", "123", 10),
            InputRecord::new("Milk", "B", "123", 0),
        ];
        let report = engine().run(&records);

        assert_eq!(report.transfers.len(), 1);
        assert_eq!(report.transfers[0].from, "A");
        assert_eq!(report.transfers[0].to, "B");
        assert_eq!(report.transfers[0].qty, 3);

        let a = &report.suggestions[0];
        assert_eq!((a.display_qty, a.backstock, a.need, a.surplus), (1, 9, 0, 7));
        assert_eq!(a.action, "Prepare Transfer — Move 3 units to B");

        let b = &report.suggestions[1];
        assert_eq!((b.display_qty, b.backstock, b.need, b.surplus), (0, 0, 3, 0));
        assert_eq!(b.action, "Prepare Receiving — Expect 3 units from A");

        assert_eq!(report.summary.units_moved, 3);
        assert_eq!(report.summary.unmet_need, 0);
        assert_eq!(report.summary.unused_surplus, 4);
        assert_eq!(report.summary.flag_counts.get("TRANSFER"), Some(&2));
    }

    #[test]
    fn test_summary_counts() {
        let mut bad = InputRecord::new("Tea", "A", "1;2", 0);
        bad.on_hand = crate::domain::types::ParsedQty::Defaulted;
        let records = vec![bad, InputRecord::new("Tea", "B", "", -2)];
        let report = engine().run(&records);

        assert_eq!(report.summary.input_records, 2);
        assert_eq!(report.summary.defaulted_quantities, 1);
        assert_eq!(report.summary.clamped_quantities, 1);
        assert_eq!(report.summary.expanded_rows, 3);
        assert_eq!(report.summary.aggregated_rows, 3);
        assert_eq!(report.summary.distinct_keys, 3);
    }

    #[test]
    fn test_huge_quantities_saturate_instead_of_overflowing() {
        let records = vec![
            InputRecord::new("Milk", "A", "1", i64::MAX),
            InputRecord::new("Milk", "A", "1", 5),
            InputRecord::new("Milk", "B", "1", 0),
        ];
        let report = engine().run(&records);

        let a = &report.suggestions[0];
        assert_eq!(a.system_qty, i64::MAX);
        assert_eq!(a.surplus, i64::MAX - 1);
        assert_eq!(report.transfers.len(), 1);
        assert_eq!(report.transfers[0].qty, 3);
        assert_eq!(report.summary.units_moved, 3);
        assert_eq!(report.summary.unused_surplus, i64::MAX - 4);
    }
}
