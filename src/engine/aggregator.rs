// ==========================================
// 门店库存调拨 - 聚合器
// ==========================================
// 职责: 按 (商品键, 门店) 分组求和
// 红线: 每个展开行恰好进入一个聚合行（不重不漏）
// 顺序: 分组按首次出现顺序输出
// ==========================================

use crate::domain::inventory::{AggregatedRow, ExpandedRow};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

struct GroupBuilder {
    row: AggregatedRow,
    barcodes: BTreeSet<String>,
}

pub struct Aggregator;

impl Aggregator {
    /// 聚合全部展开行
    ///
    /// # 规则
    /// - 数量字段: 组内求和
    /// - 商品名/品牌/售价: 组内首个成员
    /// - 条码: 非空原始条码去重排序后以 ',' 连接
    /// - 空键行按门店各自成组
    pub fn aggregate(rows: &[ExpandedRow]) -> Vec<AggregatedRow> {
        let mut index: HashMap<(&str, &str), usize> = HashMap::new();
        let mut groups: Vec<GroupBuilder> = Vec::new();

        for row in rows {
            let slot = *index
                .entry((row.key.as_str(), row.branch.as_str()))
                .or_insert_with(|| {
                    groups.push(GroupBuilder {
                        row: AggregatedRow {
                            key: row.key.clone(),
                            branch: row.branch.clone(),
                            product_name: row.product_name.clone(),
                            brand: row.brand.clone(),
                            barcodes: String::new(),
                            sale_price: row.sale_price.clone(),
                            qty: Default::default(),
                            member_count: 0,
                        },
                        barcodes: BTreeSet::new(),
                    });
                    groups.len() - 1
                });

            let group = &mut groups[slot];
            group.row.qty += row.qty;
            group.row.member_count += 1;
            if !row.barcode.is_empty() {
                group.barcodes.insert(row.barcode.clone());
            }
        }

        debug!(expanded = rows.len(), groups = groups.len(), "聚合完成");

        groups
            .into_iter()
            .map(|g| {
                let mut row = g.row;
                row.barcodes = g.barcodes.into_iter().collect::<Vec<_>>().join(",");
                row
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RebalanceParams;
    use crate::domain::inventory::InputRecord;
    use crate::engine::expander::RecordExpander;
    use crate::engine::quantity::QuantityModel;

    fn expand_all(records: &[InputRecord]) -> Vec<ExpandedRow> {
        let params = RebalanceParams::default();
        records
            .iter()
            .flat_map(|r| RecordExpander::expand(r, QuantityModel::compute(r.on_hand_qty(), &params)))
            .collect()
    }

    #[test]
    fn test_groups_by_key_and_branch() {
        let rows = expand_all(&[
            InputRecord::new("Milk 1L", "A", "00123", 5),
            InputRecord::new("Milk", "A", "123", 3),
            InputRecord::new("Milk", "B", "123", 0),
        ]);
        let agg = Aggregator::aggregate(&rows);

        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].branch, "A");
        assert_eq!(agg[0].product_name, "Milk 1L");
        assert_eq!(agg[0].barcodes, "00123,123");
        assert_eq!(agg[0].qty.system_qty, 8);
        assert_eq!(agg[0].member_count, 2);
        assert_eq!(agg[1].branch, "B");
        assert_eq!(agg[1].qty.need, 3);
    }

    #[test]
    fn test_multi_barcode_record_counted_per_key() {
        let rows = expand_all(&[InputRecord::new("Tea", "A", "1;2", 4)]);
        let agg = Aggregator::aggregate(&rows);
        assert_eq!(agg.len(), 2);
        assert!(agg.iter().all(|a| a.qty.system_qty == 4));
    }

    #[test]
    fn test_duplicate_barcodes_in_one_record_sum() {
        let rows = expand_all(&[InputRecord::new("Tea", "A", "123,123", 4)]);
        let agg = Aggregator::aggregate(&rows);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].qty.system_qty, 8);
        assert_eq!(agg[0].barcodes, "123");
    }

    #[test]
    fn test_unassigned_key_groups_per_branch() {
        let rows = expand_all(&[
            InputRecord::new("Loose A", "A", "", 1),
            InputRecord::new("Loose B", "A", "", 2),
            InputRecord::new("Loose C", "B", "", 3),
        ]);
        let agg = Aggregator::aggregate(&rows);
        assert_eq!(agg.len(), 2);
        assert!(agg.iter().all(|a| a.key.is_unassigned() && a.barcodes.is_empty()));
        assert_eq!(agg[0].qty.system_qty, 3);
        assert_eq!(agg[0].product_name, "Loose A");
    }

    #[test]
    fn test_first_seen_order() {
        let rows = expand_all(&[
            InputRecord::new("X", "B", "9", 1),
            InputRecord::new("Y", "A", "1", 1),
            InputRecord::new("X", "A", "9", 1),
        ]);
        let agg = Aggregator::aggregate(&rows);
        let order: Vec<(&str, &str)> = agg
            .iter()
            .map(|a| (a.key.as_str(), a.branch.as_str()))
            .collect();
        assert_eq!(order, vec![("9", "B"), ("1", "A"), ("9", "A")]);
    }
}
