// ==========================================
// 门店库存调拨 - 数量模型
// ==========================================
// 职责: 在库数量 → 陈列/后仓/需求/富余
// 红线: 整数运算，结果恒 >= 0
// ==========================================

use crate::config::RebalanceParams;
use crate::domain::inventory::QuantityProfile;

pub struct QuantityModel;

impl QuantityModel {
    /// 计算单条记录的数量画像
    ///
    /// # 规则
    /// - DisplayQty = min(OnHand, DisplayTarget)
    /// - Backstock = OnHand - DisplayQty
    /// - NeedDisplay = max(DisplayTarget - DisplayQty, 0)
    /// - NeedSafety = max(DisplayTarget + BackstockSafety - OnHand, 0)
    /// - Need = max(NeedDisplay, NeedSafety)
    /// - Surplus = max(Backstock - BackstockSafety, 0)
    ///
    /// 负的在库数量按 0 处理。
    pub fn compute(on_hand: i64, params: &RebalanceParams) -> QuantityProfile {
        let on_hand = on_hand.max(0);
        let display_qty = on_hand.min(params.display_target);
        let backstock = on_hand - display_qty;
        let need_display = (params.display_target - display_qty).max(0);
        let need_safety = (params
            .display_target
            .saturating_add(params.backstock_safety)
            - on_hand)
            .max(0);

        QuantityProfile {
            system_qty: on_hand,
            display_qty,
            backstock,
            need: need_display.max(need_safety),
            surplus: (backstock - params.backstock_safety).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> RebalanceParams {
        RebalanceParams::default()
    }

    #[test]
    fn test_zero_stock() {
        let q = QuantityModel::compute(0, &defaults());
        assert_eq!(q.display_qty, 0);
        assert_eq!(q.backstock, 0);
        assert_eq!(q.need, 3);
        assert_eq!(q.surplus, 0);
    }

    #[test]
    fn test_overstock() {
        let q = QuantityModel::compute(5, &defaults());
        assert_eq!(q.system_qty, 5);
        assert_eq!(q.display_qty, 1);
        assert_eq!(q.backstock, 4);
        assert_eq!(q.need, 0);
        assert_eq!(q.surplus, 2);
    }

    #[test]
    fn test_exactly_at_safety() {
        // 1 陈列 + 2 安全库存 → 既不缺也不富余
        let q = QuantityModel::compute(3, &defaults());
        assert_eq!(q.need, 0);
        assert_eq!(q.surplus, 0);
    }

    #[test]
    fn test_safety_shortfall_dominates() {
        // 陈列已满，但安全库存不足
        let q = QuantityModel::compute(2, &defaults());
        assert_eq!(q.display_qty, 1);
        assert_eq!(q.need, 1);
        assert_eq!(q.surplus, 0);
    }

    #[test]
    fn test_extreme_params_do_not_overflow() {
        let params = RebalanceParams::new(i64::MAX, 1, 1);
        let q = QuantityModel::compute(0, &params);
        assert_eq!(q.need, i64::MAX);
        assert_eq!(q.surplus, 0);
    }

    #[test]
    fn test_zero_display_target() {
        let params = RebalanceParams::new(0, 2, 1);
        let q = QuantityModel::compute(0, &params);
        assert_eq!(q.display_qty, 0);
        assert_eq!(q.need, 2);

        let q = QuantityModel::compute(10, &params);
        assert_eq!(q.backstock, 10);
        assert_eq!(q.surplus, 8);
    }

    #[test]
    fn test_negative_treated_as_zero() {
        assert_eq!(
            QuantityModel::compute(-4, &defaults()),
            QuantityModel::compute(0, &defaults())
        );
    }
}
