// ==========================================
// 门店库存调拨 - 运行参数
// ==========================================
// 职责: 三个可调参数 + 边界校验
// 默认: display_target=1, backstock_safety=2, min_transfer_qty=1
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::config_manager::config_keys;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_TARGET: i64 = 1;
pub const DEFAULT_BACKSTOCK_SAFETY: i64 = 2;
pub const DEFAULT_MIN_TRANSFER_QTY: i64 = 1;

/// 调拨运行参数
///
/// 字段使用有符号整数，使外部输入的负值可以被表示并在 `validate` 中拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceParams {
    /// 每个 SKU 在门店陈列位的目标数量（>= 0）
    pub display_target: i64,

    /// 陈列之外需保留的安全库存（>= 0）
    pub backstock_safety: i64,

    /// 单笔调拨最小数量（>= 1）
    pub min_transfer_qty: i64,
}

impl Default for RebalanceParams {
    fn default() -> Self {
        Self {
            display_target: DEFAULT_DISPLAY_TARGET,
            backstock_safety: DEFAULT_BACKSTOCK_SAFETY,
            min_transfer_qty: DEFAULT_MIN_TRANSFER_QTY,
        }
    }
}

impl RebalanceParams {
    pub fn new(display_target: i64, backstock_safety: i64, min_transfer_qty: i64) -> Self {
        Self {
            display_target,
            backstock_safety,
            min_transfer_qty,
        }
    }

    /// 边界校验（只在入口处执行一次）
    pub fn validate(&self) -> ConfigResult<()> {
        if self.display_target < 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::DISPLAY_TARGET.to_string(),
                value: self.display_target.to_string(),
                message: "不能为负数".to_string(),
            });
        }
        if self.backstock_safety < 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::BACKSTOCK_SAFETY.to_string(),
                value: self.backstock_safety.to_string(),
                message: "不能为负数".to_string(),
            });
        }
        // 陈列目标 + 安全库存 参与数量模型计算，不能溢出
        if self.display_target.checked_add(self.backstock_safety).is_none() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::BACKSTOCK_SAFETY.to_string(),
                value: self.backstock_safety.to_string(),
                message: format!("与 display_target={} 之和超出范围", self.display_target),
            });
        }
        if self.min_transfer_qty < 1 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::MIN_TRANSFER_QTY.to_string(),
                value: self.min_transfer_qty.to_string(),
                message: "必须 >= 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RebalanceParams::default();
        assert_eq!(params.display_target, 1);
        assert_eq!(params.backstock_safety, 2);
        assert_eq!(params.min_transfer_qty, 1);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_display_target() {
        let err = RebalanceParams::new(-1, 2, 1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "display_target"));
    }

    #[test]
    fn test_rejects_negative_backstock_safety() {
        assert!(RebalanceParams::new(1, -2, 1).validate().is_err());
    }

    #[test]
    fn test_rejects_zero_min_transfer_qty() {
        let err = RebalanceParams::new(1, 2, 0).validate().unwrap_err();
        assert!(err.to_string().contains("min_transfer_qty"));
    }

    #[test]
    fn test_rejects_overflowing_target_sum() {
        let err = RebalanceParams::new(i64::MAX, 1, 1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "backstock_safety"));
        assert!(RebalanceParams::new(i64::MAX, 0, 1).validate().is_ok());
    }

    #[test]
    fn test_zero_targets_are_valid() {
        assert!(RebalanceParams::new(0, 0, 1).validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params: RebalanceParams = serde_json::from_str(r#"{"backstock_safety": 5}"#).unwrap();
        assert_eq!(params, RebalanceParams::new(1, 5, 1));
    }
}
