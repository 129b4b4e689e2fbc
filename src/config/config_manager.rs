// ==========================================
// 门店库存调拨 - 配置管理器
// ==========================================
// 职责: 配置加载与多级覆写
// 优先级: 默认值 < JSON 文件 < 环境变量 < 命令行
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::rebalance_params::RebalanceParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认报表输出目录
pub const DEFAULT_OUTPUT_DIR: &str = "./reports";

// ==========================================
// 配置文件结构
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    #[serde(flatten)]
    params: RebalanceParams,
    output_dir: Option<PathBuf>,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    params: RebalanceParams,
    output_dir: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            params: RebalanceParams::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ConfigManager {
    /// 从配置文件 + 进程环境变量加载
    ///
    /// # 参数
    /// - path: JSON 配置文件路径（None 表示只用默认值与环境变量）
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// 加载配置（环境变量读取函数可注入，便于测试）
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut manager = Self::default();

        if let Some(path) = path {
            let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let file: ConfigFile = serde_json::from_str(&raw)?;
            manager.params = file.params;
            if let Some(dir) = file.output_dir {
                manager.output_dir = dir;
            }
            debug!(path = %path.display(), "已读取配置文件");
        }

        if let Some(v) = read_env_i64(&env, config_keys::ENV_DISPLAY_TARGET)? {
            manager.params.display_target = v;
        }
        if let Some(v) = read_env_i64(&env, config_keys::ENV_BACKSTOCK_SAFETY)? {
            manager.params.backstock_safety = v;
        }
        if let Some(v) = read_env_i64(&env, config_keys::ENV_MIN_TRANSFER_QTY)? {
            manager.params.min_transfer_qty = v;
        }
        if let Some(dir) = env(config_keys::ENV_OUTPUT_DIR) {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                manager.output_dir = PathBuf::from(trimmed);
            }
        }

        manager.params.validate()?;
        info!(
            display_target = manager.params.display_target,
            backstock_safety = manager.params.backstock_safety,
            min_transfer_qty = manager.params.min_transfer_qty,
            "配置加载完成"
        );
        Ok(manager)
    }

    /// 应用命令行覆写并重新校验
    pub fn apply_overrides(
        &mut self,
        display_target: Option<i64>,
        backstock_safety: Option<i64>,
        min_transfer_qty: Option<i64>,
        output_dir: Option<PathBuf>,
    ) -> ConfigResult<()> {
        if let Some(v) = display_target {
            self.params.display_target = v;
        }
        if let Some(v) = backstock_safety {
            self.params.backstock_safety = v;
        }
        if let Some(v) = min_transfer_qty {
            self.params.min_transfer_qty = v;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self.params.validate()
    }

    pub fn params(&self) -> RebalanceParams {
        self.params
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn read_env_i64<F>(env: &F, key: &str) -> ConfigResult<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.clone(),
                    message: "无法解析为整数".to_string(),
                })
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 参数名（JSON 字段名）
    pub const DISPLAY_TARGET: &str = "display_target";
    pub const BACKSTOCK_SAFETY: &str = "backstock_safety";
    pub const MIN_TRANSFER_QTY: &str = "min_transfer_qty";

    // 环境变量
    pub const ENV_DISPLAY_TARGET: &str = "BRANCH_REBALANCE_DISPLAY_TARGET";
    pub const ENV_BACKSTOCK_SAFETY: &str = "BRANCH_REBALANCE_BACKSTOCK_SAFETY";
    pub const ENV_MIN_TRANSFER_QTY: &str = "BRANCH_REBALANCE_MIN_TRANSFER_QTY";
    pub const ENV_OUTPUT_DIR: &str = "BRANCH_REBALANCE_OUTPUT_DIR";
}
