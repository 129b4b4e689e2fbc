// ==========================================
// 门店库存调拨 - 配置层
// ==========================================
// 职责: 运行参数定义、加载、校验
// 来源: 默认值 / JSON 文件 / 环境变量 / 命令行
// ==========================================

pub mod config_manager;
pub mod error;
pub mod rebalance_params;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager, DEFAULT_OUTPUT_DIR};
pub use error::{ConfigError, ConfigResult};
pub use rebalance_params::RebalanceParams;
