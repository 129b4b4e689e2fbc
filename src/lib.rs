// ==========================================
// 门店库存调拨 - 核心库
// ==========================================
// 功能: 多门店库存表 → 每店缺口/富余 → 店间调拨建议
// 定位: 决策支持（建议由人工确认执行）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 运行参数
pub mod config;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - 调拨规则
pub mod engine;

// 报表层 - 结果导出
pub mod report;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregatedRow, BranchSuggestion, ExpandedRow, InputRecord, ParsedQty, ProductKey,
    QuantityProfile, RebalanceReport, RebalanceSummary, SkuFlag, TransferInstruction,
};

// 配置
pub use config::{ConfigManager, RebalanceParams};

// 引擎
pub use engine::{
    normalize_key, split_barcodes, Aggregator, Annotator, QuantityModel, RebalanceOrchestrator,
    RecordExpander, TransferMatcher,
};

// API
pub use api::{ApiError, ApiResult, RebalanceApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Branch Transfer Assistant";
