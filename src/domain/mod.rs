// ==========================================
// 门店库存调拨 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑，不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod types;

// 重导出核心类型
pub use inventory::{
    AggregatedRow, BranchSuggestion, ExpandedRow, InputRecord, QuantityProfile, RebalanceReport,
    RebalanceSummary, TransferInstruction, SUGGESTION_COLUMNS, TRANSFER_COLUMNS,
};
pub use types::{ParsedQty, ProductKey, SkuFlag};
