// ==========================================
// 门店库存调拨 - 引擎层
// ==========================================
// 职责: 调拨规则计算（纯函数）
// 红线: 引擎不读文件、不写文件
// 数据流: 归一化/拆分 → 数量模型 → 展开 → 聚合 → 匹配 → 标注
// ==========================================

pub mod aggregator;
pub mod annotator;
pub mod barcode;
pub mod expander;
pub mod matcher;
pub mod orchestrator;
pub mod quantity;

// 重导出核心引擎
pub use aggregator::Aggregator;
pub use annotator::{ActionStep, Annotator, LedgerTable, TransferLedger};
pub use barcode::{normalize_key, split_barcodes};
pub use expander::RecordExpander;
pub use matcher::TransferMatcher;
pub use orchestrator::RebalanceOrchestrator;
pub use quantity::QuantityModel;
