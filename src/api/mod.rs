// ==========================================
// 门店库存调拨 - API 层
// ==========================================
// 职责: 对外业务接口（CLI / 其他前端调用）
// ==========================================

pub mod error;
pub mod rebalance_api;

pub use error::{ApiError, ApiResult};
pub use rebalance_api::RebalanceApi;
