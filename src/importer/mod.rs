// ==========================================
// 门店库存调拨 - 导入层
// ==========================================
// 职责: 外部表格读取，生成 InputRecord
// 支持: Excel, CSV（多文件合并）
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod inventory_importer;
pub mod inventory_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, FieldMapper as FieldMapperImpl};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use inventory_importer::{merged_headers, InventoryImporterImpl};

// 重导出 Trait 接口
pub use inventory_importer_trait::{
    DataCleaner, FieldMapper, FileParser, InventoryImporter, RawTable,
};
