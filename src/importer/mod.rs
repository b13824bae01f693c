// ==========================================
// 跨店调货建议系统 - 导入层
// ==========================================
// 职责: 外部库存表导入,生成 InventoryRecord
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod inventory_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper as FieldMapperImpl, REQUIRED_COLUMNS};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use inventory_importer::InventoryImporterImpl;

// 重导出 Trait 接口
pub use importer_trait::{
    DataCleaner, DqValidator, FieldMapper, FileParser, InventoryImporter, ParsedSheet, RawRow,
};
