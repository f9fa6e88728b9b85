pub mod datatypes;
pub mod field;
pub mod record;
pub mod przt;
pub mod export;
pub mod io;
pub mod editor;
pub mod utils;
pub mod debug;

// 重新导出主要结构
pub use datatypes::FileHeader;
pub use field::{FieldDescriptor, FieldWidth, FIELDS, FIELD_COUNT, RECORD_SIZE};
pub use record::LootRecord;
pub use przt::{PrztFile, PrztStats};
pub use export::{Exporter, LootEntry, DEFAULT_EXPORT_PATH};
pub use editor::RecordStore;
pub use utils::{IndexKind, PrztError, Result};
pub use debug::PrztDebugger;

// 常量定义
pub const SUPPORTED_EXTENSIONS: &[&str] = &["list", "bin"];
