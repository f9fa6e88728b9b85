/// IO 抽象层模块
///
/// 该模块提供了文件读写的抽象接口，解析/序列化逻辑不直接接触文件系统。
/// 支持依赖注入、测试 mock 和替换 IO 实现（如内存 IO）。
///
/// # 架构设计
///
/// - **traits**: 定义 PrztReader/PrztWriter trait 接口
/// - **przt_io**: 基于文件系统的默认实现（写入为临时文件 + 重命名）
///
/// # 使用示例
///
/// ```rust,ignore
/// use przt_editor::io::{DefaultPrztReader, PrztReader};
///
/// let reader = DefaultPrztReader;
/// let data = reader.read(Path::new("przt_0.list"))?;
/// ```
pub mod traits;
pub mod przt_io;

// === 导出 trait 定义 ===
pub use traits::{PrztReader, PrztWriter, RawPrztData};

// === 导出默认实现 ===
pub use przt_io::{DefaultPrztReader, DefaultPrztWriter};
