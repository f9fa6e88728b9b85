/// IO 抽象层 - trait 定义
///
/// 遵循依赖倒置原则（DIP），解析器和编辑器只依赖这些接口。

use std::path::Path;
use crate::utils::Result;

/// PRZT 文件原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrztData {
    /// 文件的原始字节数据
    pub bytes: Vec<u8>,
}

/// PRZT 文件读取 trait
///
/// # 职责
/// - 从文件系统读取 PRZT 文件的原始字节数据
/// - 不负责解析，仅负责 IO
pub trait PrztReader {
    /// 读取 PRZT 文件的原始数据
    ///
    /// # 参数
    /// * `path` - 文件路径
    fn read(&self, path: &Path) -> Result<RawPrztData>;
}

/// PRZT 文件写入 trait
///
/// # 职责
/// - 将序列化后的数据完整写入目标路径，覆盖原有内容
/// - 不负责序列化，仅负责 IO
pub trait PrztWriter {
    /// 写入 PRZT 文件数据
    ///
    /// # 参数
    /// * `data` - 要写入的原始数据
    /// * `path` - 目标文件路径
    fn write(&self, data: &RawPrztData, path: &Path) -> Result<()>;
}
