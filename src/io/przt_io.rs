/// PRZT 文件 IO 实现
///
/// 提供基于文件系统的默认 PRZT 文件读写实现
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use super::traits::{PrztReader, PrztWriter, RawPrztData};
use crate::utils::Result;

/// 默认的 PRZT 文件读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultPrztReader;

impl PrztReader for DefaultPrztReader {
    fn read(&self, path: &Path) -> Result<RawPrztData> {
        let bytes = std::fs::read(path)?;
        Ok(RawPrztData { bytes })
    }
}

/// 默认的 PRZT 文件写入器（基于 std::fs）
///
/// 先写入目标同目录下的唯一临时文件，再重命名覆盖目标文件，
/// 写入中途失败时目标文件保持原样，临时文件随之删除。
#[derive(Debug, Clone, Default)]
pub struct DefaultPrztWriter;

impl PrztWriter for DefaultPrztWriter {
    fn write(&self, data: &RawPrztData, path: &Path) -> Result<()> {
        // 确保父目录存在（重命名必须在同一目录内才是原子的）
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(&data.bytes)?;
        temp_file.flush()?;

        // persist 失败时 PersistError 持有临时文件，drop 时自动删除
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
