use super::PrztFile;
use crate::datatypes::FileHeader;
use crate::field::RECORD_SIZE;
use crate::io::{DefaultPrztReader, PrztReader};
use crate::record::LootRecord;
use crate::utils::{PrztError, Result};
use std::io::Cursor;
use std::path::PathBuf;

impl PrztFile {
    /// 加载 PRZT 文件
    ///
    /// 整个文件一次读入并全部解码，不存在部分成功的情况。
    ///
    /// # 示例
    /// ```rust,ignore
    /// let file = PrztFile::load("przt_0.list".into())?;
    /// println!("{} 条记录", file.record_count());
    /// ```
    pub fn load(path: PathBuf) -> Result<Self> {
        Self::load_with_reader(path, &DefaultPrztReader)
    }

    /// 使用自定义 Reader 加载
    pub fn load_with_reader(path: PathBuf, reader: &dyn PrztReader) -> Result<Self> {
        let raw_data = reader.read(&path)?;
        Self::parse(path, &raw_data.bytes)
    }

    /// 从字节解析
    pub fn parse(path: PathBuf, data: &[u8]) -> Result<Self> {
        if data.len() < FileHeader::SIZE {
            return Err(PrztError::CorruptFile(format!(
                "Insufficient data for header: expected {} bytes, got {}",
                FileHeader::SIZE,
                data.len()
            )));
        }

        let mut cursor = Cursor::new(data);
        let header = FileHeader::parse(&mut cursor)?;

        Self::validate_body_size(&header, data.len())?;

        #[cfg(debug_assertions)]
        println!(
            "解析 PRZT 头部: 标签 0x{:08X}, 记录数 {}",
            header.format_tag, header.record_count
        );

        let records = data[FileHeader::SIZE..]
            .chunks_exact(RECORD_SIZE)
            .map(LootRecord::parse)
            .collect::<Result<Vec<_>>>()?;

        Ok(PrztFile { path, header, records })
    }

    /// 验证文件长度 == 8 + 24 * record_count
    fn validate_body_size(header: &FileHeader, actual: usize) -> Result<()> {
        let expected = FileHeader::SIZE as u64 + header.record_count as u64 * RECORD_SIZE as u64;
        if expected != actual as u64 {
            return Err(PrztError::CorruptFile(format!(
                "header declares {} records ({} bytes) but file is {} bytes",
                header.record_count, expected, actual
            )));
        }
        Ok(())
    }
}
