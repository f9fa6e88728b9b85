use super::PrztFile;
use crate::datatypes::FileHeader;
use crate::field::RECORD_SIZE;
use crate::io::{DefaultPrztWriter, PrztWriter, RawPrztData};
use crate::utils::{PrztError, Result};
use std::path::Path;

impl PrztFile {
    /// 写入文件（完整重写）
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        self.write_with_writer(&DefaultPrztWriter, path)
    }

    /// 使用自定义 Writer 写入
    pub fn write_with_writer(&self, writer: &dyn PrztWriter, path: &Path) -> Result<()> {
        let data = RawPrztData { bytes: self.to_bytes()? };
        writer.write(&data, path)
    }

    /// 重建完整字节流
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(FileHeader::SIZE + self.records.len() * RECORD_SIZE);
        self.write_to_buffer(&mut output)?;
        Ok(output)
    }

    /// 将数据写入缓冲区
    ///
    /// `format_tag` 原样写回，`record_count` 按当前记录数重新计算。
    pub(crate) fn write_to_buffer(&self, output: &mut Vec<u8>) -> Result<()> {
        let record_count = u32::try_from(self.records.len())
            .map_err(|_| PrztError::TooManyRecords(self.records.len()))?;

        let header = FileHeader {
            format_tag: self.header.format_tag,
            record_count,
        };
        header.write(output)?;

        for record in &self.records {
            record.write(output)?;
        }

        #[cfg(debug_assertions)]
        if record_count != self.header.record_count {
            println!(
                "⚠️  记录数已变化: 原始 {} -> 写入 {}",
                self.header.record_count, record_count
            );
        }

        Ok(())
    }
}
