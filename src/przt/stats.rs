use super::PrztFile;
use crate::datatypes::FileHeader;
use crate::field::RECORD_SIZE;
use std::collections::BTreeSet;

/// 掉落表统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrztStats {
    pub name: String,
    pub format_tag: u32,
    pub record_count: usize,
    pub file_size: usize,
    pub records_with_drops: usize,
    pub records_with_items: usize,
    pub distinct_items: usize,
}

impl std::fmt::Display for PrztStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 掉落表统计信息 ===")?;
        writeln!(f, "名称: {}", self.name)?;
        writeln!(f, "格式标签: 0x{:08X}", self.format_tag)?;
        writeln!(f, "记录数量: {}", self.record_count)?;
        writeln!(f, "文件大小: {} 字节", self.file_size)?;
        writeln!(f, "有掉落的记录: {}", self.records_with_drops)?;
        writeln!(f, "掉落物品的记录: {}", self.records_with_items)?;
        writeln!(f, "不同物品数: {}", self.distinct_items)?;
        Ok(())
    }
}

impl PrztFile {
    /// 获取统计信息
    pub fn get_stats(&self) -> PrztStats {
        let items: BTreeSet<u16> = self
            .records
            .iter()
            .flat_map(|r| r.items())
            .map(|(item, _)| item)
            .filter(|&item| item != 0)
            .collect();

        PrztStats {
            name: self.get_name().to_string(),
            format_tag: self.format_tag(),
            record_count: self.records.len(),
            file_size: FileHeader::SIZE + self.records.len() * RECORD_SIZE,
            records_with_drops: self.records.iter().filter(|r| r.has_drops()).count(),
            records_with_items: self
                .records
                .iter()
                .filter(|r| r.items().iter().any(|&(item, _)| item != 0))
                .count(),
            distinct_items: items.len(),
        }
    }
}
