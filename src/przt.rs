use crate::datatypes::FileHeader;
use crate::record::LootRecord;
use crate::utils::{IndexKind, PrztError, Result};
use std::path::{Path, PathBuf};

mod parser;
mod stats;
mod writer;

#[cfg(test)]
mod tests;

pub use stats::PrztStats;

/// PRZT 掉落表文件
///
/// 头部 + 定长记录数组，全部解析到内存中。记录顺序即掉落表槽位，永远不会被重排。
#[derive(Debug, Clone)]
pub struct PrztFile {
    /// 文件路径
    pub path: PathBuf,
    /// 头部（`record_count` 为加载时的值，写出时按当前记录数重新计算）
    pub header: FileHeader,
    /// 记录列表
    pub records: Vec<LootRecord>,
}

impl PrztFile {
    /// 在内存中新建文件
    pub fn new(path: PathBuf, format_tag: u32, records: Vec<LootRecord>) -> Self {
        let header = FileHeader {
            format_tag,
            record_count: records.len() as u32,
        };
        Self { path, header, records }
    }

    /// 获取文件名
    pub fn get_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// 格式标签（原样保留）
    pub fn format_tag(&self) -> u32 {
        self.header.format_tag
    }

    /// 记录数量
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// 获取记录
    pub fn record(&self, index: usize) -> Result<&LootRecord> {
        self.records.get(index).ok_or(PrztError::IndexOutOfRange {
            kind: IndexKind::Record,
            index,
            len: self.records.len(),
        })
    }

    fn record_mut(&mut self, index: usize) -> Result<&mut LootRecord> {
        let len = self.records.len();
        self.records.get_mut(index).ok_or(PrztError::IndexOutOfRange {
            kind: IndexKind::Record,
            index,
            len,
        })
    }

    /// 读取单个字段
    pub fn get_field(&self, record_index: usize, field_index: usize) -> Result<i64> {
        self.record(record_index)?.get(field_index)
    }

    /// 修改单个字段（仅内存）
    pub fn set_field(&mut self, record_index: usize, field_index: usize, value: i64) -> Result<()> {
        self.record_mut(record_index)?.set(field_index, value)
    }

    /// 批量修改：把所有记录的同一字段设为同一个值
    ///
    /// 只校验一次；校验失败时没有任何记录被修改。返回修改的记录数。
    pub fn set_field_for_all(&mut self, field_index: usize, value: i64) -> Result<usize> {
        LootRecord::check_value(field_index, value)?;

        for record in &mut self.records {
            record.set(field_index, value)?;
        }

        Ok(self.records.len())
    }

    /// 检查路径是否就是本文件
    pub fn is_same_file(&self, other: &Path) -> bool {
        if self.path.as_os_str().is_empty() {
            return false;
        }
        match (self.path.canonicalize(), other.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => self.path == other,
        }
    }
}
