//! OpenKH 兼容的 YAML 导出
//!
//! 导出只依赖内存中的记录序列，不读写二进制文件。

use crate::field;
use crate::record::LootRecord;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认导出路径
pub const DEFAULT_EXPORT_PATH: &str = "przt.yml";

/// 导出文档中的一条记录
///
/// 字段声明顺序即 YAML 中的键顺序；`padding` 不导出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LootEntry {
    pub id: u16,
    pub small_hp_orbs: u8,
    pub big_hp_orbs: u8,
    pub big_money_orbs: u8,
    pub medium_money_orbs: u8,
    pub small_money_orbs: u8,
    pub small_mp_orbs: u8,
    pub big_mp_orbs: u8,
    pub small_drive_orbs: u8,
    pub big_drive_orbs: u8,
    pub item1: u16,
    pub item1_percentage: i16,
    pub item2: u16,
    pub item2_percentage: i16,
    pub item3: u16,
    pub item3_percentage: i16,
}

impl From<&LootRecord> for LootEntry {
    fn from(record: &LootRecord) -> Self {
        let v = record.values();
        // 记录中的值已按字段宽度校验，这里的窄化转换不会丢失数据
        Self {
            id: v[field::ID] as u16,
            small_hp_orbs: v[1] as u8,
            big_hp_orbs: v[2] as u8,
            big_money_orbs: v[3] as u8,
            medium_money_orbs: v[4] as u8,
            small_money_orbs: v[5] as u8,
            small_mp_orbs: v[6] as u8,
            big_mp_orbs: v[7] as u8,
            small_drive_orbs: v[8] as u8,
            big_drive_orbs: v[9] as u8,
            item1: v[field::ITEM1] as u16,
            item1_percentage: v[field::ITEM1 + 1] as i16,
            item2: v[field::ITEM2] as u16,
            item2_percentage: v[field::ITEM2 + 1] as i16,
            item3: v[field::ITEM3] as u16,
            item3_percentage: v[field::ITEM3 + 1] as i16,
        }
    }
}

/// 导出器
#[derive(Debug, Clone, Default)]
pub struct Exporter;

impl Exporter {
    /// 生成导出文档（每条记录一项，保持原顺序）
    pub fn export(records: &[LootRecord]) -> Vec<LootEntry> {
        records.iter().map(LootEntry::from).collect()
    }

    /// 序列化为 YAML 块列表
    pub fn to_yaml(records: &[LootRecord]) -> Result<String> {
        Ok(serde_yaml::to_string(&Self::export(records))?)
    }

    /// 序列化为 JSON
    pub fn to_json(records: &[LootRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Self::export(records))?)
    }

    /// 写入 YAML 文件
    pub fn write(records: &[LootRecord], path: &Path) -> Result<()> {
        let yaml = Self::to_yaml(records)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, yaml)?;
        Ok(())
    }
}
