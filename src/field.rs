//! 字段描述表
//!
//! 每条 PRZT 记录由 17 个字段紧密排列组成（无填充），共 24 字节。
//! 编解码器和取值校验都只查询这张表，不再依赖字段下标区间来推断有无符号。
//!
//! 布局以原始二进制格式描述 `<HBBBBBBBBBBHhHhHh` 为准：
//! `padding` 为 1 字节，三个物品 ID 为无符号 16 位，掉落率为有符号 16 位。

/// 单条记录的字节数
pub const RECORD_SIZE: usize = 24;

/// 字段数量
pub const FIELD_COUNT: usize = 17;

/// 字段宽度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// 8 位
    Byte,
    /// 16 位
    Word,
}

impl FieldWidth {
    /// 位数
    pub const fn bits(self) -> u32 {
        match self {
            FieldWidth::Byte => 8,
            FieldWidth::Word => 16,
        }
    }

    /// 字节数
    pub const fn size(self) -> usize {
        match self {
            FieldWidth::Byte => 1,
            FieldWidth::Word => 2,
        }
    }
}

/// 字段描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// 字段名（camelCase）
    pub name: &'static str,
    /// 导出 YAML 时使用的键名；`None` 表示不导出
    pub export_name: Option<&'static str>,
    /// 界面显示标签
    pub label: &'static str,
    /// 宽度
    pub width: FieldWidth,
    /// 是否有符号
    pub signed: bool,
}

impl FieldDescriptor {
    const fn unsigned(
        name: &'static str,
        export_name: Option<&'static str>,
        label: &'static str,
        width: FieldWidth,
    ) -> Self {
        Self { name, export_name, label, width, signed: false }
    }

    const fn signed(
        name: &'static str,
        export_name: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            name,
            export_name: Some(export_name),
            label,
            width: FieldWidth::Word,
            signed: true,
        }
    }

    /// 最小合法值
    pub fn min(&self) -> i64 {
        if self.signed {
            -(1i64 << (self.width.bits() - 1))
        } else {
            0
        }
    }

    /// 最大合法值
    pub fn max(&self) -> i64 {
        if self.signed {
            (1i64 << (self.width.bits() - 1)) - 1
        } else {
            (1i64 << self.width.bits()) - 1
        }
    }

    /// 检查取值是否能放进该字段
    pub fn accepts(&self, value: i64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// 是否导出到 YAML
    pub fn is_exported(&self) -> bool {
        self.export_name.is_some()
    }
}

use FieldWidth::{Byte, Word};

const FIELD_TABLE: [FieldDescriptor; FIELD_COUNT] = [
    FieldDescriptor::unsigned("id", Some("Id"), "ID", Word),
    FieldDescriptor::unsigned("smallHpOrbs", Some("SmallHpOrbs"), "Small HP Orbs", Byte),
    FieldDescriptor::unsigned("bigHpOrbs", Some("BigHpOrbs"), "Big HP Orbs", Byte),
    FieldDescriptor::unsigned("bigMoneyOrbs", Some("BigMoneyOrbs"), "Big Money Orbs", Byte),
    FieldDescriptor::unsigned("mediumMoneyOrbs", Some("MediumMoneyOrbs"), "Medium Money Orbs", Byte),
    FieldDescriptor::unsigned("smallMoneyOrbs", Some("SmallMoneyOrbs"), "Small Money Orbs", Byte),
    FieldDescriptor::unsigned("smallMpOrbs", Some("SmallMpOrbs"), "Small MP Orbs", Byte),
    FieldDescriptor::unsigned("bigMpOrbs", Some("BigMpOrbs"), "Big MP Orbs", Byte),
    FieldDescriptor::unsigned("smallDriveOrbs", Some("SmallDriveOrbs"), "Small Drive Orbs", Byte),
    FieldDescriptor::unsigned("bigDriveOrbs", Some("BigDriveOrbs"), "Big Drive Orbs", Byte),
    FieldDescriptor::unsigned("padding", None, "Padding", Byte),
    FieldDescriptor::unsigned("item1", Some("Item1"), "Item 1", Word),
    FieldDescriptor::signed("item1Percentage", "Item1Percentage", "Item 1 Drop Percentage"),
    FieldDescriptor::unsigned("item2", Some("Item2"), "Item 2", Word),
    FieldDescriptor::signed("item2Percentage", "Item2Percentage", "Item 2 Drop Percentage"),
    FieldDescriptor::unsigned("item3", Some("Item3"), "Item 3", Word),
    FieldDescriptor::signed("item3Percentage", "Item3Percentage", "Item 3 Drop Percentage"),
];

/// 记录字段表（按文件中的顺序）
pub static FIELDS: [FieldDescriptor; FIELD_COUNT] = FIELD_TABLE;

/// 常用字段下标
pub const ID: usize = 0;
pub const PADDING: usize = 10;
pub const ITEM1: usize = 11;
pub const ITEM2: usize = 13;
pub const ITEM3: usize = 15;

/// 计算字段表的总宽度
const fn layout_size() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < FIELD_COUNT {
        total += FIELD_TABLE[i].width.size();
        i += 1;
    }
    total
}

// 字段宽度之和必须等于记录步长
const _: () = assert!(layout_size() == RECORD_SIZE);

/// 字段在记录内的字节偏移
pub fn field_offset(index: usize) -> Option<usize> {
    if index >= FIELD_COUNT {
        return None;
    }
    Some(FIELDS[..index].iter().map(|f| f.width.size()).sum())
}

/// 获取字段描述
pub fn descriptor(index: usize) -> Option<&'static FieldDescriptor> {
    FIELDS.get(index)
}

/// 按名称查找字段下标
///
/// 接受字段名、导出键名、界面标签或十进制下标，忽略大小写、空格和下划线。
/// 例如 `item1`、`Item1`、`"Item 1"`、`ITEM_1`、`11` 都指向同一个字段。
pub fn find_field(name: &str) -> Option<usize> {
    let trimmed = name.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return (index < FIELD_COUNT).then_some(index);
    }

    let key = normalize(trimmed);
    if key.is_empty() {
        return None;
    }

    FIELDS.iter().position(|field| {
        normalize(field.name) == key
            || field.export_name.map(normalize).as_deref() == Some(key.as_str())
            || normalize(field.label) == key
    })
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
