use crate::datatypes::{read_i16, read_u16, read_u8, write_i16, write_u16, write_u8};
use crate::field::{self, FieldWidth, FIELDS, FIELD_COUNT, RECORD_SIZE};
use crate::utils::{IndexKind, PrztError, Result};
use std::io::{Cursor, Write};

/// 掉落表记录（24字节定长）
///
/// 所有字段值以 `i32` 保存，宽度和符号由 [`FIELDS`] 描述表决定。
/// 通过 [`LootRecord::set`] 写入的值一定已经过范围校验，因此编码不会截断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LootRecord {
    values: [i32; FIELD_COUNT],
}

impl LootRecord {
    /// 解析记录
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_SIZE {
            return Err(PrztError::CorruptFile(format!(
                "Insufficient data for record: expected {} bytes, got {}",
                RECORD_SIZE,
                data.len()
            )));
        }

        let mut cursor = Cursor::new(&data[..RECORD_SIZE]);
        let mut values = [0i32; FIELD_COUNT];

        for (value, field) in values.iter_mut().zip(FIELDS.iter()) {
            *value = match (field.width, field.signed) {
                (FieldWidth::Byte, _) => read_u8(&mut cursor)? as i32,
                (FieldWidth::Word, false) => read_u16(&mut cursor)? as i32,
                (FieldWidth::Word, true) => read_i16(&mut cursor)? as i32,
            };
        }

        Ok(Self { values })
    }

    /// 写入记录（固定24字节）
    pub fn write(&self, writer: &mut dyn Write) -> Result<()> {
        for (&value, field) in self.values.iter().zip(FIELDS.iter()) {
            let out_of_range = || PrztError::ValueOutOfRange {
                field: field.name,
                value: value as i64,
                min: field.min(),
                max: field.max(),
            };

            match (field.width, field.signed) {
                (FieldWidth::Byte, _) => {
                    write_u8(writer, u8::try_from(value).map_err(|_| out_of_range())?)?
                }
                (FieldWidth::Word, false) => {
                    write_u16(writer, u16::try_from(value).map_err(|_| out_of_range())?)?
                }
                (FieldWidth::Word, true) => {
                    write_i16(writer, i16::try_from(value).map_err(|_| out_of_range())?)?
                }
            }
        }
        Ok(())
    }

    /// 编码为字节
    pub fn to_bytes(&self) -> Result<[u8; RECORD_SIZE]> {
        let mut buffer = Vec::with_capacity(RECORD_SIZE);
        self.write(&mut buffer)?;

        let mut bytes = [0u8; RECORD_SIZE];
        bytes.copy_from_slice(&buffer);
        Ok(bytes)
    }

    /// 获取字段值
    pub fn get(&self, field_index: usize) -> Result<i64> {
        self.values
            .get(field_index)
            .map(|&v| v as i64)
            .ok_or(PrztError::IndexOutOfRange {
                kind: IndexKind::Field,
                index: field_index,
                len: FIELD_COUNT,
            })
    }

    /// 设置字段值（先校验范围，失败时记录保持不变）
    pub fn set(&mut self, field_index: usize, value: i64) -> Result<()> {
        let checked = Self::check_value(field_index, value)?;
        self.values[field_index] = checked;
        Ok(())
    }

    /// 校验字段取值，返回可直接存储的值
    pub fn check_value(field_index: usize, value: i64) -> Result<i32> {
        let descriptor = field::descriptor(field_index).ok_or(PrztError::IndexOutOfRange {
            kind: IndexKind::Field,
            index: field_index,
            len: FIELD_COUNT,
        })?;

        if !descriptor.accepts(value) {
            return Err(PrztError::ValueOutOfRange {
                field: descriptor.name,
                value,
                min: descriptor.min(),
                max: descriptor.max(),
            });
        }

        // 16 位以内的值一定能放进 i32
        Ok(value as i32)
    }

    /// 所有字段值（按文件顺序）
    pub fn values(&self) -> &[i32; FIELD_COUNT] {
        &self.values
    }

    /// 记录 ID
    pub fn id(&self) -> u16 {
        self.values[field::ID] as u16
    }

    /// 三个掉落物品（物品 ID, 掉落率）
    pub fn items(&self) -> [(u16, i16); 3] {
        [field::ITEM1, field::ITEM2, field::ITEM3]
            .map(|slot| (self.values[slot] as u16, self.values[slot + 1] as i16))
    }

    /// 是否有任何掉落（光球或物品）
    pub fn has_drops(&self) -> bool {
        self.values
            .iter()
            .zip(FIELDS.iter())
            .enumerate()
            .any(|(i, (&v, f))| i != field::ID && f.is_exported() && v != 0)
    }
}

impl std::fmt::Display for LootRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .values
            .iter()
            .zip(FIELDS.iter())
            .map(|(v, field)| format!("{}={}", field.name, v))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
