use thiserror::Error;
use std::path::{Path, PathBuf};

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum PrztError {
    #[error("Corrupt PRZT file: {0}")]
    CorruptFile(String),

    #[error("{kind} index {index} out of range (count: {len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: usize,
        len: usize,
    },

    #[error("Value {value} out of range for field {field} (allowed: {min}..={max})")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Too many records to encode: {0}")]
    TooManyRecords(usize),

    #[error("Export target is the source PRZT file: {0:?}")]
    ExportOverwritesSource(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 越界下标的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Record,
    Field,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Record => write!(f, "Record"),
            IndexKind::Field => write!(f, "Field"),
        }
    }
}

/// crate 内统一的 Result
pub type Result<T> = std::result::Result<T, PrztError>;

/// 解析整数参数
///
/// 支持十进制（可带 `+`/`-` 符号）和 `0x` 前缀的十六进制。
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.starts_with(['-', '+']) {
        return None;
    }

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };

    Some(if negative { -value } else { value })
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<PathBuf> {
    if !file_path.exists() {
        return Err(PrztError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup_path = file_path.with_extension(format!("{}.bak", timestamp));

    std::fs::copy(file_path, &backup_path)
        .map_err(PrztError::IoError)?;

    Ok(backup_path)
}
