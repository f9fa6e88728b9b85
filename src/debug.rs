use crate::datatypes::FileHeader;
use crate::field::{field_offset, FIELDS, RECORD_SIZE};
use crate::przt::PrztFile;
use crate::record::LootRecord;
use crate::utils::{PrztError, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 单个字段的差异
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDifference {
    pub record_index: usize,
    pub field: &'static str,
    pub left: i64,
    pub right: i64,
}

/// 两个文件的结构对比结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    pub format_tags: (u32, u32),
    pub record_counts: (usize, usize),
    pub differences: Vec<FieldDifference>,
}

impl ComparisonReport {
    /// 是否完全一致
    pub fn is_identical(&self) -> bool {
        self.format_tags.0 == self.format_tags.1
            && self.record_counts.0 == self.record_counts.1
            && self.differences.is_empty()
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== 基本信息对比 ===")?;
        writeln!(f, "格式标签: 0x{:08X} vs 0x{:08X}", self.format_tags.0, self.format_tags.1)?;
        writeln!(f, "记录数量: {} vs {}", self.record_counts.0, self.record_counts.1)?;

        if self.record_counts.0 != self.record_counts.1 {
            writeln!(f, "⚠️ 记录数量不匹配！只对比共同部分")?;
        }

        writeln!(f)?;
        writeln!(f, "=== 字段差异 ({}) ===", self.differences.len())?;
        for diff in &self.differences {
            writeln!(
                f,
                "Entry {} {}: {} -> {}",
                diff.record_index + 1,
                diff.field,
                diff.left,
                diff.right
            )?;
        }

        if self.is_identical() {
            writeln!(f, "✓ 文件结构一致")?;
        }
        Ok(())
    }
}

/// PRZT 文件结构调试器
pub struct PrztDebugger;

impl PrztDebugger {
    /// 生成详细的文件结构dump
    ///
    /// 输出路径指向源 PRZT 文件时拒绝写入。
    pub fn dump_file_structure(file: &PrztFile, output_path: &Path) -> Result<()> {
        if file.is_same_file(output_path) {
            return Err(PrztError::ExportOverwritesSource(output_path.to_path_buf()));
        }

        let mut output = File::create(output_path)?;
        Self::write_structure(file, &mut output)?;
        Ok(())
    }

    /// 把结构dump写入任意输出
    pub fn write_structure(file: &PrztFile, output: &mut dyn Write) -> Result<()> {
        Self::write_header_info(output, file)?;

        writeln!(output, "=== 记录 ({}) ===", file.records.len())?;
        for (i, record) in file.records.iter().enumerate() {
            Self::dump_record(output, i, record)?;
        }
        Ok(())
    }

    /// 写入头部信息
    fn write_header_info(output: &mut dyn Write, file: &PrztFile) -> Result<()> {
        writeln!(output, "=== PRZT文件结构dump ===")?;
        writeln!(output, "文件: {}", file.get_name())?;
        writeln!(output, "格式标签: 0x{:08X}", file.header.format_tag)?;
        writeln!(output, "头部记录数: {}", file.header.record_count)?;
        writeln!(output, "实际记录数: {}", file.records.len())?;

        if file.header.record_count as usize != file.records.len() {
            writeln!(output, "⚠ 记录数已变化，保存时会重新计算")?;
        }
        writeln!(output)?;
        Ok(())
    }

    /// Dump 单条记录
    fn dump_record(output: &mut dyn Write, index: usize, record: &LootRecord) -> Result<()> {
        let base = FileHeader::SIZE + index * RECORD_SIZE;
        writeln!(output, "Entry {} @0x{:06X} {{", index + 1, base)?;

        let bytes = record.to_bytes()?;
        let hex: Vec<String> = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        writeln!(output, "  原始字节: {}", hex.join(" "))?;

        for (field_index, (field, value)) in FIELDS.iter().zip(record.values()).enumerate() {
            writeln!(
                output,
                "  +{:02} {:<16} {:>6}",
                field_offset(field_index).unwrap_or(0),
                field.name,
                value
            )?;
        }

        writeln!(output, "}}")?;
        Ok(())
    }

    /// 逐条记录、逐个字段对比两个文件
    pub fn compare(left: &PrztFile, right: &PrztFile) -> ComparisonReport {
        let mut differences = Vec::new();

        for (i, (a, b)) in left.records.iter().zip(right.records.iter()).enumerate() {
            for (field, (&va, &vb)) in FIELDS.iter().zip(a.values().iter().zip(b.values())) {
                if va != vb {
                    differences.push(FieldDifference {
                        record_index: i,
                        field: field.name,
                        left: va as i64,
                        right: vb as i64,
                    });
                }
            }
        }

        ComparisonReport {
            format_tags: (left.format_tag(), right.format_tag()),
            record_counts: (left.records.len(), right.records.len()),
            differences,
        }
    }

    /// 对比两个文件并写出报告
    pub fn compare_structures(left: &Path, right: &Path, output_path: &Path) -> Result<ComparisonReport> {
        let left = PrztFile::load(left.to_path_buf())?;
        let right = PrztFile::load(right.to_path_buf())?;

        // 报告不能覆盖参与对比的任一文件
        if left.is_same_file(output_path) || right.is_same_file(output_path) {
            return Err(PrztError::ExportOverwritesSource(output_path.to_path_buf()));
        }

        let report = Self::compare(&left, &right);
        std::fs::write(output_path, report.to_string())?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_test_file(dir: &Path, name: &str, item1: i64) -> PathBuf {
        let mut file = create_test_file();
        file.set_field(0, field::ITEM1, item1).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, file.to_bytes().unwrap()).unwrap();
        path
    }

    fn create_test_file() -> PrztFile {
        let mut record = LootRecord::default();
        record.set(field::ID, 3).unwrap();
        record.set(field::ITEM1, 500).unwrap();
        PrztFile::new(PathBuf::from("przt_0.list"), 1, vec![record, LootRecord::default()])
    }

    #[test]
    fn test_dump_structure() {
        let mut output = Vec::new();
        PrztDebugger::write_structure(&create_test_file(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("格式标签: 0x00000001"));
        assert!(text.contains("Entry 1 @0x000008"));
        assert!(text.contains("Entry 2 @0x000020"));
        assert!(text.contains("03 00"));
        assert!(text.contains("+12 item1"));
    }

    #[test]
    fn test_compare_identical() {
        let report = PrztDebugger::compare(&create_test_file(), &create_test_file());
        assert!(report.is_identical());
        assert!(report.to_string().contains("✓"));
    }

    #[test]
    fn test_compare_differences() {
        let left = create_test_file();
        let mut right = create_test_file();
        right.set_field(1, 16, -3).unwrap();
        right.records.push(LootRecord::default());

        let report = PrztDebugger::compare(&left, &right);
        assert!(!report.is_identical());
        assert_eq!(report.record_counts, (2, 3));
        assert_eq!(
            report.differences,
            vec![FieldDifference {
                record_index: 1,
                field: "item3Percentage",
                left: 0,
                right: -3,
            }]
        );
        assert!(report.to_string().contains("Entry 2 item3Percentage: 0 -> -3"));
    }

    #[test]
    fn test_dump_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_file(temp_dir.path(), "przt_0.list", 500);
        let file = PrztFile::load(source).unwrap();

        let dump_path = temp_dir.path().join("dump.txt");
        PrztDebugger::dump_file_structure(&file, &dump_path).unwrap();

        let text = std::fs::read_to_string(&dump_path).unwrap();
        assert!(text.contains("Entry 2 @0x000020"));
    }

    #[test]
    fn test_dump_refuses_source_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = write_test_file(temp_dir.path(), "przt_0.list", 500);
        let original = std::fs::read(&source).unwrap();
        let file = PrztFile::load(source.clone()).unwrap();

        let result = PrztDebugger::dump_file_structure(&file, &source);
        assert!(matches!(result, Err(PrztError::ExportOverwritesSource(_))));
        assert_eq!(std::fs::read(&source).unwrap(), original);

        // 同一文件的另一种写法也要识别出来
        let dotted = temp_dir.path().join(".").join("przt_0.list");
        let result = PrztDebugger::dump_file_structure(&file, &dotted);
        assert!(matches!(result, Err(PrztError::ExportOverwritesSource(_))));
        assert_eq!(std::fs::read(&source).unwrap(), original);
    }

    #[test]
    fn test_compare_structures_writes_report() {
        let temp_dir = TempDir::new().unwrap();
        let left = write_test_file(temp_dir.path(), "left.list", 500);
        let right = write_test_file(temp_dir.path(), "right.list", 600);
        let report_path = temp_dir.path().join("report.txt");

        let report = PrztDebugger::compare_structures(&left, &right, &report_path).unwrap();
        assert_eq!(
            report.differences,
            vec![FieldDifference {
                record_index: 0,
                field: "item1",
                left: 500,
                right: 600,
            }]
        );

        let text = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(text, report.to_string());
        assert!(text.contains("Entry 1 item1: 500 -> 600"));
    }

    #[test]
    fn test_compare_structures_refuses_input_as_output() {
        let temp_dir = TempDir::new().unwrap();
        let left = write_test_file(temp_dir.path(), "left.list", 500);
        let right = write_test_file(temp_dir.path(), "right.list", 600);
        let right_bytes = std::fs::read(&right).unwrap();

        let result = PrztDebugger::compare_structures(&left, &right, &right);
        assert!(matches!(result, Err(PrztError::ExportOverwritesSource(_))));
        assert_eq!(std::fs::read(&right).unwrap(), right_bytes);
    }
}
