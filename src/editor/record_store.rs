/// 记录编辑器模块
///
/// 提供有状态的编辑接口：加载、字段读写、批量修改、保存和导出。
/// 遵循"修改-保存分离"原则，所有修改操作仅在内存中进行。

use std::path::{Path, PathBuf};
use crate::export::Exporter;
use crate::field::{self, FIELD_COUNT};
use crate::io::{DefaultPrztReader, DefaultPrztWriter, PrztReader, PrztWriter};
use crate::przt::PrztFile;
use crate::record::LootRecord;
use crate::utils::{PrztError, Result};

/// 掉落表编辑会话
///
/// # 核心特性
/// - **内存即真相**: 保存和导出只使用内存中的记录，不会从界面回读
/// - **原子批量修改**: 批量修改先校验，失败时不改动任何记录
/// - **隔离性**: 多个实例互不影响，没有全局状态
///
/// # 使用示例
///
/// ```rust,ignore
/// use przt_editor::RecordStore;
///
/// let mut store = RecordStore::load("przt_0.list")?;
/// store.set_field(0, 11, 500)?;
/// store.set_field_for_all(1, 0)?;
/// store.save("przt_0.list")?;
/// store.export("przt.yml")?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// 底层文件
    file: PrztFile,
    /// 自加载/保存以来成功的修改次数
    modified_count: usize,
}

impl RecordStore {
    /// 加载 PRZT 文件
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, &DefaultPrztReader)
    }

    /// 使用自定义 Reader 加载
    pub fn load_with(path: impl AsRef<Path>, reader: &dyn PrztReader) -> Result<Self> {
        let file = PrztFile::load_with_reader(path.as_ref().to_path_buf(), reader)?;
        Ok(Self::new(file))
    }

    /// 包装已解析的文件
    pub fn new(file: PrztFile) -> Self {
        Self { file, modified_count: 0 }
    }

    /// 记录数量
    pub fn list(&self) -> usize {
        self.file.record_count()
    }

    /// 记录的显示标签（"Entry 1" 起）
    pub fn record_labels(&self) -> Vec<String> {
        (1..=self.list()).map(|i| format!("Entry {}", i)).collect()
    }

    /// 按名称查找字段下标
    pub fn field_index(name: &str) -> Result<usize> {
        field::find_field(name).ok_or_else(|| PrztError::UnknownField(name.to_string()))
    }

    /// 读取字段
    pub fn get_field(&self, record_index: usize, field_index: usize) -> Result<i64> {
        self.file.get_field(record_index, field_index)
    }

    /// 修改字段（仅内存）
    pub fn set_field(&mut self, record_index: usize, field_index: usize, value: i64) -> Result<()> {
        self.file.set_field(record_index, field_index, value)?;
        self.modified_count += 1;
        Ok(())
    }

    /// 批量修改所有记录的同一字段，返回修改的记录数
    pub fn set_field_for_all(&mut self, field_index: usize, value: i64) -> Result<usize> {
        let count = self.file.set_field_for_all(field_index, value)?;
        self.modified_count += 1;

        #[cfg(debug_assertions)]
        println!(
            "批量修改 {} = {}，共 {} 条记录",
            field::FIELDS[field_index].name, value, count
        );

        Ok(count)
    }

    /// 获取记录
    pub fn record(&self, index: usize) -> Result<&LootRecord> {
        self.file.record(index)
    }

    /// 所有记录
    pub fn records(&self) -> &[LootRecord] {
        &self.file.records
    }

    /// 底层文件
    pub fn file(&self) -> &PrztFile {
        &self.file
    }

    /// 加载路径
    pub fn path(&self) -> &Path {
        &self.file.path
    }

    /// 保存到指定路径（完整重写）
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save_with(&DefaultPrztWriter, path)
    }

    /// 使用自定义 Writer 保存
    pub fn save_with(&mut self, writer: &dyn PrztWriter, path: impl AsRef<Path>) -> Result<()> {
        self.file.write_with_writer(writer, path.as_ref())?;
        self.modified_count = 0;
        Ok(())
    }

    /// 保存到原路径
    pub fn save_to_original(&mut self) -> Result<()> {
        let path: PathBuf = self.file.path.clone();
        self.save(path)
    }

    /// 导出 YAML（不会覆盖源二进制文件）
    pub fn export(&self, output_path: impl AsRef<Path>) -> Result<()> {
        let output_path = output_path.as_ref();
        if self.file.is_same_file(output_path) {
            return Err(PrztError::ExportOverwritesSource(output_path.to_path_buf()));
        }
        Exporter::write(&self.file.records, output_path)
    }

    /// 检查是否有修改
    pub fn is_modified(&self) -> bool {
        self.modified_count > 0
    }

    /// 获取修改次数
    pub fn modified_count(&self) -> usize {
        self.modified_count
    }

    /// 生成编辑摘要
    pub fn summary(&self) -> String {
        format!(
            "文件: {}, 记录数: {}, 字段数: {}, 修改状态: {}",
            self.file.get_name(),
            self.list(),
            FIELD_COUNT,
            if self.is_modified() {
                format!("已修改 ({} 次)", self.modified_count)
            } else {
                "未修改".to_string()
            }
        )
    }
}
