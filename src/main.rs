use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use przt_editor::utils::{create_backup, parse_int};
use przt_editor::{
    Exporter, LootRecord, PrztDebugger, PrztFile, RecordStore, DEFAULT_EXPORT_PATH, FIELDS,
    SUPPORTED_EXTENSIONS,
};

#[derive(Parser)]
#[command(name = "przt_editor")]
#[command(about = "编辑 PRZT 掉落表文件并导出 OpenKH YAML")]
#[command(version = "0.1.0")]
struct Cli {
    /// 输入PRZT文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 保存路径（默认覆盖输入文件）
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 显示掉落表统计信息
    #[arg(long)]
    stats: bool,

    /// 列出所有记录
    #[arg(long)]
    list: bool,

    /// 显示单条记录（从0开始的下标）
    #[arg(long, value_name = "INDEX")]
    show: Option<usize>,

    /// --list/--show 以JSON输出
    #[arg(long)]
    json: bool,

    /// 读取字段：记录下标,字段
    #[arg(long, value_name = "REC,FIELD")]
    get: Vec<String>,

    /// 修改字段：记录下标,字段,值（可重复）
    #[arg(long, value_name = "REC,FIELD,VALUE")]
    set: Vec<String>,

    /// 批量修改：字段,值（可重复）
    #[arg(long, value_name = "FIELD,VALUE")]
    set_all: Vec<String>,

    /// 导出为YAML（默认 przt.yml）
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_PATH)]
    export: Option<PathBuf>,

    /// 覆盖前创建备份
    #[arg(long)]
    backup: bool,

    /// 测试模式：解析文件后直接重建，用于验证解析和重建逻辑
    #[arg(long)]
    test_rebuild: bool,

    /// 对比两个PRZT文件的记录差异（配合 --dump 写入报告文件）
    #[arg(long, value_name = "FILE")]
    compare_files: Option<PathBuf>,

    /// 输出文件结构dump（对比模式下为报告路径）
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,

    /// 静默模式(仅输出错误)
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    validate_input(&cli)?;

    // 处理不同的操作模式
    if cli.test_rebuild {
        return handle_test_rebuild(&cli);
    }

    if let Some(compare_file) = &cli.compare_files {
        return handle_file_comparison(&cli, compare_file);
    }

    let mut store = RecordStore::load(&cli.input)
        .with_context(|| format!("加载PRZT文件失败: {:?}", cli.input))?;

    if cli.stats {
        println!("{}", store.file().get_stats());
        return Ok(());
    }

    if let Some(dump_path) = &cli.dump {
        PrztDebugger::dump_file_structure(store.file(), dump_path)
            .with_context(|| format!("写入dump失败: {:?}", dump_path))?;
        if !cli.quiet {
            println!("结构dump已写入: {:?}", dump_path);
        }
    }

    apply_edits(&cli, &mut store)?;
    print_queries(&cli, &store)?;

    if store.is_modified() {
        save_store(&cli, &mut store)?;
    }

    if let Some(export_path) = &cli.export {
        store
            .export(export_path)
            .with_context(|| format!("导出YAML失败: {:?}", export_path))?;
        if !cli.quiet {
            println!("已导出 {} 条记录到: {:?}", store.list(), export_path);
        }
    }

    Ok(())
}

/// 验证输入文件
fn validate_input(cli: &Cli) -> anyhow::Result<()> {
    if !cli.input.exists() {
        bail!("输入文件不存在: {:?}", cli.input);
    }

    let extension = cli
        .input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    if !SUPPORTED_EXTENSIONS.iter().any(|&ext| Some(ext) == extension.as_deref()) && !cli.quiet {
        eprintln!("警告: 输入文件扩展名不是常见的PRZT扩展名 ({:?})", SUPPORTED_EXTENSIONS);
    }

    Ok(())
}

/// 应用 --set 和 --set-all
fn apply_edits(cli: &Cli, store: &mut RecordStore) -> anyhow::Result<()> {
    for spec in &cli.set {
        let parts = split_args(spec, 3, "--set")?;
        let record = parse_record_index(parts[0])?;
        let field = RecordStore::field_index(parts[1])?;
        let value = parse_value(parts[2])?;

        store
            .set_field(record, field, value)
            .with_context(|| format!("修改失败: {}", spec))?;

        if !cli.quiet {
            println!("Entry {} {} = {}", record + 1, FIELDS[field].name, value);
        }
    }

    for spec in &cli.set_all {
        let parts = split_args(spec, 2, "--set-all")?;
        let field = RecordStore::field_index(parts[0])?;
        let value = parse_value(parts[1])?;

        let count = store
            .set_field_for_all(field, value)
            .with_context(|| format!("批量修改失败: {}", spec))?;

        if !cli.quiet {
            println!("批量修改 {} = {}，共 {} 条记录", FIELDS[field].name, value, count);
        }
    }

    Ok(())
}

/// 处理 --get / --list / --show
fn print_queries(cli: &Cli, store: &RecordStore) -> anyhow::Result<()> {
    for spec in &cli.get {
        let parts = split_args(spec, 2, "--get")?;
        let record = parse_record_index(parts[0])?;
        let field = RecordStore::field_index(parts[1])?;
        println!("{}", store.get_field(record, field)?);
    }

    if cli.list {
        if cli.json {
            println!("{}", Exporter::to_json(store.records())?);
        } else {
            for (label, record) in store.record_labels().iter().zip(store.records()) {
                println!("{}: {}", label, record);
            }
        }
    }

    if let Some(index) = cli.show {
        let record = store.record(index)?;
        if cli.json {
            println!("{}", Exporter::to_json(std::slice::from_ref(record))?);
        } else {
            print_record(index, record);
        }
    }

    Ok(())
}

/// 打印单条记录（带界面标签）
fn print_record(index: usize, record: &LootRecord) {
    println!("Entry {}", index + 1);
    for (field, value) in FIELDS.iter().zip(record.values()) {
        println!("  {:<24} {}", field.label, value);
    }
}

/// 保存修改
fn save_store(cli: &Cli, store: &mut RecordStore) -> anyhow::Result<()> {
    let output_path = cli.output.clone().unwrap_or_else(|| cli.input.clone());

    if cli.backup && output_path.exists() {
        let backup_path = create_backup(&output_path)?;
        if !cli.quiet {
            println!("已创建备份文件: {:?}", backup_path);
        }
    }

    store
        .save(&output_path)
        .with_context(|| format!("保存失败: {:?}", output_path))?;

    if !cli.quiet {
        println!("所有修改已保存到: {:?}", output_path);
    }
    Ok(())
}

/// 处理测试重建模式
fn handle_test_rebuild(cli: &Cli) -> anyhow::Result<()> {
    if !cli.quiet {
        println!("测试模式：解析并重建文件 {:?}", cli.input);
    }

    let output_path = get_rebuild_output_path(cli);
    let file = PrztFile::load(cli.input.clone())?;
    file.write_to_file(&output_path)?;

    let original = std::fs::read(&cli.input)?;
    let rebuilt = std::fs::read(&output_path)?;

    if !cli.quiet {
        println!("文件大小对比:");
        println!("  原文件: {} 字节", original.len());
        println!("  重建文件: {} 字节", rebuilt.len());
    }

    if original != rebuilt {
        bail!("重建文件与原文件不一致: {:?}", output_path);
    }

    if !cli.quiet {
        println!("✓ 重建文件与原文件逐字节一致，输出到: {:?}", output_path);
    }
    Ok(())
}

/// 处理文件对比
fn handle_file_comparison(cli: &Cli, compare_file: &Path) -> anyhow::Result<()> {
    if !compare_file.exists() {
        bail!("对比文件不存在: {:?}", compare_file);
    }

    if !cli.quiet {
        println!("正在对比文件结构:");
        println!("  文件1: {:?}", cli.input);
        println!("  文件2: {:?}", compare_file);
    }

    // 指定 --dump 时把报告写入文件
    if let Some(report_path) = &cli.dump {
        let report = PrztDebugger::compare_structures(&cli.input, compare_file, report_path)
            .with_context(|| format!("写入对比报告失败: {:?}", report_path))?;
        if !cli.quiet {
            println!("对比报告已写入: {:?}", report_path);
            println!("{}", if report.is_identical() { "✓ 文件结构一致" } else { "⚠ 文件存在差异" });
        }
        return Ok(());
    }

    let left = PrztFile::load(cli.input.clone())?;
    let right = PrztFile::load(compare_file.to_path_buf())?;
    let report = PrztDebugger::compare(&left, &right);

    println!("{}", report);
    Ok(())
}

/// 获取重建输出路径
fn get_rebuild_output_path(cli: &Cli) -> PathBuf {
    cli.output.clone().unwrap_or_else(|| {
        let stem = cli
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("przt");
        let name = match cli.input.extension().and_then(|e| e.to_str()) {
            Some(extension) => format!("{}_rebuilt.{}", stem, extension),
            None => format!("{}_rebuilt", stem),
        };
        cli.input.with_file_name(name)
    })
}

/// 按逗号拆分参数
fn split_args<'a>(spec: &'a str, expected: usize, flag: &str) -> anyhow::Result<Vec<&'a str>> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != expected {
        bail!("{} 参数格式错误: {:?}（需要 {} 个逗号分隔的值）", flag, spec, expected);
    }
    Ok(parts)
}

fn parse_record_index(text: &str) -> anyhow::Result<usize> {
    text.parse::<usize>()
        .with_context(|| format!("无效的记录下标: {:?}", text))
}

fn parse_value(text: &str) -> anyhow::Result<i64> {
    match parse_int(text) {
        Some(value) => Ok(value),
        None => bail!("无效的整数值: {:?}", text),
    }
}
