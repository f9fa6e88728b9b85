/// 编辑器层模块
///
/// 该模块提供有状态的编辑接口，所有修改仅在内存中进行，需要显式调用保存。
///
/// # 架构设计
///
/// - **record_store**: 掉落表编辑会话，管理 PrztFile 的修改状态
///
/// # 使用示例
///
/// ```rust,ignore
/// use przt_editor::RecordStore;
///
/// // 加载 + 编辑 + 保存工作流
/// let mut store = RecordStore::load("przt_0.list")?;
/// store.set_field_for_all(RecordStore::field_index("Big HP Orbs")?, 2)?;
/// println!("修改了 {} 次", store.modified_count());
///
/// store.save("przt_0.list")?;
/// ```
pub mod record_store;

// === 导出公共接口 ===
pub use record_store::RecordStore;
