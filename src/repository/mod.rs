// ==========================================
// 纺织生产经营看板 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 持有只读数据表，提供按键查找与快照缓存
// 约束: 加载后不可变，无锁读取
// ==========================================

pub mod data_store;
pub mod snapshot_cache;

// 重导出核心仓储
pub use data_store::{DataStore, DataTables, SourceInfo};
pub use snapshot_cache::{SnapshotCache, SourceIdentity};
