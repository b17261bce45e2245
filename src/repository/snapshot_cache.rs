// ==========================================
// 纺织生产经营看板 - 快照缓存
// ==========================================
// 职责: 一次性加载并按文件身份缓存 DataStore 快照
// 身份: 规范化路径 + 修改时间 + 字节数（CSV 目录取各 .csv 汇总）
// 约束: 同一未修改文件重复加载返回同一 Arc 快照（幂等）
//       每个路径只保留最新快照，文件变化后替换旧条目
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::repository::data_store::DataStore;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::SystemTime;

// ==========================================
// SourceIdentity - 数据源身份
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceIdentity {
    /// 读取数据源身份
    ///
    /// # 返回
    /// - Err(FileNotFound): 路径不存在
    pub fn of(path: &Path) -> ImportResult<Self> {
        let canonical = fs::canonicalize(path)
            .map_err(|_| ImportError::FileNotFound(path.display().to_string()))?;
        let metadata = fs::metadata(&canonical)?;

        if metadata.is_dir() {
            let mut modified: Option<SystemTime> = None;
            let mut len = 0u64;
            for entry in fs::read_dir(&canonical)? {
                let entry = entry?;
                let entry_path = entry.path();
                let is_csv = entry_path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false);
                if !is_csv {
                    continue;
                }
                let meta = entry.metadata()?;
                len += meta.len();
                let file_modified = meta.modified().ok();
                modified = match (modified, file_modified) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            }
            return Ok(Self {
                path: canonical,
                modified,
                len,
            });
        }

        Ok(Self {
            path: canonical,
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

// ==========================================
// SnapshotCache - 快照缓存
// ==========================================
#[derive(Default)]
pub struct SnapshotCache {
    // 规范化路径 → (加载时身份, 快照)
    entries: Mutex<HashMap<PathBuf, (SourceIdentity, Arc<DataStore>)>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级共享缓存
    pub fn shared() -> &'static SnapshotCache {
        static SHARED: OnceLock<SnapshotCache> = OnceLock::new();
        SHARED.get_or_init(SnapshotCache::new)
    }

    /// 获取快照；未命中时调用 loader 加载并缓存
    ///
    /// # 参数
    /// - path: 数据源路径
    /// - loader: 实际加载函数（仅在未命中时调用）
    ///
    /// # 说明
    /// - 加载失败不写入缓存（旧快照保留）
    /// - 文件变化后新快照替换同一路径的旧条目
    /// - 加载期间持有锁，同一进程内不会重复加载同一文件
    pub fn get_or_load<F>(&self, path: &Path, loader: F) -> ImportResult<Arc<DataStore>>
    where
        F: FnOnce(&Path) -> ImportResult<DataStore>,
    {
        let identity = SourceIdentity::of(path)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))?;

        match entries.get(&identity.path) {
            Some((cached, store)) if *cached == identity => {
                tracing::debug!(path = %identity.path.display(), "快照缓存命中");
                return Ok(Arc::clone(store));
            }
            Some(_) => {
                tracing::info!(path = %identity.path.display(), "数据源已变更，重新加载快照");
            }
            None => {
                tracing::debug!(path = %identity.path.display(), "快照缓存未命中，开始加载");
            }
        }

        let store = Arc::new(loader(path)?);
        entries.insert(identity.path.clone(), (identity, Arc::clone(&store)));
        Ok(store)
    }

    /// 已缓存的快照数
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::data_store::DataTables;
    use std::cell::Cell;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_same_file_returns_same_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "placeholder").unwrap();

        let cache = SnapshotCache::new();
        let calls = Cell::new(0);
        let loader = |_: &Path| {
            calls.set(calls.get() + 1);
            Ok(DataStore::from_tables(DataTables::default()))
        };

        let first = cache.get_or_load(file.path(), loader).unwrap();
        let second = cache.get_or_load(file.path(), loader).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let file = NamedTempFile::new().unwrap();
        let cache = SnapshotCache::new();

        let result = cache.get_or_load(file.path(), |_| {
            Err(ImportError::SheetMissing("PRODUCTOS".to_string()))
        });
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_changed_file_replaces_entry() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "v0").unwrap();

        let cache = SnapshotCache::new();
        let loader = |_: &Path| Ok(DataStore::from_tables(DataTables::default()));

        let mut previous = cache.get_or_load(file.path(), loader).unwrap();
        for round in 1..=4 {
            writeln!(file, "v{}", round).unwrap();
            file.flush().unwrap();
            let reloaded = cache.get_or_load(file.path(), loader).unwrap();
            assert!(!Arc::ptr_eq(&previous, &reloaded));
            assert_eq!(cache.len(), 1);
            previous = reloaded;
        }
    }

    #[test]
    fn test_missing_path() {
        let cache = SnapshotCache::new();
        let result = cache.get_or_load(Path::new("/no/such/workbook.xlsx"), |_| {
            Ok(DataStore::from_tables(DataTables::default()))
        });
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
