// ==========================================
// 纺织生产经营看板 - 应用状态
// ==========================================
// 职责: 启动时解析配置与数据源，加载快照，装配 API 实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::api::{ApiResult, DashboardApi};
use crate::config::ConfigManager;
use crate::importer::WorkbookImporter;
use crate::repository::SnapshotCache;

/// 启动参数（命令行覆盖项）
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub data_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub locale: Option<String>,
}

/// 应用状态
///
/// 持有配置与看板API；数据快照来自进程级快照缓存
pub struct AppState {
    /// 实际使用的数据源路径
    pub data_path: PathBuf,

    /// 配置管理器
    pub config_manager: ConfigManager,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 初始化应用状态
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 按查找顺序加载配置，并应用命令行语言覆盖
    /// 2. 解析数据源路径
    /// 3. 经快照缓存加载数据（任一工作表缺失即整体失败）
    /// 4. 切换界面语言并创建 API 实例
    pub fn initialize(options: &StartupOptions) -> ApiResult<Self> {
        let mut config_manager = ConfigManager::load(options.config_path.as_deref())?;
        if let Some(locale) = options.locale.as_deref() {
            config_manager.override_locale(locale)?;
        }

        let data_path = config_manager.resolve_data_path(options.data_path.as_deref());
        tracing::info!(path = %data_path.display(), "初始化AppState");

        let state = Self::with_config(data_path, config_manager)?;
        crate::i18n::set_locale(&state.config_manager.config().locale);
        Ok(state)
    }

    /// 使用已加载的配置初始化（测试/嵌入场景）
    pub fn with_config(data_path: PathBuf, config_manager: ConfigManager) -> ApiResult<Self> {
        let started = Instant::now();
        let store = SnapshotCache::shared().get_or_load(&data_path, load_workbook)?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            products = store.products().len(),
            "数据快照就绪"
        );

        let dashboard_api = Arc::new(DashboardApi::new(
            Arc::clone(&store),
            config_manager.config().clone(),
        ));

        Ok(Self {
            data_path,
            config_manager,
            dashboard_api,
        })
    }
}

fn load_workbook(path: &Path) -> crate::importer::ImportResult<crate::repository::DataStore> {
    WorkbookImporter::new().load(path)
}
