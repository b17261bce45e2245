// ==========================================
// 纺织生产经营看板 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、数据源路径解析
// 存储: JSON 配置文件（可选，缺省使用默认值）
// ==========================================

use crate::config::simulation_policy::{SimulationPolicy, ValidationMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 原始数据工作簿的默认文件名
pub const DEFAULT_WORKBOOK_FILE: &str = "ICATEX_Datos_Completos_20Productos.xlsx";

/// 支持的界面语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

// ==========================================
// 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置校验失败: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// DashboardConfig - 看板配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// 数据工作簿路径（可被命令行/环境变量覆盖）
    pub data_path: Option<PathBuf>,

    /// 界面语言
    pub locale: String,

    /// 排行榜条数
    pub top_n: usize,

    /// 杠杆越界处理方式
    pub lever_validation: ValidationMode,

    /// 情景模拟策略
    pub simulation: SimulationPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            locale: "es".to_string(),
            top_n: 10,
            lever_validation: ValidationMode::Strict,
            simulation: SimulationPolicy::default(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.top_n == 0 {
            return Err(ConfigError::ValidationError("top_n 必须 >= 1".to_string()));
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "不支持的语言: {}（支持: {}）",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            )));
        }
        self.simulation
            .validate()
            .map_err(ConfigError::ValidationError)
    }
}

// ==========================================
// 环境变量键
// ==========================================
pub mod config_keys {
    pub const CONFIG_PATH_ENV: &str = "TEXTILE_DASHBOARD_CONFIG";
    pub const DATA_PATH_ENV: &str = "TEXTILE_DASHBOARD_DATA_PATH";

    pub const APP_DIR: &str = "textile-dashboard";
    pub const CONFIG_FILE: &str = "config.json";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: DashboardConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 从已有配置创建（会校验）
    pub fn from_config(config: DashboardConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 按查找顺序加载配置
    ///
    /// # 查找顺序
    /// 1. explicit（命令行指定，文件必须存在）
    /// 2. 环境变量 TEXTILE_DASHBOARD_CONFIG（文件必须存在）
    /// 3. 用户配置目录下 textile-dashboard/config.json（不存在则使用默认值）
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Self::from_file(Path::new(trimmed));
            }
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                tracing::info!("未找到配置文件，使用默认配置");
                Self::from_config(DashboardConfig::default())
            }
        }
    }

    /// 从 JSON 文件加载（缺省字段使用默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: DashboardConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "配置文件加载完成");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(config_keys::APP_DIR).join(config_keys::CONFIG_FILE))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 覆写界面语言（命令行优先于配置文件）
    pub fn override_locale(&mut self, locale: &str) -> ConfigResult<()> {
        let mut candidate = self.config.clone();
        candidate.locale = locale.to_string();
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }

    /// 解析数据工作簿路径
    ///
    /// # 查找顺序
    /// 1. explicit（命令行 --data）
    /// 2. 环境变量 TEXTILE_DASHBOARD_DATA_PATH
    /// 3. 配置文件 data_path
    /// 4. 当前目录下的默认工作簿文件名
    pub fn resolve_data_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Ok(env_path) = std::env::var(config_keys::DATA_PATH_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        self.config
            .data_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKBOOK_FILE))
    }
}
