// ==========================================
// 纺织生产经营看板 - 应用层
// ==========================================
// 职责: 启动装配与终端渲染,连接命令行与 API
// ==========================================

pub mod render;
pub mod state;

// 重导出
pub use render::{render_products, render_view, OutputFormat};
pub use state::{AppState, StartupOptions};
