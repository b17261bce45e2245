// ==========================================
// 纺织生产经营看板 - 看板 API
// ==========================================
// 职责: 接收看板选择，完成名称→ID 映射、年份/杠杆校验，委托引擎计算
// 架构: API 层 → Engine 层 → DataStore（只读快照）
// ==========================================

use std::sync::Arc;

use crate::api::dto::{
    DashboardView, ProcessesView, ProductOption, SimulationRequest, SimulationView, ViewSelection,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{LeverValidator, ValidationMode};
use crate::config::DashboardConfig;
use crate::domain::types::{is_supported_year, latest_year, SUPPORTED_YEARS};
use crate::domain::Product;
use crate::engine::{
    simulation_baseline, DemandAnalysisEngine, DemandSeries, OverviewEngine, OverviewSummary,
    ProcessAnalysisEngine, ProductAnalysisEngine, ProductDetail, ProfitabilityEngine,
    ScenarioSimulator, YearlyProfitability,
};
use crate::repository::DataStore;

// ==========================================
// DashboardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责：
/// 1. 六个分区的视图查询（纯函数：数据快照 + 选择 → 视图）
/// 2. 产品名称到产品ID的映射（未知名称为无效输入）
/// 3. 情景模拟杠杆校验（严格/截断）
///
/// 多个会话可共享同一 `Arc<DataStore>`，各自持有 DashboardApi
pub struct DashboardApi {
    store: Arc<DataStore>,
    config: DashboardConfig,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - store: 只读数据快照
    /// - config: 看板配置（排行条数、杠杆策略、校验模式）
    pub fn new(store: Arc<DataStore>, config: DashboardConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ==========================================
    // 选择器
    // ==========================================

    /// 产品选择项（产品表行序）
    pub fn product_options(&self) -> Vec<ProductOption> {
        self.store
            .products()
            .iter()
            .map(|p| ProductOption {
                product_id: p.product_id.clone(),
                name: p.name.clone(),
            })
            .collect()
    }

    /// 按名称解析产品
    ///
    /// # 返回
    /// - Err(ApiError::InvalidInput): 名称为空或不存在
    pub fn resolve_product(&self, product_name: &str) -> ApiResult<&Product> {
        if product_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("产品名称不能为空".to_string()));
        }
        self.store
            .find_product_by_name(product_name)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知产品: {}", product_name)))
    }

    fn check_year(&self, year: i32) -> ApiResult<()> {
        if is_supported_year(year) {
            Ok(())
        } else {
            Err(ApiError::InvalidInput(format!(
                "不支持的年份: {}（支持: {:?}）",
                year, SUPPORTED_YEARS
            )))
        }
    }

    // ==========================================
    // 视图分发
    // ==========================================

    /// 按选择计算视图
    pub fn view(&self, selection: &ViewSelection) -> ApiResult<DashboardView> {
        tracing::debug!(section = %selection.section(), "计算看板视图");

        let view = match selection {
            ViewSelection::Overview => DashboardView::Overview(self.overview()),
            ViewSelection::ProductDetail { product_name } => {
                DashboardView::ProductDetail(self.product_detail(product_name)?)
            }
            ViewSelection::Profitability { year } => {
                DashboardView::Profitability(self.profitability(*year)?)
            }
            ViewSelection::Demand { product_name } => {
                DashboardView::Demand(self.demand(product_name)?)
            }
            ViewSelection::Processes { year } => DashboardView::Processes(self.processes(*year)?),
            ViewSelection::Simulator(request) => DashboardView::Simulator(self.simulate(request)?),
        };
        Ok(view)
    }

    // ==========================================
    // 分区查询
    // ==========================================

    /// 总体概览
    pub fn overview(&self) -> OverviewSummary {
        OverviewEngine::new().summarize(&self.store)
    }

    /// 产品分析
    pub fn product_detail(&self, product_name: &str) -> ApiResult<ProductDetail> {
        let product = self.resolve_product(product_name)?;
        ProductAnalysisEngine::new()
            .product_detail(&self.store, &product.product_id)
            .ok_or_else(|| ApiError::NotFound(format!("产品(id={})", product.product_id)))
    }

    /// 成本与盈利
    pub fn profitability(&self, year: i32) -> ApiResult<YearlyProfitability> {
        self.check_year(year)?;
        Ok(ProfitabilityEngine::new(self.config.top_n).yearly_profitability(&self.store, year))
    }

    /// 需求与季节性
    pub fn demand(&self, product_name: &str) -> ApiResult<DemandSeries> {
        let product = self.resolve_product(product_name)?;
        Ok(DemandAnalysisEngine::new().demand_series(&self.store, &product.product_id))
    }

    /// 工序产能
    pub fn processes(&self, year: i32) -> ApiResult<ProcessesView> {
        self.check_year(year)?;
        let engine = ProcessAnalysisEngine::new();
        Ok(ProcessesView {
            year,
            capacity: engine.process_capacity(&self.store, year),
            costs: engine.process_costs(&self.store),
            time_totals: engine.process_time_totals(&self.store),
        })
    }

    /// 情景模拟（基准取最近数据年度）
    ///
    /// # 返回
    /// - Err(ApiError::LeverValidationError): 严格模式下杠杆越界
    /// - Err(ApiError::NotFound): 产品在基准年度无成本或需求记录
    pub fn simulate(&self, request: &SimulationRequest) -> ApiResult<SimulationView> {
        let product = self.resolve_product(&request.product_name)?;

        let mode = if request.clamp {
            ValidationMode::Clamp
        } else {
            self.config.lever_validation
        };
        let levers = LeverValidator::new(&self.config.simulation).validate(&request.levers, mode)?;

        let baseline_year = latest_year();
        let baseline = simulation_baseline(&self.store, &product.product_id, baseline_year)
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "产品 {} 在 {} 年无成本/需求记录，无法建立模拟基准",
                    product.name, baseline_year
                ))
            })?;

        let outcome =
            ScenarioSimulator::new(self.config.simulation.clone()).simulate(baseline, &levers)?;

        Ok(SimulationView {
            product_id: product.product_id.clone(),
            product_name: product.name.clone(),
            baseline_year,
            levers,
            outcome,
        })
    }
}
