// ==========================================
// 纺织生产经营看板 - 命令行主入口
// ==========================================
// 系统定位: 只读分析看板 + 情景模拟
// 用法: textile-dashboard [--data <路径>] <分区子命令>
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use textile_dashboard::api::{LeverInput, SimulationRequest, ViewSelection};
use textile_dashboard::app::{render_products, render_view, AppState, OutputFormat, StartupOptions};
use textile_dashboard::engine::ScenarioLevers;

/// 纺织生产经营看板：成本、需求、产能分析与情景模拟
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 数据工作簿（.xlsx/.xlsm/.xls/.ods）或 CSV 目录
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// 配置文件（JSON）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 界面语言
    #[arg(long, global = true, value_parser = ["es", "en"])]
    locale: Option<String>,

    /// 输出格式
    #[arg(long, global = true, value_enum, default_value_t = FormatArg::Table)]
    format: FormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// 总体概览
    Overview,
    /// 产品分析（物料清单与工序工时）
    Product {
        #[arg(long)]
        product: String,
    },
    /// 成本与盈利
    Costs {
        #[arg(long)]
        year: i32,
    },
    /// 需求与季节性
    Demand {
        #[arg(long)]
        product: String,
    },
    /// 工序产能
    Processes {
        #[arg(long)]
        year: i32,
    },
    /// 情景模拟（基准取最近数据年度）
    Simulate(SimulateArgs),
    /// 可选产品列表
    Products,
}

#[derive(Parser)]
struct SimulateArgs {
    #[arg(long)]
    product: String,

    /// 物料成本降低 (%)
    #[arg(long)]
    supply_reduction: Option<f64>,

    /// 工序效率提升 (%)
    #[arg(long)]
    process_efficiency: Option<f64>,

    /// 售价提升 (%)
    #[arg(long)]
    price_increase: Option<f64>,

    /// 生产量（件）
    #[arg(long)]
    volume: Option<f64>,

    /// 越界杠杆截断到边界（默认拒绝）
    #[arg(long)]
    clamp: bool,
}

fn main() -> anyhow::Result<()> {
    textile_dashboard::logging::init();

    let cli = Cli::parse();
    tracing::info!(version = textile_dashboard::VERSION, "{}", textile_dashboard::APP_NAME);

    let options = StartupOptions {
        data_path: cli.data.clone(),
        config_path: cli.config.clone(),
        locale: cli.locale.clone(),
    };
    let state = AppState::initialize(&options).context("看板初始化失败")?;
    let api = &state.dashboard_api;
    let format = OutputFormat::from(cli.format);

    let selection = match cli.command {
        Commands::Products => {
            println!("{}", render_products(&api.product_options(), format)?);
            return Ok(());
        }
        Commands::Overview => ViewSelection::Overview,
        Commands::Product { product } => ViewSelection::ProductDetail {
            product_name: product,
        },
        Commands::Costs { year } => ViewSelection::Profitability { year },
        Commands::Demand { product } => ViewSelection::Demand {
            product_name: product,
        },
        Commands::Processes { year } => ViewSelection::Processes { year },
        Commands::Simulate(args) => {
            let defaults =
                LeverInput::from(ScenarioLevers::defaults_from(&api.config().simulation));
            ViewSelection::Simulator(SimulationRequest {
                product_name: args.product,
                levers: LeverInput {
                    supply_cost_reduction_pct: args
                        .supply_reduction
                        .unwrap_or(defaults.supply_cost_reduction_pct),
                    process_efficiency_gain_pct: args
                        .process_efficiency
                        .unwrap_or(defaults.process_efficiency_gain_pct),
                    price_increase_pct: args.price_increase.unwrap_or(defaults.price_increase_pct),
                    production_volume: args.volume.unwrap_or(defaults.production_volume),
                },
                clamp: args.clamp,
            })
        }
    };

    let view = api.view(&selection)?;
    println!("{}", render_view(&view, format)?);
    Ok(())
}
