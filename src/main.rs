// ==========================================
// 跨店调货建议系统 - 命令行入口
// ==========================================
// 子命令:
//   plan    导入库存表 → 计算调货建议 → 导出明细与汇总
//   inspect 仅导入并输出数据质量报告
// 退出码: 导入/校验失败时非零；质量违规仅在 --strict 下失败
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stock_transfer::config::{AllocationConfig, ConfigManager};
use stock_transfer::domain::{ImportOutcome, TransferMode};
use stock_transfer::engine::TransferPlanner;
use stock_transfer::export::{write_recommendations_csv, write_summary};
use stock_transfer::i18n::{self, t_with_args};
use stock_transfer::importer::{InventoryImporter, InventoryImporterImpl};
use stock_transfer::logging::{self, LogFormat};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "stock-transfer",
    about = "跨店调货建议系统: 根据库存表生成跨店调货建议",
    version
)]
struct Cli {
    /// 输出语言 (zh-CN / en)
    #[arg(long, global = true, default_value = "zh-CN")]
    locale: String,

    /// 日志格式
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Text)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 计算调货建议
    Plan(PlanArgs),
    /// 导入库存表并输出数据质量报告
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// 库存表 (.xlsx / .xls / .csv)
    #[arg(long, short)]
    input: PathBuf,

    /// 调货模式 A / B / C
    #[arg(long, short)]
    mode: TransferMode,

    /// 建议明细输出 CSV（缺省: 输入文件同目录）
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// 统计汇总输出（.json / .csv）
    #[arg(long)]
    summary: Option<PathBuf>,

    /// 配置文件 (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 质量检查未通过时以非零退出
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// 库存表 (.xlsx / .xls / .csv)
    #[arg(long, short)]
    input: PathBuf,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogFormatArg {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Text => LogFormat::Text,
        LogFormatArg::Json => LogFormat::Json,
    };
    logging::init_with(format, "info");

    if !i18n::set_locale(&cli.locale) {
        warn!(locale = %cli.locale, "不支持的语言,使用默认语言");
    }

    info!(version = stock_transfer::VERSION, "{}", stock_transfer::APP_NAME);

    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let config = load_allocation_config(args.config.as_deref())?;

    let outcome = import(&args.input)?;
    print_dq_report(&outcome);
    if outcome.ensure_clean().is_err() {
        bail!(tr(
            "import.rejected",
            &[("blocked", outcome.report.summary.blocked.to_string())]
        ));
    }

    println!(
        "{}",
        tr(
            "cli.plan_started",
            &[
                ("mode", args.mode.to_string()),
                ("title", args.mode.title().to_string()),
                ("records", outcome.records.len().to_string()),
            ]
        )
    );

    let planner = TransferPlanner::new(config)?;
    let plan = planner
        .plan(&outcome.records, args.mode)
        .context("调货计算失败")?;

    println!(
        "{}",
        tr(
            "cli.plan_completed",
            &[
                ("count", plan.statistics.total_recommendations.to_string()),
                ("qty", plan.statistics.total_transfer_quantity.to_string()),
            ]
        )
    );

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, args.mode));
    write_recommendations_csv(&output, &plan.recommendations)
        .with_context(|| format!("写入建议明细失败: {}", output.display()))?;
    println!(
        "{}",
        tr("cli.output_written", &[("path", output.display().to_string())])
    );

    if let Some(summary) = &args.summary {
        write_summary(summary, &plan)
            .with_context(|| format!("写入统计汇总失败: {}", summary.display()))?;
        println!(
            "{}",
            tr("cli.summary_written", &[("path", summary.display().to_string())])
        );
    }

    if plan.quality.passed {
        println!("{}", i18n::t("quality.passed"));
    } else {
        println!(
            "{}",
            tr(
                "quality.failed",
                &[("count", plan.quality.violations.len().to_string())]
            )
        );
        for violation in &plan.quality.violations {
            println!("  [{}] {}", violation.rule, violation.message);
        }
        if args.strict {
            bail!(i18n::t("cli.strict_failed"));
        }
    }

    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let outcome = import(&args.input)?;
    print_dq_report(&outcome);

    let stats = &outcome.stats;
    println!(
        "articles={} sites={} nd_sites={} rf_sites={} total_stock={} total_safety_stock={}",
        stats.unique_articles,
        stats.unique_sites,
        stats.nd_sites,
        stats.rf_sites,
        stats.total_stock,
        stats.total_safety_stock
    );
    Ok(())
}

fn load_allocation_config(path: Option<&Path>) -> Result<AllocationConfig> {
    let manager = match path {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?,
        None => ConfigManager::load_default().context("读取默认配置失败")?,
    };
    if let Some(source) = manager.source() {
        info!(path = %source.display(), "已加载配置文件");
    }
    Ok(AllocationConfig::from_reader(&manager)?)
}

fn import(input: &Path) -> Result<ImportOutcome> {
    println!(
        "{}",
        tr("import.started", &[("path", input.display().to_string())])
    );
    let importer = InventoryImporterImpl::standard();
    let outcome = importer
        .import_file(input)
        .with_context(|| format!("导入失败: {}", input.display()))?;
    Ok(outcome)
}

fn print_dq_report(outcome: &ImportOutcome) {
    let summary = &outcome.report.summary;
    println!(
        "{}",
        tr(
            "import.completed",
            &[
                ("total", summary.total_rows.to_string()),
                ("success", summary.success.to_string()),
                ("blocked", summary.blocked.to_string()),
                ("warning", summary.warning.to_string()),
            ]
        )
    );

    for violation in &outcome.report.violations {
        println!(
            "  {}",
            tr(
                "import.violation",
                &[
                    ("row", violation.row_number.to_string()),
                    ("level", format!("{:?}", violation.level)),
                    ("field", violation.field.clone()),
                    ("message", violation.message.clone()),
                ]
            )
        );
    }
}

/// 带参数翻译（参数值为已格式化字符串）
fn tr(key: &str, args: &[(&str, String)]) -> String {
    let pairs: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
    t_with_args(key, &pairs)
}

/// 缺省输出: <输入目录>/transfer_recommendations_<模式>_<时间戳>.csv
fn default_output_path(input: &Path, mode: TransferMode) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let name = format!("transfer_recommendations_{}_{}.csv", mode, stamp);
    input
        .parent()
        .map(|dir| dir.join(&name))
        .unwrap_or_else(|| PathBuf::from(name))
}
