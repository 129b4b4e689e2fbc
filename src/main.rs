// ==========================================
// 门店库存调拨 - 命令行入口
// ==========================================

mod cli;

use anyhow::{Context, Result};
use branch_rebalance::config::ConfigManager;
use branch_rebalance::{logging, RebalanceApi, RebalanceReport};
use clap::Parser;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // 初始化日志系统
    if args.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = branch_rebalance::VERSION, "{}", branch_rebalance::APP_NAME);

    // 加载配置: 默认值 < 配置文件 < 环境变量 < 命令行
    let mut config = ConfigManager::load(args.config.as_deref())
        .context("failed to load configuration")?;
    config
        .apply_overrides(
            args.display_target,
            args.backstock_safety,
            args.min_transfer_qty,
            args.out_dir.clone(),
        )
        .context("invalid parameters")?;

    let api = RebalanceApi::default();
    let report = api
        .rebalance_files(args.files.clone(), config.params())
        .await
        .context("failed to compute transfer suggestions")?;

    print_summary(&report, args.show);

    if !args.no_export {
        let written = api
            .export(&report, config.output_dir())
            .context("failed to export report")?;
        for path in written {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(report: &RebalanceReport, show: usize) {
    let s = &report.summary;
    println!(
        "params: display_target={} backstock_safety={} min_transfer_qty={}",
        s.params.display_target, s.params.backstock_safety, s.params.min_transfer_qty
    );
    println!(
        "records={} (defaulted qty={}, clamped qty={}) rows={} keys={}",
        s.input_records, s.defaulted_quantities, s.clamped_quantities, s.aggregated_rows, s.distinct_keys
    );
    println!(
        "transfers={} units_moved={} unmet_need={} unused_surplus={}",
        s.transfers, s.units_moved, s.unmet_need, s.unused_surplus
    );
    for (flag, count) in &s.flag_counts {
        println!("  {:<12} {}", flag, count);
    }

    if report.transfers.is_empty() {
        println!("No transfers suggested for uploaded data and parameters");
        return;
    }
    for t in report.transfers.iter().take(show) {
        println!("  [{}] {} -> {} x{}", t.key, t.from, t.to, t.qty);
    }
    if report.transfers.len() > show {
        println!("  ... {} more", report.transfers.len() - show);
    }
}
