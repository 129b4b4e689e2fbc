use clap::Parser;
use std::path::PathBuf;

/// 门店库存调拨建议
///
/// 读取一个或多个门店库存表（CSV/XLSX），计算每店缺口与富余，并给出店间调拨建议。
#[derive(Parser, Debug)]
#[command(name = "branch-rebalance", version, about = "Suggest inter-branch stock transfers")]
pub struct CliArgs {
    /// 库存表文件（.csv / .xlsx / .xls），可多个
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON 配置文件
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 每个 SKU 的陈列目标
    #[arg(long, allow_negative_numbers = true)]
    pub display_target: Option<i64>,

    /// 后仓安全库存
    #[arg(long, allow_negative_numbers = true)]
    pub backstock_safety: Option<i64>,

    /// 单笔调拨最小数量
    #[arg(long, allow_negative_numbers = true)]
    pub min_transfer_qty: Option<i64>,

    /// 报表输出目录
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// 只打印汇总，不写报表文件
    #[arg(long)]
    pub no_export: bool,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    pub log_json: bool,

    /// 终端最多列出的调拨条数
    #[arg(long, default_value = "20")]
    pub show: usize,
}
