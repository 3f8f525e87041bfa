use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use plate_training::config::CONFIG;
use plate_training::logplot::{extract_curves, render_curves, PlotError};

/// 从训练日志提取 loss/accuracy 曲线并画图
#[derive(Parser)]
#[command(name = "plot_log")]
#[command(about = "Extract loss/accuracy curves from an LPRNet training log and plot them")]
struct Cli {
    /// 训练日志路径，默认取 config.yaml 里的 log_file
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// 输出图片路径
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// 平滑系数 (0~1)
    #[arg(short, long)]
    smooth: Option<f64>,

    /// 把解析出来的曲线另存成 JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// 输出 debug 日志
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let log_path = cli
        .log
        .unwrap_or_else(|| PathBuf::from(&CONFIG.plot.log_file));
    let out_path = cli
        .out
        .unwrap_or_else(|| PathBuf::from(&CONFIG.plot.output_file));
    let weight = cli.smooth.unwrap_or(CONFIG.plot.smooth_factor);

    let curves = match extract_curves(&log_path) {
        Ok(curves) => curves,
        Err(e @ PlotError::NoLossData { .. }) => {
            // 多半是日志格式对不上
            warn!("{e}, expected lines like \"Loss: 0.1234\"");
            return Err(e.into());
        }
        Err(e) => return Err(e).context("failed to extract curves"),
    };
    info!(
        loss_points = curves.losses.len(),
        accuracy_points = curves.accuracies.len(),
        "log parsed"
    );

    if let Some(json_path) = &cli.json {
        let file = File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        serde_json::to_writer(file, &curves)?;
        info!("curves dumped to {}", json_path.display());
    }

    render_curves(&curves, &out_path, weight)?;
    info!("chart saved to {}", out_path.display());
    Ok(())
}
