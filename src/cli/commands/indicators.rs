//! Indicators command implementation.

use anyhow::{Context, Result};
use coinwatch_config::AppConfig;
use coinwatch_core::traits::PriceSource;
use coinwatch_indicators::{IndicatorSnapshot, WindowSummary};

use super::{engine, price_source};
use crate::cli::{IndicatorsArgs, OutputFormat};

pub async fn run(args: IndicatorsArgs, config: AppConfig) -> Result<()> {
    let source = price_source(&config, args.data.as_deref())?;
    let matrix = source.load().context("Failed to load prices")?;
    let snapshot = engine(&config).snapshot(matrix, config.report.clock.now());

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => print_text(&snapshot),
    }

    Ok(())
}

fn print_text(snapshot: &IndicatorSnapshot) {
    println!(
        "Indicators at {} ({} samples, RSI {}, rolling mean {})",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S"),
        snapshot.prices.len(),
        snapshot.config.rsi_period,
        snapshot.config.rolling_window
    );
    println!();
    println!(
        "{:<14}{:>14}{:>14}{:>16}{:>10}",
        "Asset", "Last price", "Volatility", "Max drawdown", "RSI"
    );
    for a in &snapshot.assets {
        println!(
            "{:<14}{:>14}{:>14}{:>16}{:>10}",
            a.asset,
            a.last_price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "n/a".into()),
            pct(a.volatility_pct),
            pct(a.max_drawdown_pct),
            if a.latest_rsi.is_finite() {
                format!("{:.1}", a.latest_rsi)
            } else {
                "n/a".into()
            }
        );
    }

    print_window(&snapshot.today);
    print_window(&snapshot.yesterday);
}

fn print_window(window: &WindowSummary) {
    println!();
    println!("{} ({})", window.label, window.start.date());
    if window.is_empty() {
        println!("  not yet available");
        return;
    }
    for a in &window.assets {
        println!(
            "  {:<12} {}: {:>12}  evolution: {}",
            a.asset,
            window.status.end_price_label(),
            a.end_price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "n/a".into()),
            a.evolution_pct.map(pct).unwrap_or_else(|| "n/a".into())
        );
    }
}

fn pct(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        "n/a".into()
    }
}
