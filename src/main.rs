//! Risk control and trade analytics engine.
//!
//! Derives stop/target prices, position sizes, and validation warnings from
//! a trader's risk settings, and aggregates closed-trade history into
//! performance statistics.

mod analytics;
mod history;
mod models;
mod risk;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::history::TradeHistory;
use crate::models::{PresetKind, RiskHistoryEntry, RiskSettings};
use crate::risk::ProfileStore;

/// Risk engine CLI.
#[derive(Parser)]
#[command(name = "tradeguard")]
#[command(about = "Position sizing, stop/target derivation, and trade analytics", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the risk calculation for a price/portfolio snapshot
    Calculate {
        /// Current price of the instrument
        #[arg(short, long)]
        price: f64,

        /// Total portfolio value
        #[arg(long)]
        portfolio: f64,

        /// Risk settings JSON file (defaults when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Built-in preset to apply before calculating
        /// (conservative, moderate, aggressive)
        #[arg(long)]
        profile: Option<String>,
    },

    /// List the built-in risk profiles
    Profiles,

    /// Append a closed trade to a history file
    Record {
        /// History JSON file (created when missing)
        #[arg(long)]
        history: PathBuf,

        /// Formula the trade was taken under
        #[arg(short, long)]
        formula: String,

        /// Entry price
        #[arg(long)]
        entry: f64,

        /// Exit price
        #[arg(long)]
        exit: f64,

        /// Position size in shares
        #[arg(long)]
        size: f64,

        /// Amount that was at risk at entry
        #[arg(long)]
        risk: f64,

        /// Risk/reward ratio at entry
        #[arg(long, default_value = "0")]
        ratio: f64,

        /// Portfolio risk percent at entry
        #[arg(long, default_value = "0")]
        portfolio_risk: f64,

        /// The stop loss closed this trade
        #[arg(long)]
        stop_hit: bool,

        /// The take profit closed this trade
        #[arg(long)]
        target_hit: bool,
    },

    /// Aggregate a history file into performance statistics
    Analytics {
        /// History JSON file
        #[arg(long)]
        history: PathBuf,

        /// Restrict to trades recorded under one formula
        #[arg(short, long)]
        formula: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Calculate {
            price,
            portfolio,
            settings,
            profile,
        } => {
            let mut risk_settings = load_settings(settings.as_deref())?;

            if let Some(key) = profile {
                let preset = PresetKind::from_key(&key).with_context(|| {
                    format!("unknown profile '{key}' (conservative, moderate, aggressive)")
                })?;
                let mut store = ProfileStore::new(risk_settings);
                store.apply_preset(preset);
                risk_settings = store.settings().clone();
                info!(profile = preset.key(), "Applied risk profile");
            }

            let current_price = Decimal::try_from(price)?;
            let portfolio_value = Decimal::try_from(portfolio)?;

            let calculation = risk::calculate(&risk_settings, current_price, portfolio_value);

            println!("\n=== Risk Calculation ===");
            println!("Sizing Method:    {}", risk_settings.position_sizing.method.as_str());
            println!("Entry Price:      ${:.2}", calculation.entry_price);
            println!("Stop Loss:        ${:.2}", calculation.stop_loss_price);
            println!("Take Profit:      ${:.2}", calculation.take_profit_price);
            println!("Position Size:    {} shares", calculation.position_size);
            println!("Risk Amount:      ${:.2}", calculation.risk_amount);
            println!("Reward Amount:    ${:.2}", calculation.reward_amount);
            println!("Risk/Reward:      {:.2}", calculation.risk_reward_ratio);
            println!("Portfolio Risk:   {:.2}%", calculation.portfolio_risk_percent);
            println!(
                "Valid:            {}",
                if calculation.is_valid { "Yes" } else { "No" }
            );

            if !calculation.warnings.is_empty() {
                println!("\n--- Warnings ---");
                for warning in &calculation.warnings {
                    println!("  ! {warning}");
                }
            }

            let suggestions = risk::recommendations(&calculation, &risk_settings);
            if !suggestions.is_empty() {
                println!("\n--- Recommendations ---");
                for suggestion in &suggestions {
                    println!("  > {suggestion}");
                }
            }
        }

        Commands::Profiles => {
            println!(
                "\n{:<14} {:>10} {:>11} {:>8} {:>10}",
                "PROFILE", "MAX RISK%", "MAX LOSS%", "TRADES", "TOLERANCE"
            );
            println!("{}", "-".repeat(57));

            for preset in PresetKind::ALL {
                let p = preset.profile();
                println!(
                    "{:<14} {:>10} {:>11} {:>8} {:>10}",
                    p.name,
                    format!("{}%", p.max_portfolio_risk),
                    format!("{}%", p.max_daily_loss),
                    p.max_concurrent_trades,
                    format!("{:?}", p.risk_tolerance).to_lowercase(),
                );
            }
        }

        Commands::Record {
            history,
            formula,
            entry,
            exit,
            size,
            risk,
            ratio,
            portfolio_risk,
            stop_hit,
            target_hit,
        } => {
            let mut entries = load_history(&history)?;

            let record = RiskHistoryEntry::closed(
                formula,
                Decimal::try_from(entry)?,
                Decimal::try_from(exit)?,
                Decimal::try_from(size)?,
                Decimal::try_from(risk)?,
                Decimal::try_from(ratio)?,
                Decimal::try_from(portfolio_risk)?,
                stop_hit,
                target_hit,
            );

            info!(
                id = %record.id,
                formula = %record.formula_id,
                pnl = %record.pnl(),
                "Recording closed trade"
            );
            entries.push(record);

            let json = serde_json::to_string_pretty(&entries)?;
            fs::write(&history, json)
                .with_context(|| format!("failed to write {}", history.display()))?;

            println!("Recorded trade #{} to {}", entries.len(), history.display());
        }

        Commands::Analytics { history, formula } => {
            let log = TradeHistory::from_entries(load_history(&history)?);

            let analytics = match &formula {
                Some(id) => log.analytics_for_formula(id),
                None => log.analytics(),
            };

            println!("\n=== Trade Analytics ===");
            if let Some(id) = &formula {
                println!("Formula:          {id}");
            }
            println!("Total Trades:     {}", analytics.total_trades);
            println!("Winning Trades:   {}", analytics.winning_trades);
            println!("Losing Trades:    {}", analytics.losing_trades);
            println!("Win Rate:         {:.1}%", analytics.win_rate);

            println!("\n--- Averages ---");
            println!("Avg Risk:         ${:.2}", analytics.average_risk);
            println!("Avg Reward:       ${:.2}", analytics.average_reward);
            println!("Avg Risk/Reward:  {:.2}", analytics.average_risk_reward_ratio);

            println!("\n--- Outcome ---");
            println!("Total P&L:        ${:.2}", analytics.total_pnl);
            println!("Max Drawdown:     ${:.2}", analytics.max_drawdown);
            println!("Sharpe Ratio:     {:.2}", analytics.sharpe_ratio);
        }
    }

    Ok(())
}

/// Load risk settings from a JSON file, or the defaults when no file is given.
fn load_settings(path: Option<&Path>) -> Result<RiskSettings> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid risk settings in {}", path.display()))
        }
        None => Ok(RiskSettings::default()),
    }
}

/// Load a history file; a missing file is an empty history.
fn load_history(path: &Path) -> Result<Vec<RiskHistoryEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid history in {}", path.display()))
}
