use std::env;
use std::sync::Arc;
use std::time::Duration;

use kink_hunter_console::chart;
use kink_hunter_console::config::Config;
use kink_hunter_console::control::BotControlCoordinator;
use kink_hunter_console::domain::{Preset, StrategyType};
use kink_hunter_console::feed::{DISPLAY_LIMIT, OpportunityFeed};
use kink_hunter_console::format::{format_currency, format_signed_currency};
use kink_hunter_console::gateway::{Gateway, HttpGateway};
use kink_hunter_console::poller::{StatusPoller, StatusSnapshot};
use kink_hunter_console::report;
use kink_hunter_console::settings::{SettingsError, SettingsSession};
use tokio::time::MissedTickBehavior;
use tracing::{Level, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Activity lines shown per report.
const ACTIVITY_ROWS: usize = 10;

const SETTING_FLAGS: [&str; 4] = ["--set-risk=", "--set-capital=", "--enable=", "--disable="];

fn parse_config_path() -> String {
    flag_value("--config=").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

fn flag_value(prefix: &str) -> Option<String> {
    flag_values(prefix).into_iter().next()
}

fn flag_values(prefix: &str) -> Vec<String> {
    env::args()
        .skip(1)
        .filter_map(|arg| arg.strip_prefix(prefix).map(str::to_string))
        .collect()
}

fn has_flag(name: &str) -> bool {
    env::args().skip(1).any(|arg| arg == name)
}

fn init_tracing(log_level: Option<&str>) {
    let level = match log_level {
        Some("debug") => Level::DEBUG,
        Some("info") => Level::INFO,
        Some("warn") | Some("warning") => Level::WARN,
        Some("error") => Level::ERROR,
        Some("trace") => Level::TRACE,
        _ => Level::INFO,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config_path = parse_config_path();
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return;
        }
    };

    init_tracing(config.app.log_level.as_deref());

    let gateway = match HttpGateway::new(&config.api) {
        Ok(g) => Arc::new(g),
        Err(e) => {
            error!(error = %e, "Failed to create gateway");
            return;
        }
    };

    info!(
        app = %config.app.name,
        env = %config.app.env,
        api = %gateway.base_url(),
        config = %config_path,
        "Console initialized"
    );

    match gateway.health().await {
        Ok(status) => info!(status = %status, "Service reachable"),
        Err(e) => warn!(error = %e, kind = %e.kind(), "Health check failed"),
    }

    if has_flag("--toggle") || has_flag("--stop") || flag_value("--start=").is_some() {
        run_control(&config, gateway).await;
    } else if has_flag("--settings")
        || flag_value("--apply-preset=").is_some()
        || SETTING_FLAGS.iter().any(|flag| flag_value(flag).is_some())
    {
        run_settings(gateway).await;
    } else if has_flag("--positions") {
        run_positions(&gateway).await;
    } else if let Some(strategy) = flag_value("--scan=") {
        run_scan(&config, &gateway, &strategy).await;
    } else {
        run_watch(&config, gateway).await;
    }
}

fn display_limit(config: &Config) -> usize {
    config.opportunities.display_limit.min(DISPLAY_LIMIT)
}

/// Waits until the poller has applied more than `applied_before` rounds.
async fn wait_for_poll(poller: &StatusPoller, applied_before: u64, timeout: Duration) -> StatusSnapshot {
    // No deadline when the budget is beyond what the clock can represent.
    let deadline = tokio::time::Instant::now().checked_add(timeout);
    loop {
        let expired = deadline.is_some_and(|d| tokio::time::Instant::now() >= d);
        if poller.stats().await.polls_applied > applied_before || expired {
            return poller.snapshot().await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Watch mode: report on every poll interval until Ctrl+C.
async fn run_watch(config: &Config, gateway: Arc<HttpGateway>) {
    let poller = StatusPoller::from_config(gateway.clone(), &config.poller);
    if let Err(e) = poller.start(config.poller.interval).await {
        error!(error = %e, "Failed to start poller");
        return;
    }

    let feed = OpportunityFeed::new(gateway);
    feed.fetch(config.opportunities.strategy, &config.opportunities.query())
        .await;

    wait_for_poll(&poller, 0, config.api.round_trip_budget()).await;

    let mut ticker = tokio::time::interval(config.poller.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Watching bot (press Ctrl+C to stop)...");

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                let snapshot = poller.snapshot().await;
                print_watch_report(config, &snapshot, &feed).await;
            }
        }
    }

    poller.stop().await;

    let stats = poller.stats().await;
    info!(
        polls = stats.polls_applied,
        skipped_ticks = stats.ticks_skipped,
        status_failures = stats.status_failures,
        activity_failures = stats.activity_failures,
        "Console stopped"
    );
}

async fn print_watch_report(config: &Config, snapshot: &StatusSnapshot, feed: &OpportunityFeed) {
    println!("{}", report::render_status(snapshot, ACTIVITY_ROWS));

    if let Some(status) = &snapshot.status {
        let series = chart::generate_default(status.portfolio.total_value);
        println!("{}\n", report::render_series(&series));
    }

    if let Some(strategy) = feed.strategy().await {
        let shown = feed.top(display_limit(config)).await;
        println!("{}", report::render_opportunities(strategy, &shown));
    }
    if let Some(e) = feed.error().await {
        println!("! opportunities unavailable: {}\n", e);
    }
}

/// Control mode: one start/stop/toggle command, then the refreshed status.
async fn run_control(config: &Config, gateway: Arc<HttpGateway>) {
    let poller = Arc::new(StatusPoller::from_config(gateway.clone(), &config.poller));
    if let Err(e) = poller.start(config.poller.interval).await {
        error!(error = %e, "Failed to start poller");
        return;
    }

    let timeout = config.api.round_trip_budget();
    let before = wait_for_poll(&poller, 0, timeout).await;
    let applied = poller.stats().await.polls_applied;

    let coordinator = BotControlCoordinator::new(gateway, poller.clone());

    let result = if has_flag("--stop") {
        coordinator.stop().await
    } else if let Some(preset) = flag_value("--start=") {
        if Preset::find(&preset).is_none() {
            warn!(preset = %preset, "Unknown preset, forwarding anyway");
        }
        coordinator.start(&preset).await
    } else {
        match before.bot_status() {
            Some(current) => coordinator.toggle(current, &config.control.preset).await,
            None => {
                error!("Bot status unknown, not toggling");
                poller.stop().await;
                return;
            }
        }
    };

    match result {
        Ok(reply) => println!("{}", report::render_command(&reply)),
        Err(e) => error!(error = %e, kind = %e.kind(), "Command failed"),
    }

    let after = wait_for_poll(&poller, applied, timeout).await;
    println!("{}", report::render_status(&after, ACTIVITY_ROWS));

    poller.stop().await;
}

fn apply_setting_flags(session: &mut SettingsSession) -> Result<(), SettingsError> {
    if let Some(risk) = flag_value("--set-risk=") {
        let value: f64 = risk.trim().parse().map_err(|_| {
            SettingsError::Validation(format!("risk appetite is not a number: {:?}", risk))
        })?;
        session.set_risk_appetite(value)?;
    }

    if let Some(capital) = flag_value("--set-capital=") {
        session.set_max_capital_text(&capital)?;
    }

    for (prefix, enabled) in [("--enable=", true), ("--disable=", false)] {
        for name in flag_values(prefix) {
            let strategy: StrategyType = name.parse().map_err(SettingsError::Validation)?;
            session.set_strategy_enabled(strategy, enabled)?;
        }
    }

    Ok(())
}

/// Settings mode: optionally apply a preset, edit the draft, save if changed.
async fn run_settings(gateway: Arc<HttpGateway>) {
    if let Some(preset) = flag_value("--apply-preset=") {
        match gateway.apply_preset(&preset).await {
            Ok(_) => info!(preset = %preset, "Preset applied"),
            Err(e) => {
                error!(preset = %preset, error = %e, "Failed to apply preset");
                return;
            }
        }
    }

    let mut session = SettingsSession::new(gateway);
    if let Err(e) = session.load().await {
        error!(error = %e, "Failed to load settings");
        return;
    }

    if let Err(e) = apply_setting_flags(&mut session) {
        error!(error = %e, "Invalid setting");
        return;
    }

    if !session.is_dirty() {
        if let Some(settings) = session.draft() {
            println!("{}", report::render_settings(settings));
        }
        return;
    }

    match session.save().await {
        Ok(saved) => println!("{}", report::render_settings(saved)),
        Err(e) => {
            error!(error = %e, "Failed to save settings");
            if let Some(draft) = session.draft() {
                println!("Unsaved draft:\n{}", report::render_settings(draft));
            }
        }
    }
}

/// Positions mode: portfolio summary and open positions.
async fn run_positions(gateway: &HttpGateway) {
    if has_flag("--update-prices") {
        match gateway.update_prices().await {
            Ok(result) => info!(result = %result, "Prices updated"),
            Err(e) => warn!(error = %e, "Failed to update prices"),
        }
    }

    for token_id in flag_values("--close=") {
        match gateway.close_position(&token_id).await {
            Ok(result) => info!(token_id = %token_id, result = %result, "Position closed"),
            Err(e) => error!(token_id = %token_id, error = %e, "Failed to close position"),
        }
    }

    match gateway.portfolio().await {
        Ok(p) => println!(
            "Portfolio: {} | P&L {} | {} open, {} trades",
            format_currency(p.total_value),
            format_signed_currency(p.total_pnl),
            p.num_open_positions,
            p.total_trades
        ),
        Err(e) => error!(error = %e, "Failed to fetch portfolio"),
    }

    match gateway.positions().await {
        Ok(positions) => println!("{}", report::render_positions(&positions)),
        Err(e) => error!(error = %e, "Failed to fetch positions"),
    }
}

/// Scan mode: one opportunity fetch for a strategy, or for all of them.
async fn run_scan(config: &Config, gateway: &Arc<HttpGateway>, name: &str) {
    let limit = display_limit(config);

    if name == "all" {
        match gateway.scan_all(Some(config.opportunities.limit)).await {
            Ok(by_strategy) => {
                for strategy in StrategyType::ALL {
                    if let Some(list) = by_strategy.get(strategy.as_str()) {
                        let shown = &list[..list.len().min(limit)];
                        println!("{}", report::render_opportunities(strategy, shown));
                    }
                }
            }
            Err(e) => error!(error = %e, "Failed to scan strategies"),
        }
        return;
    }

    let strategy: StrategyType = match name.parse() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Invalid strategy");
            return;
        }
    };

    let feed = OpportunityFeed::new(gateway.clone());
    feed.fetch(strategy, &config.opportunities.query()).await;

    match feed.error().await {
        Some(e) => error!(strategy = %strategy, error = %e, "Failed to fetch opportunities"),
        None => {
            let shown = feed.top(limit).await;
            println!("{}", report::render_opportunities(strategy, &shown));
        }
    }
}
