//! Entry point for the valentine proposal card.

use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use valentine_card::components::App;
use valentine_card::config::{CardConfig, DEFAULT_RECIPIENT};
use valentine_card::theme::Theme;
use valentine_core::{AfterApology, Proposal, SequenceTick, TokioScheduler, AFTER_APOLOGY_POLICY};

/// CSS styles embedded at compile time.
const STYLES_CSS: &str = include_str!("../assets/styles.css");

/// Global storage for the launch configuration.
static CONFIG: OnceLock<CardConfig> = OnceLock::new();

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "valentine-card")]
#[command(about = "Asks someone to be your valentine")]
struct Args {
    /// Name shown in the headline
    #[arg(short, long, default_value = DEFAULT_RECIPIENT)]
    recipient: String,

    /// What the orange button does after its last line: hide or reset
    #[arg(long, default_value_t = AFTER_APOLOGY_POLICY)]
    after_apology: AfterApology,

    /// Color theme
    #[arg(long, value_enum, default_value_t = Theme::Blush)]
    theme: Theme,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!(
        "Starting valentine card for {} ({} theme, after-apology: {})",
        args.recipient,
        args.theme.display_name(),
        args.after_apology
    );

    CONFIG
        .set(CardConfig {
            recipient: args.recipient,
            after_apology: args.after_apology,
            theme: args.theme,
        })
        .ok();

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title("Will you be my valentine?")
                        .with_inner_size(LogicalSize::new(960, 760)),
                )
                .with_custom_head(format!(
                    r#"
                    <link rel="preconnect" href="https://fonts.googleapis.com">
                    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
                    <link href="https://fonts.googleapis.com/css2?family=Pacifico&family=Quicksand:wght@400;600;700&display=swap" rel="stylesheet">
                    <style>{}</style>
                    "#,
                    STYLES_CSS
                )),
        )
        .launch(RootApp);
}

/// Root component owning the card state and its timer scheduler.
#[component]
fn RootApp() -> Element {
    let config = CONFIG.get().cloned().unwrap_or_default();

    let proposal = use_signal({
        let proposal_config = config.proposal_config();
        move || Proposal::new(proposal_config)
    });

    // Countdown ticks come back here and are applied on the UI thread
    let ticks = use_coroutine(move |mut rx: UnboundedReceiver<SequenceTick>| {
        let mut proposal = proposal;
        async move {
            while let Some(tick) = rx.next().await {
                proposal.write().on_tick(tick);
            }
        }
    });

    let scheduler = use_signal(move || TokioScheduler::new(ticks.tx()));

    // Stop any running countdown on unmount
    use_drop(move || {
        tracing::info!("Closing valentine card");
        let mut proposal = proposal;
        let mut scheduler = scheduler;
        if let (Ok(mut p), Ok(mut s)) = (proposal.try_write(), scheduler.try_write()) {
            p.dispose(&mut *s);
        }
    });

    rsx! {
        App {
            proposal,
            scheduler,
            recipient: config.recipient,
            theme: config.theme,
        }
    }
}
