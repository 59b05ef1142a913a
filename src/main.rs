use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::{error, info};
use std::path::Path;

use mailsweep::classifier::RuleSet;
use mailsweep::config::{self, Config};
use mailsweep::imap_client::ImapClient;
use mailsweep::session::{
    CleanupSession, Interrupt, SessionOptions, SessionReport, SessionState, TerminalConfirmation,
};

#[derive(Parser)]
#[command(name = "mailsweep")]
#[command(about = "Deletes old unread newsletters, promotions and notifications from an IMAP mailbox")]
#[command(version = "0.1.0")]
struct Args {
    /// Preview mode: classify and report without deleting anything
    #[arg(short, long)]
    dry_run: bool,

    /// Only unread messages received before this date (YYYY-MM-DD)
    #[arg(long, value_parser = config::parse_cutoff_date)]
    cutoff: Option<NaiveDate>,

    /// Number of messages fetched per batch
    #[arg(long, value_parser = config::parse_batch_size)]
    batch_size: Option<usize>,

    /// JSON rules file replacing the built-in rules
    #[arg(long)]
    rules: Option<String>,

    /// Limit the number of messages examined (default: unlimited)
    #[arg(short = 'l', long)]
    limit: Option<usize>,

    /// Also print a line for every message that is kept
    #[arg(long)]
    show_kept: bool,

    /// Check the configuration without connecting
    #[arg(long)]
    check_config: bool,

    /// Print the active rules as JSON and exit
    #[arg(long)]
    dump_rules: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    env_logger::init();

    let rules_path = args
        .rules
        .clone()
        .or_else(|| std::env::var("CLEANUP_RULES_PATH").ok().filter(|p| !p.trim().is_empty()));
    let rules = match &rules_path {
        Some(path) => RuleSet::load(Path::new(path))?,
        None => RuleSet::builtin()?,
    };

    if args.dump_rules {
        let json = serde_json::to_string_pretty(&rules.to_definition())
            .context("Unable to serialize rules")?;
        println!("{}", json);
        return Ok(());
    }

    let mut config = Config::new()?;
    if let Some(cutoff) = args.cutoff {
        config.cleanup.cutoff_date = cutoff;
    }
    if let Some(batch_size) = args.batch_size {
        config.cleanup.batch_size = batch_size;
    }
    config.cleanup.rules_path = rules_path;

    if args.check_config {
        println!("✅ Configuration valid!");
        println!("📧 IMAP: {}@{}:{} ({})", config.imap.username, config.imap.server,
                 config.imap.port, config.imap.mailbox);
        println!("🔑 Password: {}", "*".repeat(config.imap.password.len().min(8)));
        println!("📅 Cutoff: {}", config.cleanup.cutoff_date);
        println!("📦 Batch size: {}", config.cleanup.batch_size);
        println!("📜 Rules: {} ({} patterns, {} keywords)",
                 config.cleanup.rules_path.as_deref().unwrap_or("built-in"),
                 rules.pattern_count(), rules.keyword_count());
        return Ok(());
    }

    print_banner(&config, args.dry_run);

    let mailbox = ImapClient::connect(&config.imap)
        .await
        .context("Unable to open the mailbox")?;

    let interrupt = Interrupt::new();
    interrupt.listen_for_ctrl_c();

    let options = SessionOptions {
        cutoff: config.cleanup.cutoff_date,
        batch_size: config.cleanup.batch_size,
        preview: args.dry_run,
        limit: args.limit,
        show_kept: args.show_kept,
    };

    let mut session = CleanupSession::new(mailbox, TerminalConfirmation, rules, options, interrupt);

    match session.run().await {
        Ok(report) => {
            print_final_report(&report);
            Ok(())
        }
        Err(e) => {
            error!("❌ Cleanup failed: {}", e);
            Err(e.into())
        }
    }
}

fn print_banner(config: &Config, dry_run: bool) {
    println!("🧹 mailsweep - {}", config.imap.username);
    println!("{}", "=".repeat(60));
    if dry_run {
        println!("⚠️  DRY RUN MODE - will show what would be deleted without deleting");
        info!("Starting in preview mode");
    } else {
        println!("🔥 DELETION MODE - will delete after analysis and confirmation");
        info!("Starting in deletion mode");
    }
    println!("{}", "=".repeat(60));
    println!("🎯 Target: unread messages older than {}", config.cleanup.cutoff_date.format("%B %d, %Y"));
    println!("🔍 Looking for: newsletters, promotions, notifications, etc.");
}

fn print_final_report(report: &SessionReport) {
    match report.state {
        SessionState::Done if report.deleted > 0 || !report.failures.is_empty() => {
            println!("\n{}", "=".repeat(50));
            println!("✅ Successfully deleted: {}", report.deleted);
            println!("❌ Failed deletions: {}", report.failures.len());
            if let Some(e) = &report.expunge_error {
                println!("⚠️  Messages were flagged but not expunged: {}", e);
            }
            println!("{}", "=".repeat(50));
        }
        SessionState::Aborted => {
            println!("\n🛑 Operation cancelled. {} message(s) deleted.", report.deleted);
        }
        _ => {}
    }

    info!(
        "Session finished in state {:?}: {} found, {} processed, {} to delete, {} kept, {} deleted, {} failed",
        report.state,
        report.found,
        report.processed,
        report.to_delete,
        report.kept,
        report.deleted,
        report.failures.len()
    );
}
