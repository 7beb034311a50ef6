//! Metacog CLI - configure and inspect metacognition reminders
//!
//! Each invocation is one session: it wires the SQLite adapters into the
//! scheduling engine, runs one command and exits.

mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::debug;

use metacog_core::application::{
    InitOutcome, NotificationScheduler, ReconcileReport, SettingsController, SettingsStore,
};
use metacog_core::domain::{
    compute_fire_times, daily_slot_count, NotificationSettings, QuietHours,
};
use metacog_core::port::id_provider::UuidProvider;
use metacog_core::port::time_provider::SystemTimeProvider;
use metacog_core::port::NotificationHost;
use metacog_infra_sqlite::{
    create_pool, run_migrations, HostPlatform, PermissionPolicy, SqliteKeyValueStore,
    SqliteNotificationHost,
};

const DEFAULT_DB_PATH: &str = "~/.metacog/reminders.db";

#[derive(Parser)]
#[command(name = "metacog")]
#[command(about = "Metacognition reminder scheduler", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database holding settings and the trigger journal
    #[arg(long, env = "METACOG_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db_path: String,

    /// Platform to emulate (android registers a notification channel)
    #[arg(long, env = "METACOG_PLATFORM", default_value = "desktop")]
    platform: HostPlatform,

    /// Answer given to the notification permission prompt (grant|deny)
    #[arg(long, env = "METACOG_PERMISSION", default_value = "grant")]
    permission: PermissionPolicy,

    /// Log format (compact|json)
    #[arg(long, env = "METACOG_LOG_FORMAT", default_value = "compact")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Request notification permission and set up channels
    Init,

    /// Show the stored settings
    Show,

    /// Change settings and reschedule reminders
    Set {
        /// Master switch (true|false)
        #[arg(long)]
        enabled: Option<bool>,

        /// Minutes between reminders within an hour
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1440))]
        interval: Option<u32>,

        /// First quiet hour (0-23)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        quiet_start: Option<u8>,

        /// Hour the quiet window ends, exclusive (0-23)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        quiet_end: Option<u8>,
    },

    /// Print the fire times a configuration would produce, without scheduling
    Preview {
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=1440))]
        interval: Option<u32>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        quiet_start: Option<u8>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=23))]
        quiet_end: Option<u8>,
    },

    /// Reschedule reminders from the stored settings
    Sync,

    /// List registered triggers
    Triggers,

    /// Show when the next reminder fires
    Next,

    /// Restore default settings and reschedule
    Reset,
}

#[derive(Tabled)]
struct SettingsView {
    enabled: bool,
    interval_minutes: u32,
    quiet_hours: String,
    daily_reminders: usize,
}

#[derive(Tabled)]
struct TriggerView {
    time: String,
    id: String,
    title: String,
}

struct App {
    host: Arc<SqliteNotificationHost>,
    scheduler: Arc<NotificationScheduler>,
    controller: SettingsController,
}

async fn build_app(cli: &Cli) -> Result<App> {
    let db_path = shellexpand::tilde(&cli.db_path).into_owned();
    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    debug!(db_path = %db_path, "Opening database");
    let pool = create_pool(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let time_provider = Arc::new(SystemTimeProvider);
    let kv_store = Arc::new(SqliteKeyValueStore::new(pool.clone(), time_provider.clone()));
    let host = Arc::new(SqliteNotificationHost::new(
        pool,
        cli.platform,
        cli.permission,
        Arc::new(UuidProvider),
        time_provider,
    ));

    let store = Arc::new(SettingsStore::new(kv_store));
    let scheduler = Arc::new(NotificationScheduler::new(host.clone()));
    let controller = SettingsController::new(store, scheduler.clone());

    Ok(App {
        host,
        scheduler,
        controller,
    })
}

fn settings_view(settings: &NotificationSettings) -> SettingsView {
    let daily_reminders = if settings.is_notification_enabled {
        daily_slot_count(settings.interval_minutes, settings.quiet_hours)
    } else {
        0
    };
    SettingsView {
        enabled: settings.is_notification_enabled,
        interval_minutes: settings.interval_minutes,
        quiet_hours: if settings.quiet_hours.is_all_day() {
            format!("{} (all day)", settings.quiet_hours)
        } else {
            settings.quiet_hours.to_string()
        },
        daily_reminders,
    }
}

async fn initialize(app: &App) -> Result<InitOutcome> {
    let outcome = app
        .scheduler
        .initialize_once()
        .await
        .context("Notification initialization failed")?;
    if outcome == InitOutcome::PermissionDenied {
        println!(
            "{}",
            "Notification permission denied: reminders will not be delivered".yellow()
        );
    }
    Ok(outcome)
}

fn print_report(report: &ReconcileReport) {
    if !report.enabled {
        println!("{}", "✓ Reminders disabled, all triggers cancelled".green());
        return;
    }
    if report.is_complete() {
        println!(
            "{}",
            format!("✓ {} reminders scheduled", report.registered.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "⚠ {} of {} reminders scheduled",
                report.registered.len(),
                report.requested
            )
            .yellow()
            .bold()
        );
        for failure in &report.failures {
            println!("  {} {}", "✗".red(), failure);
        }
        println!("  Run `metacog sync` to retry");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_format)?;

    let app = build_app(&cli).await?;

    match cli.command {
        Commands::Init => {
            match initialize(&app).await? {
                InitOutcome::Ready { channel_created } => {
                    println!("{}", "✓ Notifications ready".green().bold());
                    if channel_created {
                        println!("  Default channel registered");
                    }
                }
                InitOutcome::PermissionDenied => {}
            }
        }

        Commands::Show => {
            let settings = app.controller.current().await?;
            println!("{}", Table::new([settings_view(&settings)]));
        }

        Commands::Set {
            enabled,
            interval,
            quiet_start,
            quiet_end,
        } => {
            initialize(&app).await?;

            let current = app.controller.current().await?;
            let quiet = QuietHours::new(
                quiet_start.unwrap_or(current.quiet_hours.start),
                quiet_end.unwrap_or(current.quiet_hours.end),
            );
            let updated = current
                .with_enabled(enabled.unwrap_or(current.is_notification_enabled))
                .with_interval(interval.unwrap_or(current.interval_minutes))
                .with_quiet_hours(quiet);

            let report = app
                .controller
                .on_settings_changed(updated)
                .await
                .context("Failed to apply settings")?;
            println!("{}", Table::new([settings_view(&updated)]));
            print_report(&report);
        }

        Commands::Preview {
            interval,
            quiet_start,
            quiet_end,
        } => {
            let current = app.controller.current().await?;
            let interval = interval.unwrap_or(current.interval_minutes);
            let quiet = QuietHours::new(
                quiet_start.unwrap_or(current.quiet_hours.start),
                quiet_end.unwrap_or(current.quiet_hours.end),
            );

            let times = compute_fire_times(interval, quiet);
            println!(
                "{}",
                format!("{} fire times (every {} min, quiet {})", times.len(), interval, quiet)
                    .cyan()
                    .bold()
            );
            let line: Vec<String> = times.iter().map(ToString::to_string).collect();
            for chunk in line.chunks(12) {
                println!("  {}", chunk.join(" "));
            }
        }

        Commands::Sync => {
            initialize(&app).await?;
            let report = app
                .controller
                .resync()
                .await
                .context("Failed to reschedule")?;
            print_report(&report);
        }

        Commands::Triggers => {
            let triggers = app.host.list_scheduled().await?;
            if triggers.is_empty() {
                println!("{}", "No reminders scheduled".yellow());
            } else {
                let rows: Vec<TriggerView> = triggers
                    .into_iter()
                    .map(|t| TriggerView {
                        time: t.fire_time.to_string(),
                        id: t.id,
                        title: t.payload.title,
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Next => {
            let next = app
                .scheduler
                .next_reminder(&SystemTimeProvider)
                .await
                .context("Failed to read scheduled reminders")?;
            match next {
                Some(next) => println!("{} {}", "Next reminder at".cyan().bold(), next),
                None => println!("{}", "No reminders scheduled".yellow()),
            }
        }

        Commands::Reset => {
            initialize(&app).await?;
            let report = app
                .controller
                .reset()
                .await
                .context("Failed to reset settings")?;
            println!("{}", "✓ Settings restored to defaults".green());
            print_report(&report);
        }
    }

    Ok(())
}
