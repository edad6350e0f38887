use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use nomad_finance::auth::{HostContext, TracingHost};
use nomad_finance::cli::{
    handle_asset_command, handle_expense_command, handle_income_command, handle_report_command,
    handle_settings_command,
};
use nomad_finance::config::{AppConfig, NomadPaths};
use nomad_finance::display::format_status;
use nomad_finance::logging::init_logging;
use nomad_finance::remote::{RemoteBackend, SupabaseBackend};
use nomad_finance::services::SettingsService;
use nomad_finance::state::AppState;

#[derive(Parser)]
#[command(
    name = "nomad",
    version,
    about = "Expense, income and asset tracker for remote workers",
    long_about = "NomadFinance tracks expenses in ETB and incomes and assets in USD, \
                  syncing with a hosted backend when signed in and keeping local \
                  snapshots otherwise."
)]
struct Cli {
    /// Host-shell username; marks this run as hosted
    #[arg(long, global = true, env = "NOMAD_HOST_USER")]
    host_user: Option<String>,

    /// Host-shell first name, used as the default display name
    #[arg(long, global = true, env = "NOMAD_HOST_FIRST_NAME")]
    host_first_name: Option<String>,

    /// Host-shell platform version
    #[arg(long, global = true, env = "NOMAD_HOST_VERSION")]
    host_version: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn host_context(&self) -> HostContext {
        match &self.host_user {
            Some(user) => HostContext::hosted(Some(user.clone()).filter(|u| !u.trim().is_empty()))
                .with_first_name(self.host_first_name.clone())
                .with_platform_version(self.host_version.clone()),
            None => HostContext::standalone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the access mode and a short greeting
    Status,

    /// Show current configuration and paths
    Config,

    /// Expense management commands
    #[command(subcommand)]
    Expense(nomad_finance::cli::ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(nomad_finance::cli::IncomeCommands),

    /// Asset management commands
    #[command(subcommand)]
    Asset(nomad_finance::cli::AssetCommands),

    /// Settings commands
    #[command(subcommand)]
    Settings(nomad_finance::cli::SettingsCommands),

    /// Reports
    #[command(subcommand)]
    Report(nomad_finance::cli::ReportCommands),

    /// Delete all entries and restore default settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Sign out and forget the stored session
    SignOut,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = NomadPaths::new()?;
    paths.ensure_directories()?;
    init_logging(&paths)?;
    let config = AppConfig::load(&paths)?;

    match &cli.command {
        Some(Commands::Config) => {
            print_config(&paths, &config);
            return Ok(());
        }
        Some(Commands::Reset { yes: false }) => {
            bail!("Refusing to reset without --yes; this deletes every entry");
        }
        _ => {}
    }

    let backend = SupabaseBackend::from_config(&config.remote)?;
    let mut state = AppState::start(
        &config,
        &paths,
        cli.host_context(),
        backend.as_ref().map(|b| b as &dyn RemoteBackend),
        Arc::new(TracingHost),
    )
    .await?;

    if state.access().is_denied() {
        bail!("{}", state.access());
    }

    let today = Local::now().date_naive();
    match cli.command {
        None | Some(Commands::Status) => {
            print!(
                "{}",
                format_status(state.access(), state.host(), state.settings())
            );
        }
        Some(Commands::Config) => {}
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut state, cmd, today).await?,
        Some(Commands::Income(cmd)) => handle_income_command(&mut state, cmd, today).await?,
        Some(Commands::Asset(cmd)) => handle_asset_command(&mut state, cmd).await?,
        Some(Commands::Settings(cmd)) => handle_settings_command(&mut state, cmd).await?,
        Some(Commands::Report(cmd)) => handle_report_command(&state, cmd, today)?,
        Some(Commands::Reset { .. }) => {
            SettingsService::new(&mut state).reset().await?;
            println!("All data has been reset.");
        }
        Some(Commands::SignOut) => {
            state.sign_out().await?;
            println!("Signed out.");
        }
    }

    Ok(())
}

fn print_config(paths: &NomadPaths, config: &AppConfig) {
    println!("NomadFinance Configuration");
    println!("==========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Log directory:  {}", paths.log_dir().display());
    println!();
    println!(
        "Remote:            {}",
        if config.remote.is_configured() {
            config.remote.url.as_str()
        } else {
            "(not configured)"
        }
    );
    println!(
        "Allowed user:      {}",
        config
            .allowed_identity
            .as_deref()
            .map(|u| format!("@{}", u))
            .unwrap_or_else(|| "(unset)".to_string())
    );
    println!("Account domain:    {}", config.account.domain);
    println!(
        "Account secret:    {}",
        if config.account.secret.is_some() { "set" } else { "(unset)" }
    );
    println!("Bootstrap timeout: {}s", config.bootstrap_timeout().as_secs());
    println!("Local fallback:    {}", config.local_fallback);
    println!("Demo data:         {}", config.demo_data);
}
