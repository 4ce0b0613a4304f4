use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::{HttpUserSource, PagingMode, RefreshPolicy, RosterController, RosterView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
#[command(about = "Browse a remote user listing and edit it locally")]
struct Args {
    /// Settings file; missing files are ignored.
    #[arg(long, default_value = config::DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    #[arg(long)]
    paging: Option<PagingMode>,
    #[arg(long)]
    refresh: Option<RefreshPolicy>,
    /// Page loaded at startup.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Print views as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = config::load_settings(&args.config)?;
    if let Some(v) = args.api_url {
        settings.api_url = v;
    }
    if let Some(v) = args.api_key {
        settings.api_key = Some(v);
    }
    if let Some(v) = args.page_size {
        settings.page_size = v;
    }
    if let Some(v) = args.paging {
        settings.paging = v;
    }
    if let Some(v) = args.refresh {
        settings.refresh = v;
    }

    let roster_config = settings.roster_config()?;
    let mut source = HttpUserSource::new(&settings.api_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    if let Some(api_key) = settings.api_key.clone() {
        source = source.with_api_key(api_key);
    }
    info!(
        endpoint = %source.endpoint(),
        page_size = roster_config.page_size.get(),
        paging = %roster_config.paging,
        refresh = %roster_config.refresh,
        "starting roster"
    );

    let mut controller = RosterController::new(roster_config, Arc::new(source));
    controller.change_page(args.page).await?;
    print_view(&controller.view(), args.json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line, controller.modal()) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => print_view(&controller.view(), args.json)?,
            Ok(Command::Action(action)) => {
                if let Err(err) = controller.dispatch(action).await {
                    warn!(error = %err, "action rejected");
                }
                print_view(&controller.view(), args.json)?;
            }
            Err(err) => eprintln!("{err:#}"),
        }
    }

    Ok(())
}

fn print_view(view: &RosterView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
    } else {
        print!("{}", render::render_view(view));
    }
    Ok(())
}
