use fishpanel::modules::client::HttpBotApi;
use fishpanel::modules::config::load_panel_config_or_default;
use fishpanel::modules::panel::StatusPanel;
use fishpanel::modules::poll::spawn_status_poll;
use fishpanel::modules::types::DetectionMethod;
use simplelog::*;
use std::error::Error;
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;
use log::info;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

#[derive(Parser)]
#[command(
    name = "fishpanel",
    version,
    about = "Fishing bot control panel",
    long_about = include_str!("../help.txt")
)]
struct Cli {
    #[arg(short = 'l', long = "log-file", default_value = "fishpanel.log")]
    log_file: String,

    #[arg(short = 'c', long = "config", default_value = "./panel.toml")]
    config: String,

    #[arg(short = 'u', long = "url", help = "Control API base URL override")]
    url: Option<String>,
}

fn init_logger(log_path: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    WriteLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build(),
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?,
    )?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    init_logger(&cli.log_file)?;

    let mut config = load_panel_config_or_default(&cli.config)?;
    if let Some(url) = cli.url {
        config.api_url = url;
    }

    let api = HttpBotApi::new(&config.api_url)?;
    info!("Connecting panel to {}", config.api_url);

    let panel = Arc::new(Mutex::new(StatusPanel::new(api, config.fishing)));
    panel.lock().await.append_log("Control panel initialized");

    let poller = spawn_status_poll(
        panel.clone(),
        Duration::from_secs(config.poll_interval_secs),
    );

    println!("fishpanel connected to {} (type 'help' for commands)", config.api_url);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["start"] => {
                let mut panel = panel.lock().await;
                panel.start().await;
                print_panel(&panel);
            }
            ["stop"] => {
                let mut panel = panel.lock().await;
                panel.stop().await;
                print_panel(&panel);
            }
            ["status"] => {
                let mut panel = panel.lock().await;
                panel.refresh_status().await;
                print_panel(&panel);
            }
            ["set", "cast-interval", value] => match value.parse::<u32>() {
                Ok(value) => {
                    let mut panel = panel.lock().await;
                    panel.on_cast_interval_change(value);
                    println!("Cast interval: {}", panel.controls.cast_interval_label);
                }
                Err(_) => println!("Expected a number of seconds"),
            },
            ["set", "detection", method] => match method.parse::<DetectionMethod>() {
                Ok(method) => {
                    let mut panel = panel.lock().await;
                    panel.controls.detection_method = method;
                    println!("Detection method: {method}");
                }
                Err(err) => println!("{err}"),
            },
            ["set", "sensitivity", value] => match value.parse::<u8>() {
                Ok(value) if value <= 100 => {
                    let mut panel = panel.lock().await;
                    panel.on_sensitivity_change(value);
                    println!("Sensitivity: {}", panel.controls.sensitivity_label);
                }
                _ => println!("Expected a percentage between 0 and 100"),
            },
            ["save"] => {
                let mut panel = panel.lock().await;
                let draft = panel.save_settings();
                println!("Settings draft: {draft}");
            }
            ["clear"] => {
                panel.lock().await.clear_log();
                println!("Log cleared");
            }
            ["log"] => {
                println!("{}", panel.lock().await.render_log());
            }
            ["help"] => print!("{}", include_str!("../help.txt")),
            ["quit"] | ["exit"] => break,
            _ => println!("Unknown command (type 'help')"),
        }
    }

    poller.stop().await;
    info!("Panel shut down");
    Ok(())
}

fn print_panel(panel: &StatusPanel<HttpBotApi>) {
    println!("Status: {} ({})", panel.badge.label, panel.badge.severity);
    println!(
        "Session time: {}  Fish caught: {}  Fish per hour: {}",
        panel.session_time, panel.fish_caught, panel.fish_per_hour
    );
    println!(
        "Controls: start {}  stop {}",
        if panel.start_enabled { "enabled" } else { "disabled" },
        if panel.stop_enabled { "enabled" } else { "disabled" },
    );
}
