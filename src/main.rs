use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tenki_calc::{Calculator, Key};
use tenki_core::Config;
use tenki_ui::{parse_input, render, render_calculator, Input, Navigator};
use tenki_weather::{
    refresh_forecast, ForecastStore, JmaClient, RefreshOutcome, StoredForecast, REGION_GROUPS,
};

#[derive(Parser, Debug)]
#[command(name = "tenki", about = "JMA weather forecasts and a calculator")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse region groups, offices and forecasts interactively
    Menu,
    /// List the region groups
    Regions,
    /// List the offices in a region group
    Offices { group: String },
    /// Fetch, store and show the forecast for an office
    Forecast { office_code: String, name: String },
    /// Show the stored forecast for a region without fetching
    Show { name: String },
    /// Print stored rows, for one region or all of them
    Dump { name: Option<String> },
    /// Press calculator keys (interactive when none are given)
    Calc { keys: Vec<String> },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tenki_core::init()?;
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Calc { keys } => run_calculator(&keys),
        Command::Regions => {
            for group in REGION_GROUPS {
                println!("{}  {}", group.code, group.name);
            }
            Ok(())
        }
        Command::Menu => run_menu(&load_config(config_path)?).await,
        Command::Offices { group } => list_offices(&load_config(config_path)?, &group).await,
        Command::Forecast { office_code, name } => {
            show_forecast(&load_config(config_path)?, &office_code, &name).await
        }
        Command::Show { name } => {
            let store = open_store(&load_config(config_path)?)?;
            print_rows(&store.read_back(&name)?);
            Ok(())
        }
        Command::Dump { name } => {
            let store = open_store(&load_config(config_path)?)?;
            for stored in store.dump(name.as_deref())? {
                println!(
                    "ID: {}, region: {}, date: {}, weather: {}, max: {}, min: {}, code: {}, fetched_at: {}",
                    stored.id,
                    stored.row.region_name,
                    stored.row.date,
                    stored.row.weather,
                    stored.row.max_temp,
                    stored.row.min_temp,
                    stored.row.weather_code,
                    stored.fetched_at
                );
            }
            println!("\nTotal rows: {}", store.count()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let (config, _) = Config::load_validated(path)?;
    tracing::debug!("Using database {}", config.storage.database_path);
    Ok(config)
}

fn open_store(config: &Config) -> Result<ForecastStore> {
    ForecastStore::open(config.storage.database_path()).context("Failed to open forecast database")
}

fn client(config: &Config) -> Result<JmaClient> {
    JmaClient::new(&config.jma, &config.http).context("Failed to create JMA client")
}

async fn run_menu(config: &Config) -> Result<()> {
    let mut navigator = Navigator::new(client(config)?, config.storage.clone());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}\n> ", render(navigator.state()));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        match parse_input(&navigator.state().view, &line?) {
            Input::Quit => return Ok(()),
            Input::Event(event) => {
                navigator.handle(event).await;
            }
            Input::Unknown => println!("?"),
        }
    }
}

async fn list_offices(config: &Config, group: &str) -> Result<()> {
    let Some(directory) = client(config)?.fetch_area_directory().await? else {
        anyhow::bail!(tenki_ui::view::DIRECTORY_UNAVAILABLE);
    };
    for office in directory.offices_in(group)? {
        println!("{}  {}", office.code, office.name);
    }
    Ok(())
}

async fn show_forecast(config: &Config, office_code: &str, name: &str) -> Result<()> {
    let client = client(config)?;
    let mut store = open_store(config)?;

    match refresh_forecast(&client, &mut store, office_code, name).await? {
        RefreshOutcome::Unavailable => anyhow::bail!(tenki_ui::view::FORECAST_UNAVAILABLE),
        RefreshOutcome::Ready(rows) => {
            print_rows(&rows);
            Ok(())
        }
    }
}

fn print_rows(rows: &[StoredForecast]) {
    for stored in rows {
        let row = &stored.row;
        match row.temperature_range() {
            Some(range) => println!(
                "{}  {}  {}  [{}]",
                row.date, row.weather, range, row.weather_code
            ),
            None => println!("{}  {}  [{}]", row.date, row.weather, row.weather_code),
        }
    }
}

fn run_calculator(keys: &[String]) -> Result<()> {
    let mut calc = Calculator::new();

    if !keys.is_empty() {
        for key in keys {
            calc.press(key.parse::<Key>()?);
        }
        println!("{}", calc.display());
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}\n> ", render_calculator(&calc));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        if matches!(line.trim(), "q" | "quit") {
            return Ok(());
        }
        for token in line.split_whitespace() {
            match token.parse::<Key>() {
                Ok(key) => calc.press(key),
                Err(e) => println!("{}", e),
            }
        }
    }
}
