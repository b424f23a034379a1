//! Don't Kill My App - background instructions for Android devices
//!
//! Command-line front end for the dontkillmyapp library.
//! Run with: cargo run --bin dontkillmyapp -- [COMMAND]

use anyhow::{bail, Context};
use dontkillmyapp::adb::{ADBConnection, AdbPlatform};
use dontkillmyapp::config::get_messages;
use dontkillmyapp::{
    background_instructions, AppSettings, DeviceDataset, InstructionOptions, InstructionPanel,
    ManufacturerResolver,
};
use std::env;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: dontkillmyapp [COMMAND] [OPTIONS]

Commands:
  show [MANUFACTURER]   Show instructions for a manufacturer or the attached device (default)
  list                  List manufacturers in the dataset
  detect                Show the detected manufacturer and test mode state
  devices               List attached devices and whether instructions exist
  help                  Show this message

Options for show:
  --app NAME            App name substituted into the instructions
  --json                Print the result as JSON
  --html                Print the standalone HTML page
  --developer           Also print developer notes

Environment:
  DKMA_APP_NAME, DKMA_MANUFACTURER, DKMA_DATA_PATH, DKMA_LANG, ADB_DEVICE_ID, ADB_PATH";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show(ShowArgs),
    List,
    Detect,
    Devices,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ShowArgs {
    manufacturer: Option<String>,
    app_name: Option<String>,
    json: bool,
    html: bool,
    developer: bool,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some(first) = args.first() else {
            return Ok(Command::Show(ShowArgs::default()));
        };

        match first.as_str() {
            "list" => Ok(Command::List),
            "detect" => Ok(Command::Detect),
            "devices" => Ok(Command::Devices),
            "help" | "--help" | "-h" => Ok(Command::Help),
            "show" => Ok(Command::Show(ShowArgs::parse(&args[1..])?)),
            _ => Ok(Command::Show(ShowArgs::parse(args)?)),
        }
    }
}

impl ShowArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut parsed = ShowArgs::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--app" => {
                    let name = iter.next().context("--app requires a value")?;
                    parsed.app_name = Some(name.clone());
                }
                "--json" => parsed.json = true,
                "--html" => parsed.html = true,
                "--developer" => parsed.developer = true,
                flag if flag.starts_with("--") => bail!("Unknown option: {}\n\n{}", flag, USAGE),
                value => {
                    if parsed.manufacturer.is_some() {
                        bail!("Unexpected argument: {}\n\n{}", value, USAGE);
                    }
                    parsed.manufacturer = Some(value.to_string());
                }
            }
        }

        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    // Initialize tracing on stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let settings = AppSettings::load();

    let loaded;
    let dataset = match settings.data_path() {
        Some(path) => {
            loaded = DeviceDataset::load_path_or_empty(path);
            &loaded
        }
        None => DeviceDataset::embedded(),
    };

    let connection = ADBConnection::with_path(&settings.adb_path);
    let mut platform = AdbPlatform::new(connection.clone());
    if let Some(id) = settings.device_id() {
        platform = platform.with_device_id(id);
    }
    let resolver = ManufacturerResolver::new(platform);
    if let Some(manufacturer) = settings.test_manufacturer() {
        resolver.set_override(Some(manufacturer));
    }

    match command {
        Command::Help => println!("{}", USAGE),
        Command::List => run_list(dataset, &settings),
        Command::Detect => run_detect(dataset, &resolver, &settings),
        Command::Devices => run_devices(dataset, &connection, &settings)?,
        Command::Show(args) => run_show(dataset, &resolver, &settings, args)?,
    }

    Ok(())
}

fn run_show(
    dataset: &DeviceDataset,
    resolver: &ManufacturerResolver,
    settings: &AppSettings,
    args: ShowArgs,
) -> anyhow::Result<()> {
    let app_name = args
        .app_name
        .unwrap_or_else(|| settings.app_name.clone());
    let mut options = InstructionOptions::new().with_app_name(app_name);
    if let Some(manufacturer) = args.manufacturer {
        options = options.with_manufacturer(manufacturer);
    }

    if args.json {
        let result = background_instructions(dataset, resolver, &options);
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut panel = InstructionPanel::new().with_lang(&settings.lang);
    panel.open(dataset, resolver, &options);

    if args.html {
        match panel.html_document() {
            Some(document) => print!("{}", document),
            None => println!("{}", panel.render_text()),
        }
        return Ok(());
    }

    println!("{}", panel.render_text());

    if args.developer {
        let developer_html = panel
            .content()
            .instructions()
            .and_then(|result| result.developer_instructions_html.as_deref());
        if let Some(html) = developer_html {
            let messages = get_messages(&settings.lang);
            println!("{}\n", messages.developer_notes);
            println!("{}", dontkillmyapp::presentation::html_to_text(html));
        }
    }

    Ok(())
}

fn run_list(dataset: &DeviceDataset, settings: &AppSettings) {
    let messages = get_messages(&settings.lang);
    println!("{} ({}):", messages.known_manufacturers, dataset.len());
    for (key, record) in dataset.iter() {
        let marker = if record.has_instructions() { "*" } else { " " };
        println!("  {} {:<12} {}", marker, key, record.name);
    }
}

fn run_detect(dataset: &DeviceDataset, resolver: &ManufacturerResolver, settings: &AppSettings) {
    let messages = get_messages(&settings.lang);
    let or_unknown = |value: String| {
        if value.is_empty() {
            messages.unknown.to_string()
        } else {
            value
        }
    };

    println!(
        "{}: {}",
        messages.detected_manufacturer,
        or_unknown(resolver.detected_manufacturer())
    );
    println!(
        "{}: {}",
        messages.test_mode,
        if resolver.is_override_active() { messages.active } else { messages.inactive }
    );

    let manufacturer = resolver.resolve_manufacturer();
    let name = dataset
        .lookup_by_manufacturer(&manufacturer)
        .map(|record| record.name.clone());
    println!(
        "{}: {}",
        messages.manufacturer,
        name.unwrap_or_else(|| or_unknown(manufacturer))
    );
}

fn run_devices(
    dataset: &DeviceDataset,
    connection: &ADBConnection,
    settings: &AppSettings,
) -> anyhow::Result<()> {
    let messages = get_messages(&settings.lang);
    if !connection.is_running() {
        bail!("Cannot run adb at '{}', is it installed?", settings.adb_path);
    }

    let devices = connection
        .list_devices()
        .context("Failed to list devices, is adb installed?")?;

    if devices.is_empty() {
        println!("{}", messages.no_devices);
        return Ok(());
    }

    for device in devices {
        let resolver = ManufacturerResolver::new(
            AdbPlatform::new(connection.clone()).with_device_id(device.device_id.clone()),
        );
        let manufacturer = resolver.detected_manufacturer();
        let record = dataset.lookup_by_manufacturer(&manufacturer);
        let has_instructions = record.is_some_and(|r| r.has_instructions());

        println!(
            "{:<24} {:<10} {:<16} {:<12} {}",
            device.device_id,
            device.status,
            device.model.as_deref().unwrap_or("-"),
            if manufacturer.is_empty() { "-" } else { manufacturer.as_str() },
            if has_instructions { "instructions available" } else { "no instructions" }
        );
    }

    Ok(())
}
