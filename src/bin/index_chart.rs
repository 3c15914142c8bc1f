use index_chart::config::{Config, SourceKind, ViewConfig, DEFAULT_STORE_PATH};
use index_chart::models::chart::ChartDefinition;
use index_chart::services::chart_service::ChartService;
use index_chart::services::page;
use index_chart::sources::base::RecordSource;
use index_chart::sources::csv_file::CsvFileSource;
use index_chart::util::arrow_utils;

use anyhow::Context;
use clap::{App, Arg, ArgMatches, SubCommand};
use log::info;

fn view_args<'a>(cmd: App<'a>) -> App<'a> {
    cmd.arg(
        Arg::with_name("source")
            .long("source")
            .value_name("SOURCE")
            .help("Record source (csv, arrow, remote)")
            .takes_value(true)
            .default_value("csv"),
    )
    .arg(
        Arg::with_name("path")
            .short('p')
            .long("path")
            .value_name("PATH")
            .help("CSV or Arrow file to read (defaults depend on --source)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("url")
            .long("url")
            .value_name("URL")
            .help("CSV download URL (remote source)")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("symbol")
            .short('s')
            .long("symbol")
            .value_name("SYMBOL")
            .help("Only use records of this index symbol")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("title")
            .short('t')
            .long("title")
            .value_name("TITLE")
            .help("Chart title")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("view-config")
            .long("view-config")
            .value_name("JSON")
            .help("JSON file listing the series to chart")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("html")
            .long("html")
            .help("Render a standalone HTML page instead of JSON")
            .takes_value(false),
    )
    .arg(
        Arg::with_name("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Write to this file instead of stdout")
            .takes_value(true),
    )
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    let source = SourceKind::from_args(
        matches.value_of("source").unwrap_or("csv"),
        matches.value_of("path"),
        matches.value_of("url"),
    )?;

    let mut config = Config::new().with_source(source);
    if let Some(title) = matches.value_of("title") {
        config = config.with_title(title);
    }
    if let Some(path) = matches.value_of("view-config") {
        let view = ViewConfig::from_json_file(path)
            .with_context(|| format!("Failed to load view config {}", path))?;
        config = config.with_history_view(view);
    }

    Ok(config)
}

fn write_output(matches: &ArgMatches, title: &str, chart: &ChartDefinition) -> anyhow::Result<()> {
    let content = if matches.is_present("html") {
        page::render_html(title, chart)?
    } else {
        chart.to_json_pretty()?
    };

    match matches.value_of("output") {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {}", path))?;
            info!("Chart written to {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let app = App::new("IndexChart")
        .version("1.0.0")
        .about("Stock index historical chart configuration generator")
        .subcommand(view_args(
            SubCommand::with_name("history").about("Multi-series historical price chart"),
        ))
        .subcommand(view_args(
            SubCommand::with_name("seasonality").about("Average change per calendar month"),
        ))
        .subcommand(
            SubCommand::with_name("import")
                .about("Import a CSV export into the Arrow store")
                .arg(
                    Arg::with_name("input")
                        .short('i')
                        .long("input")
                        .value_name("CSV")
                        .help("Investing.com CSV export")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short('o')
                        .long("output")
                        .value_name("ARROW")
                        .help("Arrow store file to write")
                        .takes_value(true)
                        .default_value(DEFAULT_STORE_PATH),
                )
                .arg(
                    Arg::with_name("symbol")
                        .short('s')
                        .long("symbol")
                        .value_name("SYMBOL")
                        .help("Index symbol stamped on every imported record")
                        .takes_value(true),
                ),
        );

    let matches = app.get_matches();

    match matches.subcommand() {
        Some(("history", sub)) => {
            let service = ChartService::from_config(build_config(sub)?)?;
            let chart = service.history_chart(sub.value_of("symbol")).await?;
            write_output(sub, &service.config().title, &chart)?;
        }
        Some(("seasonality", sub)) => {
            let service = ChartService::from_config(build_config(sub)?)?;
            let months = service.seasonality(sub.value_of("symbol")).await?;
            for month in &months {
                info!("{:<10} {:>8.2}% ({} records)", month.name, month.average, month.count);
            }
            let chart = service.seasonality_chart_for(&months);
            write_output(sub, &chart.options.plugins.title.text, &chart)?;
        }
        Some(("import", sub)) => {
            let input = sub.value_of("input").context("--input is required")?;
            let output = sub.value_of("output").unwrap_or(DEFAULT_STORE_PATH);

            let source = CsvFileSource::investing_com(input);
            let mut records = source.fetch_records(None).await?;

            let config = Config::new();
            let mut fields = vec![config.date_field.clone()];
            fields.extend(ViewConfig::store_history().fields());

            if let Some(symbol) = sub.value_of("symbol") {
                let symbol_field = config.symbol_field().to_string();
                for record in &mut records {
                    record.insert(symbol_field.as_str(), symbol);
                }
                fields.push(symbol_field);
            }

            arrow_utils::save_records_to_arrow(&records, &fields, output)?;
            info!("Imported {} records into {}", records.len(), output);
        }
        _ => {
            info!("No command specified. Use --help for usage information.");
        }
    }

    Ok(())
}
