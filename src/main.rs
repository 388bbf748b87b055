use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::PathBuf;
use tradecurve::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tradecurve")]
#[command(about = "Equity curve and performance analyzer for broker trade-history exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //analyze one or more trade-history exports
    Analyze {
        //path(s) to mt5-style csv history exports
        #[arg(long, required = true, num_args = 1..)]
        data: Vec<PathBuf>,

        //json configuration file, flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        //show percentages instead of usd
        #[arg(long)]
        percent: bool,

        //net pnl composition (profit, net)
        #[arg(long)]
        costs: Option<String>,

        //drop rows with unparseable close dates instead of failing
        #[arg(long)]
        skip_bad_dates: bool,

        //output options, single data file only
        //output path for equity curve csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for the full result as json
        #[arg(long)]
        output_json: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    //diagnostics go to stderr, the report goes to stdout
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tradecurve=info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            data,
            config,
            percent,
            costs,
            skip_bad_dates,
            output_equity_csv,
            output_json,
        } => {
            let mut config = match config {
                Some(path) => AnalysisConfig::from_json_file(&path)
                    .context(format!("Failed to load config from {:?}", path))?,
                None => AnalysisConfig::default(),
            };

            if percent {
                config.display_mode = DisplayMode::Percent;
            }
            if let Some(costs) = costs {
                config.cost_policy = CostPolicy::parse(&costs)
                    .ok_or_else(|| anyhow::anyhow!("Unknown cost policy: {}", costs))?;
            }
            if skip_bad_dates {
                config.date_policy = DatePolicy::SkipRecord;
            }
            if output_equity_csv.is_some() {
                config.output_equity_csv = output_equity_csv;
            }
            if output_json.is_some() {
                config.output_json = output_json;
            }

            run_analysis(data, config)?;
        }
    }

    Ok(())
}

fn run_analysis(data_paths: Vec<PathBuf>, config: AnalysisConfig) -> Result<()> {
    let wants_output = config.output_equity_csv.is_some() || config.output_json.is_some();
    if wants_output && data_paths.len() > 1 {
        anyhow::bail!("Output files can only be written when analyzing a single export");
    }

    println!("TradeCurve Trade History Analyzer");
    println!("=================================\n");

    //each file gets its own aggregator
    let results: Vec<Result<AnalysisResult>> = data_paths
        .par_iter()
        .map(|path| {
            let records = load_csv(path, config.date_policy)
                .context(format!("Failed to load trade history from {:?}", path))?;
            Ok(analyze(&records, &config))
        })
        .collect();

    for (path, result) in data_paths.iter().zip(results) {
        let result = result?;
        print_report(path, &result, config.display_mode);

        if let Some(equity_path) = &config.output_equity_csv {
            write_equity_csv(equity_path, &result.series)?;
            println!("\nEquity curve saved to {:?}", equity_path);
        }

        if let Some(json_path) = &config.output_json {
            write_result_json(json_path, &result)?;
            println!("Analysis saved to {:?}", json_path);
        }
    }

    Ok(())
}

fn print_report(path: &PathBuf, result: &AnalysisResult, mode: DisplayMode) {
    println!("{:?}", path);

    match (result.series.points().first(), result.series.last()) {
        (Some(first), Some(last)) => println!(
            "{} chart points, {} to {}\n",
            result.series.len(),
            first.label,
            last.label
        ),
        _ => println!("No deposits or trades found\n"),
    }

    println!("Performance ({})", mode_name(mode));
    result.summary.pretty_print_table(mode);

    println!("\nMonthly Returns ({})", mode_name(mode));
    result.monthly.pretty_print_table(mode);
    println!();
}

fn mode_name(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Usd => "USD",
        DisplayMode::Percent => "%",
    }
}
