use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use phonscore::config::ScoreOptions;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring options; explicit flags override it.
    #[arg(global = true, long)]
    options: Option<String>,

    /// Print the report as JSON instead of a table.
    #[arg(global = true, long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every row of a CSV dataset.
    Score(cmd::score::ScoreArgs),
    /// Score a single target/actual pair.
    Pair(cmd::pair::PairArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Raw matches tell typed flags apart from defaults when merging with --options.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let sub_matches = matches.subcommand().map(|(_, m)| m).unwrap_or(&matches);

    let cli_options = match &cli.command {
        Commands::Score(args) => &args.options,
        Commands::Pair(args) => &args.options,
    };

    let options = match &cli.options {
        Some(path) => {
            info!("Loading options from: {}", path);
            let mut file_options = ScoreOptions::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_options.merge_from_cli(cli_options, sub_matches);
            file_options
        }
        None => cli_options.clone(),
    };

    let result = match &cli.command {
        Commands::Score(args) => cmd::score::run(args, &options, cli.json),
        Commands::Pair(args) => cmd::pair::run(args, &options, cli.json),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
