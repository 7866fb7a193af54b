use crate::reports;
use clap::Args;
use phonscore::api;
use phonscore::config::ScoreOptions;
use phonscore::error::PsResult;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub options: ScoreOptions,

    /// CSV with `id,target,actual[,alignment]` columns.
    #[arg(short, long)]
    pub input: PathBuf,
}

pub fn run(args: &ScoreArgs, options: &ScoreOptions, json: bool) -> PsResult<()> {
    let report = api::score_dataset(&args.input, options)?;
    reports::emit(&report, json)
}
