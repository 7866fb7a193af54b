use crate::reports;
use clap::Args;
use phonscore::api;
use phonscore::config::ScoreOptions;
use phonscore::error::PsResult;
use phonscore::scorer::loader::GroupRecord;

#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    #[command(flatten)]
    pub options: ScoreOptions,

    #[arg(short, long)]
    pub target: String,

    #[arg(short, long)]
    pub actual: String,

    /// Alignment columns such as `0:0 1:-`; defaults to position by position.
    #[arg(long, default_value = "")]
    pub alignment: String,
}

pub fn run(args: &PairArgs, options: &ScoreOptions, json: bool) -> PsResult<()> {
    let resolved = options.resolve()?;
    let group = GroupRecord::parse("pair", &args.target, &args.actual, &args.alignment)?;
    let report = api::build_report(&[group], &resolved)?;
    reports::emit(&report, json)
}
