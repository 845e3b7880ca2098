use clap::{Parser, Subcommand};

use self::{
    chain_summary::ChainSummaryArg, qoi_stats::QoiStatsArg, time_series::TimeSeriesArg,
};

mod chain_summary;
mod qoi_stats;
mod time_series;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute per-column uncertainty bands from sampler output
    QoiStats(#[clap(flatten)] QoiStatsArg),
    /// Pair weekly bands with observed cumulative cases
    TimeSeries(#[clap(flatten)] TimeSeriesArg),
    /// Summarise the model-inadequacy parameters of a calibration chain
    ChainSummary(#[clap(flatten)] ChainSummaryArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::QoiStats(arg) => qoi_stats::run(&arg)?,
        Mode::TimeSeries(arg) => time_series::run(&arg)?,
        Mode::ChainSummary(arg) => chain_summary::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_qoi_stats() {
        let args = CommandArgs::try_parse_from([
            "enrich",
            "qoi-stats",
            "sfp_qoi_seq.dat",
            "--pairing",
            "nominal",
            "--seed",
            "2a",
            "--burn-in",
            "0",
        ])
        .unwrap();
        assert!(matches!(args.mode, Mode::QoiStats(_)));
    }

    #[test]
    fn test_reject_unknown_reporting() {
        assert!(
            CommandArgs::try_parse_from([
                "enrich",
                "time-series",
                "qoi-stats",
                "--data",
                "cases.dat",
                "--reporting",
                "under25",
            ])
            .is_err()
        );
    }
}
