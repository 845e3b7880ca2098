use std::path::PathBuf;

use enrich_analysis::{
    layout::QoiLayout,
    time_series::{Reporting, TimeSeries},
};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TimeSeriesArg {
    /// Stats table written by `qoi-stats`
    stats: PathBuf,
    /// Observed weekly cases, new cases in the second column
    #[arg(long)]
    data: PathBuf,
    /// JSON pipeline configuration providing the layout
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of epidemiological weeks
    #[arg(long)]
    weeks: Option<usize>,
    /// Number of modelled state variables per week
    #[arg(long)]
    species: Option<usize>,
    /// Compartment to plot; defaults to cumulative cases
    #[arg(long)]
    compartment: Option<usize>,
    /// Assumed case reporting (complete, under10 or under50)
    #[arg(long, default_value = "complete")]
    reporting: Reporting,
    /// Output file path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

impl TimeSeriesArg {
    fn layout(&self, config_layout: QoiLayout) -> QoiLayout {
        QoiLayout::new(
            self.weeks.unwrap_or(config_layout.n_weeks),
            self.species.unwrap_or(config_layout.n_species),
        )
    }
}

pub(crate) fn run(arg: &TimeSeriesArg) -> anyhow::Result<()> {
    let config = util::load_pipeline_config(arg.config.as_deref())?;
    let layout = arg.layout(config.layout());
    let compartment = arg
        .compartment
        .unwrap_or(layout.cumulative_cases_compartment());

    let records = util::read_stats_file(&arg.stats)?;
    let observed = util::read_matrix_file("observed data", &arg.data)?;

    let series = TimeSeries::build(&records, &observed, layout, compartment, arg.reporting)?;
    tracing::info!(
        weeks = series.points.len(),
        compartment,
        reporting = ?arg.reporting,
        "built time series"
    );

    let mut output = Output::from_output_path(&arg.output)?;
    output.write_table(|w| series.write_table(w))?;
    Ok(())
}
