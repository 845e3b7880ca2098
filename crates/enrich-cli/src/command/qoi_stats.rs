use std::path::PathBuf;

use enrich_analysis::{config::PipelineConfig, qoi, stats_table};
use enrich_stats::{config::ThresholdPairing, noise::NoiseSeed};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct QoiStatsArg {
    /// Sampler output, one posterior draw per row
    input: PathBuf,
    /// Output file path (`-` for stdout)
    #[arg(long, default_value = "qoi-stats")]
    output: PathBuf,
    /// JSON pipeline configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Leading rows to discard
    #[arg(long)]
    burn_in: Option<usize>,
    /// Number of epidemiological weeks
    #[arg(long)]
    weeks: Option<usize>,
    /// Number of modelled state variables per week
    #[arg(long)]
    species: Option<usize>,
    /// Variance of the observation noise added to every draw
    #[arg(long)]
    noise_variance: Option<f64>,
    /// Histogram bins per column
    #[arg(long)]
    bins: Option<usize>,
    /// Noisy copies drawn per sample
    #[arg(long)]
    augmentation: Option<usize>,
    /// Cumulative-mass threshold pairing (legacy or nominal)
    #[arg(long)]
    pairing: Option<ThresholdPairing>,
    /// 128-bit noise seed as hex; random when omitted
    #[arg(long)]
    seed: Option<NoiseSeed>,
}

impl QoiStatsArg {
    fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(burn_in) = self.burn_in {
            config.burn_in = burn_in;
        }
        if let Some(weeks) = self.weeks {
            config.n_weeks = weeks;
        }
        if let Some(species) = self.species {
            config.n_species = species;
        }
        if let Some(variance) = self.noise_variance {
            config.estimator.noise_variance = variance;
        }
        if let Some(bins) = self.bins {
            config.estimator.num_bins = bins;
        }
        if let Some(factor) = self.augmentation {
            config.estimator.augmentation_factor = factor;
        }
        if let Some(pairing) = self.pairing {
            config.estimator.thresholds = pairing.thresholds();
        }
    }
}

pub(crate) fn run(arg: &QoiStatsArg) -> anyhow::Result<()> {
    let mut config = util::load_pipeline_config(arg.config.as_deref())?;
    arg.apply_overrides(&mut config);

    for (name, pair) in config.estimator.thresholds.asymmetric() {
        tracing::warn!(
            name,
            left = pair.left,
            right = pair.right,
            "asymmetric threshold pair in use; configure symmetric thresholds for symmetric bands"
        );
    }

    let seed = arg.seed.unwrap_or_else(rand::random);
    tracing::info!(%seed, "noise seed");

    let matrix = util::read_matrix_file("sample", &arg.input)?;
    let records = qoi::compute_qoi_statistics(matrix, &config, seed)?;

    let mut output = Output::from_output_path(&arg.output)?;
    output.write_table(|w| stats_table::write_stats_table(w, &records))?;
    tracing::info!(
        rows = records.len(),
        output = %output.display_path(),
        "wrote QoI statistics"
    );
    Ok(())
}
