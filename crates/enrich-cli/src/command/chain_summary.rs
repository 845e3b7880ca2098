use std::path::PathBuf;

use enrich_analysis::chain::{ChainSummary, InadequacyType};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ChainSummaryArg {
    /// Filtered MCMC chain, one draw per row
    chain: PathBuf,
    /// Number of modelled state variables per week
    #[arg(long, default_value_t = 7)]
    species: usize,
    /// Model inadequacy type (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    inadequacy: u8,
    /// Output file path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

pub(crate) fn run(arg: &ChainSummaryArg) -> anyhow::Result<()> {
    let inadequacy = InadequacyType::try_from(arg.inadequacy)?;
    let chain = util::read_matrix_file("chain", &arg.chain)?;
    let summary = ChainSummary::from_chain(&chain, arg.species, inadequacy)?;
    tracing::info!(
        parameters = summary.parameters.len(),
        draws = chain.num_rows(),
        "summarised chain"
    );

    let mut output = Output::from_output_path(&arg.output)?;
    output.write_table(|w| summary.write_table(w))?;
    Ok(())
}
