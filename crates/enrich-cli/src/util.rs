use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use enrich_analysis::{config::PipelineConfig, matrix::SampleMatrix, stats_table};
use enrich_stats::quantile::QuantileRecord;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Opens `path` for writing; `-` selects stdout.
    pub fn from_output_path(path: &Path) -> anyhow::Result<Self> {
        if path.as_os_str() == "-" {
            Ok(Output::stdout())
        } else {
            Output::open(path.to_path_buf())
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes a table with `write` and flushes it.
    pub fn write_table<F>(&mut self, write: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        write(self).with_context(|| format!("Failed to write table to {}", self.display_path()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a whitespace-delimited numeric table
///
/// # Errors
///
/// Returns error if the file cannot be opened or a row is malformed
pub fn read_matrix_file<P>(file_kind: &str, path: P) -> anyhow::Result<SampleMatrix>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let matrix = SampleMatrix::from_path(path)
        .with_context(|| format!("Failed to read {} file: {}", file_kind, path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = matrix.num_rows(),
        columns = matrix.num_columns(),
        "loaded {file_kind} table"
    );
    Ok(matrix)
}

/// Read a `qoi-stats` table
///
/// # Errors
///
/// Returns error if the file cannot be opened or is not a 5-column table
pub fn read_stats_file<P>(path: P) -> anyhow::Result<Vec<QuantileRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open stats file: {}", path.display()))?;
    let records = stats_table::read_stats_table(BufReader::new(file))
        .with_context(|| format!("Failed to read stats file: {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded stats table");
    Ok(records)
}

/// Load the pipeline configuration, falling back to defaults without a file
pub fn load_pipeline_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => read_json_file("config", path),
        None => Ok(PipelineConfig::default()),
    }
}
