// Command-line driver: load a picture, build the six-tile collage, save it.
// Anything not given on the command line is prompted for on stdin.

use anyhow::{Context, bail};
use clap::Parser;
use collage_vision::core_modules::utils::image_helper::image_helper;
use collage_vision::pipeline::{MIN_COLLAGE_HEIGHT, MIN_COLLAGE_WIDTH};
use collage_vision::{CollagePipeline, ParallelPipeline, PipelineConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "collage_vision")]
#[command(about = "Build a six-filter collage from a picture")]
struct Cli {
    /// Picture to read
    source: Option<PathBuf>,

    /// File the collage is written to; the format follows the extension
    destination: Option<PathBuf>,

    /// Maximum collage width in pixels (at least 3)
    #[arg(long)]
    max_width: Option<usize>,

    /// Maximum collage height in pixels (at least 1)
    #[arg(long)]
    max_height: Option<usize>,

    /// Brighten factor for the first tile
    #[arg(long, default_value_t = 1.5)]
    brighten: f64,

    /// Run the filters on a worker pool
    #[arg(long)]
    parallel: bool,

    /// Worker count (defaults to the number of CPUs)
    #[arg(long)]
    workers: Option<usize>,
}

/// Prints `message` and reads one trimmed line. EOF is an error.
fn prompt_line(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> anyhow::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input closed while waiting for: {}", message.trim());
    }
    Ok(line.trim().to_string())
}

/// Prompts until the answer parses as an integer of at least `minimum`.
fn prompt_at_least(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
    minimum: usize,
) -> anyhow::Result<usize> {
    loop {
        let answer = prompt_line(input, output, message)?;
        match answer.parse::<usize>() {
            Ok(value) if value >= minimum => return Ok(value),
            _ => continue,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collage_vision=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let source = match cli.source {
        Some(path) => path,
        None => prompt_line(&mut input, &mut output, "Enter the name of a picture file: ")?.into(),
    };
    let destination = match cli.destination {
        Some(path) => path,
        None => prompt_line(&mut input, &mut output, "Enter the filename you will save the collage to: ")?.into(),
    };
    let max_width = match cli.max_width {
        Some(width) if width >= MIN_COLLAGE_WIDTH => width,
        _ => prompt_at_least(&mut input, &mut output, "Enter the maximum width of the collage: ", MIN_COLLAGE_WIDTH)?,
    };
    let max_height = match cli.max_height {
        Some(height) if height >= MIN_COLLAGE_HEIGHT => height,
        _ => prompt_at_least(&mut input, &mut output, "Enter the maximum height of the collage: ", MIN_COLLAGE_HEIGHT)?,
    };

    let mut config = PipelineConfig::new(max_width, max_height);
    config.brighten_factor = cli.brighten;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    let picture = image_helper::load(&source).with_context(|| format!("failed to load {}", source.display()))?;
    info!(%picture, "loaded source");

    let collage = if cli.parallel {
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        runtime.block_on(async {
            let pipeline = ParallelPipeline::new(config)?;
            let collage = pipeline.run(Arc::new(picture)).await;
            pipeline.shutdown().await;
            collage
        })?
    } else {
        CollagePipeline::new(config)?.run(&picture)?
    };

    image_helper::save(&collage, &destination)
        .with_context(|| format!("failed to save {}", destination.display()))?;
    info!(path = %destination.display(), %collage, "saved collage");
    Ok(())
}
