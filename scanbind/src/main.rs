use clap::Parser;
use scanbind::classify::ClassifyOptions;
use scanbind::pipeline::{PipelineOptions, assemble};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scanbind")]
#[command(about = "Classify scanned page images and bind them into a mixed-mode PDF")]
struct Cli {
    /// Glob pattern selecting input page images (bound in filename order)
    #[arg(default_value = "screenshots/*.png")]
    pattern: String,

    /// Output PDF path
    #[arg(short, long, default_value = "output.pdf")]
    output: PathBuf,

    /// Page-sizing resolution in pixels per inch
    #[arg(short, long, default_value_t = 300)]
    resolution: u32,

    /// Binarization threshold for black-and-white text pages
    #[arg(long, default_value_t = 175)]
    bw_threshold: u8,

    /// Document title metadata
    #[arg(long)]
    title: Option<String>,

    /// Classifier: pixel sampling stride
    #[arg(long, default_value_t = 10)]
    sample_step: u32,

    /// Classifier: channel divergence above which a sample counts as colored
    #[arg(long, default_value_t = 28)]
    rgb_diff_threshold: u8,

    /// Classifier: minimum fraction of colored samples for a color page
    #[arg(long, default_value_t = 0.12)]
    color_ratio: f32,

    /// Classifier: minimum white fraction for a black-and-white page
    #[arg(long, default_value_t = 0.65)]
    white_ratio: f32,

    /// Classifier: minimum black fraction for a black-and-white page
    #[arg(long, default_value_t = 0.01)]
    black_ratio: f32,

    /// Classifier: maximum mid-gray fraction for a black-and-white page
    #[arg(long, default_value_t = 0.25)]
    mid_gray_max: f32,
}

impl Cli {
    fn into_options(self) -> PipelineOptions {
        PipelineOptions {
            pattern: self.pattern,
            output: self.output,
            resolution: self.resolution,
            bw_threshold: self.bw_threshold,
            title: self.title,
            classify: ClassifyOptions {
                sample_step: self.sample_step,
                rgb_diff_threshold: self.rgb_diff_threshold,
                color_ratio_threshold: self.color_ratio,
                text_white_ratio: self.white_ratio,
                text_black_ratio: self.black_ratio,
                mid_gray_ratio_max: self.mid_gray_max,
            },
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let options = Cli::parse().into_options();
    match assemble(&options) {
        Ok(report) => {
            tracing::info!(pages = report.len(), output = %options.output.display(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(%e, "run failed");
            ExitCode::FAILURE
        }
    }
}
