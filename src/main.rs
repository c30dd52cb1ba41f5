use std::{fs::File, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use physalum::{model::Model, palette::Palette, render, Config};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// 640x640, 100 agents, 45 degree sensors
    Large,
    /// 240x240, one traced agent, 25 degree sensors
    Small,
}

#[derive(Parser)]
#[command(name = "physalum")]
#[command(version)]
#[command(about = "Physarum trail simulation rendered to an animated GIF")]
struct Cli {
    /// Base parameter set
    #[arg(long, value_enum, default_value = "large")]
    preset: Preset,

    /// JSON configuration file, replaces the preset
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Number of agents
    #[arg(long)]
    agents: Option<usize>,

    /// Number of ticks (frames)
    #[arg(long)]
    ticks: Option<usize>,

    /// Sensor spread and turn angle in degrees
    #[arg(long)]
    sensor_angle: Option<f64>,

    #[arg(long)]
    sensor_distance: Option<f64>,

    /// Per-tick trail multiplier in [0, 1)
    #[arg(long)]
    decay: Option<f64>,

    /// Trail dropped per agent per tick
    #[arg(long)]
    deposit: Option<f64>,

    /// Frame delay in hundredths of a second
    #[arg(long)]
    delay: Option<u16>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output file
    #[arg(short, long, default_value = "physalum.gif")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(Config, PathBuf)> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => match self.preset {
                Preset::Large => Config::large(),
                Preset::Small => Config::small(),
            },
        };

        macro_rules! apply {
            ($($arg:ident => $field:ident),* $(,)?) => {
                $(if let Some(value) = self.$arg {
                    config.$field = value;
                })*
            };
        }
        apply!(
            width => width,
            height => height,
            agents => agent_count,
            ticks => ticks,
            sensor_angle => sensor_angle,
            sensor_distance => sensor_distance,
            decay => decay_factor,
            deposit => deposit_amount,
            delay => frame_delay,
        );
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok((config, self.output))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let started = Instant::now();
    let (config, output) = cli.into_config()?;
    let mut model = Model::new(config).context("invalid configuration")?;
    model.print_configurations();

    let ticks = model.config().ticks;
    let pb = ProgressBar::new(ticks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ticks ({eta})")
            .progress_chars("#>-"),
    );
    let mut snapshots = Vec::with_capacity(ticks);
    model.run_with(|snapshot| {
        snapshots.push(snapshot);
        pb.inc(1);
    });
    pb.finish_and_clear();

    let config = model.config();
    info!("Rendering {} frames...", snapshots.len());
    let frames = render::rasterize_all(&snapshots, config.foreground_index, config.clear_canvas);
    let palette = Palette::grayscale(config.palette_size);

    let mut file = File::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    render::encode_gif(&mut file, &frames, &palette, config.frame_delay)
        .with_context(|| format!("failed to write {}", output.display()))?;
    file.sync_all()
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "Wrote {} in {:.2}s",
        output.display(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
