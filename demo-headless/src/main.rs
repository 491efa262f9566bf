use clap::Parser;
use rain_cloth_core::{
    run_with, FixedStep, Platform, Renderer, Rgba, ScreenPoint, Seconds, SimulationConfig,
    SimulationContext, WallClock,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Rain and cloth simulation without a window
#[derive(Parser, Debug)]
#[command(name = "rain-cloth-demo")]
#[command(about = "Headless rain and cloth simulation", long_about = None)]
struct Args {
    /// Simulation duration in seconds
    #[arg(short, long, default_value_t = 30.0)]
    duration: f64,

    /// Fixed tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Use real elapsed time between ticks instead of a fixed tick
    #[arg(long)]
    realtime: bool,

    /// Seed for the random source (entropy-seeded when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file; missing fields take their defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Report interval in seconds
    #[arg(short, long, default_value_t = 5.0)]
    report_interval: f64,
}

impl Args {
    /// Positive tick and report interval, finite non-negative duration
    fn is_valid(&self) -> bool {
        self.dt > 0.0
            && self.duration >= 0.0
            && self.duration.is_finite()
            && self.report_interval > 0.0
    }
}

/// Counts what a windowed renderer would have drawn
struct CountingRenderer {
    width: u32,
    height: u32,
    frames: u64,
    points: u64,
    lines: u64,
    off_surface: u64,
}

impl CountingRenderer {
    fn new(width: u32, height: u32) -> Self {
        CountingRenderer {
            width,
            height,
            frames: 0,
            points: 0,
            lines: 0,
            off_surface: 0,
        }
    }
}

impl Renderer for CountingRenderer {
    fn clear(&mut self, _color: Rgba) {}

    fn draw_point(&mut self, at: ScreenPoint, _color: Rgba) {
        self.points += 1;
        if !at.is_within(self.width, self.height) {
            self.off_surface += 1;
        }
    }

    fn draw_line(&mut self, _from: ScreenPoint, _to: ScreenPoint, _color: Rgba) {
        self.lines += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

fn load_config(path: Option<&str>) -> Result<SimulationConfig, String> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path);
            SimulationConfig::load(path).map_err(|e| e.to_string())
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Rain & Cloth Simulation Demo ===\n");

    if !args.is_valid() {
        error!("--dt and --report-interval must be positive and --duration finite and non-negative");
        return ExitCode::FAILURE;
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let context = match args.seed {
        Some(seed) => SimulationContext::seeded(config, seed),
        None => SimulationContext::from_entropy(config),
    };
    let mut sim = match context {
        Ok(sim) => sim,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let duration = Seconds::new(args.duration);
    let mut platform: Box<dyn Platform> = if args.realtime {
        println!("Stepping with wall-clock time for {}", duration);
        Box::new(WallClock::start(Some(Duration::from_secs_f64(args.duration))))
    } else {
        println!("Stepping {} per tick for {}", Seconds::new(args.dt), duration);
        Box::new(FixedStep::covering(Seconds::new(args.dt), duration))
    };

    let render = &sim.config().render;
    println!(
        "Surface {}x{} (window {}x{}), cloth {}x{}\n",
        render.surface_width,
        render.surface_height,
        render.surface_width * render.window_scale,
        render.surface_height * render.window_scale,
        sim.cloth().cols(),
        sim.cloth().rows()
    );
    let mut renderer = CountingRenderer::new(render.surface_width, render.surface_height);

    println!("Time(s) | Drops | Wind (x, z)    | Cloth low | Stretch");
    println!("--------|-------|----------------|-----------|--------");

    let mut next_report = 0.0;
    let summary = run_with(&mut sim, platform.as_mut(), &mut renderer, |sim, report| {
        if *report.clock >= next_report {
            let stats = sim.stats();
            println!(
                "{:7.1} | {:5} | ({:5.2}, {:5.2}) | {:9.2} | {:7.2}",
                *stats.clock,
                stats.live_drops,
                stats.wind.x,
                stats.wind.z,
                stats.cloth_lowest_point,
                stats.cloth_max_stretch
            );
            next_report += args.report_interval;
        }
    });

    let stats = sim.stats();
    println!("\n=== Simulation Complete ===");
    println!("Ticks: {}, simulated time: {}", stats.ticks, stats.clock);
    println!(
        "Drops spawned: {}, landed: {}, peak airborne: {}",
        stats.spawned_drops, stats.culled_drops, summary.peak_drops
    );
    println!(
        "Wind changes: {}, last at {}",
        summary.wind_changes, stats.last_wind_change
    );
    println!(
        "Frames: {}, points: {} ({} off-surface), lines: {}",
        renderer.frames, renderer.points, renderer.off_surface, renderer.lines
    );

    ExitCode::SUCCESS
}
