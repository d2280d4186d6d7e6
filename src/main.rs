use anyhow::{ensure, Context, Result};
use std::time::Duration;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use traffic_light_sim::simulation::{Scenario, SimStreet, StreetConfig};

/// Log filter used when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "warn,traffic_light_sim=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    /// Green/red light, seeded arrivals per tick
    TwoPhase,
    /// Green/yellow/red light, arrivals per second
    ThreePhase,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::TwoPhase => Scenario::TwoPhase,
            ScenarioArg::ThreePhase => Scenario::ThreePhase,
        }
    }
}

#[derive(Parser)]
#[command(name = "traffic_light_sim")]
#[command(about = "Cars on a one-way street passing a single traffic light")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Street and light preset
    #[arg(long, value_enum, default_value_t = ScenarioArg::ThreePhase)]
    scenario: ScenarioArg,

    /// Override the arrival rate (per tick or cars per second, depending on the scenario)
    #[arg(long)]
    arrival_rate: Option<f32>,

    /// Seed for reproducible arrivals
    #[arg(long)]
    seed: Option<u64>,

    /// Override the street length in meters
    #[arg(long)]
    road_length: Option<f32>,

    /// Override the light position in meters from the entrance
    #[arg(long)]
    light_position: Option<f32>,

    /// Override the car speed in meters per second
    #[arg(long)]
    speed: Option<f32>,

    /// Override the time step per tick in seconds
    #[arg(long)]
    time_step: Option<f32>,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "600")]
    ticks: u64,

    /// Redraw the street every tick in real time (headless mode)
    #[arg(long)]
    animate: bool,

    /// Simulated seconds between progress reports (headless mode)
    #[arg(long, default_value = "1.0")]
    report_every: f32,
}

impl Cli {
    /// Scenario preset with command line overrides applied
    fn street_config(&self) -> StreetConfig {
        let mut config = StreetConfig::from_scenario(self.scenario.into());
        if let Some(rate) = self.arrival_rate {
            config.arrivals = config.arrivals.with_rate(rate);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(road_length) = self.road_length {
            config.road_length = road_length;
        }
        if let Some(light_position) = self.light_position {
            config.light_position = light_position;
        }
        if let Some(speed) = self.speed {
            config.car_speed = speed;
        }
        if let Some(time_step) = self.time_step {
            config.time_step = time_step;
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    let result = if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(&cli)
        }
        #[cfg(not(feature = "ui"))]
        {
            Err(anyhow::anyhow!(
                "UI feature is not enabled. Rebuild with --features ui"
            ))
        }
    } else {
        env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();
        run_headless(&cli)
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    ensure!(
        cli.report_every.is_finite() && cli.report_every > 0.0,
        "Report interval must be positive (got {})",
        cli.report_every
    );

    let mut street = SimStreet::new(cli.street_config())?;
    let time_step = street.config().time_step;

    println!("Running traffic light simulation in headless mode...");
    println!("Ticks: {}, Step: {}s", cli.ticks, time_step);

    let frame_delay = if cli.animate {
        Some(Duration::try_from_secs_f32(time_step).with_context(|| {
            format!("Time step {}s is too long to animate", time_step)
        })?)
    } else {
        None
    };

    let ticks_per_report = if cli.animate {
        1
    } else {
        ((cli.report_every / time_step).round() as u64).max(1)
    };
    println!();

    println!("Initial state:");
    street.print_summary();
    street.draw_street();
    println!();

    let mut tick = 0;
    while tick < cli.ticks {
        let ticks_to_run = ticks_per_report.min(cli.ticks - tick);
        street.run_ticks(ticks_to_run);
        tick += ticks_to_run;

        if let Some(delay) = frame_delay {
            // Clear the terminal and redraw in place
            print!("\x1B[2J\x1B[H");
            street.draw_street();
            std::thread::sleep(delay);
        } else {
            println!(
                "--- After tick {} ({:.1}s simulated time) ---",
                tick,
                street.time()
            );
            street.print_summary();
            street.draw_street();
            println!();
        }
    }

    println!("=== Final State ===");
    street.print_summary();
    street.draw_street();

    info!("Ran {} ticks", tick);
    street.log_report();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(cli: &Cli) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use traffic_light_sim::ui::{SimStreetResource, TrafficLightUIPlugin};

    let street = SimStreet::new(cli.street_config())?;
    let time_step = street.config().time_step;

    println!("Starting Traffic Light Sim UI...");
    println!();
    println!("Controls:");
    println!("  Space       - Pause / resume");
    println!("  Enter       - Add a car at the entrance");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,traffic_light_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Traffic Light Sim".into(),
                        resolution: (1280, 480).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        // One simulation step per frame interval, as long as the step itself
        .insert_resource(Time::<Fixed>::from_seconds(time_step as f64))
        .insert_resource(SimStreetResource(street))
        .add_plugins(TrafficLightUIPlugin)
        .run();

    Ok(())
}
