//! Bullet Patterns headless entry point
//!
//! Runs a pattern through the fixed-step loop with autopilot input and logs
//! what a renderer would draw. Window/input hosting lives outside this crate.
//!
//! Usage: `bullet-patterns [preset | config.json] [ticks] [seed]`

use bullet_patterns::consts::*;
use bullet_patterns::render::RenderFrame;
use bullet_patterns::sim::{Autopilot, SimState, tick};
use bullet_patterns::{ConfigError, PatternPreset, SimConfig};

/// Default run length: one minute of simulated time
const DEFAULT_TICKS: u64 = 60 * 60;
const DEFAULT_SEED: u64 = 0x5eed;

/// Host loop holding the simulation and its collaborators
struct Host {
    state: SimState,
    autopilot: Autopilot,
    frame: RenderFrame,
    accumulator: f32,
}

impl Host {
    fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: SimState::new(config)?,
            autopilot: Autopilot::new(seed),
            frame: RenderFrame::default(),
            accumulator: 0.0,
        })
    }

    /// Run simulation ticks for `dt` seconds of host time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            // Fresh snapshot every substep, so one-shots never repeat
            let input = self.autopilot.next_input(&self.state);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Capture the frame a renderer would draw
    fn render(&mut self) {
        self.frame.fill(&self.state);
    }

    fn log_summary(&self) {
        let state = &self.state;
        log::info!(
            "t={:>5} active={:>4}/{} fired={} reclaimed={} overwrites={} skipped={} targets={} angle={}",
            state.time_ticks,
            self.frame.projectiles.len(),
            state.pool.capacity(),
            state.shots_fired,
            state.reclaimed,
            state.pool.overwrites(),
            state.shots_skipped,
            self.frame.targets.len(),
            state
                .emitter
                .angle_deg()
                .map_or_else(|| "-".to_string(), |a| format!("{:.1}", a)),
        );
    }
}

fn parse_config(arg: Option<&str>) -> Result<SimConfig, ConfigError> {
    match arg {
        None => Ok(SimConfig::default()),
        Some(path) if path.ends_with(".json") => SimConfig::load(path),
        Some(name) => PatternPreset::from_str(name)
            .map(SimConfig::from_preset)
            .ok_or_else(|| ConfigError::Parse(format!("unknown preset '{}'", name))),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bullet Patterns (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_config(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            let names: Vec<&str> = PatternPreset::ALL.iter().map(|p| p.as_str()).collect();
            log::error!("Presets: {}", names.join(", "));
            std::process::exit(2);
        }
    };
    let ticks = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TICKS);
    let seed = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SEED);

    let mut host = match Host::new(config, seed) {
        Ok(host) => host,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    log::info!(
        "Running {} pattern for {} ticks (seed {})",
        host.state.config.preset.as_str(),
        ticks,
        host.autopilot.seed()
    );

    while host.state.time_ticks < ticks {
        host.update(SIM_DT);
        host.render();
        if host.state.time_ticks % u64::from(FRAME_PERIOD) == 0 {
            host.log_summary();
        }
    }

    log::info!("Done after {} ticks", host.state.time_ticks);
}
