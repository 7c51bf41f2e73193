//! Skyhop headless simulator
//!
//! Plays sessions with the built-in autopilot and no UI, using the same
//! `Session::step()` as the interactive game. Useful for checking that a
//! tuning change keeps the game playable.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --frames N      Frame cap per run (default: 3600 = one minute at 60 Hz)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --profile NAME  standard or compact (default: standard)
//!   --width N       Play-field width in virtual pixels (default: 1000)
//!   --height N      Play-field height in virtual pixels (default: 600)
//!   --quiet         Only print the final summary line

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skyhop::game::autopilot;
use skyhop::game::{DeviceProfile, Phase, Session, Viewport};

struct SimConfig {
    frames: u64,
    seed: u64,
    runs: u32,
    profile: DeviceProfile,
    width: f64,
    height: f64,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 3_600,
            seed: 42,
            runs: 1,
            profile: DeviceProfile::Standard,
            width: 1000.0,
            height: 600.0,
            quiet: false,
        }
    }
}

fn parse_args() -> anyhow::Result<SimConfig> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = SimConfig::default();
    let mut i = 0;

    while i < args.len() {
        let flag = args[i].as_str();
        let next = args.get(i + 1);
        let value = || next.with_context(|| format!("missing value for {}", flag));
        match flag {
            "--frames" => config.frames = value()?.parse().context("--frames")?,
            "--seed" => config.seed = value()?.parse().context("--seed")?,
            "--runs" => config.runs = value()?.parse().context("--runs")?,
            "--width" => config.width = value()?.parse().context("--width")?,
            "--height" => config.height = value()?.parse().context("--height")?,
            "--profile" => {
                config.profile = match value()?.as_str() {
                    "standard" => DeviceProfile::Standard,
                    "compact" => DeviceProfile::Compact,
                    other => bail!("unknown profile '{}'", other),
                }
            }
            "--quiet" => {
                config.quiet = true;
                i += 1;
                continue;
            }
            other => bail!("unknown argument '{}'", other),
        }
        i += 2;
    }

    if config.width <= 0.0 || config.height <= 0.0 {
        bail!("play field must have a positive area");
    }
    Ok(config)
}

/// Outcome of one autopilot run.
struct RunResult {
    seed: u64,
    score: u32,
    frames: u64,
    crash: Option<&'static str>,
}

fn simulate_run(config: &SimConfig, seed: u64) -> RunResult {
    let viewport = Viewport::new(config.width, config.height);
    let mut session = Session::with_tuning(viewport, config.profile.tuning());
    let mut rng = StdRng::seed_from_u64(seed);

    while session.phase == Phase::Playing && session.frame < config.frames {
        if autopilot::wants_flap(&session) {
            session.request_flap();
        }
        session.step(&mut rng);
    }

    RunResult {
        seed,
        score: session.score,
        frames: session.frame,
        crash: session.crash.map(|cause| cause.describe()),
    }
}

fn main() -> anyhow::Result<()> {
    let config = parse_args()?;
    let mut results = Vec::with_capacity(config.runs as usize);

    for run in 0..config.runs {
        let result = simulate_run(&config, config.seed + run as u64);
        if !config.quiet {
            println!(
                "run {:>3}  seed {:>6}  score {:>4}  frames {:>6}  {}",
                run + 1,
                result.seed,
                result.score,
                result.frames,
                result.crash.unwrap_or("survived")
            );
        }
        results.push(result);
    }

    if results.is_empty() {
        return Ok(());
    }

    let total: u64 = results.iter().map(|r| r.score as u64).sum();
    let best = results.iter().map(|r| r.score).max().unwrap_or(0);
    let survived = results.iter().filter(|r| r.crash.is_none()).count();
    println!(
        "{} runs ({} profile): mean score {:.2}, best {}, survived {}/{}",
        results.len(),
        config.profile.name(),
        total as f64 / results.len() as f64,
        best,
        survived,
        results.len()
    );
    Ok(())
}
