use anyhow::Context;
use crossterm::event;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyhop::game::{ProfileSelection, Session};
use skyhop::input::{map_event, GameInput};
use skyhop::{logging, ui, App, Settings};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Default)]
struct Cli {
    config: Option<PathBuf>,
    seed: Option<u64>,
    profile: Option<ProfileSelection>,
}

fn print_help() {
    println!("Skyhop - terminal side-scrolling avoidance game\n");
    println!("Usage: skyhop [options]\n");
    println!("Options:");
    println!("  --seed N          Seed obstacle placement for a repeatable run");
    println!("  --config PATH     Read settings from PATH instead of the default location");
    println!("  --profile NAME    auto, standard or compact");
    println!("  --version         Show version information");
    println!("  --help            Show this help message");
    println!("\nControls: Space/W/Up flap, R restart, Q quit");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'skyhop --help' for usage.");
    std::process::exit(1);
}

fn arg_value(args: &[String], i: usize) -> &str {
    match args.get(i + 1) {
        Some(value) => value,
        None => usage_error(&format!("Missing value for {}", args[i])),
    }
}

fn parse_args() -> Cli {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = Cli::default();
    let mut i = 0;

    while i < args.len() {
        let value = |i: usize| arg_value(&args, i);

        match args[i].as_str() {
            "--seed" => {
                let raw = value(i);
                cli.seed = Some(
                    raw.parse()
                        .unwrap_or_else(|_| usage_error(&format!("Invalid seed: {}", raw))),
                );
                i += 1;
            }
            "--config" => {
                cli.config = Some(PathBuf::from(value(i)));
                i += 1;
            }
            "--profile" => {
                cli.profile = Some(value(i).parse().unwrap_or_else(|e: String| usage_error(&e)));
                i += 1;
            }
            "--version" | "-v" => {
                println!("skyhop {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    cli
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Settings::default_path()?,
    };
    Settings::resolve(&path, |key| std::env::var(key).ok(), cli.profile, cli.seed)
        .with_context(|| format!("loading settings from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args();
    let settings = load_settings(&cli)?;

    match logging::init() {
        Ok(path) => info!("logging to {}", path.display()),
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    info!(
        "skyhop {} starting, profile {}",
        env!("CARGO_PKG_VERSION"),
        settings.profile
    );
    log::debug!("settings: {:?}", settings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &settings);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

fn run(terminal: &mut Tui, settings: &Settings) -> anyhow::Result<()> {
    let cell = settings.cell_size();
    let size = terminal.size()?;
    let viewport = ui::viewport_for(size, cell);

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let session =
        Session::new(viewport, settings.tuning_source()).with_frame_ms(settings.frame_ms);
    let mut app = App::new(session, rng);

    let frame_budget = Duration::from_millis(settings.frame_ms);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, &app, cell))?;

        let timeout = frame_budget.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match map_event(&event::read()?) {
                Some(GameInput::Resize { cols, rows }) => {
                    app.resize(ui::viewport_for(Rect::new(0, 0, cols, rows), cell));
                }
                Some(input) => app.handle_input(input),
                None => {}
            }
        }

        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        if elapsed_ms > 0 {
            app.tick(elapsed_ms);
            last_tick += Duration::from_millis(elapsed_ms);
        }
    }

    info!("best score this run: {}", app.best_score);
    Ok(())
}
