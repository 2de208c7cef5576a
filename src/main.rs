use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use quizbank::{
    CellMeasure, Config, Control, EngineState, LayoutMetrics, Mode, QuestionStore, QuizError,
    Viewport, config::DEFAULT_CONFIG_FILE, draw_quiz, handle_event, logger,
    store::DEFAULT_BANK_FILE,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

const TICK: Duration = Duration::from_millis(100);

/// Multiple-choice quiz over a JSON question bank.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Question bank file
    #[arg(long, default_value = DEFAULT_BANK_FILE)]
    bank: PathBuf,

    /// Settings file, created on exit if missing
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Debug log file
    #[arg(long, default_value = logger::DEFAULT_LOG_FILE)]
    log: PathBuf,

    /// Selection mode at startup
    #[arg(long, value_enum, default_value_t = Mode::Arcade)]
    mode: Mode,
}

/// Raw mode, alternate screen and mouse capture, undone on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

fn run(engine: &mut EngineState) -> Result<(), QuizError> {
    let mut guard = TerminalGuard::enter()?;

    loop {
        engine.tick(Instant::now())?;

        let mut page = None;
        guard.terminal.draw(|f| {
            let area = f.area();
            let viewport = Viewport::new(u32::from(area.width), u32::from(area.height));
            let layout = engine.layout(viewport, LayoutMetrics::cells(viewport), &CellMeasure);
            draw_quiz(f, engine, &layout);
            page = Some(layout);
        })?;
        let Some(page) = page else {
            continue;
        };

        if event::poll(TICK)? {
            let event = event::read()?;
            if handle_event(engine, event, &page, Instant::now())? == Control::Quit {
                break;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(&args.log);
    logger::log(&format!("Starting with bank {}", args.bank.display()));

    let config = Config::load(&args.config);
    let store = match QuestionStore::load(&args.bank) {
        Ok(store) => store,
        Err(e) => {
            logger::log(&format!("Cannot start: {}", e));
            eprintln!("quizbank: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rng = StdRng::from_entropy();
    let mut engine = match EngineState::start(store, config, Some(args.config), args.mode, rng) {
        Ok(engine) => engine,
        Err(e) => {
            logger::log(&format!("Cannot start: {}", e));
            eprintln!("quizbank: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&mut engine);
    let saved = engine.shutdown();

    let mut code = ExitCode::SUCCESS;
    for e in [result.err(), saved.err()].into_iter().flatten() {
        logger::log(&format!("Exiting with error: {}", e));
        eprintln!("quizbank: {}", e);
        code = ExitCode::FAILURE;
    }
    code
}
