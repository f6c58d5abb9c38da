mod build_info;
mod constants;
mod game;
mod input;
mod scores;
mod ui;

use constants::FRAME_MS;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use game::{reset_game, start_game, tick_game, toggle_pause, GameEvent, GamePhase, GameWorld};
use input::PointerSampler;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "scamper {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Scamper - Terminal Cat Side-Scroller\n");
                println!("Usage: scamper\n");
                println!("Steer the cat with your mouse. Dodge the scratching posts.");
                println!("\nOptions:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'scamper --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal);

    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}

fn run_game(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut world = GameWorld::new(scores::load_high_score().best_half_points);
    let mut sampler = PointerSampler::new();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            ui::game_scene::render(frame, frame.size(), &world);
        })?;

        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Esc => toggle_pause(&mut world),
                    KeyCode::Char(' ') | KeyCode::Enter => start_game(&mut world),
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        if world.phase == GamePhase::GameOver {
                            reset_game(&mut world);
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    match mouse.kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            sampler.record_cell(mouse.column, mouse.row, size.width, size.height);
                        }
                        MouseEventKind::Down(_) => {
                            sampler.record_cell(mouse.column, mouse.row, size.width, size.height);
                            match world.phase {
                                GamePhase::Ready => start_game(&mut world),
                                GamePhase::GameOver => reset_game(&mut world),
                                GamePhase::Active => {}
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        let dt_ms = last_tick.elapsed().as_millis() as u64;
        last_tick = Instant::now();

        let events = tick_game(&mut world, sampler.latest(), dt_ms, &mut rng);
        for event in events {
            if let GameEvent::NewHighScore { best_half_points } = event {
                // A failed save never interrupts play.
                let _ = scores::save_high_score(best_half_points);
            }
        }
    }
}
