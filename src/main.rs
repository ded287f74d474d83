use std::io::{self, Stdout, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use env_logger::Env;
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use play_2048::config::Config;
use play_2048::engine::Move;
use play_2048::game::Game;
use play_2048::serialization::SnapshotStore;
use play_2048::style::TileStyle;

const CELL_WIDTH: usize = 8;
const CELL_HEIGHT: usize = 3;
const HELP: &str = "arrows: move   r: reset   q: quit";

#[derive(Debug, Parser)]
#[command(name = "play-2048", about = "Play 2048 in the terminal")]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File for saved progress (overrides the config file)
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Seed for tile placement (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Restore saved progress without asking
    #[arg(long)]
    no_restore_prompt: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut cfg = match &args.config {
        Some(path) => Config::from_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(save) = args.save {
        cfg.snapshot_path = save;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if args.no_restore_prompt {
        cfg.prompt_restore = false;
    }

    let store = SnapshotStore::new(&cfg.snapshot_path);
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut screen = Screen::enter().context("failed to set up the terminal")?;
    let result = run(&mut screen, &cfg, &store, &mut rng);
    drop(screen);
    result
}

fn run(screen: &mut Screen, cfg: &Config, store: &SnapshotStore, rng: &mut StdRng) -> Result<()> {
    let mut game = Game::new(rng);

    if store.exists() {
        let restore = !cfg.prompt_restore || screen.confirm(&game, "Restore the game progress?")?;
        if restore {
            match store.load_best_effort().map(|snapshot| Game::restore(&snapshot)) {
                Some(Ok(saved)) => game = saved,
                Some(Err(e)) => warn!("saved progress not restored: {e}"),
                None => {}
            }
        } else {
            store.clear()?;
        }
    }

    loop {
        if game.is_over() {
            screen.notify(&game, "Game over!")?;
            store.clear()?;
            game.reset(rng);
            continue;
        }

        screen.draw(&game, HELP)?;
        match Command::from(read_key()?) {
            Command::Quit => return Ok(()),
            Command::Move(dir) => {
                if let Some(report) = game.play(dir, rng) {
                    debug!("{dir}: +{} points", report.merged);
                    save(store, &game);
                }
            }
            Command::Reset => {
                let confirmed = !cfg.confirm_reset
                    || screen.confirm(&game, "Are you sure you want to reset the game?")?;
                if confirmed {
                    game.reset(rng);
                    save(store, &game);
                }
            }
            Command::Yes | Command::No | Command::Other => {}
        }
    }
}

fn save(store: &SnapshotStore, game: &Game) {
    if let Err(e) = store.save(&game.snapshot()) {
        warn!("failed to save progress: {e}");
    }
}

enum Command {
    Move(Move),
    Reset,
    Quit,
    Yes,
    No,
    Other,
}

impl From<KeyEvent> for Command {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Up => Command::Move(Move::Up),
            KeyCode::Down => Command::Move(Move::Down),
            KeyCode::Left => Command::Move(Move::Left),
            KeyCode::Right => Command::Move(Move::Right),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char('r') => Command::Reset,
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Command::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') => Command::No,
            _ => Command::Other,
        }
    }
}

fn read_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

/// Alternate-screen raw-mode terminal, restored on drop.
struct Screen {
    out: Stdout,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        info!("terminal ready");
        Ok(Screen { out })
    }

    fn draw(&mut self, game: &Game, footer: &str) -> io::Result<()> {
        queue!(
            self.out,
            Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(format!("2048   score: {}", game.score()))
        )?;
        for (y, row) in game.grid().rows().iter().enumerate() {
            for line in 0..CELL_HEIGHT {
                queue!(self.out, cursor::MoveTo(0, (2 + y * CELL_HEIGHT + line) as u16))?;
                for &value in row {
                    let (bg, fg) = colours(value);
                    let text = if line == CELL_HEIGHT / 2 && value != 0 {
                        format!("{:^width$}", value, width = CELL_WIDTH)
                    } else {
                        " ".repeat(CELL_WIDTH)
                    };
                    queue!(
                        self.out,
                        SetBackgroundColor(bg),
                        SetForegroundColor(fg),
                        Print(text),
                        ResetColor,
                        Print(" ")
                    )?;
                }
            }
        }
        let footer_row = (3 + 4 * CELL_HEIGHT) as u16;
        queue!(self.out, cursor::MoveTo(0, footer_row), Print(footer))?;
        self.out.flush()
    }

    /// Show `question` under the board and wait for y/n.
    fn confirm(&mut self, game: &Game, question: &str) -> io::Result<bool> {
        self.draw(game, &format!("{question} [y/n]"))?;
        loop {
            match Command::from(read_key()?) {
                Command::Yes => return Ok(true),
                Command::No | Command::Quit => return Ok(false),
                _ => {}
            }
        }
    }

    /// Blocking notification: wait for any key.
    fn notify(&mut self, game: &Game, message: &str) -> io::Result<()> {
        self.draw(game, &format!("{message} (press any key)"))?;
        read_key().map(|_| ())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn colours(value: u32) -> (Color, Color) {
    if value == 0 {
        return (Color::DarkGrey, Color::DarkGrey);
    }
    let style = TileStyle::for_value(value);
    let (bg, fg) = (style.bg_grey(), style.text_grey());
    (Color::Rgb { r: bg, g: bg, b: bg }, Color::Rgb { r: fg, g: fg, b: fg })
}
