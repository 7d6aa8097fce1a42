//! Terminal front end
//!
//! Keystroke mapping, menus and rendering on top of [crossterm]. The game
//! itself lives in [GameSession]; this module only translates keys into
//! [Command]s and redraws what the session reports as changed.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use crate::grid::{Cell, Point};
use crate::resolver::Direction;
use crate::session::{Command, GameEvent, GameSession, MazeSize, TimerState};

/// Lines above the maze: title, message, status, blank
const HEADER_ROWS: u16 = 4;
/// Each maze square is two terminal columns wide
const CELL_W: u16 = 2;
/// Header refresh interval while the timer runs
const REFRESH: Duration = Duration::from_millis(100);

const MOVE_HELP: &str = "Move with W/A/S/D or arrows. Press 'R' to reset or 'Q' to quit.";
const WON_MESSAGE: &str = "*** CONGRATULATIONS! YOU REACHED THE END (E)! ***";
const SIZE_HELP: &str = "Invalid input. Please enter a number between 10 and 50";

const WALL_COLOR: Color = Color::AnsiValue(238);

/// How a single game ended
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Finish {
    Won,
    Quit,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum MainMenuChoice {
    Play,
    Quit,
}

impl MainMenuChoice {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('1') => Some(MainMenuChoice::Play),
            KeyCode::Char('2' | 'q' | 'Q') | KeyCode::Esc => Some(MainMenuChoice::Quit),
            _ => None,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PostGameChoice {
    PlayNew,
    MainMenu,
    Quit,
}

impl PostGameChoice {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('1') => Some(PostGameChoice::PlayNew),
            KeyCode::Char('2') => Some(PostGameChoice::MainMenu),
            KeyCode::Char('3' | 'q' | 'Q') => Some(PostGameChoice::Quit),
            _ => None,
        }
    }
}

/// Map a keystroke to a game command; unknown keys map to `None`
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let command = match key.code {
        KeyCode::Char('w' | 'W') | KeyCode::Up => Command::Move(Direction::Up),
        KeyCode::Char('s' | 'S') | KeyCode::Down => Command::Move(Direction::Down),
        KeyCode::Char('a' | 'A') | KeyCode::Left => Command::Move(Direction::Left),
        KeyCode::Char('d' | 'D') | KeyCode::Right => Command::Move(Direction::Right),
        KeyCode::Char('r' | 'R') => Command::Reset,
        KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Parse a typed maze size
pub fn parse_size(input: &str) -> anyhow::Result<MazeSize> {
    let size: usize = input.trim().parse().context("Invalid input")?;
    Ok(MazeSize::new(size)?)
}

/// Position and time line of the header
pub fn status_line(session: &GameSession) -> String {
    let time = match session.timer() {
        TimerState::NotStarted => "Time: --.--s (Start moving!)".to_string(),
        TimerState::Running(_) => format!("Time: {:.2}s", secs(session)),
        TimerState::Stopped(_) => format!("Final Time: {:.2}s", secs(session)),
    };
    format!("Current Pos: {} | {}", session.position(), time)
}

fn secs(session: &GameSession) -> f64 {
    session.elapsed().map_or(0.0, |d| d.as_secs_f64())
}

/// Switch the terminal to raw mode on the alternate screen
pub fn setup<W: Write>(out: &mut W) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    out.execute(EnterAlternateScreen)?;
    out.execute(Hide)?;
    Ok(())
}

/// Undo [setup]
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    out.execute(Show)?;
    out.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()
}

enum Input {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Wait for the next key press, or until `timeout` passes
fn next_input(timeout: Option<Duration>) -> io::Result<Input> {
    loop {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(Input::Tick);
            }
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                return Ok(Input::Key(key))
            }
            Event::Resize(..) => return Ok(Input::Resize),
            _ => {}
        }
    }
}

fn next_key() -> io::Result<KeyEvent> {
    loop {
        if let Input::Key(key) = next_input(None)? {
            return Ok(key);
        }
    }
}

/// Run one game until the player wins or quits
pub fn play<W: Write>(out: &mut W, session: &mut GameSession) -> io::Result<Finish> {
    draw_maze(out, session, MOVE_HELP)?;
    loop {
        let timeout = matches!(session.timer(), TimerState::Running(_)).then_some(REFRESH);
        let key = match next_input(timeout)? {
            Input::Key(key) => key,
            Input::Resize => {
                draw_maze(out, session, MOVE_HELP)?;
                continue;
            }
            Input::Tick => {
                draw_header(out, session, MOVE_HELP)?;
                out.flush()?;
                continue;
            }
        };
        let Some(command) = command_for_key(key) else {
            continue;
        };
        match session.apply(command) {
            GameEvent::Rejected => {}
            GameEvent::Moved(_) | GameEvent::Reset => draw_update(out, session, MOVE_HELP)?,
            GameEvent::Won(_) => {
                draw_update(out, session, WON_MESSAGE)?;
                return Ok(Finish::Won);
            }
            GameEvent::Quit => return Ok(Finish::Quit),
        }
    }
}

/// Clear the screen and draw the whole maze with its header
pub fn draw_maze<W: Write>(out: &mut W, session: &GameSession, message: &str) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    draw_header(out, session, message)?;
    let (height, width) = session.dimensions();
    for row in 0..height {
        for col in 0..width {
            draw_square(out, session, Point::new(row, col))?;
        }
    }
    let footer = "+".to_string() + &"-".repeat(width * CELL_W as usize - 2) + "+";
    out.queue(MoveTo(0, HEADER_ROWS + height as u16))?
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print(footer))?
        .queue(SetAttribute(Attribute::Reset))?;
    out.flush()
}

/// Redraw only the squares the player left and entered, plus the header
fn draw_update<W: Write>(out: &mut W, session: &GameSession, message: &str) -> io::Result<()> {
    draw_square(out, session, session.previous_position())?;
    draw_square(out, session, session.position())?;
    draw_header(out, session, message)?;
    out.flush()
}

fn draw_header<W: Write>(out: &mut W, session: &GameSession, message: &str) -> io::Result<()> {
    let (height, width) = session.dimensions();
    let won = message == WON_MESSAGE;
    out.queue(MoveTo(0, 0))?
        .queue(SetAttribute(Attribute::Bold))?
        .queue(Print(format!("+---[ MAZE: {}x{} ]---+", height, width)))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(Clear(ClearType::UntilNewLine))?
        .queue(MoveTo(0, 1))?;
    if won {
        out.queue(SetForegroundColor(Color::Green))?
            .queue(SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(message))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(ResetColor)?
        .queue(Clear(ClearType::UntilNewLine))?
        .queue(MoveTo(0, 2))?
        .queue(Print(status_line(session)))?
        .queue(Clear(ClearType::UntilNewLine))?;
    Ok(())
}

fn draw_square<W: Write>(out: &mut W, session: &GameSession, point: Point) -> io::Result<()> {
    let (color, glyph) = if point == session.position() {
        (Some(Color::Yellow), "@@")
    } else {
        match session.cell(point.row, point.col) {
            Some(Cell::Wall) => (Some(WALL_COLOR), "▓▓"),
            Some(Cell::Start) => (Some(Color::Green), "SS"),
            Some(Cell::End) => (Some(Color::Red), "EE"),
            Some(Cell::Path) | None => (None, "  "),
        }
    };
    out.queue(MoveTo(
        point.col as u16 * CELL_W,
        HEADER_ROWS + point.row as u16,
    ))?;
    if let Some(color) = color {
        out.queue(SetForegroundColor(color))?
            .queue(SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(glyph))?
        .queue(SetAttribute(Attribute::Reset))?
        .queue(ResetColor)?;
    Ok(())
}

fn draw_lines<W: Write>(out: &mut W, top: u16, lines: &[&str]) -> io::Result<()> {
    out.queue(MoveTo(0, top))?
        .queue(Clear(ClearType::FromCursorDown))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(MoveTo(0, top + i as u16))?.queue(Print(line))?;
    }
    out.flush()
}

/// Show the main menu and wait for a valid choice
pub fn main_menu<W: Write>(out: &mut W) -> io::Result<MainMenuChoice> {
    out.queue(Clear(ClearType::All))?;
    draw_lines(
        out,
        0,
        &[
            "+----------------------------------+",
            "|        WELCOME TO THE MAZE       |",
            "+----------------------------------+",
            "| 1. Play Game                     |",
            "| 2. Quit                          |",
            "+----------------------------------+",
            "Enter your choice (1-2): ",
        ],
    )?;
    loop {
        if let Some(choice) = MainMenuChoice::from_key(next_key()?.code) {
            return Ok(choice);
        }
        draw_lines(out, 8, &["Invalid choice, try again."])?;
    }
}

/// Show the menu below a finished maze and wait for a valid choice
pub fn post_game_menu<W: Write>(out: &mut W, session: &GameSession) -> io::Result<PostGameChoice> {
    let top = HEADER_ROWS + session.dimensions().0 as u16 + 2;
    let summary = format!(
        "Reached the end in {} moves, {:.2}s.",
        session.moves(),
        secs(session)
    );
    draw_lines(
        out,
        top,
        &[
            &summary,
            "+---------------------------------+",
            "|    What would you like to do?   |",
            "+---------------------------------+",
            "| 1. Play New Maze                |",
            "| 2. Back to Main Menu            |",
            "| 3. Quit Game                    |",
            "+---------------------------------+",
            "Enter your choice (1-3): ",
        ],
    )?;
    loop {
        if let Some(choice) = PostGameChoice::from_key(next_key()?.code) {
            return Ok(choice);
        }
        draw_lines(
            out,
            top + 10,
            &["Invalid choice. Please enter 1, 2, or 3."],
        )?;
    }
}

/// Ask for a maze size until a valid one is typed; `None` on Escape
pub fn prompt_size<W: Write>(out: &mut W, notice: Option<&str>) -> io::Result<Option<MazeSize>> {
    let question = format!(
        "Enter the desired maze size (N for NxN, min {}, max {}): ",
        MazeSize::MIN,
        MazeSize::MAX
    );
    let mut input = String::new();
    let mut notice = notice.map(str::to_string);
    loop {
        out.queue(Clear(ClearType::All))?;
        draw_lines(
            out,
            0,
            &[
                "--- Random Maze Generator ---",
                "",
                &format!("{}{}", question, input),
                notice.as_deref().unwrap_or(""),
            ],
        )?;
        let key = next_key()?;
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() && input.len() < 4 => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => return Ok(None),
            KeyCode::Enter => match parse_size(&input) {
                Ok(size) => return Ok(Some(size)),
                Err(_) => {
                    notice = Some(SIZE_HELP.to_string());
                    input.clear();
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::grid::Grid;
    use crate::resolver::Direction;
    use crate::session::{Command, GameSession};
    use crate::terminal::{
        command_for_key, parse_size, status_line, MainMenuChoice, PostGameChoice,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wasd_and_arrows_move() {
        for (code, direction) in [
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('S'), Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('D'), Direction::Right),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ] {
            assert_eq!(command_for_key(key(code)), Some(Command::Move(direction)));
        }
    }

    #[test]
    fn control_keys() {
        assert_eq!(command_for_key(key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(command_for_key(key(KeyCode::Char('Q'))), Some(Command::Quit));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(command_for_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn menu_choices() {
        assert_eq!(MainMenuChoice::from_key(KeyCode::Char('1')), Some(MainMenuChoice::Play));
        assert_eq!(MainMenuChoice::from_key(KeyCode::Char('2')), Some(MainMenuChoice::Quit));
        assert_eq!(MainMenuChoice::from_key(KeyCode::Char('5')), None);
        assert_eq!(
            PostGameChoice::from_key(KeyCode::Char('1')),
            Some(PostGameChoice::PlayNew)
        );
        assert_eq!(
            PostGameChoice::from_key(KeyCode::Char('2')),
            Some(PostGameChoice::MainMenu)
        );
        assert_eq!(PostGameChoice::from_key(KeyCode::Char('3')), Some(PostGameChoice::Quit));
        assert_eq!(PostGameChoice::from_key(KeyCode::Char('9')), None);
    }

    #[test]
    fn typed_sizes() {
        assert_eq!(parse_size("10").unwrap().get(), 11);
        assert_eq!(parse_size(" 25 ").unwrap().get(), 25);
        assert!(parse_size("").is_err());
        assert!(parse_size("9").is_err());
        assert!(parse_size("51").is_err());
    }

    #[test]
    fn status_line_follows_timer() {
        let grid = Grid::parse_emojis("🏃🟩❎").unwrap();
        let mut session = GameSession::from_grid(grid);

        assert_eq!(
            status_line(&session),
            "Current Pos: (0, 0) | Time: --.--s (Start moving!)"
        );
        session.apply_move(Direction::Right);
        assert!(status_line(&session).starts_with("Current Pos: (0, 1) | Time: "));
        session.apply_move(Direction::Right);
        assert!(status_line(&session).starts_with("Current Pos: (0, 2) | Final Time: "));
    }
}
