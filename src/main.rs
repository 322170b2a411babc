use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use maze_game::{Direction, MazeEngine, Pos};

const DEFAULT_MAZE_W: usize = 8;
const DEFAULT_MAZE_H: usize = 8;
const CELL_W: usize = 2;
const CONFETTI_CHARS: [char; 4] = ['*', 'o', '+', '.'];
const CONFETTI_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Finish,
    Wall,
    Floor,
}

#[derive(Clone, Copy, PartialEq)]
struct TermCell {
    glyph: Glyph,
    color: Color,
}

const FLOOR: TermCell = TermCell {
    glyph: Glyph::Floor,
    color: Color::Reset,
};

struct Renderer {
    last: Vec<TermCell>,
    last_hud: String,
    needs_full: bool,
    banner_drawn: bool,
    origin_x: u16,
    origin_y: u16,
    glyph_w: usize,
    glyph_h: usize,
}

impl Renderer {
    fn new(glyph_w: usize, glyph_h: usize) -> Self {
        Self {
            last: vec![FLOOR; glyph_w * glyph_h],
            last_hud: String::new(),
            needs_full: true,
            banner_drawn: false,
            origin_x: 0,
            origin_y: 1,
            glyph_w,
            glyph_h,
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let (start_w, start_h) = read_size_settings();
    let mut engine = MazeEngine::new(start_w, start_h);
    let mut steps: u32 = 0;
    let mut solved = false;
    let mut muted = false;
    let (gw, gh) = glyph_size(&engine);
    let mut renderer = Renderer::new(gw, gh);

    loop {
        render(stdout, &engine, steps, solved, muted, &mut renderer, &mut rng)?;

        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('m') => muted = !muted,
                    KeyCode::Char('n') => {
                        let (w, h) = (engine.width(), engine.height());
                        rebuild(&mut engine, &mut renderer, &mut steps, &mut solved, w, h);
                    }
                    KeyCode::Char('[') => {
                        let (w, h) = (engine.width().saturating_sub(1), engine.height());
                        rebuild(&mut engine, &mut renderer, &mut steps, &mut solved, w, h);
                    }
                    KeyCode::Char(']') => {
                        let (w, h) = (engine.width() + 1, engine.height());
                        rebuild(&mut engine, &mut renderer, &mut steps, &mut solved, w, h);
                    }
                    KeyCode::Char('-') => {
                        let (w, h) = (engine.width(), engine.height().saturating_sub(1));
                        rebuild(&mut engine, &mut renderer, &mut steps, &mut solved, w, h);
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        let (w, h) = (engine.width(), engine.height() + 1);
                        rebuild(&mut engine, &mut renderer, &mut steps, &mut solved, w, h);
                    }
                    other => {
                        if let Some(dir) = dir_for_key(other) {
                            if !solved {
                                let result = engine.move_player(dir);
                                if result.moved {
                                    steps += 1;
                                } else if !muted {
                                    // Bumped a wall or the boundary.
                                    stdout.execute(Print('\u{7}'))?;
                                }
                                if result.at_finish {
                                    solved = true;
                                }
                            }
                        }
                    }
                }
            }
            Event::Resize(_, _) => renderer.needs_full = true,
            _ => {}
        }
    }
}

fn read_size_settings() -> (usize, usize) {
    // The engine clamps to its supported range, so raw values are fine here.
    let width = std::env::var("MAZE_WIDTH")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAZE_W);
    let height = std::env::var("MAZE_HEIGHT")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAZE_H);
    (width, height)
}

fn dir_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

fn rebuild(
    engine: &mut MazeEngine,
    renderer: &mut Renderer,
    steps: &mut u32,
    solved: &mut bool,
    width: usize,
    height: usize,
) {
    engine.resize(width, height);
    *steps = 0;
    *solved = false;
    let (gw, gh) = glyph_size(engine);
    *renderer = Renderer::new(gw, gh);
}

// Glyph grid: cells at odd/odd coordinates, wall segments between them,
// posts at even/even coordinates.
fn glyph_size(engine: &MazeEngine) -> (usize, usize) {
    (engine.width() * 2 + 1, engine.height() * 2 + 1)
}

fn render(
    stdout: &mut Stdout,
    engine: &MazeEngine,
    steps: u32,
    solved: bool,
    muted: bool,
    renderer: &mut Renderer,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let (gw, gh) = glyph_size(engine);
    // One HUD row above the maze, two celebration rows below it.
    let needed_w = (gw * CELL_W) as u16;
    let needed_h = (gh + 3) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
        renderer.last_hud.clear();
        renderer.banner_drawn = false;
    }

    let hud = format!(
        "Steps: {}  Maze: {}x{}  Sound: {}  (arrows/wasd move, n new, [/] width, -/+ height, m mute, q quit)",
        steps,
        engine.width(),
        engine.height(),
        if muted { "off" } else { "on" },
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for gy in 0..gh {
        for gx in 0..gw {
            let cell = glyph_at(engine, gx, gy);
            let idx = gy * gw + gx;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_glyph(stdout, renderer, gx, gy, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    if solved && !renderer.banner_drawn {
        draw_celebration(stdout, renderer, steps, rng)?;
        renderer.banner_drawn = true;
    }

    stdout.flush()?;
    Ok(())
}

fn glyph_at(engine: &MazeEngine, gx: usize, gy: usize) -> TermCell {
    match (gx % 2 == 1, gy % 2 == 1) {
        (true, true) => {
            let pos = Pos {
                x: gx / 2,
                y: gy / 2,
            };
            if engine.player() == pos {
                TermCell {
                    glyph: Glyph::Player,
                    color: Color::Yellow,
                }
            } else if engine.finish() == pos {
                TermCell {
                    glyph: Glyph::Finish,
                    color: Color::Green,
                }
            } else {
                FLOOR
            }
        }
        (false, true) => wall_or_floor(vertical_wall(engine, gx, gy)),
        (true, false) => wall_or_floor(horizontal_wall(engine, gx, gy)),
        (false, false) => wall_or_floor(post_is_wall(engine, gx, gy)),
    }
}

fn wall_or_floor(wall: bool) -> TermCell {
    if wall {
        TermCell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        }
    } else {
        FLOOR
    }
}

// Wall segment between horizontally adjacent cells; gx even, gy odd.
fn vertical_wall(engine: &MazeEngine, gx: usize, gy: usize) -> bool {
    let cy = gy / 2;
    if gx / 2 == engine.width() {
        engine.cell(engine.width() - 1, cy).right
    } else {
        engine.cell(gx / 2, cy).left
    }
}

// Wall segment between vertically adjacent cells; gx odd, gy even.
fn horizontal_wall(engine: &MazeEngine, gx: usize, gy: usize) -> bool {
    let cx = gx / 2;
    if gy / 2 == engine.height() {
        engine.cell(cx, engine.height() - 1).bottom
    } else {
        engine.cell(cx, gy / 2).top
    }
}

// A post is drawn whenever any of its four neighboring segments is a wall.
fn post_is_wall(engine: &MazeEngine, gx: usize, gy: usize) -> bool {
    let (gw, gh) = glyph_size(engine);
    (gx > 0 && horizontal_wall(engine, gx - 1, gy))
        || (gx + 1 < gw && horizontal_wall(engine, gx + 1, gy))
        || (gy > 0 && vertical_wall(engine, gx, gy - 1))
        || (gy + 1 < gh && vertical_wall(engine, gx, gy + 1))
}

fn draw_glyph(
    stdout: &mut Stdout,
    renderer: &Renderer,
    gx: usize,
    gy: usize,
    cell: TermCell,
) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Player => ("😃", cell.color),
        Glyph::Finish => ("🏁", cell.color),
        Glyph::Wall => ("██", cell.color),
        Glyph::Floor => ("  ", cell.color),
    };
    let x_pos = renderer.origin_x + (gx * CELL_W) as u16;
    let y_pos = renderer.origin_y + gy as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn draw_celebration(
    stdout: &mut Stdout,
    renderer: &Renderer,
    steps: u32,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let confetti_y = renderer.origin_y + renderer.glyph_h as u16;
    stdout.queue(MoveTo(renderer.origin_x, confetti_y))?;
    for _ in 0..renderer.glyph_w * CELL_W {
        let color = *CONFETTI_COLORS.choose(rng).unwrap_or(&Color::White);
        let ch = *CONFETTI_CHARS.choose(rng).unwrap_or(&'*');
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(ch))?;
    }
    stdout.queue(ResetColor)?;

    stdout.queue(MoveTo(renderer.origin_x, confetti_y + 1))?;
    stdout.queue(SetForegroundColor(Color::Yellow))?;
    stdout.queue(Print(format!(
        "You reached the finish in {} steps! (n for a new maze, q to quit)",
        steps
    )))?;
    stdout.queue(ResetColor)?;
    Ok(())
}
