use rand::seq::SliceRandom;
use rand::Rng;

pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One grid cell. A `true` flag means the wall on that side is present.
/// Walls are shared: a cell's flag toward a neighbor always equals the
/// neighbor's flag back toward it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
    visited: bool,
}

impl Cell {
    fn walled() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
            visited: false,
        }
    }

    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn clear_wall(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.top = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveResult {
    pub moved: bool,
    pub at_finish: bool,
}

/// Owns the maze topology and the player state. Frontends only read the
/// grid and positions and call the mutating operations; any snapshot they
/// take is stale after `generate`/`resize`.
pub struct MazeEngine {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
    player: Pos,
    finish: Pos,
}

impl MazeEngine {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, &mut rand::thread_rng())
    }

    pub fn with_rng(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        let mut engine = Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            player: Pos { x: 0, y: 0 },
            finish: Pos { x: 0, y: 0 },
        };
        engine.generate_with(width, height, rng);
        engine
    }

    /// Builds a fresh maze via randomized recursive backtracking and resets
    /// the player to the top-left and the finish to the bottom-right corner.
    /// Out-of-range dimensions are clamped, never rejected.
    pub fn generate(&mut self, width: usize, height: usize) {
        self.generate_with(width, height, &mut rand::thread_rng());
    }

    pub fn generate_with(&mut self, width: usize, height: usize, rng: &mut impl Rng) {
        self.width = width.clamp(MIN_SIZE, MAX_SIZE);
        self.height = height.clamp(MIN_SIZE, MAX_SIZE);
        self.grid = vec![vec![Cell::walled(); self.width]; self.height];
        self.player = Pos { x: 0, y: 0 };
        self.finish = Pos {
            x: self.width - 1,
            y: self.height - 1,
        };
        self.carve_from(0, 0, rng);
    }

    /// Full regeneration at the new size; nothing of the old maze survives.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.generate(width, height);
    }

    pub fn resize_with(&mut self, width: usize, height: usize, rng: &mut impl Rng) {
        self.generate_with(width, height, rng);
    }

    // Depth-first carve. Plain recursion is fine at the 20x20 cap.
    fn carve_from(&mut self, x: usize, y: usize, rng: &mut impl Rng) {
        self.grid[y][x].visited = true;

        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);

        for dir in dirs {
            let (dx, dy) = dir.delta();
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            if !self.in_bounds(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if self.grid[ny][nx].visited {
                continue;
            }
            // Open the shared wall from both sides before descending.
            self.grid[y][x].clear_wall(dir);
            self.grid[ny][nx].clear_wall(dir.opposite());
            self.carve_from(nx, ny, rng);
        }
    }

    fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Attempts to move the player one cell. A move blocked by a wall or the
    /// grid boundary is an expected outcome reported via `moved: false`, not
    /// an error.
    pub fn move_player(&mut self, dir: Direction) -> MoveResult {
        let (dx, dy) = dir.delta();
        let nx = self.player.x as isize + dx;
        let ny = self.player.y as isize + dy;
        if !self.in_bounds(nx, ny) || self.grid[self.player.y][self.player.x].has_wall(dir) {
            return MoveResult {
                moved: false,
                at_finish: false,
            };
        }
        self.player = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        MoveResult {
            moved: true,
            at_finish: self.player == self.finish,
        }
    }

    pub fn is_at_finish(&self) -> bool {
        self.player == self.finish
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid[y][x]
    }

    pub fn grid(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn finish(&self) -> Pos {
        self.finish
    }
}
