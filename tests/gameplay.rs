//! End-to-end checks against the public engine API, without a fixed seed:
//! every freshly generated maze must be playable to completion.

use maze_game::{Direction, MazeEngine, Pos, MAX_SIZE, MIN_SIZE};
use std::collections::VecDeque;

fn shortest_path(engine: &MazeEngine) -> Vec<Direction> {
    let (w, h) = (engine.width(), engine.height());
    let start = engine.player();
    let goal = engine.finish();
    let mut prev: Vec<Vec<Option<(Pos, Direction)>>> = vec![vec![None; w]; h];
    let mut seen = vec![vec![false; w]; h];
    let mut queue = VecDeque::new();
    seen[start.y][start.x] = true;
    queue.push_back(start);
    while let Some(pos) = queue.pop_front() {
        for dir in Direction::ALL {
            if engine.cell(pos.x, pos.y).has_wall(dir) {
                continue;
            }
            let (dx, dy) = dir.delta();
            let next = Pos {
                x: (pos.x as isize + dx) as usize,
                y: (pos.y as isize + dy) as usize,
            };
            if !seen[next.y][next.x] {
                seen[next.y][next.x] = true;
                prev[next.y][next.x] = Some((pos, dir));
                queue.push_back(next);
            }
        }
    }

    let mut path = Vec::new();
    let mut pos = goal;
    while pos != start {
        let (from, dir) = prev[pos.y][pos.x].expect("maze must be solvable");
        path.push(dir);
        pos = from;
    }
    path.reverse();
    path
}

#[test]
fn every_generated_maze_is_playable_to_the_finish() {
    for (w, h) in [(2, 2), (8, 8), (20, 20), (3, 17)] {
        let mut engine = MazeEngine::new(w, h);
        let path = shortest_path(&engine);
        let mut steps = 0;
        let mut wins = 0;
        for dir in path {
            let result = engine.move_player(dir);
            assert!(result.moved);
            steps += 1;
            if result.at_finish {
                wins += 1;
            }
        }
        assert_eq!(wins, 1, "{}x{}", w, h);
        assert!(engine.is_at_finish());
        // The shortest route spans at least the two grid dimensions.
        assert!(steps >= (w - 1) + (h - 1));
    }
}

#[test]
fn resizing_mid_game_starts_a_fresh_maze() {
    let mut engine = MazeEngine::new(8, 8);
    for dir in shortest_path(&engine) {
        engine.move_player(dir);
    }
    assert!(engine.is_at_finish());

    engine.resize(0, 25);
    assert_eq!(engine.width(), MIN_SIZE);
    assert_eq!(engine.height(), MAX_SIZE);
    assert_eq!(engine.player(), Pos { x: 0, y: 0 });
    assert!(!engine.is_at_finish());

    // The replacement maze is immediately playable too.
    for dir in shortest_path(&engine) {
        assert!(engine.move_player(dir).moved);
    }
    assert!(engine.is_at_finish());
}
