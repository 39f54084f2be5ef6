//! Alpha-beta must agree with plain minimax on every reachable 3x3 position.

use std::collections::{HashMap, HashSet, VecDeque};

use tictactoe::{Board, Cell, MemoPolicy, Pos, Searcher};

/// Plain minimax without pruning; ties go to the first child in row-major order.
fn minimax(board: &Board, cache: &mut HashMap<Board, (i32, Pos)>) -> (i32, Pos) {
    if let Some(&known) = cache.get(board) {
        return known;
    }

    let maximizing = board.side_to_move().unwrap() == Cell::X;
    let mut best: Option<(i32, Pos)> = None;
    for (pos, child) in board.children().unwrap() {
        let value = if child.is_terminal() {
            child.evaluate()
        } else {
            minimax(&child, cache).0
        };
        let better = match best {
            None => true,
            Some((b, _)) if maximizing => value > b,
            Some((b, _)) => value < b,
        };
        if better {
            best = Some((value, pos));
        }
    }

    let best = best.unwrap();
    cache.insert(*board, best);
    best
}

fn reachable_positions(root: Board) -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([root]);
    let mut positions = Vec::new();

    while let Some(board) = queue.pop_front() {
        if board.is_terminal() || !seen.insert(board) {
            continue;
        }
        positions.push(board);
        queue.extend(board.successors().unwrap());
    }
    positions
}

fn check_policy(policy: MemoPolicy) {
    let positions = reachable_positions(Board::new());
    let mut reference = HashMap::new();
    let mut shared = Searcher::with_policy(policy);

    for board in &positions {
        let (value, best_move) = minimax(board, &mut reference);

        let fresh = Searcher::with_policy(policy).search(board).unwrap();
        assert_eq!(fresh.value, value, "fresh search on\n{}", board);
        assert_eq!(fresh.best_move, best_move, "fresh search on\n{}", board);

        let warm = shared.search(board).unwrap();
        assert_eq!(warm.value, value, "warm search on\n{}", board);
        assert_eq!(warm.best_move, best_move, "warm search on\n{}", board);
    }
}

#[test]
fn test_reachable_position_count() {
    // 5478 legal positions, 958 of them decided
    assert_eq!(reachable_positions(Board::new()).len(), 5478 - 958);
}

#[test]
fn test_exact_window_matches_minimax() {
    check_policy(MemoPolicy::ExactWindow);
}

#[test]
fn test_bound_aware_matches_minimax() {
    check_policy(MemoPolicy::BoundAware);
}

#[test]
fn test_pruning_saves_work_on_empty_board() {
    let result = Searcher::new().search(&Board::new()).unwrap();
    assert!(result.stats.cutoffs > 0);
    // Plain minimax on the empty board visits 294778 interior nodes
    assert!(result.stats.nodes < 294_778);
}
