//! Backtracking algorithm cores
//!
//! N-Queens explores the board row by row, recording a step for every
//! placement attempt, every conflict, every completed solution and every
//! backtrack. The full search runs to completion so the trace enumerates
//! all solutions for the board size.

use serde::{Deserialize, Serialize};

use crate::algorithm::state::BoardState;
use crate::algorithm::traits::{
    Algorithm, AlgorithmError, AlgorithmId, Category, QUEENS_MAX_N, QUEENS_MIN_N,
};
use crate::step::{HighlightRole, StepRecorder, StepTrace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NQueensInput {
    /// Board side length, within the animatable bounds.
    pub n: usize,
}

/// Exhaustive N-Queens search by row, columns tried left to right.
#[derive(Debug, Default)]
pub struct NQueens;

impl NQueens {
    /// Column/diagonal conflict between a candidate square and a placed queen.
    fn conflicts(row: usize, col: usize, placed_row: usize, placed_col: usize) -> bool {
        placed_col == col || placed_row.abs_diff(row) == placed_col.abs_diff(col)
    }

    fn search(
        board: &mut BoardState,
        row: usize,
        solutions: &mut Vec<Vec<usize>>,
        recorder: &mut StepRecorder<BoardState>,
    ) {
        let n = board.n;
        if row == n {
            let solution: Vec<usize> = board.queens.iter().map(|q| q.unwrap_or(0)).collect();
            let highlights: Vec<_> = solution
                .iter()
                .enumerate()
                .map(|(r, &c)| (board.square(r, c), HighlightRole::Result))
                .collect();
            solutions.push(solution);
            recorder.record_with(
                board,
                format!("Solution {} found", solutions.len()),
                highlights,
            );
            return;
        }

        for col in 0..n {
            let conflict = (0..row).find(|&r| {
                board
                    .queens[r]
                    .map_or(false, |c| Self::conflicts(row, col, r, c))
            });
            match conflict {
                Some(r) => {
                    let placed = board.queens[r].unwrap_or(0);
                    recorder.record_with(
                        board,
                        format!("({row}, {col}) attacked by queen at ({r}, {placed})"),
                        [
                            (board.square(row, col), HighlightRole::Eliminated),
                            (board.square(r, placed), HighlightRole::Secondary),
                        ],
                    );
                }
                None => {
                    board.queens[row] = Some(col);
                    recorder.record_with(
                        board,
                        format!("Placed queen at ({row}, {col})"),
                        [(board.square(row, col), HighlightRole::Primary)],
                    );
                    Self::search(board, row + 1, solutions, recorder);
                    board.queens[row] = None;
                    recorder.record_with(
                        board,
                        format!("Backtracking from ({row}, {col})"),
                        [(board.square(row, col), HighlightRole::Secondary)],
                    );
                }
            }
        }
    }
}

impl Algorithm for NQueens {
    type Input = NQueensInput;
    type State = BoardState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("n-queens")
    }

    fn name(&self) -> &'static str {
        "N-Queens"
    }

    fn category(&self) -> Category {
        Category::Backtracking
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if input.n < QUEENS_MIN_N || input.n > QUEENS_MAX_N {
            return Err(AlgorithmError::invalid_input(format!(
                "board size {} outside supported range {QUEENS_MIN_N}..={QUEENS_MAX_N}",
                input.n
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut board = BoardState::empty(input.n);
        recorder.record(&board, format!("Empty {0}x{0} board", input.n));

        let mut solutions = Vec::new();
        Self::search(&mut board, 0, &mut solutions, &mut recorder);

        recorder.record(
            &board,
            format!(
                "Search complete: {} solutions on the {}x{} board",
                solutions.len(),
                input.n,
                input.n
            ),
        );
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution_boards(trace: &StepTrace<BoardState>) -> Vec<Vec<usize>> {
        trace
            .iter()
            .filter(|s| s.annotation.starts_with("Solution"))
            .map(|s| s.state.queens.iter().map(|q| q.unwrap()).collect())
            .collect()
    }

    fn is_valid(solution: &[usize]) -> bool {
        for (r1, &c1) in solution.iter().enumerate() {
            for (r2, &c2) in solution.iter().enumerate().skip(r1 + 1) {
                if c1 == c2 || r1.abs_diff(r2) == c1.abs_diff(c2) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn four_queens_has_exactly_two_solutions() {
        let trace = NQueens.run(&NQueensInput { n: 4 }).unwrap();
        let solutions = solution_boards(&trace);
        assert_eq!(solutions.len(), 2);
        assert!(solutions.iter().all(|s| is_valid(s)));
        assert_ne!(solutions[0], solutions[1]);
        assert_eq!(
            trace.last().unwrap().annotation,
            "Search complete: 2 solutions on the 4x4 board"
        );
    }

    #[test]
    fn search_records_backtracking_steps() {
        let trace = NQueens.run(&NQueensInput { n: 4 }).unwrap();
        assert!(trace
            .iter()
            .any(|s| s.annotation.starts_with("Backtracking from")));
        assert!(trace.iter().any(|s| s.annotation.contains("attacked by")));
    }

    #[test]
    fn six_queens_solution_count() {
        let trace = NQueens.run(&NQueensInput { n: 6 }).unwrap();
        assert_eq!(solution_boards(&trace).len(), 4);
    }

    #[test]
    fn board_size_bounds_rejected() {
        assert!(NQueens.validate(&NQueensInput { n: 3 }).is_err());
        assert!(NQueens.validate(&NQueensInput { n: 9 }).is_err());
        assert!(NQueens.validate(&NQueensInput { n: 8 }).is_ok());
    }
}
