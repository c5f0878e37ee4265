//! Dynamic programming algorithm cores
//!
//! Table-based cores (LCS, knapsack, coin change) record one step per filled
//! cell into a [`MatrixState`] and finish with a reconstruction walk over the
//! completed table. Memoized Fibonacci instead animates its call stack as a
//! [`CallStackState`].
//!
//! Reconstruction tie-break: coin change prefers the largest usable
//! denomination at every amount, so 11 from {1, 5, 10} reconstructs as
//! 10 + 1 rather than a run of smaller coins.

use serde::{Deserialize, Serialize};

use crate::algorithm::state::{CallFrame, CallStackState, MatrixState};
use crate::algorithm::traits::{
    validate_array, Algorithm, AlgorithmError, AlgorithmId, Category,
};
use crate::step::{ElementId, HighlightRole, StepRecorder, StepTrace};

/// Largest Fibonacci index accepted by the memoized core.
pub const MAX_FIB_INDEX: u64 = 40;

/// Longest string accepted by the LCS core.
pub const MAX_LCS_LEN: usize = 16;

/// Most items accepted by the knapsack core.
pub const MAX_KNAPSACK_ITEMS: usize = 16;
/// Largest knapsack capacity.
pub const MAX_KNAPSACK_CAPACITY: i64 = 64;

/// Largest target amount accepted by the coin-change core.
pub const MAX_COIN_AMOUNT: i64 = 64;

fn cell(row: usize, col: usize) -> ElementId {
    MatrixState::cell(row, col)
}

// ---------------------------------------------------------------------------
// Memoized Fibonacci
// ---------------------------------------------------------------------------

/// Fibonacci with memoization, visualized as a growing and shrinking call
/// stack plus the memo table it consults.
#[derive(Debug, Default)]
pub struct FibonacciMemo;

impl FibonacciMemo {
    fn fib(
        n: u64,
        stack: &mut CallStackState,
        recorder: &mut StepRecorder<CallStackState>,
    ) -> u64 {
        let depth = stack.depth();
        stack.frames.push(CallFrame {
            label: format!("fib({n})"),
            result: None,
        });
        recorder.record_with(
            stack,
            format!("Calling fib({n})"),
            [(CallStackState::frame(depth), HighlightRole::Primary)],
        );

        let value = if let Some(&hit) = stack.memo.get(&n) {
            recorder.record_with(
                stack,
                format!("Memo hit: fib({n}) = {hit}"),
                [(CallStackState::frame(depth), HighlightRole::Secondary)],
            );
            hit
        } else if n < 2 {
            n
        } else {
            let a = Self::fib(n - 1, stack, recorder);
            let b = Self::fib(n - 2, stack, recorder);
            let sum = a + b;
            stack.memo.insert(n, sum);
            sum
        };

        if let Some(frame) = stack.frames.last_mut() {
            frame.result = Some(value.to_string());
        }
        recorder.record_with(
            stack,
            format!("fib({n}) returns {value}"),
            [(CallStackState::frame(depth), HighlightRole::Result)],
        );
        stack.frames.pop();
        value
    }
}

impl Algorithm for FibonacciMemo {
    type Input = u64;
    type State = CallStackState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("fibonacci-memoized")
    }

    fn name(&self) -> &'static str {
        "Memoized Fibonacci"
    }

    fn category(&self) -> Category {
        Category::DynamicProgramming
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if *input > MAX_FIB_INDEX {
            return Err(AlgorithmError::invalid_input(format!(
                "Fibonacci index {input} exceeds maximum {MAX_FIB_INDEX}"
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut stack = CallStackState::new();
        recorder.record(&stack, format!("Computing fib({input}) with memoization"));
        let value = Self::fib(*input, &mut stack, &mut recorder);
        recorder.record(&stack, format!("fib({input}) = {value}"));
        Ok(recorder.finish())
    }
}

// ---------------------------------------------------------------------------
// Longest common subsequence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LcsInput {
    pub first: String,
    pub second: String,
}

/// Longest common subsequence over a (m+1) x (n+1) length table, followed by
/// a traceback that highlights the matched cells.
#[derive(Debug, Default)]
pub struct Lcs;

impl Algorithm for Lcs {
    type Input = LcsInput;
    type State = MatrixState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("longest-common-subsequence")
    }

    fn name(&self) -> &'static str {
        "Longest Common Subsequence"
    }

    fn category(&self) -> Category {
        Category::DynamicProgramming
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        for (side, text) in [("first", &input.first), ("second", &input.second)] {
            let len = text.chars().count();
            if len == 0 {
                return Err(AlgorithmError::invalid_input(format!(
                    "{side} string must not be empty"
                )));
            }
            if len > MAX_LCS_LEN {
                return Err(AlgorithmError::invalid_input(format!(
                    "{side} string length {len} exceeds maximum {MAX_LCS_LEN}"
                )));
            }
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let a: Vec<char> = input.first.chars().collect();
        let b: Vec<char> = input.second.chars().collect();
        let mut recorder = StepRecorder::new();

        let mut table = MatrixState::empty(a.len() + 1, b.len() + 1);
        table.row_labels = std::iter::once(String::new())
            .chain(a.iter().map(|c| c.to_string()))
            .collect();
        table.col_labels = std::iter::once(String::new())
            .chain(b.iter().map(|c| c.to_string()))
            .collect();
        for row in 0..=a.len() {
            table.set(row, 0, 0);
        }
        for col in 0..=b.len() {
            table.set(0, col, 0);
        }
        recorder.record(&table, "Initialized LCS length table with zero borders");

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let (value, note) = if a[i - 1] == b[j - 1] {
                    let diag = table.get(i - 1, j - 1).unwrap_or(0);
                    (diag + 1, format!("'{}' matches: diagonal + 1", a[i - 1]))
                } else {
                    let up = table.get(i - 1, j).unwrap_or(0);
                    let left = table.get(i, j - 1).unwrap_or(0);
                    (up.max(left), "no match: max of above and left".to_string())
                };
                table.set(i, j, value);
                recorder.record_with(
                    &table,
                    format!("L[{i}][{j}] = {value} ({note})"),
                    [(cell(i, j), HighlightRole::Primary)],
                );
            }
        }

        // Traceback preferring the diagonal, then up, then left.
        let mut i = a.len();
        let mut j = b.len();
        let mut subsequence: Vec<char> = Vec::new();
        let mut path = Vec::new();
        while i > 0 && j > 0 {
            if a[i - 1] == b[j - 1] {
                subsequence.push(a[i - 1]);
                path.push((cell(i, j), HighlightRole::Result));
                i -= 1;
                j -= 1;
            } else if table.get(i - 1, j) >= table.get(i, j - 1) {
                i -= 1;
            } else {
                j -= 1;
            }
        }
        subsequence.reverse();
        let text: String = subsequence.iter().collect();
        recorder.record_with(
            &table,
            format!(
                "Longest common subsequence: \"{text}\" (length {})",
                subsequence.len()
            ),
            path,
        );
        Ok(recorder.finish())
    }
}

// ---------------------------------------------------------------------------
// 0/1 knapsack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackItem {
    pub weight: i64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnapsackInput {
    pub items: Vec<KnapsackItem>,
    pub capacity: i64,
}

/// 0/1 knapsack over an (items+1) x (capacity+1) value table, finishing with
/// a chosen-item reconstruction walk.
#[derive(Debug, Default)]
pub struct Knapsack;

impl Algorithm for Knapsack {
    type Input = KnapsackInput;
    type State = MatrixState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("knapsack-01")
    }

    fn name(&self) -> &'static str {
        "0/1 Knapsack"
    }

    fn category(&self) -> Category {
        Category::DynamicProgramming
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if input.items.is_empty() {
            return Err(AlgorithmError::invalid_input("item list must not be empty"));
        }
        if input.items.len() > MAX_KNAPSACK_ITEMS {
            return Err(AlgorithmError::invalid_input(format!(
                "{} items exceed maximum {MAX_KNAPSACK_ITEMS}",
                input.items.len()
            )));
        }
        if input.capacity < 1 || input.capacity > MAX_KNAPSACK_CAPACITY {
            return Err(AlgorithmError::invalid_input(format!(
                "capacity {} outside supported range 1..={MAX_KNAPSACK_CAPACITY}",
                input.capacity
            )));
        }
        if let Some(item) = input
            .items
            .iter()
            .find(|item| item.weight < 1 || item.value < 1)
        {
            return Err(AlgorithmError::invalid_input(format!(
                "item weight {} / value {} must be positive",
                item.weight, item.value
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let capacity = input.capacity as usize;
        let mut recorder = StepRecorder::new();

        let mut table = MatrixState::empty(input.items.len() + 1, capacity + 1);
        table.row_labels = std::iter::once("-".to_string())
            .chain(
                input
                    .items
                    .iter()
                    .map(|item| format!("w{} v{}", item.weight, item.value)),
            )
            .collect();
        table.col_labels = (0..=capacity).map(|c| c.to_string()).collect();
        for col in 0..=capacity {
            table.set(0, col, 0);
        }
        recorder.record(&table, "Initialized knapsack table: zero items give zero value");

        for (idx, item) in input.items.iter().enumerate() {
            let row = idx + 1;
            for cap in 0..=capacity {
                let skip = table.get(row - 1, cap).unwrap_or(0);
                let (best, note) = if item.weight as usize <= cap {
                    let take = item.value
                        + table.get(row - 1, cap - item.weight as usize).unwrap_or(0);
                    if take > skip {
                        (take, format!("take item {row} (value {take})"))
                    } else {
                        (skip, format!("skip item {row}"))
                    }
                } else {
                    (skip, format!("item {row} too heavy for capacity {cap}"))
                };
                table.set(row, cap, best);
                recorder.record_with(
                    &table,
                    format!("V[{row}][{cap}] = {best}: {note}"),
                    [(cell(row, cap), HighlightRole::Primary)],
                );
            }
        }

        // Walk back up the table: a value change means the item was taken.
        let mut chosen = Vec::new();
        let mut highlights = Vec::new();
        let mut cap = capacity;
        for row in (1..=input.items.len()).rev() {
            if table.get(row, cap) != table.get(row - 1, cap) {
                chosen.push(row);
                highlights.push((cell(row, cap), HighlightRole::Result));
                cap -= input.items[row - 1].weight as usize;
            }
        }
        chosen.reverse();
        let best = table.get(input.items.len(), capacity).unwrap_or(0);
        recorder.record_with(
            &table,
            format!("Maximum value {best} using items {chosen:?}"),
            highlights,
        );
        Ok(recorder.finish())
    }
}

// ---------------------------------------------------------------------------
// Coin change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinChangeInput {
    pub coins: Vec<i64>,
    pub amount: i64,
}

/// Minimum-coin change over a single-row table indexed by amount.
///
/// An unmakeable amount is not an error; it ends the trace with a terminal
/// annotated step over the completed table.
#[derive(Debug, Default)]
pub struct CoinChange;

impl Algorithm for CoinChange {
    type Input = CoinChangeInput;
    type State = MatrixState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("coin-change")
    }

    fn name(&self) -> &'static str {
        "Coin Change"
    }

    fn category(&self) -> Category {
        Category::DynamicProgramming
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        validate_array(&input.coins)?;
        if input.amount < 1 || input.amount > MAX_COIN_AMOUNT {
            return Err(AlgorithmError::invalid_input(format!(
                "amount {} outside supported range 1..={MAX_COIN_AMOUNT}",
                input.amount
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let amount = input.amount as usize;
        let mut recorder = StepRecorder::new();

        let mut table = MatrixState::empty(1, amount + 1);
        table.col_labels = (0..=amount).map(|a| a.to_string()).collect();
        table.set(0, 0, 0);
        recorder.record(&table, "Amount 0 needs 0 coins");

        for target in 1..=amount {
            let mut best: Option<i64> = None;
            for &coin in &input.coins {
                let coin = coin as usize;
                if coin > target {
                    continue;
                }
                if let Some(prev) = table.get(0, target - coin) {
                    let candidate = prev + 1;
                    if best.map_or(true, |b| candidate < b) {
                        best = Some(candidate);
                    }
                }
            }
            match best {
                Some(count) => {
                    table.set(0, target, count);
                    recorder.record_with(
                        &table,
                        format!("Amount {target} needs {count} coins"),
                        [(cell(0, target), HighlightRole::Primary)],
                    );
                }
                None => recorder.record_with(
                    &table,
                    format!("Amount {target} is unreachable with these coins"),
                    [(cell(0, target), HighlightRole::Eliminated)],
                ),
            }
        }

        let Some(total) = table.get(0, amount) else {
            recorder.record(
                &table,
                format!(
                    "Amount {} cannot be made from coins {:?}",
                    input.amount, input.coins
                ),
            );
            return Ok(recorder.finish());
        };

        // Reconstruct preferring the largest usable denomination first.
        let mut coins_desc = input.coins.clone();
        coins_desc.sort_unstable_by(|a, b| b.cmp(a));
        coins_desc.dedup();
        let mut used = Vec::new();
        let mut highlights = vec![(cell(0, amount), HighlightRole::Result)];
        let mut remaining = amount;
        while remaining > 0 {
            let here = table.get(0, remaining).unwrap_or(0);
            let Some(&coin) = coins_desc.iter().find(|&&coin| {
                let coin = coin as usize;
                coin <= remaining && table.get(0, remaining - coin) == Some(here - 1)
            }) else {
                break;
            };
            remaining -= coin as usize;
            used.push(coin);
            highlights.push((cell(0, remaining), HighlightRole::Result));
        }
        recorder.record_with(
            &table,
            format!("Amount {} made with {total} coins: {used:?}", input.amount),
            highlights,
        );
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memoized_fibonacci_hits_memo() {
        let trace = FibonacciMemo.run(&6).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.annotation, "fib(6) = 8");
        assert!(last.state.frames.is_empty());
        assert_eq!(last.state.memo.get(&6), Some(&8));
        // fib(4) is demanded twice; the second demand must be a memo hit.
        assert!(trace
            .iter()
            .any(|s| s.annotation.starts_with("Memo hit: fib(4)")));
        assert!(FibonacciMemo.validate(&(MAX_FIB_INDEX + 1)).is_err());
    }

    #[test]
    fn lcs_finds_subsequence() {
        let input = LcsInput {
            first: "ABCBDAB".to_string(),
            second: "BDCABA".to_string(),
        };
        let trace = Lcs.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.state.get(7, 6), Some(4));
        assert!(last.annotation.contains("(length 4)"));
    }

    #[test]
    fn knapsack_selects_optimal_items() {
        let input = KnapsackInput {
            items: vec![
                KnapsackItem { weight: 1, value: 1 },
                KnapsackItem { weight: 3, value: 4 },
                KnapsackItem { weight: 4, value: 5 },
                KnapsackItem { weight: 5, value: 7 },
            ],
            capacity: 7,
        };
        let trace = Knapsack.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.state.get(4, 7), Some(9));
        assert!(last.annotation.starts_with("Maximum value 9"));
    }

    #[test]
    fn coin_change_scenario_prefers_large_denominations() {
        let input = CoinChangeInput {
            coins: vec![1, 5, 10],
            amount: 11,
        };
        let trace = CoinChange.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.state.get(0, 11), Some(2));
        assert_eq!(last.annotation, "Amount 11 made with 2 coins: [10, 1]");
    }

    #[test]
    fn unreachable_amount_is_terminal_step_not_error() {
        let input = CoinChangeInput {
            coins: vec![5],
            amount: 3,
        };
        let trace = CoinChange.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.state.get(0, 3), None);
        assert!(last.annotation.contains("cannot be made"));
    }

    #[test]
    fn dp_bounds_rejected() {
        assert!(Lcs
            .validate(&LcsInput {
                first: String::new(),
                second: "A".to_string(),
            })
            .is_err());
        assert!(Knapsack
            .validate(&KnapsackInput {
                items: vec![],
                capacity: 5,
            })
            .is_err());
        assert!(CoinChange
            .validate(&CoinChangeInput {
                coins: vec![1],
                amount: 0,
            })
            .is_err());
    }
}
