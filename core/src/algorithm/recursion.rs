//! Plain recursion algorithm cores
//!
//! Factorial and recursive string reversal, animated as call stacks. Each
//! call records one step when it is entered and one when it returns, so the
//! stack visibly grows to full depth and unwinds frame by frame.

use serde::{Deserialize, Serialize};

use crate::algorithm::state::{CallFrame, CallStackState};
use crate::algorithm::traits::{
    Algorithm, AlgorithmError, AlgorithmId, Category, MAX_FACTORIAL,
};
use crate::step::{HighlightRole, StepRecorder, StepTrace};

fn enter(
    stack: &mut CallStackState,
    recorder: &mut StepRecorder<CallStackState>,
    label: String,
) -> usize {
    let depth = stack.depth();
    push_frame(stack, label.clone());
    recorder.record_with(
        stack,
        format!("Calling {label}"),
        [(CallStackState::frame(depth), HighlightRole::Primary)],
    );
    depth
}

fn push_frame(stack: &mut CallStackState, label: String) {
    stack.frames.push(CallFrame {
        label,
        result: None,
    });
}

fn ret(
    stack: &mut CallStackState,
    recorder: &mut StepRecorder<CallStackState>,
    depth: usize,
    label: &str,
    value: String,
) {
    if let Some(frame) = stack.frames.last_mut() {
        frame.result = Some(value.clone());
    }
    recorder.record_with(
        stack,
        format!("{label} returns {value}"),
        [(CallStackState::frame(depth), HighlightRole::Result)],
    );
    stack.frames.pop();
}

/// Recursive factorial.
#[derive(Debug, Default)]
pub struct Factorial;

impl Factorial {
    fn call(
        n: u64,
        stack: &mut CallStackState,
        recorder: &mut StepRecorder<CallStackState>,
    ) -> u64 {
        let label = format!("factorial({n})");
        let depth = enter(stack, recorder, label.clone());
        let value = if n <= 1 {
            1
        } else {
            n * Self::call(n - 1, stack, recorder)
        };
        ret(stack, recorder, depth, &label, value.to_string());
        value
    }
}

impl Algorithm for Factorial {
    type Input = u64;
    type State = CallStackState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("factorial")
    }

    fn name(&self) -> &'static str {
        "Factorial"
    }

    fn category(&self) -> Category {
        Category::Recursion
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        if *input > MAX_FACTORIAL {
            return Err(AlgorithmError::invalid_input(format!(
                "factorial argument {input} exceeds maximum {MAX_FACTORIAL}"
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let mut recorder = StepRecorder::new();
        let mut stack = CallStackState::new();
        recorder.record(&stack, format!("Computing factorial({input})"));
        let value = Self::call(*input, &mut stack, &mut recorder);
        recorder.record(&stack, format!("factorial({input}) = {value}"));
        Ok(recorder.finish())
    }
}

/// Maximum string length accepted by the reversal core.
pub const MAX_REVERSAL_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalInput {
    pub text: String,
}

/// Recursive string reversal: reverse the tail, then append the head.
#[derive(Debug, Default)]
pub struct StringReversal;

impl StringReversal {
    fn call(
        chars: &[char],
        stack: &mut CallStackState,
        recorder: &mut StepRecorder<CallStackState>,
    ) -> String {
        let text: String = chars.iter().collect();
        let label = format!("reverse(\"{text}\")");
        let depth = enter(stack, recorder, label.clone());
        let value = match chars.split_first() {
            None => String::new(),
            Some((head, tail)) => {
                let mut reversed = Self::call(tail, stack, recorder);
                reversed.push(*head);
                reversed
            }
        };
        ret(stack, recorder, depth, &label, format!("\"{value}\""));
        value
    }
}

impl Algorithm for StringReversal {
    type Input = ReversalInput;
    type State = CallStackState;

    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("string-reversal")
    }

    fn name(&self) -> &'static str {
        "String Reversal"
    }

    fn category(&self) -> Category {
        Category::Recursion
    }

    fn validate(&self, input: &Self::Input) -> Result<(), AlgorithmError> {
        let len = input.text.chars().count();
        if len == 0 {
            return Err(AlgorithmError::invalid_input("text must not be empty"));
        }
        if len > MAX_REVERSAL_LEN {
            return Err(AlgorithmError::invalid_input(format!(
                "text length {len} exceeds maximum {MAX_REVERSAL_LEN}"
            )));
        }
        Ok(())
    }

    fn run(&self, input: &Self::Input) -> Result<StepTrace<Self::State>, AlgorithmError> {
        self.validate(input)?;
        let chars: Vec<char> = input.text.chars().collect();
        let mut recorder = StepRecorder::new();
        let mut stack = CallStackState::new();
        recorder.record(&stack, format!("Reversing \"{}\"", input.text));
        let reversed = Self::call(&chars, &mut stack, &mut recorder);
        recorder.record(
            &stack,
            format!("\"{}\" reversed is \"{reversed}\"", input.text),
        );
        Ok(recorder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorial_unwinds_to_result() {
        let trace = Factorial.run(&5).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.annotation, "factorial(5) = 120");
        assert!(last.state.frames.is_empty());
        // Stack reaches full depth before unwinding: 5 nested frames.
        let max_depth = trace.iter().map(|s| s.state.depth()).max().unwrap();
        assert_eq!(max_depth, 5);
    }

    #[test]
    fn factorial_bound_rejected() {
        assert!(Factorial.validate(&MAX_FACTORIAL).is_ok());
        assert!(Factorial.validate(&(MAX_FACTORIAL + 1)).is_err());
    }

    #[test]
    fn string_reversal_scenario() {
        let input = ReversalInput {
            text: "steps".to_string(),
        };
        let trace = StringReversal.run(&input).unwrap();
        let last = trace.last().unwrap();
        assert_eq!(last.annotation, "\"steps\" reversed is \"spets\"");
        // One frame per suffix including the empty one.
        let max_depth = trace.iter().map(|s| s.state.depth()).max().unwrap();
        assert_eq!(max_depth, 6);
    }

    #[test]
    fn empty_text_rejected() {
        let input = ReversalInput {
            text: String::new(),
        };
        assert!(StringReversal.validate(&input).is_err());
    }
}
