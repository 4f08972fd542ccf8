//! Arithmetic challenge generation
//!
//! One question per level attempt, deterministic for a given seed:
//! - operation pool widens as the player climbs (add -> subtract ->
//!   multiply -> divide)
//! - operand ranges grow with the level number
//! - subtraction never goes negative, division is always exact
//! - four unique answer options, shuffled

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::progress::MAX_LEVEL;

/// Points for a correct answer
pub const CORRECT_POINTS: i32 = 10;
/// Points for a wrong answer (the controller floors the score at zero)
pub const WRONG_PENALTY: i32 = -5;
/// Answer options per question
pub const OPTION_COUNT: usize = 4;

/// Arithmetic operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Display symbol for the question text
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

/// A single challenge as shown to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Rendered prompt, e.g. `"7 + 5 = ?"`
    pub text: String,
    pub answer: i32,
    /// [`OPTION_COUNT`] unique values, one of them the answer
    pub options: Vec<i32>,
    pub operation: Operation,
}

impl Question {
    /// Whether the picked option is the right answer
    pub fn check(&self, choice: i32) -> bool {
        choice == self.answer
    }
}

/// Score delta handed to the progression controller for one attempt
pub fn score_delta(correct: bool) -> i32 {
    if correct { CORRECT_POINTS } else { WRONG_PENALTY }
}

/// Generate the challenge for a level. Same (level, seed) pair always
/// yields the same question; the shell varies the seed per attempt.
pub fn question_for_level(level: u8, seed: u64) -> Question {
    let level = level.clamp(1, MAX_LEVEL);
    let mut rng = Pcg32::seed_from_u64(seed ^ (u64::from(level) << 32));

    let operation = pick_operation(level, &mut rng);
    let (a, b, answer) = operands(operation, level, &mut rng);
    let options = build_options(answer, &mut rng);

    Question {
        text: format!("{} {} {} = ?", a, operation.symbol(), b),
        answer,
        options,
        operation,
    }
}

/// Operations available at this level
fn pick_operation(level: u8, rng: &mut Pcg32) -> Operation {
    let pool: &[Operation] = match level {
        1..=25 => &[Operation::Add],
        26..=50 => &[Operation::Add, Operation::Subtract],
        51..=75 => &[Operation::Add, Operation::Subtract, Operation::Multiply],
        _ => &[
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ],
    };
    pool[rng.random_range(0..pool.len())]
}

/// Pick operands scaled to the level and compute the answer
fn operands(operation: Operation, level: u8, rng: &mut Pcg32) -> (i32, i32, i32) {
    let difficulty = i32::from(level);
    match operation {
        Operation::Add => {
            let a = rng.random_range(1..=10 + difficulty);
            let b = rng.random_range(1..=10 + difficulty);
            (a, b, a + b)
        }
        Operation::Subtract => {
            // Minuend first so the answer stays non-negative
            let a = rng.random_range(5..=10 + difficulty);
            let b = rng.random_range(1..=a);
            (a, b, a - b)
        }
        Operation::Multiply => {
            let hi = (3 + difficulty / 10).max(3);
            let a = rng.random_range(2..=hi);
            let b = rng.random_range(2..=9);
            (a, b, a * b)
        }
        Operation::Divide => {
            // Build the dividend from divisor × quotient so it divides out
            let divisor = rng.random_range(2..=9);
            let quotient = rng.random_range(2..=(2 + difficulty / 10).max(3));
            (divisor * quotient, divisor, quotient)
        }
    }
}

/// The answer plus unique nearby distractors, shuffled
fn build_options(answer: i32, rng: &mut Pcg32) -> Vec<i32> {
    let mut options = vec![answer];
    while options.len() < OPTION_COUNT {
        let offset = rng.random_range(1..=10);
        let candidate = if rng.random_bool(0.5) {
            answer + offset
        } else {
            answer - offset
        };
        if candidate >= 0 && !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options.shuffle(rng);
    options
}
