//! The dice arithmetic the storyboard narrates: joint tables of independent dice and
//! marginalising them back.
use error_stack::{Report, Result};
use std::fmt::{self, Display, Formatter};

pub const FACES: usize = 6;
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityError {
    NotADistribution(Vec<f64>),
}

impl Display for ProbabilityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADistribution(values) => write!(
                f,
                "{values:?} is not a probability distribution, entries must be non-negative and sum to 1"
            ),
        }
    }
}

impl error_stack::Context for ProbabilityError {}

pub fn fair_die() -> [f64; FACES] {
    [1.0 / FACES as f64; FACES]
}

pub fn validate_distribution(p: &[f64]) -> Result<(), ProbabilityError> {
    let valid_entries = p.iter().all(|v| v.is_finite() && *v >= 0.0);
    let total: f64 = p.iter().sum();
    if !valid_entries || p.is_empty() || (total - 1.0).abs() > TOLERANCE {
        return Err(Report::new(ProbabilityError::NotADistribution(p.to_vec())));
    }
    Ok(())
}

/// Joint distribution of two independent variables, `p` along rows and `q` along columns.
pub fn joint(p: &[f64], q: &[f64]) -> Result<Vec<Vec<f64>>, ProbabilityError> {
    validate_distribution(p)?;
    validate_distribution(q)?;
    Ok(p.iter()
        .map(|pi| q.iter().map(|qj| pi * qj).collect())
        .collect())
}

/// Sums every row, marginalising out the column variable.
pub fn row_marginals(joint: &[Vec<f64>]) -> Vec<f64> {
    joint.iter().map(|row| row.iter().sum()).collect()
}

/// Sums every column, marginalising out the row variable.
pub fn column_marginals(joint: &[Vec<f64>]) -> Vec<f64> {
    let columns = joint.iter().map(Vec::len).max().unwrap_or(0);
    (0..columns)
        .map(|j| joint.iter().filter_map(|row| row.get(j)).sum())
        .collect()
}

/// Number of entries in the joint table of `dice` six-sided dice, `None` on overflow.
pub fn joint_table_len(dice: u32) -> Option<u64> {
    (FACES as u64).checked_pow(dice)
}
