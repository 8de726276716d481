//! Dense real matrices for the calculator: element-wise arithmetic, products,
//! determinant, inverse and linear solves. Every operation checks shapes first and
//! reports `DimensionMismatch` instead of panicking.
//!
//! A `Matrix` is never empty and holds finite entries only: constructors reject
//! NaN and ±∞, and results that overflow come back as `InfiniteResult`.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::somelinalg::gauss_elimination::{determinant, gauss_jordan_inverse, gauss_solve};
use crate::somelinalg::linear_sys_diagnostics::{classify_system, is_singular, poorly_conditioned};
use log::info;
use nalgebra::{DMatrix, DVector};
use serde::Deserialize;
use std::fmt;

/// |det| below this counts as singular
pub const SINGULAR_EPSILON: f64 = 1e-9;
/// condition numbers above this are logged as a warning
pub const CONDITION_THRESHOLD: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinalgSettings {
    pub singular_epsilon: f64,
    pub condition_threshold: f64,
}

impl Default for LinalgSettings {
    fn default() -> Self {
        LinalgSettings {
            singular_epsilon: SINGULAR_EPSILON,
            condition_threshold: CONDITION_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

fn mismatch(message: String) -> CalcError {
    CalcError::new(ErrorKind::DimensionMismatch, message)
}

// every entry of `data` is finite, `context` names them in the error
fn all_finite(data: &DMatrix<f64>, context: &str) -> CalcResult<()> {
    match data.iter().find(|v| !v.is_finite()) {
        Some(bad) => Err(CalcError::non_finite(*bad, context)),
        None => Ok(()),
    }
}

impl Matrix {
    /// the single gate every matrix passes through
    fn checked(data: DMatrix<f64>, context: &str) -> CalcResult<Matrix> {
        if data.is_empty() {
            return Err(mismatch("matrix must have at least one row and one column".to_string()));
        }
        all_finite(&data, context)?;
        Ok(Matrix { data })
    }

    /// from rows; empty input, rows of different lengths and non-finite entries
    /// are rejected
    pub fn new(rows: Vec<Vec<f64>>) -> CalcResult<Matrix> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |row| row.len());
        if nrows == 0 || ncols == 0 {
            return Err(mismatch("matrix must have at least one row and one column".to_string()));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
            return Err(mismatch(format!(
                "row {} has {} elements, expected {}",
                i,
                row.len(),
                ncols
            )));
        }
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Self::checked(DMatrix::from_row_slice(nrows, ncols, &flat), "matrix entry")
    }

    /// same checks as [`Matrix::new`]
    pub fn from_dmatrix(data: DMatrix<f64>) -> CalcResult<Matrix> {
        Self::checked(data, "matrix entry")
    }

    /// `DimensionMismatch` for `n = 0`
    pub fn identity(n: usize) -> CalcResult<Matrix> {
        Self::checked(DMatrix::identity(n, n), "identity entry")
    }

    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    fn same_shape(&self, other: &Matrix, op: &str) -> CalcResult<()> {
        if self.shape() != other.shape() {
            return Err(mismatch(format!(
                "cannot {} {:?} and {:?} matrices",
                op,
                self.shape(),
                other.shape()
            )));
        }
        Ok(())
    }

    fn require_square(&self, op: &str) -> CalcResult<()> {
        if !self.is_square() {
            return Err(mismatch(format!(
                "{} needs a square matrix, got {:?}",
                op,
                self.shape()
            )));
        }
        Ok(())
    }

    pub fn add(&self, other: &Matrix) -> CalcResult<Matrix> {
        self.same_shape(other, "add")?;
        Self::checked(&self.data + &other.data, "sum entry")
    }

    pub fn subtract(&self, other: &Matrix) -> CalcResult<Matrix> {
        self.same_shape(other, "subtract")?;
        Self::checked(&self.data - &other.data, "difference entry")
    }

    pub fn multiply(&self, other: &Matrix) -> CalcResult<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(mismatch(format!(
                "cannot multiply {:?} by {:?}: inner dimensions differ",
                self.shape(),
                other.shape()
            )));
        }
        Self::checked(&self.data * &other.data, "product entry")
    }

    pub fn scale(&self, factor: f64) -> CalcResult<Matrix> {
        if !factor.is_finite() {
            return Err(CalcError::non_finite(factor, "scale factor"));
        }
        Self::checked(&self.data * factor, "scaled entry")
    }

    pub fn transpose(&self) -> Matrix {
        Matrix {
            data: self.data.transpose(),
        }
    }

    /// Gaussian elimination with partial pivoting; `InfiniteResult` when it overflows
    pub fn determinant(&self) -> CalcResult<f64> {
        self.require_square("determinant")?;
        let det = determinant(&self.data);
        if !det.is_finite() {
            return Err(CalcError::non_finite(det, "determinant"));
        }
        Ok(det)
    }

    pub fn inverse(&self) -> CalcResult<Matrix> {
        self.inverse_with(&LinalgSettings::default())
    }

    pub fn inverse_with(&self, settings: &LinalgSettings) -> CalcResult<Matrix> {
        self.require_square("inverse")?;
        // an overflowing determinant still means nonsingular
        let det = determinant(&self.data);
        if is_singular(det, settings.singular_epsilon) {
            return Err(CalcError::new(
                ErrorKind::Singular,
                format!("matrix is singular (determinant {:e}) and has no inverse", det),
            ));
        }
        poorly_conditioned(&self.data, settings.condition_threshold);
        let inverse = gauss_jordan_inverse(&self.data, f64::MIN_POSITIVE)
            .ok_or_else(|| CalcError::new(ErrorKind::Singular, "matrix has no inverse"))?;
        Self::checked(inverse, "inverse entry")
    }

    /// solves `self · x = b`
    pub fn solve(&self, b: &[f64]) -> CalcResult<Vec<f64>> {
        self.solve_with(b, &LinalgSettings::default())
    }

    /// `Singular` when |det| is below `settings.singular_epsilon`; the error detail says
    /// whether the system has no solution or infinitely many
    pub fn solve_with(&self, b: &[f64], settings: &LinalgSettings) -> CalcResult<Vec<f64>> {
        self.require_square("solve")?;
        if b.len() != self.nrows() {
            return Err(mismatch(format!(
                "right-hand side has {} entries, matrix has {} rows",
                b.len(),
                self.nrows()
            )));
        }
        if let Some(bad) = b.iter().find(|v| !v.is_finite()) {
            return Err(CalcError::non_finite(*bad, "right-hand side entry"));
        }
        let rhs = DVector::from_column_slice(b);
        let det = determinant(&self.data);
        if is_singular(det, settings.singular_epsilon) {
            let solution_set = classify_system(&self.data, &rhs, settings.singular_epsilon);
            return Err(CalcError::new(
                ErrorKind::Singular,
                format!("system is singular (determinant {:e})", det),
            )
            .with_detail(solution_set.to_string()));
        }
        poorly_conditioned(&self.data, settings.condition_threshold);
        let x = gauss_solve(&self.data, &rhs, f64::MIN_POSITIVE)
            .ok_or_else(|| CalcError::new(ErrorKind::Singular, "system has no unique solution"))?;
        if let Some(bad) = x.iter().find(|v| !v.is_finite()) {
            return Err(CalcError::non_finite(*bad, "solution component"));
        }
        info!("solved {}x{} system, det = {}", self.nrows(), self.ncols(), det);
        Ok(x.iter().copied().collect())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.data.row_iter() {
            let cells: Vec<String> = row.iter().map(|v| format!("{}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
