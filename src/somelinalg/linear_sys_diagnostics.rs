use log::warn;
use nalgebra::{DMatrix, DVector, stack};
use std::fmt;

/// In mathematics, the Rouché–Capelli theorem gives a necessary and sufficient condition for a system of
/// linear equations to have a solution: Ax = b is consistent if and only if rank(A) = rank([A b]).
/// Here A is the coefficient matrix, x is the vector of unknowns and b is the vector of constants.
/// When the system is consistent and rank(A) is smaller than the number of unknowns, the solution
/// set is infinite. Ranks are computed with the tolerance `eps`.
pub fn Rouche_Capelli_theorem(A: &DMatrix<f64>, b: &DVector<f64>, eps: f64) -> bool {
    let Ab: DMatrix<f64> = stack![A, b];
    let rank_A = A.rank(eps);
    let rank_Ab = Ab.rank(eps);

    let result = rank_A == rank_Ab;
    if !result {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
    }
    result
}

/// what the rank test says about `Ax = b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionSet {
    Unique,
    NoSolution,
    Infinite,
}

impl fmt::Display for SolutionSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            SolutionSet::Unique => "unique solution",
            SolutionSet::NoSolution => "no solution",
            SolutionSet::Infinite => "infinitely many solutions",
        };
        write!(f, "{}", text)
    }
}

pub fn classify_system(A: &DMatrix<f64>, b: &DVector<f64>, eps: f64) -> SolutionSet {
    if !Rouche_Capelli_theorem(A, b, eps) {
        SolutionSet::NoSolution
    } else if A.rank(eps) < A.ncols() {
        SolutionSet::Infinite
    } else {
        SolutionSet::Unique
    }
}

/// |det(A)| below `epsilon`. A numerical threshold, not a proof of singularity.
pub fn is_singular(det: f64, epsilon: f64) -> bool {
    let is_singular = det.abs() < epsilon;
    if is_singular {
        warn!("Matrix is singular. Determinant = {:.8}", det);
    }
    is_singular
}

/// ratio of the largest singular value to the smallest one
pub fn condition_number(A: &DMatrix<f64>) -> f64 {
    let singular_values = A.singular_values();
    if singular_values.is_empty() {
        return 1.0;
    }
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    max_sigma / min_sigma
}

/// A system is poorly conditioned if its solution is sensitive to small changes in the input data.
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let condition_number = condition_number(A);
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2}",
            condition_number
        );
    }
    poorly_conditioned
}
