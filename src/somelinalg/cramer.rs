use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::somelinalg::matrix::{Matrix, SINGULAR_EPSILON};

fn det2(m: &[Vec<f64>]) -> f64 {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

// rule of Sarrus
fn det3(m: &[Vec<f64>]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Cramer's rule for 2×2 and 3×3 systems: `x_i = det(A_i) / det(A)` where `A_i` is `A`
/// with column `i` replaced by `b`. Kept as a cross-check for [`Matrix::solve`];
/// other sizes give `DimensionMismatch`.
pub fn solve_cramer(a: &Matrix, b: &[f64]) -> CalcResult<Vec<f64>> {
    let n = a.nrows();
    if !a.is_square() || !(n == 2 || n == 3) || b.len() != n {
        return Err(CalcError::new(
            ErrorKind::DimensionMismatch,
            format!(
                "Cramer's rule needs a 2x2 or 3x3 system, got {:?} with {} right-hand side entries",
                a.shape(),
                b.len()
            ),
        ));
    }
    let det = |m: &[Vec<f64>]| if n == 2 { det2(m) } else { det3(m) };
    let rows = a.to_rows();
    let d = det(&rows);
    if d.abs() < SINGULAR_EPSILON {
        return Err(CalcError::new(
            ErrorKind::Singular,
            format!("determinant {:e} is zero, Cramer's rule does not apply", d),
        ));
    }
    let solution = (0..n)
        .map(|col| {
            let mut replaced = rows.clone();
            for (row, value) in replaced.iter_mut().zip(b) {
                row[col] = *value;
            }
            det(&replaced) / d
        })
        .collect();
    Ok(solution)
}
