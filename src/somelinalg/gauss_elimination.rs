use nalgebra::{DMatrix, DVector};

/// Brings `a` to row-echelon form with partial pivoting. Every row operation is
/// repeated on `rhs` (which may have zero columns). Returns the number of row swaps.
/// Columns without a nonzero pivot are skipped, so a singular `a` ends with a zero
/// on the diagonal.
pub fn forward_elimination(a: &mut DMatrix<f64>, rhs: &mut DMatrix<f64>) -> usize {
    let n = a.nrows();
    let mut swaps = 0;
    for k in 0..n.min(a.ncols()) {
        // row with the largest |a[i,k]| below the diagonal
        let mut pivot_row = k;
        for i in k + 1..n {
            if a[(i, k)].abs() > a[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        if a[(pivot_row, k)] == 0.0 {
            continue;
        }
        if pivot_row != k {
            a.swap_rows(pivot_row, k);
            rhs.swap_rows(pivot_row, k);
            swaps += 1;
        }
        let pivot = a[(k, k)];
        for i in k + 1..n {
            let factor = a[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..a.ncols() {
                a[(i, j)] -= factor * a[(k, j)];
            }
            for j in 0..rhs.ncols() {
                rhs[(i, j)] -= factor * rhs[(k, j)];
            }
            a[(i, k)] = 0.0;
        }
    }
    swaps
}

/// determinant of a square matrix: product of the pivots, sign flipped per row swap
pub fn determinant(a: &DMatrix<f64>) -> f64 {
    let n = a.nrows();
    let mut upper = a.clone();
    let mut nothing = DMatrix::<f64>::zeros(n, 0);
    let swaps = forward_elimination(&mut upper, &mut nothing);
    let product: f64 = (0..n).map(|i| upper[(i, i)]).product();
    if swaps % 2 == 0 { product } else { -product }
}

/// solves `u x = c` for upper-triangular `u` with a nonzero diagonal
pub fn back_substitution(u: &DMatrix<f64>, c: &DVector<f64>) -> DVector<f64> {
    let n = u.nrows();
    let mut x = DVector::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = c[i];
        for j in i + 1..n {
            sum -= u[(i, j)] * x[j];
        }
        x[i] = sum / u[(i, i)];
    }
    x
}

/// Gaussian elimination followed by back substitution. `None` when a pivot is
/// smaller than `epsilon` in magnitude.
pub fn gauss_solve(a: &DMatrix<f64>, b: &DVector<f64>, epsilon: f64) -> Option<DVector<f64>> {
    let mut upper = a.clone();
    let mut rhs = DMatrix::from_column_slice(b.len(), 1, b.as_slice());
    forward_elimination(&mut upper, &mut rhs);
    if (0..upper.nrows()).any(|i| upper[(i, i)].abs() < epsilon) {
        return None;
    }
    Some(back_substitution(&upper, &rhs.column(0).into_owned()))
}

/// Gauss–Jordan inversion on `[A | I]`; `None` when a pivot is smaller than `epsilon`
pub fn gauss_jordan_inverse(a: &DMatrix<f64>, epsilon: f64) -> Option<DMatrix<f64>> {
    let n = a.nrows();
    let mut left = a.clone();
    let mut right = DMatrix::<f64>::identity(n, n);
    for k in 0..n {
        let mut pivot_row = k;
        for i in k + 1..n {
            if left[(i, k)].abs() > left[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        if left[(pivot_row, k)].abs() < epsilon {
            return None;
        }
        if pivot_row != k {
            left.swap_rows(pivot_row, k);
            right.swap_rows(pivot_row, k);
        }
        let pivot = left[(k, k)];
        for j in 0..n {
            left[(k, j)] /= pivot;
            right[(k, j)] /= pivot;
        }
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = left[(i, k)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                left[(i, j)] -= factor * left[(k, j)];
                right[(i, j)] -= factor * right[(k, j)];
            }
        }
    }
    Some(right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_determinant_with_swaps() {
        // first pivot needs a swap
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_relative_eq!(determinant(&a), -1.0);
        let b = DMatrix::from_row_slice(3, 3, &[2.0, -3.0, 1.0, 2.0, 0.0, -1.0, 1.0, 4.0, 5.0]);
        assert_relative_eq!(determinant(&b), 49.0, epsilon = 1e-12);
        assert_relative_eq!(determinant(&b), b.determinant(), epsilon = 1e-10);
    }

    #[test]
    fn test_determinant_of_singular() {
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0]);
        assert_relative_eq!(determinant(&a), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_against_nalgebra_lu() {
        let a = DMatrix::from_row_slice(
            4,
            4,
            &[4.0, -2.0, 1.0, 3.0, 3.0, 6.0, -4.0, 2.0, 2.0, 1.0, 8.0, -5.0, 1.0, -3.0, 2.0, 7.0],
        );
        let b = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
        let x = gauss_solve(&a, &b, 1e-12).unwrap();
        let expected = a.clone().lu().solve(&b).unwrap();
        for i in 0..4 {
            assert_relative_eq!(x[i], expected[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn test_inverse_times_matrix_is_identity() {
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 0.0, 3.0, 0.0, 2.0]);
        let inv = gauss_jordan_inverse(&a, 1e-12).unwrap();
        let product = &a * &inv;
        let eye = DMatrix::<f64>::identity(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product[(i, j)], eye[(i, j)], epsilon = 1e-12);
            }
        }
        let singular = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(gauss_jordan_inverse(&singular, 1e-9).is_none());
    }
}
