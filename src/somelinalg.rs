//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// dense matrix type with shape-checked arithmetic, determinant, inverse and solve
///
///# Example
/// ```
/// use RustedMathCore::somelinalg::matrix::Matrix;
/// // 2x + 3y = 7, x - y = 1
/// let a = Matrix::new(vec![vec![2.0, 3.0], vec![1.0, -1.0]]).unwrap();
/// let x = a.solve(&[7.0, 1.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
/// assert!((a.determinant().unwrap() + 5.0).abs() < 1e-12);
/// ```
pub mod matrix;
/// Gaussian elimination with partial pivoting, back substitution, Gauss-Jordan inversion
pub mod gauss_elimination;
/// Cramer's rule for small systems
pub mod cramer;
/// diagnostics for linear systems and matrices: if it is singular
/// or poorly conditioned
pub mod linear_sys_diagnostics;
