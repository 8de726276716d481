use crate::symbolic::ast::Expr;
use crate::symbolic::evaluator::{Scope, evaluate};
use crate::symbolic::utils::linspace;
use log::{info, warn};
use rayon::prelude::*; //parallel processing library

/// Values of `f(x, y)` on a rectangular grid. `z[i][j]` is the value at `(xs[j], ys[i])`;
/// points where evaluation failed hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Vec<Vec<Option<f64>>>,
    pub failures: usize,
}

impl SurfaceGrid {
    pub fn resolution(&self) -> usize {
        self.xs.len()
    }

    /// smallest and largest defined value, `None` if every point failed
    pub fn z_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Samples `ast` over `x_range × y_range` on a `resolution × resolution` grid.
/// Rows are evaluated in parallel; a failing point never aborts the grid.
/// Resolutions below 2 are raised to 2.
pub fn sample_surface(
    ast: &Expr,
    x_var: &str,
    y_var: &str,
    x_range: (f64, f64),
    y_range: (f64, f64),
    resolution: usize,
) -> SurfaceGrid {
    let n = resolution.max(2);
    let xs = linspace(x_range.0, x_range.1, n);
    let ys = linspace(y_range.0, y_range.1, n);
    let z: Vec<Vec<Option<f64>>> = ys
        .par_iter()
        .map(|&y| {
            xs.iter()
                .map(|&x| {
                    let scope = Scope::new().with(x_var, x).with(y_var, y);
                    evaluate(ast, &scope).ok()
                })
                .collect()
        })
        .collect();
    let failures = z.iter().flatten().filter(|v| v.is_none()).count();
    if failures > 0 {
        warn!(
            "{} of {} surface points of {} could not be evaluated",
            failures,
            n * n,
            ast
        );
    } else {
        info!("sampled {} on a {}x{} grid", ast, n, n);
    }
    SurfaceGrid { xs, ys, z, failures }
}
