/// numerical limit of an expression at a finite point or at ±∞
///
///  Example
/// ```
/// use RustedMathCore::numerical::limits::{limit, Approach};
/// use RustedMathCore::symbolic::parse_expr::parse;
/// let f = parse("(x^2 - 4)/(x - 2)").unwrap();
/// let approaching: Approach = "2".parse().unwrap();
/// let value: f64 = limit(&f, "x", approaching).parse().unwrap();
/// assert!((value - 4.0).abs() < 1e-5);
/// // one sample at 1/δ stands for infinity
/// assert_eq!(limit(&parse("1/x").unwrap(), "x", Approach::PositiveInfinity), "1.000000e-7");
/// ```
pub mod limits;
/// grid of values of a function of two variables, evaluated in parallel
///
///  Example
/// ```
/// use RustedMathCore::numerical::surface::sample_surface;
/// use RustedMathCore::symbolic::parse_expr::parse;
/// let f = parse("sqrt(x*y)").unwrap();
/// let grid = sample_surface(&f, "x", "y", (-1.0, 1.0), (0.0, 1.0), 5);
/// // negative x under the square root: those points are holes, not failures of the whole grid
/// assert!(grid.failures > 0);
/// assert_eq!(grid.z.len(), 5);
/// ```
pub mod surface;
