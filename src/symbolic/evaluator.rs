//! # Evaluator
//!
//! Reduces an expression tree to a number against a [`Scope`] of variable values.
//! Evaluation is pure: the same tree and scope always give the same number or the
//! same error kind, and the tree is never modified.
//!
//! Every intermediate result is checked: NaN becomes `UndefinedResult`, an infinity
//! becomes `InfiniteResult`, so nothing downstream ever has to print `NaN`.
use crate::errors::{CalcError, CalcResult, ErrorKind};
use crate::symbolic::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::symbolic::parse_expr::parse;
use crate::symbolic::validator::validate;
use log::debug;
use std::collections::HashMap;
use std::f64::consts::{E, PI};

/// Variable bindings for a single evaluation. Names are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    values: HashMap<String, f64>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            values: HashMap::new(),
        }
    }

    /// builder style binding: `Scope::new().with("x", 1.0).with("y", 2.0)`
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_lowercase(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Scope {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (name, value) in iter {
            scope.set(name.as_ref(), value);
        }
        scope
    }
}

impl From<HashMap<String, f64>> for Scope {
    fn from(map: HashMap<String, f64>) -> Self {
        map.into_iter().collect()
    }
}

/// named constants used when the scope does not bind the name
pub fn constant(name: &str) -> Option<f64> {
    match name.to_lowercase().as_str() {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

fn checked(value: f64, context: impl FnOnce() -> String) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::non_finite(value, &context()))
    }
}

fn domain_error(name: &str, arg: f64) -> CalcError {
    CalcError::new(
        ErrorKind::DomainError,
        format!("{}({}) is outside of the function domain", name, arg),
    )
}

fn single_argument(name: &str, args: &[f64]) -> CalcResult<f64> {
    match args {
        [x] => Ok(*x),
        _ => Err(CalcError::new(
            ErrorKind::ArgumentCount,
            format!("{} takes exactly one argument, {} given", name, args.len()),
        )),
    }
}

/// Applies a built-in function to already evaluated arguments.
pub fn apply_function(name: &str, args: &[f64]) -> CalcResult<f64> {
    let lower = name.to_lowercase();
    let value = match lower.as_str() {
        "max" | "min" => {
            if args.len() < 2 {
                return Err(CalcError::new(
                    ErrorKind::ArgumentCount,
                    format!("{} takes at least two arguments, {} given", lower, args.len()),
                ));
            }
            let fold: fn(f64, f64) -> f64 = if lower == "max" { f64::max } else { f64::min };
            args[1..].iter().fold(args[0], |acc, &x| fold(acc, x))
        }
        "sin" => single_argument(&lower, args)?.sin(),
        "cos" => single_argument(&lower, args)?.cos(),
        "tan" => single_argument(&lower, args)?.tan(),
        "log" => single_argument(&lower, args)?.log10(),
        "ln" => single_argument(&lower, args)?.ln(),
        "sqrt" => {
            let x = single_argument(&lower, args)?;
            if x < 0.0 {
                return Err(domain_error(&lower, x));
            }
            x.sqrt()
        }
        "abs" => single_argument(&lower, args)?.abs(),
        "floor" => single_argument(&lower, args)?.floor(),
        "ceil" => single_argument(&lower, args)?.ceil(),
        // halves go towards +infinity: round(-2.5) = -2
        "round" => {
            let x = single_argument(&lower, args)?;
            let whole = x.floor();
            if x - whole >= 0.5 { whole + 1.0 } else { whole }
        }
        _ => {
            return Err(CalcError::new(
                ErrorKind::UnsupportedFunction,
                format!("unsupported function '{}'", name),
            )
            .with_detail(name.to_string()));
        }
    };
    checked(value, || format!("{}({:?})", lower, args))
}

fn apply_binary(op: BinaryOperator, left: f64, right: f64) -> CalcResult<f64> {
    let value = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Sub => left - right,
        BinaryOperator::Mul => left * right,
        BinaryOperator::Div | BinaryOperator::Mod => {
            if right == 0.0 {
                return Err(CalcError::new(
                    ErrorKind::DivisionByZero,
                    format!("division by zero in {} {} {}", left, op, right),
                ));
            }
            if op == BinaryOperator::Div {
                left / right
            } else {
                // truncated remainder, sign follows the dividend
                left % right
            }
        }
        BinaryOperator::Pow => left.powf(right),
    };
    checked(value, || format!("{} {} {}", left, op, right))
}

/// Evaluates `ast` with the variable values in `scope`.
///
/// # Errors
/// `UndefinedVariable`, `DivisionByZero`, `DomainError`, `UnsupportedFunction`,
/// `ArgumentCount`, `UndefinedResult`, `InfiniteResult`.
pub fn evaluate(ast: &Expr, scope: &Scope) -> CalcResult<f64> {
    match ast {
        Expr::Number(value) => checked(*value, || format!("literal {}", value)),
        Expr::Variable(name) => match scope.get(name).or_else(|| constant(name)) {
            Some(value) => checked(value, || format!("variable {}", name)),
            None => Err(CalcError::new(
                ErrorKind::UndefinedVariable,
                format!("variable '{}' is not defined", name),
            )
            .with_detail(name.to_lowercase())),
        },
        Expr::UnaryOp(UnaryOperator::Neg, operand) => Ok(-evaluate(operand, scope)?),
        Expr::BinaryOp(op, left, right) => {
            let l = evaluate(left, scope)?;
            let r = evaluate(right, scope)?;
            apply_binary(*op, l, r)
        }
        Expr::FunctionCall(name, args) => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, scope))
                .collect::<CalcResult<Vec<f64>>>()?;
            apply_function(name, &values)
        }
    }
}

/// validate -> parse -> evaluate in one call (strict validation)
pub fn evaluate_str(text: &str, scope: &Scope) -> CalcResult<f64> {
    validate(text).into_result()?;
    let ast = parse(text)?;
    let value = evaluate(&ast, scope)?;
    debug!("{} = {}", text, value);
    Ok(value)
}
