//! # Abstract syntax tree
//!
//! Closed tree of expression nodes produced by the parser and consumed by the
//! evaluator, the limit approximator and the surface sampler. A node exclusively owns
//! its children (`Box`/`Vec`), there is no sharing and no cycles, and nothing mutates
//! a tree after the parser has built it.
use std::collections::BTreeSet;
use std::fmt;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum BinaryOperator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "^")]
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum UnaryOperator {
    #[strum(serialize = "-")]
    Neg,
}

/// Expression tree node.
///
/// # Examples
/// ```rust, ignore
/// use RustedMathCore::symbolic::ast::{Expr, BinaryOperator};
/// // x + 2
/// let expr = Expr::binary(BinaryOperator::Add, Expr::Variable("x".to_string()), Expr::Number(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// numeric literal or resolved constant
    Number(f64),
    /// variable name exactly as written; lookup is case-insensitive
    Variable(String),
    UnaryOp(UnaryOperator, Box<Expr>),
    BinaryOp(BinaryOperator, Box<Expr>, Box<Expr>),
    /// function name and ordered arguments
    FunctionCall(String, Vec<Expr>),
}

impl Expr {
    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(left), Box::new(right))
    }

    pub fn neg(operand: Expr) -> Expr {
        Expr::UnaryOp(UnaryOperator::Neg, Box::new(operand))
    }

    pub fn var(name: &str) -> Expr {
        Expr::Variable(name.to_string())
    }

    pub fn call(name: &str, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(name.to_string(), args)
    }

    /// case-insensitive, like the evaluator's scope lookup
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Number(_) => false,
            Expr::Variable(name) => name.eq_ignore_ascii_case(var_name),
            Expr::UnaryOp(_, operand) => operand.contains_variable(var_name),
            Expr::BinaryOp(_, left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::FunctionCall(_, args) => args.iter().any(|a| a.contains_variable(var_name)),
        }
    }

    /// sorted lower-cased names of all variables in the tree
    pub fn variables(&self) -> Vec<String> {
        let mut found = BTreeSet::new();
        self.collect_variables(&mut found);
        found.into_iter().collect()
    }

    fn collect_variables(&self, found: &mut BTreeSet<String>) {
        match self {
            Expr::Number(_) => {}
            Expr::Variable(name) => {
                found.insert(name.to_lowercase());
            }
            Expr::UnaryOp(_, operand) => operand.collect_variables(found),
            Expr::BinaryOp(_, left, right) => {
                left.collect_variables(found);
                right.collect_variables(found);
            }
            Expr::FunctionCall(_, args) => {
                for arg in args {
                    arg.collect_variables(found);
                }
            }
        }
    }

    /// number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::UnaryOp(_, operand) => 1 + operand.size(),
            Expr::BinaryOp(_, left, right) => 1 + left.size() + right.size(),
            Expr::FunctionCall(_, args) => 1 + args.iter().map(Expr::size).sum::<usize>(),
        }
    }
}

/// Display implementation for pretty printing expressions, fully parenthesised
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(val) => write!(f, "{}", val),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::UnaryOp(op, operand) => write!(f, "({}{})", op, operand),
            Expr::BinaryOp(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Expr::FunctionCall(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
