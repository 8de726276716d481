/// tokenizer: string -> flat vector of tokens with source offsets
pub mod lexer;
/// structural checks on raw text giving early, classified errors
///
///# Example
/// ```
/// use RustedMathCore::symbolic::validator::{validate, Validator};
/// use RustedMathCore::errors::ErrorKind;
/// assert!(validate("2 + sin(x)").is_valid);
/// let result = validate("(2 + 3");
/// assert_eq!(result.error.unwrap().kind, ErrorKind::UnbalancedParentheses);
/// // the strict validator rejects unary minus after an operator, the relaxed one does not
/// assert!(!validate("3 * -2").is_valid);
/// assert!(Validator::relaxed().validate("3 * -2").is_valid);
/// ```
pub mod validator;
///______________________________________________________________________________________________
/// # Expression tree
/// closed enum of node kinds shared by the parser and the evaluator
pub mod ast;
///______________________________________________________________________________________________
/// recursive-descent parser with implicit multiplication
///
///# Example
/// ```
/// use RustedMathCore::symbolic::parse_expr::parse;
/// let input = "2x^2 + 3(x - 1)";
/// let parsed_expression = parse(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.variables(), vec!["x".to_string()]);
/// ```
pub mod parse_expr;
///______________________________________________________________________________________________
/// # Evaluator
/// walks the tree against a variable scope
///
///# Example
/// ```
/// use RustedMathCore::symbolic::parse_expr::parse;
/// use RustedMathCore::symbolic::evaluator::{evaluate, Scope};
/// let f = parse("x^2 + y").unwrap();
/// let scope = Scope::new().with("x", 3.0).with("y", 1.0);
/// assert_eq!(evaluate(&f, &scope).unwrap(), 10.0);
/// ```
pub mod evaluator;
///______________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
pub mod utils;

mod calc_tests;
