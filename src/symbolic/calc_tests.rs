//___________________________________TESTS____________________________________
// end-to-end scenarios: text -> validate -> parse -> evaluate

#[cfg(test)]
mod tests {
    use crate::errors::ErrorKind;
    use crate::symbolic::evaluator::{Scope, evaluate, evaluate_str};
    use crate::symbolic::parse_expr::parse;
    use crate::symbolic::validator::validate;
    use approx::assert_relative_eq;

    #[test]
    fn test_precedence_scenarios() {
        let cases = [
            ("2+3*4", 14.0),
            ("2^3^2", 512.0),
            ("(2+3)*4", 20.0),
            ("8/4/2", 1.0),
            ("2*3%4", 2.0),
            ("-3^2", -9.0),
            ("(-3)^2", 9.0),
            ("2(3+4)", 14.0),
            ("(1+1)(2+2)", 8.0),
        ];
        for (text, expected) in cases {
            let value = evaluate(&parse(text).unwrap(), &Scope::new()).unwrap();
            assert_relative_eq!(value, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_validated_expressions_parse_and_evaluate() {
        let scope = Scope::new().with("x", 1.5).with("y", -2.0);
        for text in [
            "x + y",
            "sin(x) * cos(y)",
            "max(x, y) - min(x, y)",
            "sqrt(abs(y)) + floor(x) + ceil(x) + round(x)",
            "log(10) + ln(1)",
            "2x + 3y",
            "(x + 1) % 2",
        ] {
            assert!(validate(text).is_valid, "{}", text);
            let value = evaluate_str(text, &scope).unwrap();
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_polynomial_in_scope() {
        let ast = parse("3x^2 - 2x + 1").unwrap();
        for x in [-2.0, -0.5, 0.0, 1.0, 4.0] {
            let scope = Scope::new().with("x", x);
            let expected: f64 = 3.0 * x * x - 2.0 * x + 1.0;
            assert_relative_eq!(evaluate(&ast, &scope).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_error_kinds_per_stage() {
        let scope = Scope::new();
        let cases = [
            ("", ErrorKind::EmptyExpression),
            ("(1+2", ErrorKind::UnbalancedParentheses),
            ("1+2)", ErrorKind::UnbalancedParentheses),
            ("2 // 3", ErrorKind::InvalidOperator),
            ("2 * / 3", ErrorKind::ConsecutiveOperators),
            ("exp(1)", ErrorKind::UnsupportedFunction),
            ("2 & 3", ErrorKind::InvalidToken),
            ("2 +", ErrorKind::UnexpectedEnd),
            ("2 3", ErrorKind::UnexpectedToken),
            ("q + 1", ErrorKind::UndefinedVariable),
            ("1/0", ErrorKind::DivisionByZero),
            ("sqrt(-4)", ErrorKind::DomainError),
            ("ln(-1)", ErrorKind::UndefinedResult),
            ("ln(0)", ErrorKind::InfiniteResult),
        ];
        for (text, kind) in cases {
            let err = evaluate_str(text, &scope).unwrap_err();
            assert_eq!(err.kind, kind, "{}: {}", text, err);
        }
    }

    #[test]
    fn test_validator_never_rejects_generated_sums() {
        // balanced nested expressions built from supported pieces
        let pieces = ["x", "2", "sin(x)", "(x + 1)", "max(x, 3)", "sqrt(4)"];
        let ops = ["+", "-", "*", "/", "^", "%"];
        for (i, a) in pieces.iter().enumerate() {
            for (j, op) in ops.iter().enumerate() {
                let b = pieces[(i + j + 1) % pieces.len()];
                let text = format!("({} {} {})", a, op, b);
                assert!(validate(&text).is_valid, "{}", text);
                assert!(parse(&text).is_ok(), "{}", text);
            }
        }
    }

    #[test]
    fn test_deep_input_is_an_error_not_a_crash() {
        let scope = Scope::new().with("x", 1.0);
        let n = 10_000;
        let nested = format!("{}x{}", "(".repeat(n), ")".repeat(n));
        let flat = vec!["x"; n].join(" + ");
        for text in [nested, flat] {
            let err = evaluate_str(&text, &scope).unwrap_err();
            assert_eq!(err.kind, ErrorKind::UnexpectedToken);
            assert_eq!(err.detail.as_deref(), Some("nesting too deep"));
        }
    }
}
