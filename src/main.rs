#![allow(non_snake_case)]
use std::path::PathBuf;
use std::process;

use RustedMathCore::Utils::config::CoreConfig;
use RustedMathCore::Utils::logger::{init_logger, parse_level};
use RustedMathCore::errors::{CalcError, CalcResult};
use RustedMathCore::formatting::precision::{Rendering, format_with_precision};
use RustedMathCore::formatting::precision_settings::{ErrorPolicy, PrecisionSettings, RoundingMode};
use RustedMathCore::numerical::limits::{Approach, limit_with};
use RustedMathCore::symbolic::evaluator::{Scope, evaluate_str};
use RustedMathCore::symbolic::parse_expr::parse;
use RustedMathCore::symbolic::validator::validate;
use clap::Parser;
use log::{error, info};
use tabled::{builder::Builder, settings::Style};

/// Evaluates a math expression and prints it in fixed, scientific, engineering and
/// fraction notation, or approximates its limit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// expression, e.g. "2x^2 + sin(y)"
    expression: String,

    /// variable binding name=value, repeatable
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// approximate the limit as this variable approaches --approaching
    #[arg(long)]
    limit: Option<String>,

    /// target of the limit: a number, inf or -inf
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    approaching: String,

    /// decimal places of the fixed notation
    #[arg(long)]
    places: Option<usize>,

    /// round | floor | ceil | truncate
    #[arg(long)]
    rounding: Option<RoundingMode>,

    /// show scientific notation as the main rendering
    #[arg(long)]
    scientific: bool,

    /// thousands separators in the fixed notation
    #[arg(long)]
    separators: bool,

    /// strict | graceful | silent
    #[arg(long)]
    policy: Option<ErrorPolicy>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// off | error | warn | info | debug | trace (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// also write the log to this file
    #[arg(long)]
    log_file: Option<String>,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    Ok((name.trim().to_string(), value))
}

fn precision_settings(args: &Args, base: PrecisionSettings) -> PrecisionSettings {
    let mut settings = base;
    if let Some(places) = args.places {
        settings = settings.with_decimal_places(places);
    }
    if let Some(rounding) = args.rounding {
        settings = settings.with_rounding(rounding);
    }
    if args.scientific {
        settings = settings.with_scientific_notation(true);
    }
    if args.separators {
        settings = settings.with_thousands_separator(true);
    }
    if let Some(policy) = args.policy {
        settings = settings.with_error_policy(policy);
    }
    settings
}

fn print_table(rows: Vec<Vec<String>>) {
    let mut table = Builder::from(rows).build();
    table.with(Style::modern_rounded());
    println!("{}", table);
}

fn run_limit(args: &Args, variable: &str, config: &CoreConfig) -> CalcResult<()> {
    validate(&args.expression).into_result()?;
    let ast = parse(&args.expression)?;
    let approaching: Approach = args.approaching.parse()?;
    let result = limit_with(&ast, variable, approaching, &config.limits);
    print_table(vec![
        vec!["expression".to_string(), ast.to_string()],
        vec!["limit".to_string(), format!("{} → {}", variable, approaching)],
        vec!["value".to_string(), result],
    ]);
    Ok(())
}

fn run_evaluate(args: &Args, settings: &PrecisionSettings) -> CalcResult<()> {
    let scope: Scope = args.vars.iter().map(|(name, value)| (name.as_str(), *value)).collect();
    let value = evaluate_str(&args.expression, &scope)?;
    match format_with_precision(value, settings)? {
        Rendering::Value(result) => {
            print_table(vec![
                vec!["expression".to_string(), args.expression.clone()],
                vec!["display".to_string(), result.display],
                vec!["fixed".to_string(), result.fixed],
                vec!["scientific".to_string(), result.scientific],
                vec!["engineering".to_string(), result.engineering],
                vec![
                    "fraction".to_string(),
                    result.fraction.unwrap_or_else(|| "-".to_string()),
                ],
                vec![
                    "significant digits".to_string(),
                    result.significant_digits.to_string(),
                ],
            ]);
            Ok(())
        }
        Rendering::Failure { kind, message } => Err(CalcError::new(kind, message)),
        placeholder @ Rendering::Placeholder => {
            println!("{}", placeholder);
            process::exit(1);
        }
    }
}

fn report(e: &CalcError) -> ! {
    error!("{}", e);
    eprintln!("{}", e);
    if let Some(detail) = &e.detail {
        eprintln!("  detail: {}", detail);
    }
    if let Some(offset) = e.offset {
        eprintln!("  at position {}", offset);
    }
    eprintln!("  hint: {}", e.kind.suggestion());
    process::exit(1);
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CoreConfig::from_file(path).unwrap_or_else(|e| report(&e)),
        None => CoreConfig::default(),
    };

    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.logging.level));
    let log_file = args.log_file.as_deref().or(config.logging.file.as_deref());
    if let Err(e) = init_logger(level, log_file) {
        eprintln!("cannot open log file: {}", e);
    }
    info!("Program started");

    let outcome = match &args.limit {
        Some(variable) => run_limit(&args, variable, &config),
        None => {
            let settings = precision_settings(&args, config.precision.clone());
            run_evaluate(&args, &settings)
        }
    };
    if let Err(e) = outcome {
        report(&e);
    }
    info!("Program ended");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_every_flag_has_help() {
        let command = Args::command();
        for arg in command.get_arguments() {
            let id = arg.get_id().as_str();
            if id == "help" || id == "version" {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help text", id);
        }
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("x = 2.5").unwrap(), ("x".to_string(), 2.5));
        assert!(parse_binding("x2.5").is_err());
        assert!(parse_binding("x=two").is_err());
    }
}
