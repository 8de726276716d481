// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod errors;
pub mod formatting;
pub mod numerical;
pub mod somelinalg;
pub mod symbolic;

pub use Utils::config::CoreConfig;
pub use errors::{CalcError, CalcResult, ErrorKind};
pub use formatting::precision::{Quantity, Rendering, format_with_precision};
pub use formatting::precision_settings::{PrecisionSettings, SharedSettings};
pub use numerical::limits::{Approach, limit};
pub use numerical::surface::sample_surface;
pub use somelinalg::matrix::Matrix;
pub use symbolic::evaluator::{Scope, evaluate, evaluate_str};
pub use symbolic::lexer::tokenize;
pub use symbolic::parse_expr::parse;
pub use symbolic::validator::validate;
