
// the collection of utility functions mainly for bracket parsing and proceeding

/// result of scanning a string for round brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketBalance {
    Balanced,
    /// a ')' was found while no '(' was open; byte position of that ')'
    MissingOpening(usize),
    /// '(' left open at the end; byte position of the first unclosed '('
    MissingClosing(usize),
}

// counting stack: every '(' pushes its position, every ')' pops one
pub fn bracket_balance(s: &str) -> BracketBalance {
    let mut stack = Vec::new();
    for (i, c) in s.char_indices() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return BracketBalance::MissingOpening(i);
                }
            }
            _ => {}
        }
    }
    match stack.first() {
        Some(&pos) => BracketBalance::MissingClosing(pos),
        None => BracketBalance::Balanced,
    }
}

pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);

    for i in 0..num_values {
        let value = start + (i as f64 * step);
        values.push(value);
    }

    values
}
