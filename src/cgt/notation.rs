//! Textual rendering of game values.
//!
//! Terminal and one-sided values print as integers. A value whose only
//! options on each side are numbers prints as a number, a star, or a
//! switch when surreal arithmetic allows it. Everything else prints as
//! `{L, ... | R, ...}`.

use std::fmt;

use super::value::GameValue;

/// Deepest binary place a dyadic rational is searched to.
const MAX_BINARY_PLACES: i32 = 52;

/// Renders a dyadic number as an integer or an `n/2^k` fraction.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let mut denominator: i64 = 1;
    let mut scaled = value;
    while scaled.fract() != 0.0 && denominator < (1 << MAX_BINARY_PLACES) {
        scaled *= 2.0;
        denominator *= 2;
    }
    format!("{}/{}", scaled as i64, denominator)
}

/// True when `{low | high}` is the mean of its options: the gap is at most
/// one, its inverse is a power of two, and `low` sits on a multiple of it.
///
/// The alignment test matters for finer endpoints: `{1/8 | 5/8}` is `1/2`,
/// the simplest number between them, not the mean `3/8`.
pub fn is_simple_fraction(low: f64, high: f64) -> bool {
    let gap = high - low;
    if !(gap > 0.0 && gap <= 1.0) {
        return false;
    }
    let inverse = 1.0 / gap;
    if inverse.fract() != 0.0 || !(inverse as u64).is_power_of_two() {
        return false;
    }
    (low / gap).fract() == 0.0
}

/// The simplest dyadic number strictly between `low` and `high`.
///
/// Requires `low < high`. Zero wins whenever it fits, then the integer
/// nearest zero, then the fraction with the smallest denominator.
pub fn simplest_between(low: f64, high: f64) -> f64 {
    debug_assert!(low < high);
    if low < 0.0 && high > 0.0 {
        return 0.0;
    }
    if high <= 0.0 {
        return -simplest_between(-high, -low);
    }

    let next_integer = low.floor() + 1.0;
    if next_integer < high {
        return next_integer;
    }
    let mut step = 1.0;
    for _ in 0..MAX_BINARY_PLACES {
        step /= 2.0;
        let candidate = (low / step).floor() * step + step;
        if candidate < high {
            return candidate;
        }
    }
    (low + high) / 2.0
}

/// Intermediate rendering: numbers are kept numeric so a parent can apply
/// the arithmetic rules.
#[derive(Debug, Clone, PartialEq)]
enum Rendered {
    Number(f64),
    Text(String),
}

impl Rendered {
    fn into_string(self) -> String {
        match self {
            Rendered::Number(n) => format_number(n),
            Rendered::Text(s) => s,
        }
    }
}

fn render(g: &GameValue) -> Rendered {
    match (g.left.is_empty(), g.right.is_empty()) {
        (true, true) => return Rendered::Number(0.0),
        (true, false) => return Rendered::Number(-(g.right_depth() as f64)),
        (false, true) => return Rendered::Number(g.left_depth() as f64),
        (false, false) => {}
    }

    if let ([l], [r]) = (g.left.as_slice(), g.right.as_slice()) {
        if let (Rendered::Number(l), Rendered::Number(r)) = (render(l), render(r)) {
            if let Some(rendered) = render_number_pair(l, r) {
                return rendered;
            }
        }
    }

    Rendered::Text(format!(
        "{{{} | {}}}",
        render_side(&g.left),
        render_side(&g.right)
    ))
}

fn render_number_pair(l: f64, r: f64) -> Option<Rendered> {
    if l == r {
        return Some(Rendered::Text(if l == 0.0 {
            "*".to_string()
        } else {
            format!("{}*", format_number(l))
        }));
    }
    if l < r {
        if l < 0.0 && r > 0.0 {
            return Some(Rendered::Number(0.0));
        }
        if is_simple_fraction(l, r) {
            return Some(Rendered::Number((l + r) / 2.0));
        }
        return Some(Rendered::Number(simplest_between(l, r)));
    }
    if l == -r {
        return Some(Rendered::Text(format!("±{}", format_number(l))));
    }
    None
}

fn render_side(options: &[GameValue]) -> String {
    let mut names: Vec<String> = Vec::with_capacity(options.len());
    for option in options {
        let name = render(option).into_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    // `*` next to `0` never changes the outcome.
    if names.iter().any(|n| n == "0") {
        names.retain(|n| n != "*");
    }
    names.join(", ")
}

impl GameValue {
    /// The value as a number, if its notation is one.
    pub fn number(&self) -> Option<f64> {
        match render(self) {
            Rendered::Number(n) => Some(n),
            Rendered::Text(_) => None,
        }
    }
}

impl fmt::Display for GameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self).into_string())
    }
}
