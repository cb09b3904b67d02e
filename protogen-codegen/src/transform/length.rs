//! Symbolic arithmetic on byte-length expressions.
//!
//! A length expression is a string over the grammar
//! `term ('+' term)*` where `term := integer | integer '*' identifier |
//! identifier`. The algebra is purely syntactic — it never fails, and a
//! malformed expression simply produces a malformed result (§4.1:
//! "Garbage in yields garbage out; correctness relies on the model builder
//! feeding well-formed terms.").

/// A single classified term within a collapsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    /// A pure integer literal contribution, summed into one running total.
    Int(i64),
    /// `coeff * symbol`, where `symbol` is everything after the first `*`.
    /// Terms with identical `symbol` text are merged by summing `coeff`.
    Scaled(i64, String),
}

/// Splits `expr` into its top-level `+`-separated terms, respecting
/// parenthesis nesting so a term produced by [`multiply_by`] (which wraps
/// sub-expressions in parens) is never split apart.
fn split_terms(expr: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let bytes = expr.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'+' if depth == 0 => {
                terms.push(expr[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = expr[start..].trim();
    if !tail.is_empty() {
        terms.push(tail.to_string());
    }
    terms
}

/// Classifies one trimmed term as an integer literal or a scaled symbol.
fn classify_term(term: &str) -> Term {
    if let Ok(n) = term.parse::<i64>() {
        return Term::Int(n);
    }

    if let Some(idx) = term.find('*') {
        let (coeff_str, rest) = term.split_at(idx);
        let rest = rest[1..].trim();
        if let Ok(coeff) = coeff_str.trim().parse::<i64>() {
            return Term::Scaled(coeff, rest.to_string());
        }
    }

    Term::Scaled(1, term.to_string())
}

fn render_scaled(coeff: i64, symbol: &str, times: &str) -> String {
    if coeff == 1 {
        symbol.to_string()
    } else {
        format!("{coeff}{times}{symbol}")
    }
}

fn collapse_with(expr: &str, times: &str) -> String {
    let mut int_total: i64 = 0;
    let mut scaled: Vec<(i64, String)> = Vec::new();

    for raw in split_terms(expr) {
        if raw.is_empty() {
            continue;
        }
        match classify_term(&raw) {
            Term::Int(n) => int_total += n,
            Term::Scaled(coeff, symbol) => {
                if let Some(existing) = scaled.iter_mut().find(|(_, s)| *s == symbol) {
                    existing.0 += coeff;
                } else {
                    scaled.push((coeff, symbol));
                }
            }
        }
    }

    scaled.retain(|(coeff, _)| *coeff != 0);
    scaled.sort_by(|a, b| a.1.cmp(&b.1));

    let mut pieces = Vec::new();
    if int_total != 0 || scaled.is_empty() {
        pieces.push(int_total.to_string());
    }
    for (coeff, symbol) in &scaled {
        pieces.push(render_scaled(*coeff, symbol, times));
    }

    pieces.join(" + ")
}

/// Folds integer-only terms into a single prefix, drops `1*` coefficients,
/// merges identical symbolic terms, and emits in canonical order (the
/// integer literal first, then symbols alphabetically).
pub fn collapse(expr: &str) -> String {
    collapse_with(expr, "*")
}

/// Like [`collapse`], but renders multiplication with the HTML times
/// entity for use in generated Markdown tables.
pub fn collapse_markdown(expr: &str) -> String {
    collapse_with(expr, "&times;")
}

/// Concatenates two length expressions with `+` and collapses the result.
pub fn add(a: &str, b: &str) -> String {
    let joined = match (a.trim().is_empty(), b.trim().is_empty()) {
        (true, true) => String::new(),
        (true, false) => b.to_string(),
        (false, true) => a.to_string(),
        (false, false) => format!("{a} + {b}"),
    };
    collapse(&joined)
}

/// Wraps every term of `expr` with `count*(…)`, then collapses.
pub fn multiply_by(expr: &str, count: &str) -> String {
    let wrapped: Vec<String> = split_terms(expr)
        .into_iter()
        .filter(|t| !t.is_empty())
        .map(|term| format!("{count}*({term})"))
        .collect();
    collapse(&wrapped.join(" + "))
}

/// Decrements a leading integer literal by one; if the expression has no
/// leading integer literal, prepends `-1 +` instead.
pub fn subtract_one(expr: &str) -> String {
    let terms = split_terms(expr);
    match terms.first().map(|t| t.parse::<i64>()) {
        Some(Ok(n)) if n >= 1 => {
            let mut rest = terms[1..].to_vec();
            rest.insert(0, (n - 1).to_string());
            collapse(&rest.join(" + "))
        }
        _ => collapse(&format!("-1 + {expr}")),
    }
}

/// The three parallel length expressions threaded through every encodable
/// (§3 `LengthExpr`): the minimum and maximum possible encoded size, and
/// the size with all trailing default fields excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedLength {
    pub min: String,
    pub max: String,
    pub non_default: String,
}

impl EncodedLength {
    /// A length that is the same fixed expression in all three slots.
    pub fn exact(expr: impl Into<String>) -> EncodedLength {
        let expr = expr.into();
        EncodedLength {
            min: expr.clone(),
            max: expr.clone(),
            non_default: expr,
        }
    }

    pub fn zero() -> EncodedLength {
        EncodedLength::exact("0")
    }

    /// Component-wise [`add`], used when aggregating a structure's children.
    pub fn plus(&self, other: &EncodedLength) -> EncodedLength {
        EncodedLength {
            min: add(&self.min, &other.min),
            max: add(&self.max, &other.max),
            non_default: add(&self.non_default, &other.non_default),
        }
    }

    /// Component-wise [`multiply_by`], used when a node has a fixed `array`
    /// count.
    pub fn scaled_by(&self, count: &str) -> EncodedLength {
        EncodedLength {
            min: multiply_by(&self.min, count),
            max: multiply_by(&self.max, count),
            non_default: multiply_by(&self.non_default, count),
        }
    }
}
