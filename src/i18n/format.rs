//! Printf-style substitution for message templates.
//!
//! Supported conversions: `%s`, `%S`, `%d`, `%f` (with optional precision,
//! e.g. `%.2f`), `%%` and `%n`. Arguments may be addressed explicitly
//! (`%2$s`) and padded to a width (`%5d`, `%-5s`).

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// A positional argument for [`format_template`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(i) => write!(f, "{}", i),
            FormatArg::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        FormatArg::Int(value.into())
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Int(value)
    }
}

impl From<u32> for FormatArg {
    fn from(value: u32) -> Self {
        FormatArg::Int(value.into())
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("missing argument #{0}")]
    MissingArgument(usize),
    #[error("argument #{index} cannot be formatted with %{conversion}")]
    TypeMismatch { index: usize, conversion: char },
    #[error("unknown format conversion '{0}'")]
    UnknownConversion(String),
}

static SPECIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn specifier_regex() -> &'static Regex {
    SPECIFIER_REGEX.get_or_init(|| {
        Regex::new(r"%(?:([1-9][0-9]*)\$)?(-)?([0-9]+)?(?:\.([0-9]+))?([a-zA-Z%])").unwrap()
    })
}

/// Substitute `args` into `template`.
pub fn format_template(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    let mut next_ordinary = 0;

    for caps in specifier_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_literal(&mut out, &template[last..whole.start()])?;
        last = whole.end();

        let conversion = caps[5].chars().next().unwrap_or('%');
        match conversion {
            '%' => {
                out.push('%');
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            _ => {}
        }

        let index = match caps.get(1) {
            Some(explicit) => explicit
                .as_str()
                .parse::<usize>()
                .map_err(|_| FormatError::UnknownConversion(whole.as_str().to_string()))?
                - 1,
            None => {
                next_ordinary += 1;
                next_ordinary - 1
            }
        };
        let arg = args
            .get(index)
            .ok_or(FormatError::MissingArgument(index + 1))?;
        let precision = caps.get(4).and_then(|p| p.as_str().parse::<usize>().ok());

        let rendered = match (conversion, arg) {
            ('s', arg) => arg.to_string(),
            ('S', arg) => arg.to_string().to_uppercase(),
            ('d', FormatArg::Int(i)) => i.to_string(),
            ('f', FormatArg::Float(x)) => format!("{:.*}", precision.unwrap_or(6), x),
            ('f', FormatArg::Int(i)) => format!("{:.*}", precision.unwrap_or(6), *i as f64),
            ('d' | 'f', _) => {
                return Err(FormatError::TypeMismatch {
                    index: index + 1,
                    conversion,
                })
            }
            _ => return Err(FormatError::UnknownConversion(whole.as_str().to_string())),
        };

        let width = caps.get(3).and_then(|w| w.as_str().parse::<usize>().ok());
        match (width, caps.get(2).is_some()) {
            (Some(width), true) => out.push_str(&format!("{:<width$}", rendered, width = width)),
            (Some(width), false) => out.push_str(&format!("{:>width$}", rendered, width = width)),
            (None, _) => out.push_str(&rendered),
        }
    }

    push_literal(&mut out, &template[last..])?;
    Ok(out)
}

/// Copy literal text, rejecting stray `%` that did not form a specifier.
fn push_literal(out: &mut String, literal: &str) -> Result<(), FormatError> {
    if let Some(pos) = literal.find('%') {
        return Err(FormatError::UnknownConversion(literal[pos..].to_string()));
    }
    out.push_str(literal);
    Ok(())
}
