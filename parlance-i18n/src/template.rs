//! Message Templates
//!
//! Templates are parsed once, when a catalog is built, so syntax errors
//! surface at startup instead of in the middle of a request.
//!
//! Two placeholder syntaxes are recognized:
//!
//! - gettext/Python style: `%(name)d`, `%(name)i`, `%(name)s`,
//!   `%(name)f`, `%(name).2f`, and `%%` for a literal percent sign.
//!   A `%` not followed by `(` or `%` is kept as-is.
//! - brace style: `{name}`, with `{{` and `}}` for literal braces.

use crate::{Args, I18nError, Result, Value};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// How a placeholder formats its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    /// `%d` / `%i`: integers; floats are truncated toward zero
    Integer,
    /// `%f` with a precision
    Float(usize),
    /// `%s` and `{name}`: any value, as displayed
    Text,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Placeholder { name: String, conversion: Conversion },
}

/// A parsed message template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template.
    ///
    /// ```
    /// use parlance_i18n::{Args, Template};
    ///
    /// let template = Template::parse("You have %(num)d item.").unwrap();
    /// let text = template.render("items", &Args::new().with("num", 1)).unwrap();
    /// assert_eq!(text, "You have 1 item.");
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        let invalid = |reason: &str| I18nError::InvalidTemplate {
            template: source.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            let placeholder = match c {
                '%' if chars.peek() == Some(&'%') => {
                    chars.next();
                    literal.push('%');
                    continue;
                }
                '%' if chars.peek() == Some(&'(') => {
                    chars.next();
                    let name = take_until(&mut chars, ')')
                        .ok_or_else(|| invalid("unterminated `%(`"))?;
                    if name.is_empty() {
                        return Err(invalid("empty placeholder name"));
                    }
                    let conversion = parse_conversion(&mut chars).ok_or_else(|| {
                        invalid(&format!("bad conversion for placeholder `{}`", name))
                    })?;
                    Segment::Placeholder { name, conversion }
                }
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                '{' => {
                    let name =
                        take_until(&mut chars, '}').ok_or_else(|| invalid("unterminated `{`"))?;
                    if name.is_empty()
                        || !name.chars().all(|c| c.is_alphanumeric() || c == '_')
                    {
                        return Err(invalid(&format!("bad placeholder name `{}`", name)));
                    }
                    Segment::Placeholder {
                        name,
                        conversion: Conversion::Text,
                    }
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                    continue;
                }
                '}' => return Err(invalid("unmatched `}`")),
                other => {
                    literal.push(other);
                    continue;
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(placeholder);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute `args`. `key` only labels errors.
    ///
    /// Every placeholder needs a value; nothing is ever replaced by an
    /// empty string.
    pub fn render(&self, key: &str, args: &Args) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { name, conversion } => {
                    let value = args.get(name).ok_or_else(|| I18nError::MissingArgument {
                        key: key.to_string(),
                        name: name.clone(),
                    })?;
                    format_value(&mut out, key, name, value, *conversion)?;
                }
            }
        }

        Ok(out)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn take_until(chars: &mut Peekable<Chars<'_>>, end: char) -> Option<String> {
    let mut taken = String::new();
    for c in chars.by_ref() {
        if c == end {
            return Some(taken);
        }
        taken.push(c);
    }
    None
}

/// Parse `[.N]` followed by a conversion character.
fn parse_conversion(chars: &mut Peekable<Chars<'_>>) -> Option<Conversion> {
    let mut precision = None;
    if chars.peek() == Some(&'.') {
        chars.next();
        let mut digits = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
            digits.push(c);
            chars.next();
        }
        precision = Some(digits.parse::<usize>().ok()?);
    }

    match (chars.next()?, precision) {
        ('d' | 'i', None) => Some(Conversion::Integer),
        ('s', None) => Some(Conversion::Text),
        ('f', precision) => Some(Conversion::Float(
            precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
        )),
        _ => None,
    }
}

fn format_value(
    out: &mut String,
    key: &str,
    name: &str,
    value: &Value,
    conversion: Conversion,
) -> Result<()> {
    use std::fmt::Write;

    let mismatch = || I18nError::InvalidArgument {
        key: key.to_string(),
        name: name.to_string(),
        expected: "a finite number",
    };

    let written = match (conversion, value) {
        (Conversion::Text, value) => write!(out, "{}", value),
        (Conversion::Integer, Value::Int(n)) => write!(out, "{}", n),
        (Conversion::Integer, Value::Float(n)) if n.is_finite() => {
            write!(out, "{}", n.trunc() as i64)
        }
        (Conversion::Float(precision), Value::Int(n)) => {
            write!(out, "{:.*}", precision, *n as f64)
        }
        (Conversion::Float(precision), Value::Float(n)) if n.is_finite() => {
            write!(out, "{:.*}", precision, n)
        }
        _ => return Err(mismatch()),
    };

    written.map_err(|e| I18nError::InvalidTemplate {
        template: name.to_string(),
        reason: e.to_string(),
    })
}
