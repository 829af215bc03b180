//! Placeholder parsing and substitution.

use super::Context;
use crate::error::RenderError;
use crate::user_exit::Arg;

/// Fill every placeholder in `text` from `context`.
///
/// # Returns
///
/// * `Ok(String)` - The text with all placeholders substituted
/// * `Err(RenderError)` - If a placeholder is malformed or unresolvable
pub fn substitute(text: &str, context: &Context<'_>) -> Result<String, RenderError> {
    walk(text, |placeholder, out| {
        let arg = placeholder.resolve(context)?;
        let value = match placeholder.conversion {
            Conversion::Display => arg.display(),
            Conversion::Debug => arg.debug(),
        };
        placeholder.spec.pad(out, value);
        Ok(())
    })
}

/// Check placeholder syntax without resolving any value.
///
/// Catches everything that is wrong regardless of the arguments an instance
/// is raised with: unmatched braces, mixed numbering, unknown conversions,
/// unsupported specs and placeholders of an unknown form.
pub fn check(text: &str) -> Result<(), RenderError> {
    walk(text, |_, _| Ok(())).map(|_| ())
}

/// Scan `text`, copying literals and handing each parsed placeholder to
/// `on_placeholder`.
fn walk<F>(text: &str, mut on_placeholder: F) -> Result<String, RenderError>
where
    F: FnMut(&Placeholder<'_>, &mut String) -> Result<(), RenderError>,
{
    let mut result = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    let mut numbering = Numbering::default();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                // Check for escape sequence {{
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                    continue;
                }

                let body_start = pos + 1;
                let body_end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some(_) => {}
                        None => return Err(RenderError::UnmatchedBrace { position: pos }),
                    }
                };

                let placeholder = Placeholder::parse(&text[body_start..body_end], pos, &mut numbering)?;
                on_placeholder(&placeholder, &mut result)?;
            }
            '}' => {
                // `}}` is an escaped brace, a lone `}` is literal
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Tracks whether a template numbers its arguments automatically or by hand.
#[derive(Debug, Default)]
struct Numbering {
    next_auto: usize,
    auto: bool,
    manual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Positional(usize),
    SelfField(&'a str),
    Argv(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Display,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    align: Align,
    width: usize,
}

/// A parsed `{field!conversion:spec}`.
#[derive(Debug)]
struct Placeholder<'a> {
    target: Target<'a>,
    conversion: Conversion,
    spec: Spec,
    position: usize,
}

impl<'a> Placeholder<'a> {
    fn parse(body: &'a str, position: usize, numbering: &mut Numbering) -> Result<Self, RenderError> {
        let (head, spec) = match body.split_once(':') {
            Some((head, spec)) => (head, Some(spec)),
            None => (body, None),
        };
        let (field, conversion) = match head.split_once('!') {
            Some((field, conversion)) => (field, Some(conversion)),
            None => (head, None),
        };

        Ok(Self {
            target: parse_target(field.trim(), position, numbering)?,
            conversion: parse_conversion(conversion, position)?,
            spec: parse_spec(spec, position)?,
            position,
        })
    }

    fn resolve(&self, context: &Context<'_>) -> Result<Arg, RenderError> {
        match self.target {
            Target::Positional(index) => {
                context
                    .args
                    .get(index)
                    .cloned()
                    .ok_or(RenderError::MissingArgument {
                        index,
                        supplied: context.args.len(),
                        position: self.position,
                    })
            }
            Target::SelfField(name) => {
                context
                    .fields
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RenderError::UnknownField {
                        name: name.to_string(),
                        position: self.position,
                    })
            }
            Target::Argv(index) => context
                .settings
                .argv_at(index)
                .map(Arg::new)
                .ok_or(RenderError::MissingArgv {
                    index,
                    len: context.settings.argv_len(),
                    position: self.position,
                }),
        }
    }
}

fn parse_target<'a>(
    field: &'a str,
    position: usize,
    numbering: &mut Numbering,
) -> Result<Target<'a>, RenderError> {
    let unknown = || RenderError::UnknownPlaceholder {
        name: field.to_string(),
        position,
    };

    if field.is_empty() {
        if numbering.manual {
            return Err(RenderError::MixedNumbering { position });
        }
        numbering.auto = true;
        let index = numbering.next_auto;
        numbering.next_auto += 1;
        return Ok(Target::Positional(index));
    }

    if field.bytes().all(|b| b.is_ascii_digit()) {
        if numbering.auto {
            return Err(RenderError::MixedNumbering { position });
        }
        numbering.manual = true;
        return field.parse().map(Target::Positional).map_err(|_| unknown());
    }

    if let Some(name) = field.strip_prefix("self.") {
        if name.is_empty() {
            return Err(unknown());
        }
        return Ok(Target::SelfField(name));
    }

    if let Some(index) = field
        .strip_prefix("argv[")
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return index.parse().map(Target::Argv).map_err(|_| unknown());
    }

    Err(unknown())
}

fn parse_conversion(conversion: Option<&str>, position: usize) -> Result<Conversion, RenderError> {
    match conversion {
        None | Some("s") => Ok(Conversion::Display),
        Some("r") => Ok(Conversion::Debug),
        Some(other) => Err(RenderError::UnknownConversion {
            conversion: other.to_string(),
            position,
        }),
    }
}

/// Parse a `[<|>|^]WIDTH` spec; no spec means no padding.
fn parse_spec(spec: Option<&str>, position: usize) -> Result<Spec, RenderError> {
    let Some(spec) = spec else {
        return Ok(Spec {
            align: Align::Left,
            width: 0,
        });
    };
    let unsupported = || RenderError::UnsupportedSpec {
        spec: spec.to_string(),
        position,
    };

    let (align, digits) = match spec.chars().next() {
        Some('<') => (Align::Left, &spec[1..]),
        Some('>') => (Align::Right, &spec[1..]),
        Some('^') => (Align::Center, &spec[1..]),
        _ => (Align::Left, spec),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unsupported());
    }
    let width = digits.parse().map_err(|_| unsupported())?;

    Ok(Spec { align, width })
}

impl Spec {
    fn pad(&self, out: &mut String, value: &str) {
        let fill = self.width.saturating_sub(value.chars().count());
        let (left, right) = match self.align {
            Align::Left => (0, fill),
            Align::Right => (fill, 0),
            Align::Center => (fill / 2, fill - fill / 2),
        };
        out.extend(std::iter::repeat_n(' ', left));
        out.push_str(value);
        out.extend(std::iter::repeat_n(' ', right));
    }
}
