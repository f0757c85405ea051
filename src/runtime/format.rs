//! printf-style templates for runtime diagnostics raised by generated code.

use crate::runtime::value::{format_number, Value};
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{anychar, char},
    combinator::{map, value},
    multi::many0,
    sequence::preceded,
    IResult,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// `%s`: display form.
    Str,
    /// `%d` / `%i`: number truncated to an integer.
    Int,
    /// `%g` / `%f`: shortest number form.
    Float,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Percent,
    Directive(Directive),
    Unknown(char),
}

fn literal(input: &str) -> IResult<&str, Segment<'_>> {
    map(is_not("%"), Segment::Literal)(input)
}

fn directive(input: &str) -> IResult<&str, Segment<'_>> {
    preceded(
        char('%'),
        alt((
            value(Segment::Percent, char('%')),
            map(anychar, |c| match c {
                's' => Segment::Directive(Directive::Str),
                'd' | 'i' => Segment::Directive(Directive::Int),
                'g' | 'f' => Segment::Directive(Directive::Float),
                other => Segment::Unknown(other),
            }),
        )),
    )(input)
}

pub fn parse_template(template: &str) -> Vec<Segment<'_>> {
    let (rest, mut segments) = match many0(alt((literal, directive)))(template) {
        Ok(parsed) => parsed,
        Err(_) => (template, Vec::new()),
    };
    // A lone trailing `%` is kept as text.
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

/// Directives consume `args` left to right. One with nothing left to consume
/// is copied through as written.
pub fn render_template(template: &str, args: &[&Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    for segment in parse_template(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Unknown(c) => {
                out.push('%');
                out.push(c);
            }
            Segment::Directive(directive) => match args.next() {
                Some(arg) => out.push_str(&render_directive(directive, arg)),
                None => out.push_str(directive_text(directive)),
            },
        }
    }
    out
}

fn render_directive(directive: Directive, arg: &Value) -> String {
    match (directive, arg) {
        (Directive::Int, Value::Number(n)) => format!("{}", *n as i64),
        (Directive::Float, Value::Number(n)) => format_number(*n),
        (_, other) => other.to_string(),
    }
}

fn directive_text(directive: Directive) -> &'static str {
    match directive {
        Directive::Str => "%s",
        Directive::Int => "%d",
        Directive::Float => "%g",
    }
}
