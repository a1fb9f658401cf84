//! This module includes code for parsing an expression in a universal enveloping algebra into an
//! abstract syntax tree.
//!
//! An expression is a sum or difference of products of factors, where a factor is a generator,
//! an integer, a parenthesised expression or a commutator `[a, b]`, optionally raised to a power.
//! Generator names are alphanumeric and start with a letter, and may be followed by an integer in
//! brackets, as in `d[-2]`.

use std::str::FromStr;

use anyhow::{anyhow, Context};
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{alpha1, char, digit1, space0},
    combinator::{map, map_res, opt, peek, recognize},
    error::{ParseError, VerboseError},
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    IResult as IResultBase, Parser,
};

type IResult<I, O> = IResultBase<I, O, VerboseError<I>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementNode {
    Sum(Box<ElementNode>, Box<ElementNode>),
    Product(Box<ElementNode>, Box<ElementNode>),
    Power(Box<ElementNode>, u32),
    Commutator(Box<ElementNode>, Box<ElementNode>),
    Generator(String),
    Scalar(i64),
}

/// Pad both ends with whitespace
fn space<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(space0, f, space0)
}

/// Surround with parentheses
fn parens<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(char('('), f, char(')'))
}

fn digits<T: FromStr>(i: &str) -> IResult<&str, T> {
    map_res(space(digit1), FromStr::from_str)(i)
}

/// Parses `f (sep f)*`, folding the results with `acc`. A trailing separator is left unconsumed.
fn fold_separated<I: Clone, OS, O, E>(
    mut sep: impl Parser<I, OS, E>,
    mut f: impl Parser<I, O, E>,
    mut acc: impl FnMut(O, O) -> O,
) -> impl FnMut(I) -> IResultBase<I, O, E> {
    move |i: I| {
        let (mut i, mut res) = f.parse(i)?;
        loop {
            match sep.parse(i.clone()) {
                Err(nom::Err::Error(_)) => return Ok((i, res)),
                Err(e) => return Err(e),
                Ok((i1, _)) => match f.parse(i1) {
                    Err(nom::Err::Error(_)) => return Ok((i, res)),
                    Err(e) => return Err(e),
                    Ok((i2, o)) => {
                        i = i2;
                        res = acc(res, o);
                    }
                },
            }
        }
    }
}

fn generator(i: &str) -> IResult<&str, String> {
    map(
        recognize(tuple((
            alpha1,
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            opt(delimited(
                char('['),
                pair(opt(char('-')), digit1),
                char(']'),
            )),
        ))),
        |name: &str| name.to_string(),
    )(i)
}

fn commutator(i: &str) -> IResult<&str, ElementNode> {
    map(
        delimited(
            char('['),
            separated_pair(element_expr, char(','), element_expr),
            char(']'),
        ),
        |(a, b)| ElementNode::Commutator(Box::new(a), Box::new(b)),
    )(i)
}

fn element_factor(i: &str) -> IResult<&str, ElementNode> {
    let (i, base) = space(alt((
        commutator,
        map(generator, ElementNode::Generator),
        map(digits, ElementNode::Scalar),
        parens(element_expr),
    )))(i)?;
    let (i, exponent) = opt(preceded(char('^'), digits))(i)?;
    Ok((
        i,
        match exponent {
            Some(n) => ElementNode::Power(Box::new(base), n),
            None => base,
        },
    ))
}

fn element_term(i: &str) -> IResult<&str, ElementNode> {
    let (i, sign) = opt(alt((char('+'), char('-'))))(i)?;

    let (i, mut res) = fold_separated(char('*'), element_factor, |acc, val| {
        ElementNode::Product(Box::new(acc), Box::new(val))
    })(i)?;

    if let Some('-') = sign {
        res = ElementNode::Product(Box::new(ElementNode::Scalar(-1)), Box::new(res));
    }
    Ok((i, res))
}

fn element_expr(i: &str) -> IResult<&str, ElementNode> {
    fold_separated(
        peek(alt((char('+'), char('-')))),
        space(element_term),
        |acc, val| ElementNode::Sum(Box::new(acc), Box::new(val)),
    )(i)
}

fn convert_error(i: &str) -> impl FnOnce(nom::Err<VerboseError<&str>>) -> anyhow::Error + '_ {
    move |err| {
        anyhow!(match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => nom::error::convert_error(i, e),
            _ => format!("{err:#}"),
        })
    }
}

pub fn parse_element(i: &str) -> anyhow::Result<ElementNode> {
    let (rest, parse_tree) = element_expr(i)
        .map_err(convert_error(i))
        .with_context(|| format!("Error when parsing element {i}"))?;
    if rest.is_empty() {
        Ok(parse_tree)
    } else {
        Err(anyhow!(
            "Failed to consume all of input. Remaining: '{rest}'"
        ))
    }
}
