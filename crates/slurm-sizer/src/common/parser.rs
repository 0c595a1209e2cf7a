use std::fmt::{Debug, Display, Formatter};

use nom::IResult;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::error::{ErrorKind, FromExternalError, ParseError};

pub enum ParserError<I> {
    Custom(anyhow::Error),
    Nom(I, ErrorKind),
}

impl<I: Debug> Debug for ParserError<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(error) => f.write_fmt(format_args!("Semantic error at {error}")),
            Self::Nom(input, error) => f.write_fmt(format_args!(
                "Parser error at '{input:?}': expecting {error:?}"
            )),
        }
    }
}

impl<I> ParseError<I> for ParserError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        ParserError::Nom(input, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I: Display, E: Into<anyhow::Error>> FromExternalError<I, E> for ParserError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: E) -> Self {
        ParserError::Custom(anyhow::anyhow!("'{}': {}", input, error.into()))
    }
}

pub(crate) fn format_parse_error<I: Debug>(error: nom::Err<ParserError<I>>) -> anyhow::Error {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => anyhow::anyhow!("{:?}", e),
        nom::Err::Incomplete(_) => anyhow::anyhow!("Parser error: incomplete input"),
    }
}

pub type NomResult<'a, Ret> = IResult<&'a str, Ret, ParserError<&'a str>>;

/// Runs `parser` and fails if any input remains after it.
pub fn consume_all<'a, O, F>(parser: F, input: &'a str) -> anyhow::Result<O>
where
    F: FnMut(&'a str) -> NomResult<'a, O>,
{
    all_consuming(parser)(input)
        .map(|(_, output)| output)
        .map_err(format_parse_error)
}

pub fn p_u64(input: &str) -> NomResult<u64> {
    map_res(digit1, |digits: &str| digits.parse::<u64>())(input)
}

#[cfg(test)]
mod tests {
    use super::{consume_all, p_u64};

    #[test]
    fn test_parse_u64() {
        assert_eq!(consume_all(p_u64, "0").unwrap(), 0);
        assert_eq!(consume_all(p_u64, "1").unwrap(), 1);
        assert_eq!(consume_all(p_u64, "1019").unwrap(), 1019);
    }

    #[test]
    fn test_parse_u64_empty() {
        assert!(consume_all(p_u64, "").is_err());
    }

    #[test]
    fn test_parse_u64_invalid() {
        assert!(consume_all(p_u64, "x").is_err());
        assert!(consume_all(p_u64, "-1").is_err());
    }

    #[test]
    fn test_parse_u64_trailing_input() {
        let error = consume_all(p_u64, "12x").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "Parser error at '\"x\"': expecting Eof"
        );
    }

    #[test]
    fn test_parse_u64_overflow() {
        let error = consume_all(p_u64, "99999999999999999999").unwrap_err();
        assert!(format!("{error}").starts_with("Semantic error at '99999999999999999999'"));
    }
}
