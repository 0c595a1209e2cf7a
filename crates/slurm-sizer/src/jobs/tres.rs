//! Parsing of trackable resource (TRES) requests as reported by `squeue`,
//! e.g. `gpu:4` or `gpu:2,license/matlab:1`.

use itertools::Itertools;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::map;
use nom::multi::separated_list1;
use nom::sequence::separated_pair;

use crate::Map;
use crate::common::parser::{NomResult, consume_all, p_u64};

/// Value reported by `squeue` when no resource was requested.
pub const TRES_NONE: &str = "N/A";

pub const GPU_RESOURCE_NAME: &str = "gpu";

pub type TresMap = Map<String, u64>;

pub fn is_valid_tres_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

fn p_tres_name(input: &str) -> NomResult<&str> {
    take_while1(is_valid_tres_char)(input)
}

fn p_tres_item(input: &str) -> NomResult<(String, u64)> {
    map(
        separated_pair(p_tres_name, char(':'), p_u64),
        |(name, count)| (name.to_string(), count),
    )(input)
}

fn p_tres_list(input: &str) -> NomResult<Vec<(String, u64)>> {
    separated_list1(char(','), p_tres_item)(input)
}

/// Parses a comma-separated list of `<name>:<count>` items.
/// `N/A` stands for no requested resources.
pub fn parse_tres(input: &str) -> anyhow::Result<TresMap> {
    let input = input.trim();
    if input == TRES_NONE {
        return Ok(TresMap::new());
    }
    let items = consume_all(p_tres_list, input)?;
    Ok(items.into_iter().collect())
}

/// Formats resources back into the `squeue` notation, sorted by name.
pub fn format_tres(tres: &TresMap) -> String {
    if tres.is_empty() {
        return TRES_NONE.to_string();
    }
    tres.iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(name, count)| format!("{name}:{count}"))
        .join(",")
}

#[cfg(test)]
mod test {
    use super::*;

    fn tres(items: &[(&str, u64)]) -> TresMap {
        items
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(parse_tres("gpu:12").unwrap(), tres(&[("gpu", 12)]));
    }

    #[test]
    fn test_parse_none() {
        assert!(parse_tres("N/A").unwrap().is_empty());
        assert!(parse_tres("  N/A ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_multiple() {
        assert_eq!(
            parse_tres("gpu:2,license/matlab:1,mps.v2:100").unwrap(),
            tres(&[("gpu", 2), ("license/matlab", 1), ("mps.v2", 100)])
        );
    }

    #[test]
    fn test_parse_repeated_name_keeps_last() {
        assert_eq!(parse_tres("gpu:1,gpu:3").unwrap(), tres(&[("gpu", 3)]));
    }

    #[test]
    fn test_parse_zero_count() {
        assert_eq!(parse_tres("gpu:0").unwrap(), tres(&[("gpu", 0)]));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "gpu",
            "gpu:",
            ":4",
            "gpu:x",
            "gpu:-1",
            "gpu:tesla:2",
            "gpu:2,",
            "gpu:2,,mem:3",
            "gpu 2",
            "n/a",
        ] {
            assert!(parse_tres(input).is_err(), "`{input}` should not parse");
        }
    }

    #[test]
    fn test_parse_error_message() {
        let error = parse_tres("gpu:tesla:2").unwrap_err();
        assert_eq!(
            format!("{error}"),
            "Parser error at '\"tesla:2\"': expecting Digit"
        );
    }

    #[test]
    fn test_format_tres() {
        assert_eq!(format_tres(&TresMap::new()), "N/A");
        assert_eq!(
            format_tres(&tres(&[("mem", 3), ("gpu", 2)])),
            "gpu:2,mem:3"
        );
    }
}
