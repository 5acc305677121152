use shakmaty::{File, Rank, Square};
use thiserror::Error;

/// Error for a label that names no square on the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a square on the board, expected a-h followed by 1-8")]
pub struct SquareParseError(String);

/// Parses a label such as `"e4"` into a square.
///
/// The file letter may be either case and surrounding whitespace is ignored.
///
/// # Examples
/// ```
/// # use racing_kings::game_state::{Square, parse_square};
/// assert_eq!(parse_square("E4"), Ok(Square::E4));
/// assert!(parse_square("e9").is_err());
/// ```
pub fn parse_square(label: &str) -> Result<Square, SquareParseError> {
    label
        .trim()
        .to_ascii_lowercase()
        .parse()
        .map_err(|_| SquareParseError(label.trim().to_string()))
}

/// Steps `df` files and `dr` ranks away from `from`, or `None` past the edge.
#[inline]
pub fn step(from: Square, df: i32, dr: i32) -> Option<Square> {
    let file: File = from.file().offset(df)?;
    let rank: Rank = from.rank().offset(dr)?;
    Some(Square::from_coords(file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a1", Square::A1)]
    #[test_case("h1", Square::H1)]
    #[test_case("a8", Square::A8)]
    #[test_case("h8", Square::H8)]
    #[test_case("e4", Square::E4)]
    #[test_case("E4", Square::E4; "uppercase file")]
    #[test_case(" c7\n", Square::C7; "surrounding whitespace")]
    fn test_parse_square(label: &str, expected: Square) {
        assert_eq!(parse_square(label), Ok(expected));
    }

    #[test_case(""; "empty")]
    #[test_case("a"; "too short")]
    #[test_case("abc"; "too long")]
    #[test_case("a9"; "rank too high")]
    #[test_case("a0"; "rank too low")]
    #[test_case("i1"; "file past h")]
    #[test_case("11"; "digit file")]
    fn test_parse_square_invalid(label: &str) {
        assert!(parse_square(label).is_err());
    }

    #[test]
    fn test_error_names_the_label() {
        let err = parse_square(" z4 ").expect_err("z is not a file");
        assert!(err.to_string().starts_with("'z4'"));
    }

    #[test]
    fn test_every_label_survives_parsing() {
        for square in Square::ALL {
            assert_eq!(parse_square(&square.to_string()), Ok(square));
        }
    }

    #[test_case(Square::D4, 1, 1, Some(Square::E5))]
    #[test_case(Square::D4, -2, -1, Some(Square::B3))]
    #[test_case(Square::A1, -1, 0, None; "off the a-file")]
    #[test_case(Square::H4, 1, 0, None; "off the h-file without wrapping")]
    #[test_case(Square::H8, 0, 1, None; "off the top")]
    #[test_case(Square::C2, 1, -2, None; "off the bottom")]
    fn test_step(from: Square, df: i32, dr: i32, expected: Option<Square>) {
        assert_eq!(step(from, df, dr), expected);
    }
}
