/// A user's selection, resolved against a menu of `len` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Run the entry at this zero-based position.
    Action(usize),
    /// The synthesized exit option (`len + 1`).
    Exit,
    /// An integer outside `1..=len + 1`.
    OutOfRange(i64),
    /// The line is not a base-10 integer.
    Invalid,
}

impl Choice {
    /// Parses `line` as a base-10 integer and maps it onto a menu of `len` entries.
    ///
    /// No trimming is done: `" 1"` is invalid, `"+1"` and `"01"` select the first entry.
    pub fn parse(line: &str, len: usize) -> Self {
        let Ok(value) = line.parse::<i64>() else {
            return Choice::Invalid;
        };
        let exit = i64::try_from(len).map_or(i64::MAX, |n| n.saturating_add(1));

        match value {
            v if v >= 1 && v < exit => Choice::Action((v - 1) as usize),
            v if v == exit => Choice::Exit,
            v => Choice::OutOfRange(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 2, Choice::Action(0))]
    #[case("2", 2, Choice::Action(1))]
    #[case("+1", 2, Choice::Action(0))]
    #[case("01", 2, Choice::Action(0))]
    #[case("3", 2, Choice::Exit)]
    #[case("1", 0, Choice::Exit)]
    #[case("0", 2, Choice::OutOfRange(0))]
    #[case("-1", 2, Choice::OutOfRange(-1))]
    #[case("4", 2, Choice::OutOfRange(4))]
    #[case("abc", 2, Choice::Invalid)]
    #[case("", 2, Choice::Invalid)]
    #[case(" 1", 2, Choice::Invalid)]
    #[case("1.0", 2, Choice::Invalid)]
    #[case("99999999999999999999", 2, Choice::Invalid)]
    fn test_parse_choice(#[case] line: &str, #[case] len: usize, #[case] expected: Choice) {
        assert_eq!(Choice::parse(line, len), expected);
    }
}
