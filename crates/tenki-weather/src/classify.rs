//! Map weather descriptions to JMA icon codes.

/// Code used when no phrase in the table occurs in the description ("clear")
pub const DEFAULT_WEATHER_CODE: &str = "100";

/// Phrase → icon code, checked in declaration order.
///
/// Order decides overlaps: a description containing both 雨 and 雪 gets 300.
pub const WEATHER_CODE_TABLE: [(&str, &str); 16] = [
    ("晴れ", "100"),
    ("晴時々曇", "101"),
    ("晴一時曇", "102"),
    ("晴時々雨", "103"),
    ("晴一時雨", "104"),
    ("晴時々雪", "105"),
    ("晴一時雪", "106"),
    ("曇り", "200"),
    ("曇時々晴", "201"),
    ("曇一時晴", "202"),
    ("曇時々雨", "203"),
    ("曇一時雨", "204"),
    ("曇時々雪", "205"),
    ("曇一時雪", "206"),
    ("雨", "300"),
    ("雪", "400"),
];

/// Icon code for the first table phrase found in `description`
pub fn weather_code(description: &str) -> &'static str {
    WEATHER_CODE_TABLE
        .iter()
        .find(|(phrase, _)| description.contains(phrase))
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_WEATHER_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear() {
        assert_eq!(weather_code("晴れ"), "100");
    }

    #[test]
    fn test_compound_phrases() {
        assert_eq!(weather_code("晴時々曇"), "101");
        assert_eq!(weather_code("曇一時雨"), "204");
        assert_eq!(weather_code("曇時々雪"), "205");
    }

    #[test]
    fn test_unknown_description_defaults_to_clear() {
        assert_eq!(weather_code("くもり"), DEFAULT_WEATHER_CODE);
        assert_eq!(weather_code(""), DEFAULT_WEATHER_CODE);
    }

    #[test]
    fn test_phrase_found_inside_longer_text() {
        assert_eq!(weather_code("くもり　夜　雨"), "300");
    }

    #[test]
    fn test_first_table_match_wins() {
        // Contains 晴れ and 雨; 晴れ is declared first
        assert_eq!(weather_code("晴れ　時々　雨"), "100");
        // 雪 appears first in the text, 雨 first in the table
        assert_eq!(weather_code("雪か雨"), "300");
        // 曇時々雨 is declared before the bare 雨
        assert_eq!(weather_code("曇時々雨"), "203");
    }
}
