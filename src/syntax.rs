//! Text form of a grammar: a dictionary literal mapping each symbol to its productions.
//!
//! ```text
//! # optional comments
//! grammar = {
//!     "<start>": ["<digit><digit>"],
//!     "<digit>": ["0", '1'],
//! }
//! ```

use peg::parser;

parser! {
/// Grammar files are parsed once up front, so this parser favours clarity over speed.
pub grammar dict() for str {
    pub rule rules() -> Vec<(String, Vec<String>)>
        = _ assignment()? "{" _ r:(definition() ** (_ "," _)) _ ","? _ "}" _ { r }

    rule assignment()
        = identifier() _ "=" _

    rule identifier()
        = quiet!{['a'..='z' | 'A'..='Z' | '_'] ['a'..='z' | 'A'..='Z' | '_' | '0'..='9']*}
        / expected!("identifier")

    rule definition() -> (String, Vec<String>)
        = s:string() _ ":" _ p:productions() { (s, p) }

    rule productions() -> Vec<String>
        = "[" _ l:(string() ** (_ "," _)) _ ","? _ "]" { l }

    rule string() -> String
        = "\"" s:(double_char()*) "\"" { s.into_iter().collect() }
        / "'" s:(single_char()*) "'" { s.into_iter().collect() }

    rule double_char() -> char
        = escape_char()
        / c:[^'"' | '\\' | '\n'] { c }

    rule single_char() -> char
        = escape_char()
        / c:[^'\'' | '\\' | '\n'] { c }

    rule escape_char() -> char
        = "\\\"" { '"' }
        / "\\'" { '\'' }
        / "\\\\" { '\\' }
        / "\\n" { '\n' }
        / "\\t" { '\t' }
        / "\\r" { '\r' }
        / "\\0" { '\0' }
        / "\\u{" value:$(['0'..='9' | 'a'..='f' | 'A'..='F']+) "}" {?
              u32::from_str_radix(value, 16).ok().and_then(char::from_u32).ok_or("valid unicode code point")
          }
        / expected!("valid escape sequence")

    rule _ = quiet!{([' ' | '\n' | '\t' | '\r'] / comment())*}

    rule comment() = "#" [^'\n']*
}}

/// Writes `s` as a double quoted string that [`dict::rules`] reads back unchanged.
pub(crate) fn quote(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dict_literal() {
        let rules = dict::rules(
            r#"
            # digits
            grammar = {
                "<start>": ["<digit><digit>"],
                '<digit>': ['0', "1",],
                "<empty>": [],
            }
            "#,
        )
        .unwrap();
        assert_eq!(
            rules,
            vec![
                ("<start>".to_string(), vec!["<digit><digit>".to_string()]),
                ("<digit>".to_string(), vec!["0".to_string(), "1".to_string()]),
                ("<empty>".to_string(), vec![]),
            ]
        );
    }

    #[test]
    fn parses_without_assignment() {
        let rules = dict::rules(r#"{"<start>": ["a"]}"#).unwrap();
        assert_eq!(rules, vec![("<start>".to_string(), vec!["a".to_string()])]);
        assert!(dict::rules("{}").unwrap().is_empty());
    }

    #[test]
    fn unescapes() {
        let rules = dict::rules(r#"{"<q>": ["\"", '\'', "\\", "a\tb\n", "\u{e9}", "'", '"']}"#)
            .unwrap();
        assert_eq!(rules[0].1, ["\"", "'", "\\", "a\tb\n", "é", "'", "\""]);
    }

    #[test]
    fn rejects_malformed() {
        for x in [
            r#"{"<start>": "a"}"#,
            r#"{"<start>": ["a"]"#,
            r#"{"<start>" ["a"]}"#,
            r#"{<start>: ["a"]}"#,
            r#"{"<start>": ["\q"]}"#,
            r#"1grammar = {}"#,
            r#"{"<start>": ["a"]} trailing"#,
        ] {
            assert!(dict::rules(x).is_err(), "{}", x);
        }
    }

    #[test]
    fn quote_reads_back() {
        for s in ["", "plain", "\"quoted\"", "back\\slash", "line\nbreak\t\r\0", "é<a>"] {
            let mut quoted = String::new();
            quote(s, &mut quoted);
            let text = format!("{{\"<s>\": [{}]}}", quoted);
            assert_eq!(dict::rules(&text).unwrap()[0].1, [s]);
        }
    }
}
