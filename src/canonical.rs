//! Canonical JSON serialization.
//!
//! Object keys are sorted at every level, no whitespace is emitted, and strings are escaped to
//! pure ASCII. Two implementations given the same values produce the same bytes, which is what
//! makes the request signature reproducible.
use std::{collections::BTreeMap, io};

use serde::Serialize;
use serde_json::{ser::Formatter, Serializer, Value};

use crate::Result;

/// Serialize `value` to its canonical JSON form.
pub fn to_canonical_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = sort_json_value(&serde_json::to_value(value)?);

    let mut buf = Vec::new();
    value.serialize(&mut Serializer::with_formatter(&mut buf, AsciiFormatter))?;

    // AsciiFormatter never emits a byte above 0x7e.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn sort_json_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted = map
                .iter()
                .map(|(key, value)| (key.clone(), sort_json_value(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(values) => Value::Array(values.iter().map(sort_json_value).collect()),
        _ => value.clone(),
    }
}

/// Compact formatter that writes every character outside `0x20..=0x7e` as `\uXXXX`.
///
/// Quotes, backslashes and C0 controls are already escaped by serde_json before a fragment
/// reaches [`Formatter::write_string_fragment`].
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if (' '..='~').contains(&c) {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::to_canonical_string;

    #[test]
    fn sorts_keys_without_whitespace() {
        let value = json!({
            "zeta": 1,
            "alpha": {"b": [true, null], "a": "x"},
            "mid": -2.5,
        });
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"alpha":{"a":"x","b":[true,null]},"mid":-2.5,"zeta":1}"#
        );
    }

    #[test]
    fn escapes_non_ascii() {
        assert_eq!(
            to_canonical_string("Zoë Ñúñez").unwrap(),
            r#""Zo\u00eb \u00d1\u00fa\u00f1ez""#
        );
        assert_eq!(
            to_canonical_string("smile \u{1F600}").unwrap(),
            r#""smile \ud83d\ude00""#
        );
    }

    #[test]
    fn escapes_line_separators() {
        assert_eq!(
            to_canonical_string("\u{e9}\u{2028}").unwrap(),
            r#""\u00e9\u2028""#
        );
    }

    #[test]
    fn sorts_objects_inside_arrays() {
        let value = json!([{"b": 1, "a": {"d": 2, "c": 3}}]);
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"[{"a":{"c":3,"d":2},"b":1}]"#
        );
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(
            to_canonical_string("a\"b\\c\nd\te\u{01}\u{7f}").unwrap(),
            r#""a\"b\\c\nd\te\u0001\u007f""#
        );
    }

    #[test]
    fn leaves_slashes_alone() {
        assert_eq!(
            to_canonical_string("https://example.com/a?b=c&d").unwrap(),
            r#""https://example.com/a?b=c&d""#
        );
    }
}
