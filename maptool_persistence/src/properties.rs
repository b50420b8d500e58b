//! Reading and writing the `properties.xml` part of a packed file.
//!
//! Properties are stored as a serialized string-keyed map:
//!
//! ```xml
//! <map>
//!   <entry>
//!     <string>version</string>
//!     <string>1.4.1</string>
//!   </entry>
//!   <entry>
//!     <string>herolab</string>
//!     <boolean>false</boolean>
//!   </entry>
//! </map>
//! ```
//!
//! Scalar values keep the name of their type element so that non-string values
//! survive a read-modify-write cycle. Anything else (nested collections, objects)
//! is kept as raw XML and written back unchanged.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;


/// An error that can occur while parsing `properties.xml`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertiesParseError {
    #[error("document is not a serialized property map (missing <map> root element)")]
    NotAPropertyMap,

    #[error("expected an <entry> element inside the property map, found \"{}\"", .content)]
    UnexpectedContent { content: String },

    #[error("property map ends inside an unterminated <entry> element")]
    UnterminatedEntry,

    #[error("property map entry has no <string> key: \"{}\"", .entry)]
    MissingKey { entry: String },

    #[error(
        "value of property \"{}\" opens with <{}> but closes with </{}>",
        .key,
        .opening_tag,
        .closing_tag
    )]
    MismatchedValueTag {
        key: String,
        opening_tag: String,
        closing_tag: String,
    },
}


/// The value of a single property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// A single text value along with the name of its serialized type (e.g. `string`).
    /// Self-closing elements such as `<string/>` or `<null/>` have an empty value.
    Scalar { value_type: String, value: String },

    /// Value XML that isn't a scalar, stored exactly as read.
    Raw(String),
}

impl PropertyValue {
    pub fn string<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self::Scalar {
            value_type: "string".to_string(),
            value: value.into(),
        }
    }

    /// Returns the text of a scalar value.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar { value, .. } => Some(value.as_str()),
            Self::Raw(_) => None,
        }
    }
}


/// Ordered key-value properties of a packed file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedProperties {
    entries: Vec<(String, PropertyValue)>,
}


const ENTRY_OPENING_TAG: &str = "<entry>";
const ENTRY_CLOSING_TAG: &str = "</entry>";
const MAP_CLOSING_TAG: &str = "</map>";


fn map_root_pattern() -> &'static Regex {
    static MAP_ROOT_PATTERN: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a constant that is known to compile.
    MAP_ROOT_PATTERN.get_or_init(|| Regex::new(r"<map(\s[^>]*)?/?>").unwrap())
}

fn entry_tag_pattern() -> &'static Regex {
    static ENTRY_TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a constant that is known to compile.
    ENTRY_TAG_PATTERN.get_or_init(|| Regex::new(r"</?entry>").unwrap())
}

fn key_pattern() -> &'static Regex {
    static KEY_PATTERN: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a constant that is known to compile.
    KEY_PATTERN.get_or_init(|| Regex::new(r"^<string>(?P<key>[^<]*)</string>").unwrap())
}

fn scalar_value_pattern() -> &'static Regex {
    static SCALAR_VALUE_PATTERN: OnceLock<Regex> = OnceLock::new();

    SCALAR_VALUE_PATTERN.get_or_init(|| {
        // PANIC SAFETY: The pattern is a constant that is known to compile.
        Regex::new(
            r"^<(?P<type>[A-Za-z][\w.\-]*)>(?P<value>[^<]*)</(?P<closing>[A-Za-z][\w.\-]*)>$",
        )
        .unwrap()
    })
}

fn empty_value_pattern() -> &'static Regex {
    static EMPTY_VALUE_PATTERN: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a constant that is known to compile.
    EMPTY_VALUE_PATTERN.get_or_init(|| Regex::new(r"^<(?P<type>[A-Za-z][\w.\-]*)\s*/>$").unwrap())
}

fn xml_reference_pattern() -> &'static Regex {
    static XML_REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

    // PANIC SAFETY: The pattern is a constant that is known to compile.
    XML_REFERENCE_PATTERN.get_or_init(|| {
        Regex::new(r"&(?:#x(?P<hex>[0-9A-Fa-f]+)|#(?P<decimal>[0-9]+)|(?P<named>lt|gt|quot|apos|amp));")
            .unwrap()
    })
}


/// Decodes named entities and numeric character references in a single pass.
///
/// References that don't name a valid character are left as they are.
fn unescape_xml_text(text: &str) -> String {
    xml_reference_pattern()
        .replace_all(text, |captures: &Captures| {
            let decoded = if let Some(hex) = captures.name("hex") {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(decimal) = captures.name("decimal") {
                decimal.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match captures.name("named").map(|named| named.as_str()) {
                    Some("lt") => Some('<'),
                    Some("gt") => Some('>'),
                    Some("quot") => Some('"'),
                    Some("apos") => Some('\''),
                    Some("amp") => Some('&'),
                    _ => None,
                }
            };

            match decoded {
                Some(character) => character.to_string(),
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}

fn escape_xml_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            // Carriage returns would otherwise be normalized away by XML parsers.
            '\r' => escaped.push_str("&#xd;"),
            other => escaped.push(other),
        }
    }

    escaped
}


/// Returns the index of the `</entry>` that closes an entry whose body starts at `body`.
fn find_entry_body_end(body: &str) -> Result<usize, PropertiesParseError> {
    let mut depth = 1usize;

    for entry_tag in entry_tag_pattern().find_iter(body) {
        if entry_tag.as_str() == ENTRY_CLOSING_TAG {
            depth -= 1;

            if depth == 0 {
                return Ok(entry_tag.start());
            }
        } else {
            depth += 1;
        }
    }

    Err(PropertiesParseError::UnterminatedEntry)
}

fn parse_entry(entry_body: &str) -> Result<(String, PropertyValue), PropertiesParseError> {
    let entry_body = entry_body.trim();

    let key_captures =
        key_pattern()
            .captures(entry_body)
            .ok_or_else(|| PropertiesParseError::MissingKey {
                entry: entry_body.to_string(),
            })?;

    let key = unescape_xml_text(&key_captures["key"]);
    let value_xml = entry_body[key_captures[0].len()..].trim();


    if let Some(value_captures) = scalar_value_pattern().captures(value_xml) {
        let opening_tag = &value_captures["type"];
        let closing_tag = &value_captures["closing"];

        if opening_tag != closing_tag {
            return Err(PropertiesParseError::MismatchedValueTag {
                key,
                opening_tag: opening_tag.to_string(),
                closing_tag: closing_tag.to_string(),
            });
        }

        let value = PropertyValue::Scalar {
            value_type: opening_tag.to_string(),
            value: unescape_xml_text(&value_captures["value"]),
        };

        return Ok((key, value));
    }

    if let Some(value_captures) = empty_value_pattern().captures(value_xml) {
        let value = PropertyValue::Scalar {
            value_type: value_captures["type"].to_string(),
            value: String::new(),
        };

        return Ok((key, value));
    }

    Ok((key, PropertyValue::Raw(value_xml.to_string())))
}


impl PackedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(xml: &str) -> Result<Self, PropertiesParseError> {
        let map_root = map_root_pattern()
            .find(xml)
            .ok_or(PropertiesParseError::NotAPropertyMap)?;

        let mut properties = Self::new();

        if map_root.as_str().ends_with("/>") {
            return Ok(properties);
        }


        let mut remaining = &xml[map_root.end()..];

        loop {
            remaining = remaining.trim_start();

            if remaining.starts_with(MAP_CLOSING_TAG) {
                break;
            }

            let Some(entry_body) = remaining.strip_prefix(ENTRY_OPENING_TAG) else {
                if remaining.is_empty() {
                    return Err(PropertiesParseError::UnterminatedEntry);
                }

                return Err(PropertiesParseError::UnexpectedContent {
                    content: remaining.chars().take(40).collect(),
                });
            };

            let entry_body_end = find_entry_body_end(entry_body)?;
            let (key, value) = parse_entry(&entry_body[..entry_body_end])?;
            properties.insert(key, value);

            remaining = &entry_body[entry_body_end + ENTRY_CLOSING_TAG.len()..];
        }

        Ok(properties)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    /// Returns the text of a scalar property, regardless of its type.
    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_scalar)
    }

    /// Sets a property, keeping its position if it already exists.
    pub fn insert<K>(&mut self, key: K, value: PropertyValue)
    where
        K: Into<String>,
    {
        let key = key.into();

        match self
            .entries
            .iter_mut()
            .find(|(entry_key, _)| *entry_key == key)
        {
            Some((_, existing_value)) => *existing_value = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn to_xml(&self) -> String {
        if self.entries.is_empty() {
            return "<map/>\n".to_string();
        }

        let mut xml = String::from("<map>\n");

        for (key, value) in &self.entries {
            xml.push_str("  <entry>\n");
            xml.push_str(&format!("    <string>{}</string>\n", escape_xml_text(key)));

            match value {
                PropertyValue::Scalar { value_type, value } if value.is_empty() => {
                    xml.push_str(&format!("    <{}/>\n", value_type));
                }
                PropertyValue::Scalar { value_type, value } => {
                    xml.push_str(&format!(
                        "    <{}>{}</{}>\n",
                        value_type,
                        escape_xml_text(value),
                        value_type
                    ));
                }
                PropertyValue::Raw(raw_xml) => {
                    xml.push_str(&format!("    {}\n", raw_xml));
                }
            }

            xml.push_str("  </entry>\n");
        }

        xml.push_str("</map>\n");
        xml
    }
}



#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_PROPERTIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map>
  <entry>
    <string>campaignVersion</string>
    <string>1.3.70</string>
  </entry>
  <entry>
    <string>version</string>
    <string>1.3.b70</string>
  </entry>
  <entry>
    <string>herolab</string>
    <boolean>false</boolean>
  </entry>
</map>"#;

    #[test]
    fn parses_entries_in_order() {
        let properties = PackedProperties::parse(SAMPLE_PROPERTIES).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(properties.get_value("campaignVersion"), Some("1.3.70"));
        assert_eq!(properties.get_value("version"), Some("1.3.b70"));
        assert_eq!(
            properties.get("herolab"),
            Some(&PropertyValue::Scalar {
                value_type: "boolean".to_string(),
                value: "false".to_string(),
            })
        );

        let keys: Vec<&str> = properties.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["campaignVersion", "version", "herolab"]);
    }

    #[test]
    fn parses_empty_map() {
        assert!(PackedProperties::parse("<map/>").unwrap().is_empty());
        assert!(PackedProperties::parse("<map>\n</map>").unwrap().is_empty());
    }

    #[test]
    fn rejects_other_documents() {
        assert_eq!(
            PackedProperties::parse("<campaign/>"),
            Err(PropertiesParseError::NotAPropertyMap)
        );
    }

    #[test]
    fn rejects_mismatched_value_tags() {
        let error = PackedProperties::parse(
            "<map><entry><string>version</string><string>1.4</int></entry></map>",
        )
        .unwrap_err();

        assert!(matches!(
            error,
            PropertiesParseError::MismatchedValueTag { ref key, .. } if key == "version"
        ));
    }

    #[test]
    fn written_properties_read_back_identically() {
        let mut properties = PackedProperties::parse(SAMPLE_PROPERTIES).unwrap();
        properties.insert("version", PropertyValue::string("1.4.1"));
        properties.insert("note", PropertyValue::string("Tom & Jerry <3"));

        let reparsed = PackedProperties::parse(&properties.to_xml()).unwrap();

        assert_eq!(reparsed, properties);
        assert_eq!(reparsed.get_value("version"), Some("1.4.1"));
        assert_eq!(reparsed.get_value("note"), Some("Tom & Jerry <3"));

        let keys: Vec<&str> = reparsed.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["campaignVersion", "version", "herolab", "note"]);
    }

    #[test]
    fn keeps_empty_values() {
        let xml = "<map>\n\
            <entry><string>version</string><string>1.4.1</string></entry>\n\
            <entry><string>empty</string><string/></entry>\n\
            <entry><string>nothing</string><null/></entry>\n\
            </map>";

        let properties = PackedProperties::parse(xml).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(properties.get_value("empty"), Some(""));
        assert_eq!(
            properties.get("nothing"),
            Some(&PropertyValue::Scalar {
                value_type: "null".to_string(),
                value: String::new(),
            })
        );

        let written = properties.to_xml();
        assert!(written.contains("<string/>"));
        assert!(written.contains("<null/>"));
        assert_eq!(PackedProperties::parse(&written).unwrap(), properties);
    }

    #[test]
    fn keeps_non_scalar_values_verbatim() {
        let nested = "<map><entry><string>inner</string><int>5</int></entry></map>";
        let xml = format!(
            "<map>\
            <entry><string>settings</string>{}</entry>\
            <entry><string>owners</string><list><string>gm</string><string>alice</string></list></entry>\
            <entry><string>version</string><string>1.3.70</string></entry>\
            </map>",
            nested
        );

        let properties = PackedProperties::parse(&xml).unwrap();

        assert_eq!(properties.len(), 3);
        assert_eq!(
            properties.get("settings"),
            Some(&PropertyValue::Raw(nested.to_string()))
        );
        assert_eq!(properties.get_value("settings"), None);
        assert_eq!(properties.get_value("version"), Some("1.3.70"));

        let reparsed = PackedProperties::parse(&properties.to_xml()).unwrap();
        assert_eq!(reparsed, properties);
    }

    #[test]
    fn decodes_character_references() {
        let xml = "<map><entry><string>note</string>\
            <string>line&#xd;&#10;&amp;lt;tag&gt;</string></entry></map>";

        let properties = PackedProperties::parse(xml).unwrap();

        assert_eq!(properties.get_value("note"), Some("line\r\n&lt;tag>"));

        let written = properties.to_xml();
        assert!(written.contains("line&#xd;"));
        assert!(!written.contains("&amp;#xd;"));
        assert_eq!(PackedProperties::parse(&written).unwrap(), properties);
    }

    #[test]
    fn rejects_unterminated_entries() {
        assert_eq!(
            PackedProperties::parse("<map><entry><string>version</string><string>1</string>"),
            Err(PropertiesParseError::UnterminatedEntry)
        );
        assert!(matches!(
            PackedProperties::parse("<map><entry><int>1</int></entry></map>"),
            Err(PropertiesParseError::MissingKey { .. })
        ));
    }
}
