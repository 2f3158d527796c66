//! Pattern-based extraction of translatable units from Android `strings.xml` text.
//!
//! Extraction is deliberately not XML-aware: each unit kind is matched with a
//! regular expression and the whole matched block is kept verbatim, so a unit
//! that is missing in a target locale can be re-inserted with its original
//! formatting. The input grammar this relies on: scalar `<string>` values fit
//! on one line, and array/plural blocks are well nested.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{LocaleResourceMap, ResourceUnit, UnitKind};

const NON_TRANSLATABLE_MARKER: &str = "translatable=\"false\"";

lazy_static! {
    // `<string\s` keeps this from also matching the start of `<string-array`.
    static ref STRING_REGEX: Regex =
        Regex::new(r#"<string\s[^>]*\bname="([^"]+)"[^>]*>(.*?)</string>"#).unwrap();
    static ref STRING_ARRAY_REGEX: Regex =
        Regex::new(r#"(?s)<string-array\b[^>]*\bname="([^"]+)"[^>]*>(.*?)</string-array>"#)
            .unwrap();
    static ref PLURALS_REGEX: Regex =
        Regex::new(r#"(?s)<plurals\b[^>]*\bname="([^"]+)"[^>]*>(.*?)</plurals>"#).unwrap();
}

/// Extracts all translatable units from one resource document.
///
/// Pure function: no side effects, identical input yields an identical map.
/// Units carrying `translatable="false"` anywhere in the matched block are
/// excluded entirely. The three patterns are applied independently and merged;
/// plurals are applied last and win on a name collision. Within one pattern a
/// later duplicate name overwrites the earlier unit.
pub fn extract_units(document: &str) -> LocaleResourceMap {
    let mut map = LocaleResourceMap::new();
    collect_kind(&STRING_REGEX, UnitKind::String, document, &mut map);
    collect_kind(&STRING_ARRAY_REGEX, UnitKind::StringArray, document, &mut map);
    collect_kind(&PLURALS_REGEX, UnitKind::Plurals, document, &mut map);
    map
}

fn collect_kind(regex: &Regex, kind: UnitKind, document: &str, map: &mut LocaleResourceMap) {
    for captures in regex.captures_iter(document) {
        let markup = &captures[0];
        if markup.contains(NON_TRANSLATABLE_MARKER) {
            continue;
        }
        map.insert(ResourceUnit {
            name: captures[1].to_string(),
            kind,
            markup: markup.to_string(),
            body: captures[2].to_string(),
        });
    }
}
