//! Set-difference between a base-locale map and a target-locale map.

use crate::types::{LocaleResourceMap, ResourceUnit};

/// Returns the units to translate for one (file, locale) pair, in the order
/// they appear in the base document.
///
/// A base unit is included when it is non-blank in the base and either absent
/// from the target or blank there. Blank-in-target counts as missing, so a
/// manually placed empty value is retranslated on the next run. An empty
/// result means the locale is fully translated and the task stops without a
/// network call or a write.
pub fn missing_units(base: &LocaleResourceMap, target: &LocaleResourceMap) -> Vec<ResourceUnit> {
    base.units()
        .filter(|unit| !unit.is_blank())
        .filter(|unit| target.get(&unit.name).is_none_or(ResourceUnit::is_blank))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_units;
    use indoc::indoc;

    #[test]
    fn test_diff_against_self_is_empty() {
        let base = extract_units(indoc! {r#"
            <resources>
                <string name="a">Hello</string>
                <string-array name="days">
                    <item>Mon</item>
                </string-array>
            </resources>
        "#});
        assert!(missing_units(&base, &base).is_empty());
    }

    #[test]
    fn test_diff_reports_only_absent_keys_in_base_order() {
        let base = extract_units(indoc! {r#"
            <resources>
                <string name="a">Hello</string>
                <string name="b">World</string>
                <string name="c">Again</string>
            </resources>
        "#});
        let target = extract_units(r#"<resources><string name="b">Monde</string></resources>"#);
        let missing = missing_units(&base, &target);
        let names: Vec<_> = missing.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(missing[0].markup, r#"<string name="a">Hello</string>"#);
    }

    #[test]
    fn test_diff_against_empty_target_returns_all() {
        let base = extract_units(r#"<resources><string name="a">Hello</string></resources>"#);
        let target = LocaleResourceMap::new();
        assert_eq!(missing_units(&base, &target).len(), 1);
    }

    #[test]
    fn test_blank_in_target_counts_as_missing() {
        let base = extract_units(r#"<resources><string name="a">Hello</string></resources>"#);
        let target = extract_units(r#"<resources><string name="a"></string></resources>"#);
        assert_eq!(missing_units(&base, &target).len(), 1);
    }

    #[test]
    fn test_blank_in_base_is_skipped() {
        let base = extract_units(indoc! {r#"
            <resources>
                <string name="todo"></string>
                <string name="a">Hello</string>
            </resources>
        "#});
        let target = LocaleResourceMap::new();
        let names: Vec<_> = missing_units(&base, &target)
            .iter()
            .map(|u| u.name.clone())
            .collect();
        assert_eq!(names, ["a"]);
    }
}
