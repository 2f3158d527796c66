//! Discovery of target locales and candidate resource files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use unic_langid::LanguageIdentifier;

use crate::error::Error;

lazy_static! {
    static ref LOCALE_LIST_REGEX: Regex =
        Regex::new(r"resourceConfigurations\.addAll\(listOf\((.*?)\)\)").unwrap();
}

/// Parses the declared locale list out of the build-configuration text.
///
/// Looks for `resourceConfigurations.addAll(listOf("en", "fr", ...))`, trims
/// whitespace and surrounding quotes from each element, and drops the base
/// locale. A missing expression is not an error: it means no target locales
/// are configured and the run is a no-op.
pub fn locales_from_build_config(text: &str, base_locale: &str) -> Vec<String> {
    let Some(captures) = LOCALE_LIST_REGEX.captures(text) else {
        return Vec::new();
    };
    captures[1]
        .split(',')
        .map(|part| part.trim().trim_matches('"').to_string())
        .filter(|code| !code.is_empty() && code != base_locale)
        .inspect(|code| {
            if code.parse::<LanguageIdentifier>().is_err() {
                warn!(locale = %code, "configured locale is not a valid language identifier");
            }
        })
        .collect()
}

/// Lists the resource files in the base locale's `values/` directory.
///
/// A file qualifies when its name contains `strings` and ends with `.xml`,
/// both case-insensitive. Fails with a configuration error when the `values`
/// directory is absent or not a directory; an empty listing is fine.
pub fn resource_files(res_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let values_dir = res_dir.join("values");
    if !values_dir.is_dir() {
        return Err(Error::configuration(format!(
            "no 'values' folder found in {}",
            res_dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(&values_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let lower = name.to_ascii_lowercase();
        if lower.contains("strings") && lower.ends_with(".xml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
