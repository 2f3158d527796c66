//! Merging translated markup back into a target locale's resource file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::Error;

/// Seed content for a resource file that does not exist yet.
pub const EMPTY_DOCUMENT: &str = "<resources>\n</resources>";

const CLOSING_TAG: &str = "</resources>";

/// Resolves the resource file for `locale`, creating the `values-<locale>/`
/// directory and an empty root document when they do not exist. `None` means
/// the base locale's plain `values/` directory.
pub fn ensure_locale_file(
    res_dir: &Path,
    file_name: &str,
    locale: Option<&str>,
) -> Result<PathBuf, Error> {
    let dir_name = match locale {
        Some(locale) => format!("values-{locale}"),
        None => "values".to_string(),
    };
    let dir = res_dir.join(dir_name);
    fs::create_dir_all(&dir)?;

    let path = dir.join(file_name);
    if !path.exists() {
        debug!(path = %path.display(), "creating empty resource file");
        fs::write(&path, EMPTY_DOCUMENT)?;
    }
    Ok(path)
}

/// Inserts a translated markup block into the document at `path`.
///
/// The block is re-indented with one leading tab on every line that starts at
/// column zero, inserted immediately before the closing `</resources>` tag,
/// and every straight apostrophe in the whole document is replaced with the
/// typographic `’` (unescaped apostrophes are invalid in this format's string
/// literals). All other existing content is preserved byte-for-byte.
pub fn append_translated(path: &Path, block: &str) -> Result<(), Error> {
    let document = fs::read_to_string(path)?;
    let merged = insert_before_closing_tag(&document, &indent_block(block))?;
    fs::write(path, merged.replace('\'', "\u{2019}"))?;
    Ok(())
}

fn indent_block(block: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with([' ', '\t']) {
                line.to_string()
            } else {
                format!("\t{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn insert_before_closing_tag(document: &str, block: &str) -> Result<String, Error> {
    let at = document.rfind(CLOSING_TAG).ok_or_else(|| {
        Error::invalid_document(format!("no closing {CLOSING_TAG} tag to insert before"))
    })?;
    Ok(format!("{}{}\n{}", &document[..at], block, &document[at..]))
}
