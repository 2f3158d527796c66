//! End-to-end runs against a temporary project tree with an in-memory
//! translation provider.

use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use indoc::indoc;
use tempfile::TempDir;
use transfill::{Error, RunConfig, TranslationProvider, run};

/// Records every request and answers with a canned per-locale translation.
#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<(String, String)>>,
    fail_locales: Vec<String>,
}

impl FakeProvider {
    fn failing_for(locales: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_locales: locales.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationProvider for FakeProvider {
    async fn translate(&self, markup: &str, locale: &str) -> Result<String, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((markup.to_string(), locale.to_string()));
        if self.fail_locales.iter().any(|l| l == locale) {
            return Err(Error::EmptyResponse);
        }
        // Tag each value so tests can tell translated output from base input.
        Ok(markup.replace("</string>", &format!(" [{locale}]</string>")))
    }
}

fn write_project(dir: &Path, locales: &str, strings_xml: &str) {
    let values = dir.join("app/src/main/res/values");
    fs::create_dir_all(&values).unwrap();
    fs::write(values.join("strings.xml"), strings_xml).unwrap();
    fs::write(
        dir.join("app/build.gradle.kts"),
        format!("android {{\n    resourceConfigurations.addAll(listOf({locales}))\n}}\n"),
    )
    .unwrap();
}

#[tokio::test]
async fn test_missing_target_file_is_created_and_filled() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr""#,
        "<resources>\n\t<string name=\"a\">Hello</string>\n</resources>",
    );

    let provider = Arc::new(FakeProvider::default());
    let report = run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.translated(), 1);

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, r#"<string name="a">Hello</string>"#);
    assert_eq!(calls[0].1, "fr");

    let target = temp.path().join("app/src/main/res/values-fr/strings.xml");
    let content = fs::read_to_string(target).unwrap();
    assert_eq!(
        content,
        "<resources>\n\t<string name=\"a\">Hello [fr]</string>\n</resources>"
    );
}

#[tokio::test]
async fn test_second_run_performs_zero_requests() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr", "de""#,
        "<resources>\n\t<string name=\"a\">Hello</string>\n</resources>",
    );
    let config = RunConfig::new(temp.path());

    let first = Arc::new(FakeProvider::default());
    run(&config, first.clone()).await.unwrap();
    assert_eq!(first.calls().len(), 2);

    let second = Arc::new(FakeProvider::default());
    let report = run(&config, second.clone()).await.unwrap();
    assert!(second.calls().is_empty());
    assert_eq!(report.up_to_date(), 2);
}

#[tokio::test]
async fn test_only_missing_units_are_requested() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr""#,
        indoc! {r#"
            <resources>
            	<string name="a">Hello</string>
            	<string name="b">World</string>
            </resources>
        "#},
    );
    let values_fr = temp.path().join("app/src/main/res/values-fr");
    fs::create_dir_all(&values_fr).unwrap();
    fs::write(
        values_fr.join("strings.xml"),
        "<resources>\n\t<string name=\"a\">Bonjour</string>\n</resources>",
    )
    .unwrap();

    let provider = Arc::new(FakeProvider::default());
    run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, r#"<string name="b">World</string>"#);

    // The existing entry is untouched.
    let content = fs::read_to_string(values_fr.join("strings.xml")).unwrap();
    assert!(content.contains(r#"<string name="a">Bonjour</string>"#));
    assert!(content.contains("[fr]"));
}

#[tokio::test]
async fn test_non_translatable_units_never_reach_the_provider() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr""#,
        indoc! {r#"
            <resources>
            	<string name="a">Hello</string>
            	<string name="api_url" translatable="false">https://example.com</string>
            </resources>
        "#},
    );

    let provider = Arc::new(FakeProvider::default());
    run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();

    for (markup, _) in provider.calls() {
        assert!(!markup.contains("api_url"));
    }
    let target = fs::read_to_string(temp.path().join("app/src/main/res/values-fr/strings.xml"))
        .unwrap();
    assert!(!target.contains("api_url"));
}

#[tokio::test]
async fn test_one_failed_locale_does_not_affect_siblings() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr", "de""#,
        "<resources>\n\t<string name=\"a\">Hello</string>\n</resources>",
    );

    let provider = Arc::new(FakeProvider::failing_for(&["de"]));
    let report = run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();

    assert!(report.has_failures());
    let failed: Vec<_> = report.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].locale, "de");
    assert_eq!(report.translated(), 1);

    // The failed locale got no partial write beyond the seeded document.
    let de = fs::read_to_string(temp.path().join("app/src/main/res/values-de/strings.xml"))
        .unwrap();
    assert_eq!(de, "<resources>\n</resources>");
    let fr = fs::read_to_string(temp.path().join("app/src/main/res/values-fr/strings.xml"))
        .unwrap();
    assert!(fr.contains("[fr]"));
}

#[tokio::test]
async fn test_no_configured_locales_is_a_noop() {
    let temp = TempDir::new().unwrap();
    let values = temp.path().join("app/src/main/res/values");
    fs::create_dir_all(&values).unwrap();
    fs::write(values.join("strings.xml"), "<resources>\n</resources>").unwrap();
    fs::write(temp.path().join("app/build.gradle.kts"), "android {}\n").unwrap();

    let provider = Arc::new(FakeProvider::default());
    let report = run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();
    assert!(report.outcomes.is_empty());
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_missing_values_dir_aborts_before_any_task() {
    let temp = TempDir::new().unwrap();
    let provider = Arc::new(FakeProvider::default());
    let result = run(&RunConfig::new(temp.path()), provider.clone()).await;
    assert!(matches!(result, Err(Error::Configuration(_))));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_apostrophes_in_response_are_normalized() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr""#,
        "<resources>\n\t<string name=\"today\">Today</string>\n</resources>",
    );

    struct ApostropheProvider;
    #[async_trait]
    impl TranslationProvider for ApostropheProvider {
        async fn translate(&self, _markup: &str, _locale: &str) -> Result<String, Error> {
            Ok("<string name=\"today\">Aujourd'hui</string>".to_string())
        }
    }

    run(&RunConfig::new(temp.path()), Arc::new(ApostropheProvider))
        .await
        .unwrap();

    let content = fs::read_to_string(temp.path().join("app/src/main/res/values-fr/strings.xml"))
        .unwrap();
    assert!(content.contains("Aujourd\u{2019}hui"));
    assert!(!content.contains('\''));
}

#[tokio::test]
async fn test_multiple_files_fan_out_per_locale() {
    let temp = TempDir::new().unwrap();
    write_project(
        temp.path(),
        r#""en", "fr", "de""#,
        "<resources>\n\t<string name=\"a\">Hello</string>\n</resources>",
    );
    let values = temp.path().join("app/src/main/res/values");
    fs::write(
        values.join("feature_strings.xml"),
        "<resources>\n\t<string name=\"b\">World</string>\n</resources>",
    )
    .unwrap();

    let provider = Arc::new(FakeProvider::default());
    let report = run(&RunConfig::new(temp.path()), provider.clone())
        .await
        .unwrap();

    // 2 files x 2 locales.
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(report.translated(), 4);
    assert_eq!(provider.calls().len(), 4);
    for file in ["strings.xml", "feature_strings.xml"] {
        for locale in ["fr", "de"] {
            let path = temp
                .path()
                .join(format!("app/src/main/res/values-{locale}/{file}"));
            assert!(path.exists(), "missing {}", path.display());
        }
    }
}
