use anyhow::{Context, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Language used when the user's language is unknown or unsupported
pub const DEFAULT_LANGUAGE: &str = "en";

/// Bundled Fluent resources, one per supported language
const RESOURCES: [(&str, &str); 2] = [
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for the gallery bot
///
/// Holds one bundle per language. The concurrent bundle flavour is used so a
/// single manager can be shared by every handler task.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a new localization manager with all bundled languages
    pub fn new() -> Result<Self> {
        Self::from_resources(&RESOURCES)
    }

    /// Create a manager from `(language, Fluent source)` pairs
    pub fn from_resources(resources: &[(&str, &str)]) -> Result<Self> {
        let mut bundles = HashMap::new();

        for (code, source) in resources {
            let locale: LanguageIdentifier = code
                .parse()
                .with_context(|| format!("Invalid language identifier: {code}"))?;
            let bundle = Self::create_bundle(&locale, source)?;
            bundles.insert(code.to_string(), bundle);
        }

        log::info!("Loaded {} localization bundles", bundles.len());
        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Telegram renders the isolation marks literally
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow::anyhow!("Failed to parse {locale} resource: {errors:?}"))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("Duplicate messages in {locale} resource: {errors:?}"))?;

        Ok(bundle)
    }

    /// Resolve the bundle language for a Telegram `language_code` such as `fr-CA`
    pub fn resolve_language<'a>(&'a self, language_code: Option<&str>) -> &'a str {
        language_code
            .and_then(|code| code.split(['-', '_']).next())
            .map(str::to_ascii_lowercase)
            .and_then(|primary| self.bundles.get_key_value(primary.as_str()))
            .map(|(code, _)| code.as_str())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Get a localized message in the given language
    ///
    /// A key missing from the user's language is looked up in English before
    /// giving up.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language_code: Option<&str>,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let language = self.resolve_language(language_code);

        let found = self
            .bundles
            .get(language)
            .and_then(|bundle| bundle.get_message(key).map(|msg| (bundle, msg)))
            .or_else(|| {
                let bundle = self.bundles.get(DEFAULT_LANGUAGE)?;
                let msg = bundle.get_message(key)?;
                log::debug!("Message {key} missing for {language}, using {DEFAULT_LANGUAGE}");
                Some((bundle, msg))
            });

        let Some((bundle, msg)) = found else {
            return format!("Missing translation: {key}");
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))))
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            log::warn!("Errors formatting message {key}: {errors:?}");
        }

        value.into_owned()
    }

    /// Get a localized message without arguments
    pub fn t_lang(&self, key: &str, language_code: Option<&str>) -> String {
        self.get_message_in_language(key, language_code, None)
    }
}
