//! Language codes and the supported-language registry.
//!
//! `KNOWN_LANGUAGES` is the global table of every locale identifier the crate
//! understands. A `LanguageRegistry` narrows it down to the languages one
//! application actually supports and carries the configured default.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing::warn;

/// Fallback default when the configured one is unusable.
pub const FALLBACK_LANGUAGE: &str = "en-US";

/// A language code taken from the known table.
///
/// Can only be obtained through [`LanguageCode::known`] or a
/// [`LanguageRegistry`], so every value refers to a real table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode {
    code: &'static str,
}

impl LanguageCode {
    /// Look up `raw` in the known table (ASCII case-insensitive).
    pub fn known(raw: &str) -> Option<Self> {
        KNOWN_INDEX
            .get(raw.trim().to_ascii_lowercase().as_str())
            .map(|&(code, _)| Self { code })
    }

    /// Canonical spelling, e.g. `"de-DE"`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// English display name, e.g. `"German - Germany"`.
    pub fn name(&self) -> &'static str {
        KNOWN_INDEX
            .get(self.code.to_ascii_lowercase().as_str())
            .map(|&(_, name)| name)
            .unwrap_or(self.code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// The set of languages one application supports, plus its default.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    supported: Vec<LanguageCode>,
    default: LanguageCode,
}

impl LanguageRegistry {
    /// Build a registry from configured codes.
    ///
    /// Unknown codes are skipped with a warning. An empty list means every
    /// known language. The default is always part of the supported set.
    pub fn new<S: AsRef<str>>(supported: &[S], default: &str) -> Self {
        let mut codes: Vec<LanguageCode> = if supported.is_empty() {
            KNOWN_LANGUAGES
                .iter()
                .map(|&(code, _)| LanguageCode { code })
                .collect()
        } else {
            supported
                .iter()
                .filter_map(|raw| {
                    let raw = raw.as_ref();
                    let code = LanguageCode::known(raw);
                    if code.is_none() {
                        warn!("Ignoring unknown language code {:?}", raw);
                    }
                    code
                })
                .collect()
        };

        let default = LanguageCode::known(default).unwrap_or_else(|| {
            warn!(
                "Default language {:?} is unknown, using {}",
                default, FALLBACK_LANGUAGE
            );
            fallback_language()
        });

        if !codes.contains(&default) {
            codes.push(default);
        }
        codes.sort();
        codes.dedup();

        Self {
            supported: codes,
            default,
        }
    }

    /// Registry supporting every known language.
    pub fn all_known(default: &str) -> Self {
        Self::new::<&str>(&[], default)
    }

    /// Resolve `raw` to a supported code.
    pub fn code(&self, raw: &str) -> Option<LanguageCode> {
        LanguageCode::known(raw).filter(|code| self.supported.contains(code))
    }

    pub fn is_supported(&self, raw: &str) -> bool {
        self.code(raw).is_some()
    }

    /// Whether `raw` appears in the global table at all.
    pub fn is_known(raw: &str) -> bool {
        LanguageCode::known(raw).is_some()
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default
    }

    /// Supported codes in sorted order.
    pub fn supported(&self) -> &[LanguageCode] {
        &self.supported
    }
}

fn fallback_language() -> LanguageCode {
    LanguageCode {
        code: FALLBACK_LANGUAGE,
    }
}

/// Lowercased code -> (canonical code, display name).
static KNOWN_INDEX: Lazy<HashMap<String, (&'static str, &'static str)>> = Lazy::new(|| {
    KNOWN_LANGUAGES
        .iter()
        .map(|&(code, name)| (code.to_ascii_lowercase(), (code, name)))
        .collect()
});

/// Every locale identifier the crate understands.
pub static KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("af-ZA", "Afrikaans - South Africa"),
    ("sq-AL", "Albanian - Albania"),
    ("ar-DZ", "Arabic - Algeria"),
    ("ar-BH", "Arabic - Bahrain"),
    ("ar-EG", "Arabic - Egypt"),
    ("ar-IQ", "Arabic - Iraq"),
    ("ar-JO", "Arabic - Jordan"),
    ("ar-KW", "Arabic - Kuwait"),
    ("ar-LB", "Arabic - Lebanon"),
    ("ar-LY", "Arabic - Libya"),
    ("ar-MA", "Arabic - Morocco"),
    ("ar-OM", "Arabic - Oman"),
    ("ar-QA", "Arabic - Qatar"),
    ("ar-SA", "Arabic - Saudi Arabia"),
    ("ar-SY", "Arabic - Syria"),
    ("ar-TN", "Arabic - Tunisia"),
    ("ar-AE", "Arabic - United Arab Emirates"),
    ("ar-YE", "Arabic - Yemen"),
    ("hy-AM", "Armenian - Armenia"),
    ("Cy-az-AZ", "Azeri (Cyrillic) - Azerbaijan"),
    ("Lt-az-AZ", "Azeri (Latin) - Azerbaijan"),
    ("eu-ES", "Basque - Basque"),
    ("be-BY", "Belarusian - Belarus"),
    ("bg-BG", "Bulgarian - Bulgaria"),
    ("ca-ES", "Catalan - Catalan"),
    ("zh-CN", "Chinese - China"),
    ("zh-HK", "Chinese - Hong Kong SAR"),
    ("zh-MO", "Chinese - Macau SAR"),
    ("zh-SG", "Chinese - Singapore"),
    ("zh-TW", "Chinese - Taiwan"),
    ("zh-CHS", "Chinese (Simplified)"),
    ("zh-CHT", "Chinese (Traditional)"),
    ("hr-HR", "Croatian - Croatia"),
    ("cs-CZ", "Czech - Czech Republic"),
    ("da-DK", "Danish - Denmark"),
    ("div-MV", "Dhivehi - Maldives"),
    ("nl-BE", "Dutch - Belgium"),
    ("nl-NL", "Dutch - The Netherlands"),
    ("en-AU", "English - Australia"),
    ("en-BZ", "English - Belize"),
    ("en-CA", "English - Canada"),
    ("en-CB", "English - Caribbean"),
    ("en-IE", "English - Ireland"),
    ("en-JM", "English - Jamaica"),
    ("en-NZ", "English - New Zealand"),
    ("en-PH", "English - Philippines"),
    ("en-ZA", "English - South Africa"),
    ("en-TT", "English - Trinidad and Tobago"),
    ("en-GB", "English - United Kingdom"),
    ("en-US", "English - United States"),
    ("en-ZW", "English - Zimbabwe"),
    ("et-EE", "Estonian - Estonia"),
    ("fo-FO", "Faroese - Faroe Islands"),
    ("fa-IR", "Farsi - Iran"),
    ("fi-FI", "Finnish - Finland"),
    ("fr-BE", "French - Belgium"),
    ("fr-CA", "French - Canada"),
    ("fr-FR", "French - France"),
    ("fr-LU", "French - Luxembourg"),
    ("fr-MC", "French - Monaco"),
    ("fr-CH", "French - Switzerland"),
    ("gl-ES", "Galician - Galician"),
    ("ka-GE", "Georgian - Georgia"),
    ("de-AT", "German - Austria"),
    ("de-DE", "German - Germany"),
    ("de-LI", "German - Liechtenstein"),
    ("de-LU", "German - Luxembourg"),
    ("de-CH", "German - Switzerland"),
    ("el-GR", "Greek - Greece"),
    ("gu-IN", "Gujarati - India"),
    ("he-IL", "Hebrew - Israel"),
    ("hi-IN", "Hindi - India"),
    ("hu-HU", "Hungarian - Hungary"),
    ("is-IS", "Icelandic - Iceland"),
    ("id-ID", "Indonesian - Indonesia"),
    ("it-IT", "Italian - Italy"),
    ("it-CH", "Italian - Switzerland"),
    ("ja-JP", "Japanese - Japan"),
    ("kn-IN", "Kannada - India"),
    ("kk-KZ", "Kazakh - Kazakhstan"),
    ("kok-IN", "Konkani - India"),
    ("ko-KR", "Korean - Korea"),
    ("ky-KZ", "Kyrgyz - Kazakhstan"),
    ("lv-LV", "Latvian - Latvia"),
    ("lt-LT", "Lithuanian - Lithuania"),
    ("mk-MK", "Macedonian (FYROM)"),
    ("ms-BN", "Malay - Brunei"),
    ("ms-MY", "Malay - Malaysia"),
    ("mr-IN", "Marathi - India"),
    ("mn-MN", "Mongolian - Mongolia"),
    ("nb-NO", "Norwegian (Bokmål) - Norway"),
    ("nn-NO", "Norwegian (Nynorsk) - Norway"),
    ("pl-PL", "Polish - Poland"),
    ("pt-BR", "Portuguese - Brazil"),
    ("pt-PT", "Portuguese - Portugal"),
    ("pa-IN", "Punjabi - India"),
    ("ro-RO", "Romanian - Romania"),
    ("ru-RU", "Russian - Russia"),
    ("sa-IN", "Sanskrit - India"),
    ("Cy-sr-SP", "Serbian (Cyrillic) - Serbia"),
    ("Lt-sr-SP", "Serbian (Latin) - Serbia"),
    ("sk-SK", "Slovak - Slovakia"),
    ("sl-SI", "Slovenian - Slovenia"),
    ("es-AR", "Spanish - Argentina"),
    ("es-BO", "Spanish - Bolivia"),
    ("es-CL", "Spanish - Chile"),
    ("es-CO", "Spanish - Colombia"),
    ("es-CR", "Spanish - Costa Rica"),
    ("es-DO", "Spanish - Dominican Republic"),
    ("es-EC", "Spanish - Ecuador"),
    ("es-SV", "Spanish - El Salvador"),
    ("es-GT", "Spanish - Guatemala"),
    ("es-HN", "Spanish - Honduras"),
    ("es-MX", "Spanish - Mexico"),
    ("es-NI", "Spanish - Nicaragua"),
    ("es-PA", "Spanish - Panama"),
    ("es-PY", "Spanish - Paraguay"),
    ("es-PE", "Spanish - Peru"),
    ("es-PR", "Spanish - Puerto Rico"),
    ("es-ES", "Spanish - Spain"),
    ("es-UY", "Spanish - Uruguay"),
    ("es-VE", "Spanish - Venezuela"),
    ("sw-KE", "Swahili - Kenya"),
    ("sv-FI", "Swedish - Finland"),
    ("sv-SE", "Swedish - Sweden"),
    ("syr-SY", "Syriac - Syria"),
    ("ta-IN", "Tamil - India"),
    ("tt-RU", "Tatar - Russia"),
    ("te-IN", "Telugu - India"),
    ("th-TH", "Thai - Thailand"),
    ("tr-TR", "Turkish - Turkey"),
    ("uk-UA", "Ukrainian - Ukraine"),
    ("ur-PK", "Urdu - Pakistan"),
    ("Cy-uz-UZ", "Uzbek (Cyrillic) - Uzbekistan"),
    ("Lt-uz-UZ", "Uzbek (Latin) - Uzbekistan"),
    ("vi-VN", "Vietnamese - Vietnam"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lookup_is_case_insensitive() {
        let code = LanguageCode::known("de-de").expect("de-DE is known");
        assert_eq!(code.code(), "de-DE");
        assert_eq!(code.name(), "German - Germany");
        assert_eq!(LanguageCode::known(" en-US ").map(|c| c.code()), Some("en-US"));
    }

    #[test]
    fn test_unknown_codes() {
        assert!(LanguageCode::known("xx-INVALID").is_none());
        assert!(LanguageCode::known("").is_none());
        assert!(!LanguageRegistry::is_known("klingon"));
    }

    #[test]
    fn test_registry_subset() {
        let registry = LanguageRegistry::new(&["en-US", "de-DE"], "en-US");
        assert!(registry.is_supported("de-DE"));
        assert!(!registry.is_supported("fr-FR"));
        assert!(LanguageRegistry::is_known("fr-FR"));
        assert_eq!(registry.supported().len(), 2);
    }

    #[test]
    fn test_registry_empty_means_all_known() {
        let registry = LanguageRegistry::all_known("en-NZ");
        assert_eq!(registry.supported().len(), KNOWN_LANGUAGES.len());
        assert_eq!(registry.default_language().code(), "en-NZ");
    }

    #[test]
    fn test_registry_skips_unknown_and_adds_default() {
        let registry = LanguageRegistry::new(&["de-DE", "nope"], "fr-FR");
        let codes: Vec<_> = registry.supported().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["de-DE", "fr-FR"]);
    }

    #[test]
    fn test_registry_unknown_default_falls_back() {
        let registry = LanguageRegistry::new(&["de-DE"], "xx-INVALID");
        assert_eq!(registry.default_language().code(), FALLBACK_LANGUAGE);
        assert!(registry.is_supported(FALLBACK_LANGUAGE));
    }
}
