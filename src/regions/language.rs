//! Language and region-type vocabulary for embedded regions.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of a language that can appear in a single-file component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// The host language: anything not claimed by an embedded region.
    Vue,
    VueHtml,
    Pug,
    Css,
    Postcss,
    Scss,
    Less,
    Stylus,
    Javascript,
    Typescript,
    /// Generic id for custom blocks.
    Custom,
}

/// Language of text that no embedded region claims.
pub const HOST_LANGUAGE: LanguageId = LanguageId::Vue;

impl LanguageId {
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageId::Vue => "vue",
            LanguageId::VueHtml => "vue-html",
            LanguageId::Pug => "pug",
            LanguageId::Css => "css",
            LanguageId::Postcss => "postcss",
            LanguageId::Scss => "scss",
            LanguageId::Less => "less",
            LanguageId::Stylus => "stylus",
            LanguageId::Javascript => "javascript",
            LanguageId::Typescript => "typescript",
            LanguageId::Custom => "custom",
        }
    }

    /// Resolve the value of a block's `lang` attribute to a dialect.
    ///
    /// Accepts the canonical ids plus the short aliases commonly written in
    /// single-file components. Returns `None` for anything unrecognized so the
    /// caller can fall back to the default for the block's type.
    pub fn from_lang_attr(lang: &str) -> Option<Self> {
        let lang = lang.trim().to_ascii_lowercase();
        let id = match lang.as_str() {
            "html" | "vue-html" => LanguageId::VueHtml,
            "pug" | "jade" => LanguageId::Pug,
            "css" => LanguageId::Css,
            "postcss" | "pcss" => LanguageId::Postcss,
            "scss" => LanguageId::Scss,
            "less" => LanguageId::Less,
            "stylus" | "styl" => LanguageId::Stylus,
            "js" | "jsx" | "javascript" => LanguageId::Javascript,
            "ts" | "tsx" | "typescript" => LanguageId::Typescript,
            _ => return None,
        };
        Some(id)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "vue" => Ok(LanguageId::Vue),
            "custom" => Ok(LanguageId::Custom),
            other => LanguageId::from_lang_attr(other).ok_or_else(|| Error::UnknownLanguage {
                id: other.to_string(),
            }),
        }
    }
}

/// Structural role of a region, independent of its dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionType {
    Template,
    Script,
    Style,
    Custom,
}

impl RegionType {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionType::Template => "template",
            RegionType::Script => "script",
            RegionType::Style => "style",
            RegionType::Custom => "custom",
        }
    }

    /// Region type for a top-level block tag name. Anything that is not a
    /// template, script, or style block is a custom block.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "template" => RegionType::Template,
            "script" => RegionType::Script,
            "style" => RegionType::Style,
            _ => RegionType::Custom,
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "template" => Ok(RegionType::Template),
            "script" => Ok(RegionType::Script),
            "style" => Ok(RegionType::Style),
            "custom" => Ok(RegionType::Custom),
            other => Err(Error::UnknownRegionType {
                name: other.to_string(),
            }),
        }
    }
}

/// Default language for each region type.
///
/// Used when a block declares no (or an unknown) `lang`, and as the declared
/// language of documents projected by region type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultLanguages {
    pub template: LanguageId,
    pub script: LanguageId,
    pub style: LanguageId,
    pub custom: LanguageId,
}

impl DefaultLanguages {
    pub fn for_type(&self, region_type: RegionType) -> LanguageId {
        match region_type {
            RegionType::Template => self.template,
            RegionType::Script => self.script,
            RegionType::Style => self.style,
            RegionType::Custom => self.custom,
        }
    }
}

impl Default for DefaultLanguages {
    fn default() -> Self {
        Self {
            template: LanguageId::VueHtml,
            script: LanguageId::Javascript,
            style: LanguageId::Css,
            custom: LanguageId::Custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_attr_aliases() {
        assert_eq!(LanguageId::from_lang_attr("ts"), Some(LanguageId::Typescript));
        assert_eq!(LanguageId::from_lang_attr("TSX"), Some(LanguageId::Typescript));
        assert_eq!(LanguageId::from_lang_attr("styl"), Some(LanguageId::Stylus));
        assert_eq!(LanguageId::from_lang_attr("jade"), Some(LanguageId::Pug));
        assert_eq!(LanguageId::from_lang_attr("coffee"), None);
    }

    #[test]
    fn canonical_ids_round_trip_through_display() {
        for id in [
            LanguageId::Vue,
            LanguageId::VueHtml,
            LanguageId::Postcss,
            LanguageId::Typescript,
            LanguageId::Custom,
        ] {
            assert_eq!(id.to_string().parse::<LanguageId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_language_is_an_error() {
        let err = "coffee".parse::<LanguageId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown language id: 'coffee'");
    }

    #[test]
    fn region_type_from_tag() {
        assert_eq!(RegionType::from_tag("Template"), RegionType::Template);
        assert_eq!(RegionType::from_tag("i18n"), RegionType::Custom);
        assert!("markup".parse::<RegionType>().is_err());
    }

    #[test]
    fn builtin_defaults() {
        let defaults = DefaultLanguages::default();
        assert_eq!(defaults.for_type(RegionType::Template), LanguageId::VueHtml);
        assert_eq!(defaults.for_type(RegionType::Script), LanguageId::Javascript);
        assert_eq!(defaults.for_type(RegionType::Style), LanguageId::Css);
        assert_eq!(defaults.for_type(RegionType::Custom), LanguageId::Custom);
    }
}
