//! Overlay configuration.
//!
//! `OverlayOptions` is the fully-resolved configuration the controller works
//! with. Callers supply an `OptionOverrides`, which is deep-merged over the
//! defaults: every style map is merged key by key (caller wins), and a
//! caller-supplied module list replaces the default list wholesale.
//!
//! Both types deserialize from camelCase field names (`overlayStyles`,
//! `handleStyles`, ...). Unknown fields are ignored and style property names
//! may be given in camelCase (`boxSizing`) or CSS form (`box-sizing`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Default handle edge length when the configured size can't be parsed.
const DEFAULT_HANDLE_SIZE: f64 = 12.0;

/// Inline style properties, keyed by CSS property name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, normalizing its name to CSS form.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(css_property_name(name), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&css_property_name(name)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return these styles with `overrides` layered on top.
    pub fn merged(mut self, overrides: &StyleMap) -> Self {
        for (name, value) in overrides.iter() {
            self.0.insert(name.to_string(), value.to_string());
        }
        self
    }
}

impl From<BTreeMap<String, String>> for StyleMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut styles = StyleMap::new();
        for (name, value) in map {
            styles.insert(&name, value);
        }
        styles
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StyleMap {
    fn from(entries: [(&str, &str); N]) -> Self {
        let mut styles = StyleMap::new();
        for (name, value) in entries {
            styles.insert(name, value);
        }
        styles
    }
}

/// Convert a camelCase style key (`borderLeftWidth`) to its CSS property
/// name (`border-left-width`). Names already in CSS form pass through.
pub fn css_property_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Resolved overlay configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayOptions {
    pub overlay_styles: StyleMap,
    pub handle_styles: StyleMap,
    pub toolbar_styles: StyleMap,
    pub toolbar_button_styles: StyleMap,
    pub toolbar_button_svg_styles: StyleMap,
    pub display_styles: StyleMap,
    /// Module identifiers, instantiated in this order on every activation.
    pub modules: Vec<SmolStr>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            overlay_styles: StyleMap::from([
                ("position", "absolute"),
                ("box-sizing", "border-box"),
                ("border", "1px dashed #444"),
            ]),
            handle_styles: StyleMap::from([
                ("position", "absolute"),
                ("height", "12px"),
                ("width", "12px"),
                ("background-color", "white"),
                ("border", "1px solid #777"),
                ("box-sizing", "border-box"),
                ("opacity", "0.80"),
            ]),
            toolbar_styles: StyleMap::from([
                ("position", "absolute"),
                ("top", "-12px"),
                ("right", "0"),
                ("left", "0"),
                ("height", "0"),
                ("min-width", "100px"),
                ("font", "12px/1.0 Arial, Helvetica, sans-serif"),
                ("text-align", "center"),
                ("color", "#333"),
                ("box-sizing", "border-box"),
                ("cursor", "default"),
            ]),
            toolbar_button_styles: StyleMap::from([
                ("display", "inline-block"),
                ("width", "24px"),
                ("height", "24px"),
                ("background", "white"),
                ("border", "1px solid #999"),
                ("vertical-align", "middle"),
            ]),
            toolbar_button_svg_styles: StyleMap::from([
                ("fill", "#444"),
                ("stroke", "#444"),
                ("stroke-width", "2"),
            ]),
            display_styles: StyleMap::from([
                ("position", "absolute"),
                ("font", "12px/1.0 Arial, Helvetica, sans-serif"),
                ("padding", "4px 8px"),
                ("text-align", "center"),
                ("background-color", "white"),
                ("color", "#333"),
                ("border", "1px solid #777"),
                ("box-sizing", "border-box"),
                ("opacity", "0.80"),
                ("cursor", "default"),
            ]),
            modules: vec![
                SmolStr::new_static("DisplaySize"),
                SmolStr::new_static("Toolbar"),
                SmolStr::new_static("Resize"),
            ],
        }
    }
}

impl OverlayOptions {
    /// Defaults with caller overrides deep-merged on top.
    pub fn from_overrides(overrides: OptionOverrides) -> Self {
        Self::default().merged(overrides)
    }

    pub fn merged(self, overrides: OptionOverrides) -> Self {
        fn layer(base: StyleMap, over: Option<StyleMap>) -> StyleMap {
            match over {
                Some(over) => base.merged(&over),
                None => base,
            }
        }

        Self {
            overlay_styles: layer(self.overlay_styles, overrides.overlay_styles),
            handle_styles: layer(self.handle_styles, overrides.handle_styles),
            toolbar_styles: layer(self.toolbar_styles, overrides.toolbar_styles),
            toolbar_button_styles: layer(
                self.toolbar_button_styles,
                overrides.toolbar_button_styles,
            ),
            toolbar_button_svg_styles: layer(
                self.toolbar_button_svg_styles,
                overrides.toolbar_button_svg_styles,
            ),
            display_styles: layer(self.display_styles, overrides.display_styles),
            modules: overrides.modules.unwrap_or(self.modules),
        }
    }

    /// Edge lengths (width, height) of a resize handle in pixels.
    pub fn handle_size(&self) -> (f64, f64) {
        (
            parse_px(self.handle_styles.get("width")).unwrap_or(DEFAULT_HANDLE_SIZE),
            parse_px(self.handle_styles.get("height")).unwrap_or(DEFAULT_HANDLE_SIZE),
        )
    }
}

/// Caller-supplied configuration. Missing fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    pub overlay_styles: Option<StyleMap>,
    pub handle_styles: Option<StyleMap>,
    pub toolbar_styles: Option<StyleMap>,
    pub toolbar_button_styles: Option<StyleMap>,
    pub toolbar_button_svg_styles: Option<StyleMap>,
    pub display_styles: Option<StyleMap>,
    pub modules: Option<Vec<SmolStr>>,
}

/// Parse a CSS pixel length like `"12px"` or `"12"`.
pub fn parse_px(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_property_name() {
        assert_eq!(css_property_name("boxSizing"), "box-sizing");
        assert_eq!(css_property_name("borderLeftWidth"), "border-left-width");
        assert_eq!(css_property_name("border-left-width"), "border-left-width");
        assert_eq!(css_property_name("opacity"), "opacity");
    }

    #[test]
    fn test_default_modules() {
        let options = OverlayOptions::default();
        assert_eq!(options.modules, vec!["DisplaySize", "Toolbar", "Resize"]);
        assert_eq!(options.handle_size(), (12.0, 12.0));
    }

    #[test]
    fn test_merge_caller_wins_per_key() {
        let overrides = OptionOverrides {
            overlay_styles: Some(StyleMap::from([("border", "2px solid red")])),
            ..Default::default()
        };
        let options = OverlayOptions::from_overrides(overrides);

        assert_eq!(options.overlay_styles.get("border"), Some("2px solid red"));
        // Untouched keys keep their defaults.
        assert_eq!(options.overlay_styles.get("position"), Some("absolute"));
        assert_eq!(options.overlay_styles.get("box-sizing"), Some("border-box"));
        assert_eq!(options.handle_styles, OverlayOptions::default().handle_styles);
    }

    #[test]
    fn test_merge_replaces_module_list() {
        let overrides = OptionOverrides {
            modules: Some(vec![SmolStr::new("Resize")]),
            ..Default::default()
        };
        let options = OverlayOptions::from_overrides(overrides);
        assert_eq!(options.modules, vec!["Resize"]);
    }

    #[test]
    fn test_deserialize_camel_case_and_unknown_fields() {
        let json = r#"{
            "handleStyles": { "width": "20px", "backgroundColor": "black" },
            "modules": ["Resize", "DisplaySize"],
            "somethingElse": true
        }"#;
        let overrides: OptionOverrides = serde_json::from_str(json).unwrap();
        let options = OverlayOptions::from_overrides(overrides);

        assert_eq!(options.handle_styles.get("background-color"), Some("black"));
        assert_eq!(options.handle_styles.get("backgroundColor"), Some("black"));
        assert_eq!(options.handle_size(), (20.0, 12.0));
        assert_eq!(options.modules, vec!["Resize", "DisplaySize"]);
        assert_eq!(options.toolbar_styles.get("min-width"), Some("100px"));
    }

    #[test]
    fn test_empty_overrides_equal_defaults() {
        let overrides: OptionOverrides = serde_json::from_str("{}").unwrap();
        assert_eq!(
            OverlayOptions::from_overrides(overrides),
            OverlayOptions::default()
        );
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px(Some("12px")), Some(12.0));
        assert_eq!(parse_px(Some(" 7.5 ")), Some(7.5));
        assert_eq!(parse_px(Some("auto")), None);
        assert_eq!(parse_px(None), None);
    }

    #[test]
    fn test_overlay_styles_snapshot() {
        let options = OverlayOptions::default();
        let rendered: Vec<String> = options
            .overlay_styles
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        insta::assert_snapshot!(
            rendered.join("; "),
            @"border: 1px dashed #444; box-sizing: border-box; position: absolute"
        );
    }
}
