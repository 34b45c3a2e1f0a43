//! Types exposed to JavaScript via wasm-bindgen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use weaver_media_core::{OptionOverrides, OverlayOptions, SmolStr, StyleMap};

/// Overlay configuration accepted from JavaScript.
///
/// Every field is optional; style maps are merged key-by-key over the
/// defaults, `modules` replaces the default module list outright. Style keys
/// may be camelCase (`backgroundColor`) or CSS (`background-color`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaResizeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub overlay_styles: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub handle_styles: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub toolbar_styles: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub toolbar_button_styles: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub toolbar_button_svg_styles: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional)]
    pub display_styles: Option<BTreeMap<String, String>>,
    /// Module names, e.g. `["DisplaySize", "Toolbar", "Resize"]`, or
    /// module factories.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[tsify(optional, type = "(string | MediaModuleFactory)[]")]
    pub modules: Option<Vec<String>>,
}

impl From<MediaResizeOptions> for OptionOverrides {
    fn from(options: MediaResizeOptions) -> Self {
        let styles = |map: Option<BTreeMap<String, String>>| map.map(StyleMap::from);
        OptionOverrides {
            overlay_styles: styles(options.overlay_styles),
            handle_styles: styles(options.handle_styles),
            toolbar_styles: styles(options.toolbar_styles),
            toolbar_button_styles: styles(options.toolbar_button_styles),
            toolbar_button_svg_styles: styles(options.toolbar_button_svg_styles),
            display_styles: styles(options.display_styles),
            modules: options
                .modules
                .map(|names| names.into_iter().map(SmolStr::from).collect()),
        }
    }
}

/// Resolved configuration reported back to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMediaOptions {
    pub overlay_styles: BTreeMap<String, String>,
    pub handle_styles: BTreeMap<String, String>,
    pub toolbar_styles: BTreeMap<String, String>,
    pub toolbar_button_styles: BTreeMap<String, String>,
    pub toolbar_button_svg_styles: BTreeMap<String, String>,
    pub display_styles: BTreeMap<String, String>,
    pub modules: Vec<String>,
}

impl From<&OverlayOptions> for ResolvedMediaOptions {
    fn from(options: &OverlayOptions) -> Self {
        let styles = |map: &StyleMap| {
            map.iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        };
        Self {
            overlay_styles: styles(&options.overlay_styles),
            handle_styles: styles(&options.handle_styles),
            toolbar_styles: styles(&options.toolbar_styles),
            toolbar_button_styles: styles(&options.toolbar_button_styles),
            toolbar_button_svg_styles: styles(&options.toolbar_button_svg_styles),
            display_styles: styles(&options.display_styles),
            modules: options.modules.iter().map(|m| m.to_string()).collect(),
        }
    }
}
