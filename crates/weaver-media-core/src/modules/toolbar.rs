//! Alignment toolbar.
//!
//! Alignment is written straight onto the target as inline style properties
//! plus an `align` attribute, so the host editor's attribute formats pick it
//! up when the document is serialized.

use crate::events::{EventResult, SurfaceEvent};
use crate::module::{MediaModule, ModuleContext};
use crate::platform::OverlayPlatform;
use crate::types::Alignment;

/// Style applied to the button of the active alignment.
const SELECTED_FILTER: &str = "invert(20%)";

/// Row of left/center/right alignment buttons above the overlay.
pub struct Toolbar<P: OverlayPlatform> {
    toolbar: Option<P::Element>,
    buttons: Vec<(Alignment, P::Element)>,
}

impl<P: OverlayPlatform> Toolbar<P> {
    pub fn new() -> Self {
        Self {
            toolbar: None,
            buttons: Vec::new(),
        }
    }

    /// The alignment whose button is currently marked selected.
    pub fn selected(&self, platform: &P) -> Option<Alignment> {
        self.buttons
            .iter()
            .find(|(_, button)| platform.style_property(button, "filter").is_some())
            .map(|(alignment, _)| *alignment)
    }

    fn button_at(&self, platform: &P, target: &P::Element) -> Option<(Alignment, P::Element)> {
        self.buttons
            .iter()
            .find(|(_, button)| platform.contains(button, target))
            .cloned()
    }

    fn add_button(
        &mut self,
        ctx: &ModuleContext<'_, P>,
        toolbar: &P::Element,
        index: usize,
        alignment: Alignment,
    ) -> Result<(), crate::PlatformError> {
        let platform = ctx.platform;
        let button = platform.create_element("span")?;
        platform.set_inner_html(&button, alignment.icon());
        platform.apply_styles(&button, &ctx.options.toolbar_button_styles);
        if index > 0 {
            platform.set_style_property(&button, "border-left-width", "0");
        }
        if let Some(icon) = platform.first_child(&button) {
            platform.apply_styles(&icon, &ctx.options.toolbar_button_svg_styles);
        }
        if is_applied(platform, ctx.target, alignment) {
            select_button(platform, &button);
        }
        platform.append_child(toolbar, &button)?;
        self.buttons.push((alignment, button));
        Ok(())
    }

    fn toggle(&self, ctx: &mut ModuleContext<'_, P>, alignment: Alignment, button: &P::Element) {
        let platform = ctx.platform;
        for (_, b) in &self.buttons {
            platform.remove_style_property(b, "filter");
        }

        if is_applied(platform, ctx.target, alignment) {
            tracing::debug!(target: "weaver::media", ?alignment, "alignment cleared");
            clear_alignment(platform, ctx.target);
        } else {
            tracing::debug!(target: "weaver::media", ?alignment, "alignment applied");
            select_button(platform, button);
            apply_alignment(platform, ctx.target, alignment);
        }
        ctx.request_update();
    }
}

impl<P: OverlayPlatform> Default for Toolbar<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn select_button<P: OverlayPlatform>(platform: &P, button: &P::Element) {
    platform.set_style_property(button, "filter", SELECTED_FILTER);
}

/// Whether `alignment` is currently in effect on the target.
pub fn is_applied<P: OverlayPlatform>(
    platform: &P,
    target: &P::Element,
    alignment: Alignment,
) -> bool {
    let float = platform.style_property(target, "float");
    let margin = platform.style_property(target, "margin");
    alignment.matches(float.as_deref(), margin.as_deref())
}

/// Write the display/float/margin styles and `align` attribute for `alignment`.
pub fn apply_alignment<P: OverlayPlatform>(
    platform: &P,
    target: &P::Element,
    alignment: Alignment,
) {
    platform.set_style_property(target, "display", alignment.display());
    match alignment.float() {
        Some(float) => platform.set_style_property(target, "float", float),
        None => platform.remove_style_property(target, "float"),
    }
    platform.set_style_property(target, "margin", alignment.margin());
    platform.set_attribute(target, "align", alignment.name());
}

/// Return the target to default, unaligned flow.
pub fn clear_alignment<P: OverlayPlatform>(platform: &P, target: &P::Element) {
    platform.remove_style_property(target, "float");
    platform.remove_style_property(target, "margin");
    platform.remove_style_property(target, "display");
}

impl<P: OverlayPlatform> MediaModule<P> for Toolbar<P> {
    fn name(&self) -> &str {
        "toolbar"
    }

    fn on_create(&mut self, ctx: &mut ModuleContext<'_, P>) {
        let platform = ctx.platform;
        let toolbar = match platform.create_element("div") {
            Ok(toolbar) => toolbar,
            Err(e) => {
                tracing::warn!(target: "weaver::media", "toolbar not created: {e}");
                return;
            }
        };
        platform.apply_styles(&toolbar, &ctx.options.toolbar_styles);
        if let Err(e) = platform.append_child(ctx.overlay, &toolbar) {
            tracing::warn!(target: "weaver::media", "toolbar not mounted: {e}");
            return;
        }

        for (index, alignment) in Alignment::ALL.into_iter().enumerate() {
            if let Err(e) = self.add_button(ctx, &toolbar, index, alignment) {
                tracing::warn!(
                    target: "weaver::media",
                    ?alignment,
                    "toolbar button not created: {e}"
                );
            }
        }
        self.toolbar = Some(toolbar);
    }

    fn on_destroy(&mut self, _ctx: &mut ModuleContext<'_, P>) {
        self.buttons.clear();
        self.toolbar = None;
    }

    fn on_event(
        &mut self,
        ctx: &mut ModuleContext<'_, P>,
        event: &SurfaceEvent<P::Element>,
    ) -> EventResult {
        match event {
            SurfaceEvent::OverlayClick { target } => {
                let Some((alignment, button)) = self.button_at(ctx.platform, target) else {
                    return EventResult::PassThrough;
                };
                self.toggle(ctx, alignment, &button);
                EventResult::Handled
            }
            // Pressing a button shouldn't start anything else.
            SurfaceEvent::OverlayPointerDown { target, .. }
                if self.button_at(ctx.platform, target).is_some() =>
            {
                EventResult::Handled
            }
            _ => EventResult::PassThrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OverlayOptions;
    use crate::test_support::MockPlatform;

    fn setup() -> (MockPlatform, usize, usize, OverlayOptions) {
        let platform = MockPlatform::new();
        let overlay = platform.create_element("div").unwrap();
        let target = platform.add_media("img", 200.0, 100.0);
        (platform, overlay, target, OverlayOptions::default())
    }

    fn click(
        module: &mut Toolbar<MockPlatform>,
        ctx: &mut ModuleContext<'_, MockPlatform>,
        alignment: Alignment,
    ) -> EventResult {
        let button = module
            .buttons
            .iter()
            .find(|(a, _)| *a == alignment)
            .map(|(_, b)| *b)
            .unwrap();
        module.on_event(ctx, &SurfaceEvent::OverlayClick { target: button })
    }

    #[test]
    fn test_creates_three_buttons() {
        let (platform, overlay, target, options) = setup();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        assert_eq!(module.buttons.len(), 3);
        let toolbar = module.toolbar.unwrap();
        assert!(platform.contains(&overlay, &toolbar));
        assert_eq!(platform.style_property(&module.buttons[0].1, "border-left-width"), None);
        assert_eq!(
            platform.style_property(&module.buttons[1].1, "border-left-width"),
            Some("0".to_string())
        );
        assert!(platform.inner_html(&module.buttons[0].1).starts_with("<svg"));
        assert_eq!(module.selected(&platform), None);
    }

    #[test]
    fn test_click_applies_left() {
        let (platform, overlay, target, options) = setup();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        assert_eq!(click(&mut module, &mut ctx, Alignment::Left), EventResult::Handled);
        assert_eq!(platform.style_property(&target, "float"), Some("left".to_string()));
        assert_eq!(platform.style_property(&target, "display"), Some("inline".to_string()));
        assert_eq!(
            platform.style_property(&target, "margin"),
            Some("0 1em 1em 0".to_string())
        );
        assert_eq!(platform.attribute(&target, "align"), Some("left".to_string()));
        assert_eq!(module.selected(&platform), Some(Alignment::Left));
        assert!(ctx.requests().update);
    }

    #[test]
    fn test_click_applied_alignment_clears() {
        let (platform, overlay, target, options) = setup();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        click(&mut module, &mut ctx, Alignment::Right);
        click(&mut module, &mut ctx, Alignment::Right);

        assert_eq!(platform.style_property(&target, "float"), None);
        assert_eq!(platform.style_property(&target, "margin"), None);
        assert_eq!(platform.style_property(&target, "display"), None);
        assert_eq!(module.selected(&platform), None);
        let selected = module
            .buttons
            .iter()
            .filter(|(_, b)| platform.style_property(b, "filter").is_some())
            .count();
        assert_eq!(selected, 0);
    }

    #[test]
    fn test_switching_alignment_selects_exactly_one() {
        let (platform, overlay, target, options) = setup();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        click(&mut module, &mut ctx, Alignment::Left);
        click(&mut module, &mut ctx, Alignment::Center);

        assert_eq!(platform.style_property(&target, "float"), None);
        assert_eq!(platform.style_property(&target, "display"), Some("block".to_string()));
        assert_eq!(platform.style_property(&target, "margin"), Some("auto".to_string()));
        assert_eq!(platform.attribute(&target, "align"), Some("center".to_string()));
        let selected: Vec<_> = module
            .buttons
            .iter()
            .filter(|(_, b)| platform.style_property(b, "filter").is_some())
            .map(|(a, _)| *a)
            .collect();
        assert_eq!(selected, vec![Alignment::Center]);
    }

    #[test]
    fn test_preselects_existing_alignment() {
        let (platform, overlay, target, options) = setup();
        apply_alignment(&platform, &target, Alignment::Right);
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        assert_eq!(module.selected(&platform), Some(Alignment::Right));
    }

    #[test]
    fn test_click_elsewhere_passes_through() {
        let (platform, overlay, target, options) = setup();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);
        let mut module = Toolbar::<MockPlatform>::new();
        module.on_create(&mut ctx);

        let result = module.on_event(&mut ctx, &SurfaceEvent::OverlayClick { target: overlay });
        assert_eq!(result, EventResult::PassThrough);
        assert!(!ctx.requests().update);
    }
}
