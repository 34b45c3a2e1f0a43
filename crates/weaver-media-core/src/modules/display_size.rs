//! Live `width × height` readout for the target.

use crate::module::{MediaModule, ModuleContext};
use crate::platform::OverlayPlatform;
use crate::types::Size;

/// Targets at least this large get the label inside their bottom-right corner.
const INSIDE_MIN_WIDTH: f64 = 120.0;
const INSIDE_MIN_HEIGHT: f64 = 30.0;

/// Gap between the label and the target edge.
const LABEL_GAP: f64 = 4.0;

/// Shows the target's rendered size in a small label on the overlay.
pub struct DisplaySize<P: OverlayPlatform> {
    label: Option<P::Element>,
}

impl<P: OverlayPlatform> DisplaySize<P> {
    pub fn new() -> Self {
        Self { label: None }
    }
}

impl<P: OverlayPlatform> Default for DisplaySize<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Label text for a rendered size, e.g. `200 × 50`.
pub fn format_size(size: Size) -> String {
    format!("{} × {}", size.width, size.height)
}

/// CSS anchor values for the label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelPlacement {
    pub right: String,
    pub bottom: String,
    pub left: String,
}

/// Where to put the label for a target of `target` size.
///
/// Large targets get the label inside their bottom-right corner. Small ones
/// get it outside, below, so it doesn't cover the image: to the left for
/// right-floated targets, to the right otherwise.
pub fn label_placement(target: Size, floated_right: bool, label: Size) -> LabelPlacement {
    if target.width > INSIDE_MIN_WIDTH && target.height > INSIDE_MIN_HEIGHT {
        return LabelPlacement {
            right: format!("{LABEL_GAP}px"),
            bottom: format!("{LABEL_GAP}px"),
            left: "auto".to_string(),
        };
    }

    let outside_x = format!("-{}px", label.width + LABEL_GAP);
    let outside_y = format!("-{}px", label.height + LABEL_GAP);
    if floated_right {
        LabelPlacement {
            right: "auto".to_string(),
            bottom: outside_y,
            left: outside_x,
        }
    } else {
        LabelPlacement {
            right: outside_x,
            bottom: outside_y,
            left: "auto".to_string(),
        }
    }
}

impl<P: OverlayPlatform> MediaModule<P> for DisplaySize<P> {
    fn name(&self) -> &str {
        "display-size"
    }

    fn on_create(&mut self, ctx: &mut ModuleContext<'_, P>) {
        let label = match ctx.platform.create_element("div") {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!(target: "weaver::media", "size label not created: {e}");
                return;
            }
        };
        ctx.platform.apply_styles(&label, &ctx.options.display_styles);
        if let Err(e) = ctx.platform.append_child(ctx.overlay, &label) {
            tracing::warn!(target: "weaver::media", "size label not mounted: {e}");
            return;
        }
        self.label = Some(label);
    }

    fn on_update(&mut self, ctx: &mut ModuleContext<'_, P>) {
        let Some(label) = &self.label else {
            return;
        };
        let platform = ctx.platform;

        let size = platform.client_size(ctx.target);
        platform.set_text(label, &format_size(size));

        let floated_right =
            platform.style_property(ctx.target, "float").as_deref() == Some("right");
        let label_size = platform.bounding_rect(label).size();
        let placement = label_placement(size, floated_right, label_size);

        platform.set_style_property(label, "right", &placement.right);
        platform.set_style_property(label, "bottom", &placement.bottom);
        platform.set_style_property(label, "left", &placement.left);
    }

    fn on_destroy(&mut self, _ctx: &mut ModuleContext<'_, P>) {
        self.label = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OverlayOptions;
    use crate::test_support::MockPlatform;
    use crate::types::Rect;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(Size::new(200.0, 50.0)), "200 × 50");
        insta::assert_snapshot!(format_size(Size::new(1024.0, 768.0)), @"1024 × 768");
    }

    #[test]
    fn test_large_target_anchors_inside() {
        let placement = label_placement(Size::new(200.0, 50.0), false, Size::new(60.0, 20.0));
        assert_eq!(placement.right, "4px");
        assert_eq!(placement.bottom, "4px");
        assert_eq!(placement.left, "auto");
    }

    #[test]
    fn test_small_target_anchors_outside_right() {
        // Wide enough but too short.
        let placement = label_placement(Size::new(200.0, 30.0), false, Size::new(60.0, 20.0));
        assert_eq!(placement.right, "-64px");
        assert_eq!(placement.bottom, "-24px");
        assert_eq!(placement.left, "auto");
    }

    #[test]
    fn test_small_right_floated_target_anchors_outside_left() {
        let placement = label_placement(Size::new(100.0, 100.0), true, Size::new(60.0, 20.0));
        assert_eq!(placement.right, "auto");
        assert_eq!(placement.bottom, "-24px");
        assert_eq!(placement.left, "-64px");
    }

    #[test]
    fn test_update_writes_rendered_size() {
        let platform = MockPlatform::new();
        let overlay = platform.create_element("div").unwrap();
        // Intrinsic size differs from the rendered box.
        let target = platform.add_media("img", 200.0, 50.0);
        platform.set_natural_width(&target, 800.0);
        let options = OverlayOptions::default();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);

        let mut module = DisplaySize::<MockPlatform>::new();
        module.on_create(&mut ctx);
        module.on_update(&mut ctx);

        let label = module.label.clone().unwrap();
        assert!(platform.contains(&overlay, &label));
        assert_eq!(platform.text(&label), "200 × 50");
        assert_eq!(platform.style_property(&label, "right"), Some("4px".to_string()));
        assert_eq!(platform.style_property(&label, "bottom"), Some("4px".to_string()));
        assert_eq!(platform.style_property(&label, "left"), Some("auto".to_string()));
        assert_eq!(
            platform.style_property(&label, "position"),
            Some("absolute".to_string())
        );
    }

    #[test]
    fn test_update_small_floated_target_uses_label_size() {
        let platform = MockPlatform::new();
        let overlay = platform.create_element("div").unwrap();
        let target = platform.add_media("img", 80.0, 20.0);
        platform.set_style_property(&target, "float", "right");
        let options = OverlayOptions::default();
        let mut ctx = ModuleContext::new(&platform, &overlay, &target, &options);

        let mut module = DisplaySize::<MockPlatform>::new();
        module.on_create(&mut ctx);
        let label = module.label.clone().unwrap();
        platform.set_rect(&label, Rect::new(0.0, 0.0, 50.0, 18.0));
        module.on_update(&mut ctx);

        assert_eq!(platform.text(&label), "80 × 20");
        assert_eq!(platform.style_property(&label, "left"), Some("-54px".to_string()));
        assert_eq!(platform.style_property(&label, "bottom"), Some("-22px".to_string()));
        assert_eq!(platform.style_property(&label, "right"), Some("auto".to_string()));
    }
}
