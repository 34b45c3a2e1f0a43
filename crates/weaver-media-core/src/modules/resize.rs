//! Corner drag handles that resize the target horizontally.
//!
//! Only the width is written; the platform scales the height to preserve the
//! aspect ratio.

use crate::events::{EventKind, EventResult, ListenScope, SurfaceEvent};
use crate::guard::DragCursorGuard;
use crate::module::{MediaModule, ModuleContext};
use crate::options::parse_px;
use crate::platform::OverlayPlatform;
use crate::types::Corner;

/// Smallest width a drag can produce.
pub const MIN_WIDTH: f64 = 1.0;

/// Four resize handles, one per overlay corner.
pub struct Resize<P: OverlayPlatform> {
    handles: Vec<(Corner, P::Element)>,
    drag: Option<DragSession<P>>,
}

/// State of an in-progress drag. Dropping it restores the cursor and
/// removes the document-level move/up listeners.
struct DragSession<P: OverlayPlatform> {
    corner: Corner,
    start_x: f64,
    start_width: f64,
    _cursor: DragCursorGuard<P>,
    _listeners: [P::Listener; 2],
}

impl<P: OverlayPlatform> Resize<P> {
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
            drag: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn handle_at(&self, platform: &P, target: &P::Element) -> Option<Corner> {
        self.handles
            .iter()
            .find(|(_, handle)| platform.contains(handle, target))
            .map(|(corner, _)| *corner)
    }

    fn add_handle(&mut self, ctx: &ModuleContext<'_, P>, corner: Corner, size: (f64, f64)) {
        let platform = ctx.platform;
        let handle = match platform.create_element("div") {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(target: "weaver::media", ?corner, "resize handle not created: {e}");
                return;
            }
        };
        platform.apply_styles(&handle, &ctx.options.handle_styles);
        platform.set_style_property(&handle, "cursor", corner.cursor());
        platform.set_style_property(&handle, "width", &format!("{}px", size.0));
        platform.set_style_property(&handle, "height", &format!("{}px", size.1));
        if let Err(e) = platform.append_child(ctx.overlay, &handle) {
            tracing::warn!(target: "weaver::media", ?corner, "resize handle not mounted: {e}");
            return;
        }
        self.handles.push((corner, handle));
    }

    /// Center each handle on its corner.
    fn position_handles(&self, platform: &P, size: (f64, f64)) {
        let x_offset = format!("{}px", -size.0 / 2.0);
        let y_offset = format!("{}px", -size.1 / 2.0);
        for (corner, handle) in &self.handles {
            let (horizontal, vertical) = corner.anchors();
            platform.set_style_property(handle, horizontal, &x_offset);
            platform.set_style_property(handle, vertical, &y_offset);
        }
    }

    fn start_drag(&mut self, ctx: &ModuleContext<'_, P>, corner: Corner, x: f64) {
        let platform = ctx.platform;
        let start_width = starting_width(platform, ctx.target);
        tracing::debug!(
            target: "weaver::media",
            ?corner,
            start_x = x,
            start_width,
            "resize drag started"
        );

        self.drag = Some(DragSession {
            corner,
            start_x: x,
            start_width,
            _cursor: DragCursorGuard::acquire(platform, ctx.target, corner.cursor()),
            _listeners: [
                platform.listen(ListenScope::Document, EventKind::PointerMove),
                platform.listen(ListenScope::Document, EventKind::PointerUp),
            ],
        });
    }
}

impl<P: OverlayPlatform> Default for Resize<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Width the drag starts from: the explicit `width` attribute if set, else
/// the intrinsic width, else the rendered width.
pub fn starting_width<P: OverlayPlatform>(platform: &P, target: &P::Element) -> f64 {
    parse_px(platform.attribute(target, "width").as_deref())
        .filter(|w| *w > 0.0)
        .or_else(|| platform.natural_width(target).filter(|w| *w > 0.0))
        .unwrap_or_else(|| platform.client_size(target).width)
}

/// New target width after dragging `corner` by `delta_x` pixels.
///
/// Left-side handles grow the target when dragged left. The result is
/// rounded to a whole pixel and never drops below `MIN_WIDTH`.
pub fn resized_width(corner: Corner, start_width: f64, delta_x: f64) -> f64 {
    let width = if corner.is_left_side() {
        start_width - delta_x
    } else {
        start_width + delta_x
    };
    width.round().max(MIN_WIDTH)
}

impl<P: OverlayPlatform> MediaModule<P> for Resize<P> {
    fn name(&self) -> &str {
        "resize"
    }

    fn on_create(&mut self, ctx: &mut ModuleContext<'_, P>) {
        let size = ctx.options.handle_size();
        for corner in Corner::ALL {
            self.add_handle(ctx, corner, size);
        }
        self.position_handles(ctx.platform, size);
    }

    fn on_destroy(&mut self, _ctx: &mut ModuleContext<'_, P>) {
        if self.drag.take().is_some() {
            tracing::debug!(target: "weaver::media", "resize drag abandoned on teardown");
        }
    }

    fn on_event(
        &mut self,
        ctx: &mut ModuleContext<'_, P>,
        event: &SurfaceEvent<P::Element>,
    ) -> EventResult {
        match event {
            SurfaceEvent::OverlayPointerDown { target, x } => {
                let Some(corner) = self.handle_at(ctx.platform, target) else {
                    return EventResult::PassThrough;
                };
                // A new press without a release replaces the old session.
                self.drag = None;
                self.start_drag(ctx, corner, *x);
                EventResult::Handled
            }
            // The click that ends a press on a handle is not a background click.
            SurfaceEvent::OverlayClick { target }
                if self.handle_at(ctx.platform, target).is_some() =>
            {
                EventResult::Handled
            }
            SurfaceEvent::PointerMove { x } => {
                let Some(drag) = &self.drag else {
                    return EventResult::PassThrough;
                };
                if !ctx.platform.is_connected(ctx.target) {
                    tracing::debug!(target: "weaver::media", "target detached mid-drag");
                    self.drag = None;
                    ctx.request_deactivate();
                    return EventResult::Handled;
                }

                let width = resized_width(drag.corner, drag.start_width, x - drag.start_x);
                ctx.platform
                    .set_attribute(ctx.target, "width", &width.to_string());
                ctx.request_update();
                EventResult::Handled
            }
            SurfaceEvent::PointerUp => {
                if self.drag.take().is_some() {
                    tracing::debug!(target: "weaver::media", "resize drag finished");
                    EventResult::Handled
                } else {
                    EventResult::PassThrough
                }
            }
            _ => EventResult::PassThrough,
        }
    }
}
