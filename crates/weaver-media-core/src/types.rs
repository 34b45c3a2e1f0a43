//! Geometry and alignment types shared by the controller and modules.

/// Rectangle in viewport pixels, as reported by the platform's layout API.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Width and height in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Corner of the overlay a resize handle sits on.
///
/// Handles are created in `Corner::ALL` order, so the index of a handle is
/// the index of its corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Left-side handles grow the target when dragged left.
    pub fn is_left_side(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// CSS cursor shown over the handle and during its drag.
    pub fn cursor(self) -> &'static str {
        match self {
            Corner::TopLeft | Corner::BottomRight => "nwse-resize",
            Corner::TopRight | Corner::BottomLeft => "nesw-resize",
        }
    }

    /// Horizontal and vertical CSS anchor properties for this corner.
    pub fn anchors(self) -> (&'static str, &'static str) {
        let horizontal = if self.is_left_side() { "left" } else { "right" };
        let vertical = if self.is_top() { "top" } else { "bottom" };
        (horizontal, vertical)
    }
}

/// Alignment variants offered by the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    /// Value written to the target's `align` attribute.
    pub fn name(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Alignment::Left | Alignment::Right => "inline",
            Alignment::Center => "block",
        }
    }

    /// `None` means the float property is removed.
    pub fn float(self) -> Option<&'static str> {
        match self {
            Alignment::Left => Some("left"),
            Alignment::Center => None,
            Alignment::Right => Some("right"),
        }
    }

    pub fn margin(self) -> &'static str {
        match self {
            Alignment::Left => "0 1em 1em 0",
            Alignment::Center => "auto",
            Alignment::Right => "0 0 1em 1em",
        }
    }

    /// Whether this alignment is in effect given the target's current
    /// `float` and `margin` style values.
    pub fn matches(self, float: Option<&str>, margin: Option<&str>) -> bool {
        match self {
            Alignment::Left => float == Some("left"),
            Alignment::Center => margin == Some("auto"),
            Alignment::Right => float == Some("right"),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Alignment::Left => ALIGN_LEFT_ICON,
            Alignment::Center => ALIGN_CENTER_ICON,
            Alignment::Right => ALIGN_RIGHT_ICON,
        }
    }
}

const ALIGN_LEFT_ICON: &str = concat!(
    r#"<svg viewBox="0 0 18 18">"#,
    r#"<line class="ql-stroke" x1="3" x2="15" y1="9" y2="9"></line>"#,
    r#"<line class="ql-stroke" x1="3" x2="13" y1="14" y2="14"></line>"#,
    r#"<line class="ql-stroke" x1="3" x2="9" y1="4" y2="4"></line>"#,
    r#"</svg>"#,
);

const ALIGN_CENTER_ICON: &str = concat!(
    r#"<svg viewBox="0 0 18 18">"#,
    r#"<line class="ql-stroke" x1="15" x2="3" y1="9" y2="9"></line>"#,
    r#"<line class="ql-stroke" x1="14" x2="4" y1="14" y2="14"></line>"#,
    r#"<line class="ql-stroke" x1="12" x2="6" y1="4" y2="4"></line>"#,
    r#"</svg>"#,
);

const ALIGN_RIGHT_ICON: &str = concat!(
    r#"<svg viewBox="0 0 18 18">"#,
    r#"<line class="ql-stroke" x1="15" x2="3" y1="9" y2="9"></line>"#,
    r#"<line class="ql-stroke" x1="15" x2="5" y1="14" y2="14"></line>"#,
    r#"<line class="ql-stroke" x1="15" x2="9" y1="4" y2="4"></line>"#,
    r#"</svg>"#,
);
