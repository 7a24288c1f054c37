/*!
Typed SVG primitives and a document writer for the network map.

Only the shapes the map needs are modeled: polylines for routes,
circles for stops and text with an optional halo for labels. Shapes are
plain structs with chaining setters; attributes that were never set are
omitted from the output. No crate in the stack emits SVG, so the writer
lives here and pins the exact output format the map endpoint returns.
*/

use std::fmt::{self, Display};

use serde::Deserialize;

/// A point in viewport coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An SVG color: a named color, `rgb(..)` or `rgba(..)`.
///
/// Deserializes from the map-settings JSON forms: a string name, an
/// `[r, g, b]` array or an `[r, g, b, a]` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Name(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Default for Color {
    fn default() -> Self {
        Color::Name("none".to_string())
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Name(name) => write!(f, "{name}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arcs => "arcs",
            Self::Bevel => "bevel",
            Self::Miter => "miter",
            Self::MiterClip => "miter-clip",
            Self::Round => "round",
        };
        write!(f, "{name}")
    }
}

/// Presentation attributes shared by every shape. Unset attributes are
/// not rendered.
#[derive(Debug, Clone, Default, PartialEq)]
struct PathProps {
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: Option<f64>,
    stroke_linecap: Option<StrokeLineCap>,
    stroke_linejoin: Option<StrokeLineJoin>,
}

impl Display for PathProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{fill}\"")?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{stroke}\"")?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{width}\"")?;
        }
        if let Some(linecap) = self.stroke_linecap {
            write!(f, " stroke-linecap=\"{linecap}\"")?;
        }
        if let Some(linejoin) = self.stroke_linejoin {
            write!(f, " stroke-linejoin=\"{linejoin}\"")?;
        }
        Ok(())
    }
}

macro_rules! path_props_setters {
    () => {
        #[must_use]
        pub fn fill(mut self, color: Color) -> Self {
            self.props.fill = Some(color);
            self
        }

        #[must_use]
        pub fn stroke(mut self, color: Color) -> Self {
            self.props.stroke = Some(color);
            self
        }

        #[must_use]
        pub fn stroke_width(mut self, width: f64) -> Self {
            self.props.stroke_width = Some(width);
            self
        }

        #[must_use]
        pub fn stroke_linecap(mut self, linecap: StrokeLineCap) -> Self {
            self.props.stroke_linecap = Some(linecap);
            self
        }

        #[must_use]
        pub fn stroke_linejoin(mut self, linejoin: StrokeLineJoin) -> Self {
            self.props.stroke_linejoin = Some(linejoin);
            self
        }
    };
}

/// `<polyline>` through a sequence of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    props: PathProps,
}

impl Polyline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    path_props_setters!();
}

impl Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<polyline points=\"")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{},{}", point.x, point.y)?;
        }
        write!(f, "\"{}/>", self.props)
    }
}

/// `<circle>` with a center and radius.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    props: PathProps,
}

impl Circle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    path_props_setters!();
}

impl Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            self.center.x, self.center.y, self.radius, self.props
        )
    }
}

/// `<text>` at a position with an offset. The text data is escaped on
/// output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    position: Point,
    offset: Point,
    font_size: u32,
    font_family: Option<String>,
    font_weight: Option<String>,
    data: String,
    props: PathProps,
}

impl Text {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn font_family(mut self, family: &str) -> Self {
        self.font_family = Some(family.to_string());
        self
    }

    #[must_use]
    pub fn font_weight(mut self, weight: &str) -> Self {
        self.font_weight = Some(weight.to_string());
        self
    }

    #[must_use]
    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    path_props_setters!();
}

impl Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<text{} x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
            self.props, self.position.x, self.position.y, self.offset.x, self.offset.y, self.font_size
        )?;
        if let Some(family) = &self.font_family {
            write!(f, " font-family=\"{family}\"")?;
        }
        if let Some(weight) = &self.font_weight {
            write!(f, " font-weight=\"{weight}\"")?;
        }
        write!(f, ">")?;
        write_escaped(f, &self.data)?;
        write!(f, "</text>")
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, data: &str) -> fmt::Result {
    for c in data.chars() {
        match c {
            '"' => write!(f, "&quot;")?,
            '\'' => write!(f, "&apos;")?,
            '<' => write!(f, "&lt;")?,
            '>' => write!(f, "&gt;")?,
            '&' => write!(f, "&amp;")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

/// Enum over every supported shape, so the document stores plain values
/// instead of trait objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

impl From<Text> for Shape {
    fn from(text: Text) -> Self {
        Shape::Text(text)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle(circle) => circle.fmt(f),
            Shape::Polyline(polyline) => polyline.fmt(f),
            Shape::Text(text) => text.fmt(f),
        }
    }
}

/// An SVG document: the fixed envelope plus shapes in insertion order,
/// one per line with two-space indentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    shapes: Vec<Shape>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// The document as a string, for embedding into a JSON response.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">")?;
        for shape in &self.shapes {
            writeln!(f, "  {shape}")?;
        }
        write!(f, "</svg>")
    }
}
