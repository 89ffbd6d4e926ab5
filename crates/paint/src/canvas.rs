//! The drawing surface abstraction.
//!
//! A [Canvas](trait.Canvas.html) strokes line segments with its current
//! [StrokeStyle](struct.StrokeStyle.html). The style can be saved and restored as a
//! stack, either manually with `save` and `restore` or with a
//! [ScopedStyle](struct.ScopedStyle.html) guard that restores the style when it goes
//! out of scope.

use crate::color::Color;
use crate::math::Point;

use std::ops::{Deref, DerefMut};

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
///
/// <svg viewBox="0 0 400 399.99998" height="400" width="400">
///   <g transform="translate(0,-652.36229)">
///     <path style="opacity:1;fill:#80b3ff;stroke:#000000;stroke-width:1;stroke-linejoin:round;" d="m 240,983 a 30,30 0 0 1 -25,-15 30,30 0 0 1 0,-30.00001 30,30 0 0 1 25.98076,-15 l 0,30 z"/>
///     <path style="fill:none;stroke:#000000;stroke-width:1px;stroke-linecap:butt;" d="m 390,782.6 -150,0 0,-60 150,0"/>
///     <path style="fill:none;stroke:#000000;stroke-width:1px;stroke-linecap:butt;" d="m 390,882.6 -180,0 0,-60 180,0"/>
///     <path style="fill:none;stroke:#000000;stroke-width:1px;stroke-linecap:butt;" d="m 390,1012.6 -150,0 0,-60 150,0"/>
///     <text y="757.6" x="10"><tspan y="757.6" x="10">Butt</tspan></text>
///     <text y="857.6" x="10"><tspan y="857.6" x="10">Square</tspan></text>
///     <text y="987.6" x="10"><tspan y="987.6" x="10">Round</tspan></text>
///   </g>
/// </svg>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width. If a sub-path has zero length,
    /// then the resulting effect is that the stroke for that sub-path consists
    /// solely of a square with side length equal to the stroke width, centered
    /// at the sub-path's point.
    Square,
    /// At each end of each sub-path, the shape representing the stroke will be
    /// extended by a half circle with a radius equal to the stroke width.
    /// If a sub-path has zero length, then the resulting effect is that the
    /// stroke for that sub-path consists solely of a full circle centered at
    /// the sub-path's point.
    Round,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A bevelled corner is to be used to join path segments.
    Bevel,
}

/// The state that affects how lines are stroked.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeStyle {
    /// Default value: `Color::BLACK`.
    pub color: Color,

    /// Default value: `StrokeStyle::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,

    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,
}

impl StrokeStyle {
    pub const DEFAULT_COLOR: Color = Color::BLACK;
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;

    pub const DEFAULT: Self = StrokeStyle {
        color: Self::DEFAULT_COLOR,
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_cap: Self::DEFAULT_LINE_CAP,
        line_join: Self::DEFAULT_LINE_JOIN,
    };

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A surface that line segments can be stroked onto.
///
/// Implementations only need to provide access to the current style, the save/restore
/// stack and `stroke_line`. The `set_*` helpers are provided on top of `style_mut`.
pub trait Canvas {
    /// The style used by the next `stroke_line` calls.
    fn style(&self) -> &StrokeStyle;

    fn style_mut(&mut self) -> &mut StrokeStyle;

    /// Pushes a copy of the current style on the save stack.
    fn save(&mut self);

    /// Pops the last saved style and makes it current.
    ///
    /// Does nothing if the save stack is empty.
    fn restore(&mut self);

    /// Strokes a single line segment with the current style.
    fn stroke_line(&mut self, from: Point, to: Point);

    fn set_style(&mut self, style: StrokeStyle) {
        *self.style_mut() = style;
    }

    fn set_color(&mut self, color: Color) {
        self.style_mut().color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.style_mut().line_width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.style_mut().line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.style_mut().line_join = join;
    }

    /// Saves the style and returns a guard that restores it when dropped.
    fn save_scope(&mut self) -> ScopedStyle<'_, Self>
    where
        Self: Sized,
    {
        ScopedStyle::new(self)
    }
}

impl<'l, C: Canvas + ?Sized> Canvas for &'l mut C {
    fn style(&self) -> &StrokeStyle {
        (**self).style()
    }
    fn style_mut(&mut self) -> &mut StrokeStyle {
        (**self).style_mut()
    }
    fn save(&mut self) {
        (**self).save()
    }
    fn restore(&mut self) {
        (**self).restore()
    }
    fn stroke_line(&mut self, from: Point, to: Point) {
        (**self).stroke_line(from, to)
    }
}

/// Restores the style of a canvas when dropped.
///
/// The style is saved when the guard is created. Dropping the guard restores it,
/// including when returning early or unwinding. The guard dereferences to the canvas.
///
/// ```
/// use sweep_paint::canvas::{Canvas, RecordingCanvas};
/// use sweep_paint::color::Color;
///
/// let mut canvas = RecordingCanvas::new();
/// {
///     let mut scope = canvas.save_scope();
///     scope.set_color(Color::RED);
///     scope.set_line_width(4.0);
/// }
///
/// assert_eq!(canvas.style().color, Color::BLACK);
/// assert_eq!(canvas.style().line_width, 1.0);
/// ```
pub struct ScopedStyle<'l, C: Canvas + ?Sized> {
    canvas: &'l mut C,
}

impl<'l, C: Canvas + ?Sized> ScopedStyle<'l, C> {
    pub fn new(canvas: &'l mut C) -> Self {
        canvas.save();
        ScopedStyle { canvas }
    }
}

impl<'l, C: Canvas + ?Sized> Deref for ScopedStyle<'l, C> {
    type Target = C;
    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<'l, C: Canvas + ?Sized> DerefMut for ScopedStyle<'l, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<'l, C: Canvas + ?Sized> Drop for ScopedStyle<'l, C> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

/// The current style and the save stack.
///
/// Canvas implementations can use this to get `save` and `restore` right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleStack {
    current: StrokeStyle,
    saved: Vec<StrokeStyle>,
}

impl StyleStack {
    pub fn new() -> Self {
        StyleStack {
            current: StrokeStyle::DEFAULT,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn current(&self) -> &StrokeStyle {
        &self.current
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut StrokeStyle {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.current = style;
        }
    }

    /// Number of saved styles.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// A line segment stroked on a `RecordingCanvas`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RecordedSegment {
    pub from: Point,
    pub to: Point,
    pub style: StrokeStyle,
}

/// A canvas that doesn't draw anything but records the segments stroked onto it.
#[derive(Clone, Debug, Default)]
pub struct RecordingCanvas {
    styles: StyleStack,
    segments: Vec<RecordedSegment>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        RecordingCanvas {
            styles: StyleStack::new(),
            segments: Vec::new(),
        }
    }

    /// The recorded segments, in the order they were stroked.
    pub fn segments(&self) -> &[RecordedSegment] {
        &self.segments
    }

    /// Number of saved styles that have not been restored yet.
    pub fn save_depth(&self) -> usize {
        self.styles.depth()
    }

    /// Forgets the recorded segments. The style state is kept.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn style(&self) -> &StrokeStyle {
        self.styles.current()
    }

    fn style_mut(&mut self) -> &mut StrokeStyle {
        self.styles.current_mut()
    }

    fn save(&mut self) {
        self.styles.save();
    }

    fn restore(&mut self) {
        self.styles.restore();
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.segments.push(RecordedSegment {
            from,
            to,
            style: *self.styles.current(),
        });
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn save_restore_stack() {
    let mut canvas = RecordingCanvas::new();
    canvas.set_color(Color::RED);
    canvas.save();
    canvas.set_color(Color::GREEN);
    canvas.set_line_width(3.0);
    canvas.save();
    canvas.set_color(Color::BLUE);
    assert_eq!(canvas.save_depth(), 2);

    canvas.restore();
    assert_eq!(canvas.style().color, Color::GREEN);
    assert_eq!(canvas.style().line_width, 3.0);

    canvas.restore();
    assert_eq!(canvas.style().color, Color::RED);
    assert_eq!(canvas.style().line_width, 1.0);

    // Unbalanced restore is ignored.
    canvas.restore();
    assert_eq!(canvas.style().color, Color::RED);
    assert_eq!(canvas.save_depth(), 0);
}

#[test]
fn scoped_style_restores_on_drop() {
    let mut canvas = RecordingCanvas::new();
    let before = *canvas.style();

    {
        let mut scope = canvas.save_scope();
        scope.set_style(
            StrokeStyle::DEFAULT
                .with_color(Color::WHITE)
                .with_line_width(5.0)
                .with_line_cap(LineCap::Round)
                .with_line_join(LineJoin::Round),
        );
        scope.stroke_line(point(0.0, 0.0), point(1.0, 0.0));
        assert_eq!(scope.save_depth(), 1);
    }

    assert_eq!(*canvas.style(), before);
    assert_eq!(canvas.save_depth(), 0);
    assert_eq!(canvas.segments().len(), 1);
    assert_eq!(canvas.segments()[0].style.line_cap, LineCap::Round);
    assert_eq!(canvas.segments()[0].style.line_width, 5.0);
}

#[test]
fn scoped_style_restores_on_early_return() {
    fn draw(canvas: &mut dyn Canvas, fail: bool) -> Result<(), ()> {
        let mut scope = ScopedStyle::new(canvas);
        scope.set_color(Color::RED);
        if fail {
            return Err(());
        }
        scope.stroke_line(point(0.0, 0.0), point(0.0, 1.0));
        Ok(())
    }

    let mut canvas = RecordingCanvas::new();
    assert_eq!(draw(&mut canvas, true), Err(()));
    assert_eq!(canvas.style().color, Color::BLACK);
    assert_eq!(draw(&mut canvas, false), Ok(()));
    assert_eq!(canvas.style().color, Color::BLACK);
    assert_eq!(canvas.segments()[0].style.color, Color::RED);
}

#[test]
fn scoped_style_restores_on_panic() {
    let mut canvas = RecordingCanvas::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut scope = canvas.save_scope();
        scope.set_line_width(8.0);
        panic!("oops");
    }));

    assert!(result.is_err());
    assert_eq!(canvas.style().line_width, 1.0);
    assert_eq!(canvas.save_depth(), 0);
}
