//! SVG path data parser.
//!
//! Reads the `d` attribute syntax of SVG paths and writes the result into a
//! [PathBuilder](../../sweep_path/builder/trait.PathBuilder.html).
//!
//! Supported commands are `M`, `L`, `H`, `V`, `Q`, `T`, `C`, `S` and `Z`, in both their
//! absolute (upper case) and relative (lower case) forms. Elliptic arcs (`A`) are not
//! supported and are reported as `ParseError::Unsupported`.
//!
//! ```
//! use sweep_extra::parser::parse_svg_path;
//!
//! let path = parse_svg_path("M 0 0 L 10 0 q 5 5 10 0 Z").unwrap();
//! assert_eq!(path.num_sub_paths(), 1);
//! ```

use crate::math::{point, Point};
use crate::path::{traits::PathBuilder, Path};

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Expected move-to command, got {command:?}.")]
    MissingMoveTo {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Unsupported command {command:?}.")]
    Unsupported {
        command: char,
        line: i32,
        column: i32,
    },
}

/// Parses SVG path data into a `Path`.
pub fn parse_svg_path(src: &str) -> Result<Path, ParseError> {
    let mut builder = Path::builder();
    SvgPathParser::new().parse(&mut Cursor::new(src.chars()), &mut builder)?;

    Ok(builder.build())
}

// A buffered iterator of characters keeping track of line and column.
pub struct Cursor<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Cursor<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();
        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        Cursor {
            src,
            current,
            line: if current == '\n' { 1 } else { 0 },
            col: 0,
            finished,
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    fn take_digits(&mut self, buffer: &mut String) {
        while self.current.is_ascii_digit() {
            buffer.push(self.current);
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }

        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A reusable SVG path data parser.
#[derive(Debug, Default)]
pub struct SvgPathParser {
    float_buffer: String,
    current_position: Point,
    need_end: bool,
}

impl SvgPathParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<Iter, Builder>(
        &mut self,
        src: &mut Cursor<Iter>,
        output: &mut Builder,
    ) -> Result<(), ParseError>
    where
        Iter: Iterator<Item = char>,
        Builder: PathBuilder,
    {
        self.need_end = false;

        let res = self.parse_path(src, output);

        if self.need_end {
            output.end(false);
        }

        res
    }

    fn parse_path(
        &mut self,
        src: &mut Cursor<impl Iterator<Item = char>>,
        output: &mut impl PathBuilder,
    ) -> Result<(), ParseError> {
        // A relative move-to at the start of the path is relative to the origin.
        self.current_position = point(0.0, 0.0);
        let mut first_position = point(0.0, 0.0);

        let mut need_start = true;
        let mut prev_cubic_ctrl = None;
        let mut prev_quadratic_ctrl = None;
        let mut implicit_cmd = 'M';

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let cmd_line = src.line;
            let cmd_col = src.col;

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            if need_start && cmd != 'm' && cmd != 'M' {
                return Err(ParseError::MissingMoveTo {
                    command: cmd,
                    line: cmd_line,
                    column: cmd_col,
                });
            }

            let is_relative = cmd.is_ascii_lowercase();

            match cmd {
                'm' | 'M' => {
                    if self.need_end {
                        output.end(false);
                    }

                    let to = self.parse_endpoint(is_relative, src)?;
                    first_position = to;
                    output.begin(to);
                    self.need_end = true;
                    need_start = false;
                }
                'l' | 'L' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.line_to(to);
                }
                'h' | 'H' => {
                    let mut x = self.parse_number(src)?;
                    if is_relative {
                        x += self.current_position.x;
                    }
                    let to = point(x, self.current_position.y);
                    self.current_position = to;
                    output.line_to(to);
                }
                'v' | 'V' => {
                    let mut y = self.parse_number(src)?;
                    if is_relative {
                        y += self.current_position.y;
                    }
                    let to = point(self.current_position.x, y);
                    self.current_position = to;
                    output.line_to(to);
                }
                'q' | 'Q' => {
                    let ctrl = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.quadratic_bezier_to(ctrl, to);
                }
                't' | 'T' => {
                    let ctrl = self.smooth_ctrl(prev_quadratic_ctrl);
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.quadratic_bezier_to(ctrl, to);
                }
                'c' | 'C' => {
                    let ctrl1 = self.parse_point(is_relative, src)?;
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                }
                's' | 'S' => {
                    let ctrl1 = self.smooth_ctrl(prev_cubic_ctrl);
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                }
                'z' | 'Z' => {
                    output.end(true);
                    self.current_position = first_position;
                    self.need_end = false;
                    need_start = true;
                }
                'a' | 'A' => {
                    return Err(ParseError::Unsupported {
                        command: cmd,
                        line: cmd_line,
                        column: cmd_col,
                    });
                }
                _ => {
                    return Err(ParseError::Command {
                        command: cmd,
                        line: cmd_line,
                        column: cmd_col,
                    });
                }
            }

            // Smooth curves only reflect the control point of a curve of the same kind.
            match cmd {
                'c' | 'C' | 's' | 'S' => {
                    prev_quadratic_ctrl = None;
                }
                'q' | 'Q' | 't' | 'T' => {
                    prev_cubic_ctrl = None;
                }
                _ => {
                    prev_cubic_ctrl = None;
                    prev_quadratic_ctrl = None;
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        Ok(())
    }

    fn smooth_ctrl(&self, prev_ctrl: Option<Point>) -> Point {
        match prev_ctrl {
            Some(prev_ctrl) => self.current_position + (self.current_position - prev_ctrl),
            None => self.current_position,
        }
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Cursor<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Cursor<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    fn parse_number(
        &mut self,
        src: &mut Cursor<impl Iterator<Item = char>>,
    ) -> Result<f32, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' || src.current == '+' {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        src.take_digits(&mut self.float_buffer);

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();
            src.take_digits(&mut self.float_buffer);
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' || src.current == '+' {
                self.float_buffer.push(src.current);
                src.advance_one();
            }

            src.take_digits(&mut self.float_buffer);
        }

        match self.float_buffer.parse::<f32>() {
            Ok(val) if val.is_finite() => Ok(val),
            _ => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }
}

#[cfg(test)]
use crate::path::PathEvent;

#[cfg(test)]
fn events(src: &str) -> Vec<PathEvent> {
    parse_svg_path(src).unwrap().iter().collect()
}

#[test]
fn empty() {
    assert!(parse_svg_path("").unwrap().is_empty());
    assert!(parse_svg_path("  \n ").unwrap().is_empty());
}

#[test]
fn simple_square() {
    let path = parse_svg_path("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();
    assert_eq!(path.num_sub_paths(), 1);
    assert_eq!(
        path.iter().last(),
        Some(PathEvent::End {
            last: point(0.0, 1.0),
            first: point(0.0, 0.0),
            close: true
        })
    );
}

#[test]
fn relative_and_implicit_commands() {
    assert_eq!(
        events("m 1 1 2 0 0 2 h -2 v -1"),
        vec![
            PathEvent::Begin { at: point(1.0, 1.0) },
            PathEvent::Line { from: point(1.0, 1.0), to: point(3.0, 1.0) },
            PathEvent::Line { from: point(3.0, 1.0), to: point(3.0, 3.0) },
            PathEvent::Line { from: point(3.0, 3.0), to: point(1.0, 3.0) },
            PathEvent::Line { from: point(1.0, 3.0), to: point(1.0, 2.0) },
            PathEvent::End { last: point(1.0, 2.0), first: point(1.0, 1.0), close: false },
        ]
    );
}

#[test]
fn smooth_curves() {
    assert_eq!(
        events("M0,0 Q 1,1 2,0 T 4,0"),
        vec![
            PathEvent::Begin { at: point(0.0, 0.0) },
            PathEvent::Quadratic {
                from: point(0.0, 0.0),
                ctrl: point(1.0, 1.0),
                to: point(2.0, 0.0)
            },
            PathEvent::Quadratic {
                from: point(2.0, 0.0),
                ctrl: point(3.0, -1.0),
                to: point(4.0, 0.0)
            },
            PathEvent::End { last: point(4.0, 0.0), first: point(0.0, 0.0), close: false },
        ]
    );

    let evts = events("M 0 0 C 0 1 1 1 1 0 s 1 -1 1 0");
    assert_eq!(
        evts[2],
        PathEvent::Cubic {
            from: point(1.0, 0.0),
            ctrl1: point(1.0, -1.0),
            ctrl2: point(2.0, -1.0),
            to: point(2.0, 0.0)
        }
    );

    // A smooth cubic after a line uses the current position as first control point.
    let evts = events("M 0 0 L 1 0 S 2 1 3 0");
    assert_eq!(
        evts[2],
        PathEvent::Cubic {
            from: point(1.0, 0.0),
            ctrl1: point(1.0, 0.0),
            ctrl2: point(2.0, 1.0),
            to: point(3.0, 0.0)
        }
    );
}

#[test]
fn multiple_sub_paths() {
    let path = parse_svg_path("M 0 0 L 1 0 M 5 5 L 6 5 Z m 1 1 l 1 0").unwrap();
    assert_eq!(path.num_sub_paths(), 3);
    // Relative move-to after a close is relative to the start of the closed sub-path.
    assert_eq!(path.end_position(), Some(point(7.0, 6.0)));
}

#[test]
fn numbers() {
    assert_eq!(events("M 0.6.5")[0], PathEvent::Begin { at: point(0.6, 0.5) });
    assert_eq!(events("M-1-2")[0], PathEvent::Begin { at: point(-1.0, -2.0) });
    assert_eq!(events("M 1e1 +2.5E-1")[0], PathEvent::Begin { at: point(10.0, 0.25) });
}

#[test]
fn invalid_cmd() {
    assert_eq!(
        parse_svg_path("M 0 0 x 1 1"),
        Err(ParseError::Command {
            command: 'x',
            line: 0,
            column: 6
        })
    );

    assert_eq!(
        parse_svg_path("\n M 0 \n0 x 1 1"),
        Err(ParseError::Command {
            command: 'x',
            line: 2,
            column: 2
        })
    );
}

#[test]
fn missing_move_to() {
    assert!(matches!(
        parse_svg_path("L 1 1"),
        Err(ParseError::MissingMoveTo { command: 'L', .. })
    ));
}

#[test]
fn arcs_are_unsupported() {
    assert!(matches!(
        parse_svg_path("M 0 0 A 5 5 0 0 1 10 0"),
        Err(ParseError::Unsupported { command: 'A', .. })
    ));
}

#[test]
fn invalid_number() {
    assert!(matches!(
        parse_svg_path("M 0 0 L 1"),
        Err(ParseError::Number { .. })
    ));
    assert!(matches!(
        parse_svg_path("M 0 0 L a b"),
        Err(ParseError::Number { .. })
    ));
}
