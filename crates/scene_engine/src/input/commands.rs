//! Editor commands
//!
//! One command per line, whitespace separated, keywords case-insensitive:
//!
//! ```text
//! add cone            translate 1 0 -2      camera rotate
//! next                rotate 0 90 0         press 10 20
//! group               scale 2 1 1           motion 30 20
//! close / reopen      view-all / bounds     release 30 20
//! print / draw        reshape 800 600       help / quit
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::render::camera::CameraMode;
use crate::scene::PrimitiveKind;

/// Errors produced while parsing a command line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// The line held no command
    #[error("Empty command")]
    Empty,

    /// The first word is not a known command
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// A required argument was not given
    #[error("'{command}' is missing its {argument} argument")]
    MissingArgument {
        /// Command keyword
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// An argument did not parse as a number
    #[error("'{value}' is not a valid number for {argument}")]
    InvalidNumber {
        /// Name of the argument
        argument: &'static str,
        /// Text that failed to parse
        value: String,
    },

    /// `add` named a shape that does not exist
    #[error("Unknown primitive '{0}' (expected cone, sphere, teapot, torus or spindle)")]
    UnknownPrimitive(String),

    /// `camera` named a mode that does not exist
    #[error("Unknown camera mode '{0}' (expected rotate, zoom, twist or pan)")]
    UnknownCameraMode(String),

    /// Extra words after a complete command
    #[error("Unexpected trailing arguments after '{command}': {extra}")]
    TrailingArguments {
        /// Command keyword
        command: &'static str,
        /// The ignored text
        extra: String,
    },
}

/// A parsed editor command
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Add a primitive to the active container
    Add(PrimitiveKind),
    /// Select the next sibling
    Next,
    /// Move the current node into the open group
    Group,
    /// Attach the open group to the root
    Close,
    /// Detach the current group for editing
    Reopen,
    /// Print the scene listing
    Print,
    /// End the session
    Quit,
    /// Set the current node's translation
    Translate(Vec3),
    /// Rotate the current node by incremental angles in degrees
    Rotate(Vec3),
    /// Set the current node's scale (clamped to the configured limits)
    Scale(Vec3),
    /// Change what mouse drags do to the camera
    Camera(CameraMode),
    /// Frame the whole scene
    ViewAll,
    /// Viewport resize
    Reshape {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// Left button pressed at a pixel position
    Press {
        /// Cursor x
        x: f32,
        /// Cursor y
        y: f32,
    },
    /// Left button released at a pixel position
    Release {
        /// Cursor x
        x: f32,
        /// Cursor y
        y: f32,
    },
    /// Cursor moved to a pixel position
    Motion {
        /// Cursor x
        x: f32,
        /// Cursor y
        y: f32,
    },
    /// Record one frame and summarize it
    Draw,
    /// Print the scene bounds
    Bounds,
    /// Print the command reference
    Help,
}

impl EditorCommand {
    /// Parse a script or console line
    ///
    /// Blank lines and lines starting with `#` yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    /// Keyword that introduces this command
    pub fn keyword(&self) -> &'static str {
        match self {
            EditorCommand::Add(_) => "add",
            EditorCommand::Next => "next",
            EditorCommand::Group => "group",
            EditorCommand::Close => "close",
            EditorCommand::Reopen => "reopen",
            EditorCommand::Print => "print",
            EditorCommand::Quit => "quit",
            EditorCommand::Translate(_) => "translate",
            EditorCommand::Rotate(_) => "rotate",
            EditorCommand::Scale(_) => "scale",
            EditorCommand::Camera(_) => "camera",
            EditorCommand::ViewAll => "view-all",
            EditorCommand::Reshape { .. } => "reshape",
            EditorCommand::Press { .. } => "press",
            EditorCommand::Release { .. } => "release",
            EditorCommand::Motion { .. } => "motion",
            EditorCommand::Draw => "draw",
            EditorCommand::Bounds => "bounds",
            EditorCommand::Help => "help",
        }
    }

    /// One line per command, for `help`
    pub const HELP: &'static str = "\
add <cone|sphere|teapot|torus|spindle>  add a primitive and select it
next                                    select the next sibling
group                                   move the selection into the open group
close                                   attach the open group to the root
reopen                                  detach the selected group for editing
translate <x> <y> <z>                   set the selection's translation
rotate <dx> <dy> <dz>                   rotate the selection (degrees)
scale <x> <y> <z>                       set the selection's scale
camera <rotate|zoom|twist|pan>          choose what mouse drags do
press|release|motion <x> <y>            mouse input in pixels
reshape <width> <height>                resize the viewport
view-all                                frame the whole scene
print                                   list the scene graph
draw                                    record a frame and summarize it
bounds                                  print the scene bounds
help                                    show this text
quit                                    end the session
";
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword();
        match self {
            EditorCommand::Add(kind) => write!(f, "{keyword} {}", kind.name().to_lowercase()),
            EditorCommand::Translate(v) | EditorCommand::Rotate(v) | EditorCommand::Scale(v) => {
                write!(f, "{keyword} {} {} {}", v.x, v.y, v.z)
            }
            EditorCommand::Camera(mode) => write!(f, "{keyword} {mode}"),
            EditorCommand::Reshape { width, height } => write!(f, "{keyword} {width} {height}"),
            EditorCommand::Press { x, y }
            | EditorCommand::Release { x, y }
            | EditorCommand::Motion { x, y } => write!(f, "{keyword} {x} {y}"),
            _ => f.write_str(keyword),
        }
    }
}

impl FromStr for EditorCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut args = Args::new(s);
        let Some(word) = args.words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "add" => {
                args.command = "add";
                let name = args.word("primitive")?;
                let kind = name
                    .parse::<PrimitiveKind>()
                    .map_err(CommandError::UnknownPrimitive)?;
                EditorCommand::Add(kind)
            }
            "next" => EditorCommand::Next,
            "group" => EditorCommand::Group,
            "close" => EditorCommand::Close,
            "reopen" => EditorCommand::Reopen,
            "print" => EditorCommand::Print,
            "quit" | "exit" => EditorCommand::Quit,
            "translate" => {
                args.command = "translate";
                EditorCommand::Translate(args.vec3()?)
            }
            "rotate" => {
                args.command = "rotate";
                EditorCommand::Rotate(args.vec3()?)
            }
            "scale" => {
                args.command = "scale";
                EditorCommand::Scale(args.vec3()?)
            }
            "camera" => {
                args.command = "camera";
                let name = args.word("mode")?;
                let mode = name
                    .parse::<CameraMode>()
                    .map_err(CommandError::UnknownCameraMode)?;
                EditorCommand::Camera(mode)
            }
            "view-all" | "viewall" => EditorCommand::ViewAll,
            "reshape" => {
                args.command = "reshape";
                EditorCommand::Reshape {
                    width: args.number("width")?,
                    height: args.number("height")?,
                }
            }
            "press" => {
                args.command = "press";
                let (x, y) = args.point()?;
                EditorCommand::Press { x, y }
            }
            "release" => {
                args.command = "release";
                let (x, y) = args.point()?;
                EditorCommand::Release { x, y }
            }
            "motion" => {
                args.command = "motion";
                let (x, y) = args.point()?;
                EditorCommand::Motion { x, y }
            }
            "draw" => EditorCommand::Draw,
            "bounds" => EditorCommand::Bounds,
            "help" | "?" => EditorCommand::Help,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        args.command = command.keyword();
        args.finish()?;
        Ok(command)
    }
}

/// Word cursor over one command line
struct Args<'a> {
    words: std::str::SplitWhitespace<'a>,
    command: &'static str,
}

impl<'a> Args<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            words: line.split_whitespace(),
            command: "",
        }
    }

    fn word(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn number<T: FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        let value = self.word(argument)?;
        value.parse().map_err(|_| CommandError::InvalidNumber {
            argument,
            value: value.to_string(),
        })
    }

    /// A finite float; `nan` and `inf` parse as `f32` but are rejected
    fn float(&mut self, argument: &'static str) -> Result<f32, CommandError> {
        let value = self.word(argument)?;
        match value.parse::<f32>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(CommandError::InvalidNumber {
                argument,
                value: value.to_string(),
            }),
        }
    }

    fn point(&mut self) -> Result<(f32, f32), CommandError> {
        Ok((self.float("x")?, self.float("y")?))
    }

    fn vec3(&mut self) -> Result<Vec3, CommandError> {
        Ok(Vec3::new(self.float("x")?, self.float("y")?, self.float("z")?))
    }

    fn finish(mut self) -> Result<(), CommandError> {
        let extra: Vec<_> = self.words.by_ref().collect();
        if extra.is_empty() {
            Ok(())
        } else {
            Err(CommandError::TrailingArguments {
                command: self.command,
                extra: extra.join(" "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("next".parse(), Ok(EditorCommand::Next));
        assert_eq!("  GROUP ".parse(), Ok(EditorCommand::Group));
        assert_eq!("view-all".parse(), Ok(EditorCommand::ViewAll));
        assert_eq!("exit".parse(), Ok(EditorCommand::Quit));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!("add Spindle".parse(), Ok(EditorCommand::Add(PrimitiveKind::Spindle)));
        assert_eq!(
            "translate 1 -2.5 3".parse(),
            Ok(EditorCommand::Translate(Vec3::new(1.0, -2.5, 3.0)))
        );
        assert_eq!("camera pan".parse(), Ok(EditorCommand::Camera(CameraMode::Pan)));
        assert_eq!(
            "reshape 800 600".parse(),
            Ok(EditorCommand::Reshape { width: 800, height: 600 })
        );
        assert_eq!("motion 4 5.5".parse(), Ok(EditorCommand::Motion { x: 4.0, y: 5.5 }));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<EditorCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "fly".parse::<EditorCommand>(),
            Err(CommandError::Unknown("fly".to_string()))
        );
        assert_eq!(
            "add cube".parse::<EditorCommand>(),
            Err(CommandError::UnknownPrimitive("cube".to_string()))
        );
        assert_eq!(
            "camera orbit".parse::<EditorCommand>(),
            Err(CommandError::UnknownCameraMode("orbit".to_string()))
        );
        assert_eq!(
            "scale 1 2".parse::<EditorCommand>(),
            Err(CommandError::MissingArgument { command: "scale", argument: "z" })
        );
        assert_eq!(
            "reshape 800 -1".parse::<EditorCommand>(),
            Err(CommandError::InvalidNumber { argument: "height", value: "-1".to_string() })
        );
        assert_eq!(
            "close now please".parse::<EditorCommand>(),
            Err(CommandError::TrailingArguments { command: "close", extra: "now please".to_string() })
        );
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        assert_eq!(
            "scale nan 1 1".parse::<EditorCommand>(),
            Err(CommandError::InvalidNumber { argument: "x", value: "nan".to_string() })
        );
        assert_eq!(
            "translate 0 inf 0".parse::<EditorCommand>(),
            Err(CommandError::InvalidNumber { argument: "y", value: "inf".to_string() })
        );
        assert_eq!(
            "motion 1 -infinity".parse::<EditorCommand>(),
            Err(CommandError::InvalidNumber { argument: "y", value: "-infinity".to_string() })
        );
    }

    #[test]
    fn test_parse_line_skips_comments() {
        assert_eq!(EditorCommand::parse_line("   "), Ok(None));
        assert_eq!(EditorCommand::parse_line("# build a group"), Ok(None));
        assert_eq!(EditorCommand::parse_line("print"), Ok(Some(EditorCommand::Print)));
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            EditorCommand::Add(PrimitiveKind::Teapot),
            EditorCommand::Rotate(Vec3::new(0.0, 45.0, -10.0)),
            EditorCommand::Camera(CameraMode::Twist),
            EditorCommand::Press { x: 1.0, y: 2.0 },
            EditorCommand::ViewAll,
        ];
        for command in commands {
            assert_eq!(command.to_string().parse(), Ok(command));
        }
    }
}
