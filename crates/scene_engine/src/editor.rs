//! Editor session
//!
//! Owns the scene graph, camera and renderer and applies [`EditorCommand`]s
//! to them. Output meant for the user (listings, bounds, frame summaries)
//! goes to the writer passed to [`Editor::execute`]; diagnostics go to the
//! log.

use std::io;

use crate::core::config::EditorConfig;
use crate::foundation::math::{Point3, Vec3};
use crate::input::commands::EditorCommand;
use crate::render::camera::{Camera, MouseButton};
use crate::render::commands::{DrawBatch, RecordingContext};
use crate::render::scene_renderer::SceneRenderer;
use crate::scene::SceneGraph;

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Keep going
    Continue,
    /// The user asked to quit
    Quit,
}

/// Interactive scene editing session
#[derive(Debug)]
pub struct Editor {
    graph: SceneGraph,
    camera: Camera,
    renderer: SceneRenderer,
    config: EditorConfig,
}

impl Editor {
    /// Create a session with an empty scene
    pub fn new(config: EditorConfig) -> Self {
        log::info!("Creating editor session");
        Self {
            graph: SceneGraph::with_config(config.scene.clone()),
            camera: Camera::new(config.camera.clone()),
            renderer: SceneRenderer::from_config(&config.scene),
            config,
        }
    }

    /// The scene being edited
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The scene being edited, for direct manipulation
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// The viewing camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Configuration the session was created with
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Record one frame as seen through the camera
    pub fn render_frame(&self) -> DrawBatch {
        let mut ctx = RecordingContext::with_base(self.camera.view_matrix());
        self.renderer.draw(&self.graph, &mut ctx);
        if !ctx.is_balanced() {
            log::warn!("Transform stack unbalanced after frame (depth {})", ctx.depth());
        }
        ctx.into_batch()
    }

    /// Apply one command, writing any user-facing output to `out`
    pub fn execute<W: io::Write>(&mut self, command: &EditorCommand, out: &mut W) -> io::Result<EditorOutcome> {
        log::debug!("Executing '{command}'");

        match command {
            EditorCommand::Add(kind) => {
                self.graph.add_primitive(*kind);
            }
            EditorCommand::Next => self.graph.select_next(),
            EditorCommand::Group => self.graph.add_selected_to_group(),
            EditorCommand::Close => self.graph.close_group(),
            EditorCommand::Reopen => self.graph.reopen_group(),
            EditorCommand::Print => self.graph.print_scene_graph(out)?,
            EditorCommand::Quit => return Ok(EditorOutcome::Quit),
            EditorCommand::Translate(translation) => {
                if self.require_current(out)? {
                    self.graph.interface_mut().set_translation(*translation);
                    self.graph.apply_pending_transform();
                }
            }
            EditorCommand::Rotate(degrees) => {
                if self.require_current(out)? {
                    self.graph.interface_mut().add_rotation_delta(*degrees);
                    self.graph.apply_pending_transform();
                }
            }
            EditorCommand::Scale(scale) => {
                if self.require_current(out)? {
                    self.graph.interface_mut().set_scale(*scale);
                    self.graph.apply_pending_transform();
                }
            }
            EditorCommand::Camera(mode) => self.camera.set_mode(*mode),
            EditorCommand::ViewAll => {
                let bounds = self.graph.scene_bounds();
                self.camera.view_all(&bounds);
            }
            EditorCommand::Reshape { width, height } => self.camera.reshape(*width, *height),
            EditorCommand::Press { x, y } => self.camera.mouse(MouseButton::Left, true, *x, *y),
            EditorCommand::Release { x, y } => self.camera.mouse(MouseButton::Left, false, *x, *y),
            EditorCommand::Motion { x, y } => {
                self.camera.motion(*x, *y);
            }
            EditorCommand::Draw => self.write_frame_summary(out)?,
            EditorCommand::Bounds => {
                let bounds = self.graph.scene_bounds();
                writeln!(out, "Scene bounds: min {} max {}", fmt_vec(bounds.min), fmt_vec(bounds.max))?;
            }
            EditorCommand::Help => out.write_all(EditorCommand::HELP.as_bytes())?,
        }

        Ok(EditorOutcome::Continue)
    }

    fn require_current<W: io::Write>(&self, out: &mut W) -> io::Result<bool> {
        if self.graph.has_current() {
            Ok(true)
        } else {
            writeln!(out, "No node selected")?;
            Ok(false)
        }
    }

    fn write_frame_summary<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let batch = self.render_frame();
        if batch.is_empty() {
            return writeln!(out, "Frame: nothing drawn");
        }
        let primitives: Vec<_> = batch.primitives().collect();
        writeln!(out, "Frame: {} primitive(s), {} line(s)", primitives.len(), batch.line_count())?;
        for (kind, transform, color) in primitives {
            let origin = transform.transform_point(&Point3::origin()).coords;
            writeln!(
                out,
                "\t{kind} at {} color ({:.2}, {:.2}, {:.2})",
                fmt_vec(origin),
                color.r,
                color.g,
                color.b
            )?;
        }
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SceneConfig;
    use crate::foundation::color::Color;
    use crate::render::camera::CameraMode;
    use approx::assert_relative_eq;

    fn run(editor: &mut Editor, script: &str) -> String {
        let mut out = Vec::new();
        for line in script.lines() {
            if let Some(command) = EditorCommand::parse_line(line).unwrap() {
                editor.execute(&command, &mut out).unwrap();
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_grouping_session_prints_listing() {
        let mut editor = Editor::default();
        let output = run(
            &mut editor,
            "add cone\nadd sphere\nnext\ngroup\nclose\nprint\n",
        );
        assert_eq!(output, "Current Scene Graph\nRoot\n\tSphere\n\tGroup\n\t\tCone\n");
    }

    #[test]
    fn test_transform_commands_edit_current() {
        let mut editor = Editor::default();
        run(&mut editor, "add torus\ntranslate 1 2 3\nscale 10 1 0.1\nrotate 0 0 90\nrotate 0 0 90");

        let id = editor.graph().current().unwrap();
        let node = editor.graph().node(id).unwrap();
        assert_eq!(node.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.scale, Vec3::new(4.0, 1.0, 0.5));
        let x = node.rotation.transform_vector(&Vec3::x());
        assert_relative_eq!(x, -Vec3::x(), epsilon = 1e-5);
    }

    #[test]
    fn test_transform_without_selection_reports() {
        let mut editor = Editor::default();
        let output = run(&mut editor, "translate 1 1 1");
        assert_eq!(output, "No node selected\n");
    }

    #[test]
    fn test_quit_outcome() {
        let mut editor = Editor::default();
        let mut out = Vec::new();
        assert_eq!(editor.execute(&EditorCommand::Next, &mut out).unwrap(), EditorOutcome::Continue);
        assert_eq!(editor.execute(&EditorCommand::Quit, &mut out).unwrap(), EditorOutcome::Quit);
    }

    #[test]
    fn test_draw_summary_uses_camera() {
        let mut editor = Editor::default();
        let output = run(&mut editor, "add cone\nview-all\ndraw");
        assert!(output.starts_with("Frame: 1 primitive(s), 6 line(s)\n"));
        assert!(output.contains("Cone at (0.000, 0.000, -3.000)"));

        let batch = editor.render_frame();
        let (_, _, color) = batch.primitives().next().unwrap();
        assert_eq!(color, Color::SELECTION);
    }

    #[test]
    fn test_camera_commands() {
        let mut editor = Editor::default();
        run(&mut editor, "reshape 200 100\ncamera zoom\npress 0 0\nmotion 0 50\nrelease 0 50");
        assert_eq!(editor.camera().mode(), CameraMode::Zoom);
        assert!(!editor.camera().is_dragging());
        assert_relative_eq!(editor.camera().translation().z, -2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_draw_reports_empty_frame() {
        let config = EditorConfig {
            scene: SceneConfig::default().with_axes(false),
            ..Default::default()
        };
        let mut editor = Editor::new(config);
        assert_eq!(run(&mut editor, "draw"), "Frame: nothing drawn\n");

        let output = run(&mut editor, "add sphere\ndraw");
        assert!(output.starts_with("Frame: 1 primitive(s), 0 line(s)\n"));
    }

    #[test]
    fn test_bounds_and_help() {
        let mut editor = Editor::default();
        let output = run(&mut editor, "bounds\nhelp");
        assert!(output.starts_with("Scene bounds: min (-1.000, -1.000, -1.000) max (1.000, 1.000, 1.000)\n"));
        assert!(output.contains("reopen"));
        assert!(editor.graph().children(editor.graph().root()).is_empty());
    }
}
