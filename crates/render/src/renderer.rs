use std::fmt::Write;

use glam::{Mat4, Vec2, Vec3};
use planets_common::{BodyId, PlacingStep};
use planets_kernel::SimulationFacade;

/// Preview geometry for the body being placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementPreview {
    pub position: Vec3,
    pub radius: f32,
    /// Unit circle transform for the path of the new body.
    pub orbital_circle: Option<Mat4>,
    /// Unit circle transform for the orbited body's barycentric wobble.
    pub orbited_circle: Option<Mat4>,
    /// Unit +Z arrow transform along the draft velocity.
    pub arrow: Option<Mat4>,
    pub arrow_length: f32,
}

/// Everything a renderer may read for one frame.
///
/// Built fresh by the frame loop after the camera is set up. The simulation
/// is borrowed immutably: renderers never change world state.
pub struct SceneView<'a> {
    pub sim: &'a dyn SimulationFacade,
    /// Projection × view.
    pub camera: Mat4,
    pub view: Mat4,
    pub light_dir: Vec3,
    pub focal_point: Vec3,
    pub eye: Vec3,
    pub step: PlacingStep,
    pub preview: Option<PlacementPreview>,
    pub selected: Option<BodyId>,
    /// Screen-space crosshair drawn while a gamepad drives the pointer.
    pub cursor: Option<Vec2>,
}

/// Renderer-agnostic interface. A GPU backend implements this the same way
/// the text renderer does.
pub trait Renderer {
    type Output;

    fn render(&mut self, scene: &SceneView<'_>) -> Self::Output;
}

/// Renders the scene as human-readable text. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &SceneView<'_>) -> String {
        self.frames += 1;
        let mut out = String::new();
        let f = scene.focal_point;
        let e = scene.eye;
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "=== frame {} | bodies {} | step {} ===",
            self.frames,
            scene.sim.body_count(),
            scene.step
        );
        let _ = writeln!(
            out,
            "camera: focal=({:.1}, {:.1}, {:.1}) eye=({:.1}, {:.1}, {:.1})",
            f.x, f.y, f.z, e.x, e.y, e.z
        );

        for id in scene.sim.body_ids() {
            let (Some(p), Some(v), Some(m)) =
                (scene.sim.position(id), scene.sim.velocity(id), scene.sim.mass(id))
            else {
                continue;
            };
            let marker = if scene.selected == Some(id) { '*' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {id} pos=({:.2}, {:.2}, {:.2}) vel=({:.3e}, {:.3e}, {:.3e}) mass={m:.1}",
                p.x, p.y, p.z, v.x, v.y, v.z
            );
        }

        if let Some(preview) = &scene.preview {
            let p = preview.position;
            let _ = writeln!(
                out,
                "draft: pos=({:.2}, {:.2}, {:.2}) radius={:.2} arrow={:.3e}{}",
                p.x,
                p.y,
                p.z,
                preview.radius,
                preview.arrow_length,
                if preview.orbital_circle.is_some() { " orbit" } else { "" }
            );
        }

        out
    }
}
