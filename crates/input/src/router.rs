use glam::Vec2;
use planets_author::{Handled, PlacingController};
use planets_common::PlacingStep;
use planets_kernel::SimulationFacade;
use planets_render::Camera;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::event::{InputEvent, KeyBindings, MouseButton};

/// Rates and thresholds for pointer and gamepad input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Distance change per pixel of middle drag.
    pub drag_zoom_rate: f32,
    /// Radians per pixel of horizontal right drag.
    pub drag_yaw_rate: f32,
    /// Radians per pixel of vertical right drag.
    pub drag_pitch_rate: f32,
    /// Relative distance change per wheel unit.
    pub wheel_zoom_rate: f32,
    /// Wheel units are multiplied by this before the placing controller
    /// sees them.
    pub placing_wheel_rate: f32,
    /// Pick spheres are grown by this factor.
    pub pick_scale: f32,
    /// Squared stick length below which stick input is ignored.
    pub stick_deadzone: f32,
    /// Trigger travel in `[0, 1]` below which the trigger counts as released.
    pub trigger_deadzone: f32,
    /// Simulation speed is `(trigger * scale)²`.
    pub trigger_speed_scale: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            drag_zoom_rate: 1.0,
            drag_yaw_rate: 0.05,
            drag_pitch_rate: 0.02,
            wheel_zoom_rate: 0.01,
            placing_wheel_rate: -0.01,
            pick_scale: 1.0,
            stick_deadzone: 0.1,
            trigger_deadzone: 16.0 / i16::MAX as f32,
            trigger_speed_scale: 8.0,
        }
    }
}

/// Single dispatch point for raw window events.
///
/// Every pointer event is offered to the placing controller first. The camera
/// only reacts to what the controller leaves alone. Keys are translated to
/// [`Action`]s and handed back to the caller.
#[derive(Debug, Clone)]
pub struct InputRouter {
    settings: InputSettings,
    bindings: KeyBindings,
    held: Option<MouseButton>,
    last_pointer: Option<Vec2>,
    pointer_captured: bool,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(InputSettings::default(), KeyBindings::default())
    }
}

impl InputRouter {
    pub fn new(settings: InputSettings, bindings: KeyBindings) -> Self {
        Self {
            settings,
            bindings,
            held: None,
            last_pointer: None,
            pointer_captured: false,
        }
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Whether the last pointer move started a relative drag the host should
    /// capture the cursor for.
    pub fn pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    /// Route one event. Returns the action a key maps to, if any.
    pub fn handle(
        &mut self,
        event: InputEvent,
        camera: &mut Camera,
        placing: &mut PlacingController,
        sim: &mut dyn SimulationFacade,
    ) -> Option<Action> {
        match event {
            InputEvent::PointerMove { position } => {
                self.pointer_move(position, camera, placing, sim);
            }
            InputEvent::ButtonDown { button } => self.held = Some(button),
            InputEvent::ButtonUp { .. } => self.held = None,
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } => {
                self.click(position, camera, placing, sim);
            }
            InputEvent::Click { .. } => {}
            InputEvent::DoubleClick { button, .. } => {
                self.double_click(button, camera, placing, sim);
            }
            InputEvent::Wheel { delta } => {
                let handled =
                    placing.handle_mouse_wheel(delta * self.settings.placing_wheel_rate, sim);
                if !handled.is_consumed() {
                    camera.zoom_by(delta * self.settings.wheel_zoom_rate);
                }
            }
            InputEvent::Key { key } => {
                let action = self.bindings.action(key);
                if action.is_none() {
                    tracing::trace!(?key, "unbound key");
                }
                return action;
            }
            InputEvent::Resize { width, height } => camera.resize_viewport(width, height),
        }
        None
    }

    fn pointer_move(
        &mut self,
        position: Vec2,
        camera: &mut Camera,
        placing: &mut PlacingController,
        sim: &dyn SimulationFacade,
    ) {
        let delta = self.last_pointer.map_or(Vec2::ZERO, |last| position - last);
        self.last_pointer = Some(position);

        let handled = placing.handle_mouse_move(position, delta, camera, sim);
        self.pointer_captured = handled.is_aux();
        if handled.is_consumed() {
            return;
        }

        match self.held {
            Some(MouseButton::Middle) => camera.zoom(-delta.y * self.settings.drag_zoom_rate),
            Some(MouseButton::Right) => camera.rotate(
                delta.x * self.settings.drag_yaw_rate,
                delta.y * self.settings.drag_pitch_rate,
            ),
            _ => {}
        }
    }

    /// A primary click: placing first, otherwise pick the body under the
    /// pointer. Clicking empty space clears the selection.
    pub fn click(
        &self,
        position: Vec2,
        camera: &Camera,
        placing: &mut PlacingController,
        sim: &mut dyn SimulationFacade,
    ) -> Handled {
        let handled = placing.handle_mouse_click(position, camera, sim);
        if !handled.is_consumed() {
            let hit = camera.select_under(position, self.settings.pick_scale, sim);
            tracing::debug!(hit = ?hit, "select under pointer");
            sim.set_selected(hit);
        }
        handled
    }

    fn double_click(
        &self,
        button: MouseButton,
        camera: &mut Camera,
        placing: &PlacingController,
        sim: &dyn SimulationFacade,
    ) {
        match button {
            MouseButton::Left if placing.step() == PlacingStep::NotPlacing => {
                if sim.is_selected_valid() {
                    camera.follow_selection(sim);
                } else {
                    camera.recenter();
                }
            }
            MouseButton::Left => {}
            MouseButton::Middle | MouseButton::Right => camera.reset(),
        }
    }
}
