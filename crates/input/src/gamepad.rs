use glam::Vec2;
use planets_author::PlacingController;
use planets_kernel::SimulationFacade;
use planets_render::{Camera, FollowMode};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::router::InputSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    Back,
    LeftStick,
    RightStick,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// One poll of the active gamepad.
///
/// Sticks are in `[-1, 1]` per axis with +y pointing down, the trigger in
/// `[0, 1]`. `released` lists buttons released since the previous poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadState {
    pub left_stick: Vec2,
    pub right_stick: Vec2,
    pub left_shoulder: bool,
    pub right_shoulder: bool,
    pub right_trigger: f32,
    pub released: Vec<GamepadButton>,
}

/// Maps polled gamepad state onto the camera, the placing controller and
/// logical actions.
#[derive(Debug, Clone, Default)]
pub struct GamepadMapper {
    /// The trigger currently drives the simulation speed.
    trigger_in_use: bool,
    last_trigger: f32,
}

impl GamepadMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_in_use(&self) -> bool {
        self.trigger_in_use
    }

    /// Apply stick and trigger motion for a frame lasting `seconds`.
    pub fn apply_axes(
        &mut self,
        state: &GamepadState,
        seconds: f32,
        settings: &InputSettings,
        camera: &mut Camera,
        placing: &mut PlacingController,
        sim: &mut dyn SimulationFacade,
    ) {
        if state.right_stick.length_squared() > settings.stick_deadzone {
            let right = state.right_stick * seconds;
            if state.right_shoulder {
                camera.zoom_by(right.y);
            } else {
                camera.rotate(right.x, right.y);
            }
        }

        if state.left_stick.length_squared() > settings.stick_deadzone {
            let left = state.left_stick * seconds;
            let handled = placing.handle_analog_stick(left, state.left_shoulder, camera, sim);
            if !handled.is_consumed() {
                // Following pins the focal point, so the stick can only zoom.
                if state.left_shoulder || camera.follow() != FollowMode::None {
                    camera.zoom_by(left.y);
                } else {
                    camera.pan(left);
                }
            }
        }

        let trigger = state.right_trigger.clamp(0.0, 1.0);
        let engaged =
            trigger > settings.trigger_deadzone && self.last_trigger <= settings.trigger_deadzone;
        if self.trigger_in_use || engaged {
            let speed = trigger * settings.trigger_speed_scale;
            sim.set_speed(speed * speed);
            self.trigger_in_use = true;
        }
        self.last_trigger = trigger;
    }

    /// Translate a released button into an action.
    ///
    /// B pauses or resumes while the trigger is released. While the trigger
    /// is held, B instead locks the simulation at the current trigger speed.
    pub fn button(
        &mut self,
        button: GamepadButton,
        settings: &InputSettings,
        camera: &Camera,
    ) -> Option<Action> {
        let action = match button {
            GamepadButton::Back => Action::Quit,
            GamepadButton::RightStick => Action::ResetCamera,
            GamepadButton::LeftStick => Action::Recenter,
            GamepadButton::A => Action::ClickCenter,
            GamepadButton::X => Action::DeleteSelected,
            GamepadButton::Y => Action::BeginCreation,
            GamepadButton::B => {
                let paused_toggle = self.last_trigger < settings.trigger_deadzone;
                self.trigger_in_use = false;
                if !paused_toggle {
                    return None;
                }
                Action::TogglePause
            }
            GamepadButton::DpadLeft => Action::FollowPrevious,
            GamepadButton::DpadRight => Action::FollowNext,
            GamepadButton::DpadDown => Action::ClearFollow,
            GamepadButton::DpadUp => {
                if camera.follow() == FollowMode::WeightedAverage {
                    Action::FollowPlainAverage
                } else {
                    Action::FollowWeightedAverage
                }
            }
        };
        Some(action)
    }
}
