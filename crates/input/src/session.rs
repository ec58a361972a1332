use std::time::Duration;

use planets_author::{PlacingController, PlacingSettings};
use planets_common::PlacingStep;
use planets_kernel::{SimulationFacade, Universe};
use planets_render::{Camera, CameraSettings, FollowMode, Renderer, SceneView};
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::event::{InputEvent, KeyBindings};
use crate::gamepad::{GamepadMapper, GamepadState};
use crate::router::{InputRouter, InputSettings};

/// Everything configurable about a session, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Longest wall time one frame may advance the simulation by.
    pub max_frame_delta_ms: f32,
    pub camera: CameraSettings,
    pub placing: PlacingSettings,
    pub input: InputSettings,
    pub keys: KeyBindings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_frame_delta_ms: 10.0,
            camera: CameraSettings::default(),
            placing: PlacingSettings::default(),
            input: InputSettings::default(),
            keys: KeyBindings::default(),
        }
    }
}

/// The explicit context one front-end instance runs in.
///
/// Owns the simulation, the camera, the placing controller and the input
/// state. The host forwards window events to [`handle_event`](Self::handle_event)
/// and calls [`tick`](Self::tick) once per display refresh.
#[derive(Debug)]
pub struct Session<S = Universe> {
    sim: S,
    camera: Camera,
    placing: PlacingController,
    router: InputRouter,
    gamepad: GamepadMapper,
    pad: Option<GamepadState>,
    max_frame_delta_ms: f32,
    quit_requested: bool,
    frames: u64,
}

impl<S: SimulationFacade> Session<S> {
    pub fn new(sim: S, settings: SessionSettings) -> Self {
        Self {
            sim,
            camera: Camera::new(settings.camera),
            placing: PlacingController::new(settings.placing),
            router: InputRouter::new(settings.input, settings.keys),
            gamepad: GamepadMapper::new(),
            pad: None,
            max_frame_delta_ms: settings.max_frame_delta_ms.max(0.0),
            quit_requested: false,
            frames: 0,
        }
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn placing(&self) -> &PlacingController {
        &self.placing
    }

    pub fn placing_mut(&mut self) -> &mut PlacingController {
        &mut self.placing
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Set the gamepad snapshot for the next tick. `None` when detached.
    pub fn set_gamepad(&mut self, state: Option<GamepadState>) {
        self.pad = state;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(action) =
            self.router
                .handle(event, &mut self.camera, &mut self.placing, &mut self.sim)
        {
            self.apply(action);
        }
    }

    /// Execute a logical action, whatever device produced it.
    pub fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "apply");
        let sim = &mut self.sim;
        let camera = &mut self.camera;
        let placing = &mut self.placing;
        match action {
            Action::BeginInteractiveCreation => placing.begin_interactive_creation(camera),
            Action::BeginOrbitalCreation => {
                placing.begin_orbital_creation(&*sim);
            }
            Action::BeginCreation => {
                if !placing.begin_orbital_creation(&*sim) {
                    placing.begin_interactive_creation(camera);
                }
            }
            Action::ToggleFiring => placing.enable_firing_mode(!placing.firing_enabled(), sim),
            Action::CancelPlacing => placing.cancel(),
            Action::FollowPrevious => camera.follow_previous(&*sim),
            Action::FollowNext => camera.follow_next(&*sim),
            Action::FollowSelection => camera.follow_selection(&*sim),
            Action::ClearFollow => camera.clear_follow(),
            Action::FollowPlainAverage => camera.follow_plain_average(),
            Action::FollowWeightedAverage => camera.follow_weighted_average(),
            Action::ToggleAverageFollow => {
                if camera.follow() == FollowMode::WeightedAverage {
                    camera.follow_plain_average();
                } else {
                    camera.follow_weighted_average();
                }
            }
            Action::ResetCamera => camera.reset(),
            Action::Recenter => camera.recenter(),
            Action::ClickCenter => {
                let center = camera.center_screen();
                self.router.click(center, camera, placing, sim);
            }
            Action::DeleteSelected => {
                if let Some(id) = sim.valid_selection() {
                    sim.remove_body(id);
                    tracing::info!(%id, "deleted selected body");
                }
            }
            Action::TogglePause => {
                let speed = if sim.speed() <= 0.0 { 1.0 } else { 0.0 };
                sim.set_speed(speed);
            }
            Action::Quit => {
                tracing::info!("quit requested");
                self.quit_requested = true;
            }
        }
    }

    /// Clamp a wall-clock frame time and convert it to simulation
    /// microseconds.
    pub fn frame_time(&self, elapsed: Duration) -> f32 {
        let ms = (elapsed.as_secs_f32() * 1000.0).min(self.max_frame_delta_ms);
        ms * 1000.0
    }

    fn poll_gamepad(&mut self, seconds: f32) {
        let Some(pad) = self.pad.as_mut() else {
            return;
        };
        let settings = *self.router.settings();
        self.gamepad.apply_axes(
            pad,
            seconds,
            &settings,
            &mut self.camera,
            &mut self.placing,
            &mut self.sim,
        );

        let released = std::mem::take(&mut pad.released);
        let actions: Vec<Action> = released
            .into_iter()
            .filter_map(|button| self.gamepad.button(button, &settings, &self.camera))
            .collect();
        for action in actions {
            self.apply(action);
        }
    }

    /// Run one frame: gamepad, simulation advance, camera, render.
    /// Advance is skipped while a draft exists.
    pub fn tick<R: Renderer>(&mut self, elapsed: Duration, renderer: &mut R) -> R::Output {
        let time = self.frame_time(elapsed);
        self.poll_gamepad(time * 1.0e-6);

        let step = self.placing.step();
        if step.allows_advance() {
            self.sim.advance(time);
        }

        let camera = self.camera.setup(&self.sim);
        let cursor = (self.pad.is_some()
            && step == PlacingStep::NotPlacing
            && self.camera.follow() == FollowMode::None)
            .then(|| self.camera.center_screen());
        let scene = SceneView {
            sim: &self.sim,
            camera,
            view: self.camera.view_matrix(),
            light_dir: self.camera.light_dir(),
            focal_point: self.camera.focal_point(),
            eye: self.camera.eye_position(),
            step,
            preview: self.placing.preview(&self.sim),
            selected: self.sim.valid_selection(),
            cursor,
        };
        self.frames += 1;
        renderer.render(&scene)
    }
}
