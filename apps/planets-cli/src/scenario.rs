//! YAML scenarios: starting bodies, session settings and a scripted input
//! sequence, replayed headlessly against the text renderer.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use planets_common::{BodySpec, PlacingStep};
use planets_input::{Action, GamepadState, InputEvent, Session, SessionSettings};
use planets_kernel::{SimulationFacade, Universe, UniverseError};
use planets_render::{CameraSettings, DebugTextRenderer};
use planets_tools::{BodyInfo, UniverseInspector, UniverseSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("body {index} is invalid: {source}")]
    InvalidBody {
        index: usize,
        #[source]
        source: UniverseError,
    },
}

/// A starting body. Velocity is in UI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyEntry {
    pub position: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
    pub mass: f32,
    /// Make this body the selection.
    #[serde(default)]
    pub select: bool,
}

/// Randomly generated bodies added after the listed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomBodies {
    pub count: usize,
    pub range: f32,
    /// UI units.
    pub max_speed: f32,
    pub max_mass: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    Action(Action),
    Input(InputEvent),
    /// Gamepad snapshot used from now on.
    Gamepad(GamepadState),
    /// Run this many frames.
    Tick(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub seed: u64,
    pub settings: SessionSettings,
    pub bodies: Vec<BodyEntry>,
    pub random: Option<RandomBodies>,
    pub script: Vec<ScriptStep>,
    /// Frames run after the script.
    pub frames: u32,
    pub frame_ms: f32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            seed: 42,
            settings: SessionSettings::default(),
            bodies: Vec::new(),
            random: None,
            script: Vec::new(),
            frames: 0,
            frame_ms: 16.0,
        }
    }
}

/// What a scenario run left behind.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub frames: u64,
    pub step: PlacingStep,
    pub quit_requested: bool,
    pub summary: UniverseSummary,
    pub bodies: Vec<BodyInfo>,
    #[serde(skip)]
    pub last_frame: String,
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded scenario");
        Self::from_yaml(&text)
    }

    /// A star with a planet placed into circular orbit through the same
    /// clicks a user would make.
    pub fn demo(frames: u32, seed: u64) -> Self {
        Self {
            seed,
            settings: SessionSettings {
                camera: CameraSettings {
                    default_distance: 3000.0,
                    ..CameraSettings::default()
                },
                ..SessionSettings::default()
            },
            bodies: vec![BodyEntry {
                position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                mass: 1.0e6,
                select: true,
            }],
            script: vec![
                ScriptStep::Action(Action::BeginOrbitalCreation),
                // Plane, then radius, then velocity.
                ScriptStep::Action(Action::ClickCenter),
                ScriptStep::Action(Action::ClickCenter),
                ScriptStep::Action(Action::ClickCenter),
            ],
            frames,
            ..Self::default()
        }
    }

    /// Build the starting session.
    pub fn session(&self) -> Result<Session, ScenarioError> {
        let mut universe = Universe::with_seed(self.seed);
        let vf = universe.velocity_factor();
        for (index, body) in self.bodies.iter().enumerate() {
            let spec = BodySpec::new(body.position, body.velocity * vf, body.mass);
            let id = universe
                .add_body(spec)
                .map_err(|source| ScenarioError::InvalidBody { index, source })?;
            if body.select {
                universe.set_selected(Some(id));
            }
        }
        if let Some(random) = &self.random {
            universe.generate_random(
                random.count,
                random.range,
                random.max_speed * vf,
                random.max_mass,
            );
        }
        Ok(Session::new(universe, self.settings.clone()))
    }

    /// Replay the script, then run the trailing frames.
    pub fn run(&self) -> Result<ScenarioReport, ScenarioError> {
        let mut session = self.session()?;
        let mut renderer = DebugTextRenderer::new();
        let frame = Duration::from_secs_f32(self.frame_ms.max(0.0) / 1000.0);
        let mut last_frame = String::new();

        for step in &self.script {
            match step {
                ScriptStep::Action(action) => session.apply(*action),
                ScriptStep::Input(event) => session.handle_event(*event),
                ScriptStep::Gamepad(state) => session.set_gamepad(Some(state.clone())),
                ScriptStep::Tick(n) => {
                    for _ in 0..*n {
                        last_frame = session.tick(frame, &mut renderer);
                    }
                }
            }
            if session.quit_requested() {
                break;
            }
        }
        for _ in 0..self.frames {
            if session.quit_requested() {
                break;
            }
            last_frame = session.tick(frame, &mut renderer);
        }

        let universe = session.sim();
        tracing::info!(
            frames = session.frames(),
            bodies = universe.body_count(),
            "scenario finished"
        );
        Ok(ScenarioReport {
            frames: session.frames(),
            step: session.placing().step(),
            quit_requested: session.quit_requested(),
            summary: UniverseInspector::summary(universe),
            bodies: UniverseInspector::list_bodies(universe),
            last_frame,
        })
    }
}
