use serde::{Deserialize, Serialize};

/// A logical command any input device can produce.
///
/// Keyboard keys and gamepad buttons are both mapped to actions, and the
/// session executes every action through one function, so a gesture does the
/// same thing regardless of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    BeginInteractiveCreation,
    BeginOrbitalCreation,
    /// Orbital creation when something is selected, interactive otherwise.
    BeginCreation,
    ToggleFiring,
    CancelPlacing,
    FollowPrevious,
    FollowNext,
    FollowSelection,
    ClearFollow,
    FollowPlainAverage,
    FollowWeightedAverage,
    /// Switch between the two average follow modes.
    ToggleAverageFollow,
    ResetCamera,
    /// Focal point back to the origin, angles and zoom untouched.
    Recenter,
    /// Click at the centre of the screen.
    ClickCenter,
    DeleteSelected,
    TogglePause,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_snake_case() {
        let yaml = serde_yaml::to_string(&Action::ToggleAverageFollow).unwrap();
        assert_eq!(yaml.trim(), "toggle_average_follow");
        let back: Action = serde_yaml::from_str("begin_orbital_creation").unwrap();
        assert_eq!(back, Action::BeginOrbitalCreation);
    }
}
