//! Labelled samples replayed through the feed

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fmt::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Key of the classified task label in a recorded row.
const TASK_LABEL_KEY: &str = "task_label";

/// Key of the channel whose magnitude gives the sample power.
const POWER_CHANNEL_KEY: &str = "EEG_Ch2";

/// Key of the optional epoch identifier.
const EPOCH_ID_KEY: &str = "epoch_id";

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The classified motor-imagery intent of a sample.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Imagined feet movement, drives forwards.
    Feet,

    /// Imagined tongue movement, drives backwards.
    Tongue,

    /// Imagined left hand movement, turns left (positive heading rate).
    LeftHand,

    /// Imagined right hand movement, turns right (negative heading rate).
    RightHand,

    /// Any label value which isn't one of the above. Produces no motion.
    Other
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single prerecorded, already classified sample.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// The classified label
    pub label: Label,

    /// Magnitude of the power channel, always non-negative.
    pub power: f64,

    /// Identifier of the epoch (decision window) this sample belongs to, if any.
    pub epoch_id: Option<i64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Label {
    /// Parse a recorded task label. Unknown values become `Label::Other`.
    pub fn from_task_label(task_label: &str) -> Self {
        match task_label {
            "feet" => Label::Feet,
            "tongue" => Label::Tongue,
            "left_hand" => Label::LeftHand,
            "right_hand" => Label::RightHand,
            _ => Label::Other
        }
    }

    /// Returns true if this label maps to a motion command.
    pub fn is_recognised(&self) -> bool {
        !matches!(self, Label::Other)
    }
}

impl Display for Label {
    /// Displays the intent behind the label, e.g. "Move Forward".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Feet => write!(f, "Move Forward"),
            Label::Tongue => write!(f, "Move Backward"),
            Label::LeftHand => write!(f, "Turn Left"),
            Label::RightHand => write!(f, "Turn Right"),
            Label::Other => write!(f, "Unknown")
        }
    }
}

impl Sample {
    /// Create a new sample, the power is stored as a magnitude.
    pub fn new(label: Label, power: f64, epoch_id: Option<i64>) -> Self {
        Self {
            label,
            power: power.abs(),
            epoch_id
        }
    }

    /// Build a sample from one recorded row.
    ///
    /// Rows aren't validated. A missing or non-string label gives `Label::Other`, a missing or
    /// non-numeric channel value gives zero power, and an epoch id which isn't an integer is
    /// treated as absent.
    pub fn from_row(row: &Value) -> Self {
        let label = row
            .get(TASK_LABEL_KEY)
            .and_then(Value::as_str)
            .map(Label::from_task_label)
            .unwrap_or(Label::Other);

        let power = row
            .get(POWER_CHANNEL_KEY)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let epoch_id = row
            .get(EPOCH_ID_KEY)
            .and_then(|v| match v.as_i64() {
                Some(i) => Some(i),
                None => v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
            });

        Self::new(label, power, epoch_id)
    }
}
