//! Side and axis conventions.
//!
//! Every module and guide carries a [`Side`]. The one-letter tokens ("L",
//! "M", "R") are the naming-convention prefixes used throughout the rig:
//! a module labelled `Arm` on the left side produces nodes named `L_Arm_*`.

use serde::{Deserialize, Serialize};

/// Which side of the character a module or guide belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left side ("L").
    #[serde(rename = "L")]
    Left,
    /// Center line ("M"). Middle entities are never mirrored.
    #[serde(rename = "M")]
    Middle,
    /// Right side ("R").
    #[serde(rename = "R")]
    Right,
}

impl Side {
    /// Returns the one-letter naming token for this side.
    pub fn token(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Middle => "M",
            Side::Right => "R",
        }
    }

    /// Returns the opposite side, or `None` for [`Side::Middle`].
    pub fn mirrored(&self) -> Option<Side> {
        match self {
            Side::Left => Some(Side::Right),
            Side::Right => Some(Side::Left),
            Side::Middle => None,
        }
    }
}

impl Default for Side {
    fn default() -> Self {
        Side::Middle
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" | "left" => Ok(Side::Left),
            "M" | "middle" => Ok(Side::Middle),
            "R" | "right" => Ok(Side::Right),
            _ => Err(format!("unknown side: {}", s)),
        }
    }
}

/// A signed world axis, used for module orientation fields.
///
/// Axis fields are mirrored with [`Axis::mirrored`] rather than by name
/// substitution: reflection across the YZ plane flips the X axes and leaves
/// the others untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "+x")]
    PosX,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "+y")]
    PosY,
    #[serde(rename = "-y")]
    NegY,
    #[serde(rename = "+z")]
    PosZ,
    #[serde(rename = "-z")]
    NegZ,
}

impl Axis {
    /// Returns the axis as a string (e.g. "+x").
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::PosX => "+x",
            Axis::NegX => "-x",
            Axis::PosY => "+y",
            Axis::NegY => "-y",
            Axis::PosZ => "+z",
            Axis::NegZ => "-z",
        }
    }

    /// Returns the unit direction vector for this axis.
    pub fn vector(&self) -> [f64; 3] {
        match self {
            Axis::PosX => [1.0, 0.0, 0.0],
            Axis::NegX => [-1.0, 0.0, 0.0],
            Axis::PosY => [0.0, 1.0, 0.0],
            Axis::NegY => [0.0, -1.0, 0.0],
            Axis::PosZ => [0.0, 0.0, 1.0],
            Axis::NegZ => [0.0, 0.0, -1.0],
        }
    }

    /// Returns the axis reflected across the YZ mirror plane.
    pub fn mirrored(&self) -> Axis {
        match self {
            Axis::PosX => Axis::NegX,
            Axis::NegX => Axis::PosX,
            other => *other,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+x" | "x" => Ok(Axis::PosX),
            "-x" => Ok(Axis::NegX),
            "+y" | "y" => Ok(Axis::PosY),
            "-y" => Ok(Axis::NegY),
            "+z" | "z" => Ok(Axis::PosZ),
            "-z" => Ok(Axis::NegZ),
            _ => Err(format!("unknown axis: {}", s)),
        }
    }
}
