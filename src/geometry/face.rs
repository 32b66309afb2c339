use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::math::Vector3;

/// One of the six axis-aligned face directions of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceDirection {
    PosZ,
    PosX,
    NegZ,
    NegX,
    PosY,
    NegY,
}

impl FaceDirection {
    /// All six directions, in emission order.
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::PosZ,
        FaceDirection::PosX,
        FaceDirection::NegZ,
        FaceDirection::NegX,
        FaceDirection::PosY,
        FaceDirection::NegY,
    ];

    /// The fixed outward unit normal of this direction.
    #[must_use]
    pub fn normal(self) -> Vector3 {
        match self {
            FaceDirection::PosX => Vector3::new(1.0, 0.0, 0.0),
            FaceDirection::NegX => Vector3::new(-1.0, 0.0, 0.0),
            FaceDirection::PosY => Vector3::new(0.0, 1.0, 0.0),
            FaceDirection::NegY => Vector3::new(0.0, -1.0, 0.0),
            FaceDirection::PosZ => Vector3::new(0.0, 0.0, 1.0),
            FaceDirection::NegZ => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            FaceDirection::PosZ => 1 << 0,
            FaceDirection::PosX => 1 << 1,
            FaceDirection::NegZ => 1 << 2,
            FaceDirection::NegX => 1 << 3,
            FaceDirection::PosY => 1 << 4,
            FaceDirection::NegY => 1 << 5,
        }
    }
}

impl fmt::Display for FaceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FaceDirection::PosX => "+X",
            FaceDirection::NegX => "-X",
            FaceDirection::PosY => "+Y",
            FaceDirection::NegY => "-Y",
            FaceDirection::PosZ => "+Z",
            FaceDirection::NegZ => "-Z",
        };
        f.write_str(label)
    }
}

/// The subset of a box's six faces that should actually be emitted.
///
/// Two boxes that share a coplanar boundary must never both carry that face.
/// Builders pick a `FaceSet` per box according to its role in the panel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FaceSet(u8);

impl FaceSet {
    pub const POS_X: Self = Self(FaceDirection::PosX.bit());
    pub const NEG_X: Self = Self(FaceDirection::NegX.bit());
    pub const POS_Y: Self = Self(FaceDirection::PosY.bit());
    pub const NEG_Y: Self = Self(FaceDirection::NegY.bit());
    pub const POS_Z: Self = Self(FaceDirection::PosZ.bit());
    pub const NEG_Z: Self = Self(FaceDirection::NegZ.bit());

    /// The two broad faces (±Y) of a panel piece.
    pub const LATERAL: Self = Self(Self::POS_Y.0 | Self::NEG_Y.0);

    /// The two depth-wise end caps (±X).
    pub const ENDS: Self = Self(Self::POS_X.0 | Self::NEG_X.0);

    const ALL_BITS: u8 = 0b11_1111;

    /// No faces.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// All six faces: a closed standalone box.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::ALL_BITS)
    }

    /// Set union.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns this set with `other` added when `condition` holds.
    #[must_use]
    pub const fn with_if(self, condition: bool, other: Self) -> Self {
        if condition {
            self.union(other)
        } else {
            self
        }
    }

    /// Returns `true` if `direction` is a member.
    #[must_use]
    pub const fn contains(self, direction: FaceDirection) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Number of member directions.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if no direction is a member.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over member directions in emission order.
    pub fn iter(self) -> impl Iterator<Item = FaceDirection> {
        FaceDirection::ALL
            .into_iter()
            .filter(move |&d| self.contains(d))
    }
}

impl From<FaceDirection> for FaceSet {
    fn from(direction: FaceDirection) -> Self {
        Self(direction.bit())
    }
}

impl BitOr for FaceSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for FaceSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|d| d.to_string())).finish()
    }
}

/// Caps for element `index` (0-based) of a series of `count` abutting boxes.
///
/// Only the first element is exposed on the `low` side and only the last on
/// the `high` side; interior elements share both boundaries with neighbours
/// and get no cap at all.
#[must_use]
pub fn series_caps(index: u32, count: u32, low: FaceSet, high: FaceSet) -> FaceSet {
    FaceSet::empty()
        .with_if(index == 0, low)
        .with_if(index + 1 == count, high)
}
