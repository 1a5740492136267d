use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use crate::InvalidPieceKindError;

/// Width and height of a piece's bounding box.
pub const PATTERN_SIZE: usize = 3;
/// Upper bound on the number of occupied cells in a pattern.
pub const PATTERN_CELLS: usize = PATTERN_SIZE * PATTERN_SIZE;

/// Piece shape within its 3×3 bounding box, indexed as `[row][column]`.
pub type PiecePattern = [[bool; PATTERN_SIZE]; PATTERN_SIZE];

/// A puzzle piece: a kind plus a rotation state.
///
/// Pieces carry no position. The session aims them wherever the player
/// activates a cell, so a piece is fully described by its kind and its
/// orientation. Pieces are immutable - rotation returns a new `GamePiece`.
///
/// # Example
///
/// ```
/// use quintris_engine::{GamePiece, PieceKind};
///
/// let piece = GamePiece::new(PieceKind::L);
/// let rotated = piece.rotated();
/// assert_eq!(rotated.kind(), PieceKind::L);
/// assert_ne!(rotated.rotation(), piece.rotation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePiece {
    kind: PieceKind,
    rotation: PieceRotation,
}

impl Serialize for GamePiece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation" (e.g., "Plus#1")
        let s = format!("{}#{}", self.kind, self.rotation.0);
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for GamePiece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        // Parse format: "kind#rotation" (e.g., "Plus#1")
        let mut parts = s.splitn(2, '#');
        let kind_str = parts.next().ok_or_else(|| {
            serde::de::Error::custom(format!("expected format 'kind#rotation', got '{s}'"))
        })?;
        let rotation_str = parts.next().ok_or_else(|| {
            serde::de::Error::custom(format!("missing '#' in format 'kind#rotation', got '{s}'"))
        })?;

        let kind = PieceKind::from_name(kind_str)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_str}")))?;

        let rotation_num = rotation_str.parse::<u8>().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation_num > 3 {
            return Err(serde::de::Error::custom(format!(
                "rotation must be 0-3, got {rotation_num}"
            )));
        }
        let rotation = PieceRotation(rotation_num);

        Ok(GamePiece { kind, rotation })
    }
}

impl GamePiece {
    #[must_use]
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: PieceRotation::default(),
        }
    }

    pub fn from_index(index: usize) -> Result<Self, InvalidPieceKindError> {
        Ok(Self::new(PieceKind::from_index(index)?))
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn rotated(&self) -> Self {
        Self {
            kind: self.kind,
            rotation: self.rotation.rotated(),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &'static PiecePattern {
        self.kind.pattern(self.rotation)
    }

    /// Returns the occupied cells of the pattern as `(column, row)` offsets
    /// within the bounding box.
    #[must_use]
    pub fn cells(&self) -> ArrayVec<(usize, usize), PATTERN_CELLS> {
        let mut cells = ArrayVec::new();
        for (y, row) in self.pattern().iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell {
                    cells.push((x, y));
                }
            }
        }
        cells
    }
}

/// Rotation state of a piece.
///
/// Represents one of four rotation states:
///
/// - `0`: 0° (spawn orientation)
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PieceRotation(u8);

impl PieceRotation {
    #[must_use]
    pub fn rotated(self) -> Self {
        PieceRotation((self.0 + 1) % 4)
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// Line piece.
    Line = 0,
    /// C piece.
    C = 1,
    /// Plus piece.
    Plus = 2,
    /// Dot piece.
    Dot = 3,
    /// Square piece.
    Square = 4,
    /// L piece.
    L = 5,
    /// J piece.
    J = 6,
    /// S piece.
    S = 7,
    /// Z piece.
    Z = 8,
    /// T piece.
    T = 9,
    /// X piece.
    X = 10,
    /// Corner piece.
    Corner = 11,
    /// Hook piece.
    Hook = 12,
    /// Diagonal piece.
    Diagonal = 13,
    /// U piece.
    U = 14,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=14) {
            0 => PieceKind::Line,
            1 => PieceKind::C,
            2 => PieceKind::Plus,
            3 => PieceKind::Dot,
            4 => PieceKind::Square,
            5 => PieceKind::L,
            6 => PieceKind::J,
            7 => PieceKind::S,
            8 => PieceKind::Z,
            9 => PieceKind::T,
            10 => PieceKind::X,
            11 => PieceKind::Corner,
            12 => PieceKind::Hook,
            13 => PieceKind::Diagonal,
            _ => PieceKind::U,
        }
    }
}

impl PieceKind {
    /// Number of piece kinds (15).
    pub const LEN: usize = 15;

    /// Looks up a piece kind by its catalog index.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(2)?, PieceKind::Plus);
    /// assert!(PieceKind::from_index(15).is_err());
    /// # Ok::<(), quintris_engine::InvalidPieceKindError>(())
    /// ```
    pub const fn from_index(index: usize) -> Result<Self, InvalidPieceKindError> {
        match index {
            0 => Ok(PieceKind::Line),
            1 => Ok(PieceKind::C),
            2 => Ok(PieceKind::Plus),
            3 => Ok(PieceKind::Dot),
            4 => Ok(PieceKind::Square),
            5 => Ok(PieceKind::L),
            6 => Ok(PieceKind::J),
            7 => Ok(PieceKind::S),
            8 => Ok(PieceKind::Z),
            9 => Ok(PieceKind::T),
            10 => Ok(PieceKind::X),
            11 => Ok(PieceKind::Corner),
            12 => Ok(PieceKind::Hook),
            13 => Ok(PieceKind::Diagonal),
            14 => Ok(PieceKind::U),
            _ => Err(InvalidPieceKindError::new(index)),
        }
    }

    /// Parses a piece kind from its display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use quintris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_name("Plus"), Some(PieceKind::Plus));
    /// assert_eq!(PieceKind::from_name("Blob"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Line" => Some(PieceKind::Line),
            "C" => Some(PieceKind::C),
            "Plus" => Some(PieceKind::Plus),
            "Dot" => Some(PieceKind::Dot),
            "Square" => Some(PieceKind::Square),
            "L" => Some(PieceKind::L),
            "J" => Some(PieceKind::J),
            "S" => Some(PieceKind::S),
            "Z" => Some(PieceKind::Z),
            "T" => Some(PieceKind::T),
            "X" => Some(PieceKind::X),
            "Corner" => Some(PieceKind::Corner),
            "Hook" => Some(PieceKind::Hook),
            "Diagonal" => Some(PieceKind::Diagonal),
            "U" => Some(PieceKind::U),
            _ => None,
        }
    }

    /// Position of this kind in the piece catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nonzero cell value associated with this kind (index plus one).
    #[must_use]
    pub const fn colour_value(self) -> u8 {
        self as u8 + 1
    }

    pub(crate) fn pattern(self, rotation: PieceRotation) -> &'static PiecePattern {
        &PIECE_PATTERNS[self as usize][rotation.as_usize()]
    }
}

/// Generates all 4 rotation states of a piece pattern by rotating 90° clockwise.
const fn pattern_rotations(pattern: PiecePattern) -> [PiecePattern; 4] {
    let mut rotates = [pattern; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_pattern = [[false; PATTERN_SIZE]; PATTERN_SIZE];
        let mut y = 0;
        while y < PATTERN_SIZE {
            let mut x = 0;
            while x < PATTERN_SIZE {
                new_pattern[y][x] = rotates[i - 1][PATTERN_SIZE - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_pattern;
        i += 1;
    }
    rotates
}

const PIECE_PATTERNS: [[PiecePattern; 4]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEE: [bool; PATTERN_SIZE] = [E; PATTERN_SIZE];

    [
        // Line piece
        pattern_rotations([EEE, [C, C, C], EEE]),
        // C piece
        pattern_rotations([[C, C, C], [C, E, E], [C, C, C]]),
        // Plus piece
        pattern_rotations([[E, C, E], [C, C, C], [E, C, E]]),
        // Dot piece
        pattern_rotations([EEE, [E, C, E], EEE]),
        // Square piece
        pattern_rotations([[C, C, E], [C, C, E], EEE]),
        // L piece
        pattern_rotations([[C, E, E], [C, E, E], [C, C, E]]),
        // J piece
        pattern_rotations([[E, E, C], [E, E, C], [E, C, C]]),
        // S piece
        pattern_rotations([[E, C, C], [C, C, E], EEE]),
        // Z piece
        pattern_rotations([[C, C, E], [E, C, C], EEE]),
        // T piece
        pattern_rotations([[C, C, C], [E, C, E], EEE]),
        // X piece
        pattern_rotations([[C, E, C], [E, C, E], [C, E, C]]),
        // Corner piece
        pattern_rotations([[C, C, E], [C, E, E], EEE]),
        // Hook piece
        pattern_rotations([[E, E, C], [E, E, C], [C, C, C]]),
        // Diagonal piece
        pattern_rotations([[C, E, E], [E, C, E], [E, E, C]]),
        // U piece
        pattern_rotations([[C, E, C], [C, E, C], [C, C, C]]),
    ]
};
