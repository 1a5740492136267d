use std::{fmt, mem, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{GamePiece, ParseSeedError};

/// Manages the two-slot piece queue: the piece in play and the one behind it.
///
/// # Queue Discipline
///
/// - Every spawn draws a kind uniformly at random from the full catalog
/// - [`Self::advance`] shifts the following piece into play and spawns a
///   replacement behind it
/// - [`Self::swap`] exchanges the two slots without touching the generator
///
/// Freshly spawned pieces always start in spawn orientation; a swapped piece
/// keeps whatever rotation it had.
///
/// # Example
///
/// ```
/// use quintris_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
/// let following = queue.following_piece();
///
/// queue.advance();
/// assert_eq!(queue.current_piece(), following);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    current: GamePiece,
    following: GamePiece,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, enabling:
///
/// - Reproducible gameplay for debugging
/// - Seeded runs that can be shared and replayed
/// - Deterministic testing
///
/// # Example
///
/// ```
/// use quintris_engine::{GameSession, QueueSeed};
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: QueueSeed = rand::rng().random();
///
/// // Create two sessions with the same seed
/// let session1 = GameSession::with_seed(5, 5, seed);
/// let session2 = GameSession::with_seed(5, 5, seed);
///
/// // Both sessions will deal the same piece sequence
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueueSeed([u8; 16]);

impl fmt::Display for QueueSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for QueueSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for QueueSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QueueSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|e: ParseSeedError| serde::de::Error::custom(format!("{e}: {hex_str:?}")))
    }
}

/// Allows generating random `QueueSeed` values using the standard random distribution.
///
/// This implementation enables idiomatic seed generation with `rng.random()`.
impl Distribution<QueueSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> QueueSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        QueueSeed(seed)
    }
}

impl PieceQueue {
    /// Creates a new queue with a random seed.
    ///
    /// Both slots are filled immediately. For deterministic piece generation,
    /// use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: QueueSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let current = GamePiece::new(rng.random());
        let following = GamePiece::new(rng.random());
        Self {
            rng,
            current,
            following,
        }
    }

    /// Returns the piece currently in play.
    #[must_use]
    pub fn current_piece(&self) -> GamePiece {
        self.current
    }

    /// Returns the piece queued behind the current one.
    #[must_use]
    pub fn following_piece(&self) -> GamePiece {
        self.following
    }

    /// Shifts the following piece into play and spawns a new following piece.
    pub fn advance(&mut self) {
        self.current = self.following;
        self.following = self.spawn();
    }

    /// Exchanges the current and following pieces, keeping their rotations.
    pub fn swap(&mut self) {
        mem::swap(&mut self.current, &mut self.following);
    }

    /// Rotates the current piece 90° clockwise.
    pub fn rotate_current(&mut self) {
        self.current = self.current.rotated();
    }

    /// Discards both slots and deals two fresh pieces from the generator.
    pub(crate) fn refill(&mut self) {
        self.current = self.spawn();
        self.following = self.spawn();
    }

    fn spawn(&mut self) -> GamePiece {
        GamePiece::new(self.rng.random())
    }
}
