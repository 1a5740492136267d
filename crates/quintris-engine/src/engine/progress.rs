/// Factor applied to every score delta.
const SCORE_FACTOR: usize = 10;

/// Score a player must earn to advance one level.
const LEVEL_STEP: usize = 1000;

/// Lives a fresh game starts with.
const STARTING_LIVES: usize = 3;

/// Multiplier bonus for simultaneous line clears.
///
/// Index corresponds to number of lines cleared simultaneously:
/// - 0 lines: no bonus (the multiplier resets to 1)
/// - 1 line: +1
/// - 2 lines: +2
/// - 3 lines: +3
/// - 4 lines: +4
///
/// Five or more simultaneous lines fall outside the table and leave the
/// multiplier unchanged.
const MULTIPLIER_BONUS_TABLE: [usize; 5] = [0, 1, 2, 3, 4];

/// Player progress: score, level, lives, and the score multiplier.
///
/// Progress advances once per placement, after the line-clear pass:
///
/// - **Score** grows by `lines * cell_credit * 10 * multiplier`
/// - **Multiplier** rewards consecutive clearing placements and resets on a
///   clear-less one
/// - **Level** advances each time another 1000 points have been earned, with
///   overshoot carried into the next level's threshold
/// - **Lives** only change through explicit [`Self::lose_life`] and
///   [`Self::gain_life`] calls
///
/// # Example
///
/// ```
/// use quintris_engine::GameProgress;
///
/// let mut progress = GameProgress::new();
/// let delta = progress.apply_clear(1, 5);
///
/// assert_eq!(delta, 50);
/// assert_eq!(progress.score(), 50);
/// assert_eq!(progress.multiplier(), 2);
/// assert_eq!(progress.score_to_next_level(), 950);
/// ```
#[derive(Debug, Clone)]
pub struct GameProgress {
    score: usize,
    level: usize,
    lives: usize,
    multiplier: usize,
    score_to_next_level: usize,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl GameProgress {
    /// Creates progress for a fresh game: no score, level 0, three lives.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            lives: STARTING_LIVES,
            multiplier: 1,
            score_to_next_level: LEVEL_STEP,
        }
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the number of lives left.
    #[must_use]
    pub const fn lives(&self) -> usize {
        self.lives
    }

    /// Returns the current score multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> usize {
        self.multiplier
    }

    /// Returns how much score is still needed to reach the next level.
    #[must_use]
    pub const fn score_to_next_level(&self) -> usize {
        self.score_to_next_level
    }

    /// Applies one clear result to the player's progress.
    ///
    /// The score delta is `lines * cell_credit * 10 * multiplier`, using the
    /// multiplier as it stood before this placement. The multiplier then
    /// grows by the table bonus, or resets to 1 on a clear-less placement.
    /// Finally the level counter absorbs the delta; each full step gained is
    /// one level, and overshoot carries into the next level's threshold.
    ///
    /// Returns the score delta.
    pub fn apply_clear(&mut self, lines: usize, cell_credit: usize) -> usize {
        let delta = lines * cell_credit * SCORE_FACTOR * self.multiplier;
        self.score += delta;

        match MULTIPLIER_BONUS_TABLE.get(lines) {
            Some(0) => self.multiplier = 1,
            Some(bonus) => self.multiplier += bonus,
            None => {}
        }

        if delta < self.score_to_next_level {
            self.score_to_next_level -= delta;
        } else {
            let overshoot = delta - self.score_to_next_level;
            self.level += 1 + overshoot / LEVEL_STEP;
            self.score_to_next_level = LEVEL_STEP - overshoot % LEVEL_STEP;
        }

        delta
    }

    /// Removes one life, stopping at zero.
    pub const fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Grants one extra life.
    pub const fn gain_life(&mut self) {
        self.lives += 1;
    }
}
