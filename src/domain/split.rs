//! Train/eval/test split planning
//!
//! The day range is cut into fixed-length windows of consecutive days and the
//! windows, not individual days, are assigned to splits. Neighbouring days
//! share weather and fire state, so keeping them in the same split stops the
//! evaluation data from leaking into training.

use super::dates::{DateRange, DateWindow};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a dataset split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Eval,
    Test,
}

impl Split {
    /// Split name used in file prefixes and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Eval => "eval",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment of every day window to exactly one split
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SplitPlan {
    pub train: Vec<DateWindow>,
    pub eval: Vec<DateWindow>,
    pub test: Vec<DateWindow>,
}

impl SplitPlan {
    /// Windows of one split
    pub fn windows(&self, split: Split) -> &[DateWindow] {
        match split {
            Split::Train => &self.train,
            Split::Eval => &self.eval,
            Split::Test => &self.test,
        }
    }

    /// Non-empty splits in train, eval, test order
    pub fn splits(&self) -> impl Iterator<Item = (Split, &[DateWindow])> {
        [Split::Train, Split::Eval, Split::Test]
            .into_iter()
            .map(move |split| (split, self.windows(split)))
            .filter(|(_, windows)| !windows.is_empty())
    }

    /// Total number of windows across all splits
    pub fn num_windows(&self) -> usize {
        self.train.len() + self.eval.len() + self.test.len()
    }

    /// Total number of days across all splits
    pub fn num_days(&self) -> i64 {
        self.train
            .iter()
            .chain(&self.eval)
            .chain(&self.test)
            .map(DateWindow::num_days)
            .sum()
    }
}

/// Plans the train/eval/test split of a date range
///
/// The range is cut into windows of `window_length_days` and the windows are
/// shuffled with a ChaCha8 RNG seeded by `seed`. The first `floor(n * eval_split_ratio)`
/// shuffled windows go to eval, the same number to test and the rest to train.
/// Each split is returned sorted by date. Identical inputs always produce the
/// same plan, across builds and platforms.
///
/// # Examples
///
/// ```
/// use ndws::domain::dates::DateRange;
/// use ndws::domain::split::plan_splits;
///
/// let range = DateRange::parse("2020-01-01", "2020-12-31").unwrap();
/// let plan = plan_splits(&range, 8, 0.1, 123);
/// assert_eq!(plan.num_days(), range.num_days());
/// assert_eq!(plan.eval.len(), plan.test.len());
/// ```
pub fn plan_splits(
    range: &DateRange,
    window_length_days: u32,
    eval_split_ratio: f64,
    seed: u64,
) -> SplitPlan {
    let mut windows = range.windows(window_length_days);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    windows.shuffle(&mut rng);

    let ratio = eval_split_ratio.clamp(0.0, 0.5);
    let num_holdout = ((windows.len() as f64) * ratio).floor() as usize;

    let mut train = windows.split_off(2 * num_holdout);
    let mut test = windows.split_off(num_holdout);
    let mut eval = windows;

    train.sort();
    eval.sort();
    test.sort();

    tracing::debug!(
        range = %range,
        window_length_days,
        train = train.len(),
        eval = eval.len(),
        test = test.len(),
        "Planned dataset splits"
    );

    SplitPlan { train, eval, test }
}
