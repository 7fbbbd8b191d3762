// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::aggregate::DateScore;
use std::collections::BTreeMap;
use time::Date;

/// Number of dates shown in the ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// A candidate date's position in the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedDate {
    /// 1-based position.
    pub rank: usize,
    pub date: Date,
    pub score: DateScore,
}

impl RankedDate {
    /// Returns true for the first-placed date.
    #[must_use]
    pub const fn is_top(&self) -> bool {
        self.rank == 1
    }
}

/// Orders dates by score descending and keeps the first `top_n`.
///
/// Equal scores are ordered by date ascending.
#[must_use]
pub fn rank(scores: &BTreeMap<Date, DateScore>, top_n: usize) -> Vec<RankedDate> {
    let mut ordered: Vec<(&Date, &DateScore)> = scores.iter().collect();
    ordered.sort_by(|(a_date, a), (b_date, b)| b.score.cmp(&a.score).then(a_date.cmp(b_date)));

    ordered
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(index, (date, score))| RankedDate {
            rank: index + 1,
            date: *date,
            score: score.clone(),
        })
        .collect()
}
