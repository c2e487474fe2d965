use tracing::debug;

use crate::domain::branch::BranchRecord;
use crate::error::Result;
use crate::git::Repository;

/// Picks the branch nearest to the current checkout.
///
/// `branches` must already be sorted oldest-first: on equal distance the
/// earlier (older) branch wins, which favours trunk and ancestor series.
pub struct BranchMatcher<'a> {
    branches: &'a [BranchRecord],
}

impl<'a> BranchMatcher<'a> {
    pub fn new(branches: &'a [BranchRecord]) -> Self {
        BranchMatcher { branches }
    }

    /// Returns the active branch for a checkout tracking `tracking`.
    ///
    /// An exact name match wins without querying history. Otherwise every
    /// branch is measured by the commits `tracking` has that it lacks, and the
    /// first branch with the smallest distance is chosen. Once a distance `d`
    /// is known, later walks are capped at `d + 1` commits since they can only
    /// win by being strictly smaller.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - The active branch
    /// * `Ok(None)` - If no branch could be measured against `tracking`
    pub fn find_active<R: Repository + ?Sized>(
        &self,
        repo: &R,
        tracking: &str,
    ) -> Result<Option<&'a BranchRecord>> {
        if let Some(exact) = self.branches.iter().find(|b| b.name == tracking) {
            debug!(branch = %exact.name, "tracking branch is a known branch");
            return Ok(Some(exact));
        }

        let mut best: Option<(&'a BranchRecord, usize)> = None;
        for candidate in self.branches {
            let limit = best.map(|(_, distance)| distance + 1);
            let distance = match repo.commit_distance(&candidate.name, tracking, limit)? {
                Some(distance) => distance,
                None => {
                    debug!(branch = %candidate.name, tracking, "cannot measure distance");
                    continue;
                }
            };
            debug!(branch = %candidate.name, distance, "measured branch distance");

            if best.map_or(true, |(_, min)| distance < min) {
                best = Some((candidate, distance));
            }
        }

        if best.is_none() {
            debug!(tracking, "no branch could be matched to the tracking branch");
        }
        Ok(best.map(|(record, _)| record))
    }
}
