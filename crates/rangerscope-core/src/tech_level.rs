//! Galaxy-wide technology level estimate.
//!
//! The estimate looks at the highest tech level reached by inhabited
//! planets and smooths it so that a lone outlier settlement does not lift
//! the whole galaxy:
//!
//! - at least 5 planets at the top level L: the galaxy is at L;
//! - at least 2 at L, or at least 4 at L-1: the galaxy is at L-1;
//! - otherwise the galaxy is at L-2.

use crate::graph::Galaxy;
use crate::model::Planet;
use tracing::warn;

/// Number of valid planet tech levels (`0..TECH_LEVELS`).
pub const TECH_LEVELS: usize = 9;

/// Factions whose planets count toward the estimate.
pub const INHABITED_FACTIONS: [&str; 6] = ["PirateClan", "People", "Maloc", "Fei", "Peleng", "Gaal"];

pub fn is_inhabited(owner: &str) -> bool {
    INHABITED_FACTIONS.contains(&owner)
}

/// Counts inhabited planets per tech level. `None` if any planet, inhabited
/// or not, reports a level outside `0..TECH_LEVELS`.
pub fn tech_histogram<'a>(
    planets: impl IntoIterator<Item = &'a Planet>,
) -> Option<[u32; TECH_LEVELS]> {
    let mut counts = [0u32; TECH_LEVELS];
    for planet in planets {
        let level = planet.tech_level as usize;
        if level >= TECH_LEVELS {
            warn!(
                planet = planet.id.0,
                level = planet.tech_level,
                "planet tech level out of range"
            );
            return None;
        }
        if is_inhabited(&planet.owner) {
            counts[level] += 1;
        }
    }
    Some(counts)
}

/// Applies the smoothing rule to a histogram.
pub fn smoothed_level(counts: &[u32; TECH_LEVELS]) -> u32 {
    let Some(top) = counts.iter().rposition(|&c| c > 0) else {
        return 0;
    };
    let at_top = counts[top];
    let below_top = top.checked_sub(1).map_or(0, |l| counts[l]);
    let level = if at_top >= 5 {
        top
    } else if at_top >= 2 || below_top >= 4 {
        top.saturating_sub(1)
    } else {
        top.saturating_sub(2)
    };
    level as u32
}

impl Galaxy {
    /// Estimated galaxy tech level, `None` when a planet carries an
    /// out-of-range level.
    pub fn tech_level(&self) -> Option<u32> {
        tech_histogram(self.planets()).map(|counts| smoothed_level(&counts))
    }
}
