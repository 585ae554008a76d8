use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::{WheelConfiguration, WheelItem};

/// Picks a segment uniformly at random. `None` for an empty wheel.
pub fn spin<'a, R>(config: &'a WheelConfiguration, rng: &mut R) -> Option<&'a WheelItem>
where
    R: Rng + ?Sized,
{
    let picked = config.items.choose(rng);
    if let Some(item) = picked {
        tracing::debug!(item = %item.text, "wheel stopped.");
    }
    picked
}
