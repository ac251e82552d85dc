//! Scoreboard counters and the hit banner

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::HitEvent;
use crate::consts::{BANNER_OFFSET_X, BANNER_OFFSET_Y};

/// Transient message shown after a scoring hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    /// Where to draw it (arena coordinates)
    pub pos: Vec2,
    /// Absolute expiry time (ms, host clock)
    pub expires_at_ms: f64,
}

impl Banner {
    pub fn new(text: impl Into<String>, pos: Vec2, expires_at_ms: f64) -> Self {
        Self {
            text: text.into(),
            pos,
            expires_at_ms,
        }
    }

    /// "Hit! +N" just below-left of the struck target
    pub fn for_hit(hit: &HitEvent, now_ms: f64, duration_ms: f64) -> Self {
        Self::new(
            format!("Hit! +{}", hit.value),
            hit.point + Vec2::new(BANNER_OFFSET_X, BANNER_OFFSET_Y),
            now_ms + duration_ms,
        )
    }

    #[inline]
    pub fn is_visible(&self, now_ms: f64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Read-only counters for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: i64,
    pub bullets_remaining: u32,
    pub target_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyId;

    fn hit(value: i64) -> HitEvent {
        HitEvent {
            bullet: BodyId(1),
            target: BodyId(2),
            value,
            target_destroyed: false,
            point: Vec2::new(300.0, 200.0),
        }
    }

    #[test]
    fn test_hit_banner_text_and_position() {
        let banner = Banner::for_hit(&hit(5), 1000.0, 2000.0);
        assert_eq!(banner.text, "Hit! +5");
        assert_eq!(banner.pos, Vec2::new(250.0, 180.0));
        assert_eq!(banner.expires_at_ms, 3000.0);
    }

    #[test]
    fn test_visibility_boundary() {
        let banner = Banner::for_hit(&hit(8), 0.0, 2000.0);
        assert!(banner.is_visible(0.0));
        assert!(banner.is_visible(1999.9));
        assert!(!banner.is_visible(2000.0));
        assert!(!banner.is_visible(5000.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn visibility_is_monotonic(
                start in 0.0f64..1e6,
                t1 in 0.0f64..5000.0,
                t2 in 0.0f64..5000.0,
            ) {
                let banner = Banner::for_hit(&hit(3), start, 2000.0);
                let (early, late) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
                // Once hidden it never reappears
                if !banner.is_visible(start + early) {
                    prop_assert!(!banner.is_visible(start + late));
                }
                prop_assert_eq!(
                    banner.is_visible(start + early),
                    start + early < banner.expires_at_ms
                );
            }
        }
    }
}
