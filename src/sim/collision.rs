//! Pairwise collision detection and resolution
//!
//! Every unordered pair of live bodies is examined once per tick. That is
//! O(n²), which is fine for the few dozen bodies a session ever holds.
//!
//! Resolution mutates velocities and radii in place. Bodies consumed by a hit
//! are marked dead immediately (so later pairs skip them) and their ids are
//! returned for a single removal pass once the scan is complete.

use std::collections::HashSet;

use glam::Vec2;
use serde::Serialize;

use super::body::{Body, BodyId, BodyKind};
use crate::consts::*;
use crate::settings::{ApproachTest, OverlapTest};

/// What happened to an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Effect {
    /// Bullets pass through each other
    Pass,
    /// A bullet struck a target
    Hit {
        value: i64,
        target_destroyed: bool,
    },
    /// Two targets exchanged momentum
    Bounce { weight_ratio: f32 },
    /// Two targets overlap but are not considered approaching
    Graze,
}

/// One overlapping pair and its effect.
///
/// For hits `a` is the bullet and `b` the target. For bounces `a` is the body
/// whose radius is the numerator of the weight ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
    pub effect: Effect,
}

/// A scoring collision, used to place the banner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitEvent {
    pub bullet: BodyId,
    pub target: BodyId,
    pub value: i64,
    pub target_destroyed: bool,
    /// Target position at the moment of impact
    pub point: Vec2,
}

/// Everything one resolver pass produced
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    pub contacts: Vec<Contact>,
    /// Bodies to drop from the world, in the order they were consumed
    pub removed: Vec<BodyId>,
    pub score_delta: i64,
    pub hits: Vec<HitEvent>,
}

impl CollisionReport {
    /// The most recent scoring hit of the tick (drives the banner)
    pub fn last_hit(&self) -> Option<&HitEvent> {
        self.hits.last()
    }

    fn remove(&mut self, id: BodyId) {
        if !self.removed.contains(&id) {
            self.removed.push(id);
        }
    }
}

/// Resolver tuning
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    pub overlap: OverlapTest,
    pub approach: ApproachTest,
}

impl Resolver {
    pub fn new(overlap: OverlapTest, approach: ApproachTest) -> Self {
        Self { overlap, approach }
    }

    /// Run detection and resolution over all live bodies for one tick
    pub fn resolve(&self, bodies: &mut [Body]) -> CollisionReport {
        let mut report = CollisionReport::default();

        for j in 1..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let second = &mut tail[0];
            for first in head.iter_mut() {
                if !first.alive || !second.alive {
                    continue;
                }
                if !overlaps(self.overlap, first, second) {
                    continue;
                }
                self.resolve_pair(first, second, &mut report);
            }
        }

        report
    }

    fn resolve_pair(&self, first: &mut Body, second: &mut Body, report: &mut CollisionReport) {
        match (first.kind, second.kind) {
            (BodyKind::Bullet, BodyKind::Bullet) => report.contacts.push(Contact {
                a: first.id,
                b: second.id,
                effect: Effect::Pass,
            }),
            (BodyKind::Bullet, BodyKind::Target) => strike(first, second, report),
            (BodyKind::Target, BodyKind::Bullet) => strike(second, first, report),
            (BodyKind::Target, BodyKind::Target) => {
                let contact = match approach_order(self.approach, first, second) {
                    Some(Order::FirstLeads) => bounce(first, second),
                    Some(Order::SecondLeads) => bounce(second, first),
                    None => Contact {
                        a: first.id,
                        b: second.id,
                        effect: Effect::Graze,
                    },
                };
                report.contacts.push(contact);
            }
        }
    }
}

/// Overlap between two bodies under the configured test.
///
/// The box test compares each axis separately against the summed radii, so
/// it also reports diagonal near-misses as hits.
pub fn overlaps(test: OverlapTest, a: &Body, b: &Body) -> bool {
    let reach = a.radius + b.radius;
    let d = a.pos - b.pos;
    match test {
        OverlapTest::BoundingBox => d.x.abs() < reach && d.y.abs() < reach,
        OverlapTest::Circle => d.length_squared() < reach * reach,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    FirstLeads,
    SecondLeads,
}

/// Which target (if any) leads a bounce
fn approach_order(test: ApproachTest, first: &Body, second: &Body) -> Option<Order> {
    let d = first.pos - second.pos;
    match test {
        ApproachTest::UpperRight => {
            if d.x > 0.0 && d.y > 0.0 {
                Some(Order::FirstLeads)
            } else if d.x < 0.0 && d.y < 0.0 {
                Some(Order::SecondLeads)
            } else {
                None
            }
        }
        ApproachTest::RelativeVelocity => {
            let closing = d.dot(first.vel - second.vel);
            (closing < 0.0).then_some(Order::FirstLeads)
        }
    }
}

/// Bullet hits target: score, consume the bullet, shrink or destroy the target
fn strike(bullet: &mut Body, target: &mut Body, report: &mut CollisionReport) {
    let value = target.hit_value();
    report.score_delta += value;

    bullet.alive = false;
    report.remove(bullet.id);

    let point = target.pos;
    target.radius -= HIT_SHRINK;
    let target_destroyed = target.radius < DESTROY_RADIUS;
    if target_destroyed {
        target.alive = false;
        report.remove(target.id);
    } else {
        target.vel.y += HIT_KICK_VY;
    }

    log::debug!(
        "Bullet {} hit target {} for {} (radius now {}{})",
        bullet.id,
        target.id,
        value,
        target.radius,
        if target_destroyed { ", destroyed" } else { "" }
    );

    report.contacts.push(Contact {
        a: bullet.id,
        b: target.id,
        effect: Effect::Hit {
            value,
            target_destroyed,
        },
    });
    report.hits.push(HitEvent {
        bullet: bullet.id,
        target: target.id,
        value,
        target_destroyed,
        point,
    });
}

/// Swap velocities scaled by the radius ratio, then step both bodies once
fn bounce(a: &mut Body, b: &mut Body) -> Contact {
    let weight_ratio = a.radius / b.radius;
    let va = a.vel;
    a.vel = b.vel / weight_ratio;
    b.vel = va * weight_ratio;
    a.pos += a.vel;
    b.pos += b.vel;
    Contact {
        a: a.id,
        b: b.id,
        effect: Effect::Bounce { weight_ratio },
    }
}

/// Ids collected for removal, as a set for single-pass filtering
pub fn removal_set(ids: &[BodyId]) -> HashSet<BodyId> {
    ids.iter().copied().collect()
}
