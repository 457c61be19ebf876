//! Junction switching.
//!
//! ```text
//! switch(segment, from, to):
//!   ① Validate: both junctions must be exposed by the segment's rail type.
//!   ② Snapshot: occupants (through the cache) and how each one is aligned
//!               with `from`, taken against the track as it is now.
//!   ③ Switch:   the rail type rewrites the block.
//!   ④ Steer:    vehicles heading out through `from` now head out through
//!               `to`; vehicles that came in through `from` now head for
//!               wherever the track sends traffic arriving through `to`.
//!   ⑤ Invalidate the segment's cache entry.
//! ```
//!
//! Only ① and ③ can fail the whole switch, and ③ fails before it writes
//! anything.  Steering failures are per vehicle and land in
//! [`SwitchOutcome::failed`].

use tracing::{debug, info, warn};

use tc_core::{BlockFace, VehicleId};
use tc_cache::SegmentCache;
use tc_rail::{Junction, RailTypeRegistry, SegmentId};
use tc_world::{Host, RedirectFailure, SignRegistry, VehicleRegistry, WorldAccess};

use crate::{SwitchError, SwitchResult};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What a completed switch did to the vehicles on the segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub segment:    SegmentId,
    pub from:       Junction,
    pub to:         Junction,
    /// Vehicles steered onto the new path, ascending id.
    pub redirected: Vec<VehicleId>,
    /// Vehicles aligned with neither end of the old path through `from`.
    pub untouched:  Vec<VehicleId>,
    /// Vehicles that should have been steered but could not be.
    pub failed:     Vec<(VehicleId, RedirectFailure)>,
}

impl SwitchOutcome {
    fn new(segment: SegmentId, from: &Junction, to: &Junction) -> Self {
        Self {
            segment,
            from:       from.clone(),
            to:         to.clone(),
            redirected: Vec::new(),
            untouched:  Vec::new(),
            failed:     Vec::new(),
        }
    }

    /// `true` when every vehicle that needed steering was steered.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// How an occupant relates to the source junction before the switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Alignment {
    /// Heading out through the source junction.
    Toward,
    /// Came in through the source junction.
    Through,
}

// ── Switch ────────────────────────────────────────────────────────────────────

/// Switch `segment` from junction `from` to junction `to`.
///
/// With `relocate` false, steps ② and ④ are skipped and every occupant is
/// left alone (none are reported).
///
/// # Errors
///
/// [`SwitchError::UnknownJunction`] if either junction is not exposed by the
/// segment; [`SwitchError::Rail`] if the segment cannot be resolved or its
/// rail type refuses the change.  In both cases the track is unchanged.
pub fn switch_junction<W, S, V>(
    cache:    &mut SegmentCache,
    rails:    &RailTypeRegistry,
    host:     &mut Host<W, S, V>,
    segment:  SegmentId,
    from:     &Junction,
    to:       &Junction,
    relocate: bool,
) -> SwitchResult<SwitchOutcome>
where
    W: WorldAccess,
    S: SignRegistry,
    V: VehicleRegistry,
{
    // ① Validate.
    let junctions = rails.junctions(&host.world, segment)?;
    for junction in [from, to] {
        if !junctions.contains(junction) {
            return Err(SwitchError::UnknownJunction {
                junction: junction.name().to_owned(),
                segment,
            });
        }
    }
    let rail = segment.block()?;
    let mut outcome = SwitchOutcome::new(segment, from, to);

    // ② Snapshot.
    let mut plan: Vec<(VehicleId, Alignment)> = Vec::new();
    if relocate {
        let occupants = cache.occupants_mut(&*host, segment)?.clone();
        let arrival = rails.connected_end(&host.world, segment, from)?;
        for vehicle in occupants {
            match host.vehicles.heading(vehicle) {
                None => outcome.failed.push((vehicle, RedirectFailure::UnknownVehicle(vehicle))),
                Some(h) if h == from.face() => plan.push((vehicle, Alignment::Toward)),
                Some(h) if Some(h) == arrival => plan.push((vehicle, Alignment::Through)),
                Some(_) => outcome.untouched.push(vehicle),
            }
        }
    }

    // ③ Switch.
    rails.switch_junction(&mut host.world, segment, from, to)?;

    // ④ Steer.
    if !plan.is_empty() {
        // The switch has committed; a failed lookup strands the vehicles
        // that needed it rather than failing the switch.
        let departure = rails.connected_end(&host.world, segment, to).ok().flatten();
        for (vehicle, alignment) in plan {
            let heading: Option<BlockFace> = match alignment {
                Alignment::Toward => Some(to.face()),
                Alignment::Through => departure,
            };
            let result = heading
                .ok_or(RedirectFailure::NoPath { vehicle })
                .and_then(|h| host.vehicles.redirect(vehicle, rail, h));
            match result {
                Ok(()) => {
                    debug!(%vehicle, ?alignment, "vehicle redirected");
                    outcome.redirected.push(vehicle);
                }
                Err(reason) => {
                    warn!(%vehicle, %segment, %reason, "vehicle could not be redirected");
                    outcome.failed.push((vehicle, reason));
                }
            }
        }
    }

    // ⑤ Invalidate.
    cache.invalidate(segment);

    info!(
        %segment,
        %from,
        %to,
        redirected = outcome.redirected.len(),
        failed = outcome.failed.len(),
        "junction switched"
    );
    Ok(outcome)
}
