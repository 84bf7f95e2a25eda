//! Greedy job selection under a move budget.
//!
//! Each round scores every remaining job by value per move from the current
//! position and commits the best one, provided the vehicle can still get
//! back to base afterwards. The first job that fails that guard ends the run.

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::landmarks::LegPlanner;
use crate::models::{Commitment, Job, MoveTag, Path, PickupOrdering, PlanResult, Route};
use crate::point::Point;
use crate::zones::NoFlyZones;
use tracing::{debug, info};

/// A feasible job scored from a given origin.
#[derive(Debug, Clone)]
struct Candidate {
    /// Index into the remaining-jobs list
    slot: usize,
    leg: Path,
    ordering: PickupOrdering,
    /// Where the leg actually arrives, within tolerance of the drop
    end: Point,
    return_leg: Path,
    ratio: f64,
}

/// Pick jobs and build the committed route.
///
/// Fails only on malformed input: a configuration that cannot converge or
/// supports more pickups than the ordering search handles, or a job with a
/// pickup count outside `1..=max_pickups`. Unreachable or unresolved jobs
/// are simply skipped.
pub fn select(
    jobs: &[Job],
    zones: &NoFlyZones,
    landmarks: &[Point],
    config: &PlannerConfig,
) -> Result<PlanResult> {
    config.validate()?;
    for job in jobs {
        job.validate(config.max_pickups)?;
    }

    let total_offered_value: u64 = jobs.iter().map(|job| u64::from(job.value)).sum();
    let planner = LegPlanner::new(zones, landmarks, &config.rules);

    let mut remaining: Vec<&Job> = jobs.iter().collect();
    let mut position = config.base;
    let mut moves_used = 0usize;
    let mut route = Route::starting_at(config.base);
    let mut jobs_done = Vec::new();
    let mut commitments = Vec::new();
    let mut return_leg = Path::new();

    info!(
        jobs = jobs.len(),
        zones = zones.len(),
        landmarks = landmarks.len(),
        budget = config.move_budget,
        "selecting jobs"
    );

    while let Some(best) = best_candidate(&planner, position, config.base, &remaining) {
        let needed = moves_used + best.leg.len() + best.return_leg.len();
        if needed >= config.move_budget {
            info!(
                job_id = %remaining[best.slot].id,
                needed,
                budget = config.move_budget,
                "next job would not leave enough moves to return; stopping"
            );
            break;
        }

        let job = remaining.remove(best.slot);
        let moves = best.leg.len();
        debug!(
            job_id = %job.id,
            value = job.value,
            moves,
            ratio = best.ratio,
            ordering = ?best.ordering,
            "committed job"
        );

        route.append(best.leg, MoveTag::Job(job.id.clone()));
        moves_used += moves;
        position = best.end;
        return_leg = best.return_leg;
        commitments.push(Commitment {
            job_id: job.id.clone(),
            ratio: best.ratio,
            moves,
            ordering: best.ordering,
        });
        jobs_done.push(job.clone());
    }

    if position != config.base {
        moves_used += return_leg.len();
        route.append(return_leg, MoveTag::ReturnToBase);
    }

    let value_captured = jobs_done.iter().map(|job| u64::from(job.value)).sum();
    let result = PlanResult {
        jobs_done,
        route,
        moves_used,
        total_offered_value,
        value_captured,
        commitments,
    };

    info!(
        jobs_done = result.jobs_done.len(),
        moves_used = result.moves_used,
        value_captured = result.value_captured,
        total_offered_value = result.total_offered_value,
        utilization = result.utilization(),
        "selection complete"
    );

    Ok(result)
}

/// Best value-per-move job from `origin`; ties go to the earliest job.
fn best_candidate(
    planner: &LegPlanner<'_>,
    origin: Point,
    base: Point,
    remaining: &[&Job],
) -> Option<Candidate> {
    remaining
        .iter()
        .enumerate()
        .filter_map(|(slot, job)| score(planner, origin, base, slot, job))
        .fold(None, |best: Option<Candidate>, candidate| match best {
            Some(current) if current.ratio >= candidate.ratio => Some(current),
            _ => Some(candidate),
        })
}

fn score(
    planner: &LegPlanner<'_>,
    origin: Point,
    base: Point,
    slot: usize,
    job: &Job,
) -> Option<Candidate> {
    let (leg, ordering) = job_leg(planner, origin, job)?;
    let end = leg.last_point().unwrap_or(origin);
    // A drop point with no way home can never be committed.
    let return_leg = planner.leg(end, base)?;
    let ratio = f64::from(job.value) / leg.len().max(1) as f64;
    Some(Candidate {
        slot,
        leg,
        ordering,
        end,
        return_leg,
        ratio,
    })
}

/// Shortest feasible leg for `job` from `origin`: through its pickups (in
/// whichever order is shorter when there are two) and on to the drop.
fn job_leg(
    planner: &LegPlanner<'_>,
    origin: Point,
    job: &Job,
) -> Option<(Path, PickupOrdering)> {
    let (pickups, drop) = job.resolved()?;

    let (leg, ordering) = match pickups.as_slice() {
        [pickup] => (planner.tour(origin, &[*pickup, drop])?, PickupOrdering::AsListed),
        [first, second] => {
            let as_listed = planner
                .tour(origin, &[*first, *second, drop])
                .map(|path| (path, PickupOrdering::AsListed));
            let reversed = planner
                .tour(origin, &[*second, *first, drop])
                .map(|path| (path, PickupOrdering::Reversed));
            as_listed
                .into_iter()
                .chain(reversed)
                .min_by_key(|(path, _)| path.len())?
        }
        _ => return None,
    };

    Some((leg, ordering))
}
