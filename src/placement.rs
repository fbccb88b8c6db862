use crate::arena::{Entity, ItemKind};
use crate::constants::MAX_PLACEMENT_ATTEMPTS;
use crate::geometry::{detect_collision, out_of_bounds};
use rand::Rng;
use thiserror::Error;

/// Recoverable pose rejections; these never escape the retry loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoseError {
    #[error("candidate footprint leaves the field")]
    OutOfBounds,
    #[error("candidate footprint intersects a placed object")]
    CollisionDetected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no valid pose for {kind:?} after {attempts} attempts")]
    Exhausted { kind: ItemKind, attempts: u32 },
}

/// Checks every instance of `candidate` for bounds, then for collision
/// against every instance already placed. Footprint-less instances pass
/// vacuously, which is what lets position markers through untested.
pub fn validate_pose(candidate: &Entity, placed: &[Entity]) -> Result<(), PoseError> {
    for instance in &candidate.instances {
        if out_of_bounds(instance) {
            return Err(PoseError::OutOfBounds);
        }
        for entity in placed {
            for occupied in &entity.instances {
                if detect_collision(instance, occupied) {
                    return Err(PoseError::CollisionDetected);
                }
            }
        }
    }
    Ok(())
}

/// Draws candidates from `factory` until one validates against `placed`.
///
/// The loop is bounded: after `MAX_PLACEMENT_ATTEMPTS` rejections it reports
/// exhaustion instead of spinning, so a distribution too tight for the
/// remaining free space surfaces as an error identifying the object kind.
pub fn place_with_retry<R, F>(
    rng: &mut R,
    placed: &[Entity],
    mut factory: F,
) -> Result<Entity, PlacementError>
where
    R: Rng,
    F: FnMut(&mut R) -> Entity,
{
    let mut attempts = 0;
    loop {
        let candidate = factory(rng);
        attempts += 1;
        if validate_pose(&candidate, placed).is_ok() {
            return Ok(candidate);
        }
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            return Err(PlacementError::Exhausted {
                kind: candidate.kind,
                attempts,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Instance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wall_at_center() -> Entity {
        Entity::single(
            ItemKind::Wall,
            Instance::at(20.0, 20.0).cube(4.0).rotated(0.0),
        )
    }

    #[test]
    fn first_valid_candidate_is_committed() {
        let mut rng = StdRng::seed_from_u64(0);
        let placed = vec![wall_at_center()];
        let entity = place_with_retry(&mut rng, &placed, |_| {
            Entity::single(
                ItemKind::GoodGoal,
                Instance::at(5.0, 5.0).cube(1.0).rotated(0.0),
            )
        })
        .unwrap();
        assert_eq!(entity.kind, ItemKind::GoodGoal);
    }

    #[test]
    fn colliding_candidates_are_resampled() {
        let mut rng = StdRng::seed_from_u64(0);
        let placed = vec![wall_at_center()];
        let mut draws = 0;
        let entity = place_with_retry(&mut rng, &placed, |_| {
            draws += 1;
            let x = if draws == 1 { 20.0 } else { 5.0 };
            Entity::single(ItemKind::GoodGoal, Instance::at(x, 20.0).cube(1.0).rotated(0.0))
        })
        .unwrap();
        assert_eq!(draws, 2);
        assert_eq!(entity.instances[0].position.unwrap().x, 5.0);
    }

    #[test]
    fn out_of_bounds_candidates_are_resampled() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut draws = 0;
        let entity = place_with_retry(&mut rng, &[], |_| {
            draws += 1;
            let x = if draws == 1 { -3.0 } else { 10.0 };
            Entity::single(ItemKind::BadGoal, Instance::at(x, 10.0).cube(1.0).rotated(0.0))
        })
        .unwrap();
        assert_eq!(draws, 2);
        assert_eq!(entity.instances[0].position.unwrap().x, 10.0);
    }

    #[test]
    fn hopeless_distribution_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(0);
        let placed = vec![wall_at_center()];
        let result = place_with_retry(&mut rng, &placed, |_| {
            Entity::single(
                ItemKind::GoodGoal,
                Instance::at(20.0, 20.0).cube(1.0).rotated(0.0),
            )
        });
        assert_eq!(
            result,
            Err(PlacementError::Exhausted {
                kind: ItemKind::GoodGoal,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            })
        );
    }

    #[test]
    fn markers_pass_validation_untested() {
        let placed = vec![wall_at_center()];
        let marker = Entity::single(ItemKind::GoodGoalMulti, Instance::default().cube(0.5));
        assert_eq!(validate_pose(&marker, &placed), Ok(()));

        let unsized_entity = Entity::single(ItemKind::Agent, Instance::at(20.0, 20.0));
        assert_eq!(validate_pose(&unsized_entity, &placed), Ok(()));
    }

    #[test]
    fn bounds_are_checked_before_collision() {
        let placed = vec![wall_at_center()];
        let candidate = Entity::single(
            ItemKind::BadGoal,
            Instance::at(-2.0, 20.0).sized(nalgebra::Vector3::new(60.0, 1.0, 2.0)).rotated(0.0),
        );
        assert_eq!(validate_pose(&candidate, &placed), Err(PoseError::OutOfBounds));
    }
}
