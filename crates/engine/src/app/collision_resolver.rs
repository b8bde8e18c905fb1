use super::entity::{Body, Entity};

/// Broad and narrow phase in one: the boxes overlap strictly on both axes
/// and the bodies are approaching each other. Zero-size boxes never overlap.
pub fn are_colliding(first: &Body, second: &Body) -> bool {
    let dx = first.position.x - second.position.x;
    let dy = first.position.y - second.position.y;
    let min_x_dist = 0.5 * (first.size.width + second.size.width);
    let min_y_dist = 0.5 * (first.size.height + second.size.height);
    if dx.abs() >= min_x_dist || dy.abs() >= min_y_dist {
        return false;
    }

    let dvx = first.velocity.x - second.velocity.x;
    let dvy = first.velocity.y - second.velocity.y;
    dx * dvx + dy * dvy < 0.0
}

pub fn resolve_collisions(entities: &mut [Entity]) -> usize {
    let mut resolved = 0;
    for i in 1..entities.len() {
        let (earlier, rest) = entities.split_at_mut(i);
        let later = &mut rest[0];
        if later.collision.is_none() {
            continue;
        }
        for other in earlier.iter_mut() {
            if other.collision.is_none() || !are_colliding(&later.body, &other.body) {
                continue;
            }
            later.resolve_against(other);
            resolved += 1;
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::behaviors::CollisionKind;
    use crate::app::{Behaviors, EntityRegistry, Size, Vec2};

    fn body(x: f32, y: f32, vx: f32, vy: f32, side: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::new(vx, vy), Size::new(side, side))
    }

    fn with_kind(kind: CollisionKind) -> Behaviors {
        Behaviors {
            collision: Some(kind),
            ..Behaviors::default()
        }
    }

    #[test]
    fn approaching_overlap_collides() {
        let player = body(100.0, 100.0, 1.0, 0.0, 50.0);
        let tile = body(110.0, 100.0, 0.0, 0.0, 20.0);

        assert!(are_colliding(&player, &tile));
        assert!(are_colliding(&tile, &player));
    }

    #[test]
    fn separating_overlap_does_not_collide() {
        let player = body(100.0, 100.0, -1.0, 0.0, 50.0);
        let tile = body(110.0, 100.0, 0.0, 0.0, 20.0);

        assert!(!are_colliding(&player, &tile));
    }

    #[test]
    fn resting_overlap_does_not_collide() {
        let player = body(100.0, 100.0, 0.0, 0.0, 50.0);
        let tile = body(110.0, 100.0, 0.0, 0.0, 20.0);

        assert!(!are_colliding(&player, &tile));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let player = body(65.0, 100.0, 5.0, 0.0, 50.0);
        let tile = body(100.0, 100.0, 0.0, 0.0, 20.0);

        assert!(!are_colliding(&player, &tile));
    }

    #[test]
    fn zero_size_never_collides() {
        let dot = body(100.0, 100.0, 1.0, 1.0, 0.0);
        let other = body(100.0, 100.0, -1.0, -1.0, 0.0);

        assert!(!are_colliding(&dot, &other));
    }

    #[test]
    fn resolver_corrects_player_inserted_before_tile() {
        let mut registry = EntityRegistry::default();
        let player = registry.spawn(
            body(100.0, 100.0, 2.0, 0.0, 50.0),
            with_kind(CollisionKind::Player),
        );
        registry.spawn(body(110.0, 100.0, 0.0, 0.0, 20.0), with_kind(CollisionKind::Tile));
        registry.apply_pending();

        let resolved = resolve_collisions(registry.entities_mut());

        assert_eq!(resolved, 1);
        let player = registry.find_entity(player).expect("player");
        assert_eq!(player.body.position.x, 75.0);
        assert_eq!(player.body.velocity.x, 0.0);
    }

    #[test]
    fn entities_without_collision_are_skipped() {
        let mut registry = EntityRegistry::default();
        registry.spawn(body(100.0, 100.0, 2.0, 0.0, 50.0), Behaviors::default());
        registry.spawn(body(110.0, 100.0, 0.0, 0.0, 20.0), with_kind(CollisionKind::Tile));
        registry.apply_pending();

        assert_eq!(resolve_collisions(registry.entities_mut()), 0);
        assert_eq!(registry.entities()[0].body.position.x, 100.0);
    }

    #[test]
    fn tiles_side_by_side_are_left_alone() {
        let mut registry = EntityRegistry::default();
        registry.spawn(body(10.0, 10.0, 0.0, 0.0, 20.0), with_kind(CollisionKind::Tile));
        registry.spawn(body(25.0, 10.0, 0.0, 0.0, 20.0), with_kind(CollisionKind::Tile));
        registry.apply_pending();

        resolve_collisions(registry.entities_mut());

        assert_eq!(registry.entities()[0].body.position.x, 10.0);
        assert_eq!(registry.entities()[1].body.position.x, 25.0);
    }
}
