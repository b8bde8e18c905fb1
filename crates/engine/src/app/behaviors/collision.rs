use crate::app::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    Player,
    Tile,
}

pub fn resolve_pair(
    first: &mut Body,
    first_kind: CollisionKind,
    second: &mut Body,
    second_kind: CollisionKind,
) {
    match (first_kind, second_kind) {
        (CollisionKind::Player, CollisionKind::Tile) => resolve_player_against_tile(first, second),
        (CollisionKind::Tile, CollisionKind::Player) => resolve_player_against_tile(second, first),
        (CollisionKind::Player, CollisionKind::Player) => {}
        (CollisionKind::Tile, CollisionKind::Tile) => {}
    }
}

/// Pushes the player out of the tile along the axis that needs the smaller
/// correction and stops it on that axis. Equal overlaps correct along x.
pub fn resolve_player_against_tile(player: &mut Body, tile: &Body) {
    let dx = player.position.x - tile.position.x;
    let dy = player.position.y - tile.position.y;

    let min_x_dist = 0.5 * (player.size.width + tile.size.width);
    let min_y_dist = 0.5 * (player.size.height + tile.size.height);
    let overlap_x = min_x_dist - dx.abs();
    let overlap_y = min_y_dist - dy.abs();

    if overlap_x > overlap_y {
        player.position.y = tile.position.y + away_from(dy) * min_y_dist;
        player.velocity.y = 0.0;
    } else {
        player.position.x = tile.position.x + away_from(dx) * min_x_dist;
        player.velocity.x = 0.0;
    }
}

fn away_from(delta: f32) -> f32 {
    if delta > 0.0 {
        1.0
    } else {
        -1.0
    }
}
