//! Spatial bodies and collision resolution
//!
//! Every placed thing owns a `SpatialBody`: a visual rect (where the image is
//! drawn) and a hitbox inset from it (what collides). Movement is resolved one
//! axis at a time against a fixed set of obstacle hitboxes, which gives wall
//! sliding for free and keeps diagonal moves from slipping through corners.

use macroquad::prelude::Vec2;
use super::rect::Rect;

/// Pixels moved per frame at full input
pub const SPEED: f32 = 20.0;

/// Hitbox inset for the player (width, height delta)
pub const PLAYER_HITBOX_INSET: Vec2 = Vec2::new(0.0, -26.0);

/// Hitbox inset for tiles and enemies
pub const TILE_HITBOX_INSET: Vec2 = Vec2::new(0.0, -10.0);

/// Visual rect plus collision rect
///
/// Invariant: after construction and after every move the two rects share a
/// center, and the hitbox never extends past the visual rect along the inset
/// axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBody {
    visual: Rect,
    hitbox: Rect,
}

impl SpatialBody {
    /// Build a body whose hitbox is `visual` grown by `inset` around its center.
    /// Insets are zero or negative.
    pub fn new(visual: Rect, inset: Vec2) -> Self {
        debug_assert!(inset.x <= 0.0 && inset.y <= 0.0, "hitbox inset must shrink");
        Self {
            visual,
            hitbox: visual.inflate(inset.x, inset.y),
        }
    }

    /// Body whose hitbox is the visual rect itself
    pub fn solid(visual: Rect) -> Self {
        Self { visual, hitbox: visual }
    }

    pub fn visual(&self) -> &Rect {
        &self.visual
    }

    pub fn hitbox(&self) -> &Rect {
        &self.hitbox
    }

    /// Give the visual rect a new size, centered on the hitbox.
    /// Called after an animation frame swap, since frames can differ in size.
    pub fn resize_visual(&mut self, w: f32, h: f32) {
        self.visual = Rect::from_center(self.hitbox.center(), w, h);
    }

    fn sync_visual(&mut self) {
        self.visual.set_center(self.hitbox.center());
    }
}

/// Hitboxes that movers cannot pass through
///
/// Snapshotted from the world once the map is built; nothing adds or removes
/// obstacles mid-level.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    hitboxes: Vec<Rect>,
}

impl ObstacleSet {
    pub fn new(hitboxes: Vec<Rect>) -> Self {
        Self { hitboxes }
    }

    pub fn len(&self) -> usize {
        self.hitboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitboxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.hitboxes.iter()
    }
}

/// Which axes were stopped by an obstacle during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Move a body by `speed` pixels along `direction`, resolving collisions
///
/// 1. Normalize the direction (skipped for the zero vector).
/// 2. Apply the x step, then clamp against every overlapping obstacle.
/// 3. Apply the y step, then clamp the same way on y.
/// 4. Re-center the visual rect on the hitbox.
///
/// When several obstacles overlap on one axis the tightest clamp wins, so the
/// result does not depend on obstacle order.
pub fn move_body(
    body: &mut SpatialBody,
    direction: Vec2,
    speed: f32,
    obstacles: &ObstacleSet,
) -> MoveResult {
    let direction = if direction.length() != 0.0 {
        direction.normalize()
    } else {
        direction
    };

    body.hitbox.translate(speed * direction.x, 0.0);
    let blocked_x = resolve_horizontal(&mut body.hitbox, direction.x, obstacles);

    body.hitbox.translate(0.0, speed * direction.y);
    let blocked_y = resolve_vertical(&mut body.hitbox, direction.y, obstacles);

    body.sync_visual();
    MoveResult { blocked_x, blocked_y }
}

fn resolve_horizontal(hitbox: &mut Rect, dx: f32, obstacles: &ObstacleSet) -> bool {
    if dx == 0.0 {
        return false;
    }
    let hits = obstacles.iter().filter(|o| o.overlaps(hitbox));
    let clamp = if dx > 0.0 {
        hits.map(|o| o.left()).reduce(f32::min)
    } else {
        hits.map(|o| o.right()).reduce(f32::max)
    };
    match clamp {
        Some(edge) if dx > 0.0 => hitbox.set_right(edge),
        Some(edge) => hitbox.set_left(edge),
        None => return false,
    }
    true
}

fn resolve_vertical(hitbox: &mut Rect, dy: f32, obstacles: &ObstacleSet) -> bool {
    if dy == 0.0 {
        return false;
    }
    let hits = obstacles.iter().filter(|o| o.overlaps(hitbox));
    let clamp = if dy > 0.0 {
        hits.map(|o| o.top()).reduce(f32::min)
    } else {
        hits.map(|o| o.bottom()).reduce(f32::max)
    };
    match clamp {
        Some(edge) if dy > 0.0 => hitbox.set_bottom(edge),
        Some(edge) => hitbox.set_top(edge),
        None => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn player_at(x: f32, y: f32) -> SpatialBody {
        SpatialBody::new(Rect::new(x, y, 64.0, 64.0), PLAYER_HITBOX_INSET)
    }

    fn tile(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 64.0, 64.0).inflate(TILE_HITBOX_INSET.x, TILE_HITBOX_INSET.y)
    }

    #[test]
    fn test_displacement_length_is_speed_for_any_magnitude() {
        let empty = ObstacleSet::default();
        for dir in [
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(0.001, -0.002),
            Vec2::new(-50.0, -50.0),
        ] {
            let mut body = player_at(0.0, 0.0);
            let before = body.hitbox().center();
            move_body(&mut body, dir, SPEED, &empty);
            let moved = body.hitbox().center() - before;
            assert!((moved.length() - SPEED).abs() < EPS, "dir {:?} moved {:?}", dir, moved);
        }
    }

    #[test]
    fn test_zero_direction_keeps_position() {
        let mut body = player_at(10.0, 20.0);
        let before = body;
        let result = move_body(&mut body, Vec2::ZERO, SPEED, &ObstacleSet::default());
        assert_eq!(body, before);
        assert_eq!(result, MoveResult::default());
    }

    #[test]
    fn test_visual_follows_hitbox_center() {
        let mut body = player_at(0.0, 0.0);
        move_body(&mut body, Vec2::new(1.0, 1.0), SPEED, &ObstacleSet::default());
        assert!((body.visual().center() - body.hitbox().center()).length() < EPS);
    }

    #[test]
    fn test_moving_right_into_wall_stops_flush() {
        // Hitbox right edge starts at 60, wall hitbox starts at 70
        let mut body = SpatialBody::solid(Rect::new(0.0, 0.0, 60.0, 60.0));
        let obstacles = ObstacleSet::new(vec![Rect::new(70.0, 0.0, 64.0, 64.0)]);
        let result = move_body(&mut body, Vec2::new(1.0, 0.0), SPEED, &obstacles);
        assert!(result.blocked_x);
        assert!((body.hitbox().right() - 70.0).abs() < EPS);
        assert!(!body.hitbox().overlaps(&Rect::new(70.0, 0.0, 64.0, 64.0)));
    }

    #[test]
    fn test_moving_up_into_ceiling_stops_flush() {
        let mut body = SpatialBody::solid(Rect::new(0.0, 100.0, 40.0, 40.0));
        let ceiling = Rect::new(-20.0, 0.0, 100.0, 90.0);
        let obstacles = ObstacleSet::new(vec![ceiling]);
        let result = move_body(&mut body, Vec2::new(0.0, -1.0), SPEED, &obstacles);
        assert!(result.blocked_y);
        assert!((body.hitbox().top() - 90.0).abs() < EPS);
    }

    #[test]
    fn test_diagonal_into_wall_slides_along_y() {
        let mut body = SpatialBody::solid(Rect::new(0.0, 0.0, 40.0, 40.0));
        let wall = Rect::new(45.0, -500.0, 64.0, 1000.0);
        let obstacles = ObstacleSet::new(vec![wall]);
        let start_y = body.hitbox().y;
        let result = move_body(&mut body, Vec2::new(1.0, 1.0), SPEED, &obstacles);
        assert!(result.blocked_x);
        assert!(!result.blocked_y);
        assert!((body.hitbox().right() - 45.0).abs() < EPS);
        let expected_dy = SPEED / 2f32.sqrt();
        assert!((body.hitbox().y - start_y - expected_dy).abs() < EPS);
    }

    #[test]
    fn test_tightest_clamp_wins_regardless_of_order() {
        let near = Rect::new(50.0, 0.0, 10.0, 40.0);
        let far = Rect::new(55.0, 0.0, 10.0, 40.0);
        for obstacles in [vec![near, far], vec![far, near]] {
            let set = ObstacleSet::new(obstacles);
            let mut body = SpatialBody::solid(Rect::new(0.0, 0.0, 40.0, 40.0));
            move_body(&mut body, Vec2::new(1.0, 0.0), SPEED, &set);
            assert!((body.hitbox().right() - 50.0).abs() < EPS);
        }
    }

    #[test]
    fn test_never_ends_inside_an_obstacle() {
        let tiles: Vec<Rect> = vec![
            tile(128.0, 0.0),
            tile(128.0, 64.0),
            tile(0.0, 128.0),
            tile(64.0, 128.0),
            tile(128.0, 128.0),
        ];
        let set = ObstacleSet::new(tiles.clone());
        let dirs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.5),
            Vec2::new(0.3, 1.0),
        ];
        for dir in dirs {
            let mut body = player_at(40.0, 40.0);
            for _ in 0..20 {
                move_body(&mut body, dir, SPEED, &set);
                for t in &tiles {
                    assert!(!body.hitbox().overlaps(t), "dir {:?} penetrated {:?}", dir, t);
                }
            }
        }
    }

    #[test]
    fn test_resize_visual_recenters_on_hitbox() {
        let mut body = player_at(0.0, 0.0);
        body.resize_visual(80.0, 40.0);
        assert_eq!(body.visual().center(), body.hitbox().center());
        assert!((body.visual().w - 80.0).abs() < EPS);
    }
}
