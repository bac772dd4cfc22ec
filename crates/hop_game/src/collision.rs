//! Axis-aligned rectangle collision against static platforms.
//!
//! The core algorithm is **axis-separable move-and-slide**: apply the X
//! displacement and resolve it, then apply Y using the already-corrected X
//! position. World space has its origin at the top-left and +y pointing
//! down, so "falling" means moving toward larger y.
//!
//! When the moved box overlaps several solids at once, the clamp target is
//! the nearest surface along the direction of travel (smallest left edge
//! when moving right, largest bottom edge when rising, and so on). The
//! result does not depend on the order the solids are listed in.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionMoveResult {
    pub aabb: Aabb,
    pub blocked_left: bool,
    pub blocked_right: bool,
    pub blocked_down: bool,
    pub blocked_up: bool,
}

pub fn move_and_collide<'a, I>(aabb: Aabb, dx: f32, dy: f32, solids: I) -> CollisionMoveResult
where
    I: Iterator<Item = &'a Aabb> + Clone,
{
    let mut moved = aabb;

    moved.x += dx;
    let blocked_x = resolve_axis_x(&mut moved, dx, solids.clone());

    moved.y += dy;
    let blocked_y = resolve_axis_y(&mut moved, dy, solids);

    CollisionMoveResult {
        aabb: moved,
        blocked_left: blocked_x && dx < 0.0,
        blocked_right: blocked_x && dx > 0.0,
        blocked_down: blocked_y && dy > 0.0,
        blocked_up: blocked_y && dy < 0.0,
    }
}

fn resolve_axis_x<'a>(aabb: &mut Aabb, dx: f32, solids: impl Iterator<Item = &'a Aabb>) -> bool {
    let nearest = {
        let hits = solids.filter(|solid| aabb.overlaps(solid));
        if dx > 0.0 {
            hits.map(Aabb::left).reduce(f32::min)
        } else if dx < 0.0 {
            hits.map(Aabb::right).reduce(f32::max)
        } else {
            None
        }
    };

    match nearest {
        Some(left_edge) if dx > 0.0 => aabb.x = left_edge - aabb.w,
        Some(right_edge) => aabb.x = right_edge,
        None => return false,
    }
    true
}

fn resolve_axis_y<'a>(aabb: &mut Aabb, dy: f32, solids: impl Iterator<Item = &'a Aabb>) -> bool {
    let nearest = {
        let hits = solids.filter(|solid| aabb.overlaps(solid));
        if dy > 0.0 {
            hits.map(Aabb::top).reduce(f32::min)
        } else if dy < 0.0 {
            hits.map(Aabb::bottom).reduce(f32::max)
        } else {
            None
        }
    };

    match nearest {
        Some(top_edge) if dy > 0.0 => aabb.y = top_edge - aabb.h,
        Some(bottom_edge) => aabb.y = bottom_edge,
        None => return false,
    }
    true
}
