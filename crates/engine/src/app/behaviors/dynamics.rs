use crate::app::{Body, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dynamics {
    /// Plain velocity integration. With bounds, leaving them flags the body
    /// for removal at the end of the frame.
    Linear { bounds: Option<WorldBounds> },
    Gravitational { gravity: f32 },
}

impl Dynamics {
    pub fn linear() -> Self {
        Self::Linear { bounds: None }
    }

    pub fn linear_within(bounds: WorldBounds) -> Self {
        Self::Linear {
            bounds: Some(bounds),
        }
    }

    pub fn gravitational(gravity: f32) -> Self {
        Self::Gravitational { gravity }
    }

    pub fn advance(&self, body: &mut Body) {
        integrate(body);
        match *self {
            Self::Linear { bounds: Some(bounds) } => {
                if !bounds.contains(body.position) {
                    body.remove = true;
                }
            }
            Self::Linear { bounds: None } => {}
            Self::Gravitational { gravity } => {
                body.velocity.y += gravity;
            }
        }
    }
}

fn integrate(body: &mut Body) {
    body.position.x += body.velocity.x;
    body.position.y += body.velocity.y;
}
