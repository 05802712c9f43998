// Simple particle struct to keep track of individual position, velocity, size, opacity and color

use crate::color::Color;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64, opacity: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
            color,
        }
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, other.pos))
    }

    // Reflects a velocity component when the next step would leave [0, max].
    // The sign is pointed back inside rather than toggled, so a particle left
    // outside by a shrinking surface drifts back instead of jittering on the edge.
    pub(crate) fn reflect_axis(&mut self, axis: usize, max: f64) {
        let next = self.pos[axis] + self.vel[axis];
        if next < 0.0 {
            self.vel[axis] = self.vel[axis].abs();
        } else if next > max {
            self.vel[axis] = -self.vel[axis].abs();
        }
    }
}

/// Drawable dimensions of a surface, in css pixels
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }

    pub fn contains(&self, pos: Vector2<f64>) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width && pos[1] >= 0.0 && pos[1] <= self.height
    }
}
