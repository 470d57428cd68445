use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A circle found by the detector, in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl Circle {
    pub fn new(x: u32, y: u32, radius: u32) -> Self {
        Self { x, y, radius }
    }

    /// Squared distance between the two centers.
    pub fn center_dist_sq(&self, other: &Circle) -> u64 {
        let dx = self.x.abs_diff(other.x) as u64;
        let dy = self.y.abs_diff(other.y) as u64;
        dx * dx + dy * dy
    }

    /// Top-to-bottom, then left-to-right.
    pub fn reading_order(&self, other: &Circle) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// Half of the page a circle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Left when the center lies strictly before the horizontal midpoint
    /// (`width / 2`, integer division).
    pub fn of(circle: &Circle, image_width: u32) -> Side {
        if circle.x < image_width / 2 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circles of one page split into columns, each in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Columns {
    pub left: Vec<Circle>,
    pub right: Vec<Circle>,
}

impl Columns {
    pub fn side(&self, side: Side) -> &[Circle] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

/// Split circles at the page midpoint and sort each column by `(y, x)`.
pub fn partition_columns(circles: &[Circle], image_width: u32) -> Columns {
    let mut sorted = circles.to_vec();
    sorted.sort_by(Circle::reading_order);

    let (left, right): (Vec<Circle>, Vec<Circle>) = sorted
        .into_iter()
        .partition(|c| Side::of(c, image_width) == Side::Left);
    Columns { left, right }
}
