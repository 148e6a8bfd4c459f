//! Screen offset to gesture/look direction.
//!
//! Screen Y grows downward and directions are named from the agent's point
//! of view, so a target to the screen's right is the agent's `Left`. The
//! angle of the offset is measured with `atan2` in degrees, in `(-180, 180]`,
//! and bucketed with half-open ranges `(low, high]`:
//!
//! | 4-way   | range                      | 8-way     | range                          |
//! |---------|----------------------------|-----------|--------------------------------|
//! | `Left`  | `(-45, 45]`                | `Left`    | `(-22.5, 22.5]`                |
//! | `Down`  | `(45, 135]`                | `DownLeft`| `(22.5, 67.5]`                 |
//! | `Right` | `(135, 180]`, `[-180, -135]` | `Down`  | `(67.5, 112.5]`                |
//! | `Up`    | `(-135, -45]`              | `DownRight`| `(112.5, 157.5]`              |
//! |         |                            | `Right`   | `(157.5, 180]`, `[-180, -157.5]` |
//! |         |                            | `UpRight` | `(-157.5, -112.5]`             |
//! |         |                            | `Up`      | `(-112.5, -67.5]`              |
//! |         |                            | `UpLeft`  | `(-67.5, -22.5]`               |

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Name suffix used by animation names (`"Gesture" + "Left"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::UpLeft => "UpLeft",
            Direction::UpRight => "UpRight",
            Direction::DownLeft => "DownLeft",
            Direction::DownRight => "DownRight",
        }
    }

    /// Bucket an angle in degrees, `(-180, 180]`.
    pub fn from_angle(angle: f64, granular: bool) -> Direction {
        if granular {
            if angle > -22.5 && angle <= 22.5 {
                Direction::Left
            } else if angle > 22.5 && angle <= 67.5 {
                Direction::DownLeft
            } else if angle > 67.5 && angle <= 112.5 {
                Direction::Down
            } else if angle > 112.5 && angle <= 157.5 {
                Direction::DownRight
            } else if angle > -157.5 && angle <= -112.5 {
                Direction::UpRight
            } else if angle > -112.5 && angle <= -67.5 {
                Direction::Up
            } else if angle > -67.5 && angle <= -22.5 {
                Direction::UpLeft
            } else {
                Direction::Right
            }
        } else if angle > -45.0 && angle <= 45.0 {
            Direction::Left
        } else if angle > 45.0 && angle <= 135.0 {
            Direction::Down
        } else if angle > -135.0 && angle <= -45.0 {
            Direction::Up
        } else {
            Direction::Right
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Angle of `target - origin` in degrees.
pub fn angle_between(origin: ScreenPoint, target: ScreenPoint) -> f64 {
    let dx = f64::from(target.x) - f64::from(origin.x);
    let dy = f64::from(target.y) - f64::from(origin.y);
    (180.0 * dy.atan2(dx)) / std::f64::consts::PI
}

/// Direction from `origin` towards `target`; 8-way when `granular`.
pub fn resolve(origin: ScreenPoint, target: ScreenPoint, granular: bool) -> Direction {
    Direction::from_angle(angle_between(origin, target), granular)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: ScreenPoint = ScreenPoint::new(0, 0);

    fn four(x: i32, y: i32) -> Direction {
        resolve(ORIGIN, ScreenPoint::new(x, y), false)
    }

    fn eight(x: i32, y: i32) -> Direction {
        resolve(ORIGIN, ScreenPoint::new(x, y), true)
    }

    #[test]
    fn cardinal_offsets_four_way() {
        assert_eq!(four(10, 0), Direction::Left);
        assert_eq!(four(0, 10), Direction::Down);
        assert_eq!(four(-10, 0), Direction::Right);
        assert_eq!(four(0, -10), Direction::Up);
    }

    #[test]
    fn diagonal_offsets_land_on_lower_bucket() {
        // Exactly 45, 135, -45 and -135 degrees.
        assert_eq!(four(10, 10), Direction::Left);
        assert_eq!(four(-10, 10), Direction::Down);
        assert_eq!(four(10, -10), Direction::Up);
        assert_eq!(four(-10, -10), Direction::Right);
    }

    #[test]
    fn four_way_boundaries() {
        assert_eq!(Direction::from_angle(45.0, false), Direction::Left);
        assert_eq!(Direction::from_angle(45.0001, false), Direction::Down);
        assert_eq!(Direction::from_angle(-45.0, false), Direction::Up);
        assert_eq!(Direction::from_angle(-44.9999, false), Direction::Left);
        assert_eq!(Direction::from_angle(135.0, false), Direction::Down);
        assert_eq!(Direction::from_angle(135.0001, false), Direction::Right);
        assert_eq!(Direction::from_angle(-135.0, false), Direction::Right);
        assert_eq!(Direction::from_angle(-134.9999, false), Direction::Up);
        assert_eq!(Direction::from_angle(180.0, false), Direction::Right);
        assert_eq!(Direction::from_angle(-180.0, false), Direction::Right);
    }

    #[test]
    fn eight_way_sectors() {
        assert_eq!(eight(10, 0), Direction::Left);
        assert_eq!(eight(10, 10), Direction::DownLeft);
        assert_eq!(eight(0, 10), Direction::Down);
        assert_eq!(eight(-10, 10), Direction::DownRight);
        assert_eq!(eight(-10, 0), Direction::Right);
        assert_eq!(eight(-10, -10), Direction::UpRight);
        assert_eq!(eight(0, -10), Direction::Up);
        assert_eq!(eight(10, -10), Direction::UpLeft);
    }

    #[test]
    fn eight_way_boundaries() {
        assert_eq!(Direction::from_angle(22.5, true), Direction::Left);
        assert_eq!(Direction::from_angle(-22.5, true), Direction::UpLeft);
        assert_eq!(Direction::from_angle(67.5, true), Direction::DownLeft);
        assert_eq!(Direction::from_angle(112.5, true), Direction::Down);
        assert_eq!(Direction::from_angle(157.5, true), Direction::DownRight);
        assert_eq!(Direction::from_angle(157.5001, true), Direction::Right);
        assert_eq!(Direction::from_angle(-157.5, true), Direction::Right);
        assert_eq!(Direction::from_angle(-112.5, true), Direction::UpRight);
        assert_eq!(Direction::from_angle(-67.5, true), Direction::Up);
    }

    #[test]
    fn same_point_is_left() {
        assert_eq!(four(0, 0), Direction::Left);
        assert_eq!(eight(0, 0), Direction::Left);
    }

    #[test]
    fn offset_is_relative_to_origin() {
        let origin = ScreenPoint::new(100, 100);
        assert_eq!(
            resolve(origin, ScreenPoint::new(100, 40), false),
            Direction::Up
        );
        assert_eq!(
            resolve(origin, ScreenPoint::new(160, 160), true),
            Direction::DownLeft
        );
    }

    #[test]
    fn display_matches_animation_suffix() {
        assert_eq!(format!("Gesture{}", Direction::Right), "GestureRight");
        assert_eq!(format!("Look{}", Direction::DownLeft), "LookDownLeft");
    }
}
