//! Arithmetic on a fixed-size circular index space.
//!
//! Positions live in `[0, radix)`. Ring positions around the matrix border
//! and compass heading buckets are both expressed this way, so both trackers
//! share these helpers. Every function here is total: a zero radix never
//! divides by zero, it just collapses everything onto position 0.

/// A position on the circle, always in `[0, radix)`.
pub type Position = u16;

/// Short-way rotation between positions, or the sweep through three of them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
    /// No movement at all.
    #[default]
    None,
    /// Diametrically opposite, or a sweep too jumpy to call.
    Indeterminate,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            other => other,
        }
    }

    /// True for `Clockwise` and `CounterClockwise`.
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, Direction::Clockwise | Direction::CounterClockwise)
    }

    /// +1 / -1 for rotations, 0 otherwise.
    #[inline]
    pub fn signum(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
            _ => 0,
        }
    }
}

/// True modulo: the result is never negative.
#[inline]
pub fn normalize(x: i32, radix: u16) -> Position {
    if radix == 0 {
        return 0;
    }
    x.rem_euclid(radix as i32) as Position
}

#[inline]
fn delta(from: Position, to: Position, radix: u16) -> i32 {
    normalize(to as i32 - from as i32, radix) as i32
}

/// Classify the short-way rotation from `a` to `b`.
pub fn compare(a: Position, b: Position, radix: u16) -> Direction {
    let d = delta(a, b, radix);
    if d == 0 {
        return Direction::None;
    }
    let r = radix as i32;
    match (d * 2).cmp(&r) {
        core::cmp::Ordering::Equal => Direction::Indeterminate,
        core::cmp::Ordering::Less => Direction::Clockwise,
        core::cmp::Ordering::Greater => Direction::CounterClockwise,
    }
}

/// Classify the path `a -> b -> c` as one sweep.
///
/// Each leg has to stay within a third of the circle, otherwise the sweep is
/// `Indeterminate`: a big jump between two samples is more likely noise than
/// real motion.
pub fn flow(a: Position, b: Position, c: Position, radix: u16) -> Direction {
    let (a, b, c) = (
        normalize(a as i32, radix),
        normalize(b as i32, radix),
        normalize(c as i32, radix),
    );
    if a == b && b == c {
        return Direction::None;
    }
    let third = radix as i32 / 3;
    if delta(a, b, radix) <= third && delta(b, c, radix) <= third {
        return Direction::Clockwise;
    }
    if delta(b, a, radix) <= third && delta(c, b, radix) <= third {
        return Direction::CounterClockwise;
    }
    Direction::Indeterminate
}

/// One step from `p` in `direction`. Non-rotations leave `p` where it is.
#[inline]
pub fn advance(p: Position, direction: Direction, radix: u16) -> Position {
    normalize(p as i32 + direction.signum(), radix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_true_modulo() {
        assert_eq!(normalize(-1, 18), 17);
        assert_eq!(normalize(-18, 18), 0);
        assert_eq!(normalize(-37, 18), 17);
        assert_eq!(normalize(40, 18), 4);
        assert_eq!(normalize(i32::MIN, 18), normalize(i32::MIN % 18, 18));
    }

    #[test]
    fn normalize_stays_in_range_and_is_periodic() {
        for r in 1..40u16 {
            for x in -200..200 {
                let n = normalize(x, r);
                assert!(n < r);
                assert_eq!(normalize(x + r as i32, r), n);
            }
        }
    }

    #[test]
    fn zero_radix_is_total() {
        assert_eq!(normalize(7, 0), 0);
        assert_eq!(compare(3, 5, 0), Direction::None);
        assert_eq!(flow(1, 2, 3, 0), Direction::None);
        assert_eq!(advance(4, Direction::Clockwise, 0), 0);
    }

    #[test]
    fn compare_short_way() {
        assert_eq!(compare(5, 5, 18), Direction::None);
        assert_eq!(compare(5, 6, 18), Direction::Clockwise);
        assert_eq!(compare(6, 5, 18), Direction::CounterClockwise);
        assert_eq!(compare(17, 1, 18), Direction::Clockwise);
        assert_eq!(compare(1, 17, 18), Direction::CounterClockwise);
        assert_eq!(compare(0, 9, 18), Direction::Indeterminate);
        assert_eq!(compare(9, 0, 18), Direction::Indeterminate);
    }

    #[test]
    fn compare_is_antisymmetric_off_the_antipode() {
        for r in [5u16, 17, 18, 36] {
            for a in 0..r {
                for b in 0..r {
                    let ab = compare(a, b, r);
                    if a == b || ab == Direction::Indeterminate {
                        continue;
                    }
                    assert_eq!(compare(b, a, r), ab.opposite(), "a={a} b={b} r={r}");
                }
            }
        }
    }

    #[test]
    fn odd_radix_has_no_antipode() {
        for a in 0..17 {
            for b in 0..17 {
                assert_ne!(compare(a, b, 17), Direction::Indeterminate);
            }
        }
    }

    #[test]
    fn flow_of_a_single_point_is_none() {
        for r in 1..30u16 {
            for a in 0..r {
                assert_eq!(flow(a, a, a, r), Direction::None);
            }
        }
    }

    #[test]
    fn flow_follows_small_sweeps() {
        assert_eq!(flow(5, 5, 6, 18), Direction::Clockwise);
        assert_eq!(flow(4, 5, 5, 18), Direction::Clockwise);
        assert_eq!(flow(17, 0, 1, 18), Direction::Clockwise);
        assert_eq!(flow(6, 5, 5, 18), Direction::CounterClockwise);
        assert_eq!(flow(1, 0, 17, 18), Direction::CounterClockwise);
        // each leg is exactly a third
        assert_eq!(flow(0, 6, 12, 18), Direction::Clockwise);
    }

    #[test]
    fn flow_rejects_jumps_and_reversals() {
        assert_eq!(flow(0, 7, 8, 18), Direction::Indeterminate);
        assert_eq!(flow(6, 5, 7, 18), Direction::Indeterminate);
        assert_eq!(flow(3, 0, 3, 18), Direction::Indeterminate);
    }

    #[test]
    fn advance_wraps() {
        assert_eq!(advance(17, Direction::Clockwise, 18), 0);
        assert_eq!(advance(0, Direction::CounterClockwise, 18), 17);
        assert_eq!(advance(4, Direction::Indeterminate, 18), 4);
        assert_eq!(advance(4, Direction::None, 18), 4);
    }
}
