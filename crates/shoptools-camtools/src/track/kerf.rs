//! Kerf compensation for runs of connected plots
//!
//! Offsetting each line on its own leaves the offset lines overlapping at
//! inside corners and apart at outside corners. A run of connected plots is
//! offset as one path instead: inside corners are trimmed to where the
//! offset lines cross and outside corners are mitred, or squared off when
//! the miter would reach too far.

use shoptools_core::geometry::{line_intersection, DirectionLeftRight, Point};

/// Longest miter allowed, in multiples of the kerf clearance
pub const MITER_LIMIT: f64 = 4.0;

/// A plot's nominal line and the side of it the tool rides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerfLine {
    pub side: DirectionLeftRight,
    pub clearance: f64,
    pub start: Point,
    pub end: Point,
}

/// Compensated line plus the corner moves that lead to the next line
#[derive(Debug, Clone, PartialEq)]
pub struct KerfPath {
    pub start: Point,
    pub end: Point,
    /// Points to feed through after `end`
    pub join: Vec<Point>,
}

impl KerfLine {
    fn offset(&self) -> (Point, Point) {
        self.side.offset_line(self.start, self.end, self.clearance)
    }

    /// Whether `next` picks up where this line ends on the same side
    pub fn continues_into(&self, next: &KerfLine) -> bool {
        self.side == next.side
            && (self.clearance - next.clearance).abs() <= f64::EPSILON
            && self.end.approx_eq(&next.start)
    }

    fn direction(&self) -> (f64, f64) {
        let length = self.start.distance_to(&self.end);
        if length == 0.0 {
            return (0.0, 0.0);
        }
        (
            (self.end.x - self.start.x) / length,
            (self.end.y - self.start.y) / length,
        )
    }

    /// Whether turning onto `next` bends toward the side being cut from
    fn turns_inward(&self, next: &KerfLine) -> bool {
        let (ax, ay) = self.direction();
        let (bx, by) = next.direction();
        let turn = ax * by - ay * bx;
        match self.side {
            DirectionLeftRight::Left => turn > 0.0,
            DirectionLeftRight::Right => turn < 0.0,
            DirectionLeftRight::None => false,
        }
    }
}

/// Offset a run of connected lines as one continuous path
///
/// With `closed` the last line also joins back onto the first.
pub fn offset_chain(lines: &[KerfLine], closed: bool) -> Vec<KerfPath> {
    let offsets: Vec<(Point, Point)> = lines.iter().map(KerfLine::offset).collect();
    let mut paths: Vec<KerfPath> = offsets
        .iter()
        .map(|(start, end)| KerfPath {
            start: *start,
            end: *end,
            join: Vec::new(),
        })
        .collect();

    let count = lines.len();
    let joints = if closed && count > 1 {
        count
    } else {
        count.saturating_sub(1)
    };

    for index in 0..joints {
        let next = (index + 1) % count;
        let (a0, a1) = offsets[index];
        let (b0, b1) = offsets[next];
        let (line, following) = (&lines[index], &lines[next]);

        if a1.approx_eq(&b0) {
            paths[next].start = paths[index].end;
            continue;
        }

        let corner = line_intersection(a0, a1, b0, b1).filter(|corner| {
            line.turns_inward(following)
                || corner.distance_to(&line.end) <= MITER_LIMIT * line.clearance
        });
        match corner {
            Some(corner) => {
                paths[index].end = corner;
                paths[next].start = corner;
            }
            None => {
                // Square off: run past each end by the clearance
                let (ax, ay) = line.direction();
                let (bx, by) = following.direction();
                let c = line.clearance;
                paths[index].join = vec![
                    a1.translated(ax * c, ay * c),
                    b0.translated(-bx * c, -by * c),
                    b0,
                ];
            }
        }
    }
    paths
}
