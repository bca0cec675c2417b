//! Lane plans: how a fixed width is split into register groups.
//!
//! A fixed-width kernel runs one full register of the native width first and,
//! when the CPU's lanes fall short of the requested width, further groups
//! cover the gap (16 → 8 → 4 → 2 → scalar). Widths that are not a multiple
//! of the group size finish with a partial group: the next power-of-two
//! register is computed but only `len` lanes are stored.
//!
//! All plans for the named widths are built at compile time into [`TABLE`].

use std::fmt;

use crate::capability::SimdCapability;
use crate::element::Element;

/// Element counts with named fixed-width kernels.
pub const FIXED_WIDTHS: [usize; 5] = [2, 3, 4, 8, 16];

/// Largest width a lane plan covers.
pub const MAX_FIXED_WIDTH: usize = 16;

/// Native lane counts a plan can target: 1, 2, 4, 8, 16.
const LANE_CLASSES: usize = 5;

/// One register operation within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneGroup {
    /// First element index covered.
    pub offset: usize,
    /// Register width used (1 means scalar).
    pub lanes: usize,
    /// Elements stored, `<= lanes`.
    pub len: usize,
}

impl LaneGroup {
    const EMPTY: LaneGroup = LaneGroup {
        offset: 0,
        lanes: 0,
        len: 0,
    };

    /// Whether the register is wider than the elements it stores.
    #[inline]
    pub const fn is_partial(&self) -> bool {
        self.len < self.lanes
    }

    #[inline]
    pub const fn is_scalar(&self) -> bool {
        self.lanes == 1
    }

    /// One past the last element index covered.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Ordered register groups covering `width` elements exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePlan {
    width: usize,
    native_lanes: usize,
    groups: [LaneGroup; MAX_FIXED_WIDTH],
    count: usize,
}

/// Build the plan for `width` elements on a CPU with `native_lanes` lanes.
///
/// # Panics
///
/// Panics if `width > MAX_FIXED_WIDTH` or `native_lanes` is not a power of
/// two no larger than `MAX_FIXED_WIDTH`.
pub const fn plan(width: usize, native_lanes: usize) -> LanePlan {
    assert!(width <= MAX_FIXED_WIDTH, "fixed width exceeds 16 elements");
    assert!(
        native_lanes.is_power_of_two() && native_lanes <= MAX_FIXED_WIDTH,
        "native lane count must be a power of two up to 16"
    );

    let mut groups = [LaneGroup::EMPTY; MAX_FIXED_WIDTH];
    let mut count = 0;
    let mut offset = 0;
    while offset < width {
        let remaining = width - offset;
        let lanes = if remaining >= native_lanes {
            native_lanes
        } else {
            remaining.next_power_of_two()
        };
        let len = if remaining < lanes { remaining } else { lanes };
        groups[count] = LaneGroup { offset, lanes, len };
        count += 1;
        offset += len;
    }

    LanePlan {
        width,
        native_lanes,
        groups,
        count,
    }
}

const fn build_table() -> [[LanePlan; LANE_CLASSES]; FIXED_WIDTHS.len()] {
    let mut table = [[plan(0, 1); LANE_CLASSES]; FIXED_WIDTHS.len()];
    let mut w = 0;
    while w < FIXED_WIDTHS.len() {
        let mut class = 0;
        while class < LANE_CLASSES {
            table[w][class] = plan(FIXED_WIDTHS[w], 1 << class);
            class += 1;
        }
        w += 1;
    }
    table
}

/// Precomputed plans, indexed by `[width index in FIXED_WIDTHS][log2(native lanes)]`.
pub static TABLE: [[LanePlan; LANE_CLASSES]; FIXED_WIDTHS.len()] = build_table();

#[inline]
const fn width_index(width: usize) -> Option<usize> {
    match width {
        2 => Some(0),
        3 => Some(1),
        4 => Some(2),
        8 => Some(3),
        16 => Some(4),
        _ => None,
    }
}

impl LanePlan {
    /// Plan for `width` elements on `native_lanes`, from [`TABLE`] when the
    /// width has a named kernel.
    #[inline]
    pub fn lookup(width: usize, native_lanes: usize) -> LanePlan {
        match width_index(width) {
            Some(w) if native_lanes.is_power_of_two() && native_lanes <= MAX_FIXED_WIDTH => {
                TABLE[w][native_lanes.trailing_zeros() as usize]
            }
            _ => plan(width, native_lanes),
        }
    }

    /// Plan for `width` elements of `T` under `capability`.
    #[inline]
    pub fn for_capability<T: Element>(width: usize, capability: SimdCapability) -> LanePlan {
        Self::lookup(width, capability.lanes::<T>())
    }

    #[inline]
    pub fn groups(&self) -> &[LaneGroup] {
        &self.groups[..self.count]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn native_lanes(&self) -> usize {
        self.native_lanes
    }

    /// Number of register operations the plan issues.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Whether any group stores fewer lanes than it computes.
    pub fn has_partial(&self) -> bool {
        self.groups().iter().any(LaneGroup::is_partial)
    }
}

impl fmt::Display for LanePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{} on {} lanes:", self.width, self.native_lanes)?;
        for g in self.groups() {
            if g.is_partial() {
                write!(f, " [{}..{}) as x{}", g.offset, g.end(), g.lanes)?;
            } else if g.is_scalar() {
                write!(f, " [{}] scalar", g.offset)?;
            } else {
                write!(f, " [{}..{})", g.offset, g.end())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_exactly(p: &LanePlan) {
        let mut next = 0;
        for g in p.groups() {
            assert_eq!(g.offset, next, "gap or overlap in {p}");
            assert!(g.len >= 1 && g.len <= g.lanes);
            assert!(g.lanes.is_power_of_two());
            assert!(g.lanes <= p.native_lanes());
            next = g.end();
        }
        assert_eq!(next, p.width());
    }

    #[test]
    fn every_table_entry_covers_its_width() {
        for row in TABLE.iter() {
            for p in row {
                covers_exactly(p);
            }
        }
    }

    #[test]
    fn width_three_is_one_partial_group_on_wide_cpus() {
        for lanes in [4, 8, 16] {
            let p = plan(3, lanes);
            assert_eq!(
                p.groups(),
                &[LaneGroup {
                    offset: 0,
                    lanes: 4,
                    len: 3
                }]
            );
            assert!(p.has_partial());
        }
    }

    #[test]
    fn width_three_on_two_lanes_finishes_scalar() {
        let p = plan(3, 2);
        assert_eq!(
            p.groups(),
            &[
                LaneGroup {
                    offset: 0,
                    lanes: 2,
                    len: 2
                },
                LaneGroup {
                    offset: 2,
                    lanes: 1,
                    len: 1
                },
            ]
        );
        assert!(!p.has_partial());
    }

    #[test]
    fn width_sixteen_decomposes_by_native_lanes() {
        let offsets = |lanes| plan(16, lanes).groups().iter().map(|g| g.offset).collect::<Vec<_>>();
        assert_eq!(offsets(16), vec![0]);
        assert_eq!(offsets(8), vec![0, 8]);
        assert_eq!(offsets(4), vec![0, 4, 8, 12]);
        assert_eq!(plan(16, 2).len(), 8);
        assert_eq!(plan(16, 1).len(), 16);
    }

    #[test]
    fn narrow_width_on_wide_cpu_uses_narrow_register() {
        let p = plan(2, 16);
        assert_eq!(p.len(), 1);
        assert_eq!(p.groups()[0].lanes, 2);
        let p = plan(8, 16);
        assert_eq!(p.groups()[0].lanes, 8);
    }

    #[test]
    fn lookup_matches_direct_plan() {
        for width in FIXED_WIDTHS {
            for lanes in [1, 2, 4, 8, 16] {
                assert_eq!(LanePlan::lookup(width, lanes), plan(width, lanes));
            }
        }
        assert_eq!(LanePlan::lookup(5, 4), plan(5, 4));
    }

    #[test]
    fn zero_width_is_empty() {
        assert!(plan(0, 4).is_empty());
    }

    #[test]
    fn display_marks_partial_and_scalar_groups() {
        assert_eq!(plan(3, 4).to_string(), "x3 on 4 lanes: [0..3) as x4");
        assert_eq!(plan(3, 2).to_string(), "x3 on 2 lanes: [0..2) [2] scalar");
    }

    #[test]
    #[should_panic(expected = "fixed width exceeds 16")]
    fn oversized_width_panics() {
        let _ = plan(17, 4);
    }
}
