//! Generic banded lookup shared by every underwriting table.
//!
//! A table is a list of bands sorted by ascending lower edge. A value resolves
//! to the last band whose lower edge admits it, so the bands are half-open
//! intervals that tile the domain from the first edge upward with no gaps.

use rust_decimal::Decimal;

/// Lower edge of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `x >= bound`
    AtLeast(Decimal),
    /// `x > bound`
    Above(Decimal),
}

impl Edge {
    pub fn bound(self) -> Decimal {
        match self {
            Edge::AtLeast(b) | Edge::Above(b) => b,
        }
    }

    pub fn admits(self, x: Decimal) -> bool {
        match self {
            Edge::AtLeast(b) => x >= b,
            Edge::Above(b) => x > b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<T> {
    pub edge: Edge,
    pub value: T,
}

/// Resolve `x` against `table`. Returns `None` only when `x` lies below the
/// first edge.
pub fn lookup<T: Copy>(table: &[Band<T>], x: Decimal) -> Option<T> {
    table
        .iter()
        .rev()
        .find(|band| band.edge.admits(x))
        .map(|band| band.value)
}

/// Lower-edge bounds of every band, in table order.
pub fn boundaries<T>(table: &[Band<T>]) -> Vec<Decimal> {
    table.iter().map(|band| band.edge.bound()).collect()
}

/// True when the lower edges strictly ascend. Equal bounds are allowed only
/// as an `AtLeast` followed by an `Above`, which splits a single point.
pub fn is_well_ordered<T>(table: &[Band<T>]) -> bool {
    table.windows(2).all(|pair| {
        let (lo, hi) = (pair[0].edge, pair[1].edge);
        lo.bound() < hi.bound()
            || (lo.bound() == hi.bound()
                && matches!((lo, hi), (Edge::AtLeast(_), Edge::Above(_))))
    })
}
