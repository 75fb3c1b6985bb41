//! Fusion rules applied when an overlap transfer lands on a destination sample.

/// How an incoming sample is merged into the destination.
pub trait Delta<V>: Sized {
    /// What travels from the source sample (often `V` itself).
    type Part;

    /// Read the travelling part of a source sample.
    fn restrict(v: &V) -> Self::Part;

    /// Merge an incoming part into the destination sample.
    fn fuse(local: &mut V, incoming: Self::Part);
}

/// Overwrite the destination (ghost refresh).
#[derive(Copy, Clone, Debug, Default)]
pub struct CopyDelta;

impl<V: Clone> Delta<V> for CopyDelta {
    type Part = V;
    #[inline]
    fn restrict(v: &V) -> V {
        v.clone()
    }
    #[inline]
    fn fuse(local: &mut V, incoming: V) {
        *local = incoming;
    }
}

/// Add into the destination, for quantities deposited on both sides of a
/// patch border (moments, currents).
#[derive(Copy, Clone, Debug, Default)]
pub struct AddDelta;

impl<V> Delta<V> for AddDelta
where
    V: std::ops::AddAssign + Copy,
{
    type Part = V;
    #[inline]
    fn restrict(v: &V) -> V {
        *v
    }
    #[inline]
    fn fuse(local: &mut V, incoming: V) {
        *local += incoming;
    }
}
