//! Culling decisions and the reasons behind them.

use std::fmt;

/// Why a face was culled (or `Visible` when it was kept).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CullReason {
    /// Face is rendered.
    Visible = 0,
    /// Two foliage layers in front of the face.
    Hollow = 1,
    /// Block beyond the face is enclosed on all six sides.
    Enclosed = 2,
    /// Block beyond the face is enclosed on all four horizontal sides.
    EnclosedHorizontal = 3,
    /// Neighborhood beyond the face is dense foliage.
    Dense = 4,
    /// Face is far from the camera and backed by foliage.
    Distant = 5,
    /// Ray along the normal is mostly blocked.
    Occluded = 6,
    /// Face is backed by foliage and sits in the dark.
    Dark = 7,
    /// Block is interior to a foliage mass.
    Interior = 8,
    /// Foliage along the normal is deep.
    Deep = 9,
    /// Immediate neighbor hides the face.
    Adjacent = 10,
}

impl CullReason {
    /// Number of reasons.
    pub const COUNT: usize = 11;

    /// All reasons in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Visible,
        Self::Hollow,
        Self::Enclosed,
        Self::EnclosedHorizontal,
        Self::Dense,
        Self::Distant,
        Self::Occluded,
        Self::Dark,
        Self::Interior,
        Self::Deep,
        Self::Adjacent,
    ];

    /// Index of this reason in histograms.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short tag used in reports.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hollow => "hollow",
            Self::Enclosed => "enclosed",
            Self::EnclosedHorizontal => "enclosed_h",
            Self::Dense => "dense",
            Self::Distant => "distant",
            Self::Occluded => "occluded",
            Self::Dark => "dark",
            Self::Interior => "interior",
            Self::Deep => "deep",
            Self::Adjacent => "adjacent",
        }
    }
}

impl fmt::Display for CullReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of one heuristic evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CullDecision {
    /// True if the face must not be emitted.
    pub should_cull: bool,
    /// Why.
    pub reason: CullReason,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

impl CullDecision {
    /// Render the face.
    pub const RENDER: Self = Self::keep(1.0);
    /// Two foliage layers in front.
    pub const HOLLOW: Self = Self::cull(CullReason::Hollow, 0.8);
    /// Fully enclosed neighbor.
    pub const ENCLOSED: Self = Self::cull(CullReason::Enclosed, 1.0);
    /// Horizontally enclosed neighbor.
    pub const ENCLOSED_HORIZONTAL: Self = Self::cull(CullReason::EnclosedHorizontal, 0.85);
    /// Interior of a foliage mass.
    pub const INTERIOR: Self = Self::cull(CullReason::Interior, 0.95);
    /// Hidden by the immediate neighbor.
    pub const ADJACENT: Self = Self::cull(CullReason::Adjacent, 0.6);

    /// A culling decision.
    #[inline]
    #[must_use]
    pub const fn cull(reason: CullReason, confidence: f32) -> Self {
        Self {
            should_cull: true,
            reason,
            confidence,
        }
    }

    /// A render decision with the given confidence.
    #[inline]
    #[must_use]
    pub const fn keep(confidence: f32) -> Self {
        Self {
            should_cull: false,
            reason: CullReason::Visible,
            confidence,
        }
    }
}

impl Default for CullDecision {
    fn default() -> Self {
        Self::RENDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_indices_match_table() {
        for (i, reason) in CullReason::ALL.iter().enumerate() {
            assert_eq!(reason.index(), i);
        }
    }

    #[test]
    fn test_canonical_decisions() {
        assert!(!CullDecision::RENDER.should_cull);
        assert_eq!(CullDecision::RENDER.reason, CullReason::Visible);
        assert!(CullDecision::ENCLOSED.should_cull);
        assert_eq!(CullDecision::ADJACENT.reason.tag(), "adjacent");
    }
}
