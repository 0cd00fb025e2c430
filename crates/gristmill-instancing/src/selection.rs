/// What to do with a pick that lands on a culled (zero-scaled) slot.
///
/// Culled slots rasterise nothing, so a hit on one can only come from a
/// pick made against stale geometry, such as a ray cast before the cull
/// pass ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CulledSelection {
    /// Reject the pick. Static parts of the same machine stay selectable.
    #[default]
    Ignore,
    /// Dispatch the pick as if the slot were visible.
    Allow,
}

impl CulledSelection {
    /// Policy for the `select_culled` config switch.
    pub fn from_allow(allow: bool) -> Self {
        if allow {
            CulledSelection::Allow
        } else {
            CulledSelection::Ignore
        }
    }
}
