use crate::category::AnimationCategory;

/// Errors raised by registration and per-frame animation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    /// The descriptor's variant does not belong to the category it was filed under.
    #[error("descriptor for {found} registered under {expected}")]
    CategoryMismatch {
        expected: AnimationCategory,
        found: AnimationCategory,
    },

    /// The render-state block was already borrowed when the update ran.
    #[error("render state for {category} entity '{id}' is busy")]
    StateBusy {
        category: AnimationCategory,
        id: String,
    },
}
