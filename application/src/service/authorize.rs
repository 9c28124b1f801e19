use error_stack::Report;

use kernel::prelude::entity::{Principal, Review, ReviewId, UserRole};
use kernel::KernelError;

pub(crate) fn require_admin(principal: &Principal) -> error_stack::Result<(), KernelError> {
    if principal.has_role(&[UserRole::Admin]) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %principal.id().as_ref(),
        "Rejected book mutation from non-admin"
    );
    Err(Report::new(KernelError::Forbidden).attach_printable("admin role required"))
}

/// Reviews that belong to someone else are reported exactly like missing ones.
/// Admins get no exception.
pub(crate) fn require_author(
    principal: &Principal,
    id: &ReviewId,
    review: Option<Review>,
) -> error_stack::Result<Review, KernelError> {
    match review {
        Some(review) if review.user_id() == principal.id() => Ok(review),
        found => {
            if found.is_some() {
                tracing::debug!(
                    review_id = %id.as_ref(),
                    user_id = %principal.id().as_ref(),
                    "Rejected review mutation from non-author"
                );
            }
            Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("review {} not found", id.as_ref())))
        }
    }
}
