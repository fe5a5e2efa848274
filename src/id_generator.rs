use std::sync::atomic::{AtomicUsize, Ordering};

// Single static counter for all strokes
static NEXT_STROKE_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_stroke_id() -> usize {
    NEXT_STROKE_ID.fetch_add(1, Ordering::SeqCst)
}

/// Short random suffix used to disambiguate attachment ids.
///
/// Nine lowercase hex characters taken from a v4 UUID.
pub fn random_suffix() -> String {
    let mut suffix = uuid::Uuid::new_v4().simple().to_string();
    suffix.truncate(9);
    suffix
}
