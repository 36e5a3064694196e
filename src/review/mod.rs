//! Review request construction and batch submission.

pub mod document;
pub mod search;
pub mod submit;

pub use document::{DocumentBuilder, ReviewDocument};
pub use submit::{Submitter, MAX_REVIEWS_PER_RUN};
