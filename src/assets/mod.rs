/// Source image loading and the derived red baseline.
pub mod source;
