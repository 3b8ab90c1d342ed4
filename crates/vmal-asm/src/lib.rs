pub mod listing;

// Re-export commonly used types/functions for consumers
pub use listing::{Listing, ListingLine};
