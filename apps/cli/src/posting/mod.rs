//! Job posting pipeline: fetch a posting URL, reduce it to visible text, and
//! filter it down to the sentences that actually describe the role.

pub mod fetch;
pub mod filter;
pub mod normalize;

pub use fetch::scrape_posting;
pub use filter::{FilterPolicy, PostingFilter};
