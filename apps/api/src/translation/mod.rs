//! On-demand Korean→English phrase translation.

pub mod handlers;
pub mod prompts;
pub mod requester;
