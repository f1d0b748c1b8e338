//! Rubric-driven essay feedback.

pub mod handlers;
pub mod prompts;
pub mod requester;
pub mod rubric;
