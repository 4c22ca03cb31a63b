//! E2E scenarios.

mod comment_threads;
mod login;
