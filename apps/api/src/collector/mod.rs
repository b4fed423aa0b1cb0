// Profile Collector: one in-memory profile per session, edited field by field
// and submitted through a single-slot in-flight guard.

pub mod handlers;
pub mod session;
pub mod store;
pub mod submit;
