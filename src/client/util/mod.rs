pub mod api;
pub mod realtime;
