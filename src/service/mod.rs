pub mod calendar_session;
pub mod reflection_service;
