pub mod auth;
pub mod documents;
pub mod messages;
pub mod profile;
pub mod projects;
pub mod services;
pub mod settings;
pub mod uploads;
