pub mod admin;
pub mod auth;
pub mod browse;
pub mod contact;
