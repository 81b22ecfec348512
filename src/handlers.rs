pub mod auth;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod requests;
pub mod users;
