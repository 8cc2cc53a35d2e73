pub mod health;
pub mod login;
pub mod logout;
pub mod menu;
pub mod otp;
pub mod pages;
pub mod profile;
pub mod types;
mod utils;
