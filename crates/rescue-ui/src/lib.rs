#![deny(warnings)]
pub mod layout;
pub mod resource;
pub mod theme;
