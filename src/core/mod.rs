//! Core contracts and pure text helpers.

pub mod component;
pub mod text;
