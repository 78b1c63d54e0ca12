//! Route handlers organized by area

pub mod board;
pub mod health;
pub mod member;
