#![deny(warnings)]
pub mod consts;
pub mod game;
pub mod model;
