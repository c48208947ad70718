//! サーバーAPI

pub mod evaluate;
