#![allow(dead_code)]

pub mod session_mock;
pub mod transport_mock;
