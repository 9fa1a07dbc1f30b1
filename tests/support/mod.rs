#![allow(dead_code)]

pub mod airlens_env;
pub mod fixtures;
pub mod http;
