//! Records Entity Module

pub mod lab_record;

pub use lab_record::*;
