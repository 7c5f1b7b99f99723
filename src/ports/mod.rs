//! Ports (trait boundaries) between the core and its collaborators

pub mod observer;

pub use observer::Observer;
