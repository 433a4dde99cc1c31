// Application layer: interactive front ends built on core.

pub mod session;
