//! CPU backend implementations.

mod hierarchy;
