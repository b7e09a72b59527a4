//! Route handlers registered by the default blueprints.

pub mod health;
