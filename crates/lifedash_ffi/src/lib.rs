//! Host-facing bindings for LifeDash core.

pub mod api;
