//! Flutter bridge for SnapList core.

pub mod api;
