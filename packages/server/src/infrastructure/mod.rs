//! Infrastructure layer: concrete registry, transport and wire formats.

pub mod dto;
pub mod registry;
pub mod transport;
