//! Clients for third-party services

pub mod nominatim;

pub use nominatim::{NominatimClient, NominatimDistance};
