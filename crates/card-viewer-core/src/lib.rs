//! # Card Viewer Core
//!
//! Host-agnostic logic for Card Viewer: raw card normalization, pill
//! extraction, card rendering into a view tree, client-side search, and
//! the source/surface abstractions the native host plugs into.
//!
//! This crate contains no tokio, reqwest, filesystem I/O, or other
//! native-only dependencies. It compiles to both native targets and
//! `wasm32-unknown-unknown`.

pub mod filter;
pub mod models;
pub mod normalize;
pub mod pills;
pub mod render;
pub mod source;
pub mod state;
pub mod surface;

#[cfg(test)]
mod tests {
    #[test]
    fn test_package_description_is_plain_text() {
        let description = env!("CARGO_PKG_DESCRIPTION");
        assert!(description.is_ascii(), "{}", description);
        assert!(description.starts_with("Core library for Card Viewer - "));
    }
}
