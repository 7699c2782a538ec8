//! # Card Viewer
//!
//! Fetch, normalize, render, and search a collection of evidence cards.
//!
//! Cards are fetched once from `GET /api/cards`, normalized into a single
//! view model regardless of which field-naming convention the backend
//! used, rendered into a declarative view tree, and filtered client-side
//! with a debounced substring search.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌──────────┐   ┌──────────┐
//! │ CardSource │──▶│ Normalizer │──▶│  Filter  │──▶│ Renderer │──▶ Surface
//! │ HTTP/static│   │ field table│   │ substring│   │ template │   terminal/
//! └────────────┘   └────────────┘   └────▲─────┘   └──────────┘   memory/html
//!                                        │
//!                               Debouncer ◀── input events
//! ```
//!
//! Host-agnostic pieces live in `card-viewer-core`; this crate adds the
//! native host: configuration, HTTP, the debounced controller, and the CLI.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`controller`] | Fetch/init state machine and debounced search loop |
//! | [`debounce`] | Cancellable delayed delivery |
//! | [`error`] | Native error type |
//! | [`http`] | HTTP card source |
//! | [`terminal`] | Plain-text surface |
//! | [`list`] | `cards list` |
//! | [`watch`] | `cards watch` |
//! | [`export`] | `cards export` |

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod export;
pub mod http;
pub mod list;
pub mod terminal;
pub mod watch;
