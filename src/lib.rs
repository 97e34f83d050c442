//! Zhlift - migrate hardcoded Chinese text to runtime i18n calls
//!
//! Zhlift scans JS/TS/JSX/TSX sources, finds Chinese text embedded in code
//! and JSX, and rewrites each occurrence into a call to a runtime translation
//! function (`i18n.t` by default). The original text, with embedded variables
//! replaced by named placeholders, is extracted into a persisted resource map
//! keyed by stable monotonic identifiers, so repeated runs never re-key
//! strings that already have a translation entry.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (migrate / sync / init commands)
//! - `config`: Configuration file loading and parsing
//! - `engine`: Core extraction engine (root resolution, classification, rewriting)
//! - `store`: Persisted key/template store and locale map sync
//! - `syntax`: Parsing and lowering into the owned syntax arena
//! - `file_scanner`: Source file discovery
//! - `reporter`: Diagnostic output formatting

pub mod cli;
pub mod config;
pub mod engine;
pub mod file_scanner;
pub mod reporter;
pub mod store;
pub mod syntax;
pub mod utils;
