//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Load items and parse screens...
//! }
//! ```
//!
//! Use the constants in [`targets`] with `tracing` directives to filter logs
//! by subsystem, e.g. `RUST_LOG=trellis_core::loader=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Item model target (value changes, command execution).
    pub const ITEMS: &str = "trellis_core::items";
    /// Items loader target.
    pub const LOADER: &str = "trellis_core::loader";
    /// Control descriptor compiler target.
    pub const PARSER: &str = "trellis::parser";
    /// Control instance lifecycle target.
    pub const INSTANCE: &str = "trellis::instance";
}
