//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitlog_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("habitlog_core version={}", habitlog_core::core_version());
}
