//! Workspace meta-package.
//!
//! Exists to anchor workspace-level tooling (git hooks via cargo-husky).
//! The protocol crates live under `crates/`.
