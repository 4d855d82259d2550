// ============================================================
// Layer 7 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one business
// layer:
//
//   config.rs — pipeline thresholds, profile presets and the
//               JSON config file overlay
//
// Reference: Rust Book §7 (Modules)

/// Pipeline thresholds and presets
pub mod config;
