// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish a
// specific goal (answering one question, or a list of them).
//
// Rules for this layer:
//   - No ranking math or model calls here (Layers 5 and 6)
//   - No printing here (that's Layer 1)
//   - No direct file parsing of the store (that's Layer 4)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The question → answer decision tree
pub mod ask_use_case;

// Many questions in one run
pub mod batch_use_case;
