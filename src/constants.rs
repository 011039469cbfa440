//! Fixed capacities for the micro-shader runtime.
//!
//! All of these are hard limits, checked at load time: the embedding
//! scenario wants a predictable memory footprint, so the loader rejects
//! programs that exceed them rather than growing to accommodate them.

/// Longest identifier (function name or variable name), in bytes.
pub const MAX_NAME_LEN: usize = 63;

/// Highest number of variable slots (parameters + locals) a single
/// function may declare.
pub const MAX_VARS: usize = 64;

/// Highest number of functions a single runtime image may hold.
pub const MAX_FUNCTIONS: usize = 128;

/// Depth of the VM's operand stack.
pub const STACK_DEPTH: usize = 64;

/// Largest source text the loader will tokenize, in bytes. Source this
/// large is almost certainly not a hand-written micro-shader; rejecting
/// it up front keeps the loader's own working set bounded regardless of
/// the host's configuration.
pub const MAX_SOURCE_BYTES: usize = 1 << 20;
