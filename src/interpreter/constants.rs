// Constants for the interpreter

/// Function called with no arguments once the globals are bound
pub const ENTRY_POINT: &str = "main";

/// Name of the formatted-output intrinsic
pub const PRINTF: &str = "printf";

/// Default bound on nested function calls.
/// Each interpreted call costs several host stack frames, so this must stay
/// well inside a 2 MiB thread stack in a debug build even when the recursive
/// call sits under nested blocks and loops.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 48;

/// Default bound on the number of elements in one array
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1 << 20;
