//! ANSI escape codes used for terminal styling

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const REVERSE: &str = "\x1b[7m";

pub const FG_YELLOW: &str = "\x1b[33m";
