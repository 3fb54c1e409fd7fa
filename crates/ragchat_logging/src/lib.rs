#![deny(missing_docs)]
//! Shared logging utilities for the chat client workspace.
//!
//! This crate provides the `rag_*` logging macros used across the codebase
//! (callers need no direct `log` dependency),
//! a helper for keeping user text short in log lines, and a minimal test
//! initializer for the global logger.

use std::borrow::Cow;

#[doc(hidden)]
pub use log as __log;

/// Default number of characters kept by [`preview`] call sites.
pub const PREVIEW_CHARS: usize = 80;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! rag_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! rag_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! rag_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! rag_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! rag_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Shortens `text` to at most `max_chars` characters for a single log line.
///
/// Newlines are flattened to spaces and a trailing `…` marks a cut. Text that
/// already fits is borrowed unchanged.
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    let fits = text.chars().count() <= max_chars;
    if fits && !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    let mut out: String = text
        .chars()
        .take(max_chars)
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect();
    if !fits {
        out.push('…');
    }
    Cow::Owned(out)
}

/// Routes the client's own log lines through the test harness output.
///
/// Lines go through `println!`, so `cargo test` only shows them for failing
/// tests. Calling this more than once is harmless.
pub fn initialize_for_tests() {
    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("ragchat")
        .build();
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, config);
}

#[cfg(test)]
mod tests {
    use super::preview;
    use std::borrow::Cow;

    #[test]
    fn short_single_line_is_borrowed() {
        assert!(matches!(preview("hello", 10), Cow::Borrowed("hello")));
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        assert_eq!(preview("abcdefgh", 3), "abc…");
    }

    #[test]
    fn newlines_are_flattened() {
        assert_eq!(preview("a\nb", 10), "a b");
    }

    #[test]
    fn cut_respects_char_boundaries() {
        assert_eq!(preview("ééé", 2), "éé…");
    }
}
