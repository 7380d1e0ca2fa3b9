//! Status icons shared by every command's output.

use console::{style, StyledObject};

/// Green ✓ for completed work.
pub fn success() -> StyledObject<&'static str> {
    style("✓").green()
}

/// Cyan → for work about to start.
pub fn info() -> StyledObject<&'static str> {
    style("→").cyan()
}

/// Yellow ! for skipped or degraded work.
pub fn warn() -> StyledObject<&'static str> {
    style("!").yellow()
}

/// Red ✗ for failures.
pub fn error() -> StyledObject<&'static str> {
    style("✗").red()
}

/// Dim → for detail lines under a status line.
pub fn dim_arrow() -> StyledObject<&'static str> {
    style("→").dim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons_render_glyphs() {
        console::set_colors_enabled(false);
        assert_eq!(success().to_string(), "✓");
        assert_eq!(info().to_string(), "→");
        assert_eq!(warn().to_string(), "!");
        assert_eq!(error().to_string(), "✗");
        assert_eq!(dim_arrow().to_string(), "→");
    }
}
