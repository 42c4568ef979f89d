use std::fmt::Write;

use crate::token::LayoutToken;

/// Render the generated TypeScript constants module for `tokens`.
pub fn render_module(scene: &str, tokens: &[LayoutToken]) -> String {
    let mut out = String::new();
    out.push_str("// Generated by `gabarito sync`. Do not edit by hand.\n");
    let _ = writeln!(
        out,
        "// Run `gabarito sync --scene {}` after updating the vector source.",
        scene
    );
    out.push('\n');
    out.push_str("export const LAYOUT_TOKENS = {\n");

    for token in tokens {
        let description = comment_text(&token.description);
        if !description.is_empty() {
            let _ = writeln!(out, "  // {}", description);
        }
        let frame = &token.frame;
        let _ = writeln!(out, "  {}: {{", token.key);
        out.push_str("    frame: {\n");
        let _ = writeln!(out, "      x: {},", frame.x);
        let _ = writeln!(out, "      y: {},", frame.y);
        let _ = writeln!(out, "      width: {},", frame.width);
        let _ = writeln!(out, "      height: {},", frame.height);
        let _ = writeln!(out, "      right: {},", frame.right);
        let _ = writeln!(out, "      bottom: {},", frame.bottom);
        out.push_str("    },\n");
        out.push_str("    center: {\n");
        let _ = writeln!(out, "      x: {},", token.center.x);
        let _ = writeln!(out, "      y: {},", token.center.y);
        out.push_str("    },\n");
        out.push_str("  },\n");
        out.push('\n');
    }

    out.push_str("} as const;\n");
    out.push('\n');
    out.push_str("export type LayoutTokenKey = keyof typeof LAYOUT_TOKENS;\n");
    out
}

/// Collapse a description onto one line so it stays inside its comment.
fn comment_text(description: &str) -> String {
    description.split_whitespace().collect::<Vec<_>>().join(" ")
}
