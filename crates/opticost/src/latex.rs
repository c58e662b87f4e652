//! LaTeX conversion for the step-formula notation.
//!
//! The access formulas and narratives use Unicode math (×, ·, ², ᵀ)
//! that renders poorly in LaTeX documents; this converts them into
//! math-mode markup for the `oc equations --format latex` output.

/// Escape special LaTeX characters in plain text.
pub fn latex_escape(s: &str) -> String {
    s.replace('\\', "\\textbackslash{}")
        .replace('&', "\\&")
        .replace('%', "\\%")
        .replace('$', "\\$")
        .replace('#', "\\#")
        .replace('_', "\\_")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('~', "\\textasciitilde{}")
        .replace('^', "\\textasciicircum{}")
}

/// Convert estimator math notation to LaTeX math mode.
///
/// Handles the patterns the access formulas actually use:
/// - products (`×`, `·`)
/// - superscripts (`²`, `ᵀ`)
/// - units and comparisons (`μ`, `≤`, `≥`, `≈`)
pub fn math_to_latex(s: &str) -> String {
    let mut out = s.to_string();

    // Each entry: (unicode, latex_cmd, is_command). When is_command is
    // true, a trailing space is inserted before the next alphabetic
    // character to prevent `\timesh` instead of `\times h`.
    let replacements: &[(&str, &str, bool)] = &[
        ("×", "\\times", true),
        ("·", "\\cdot", true),
        ("μ", "\\mu", true),
        ("≤", "\\leq", true),
        ("≥", "\\geq", true),
        ("≈", "\\approx", true),
        ("²", "^{2}", false),
        ("ᵀ", "^{T}", false),
    ];
    for &(uni, tex, is_cmd) in replacements {
        if is_cmd {
            out = replace_unicode_cmd(&out, uni, tex);
        } else {
            out = out.replace(uni, tex);
        }
    }

    out = out.replace('%', "\\%");
    out
}

/// Replace a Unicode symbol with a LaTeX command, inserting a trailing
/// space when the next character is alphabetic (prevents `\timesh`).
fn replace_unicode_cmd(s: &str, uni: &str, tex: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find(uni) {
        result.push_str(&rest[..pos]);
        result.push_str(tex);
        let after = &rest[pos + uni.len()..];
        if after.starts_with(|c: char| c.is_ascii_alphabetic()) {
            result.push(' ');
        }
        rest = after;
    }
    result.push_str(rest);
    result
}
