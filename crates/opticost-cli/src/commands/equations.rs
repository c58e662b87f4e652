use std::path::Path;

use opticost::accesses::access_profile;
use opticost::latex::{latex_escape, math_to_latex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Latex,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "text" => Ok(Self::Text),
            "latex" => Ok(Self::Latex),
            other => Err(format!(
                "unknown format '{other}', expected 'text' or 'latex'"
            )),
        }
    }
}

pub fn run(path: Option<&Path>, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = super::load_scenario(path)?;
    let (vit, _) = scenario.resolve();
    let profile = access_profile(&vit);
    let name = scenario.display_name().to_string();

    match format {
        OutputFormat::Text => render_text(&name, &profile),
        OutputFormat::Latex => render_latex(&name, &profile),
    }

    Ok(())
}

fn render_text(name: &str, profile: &opticost::accesses::AccessProfile) {
    println!("Step derivations for {name}");
    println!("{}", "=".repeat(22 + name.len()));
    println!();

    for step in &profile.steps {
        println!("  {}", step.name);
        println!("    {}", step.description);
        println!("    formula:  {}", step.formula);
        println!("    accesses: {}", step.accesses);
        if step.flops > 0.0 {
            println!("    flops:    {}", step.flops);
        }
        println!("    {}", step.narrative);
        println!();
    }
}

fn render_latex(name: &str, profile: &opticost::accesses::AccessProfile) {
    let escaped_name = latex_escape(name);
    println!("% Step derivations for {name}");
    println!("\\section{{Access derivation: {escaped_name}}}");
    println!();

    for step in &profile.steps {
        println!("\\subsection{{{}}}", latex_escape(step.phase.name()));
        println!();
        println!("\\begin{{equation}}");
        println!("  {}", math_to_latex(&step.formula));
        println!("\\end{{equation}}");
        println!();
        println!("{}", latex_escape(&step.narrative));
        println!();
    }

    println!("\\subsection{{Totals}}");
    println!();
    println!("\\begin{{itemize}}");
    println!(
        "  \\item Projection accesses: ${}$",
        profile.projection_accesses
    );
    println!(
        "  \\item Attention accesses: ${}$",
        profile.attention_accesses
    );
    println!("  \\item Total accesses: ${}$", profile.total_accesses);
    println!("\\end{{itemize}}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(
            OutputFormat::from_str("latex").unwrap(),
            OutputFormat::Latex
        );
        assert!(OutputFormat::from_str("html").is_err());
    }
}
