use std::path::Path;

use opticost::accesses::access_profile;

pub fn run(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let scenario = super::load_scenario(path)?;
    let (vit, _) = scenario.resolve();
    let profile = access_profile(&vit);

    println!("Scenario: {}", scenario.display_name());
    println!(
        "ViT: d={} h={} image={} patch={} L={}",
        vit.embedding_dim, vit.num_heads, vit.image_size, vit.patch_size, vit.sequence_length
    );
    println!();
    println!("{:<20} {:>14}  formula", "step", "accesses");
    println!("{}", "-".repeat(60));
    for step in &profile.steps {
        println!(
            "{:<20} {:>14}  {}",
            step.phase.name(),
            step.accesses,
            step.formula
        );
    }
    println!("{}", "-".repeat(60));
    println!("Projection accesses (Q+K+V): {}", profile.projection_accesses);
    println!("Attention accesses:          {}", profile.attention_accesses);
    println!("Total accesses:              {}", profile.total_accesses);

    Ok(())
}
