//! Generates a few random trees and logs what each one contains.
//!
//! Usage:
//! ```text
//! cargo run --example generate              # entropy-seeded
//! cargo run --example generate -- 42       # reproducible
//! cargo run --example generate -- 42 5     # five trees from seed 42
//! ```

use arbor::scene::{GeneratorConfig, ObjectKind, TreeGenerator};
use arbor::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for arbor.
    // Override with RUST_LOG env var (e.g. RUST_LOG=arbor=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("generate=info".parse().unwrap_or_default())
        .add_directive("arbor=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let count = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(1);

    let config = GeneratorConfig::default();
    let mut generator = match seed {
        Some(seed) => TreeGenerator::from_seed(config, seed)?,
        None => TreeGenerator::from_entropy(config)?,
    };

    for index in 0..count {
        let model = generator.regenerate()?;
        let bark = model.merged_bark()?;
        tracing::info!(
            index,
            branches = model.count(ObjectKind::Branch),
            leaves = model.count(ObjectKind::Leaf),
            bark_vertices = bark.vertex_count(),
            bark_triangles = bark.faces().len(),
            offset_y = model.placement().translation.y,
            "tree ready"
        );
    }
    Ok(())
}
