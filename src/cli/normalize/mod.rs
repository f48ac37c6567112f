//! Normalize command - shows how a label is prepared for matching

use clap::Args;

use crate::domain::category::{
    build_search_inputs, is_invalid_category_value, normalize_token, strip_category_modifiers,
};

/// Arguments for the normalize command
#[derive(Args, Clone)]
pub struct NormalizeArgs {
    /// Label to normalize
    pub label: String,
}

/// Run the normalize command
pub fn run(args: NormalizeArgs) -> anyhow::Result<()> {
    for line in describe(&args.label) {
        println!("{}", line);
    }

    Ok(())
}

fn describe(label: &str) -> Vec<String> {
    let normalized = normalize_token(label);

    vec![
        format!("normalized:  {:?}", normalized),
        format!("placeholder: {}", is_invalid_category_value(&normalized)),
        format!("stripped:    {:?}", strip_category_modifiers(&normalized)),
        format!("inputs:      {:?}", build_search_inputs(&normalized)),
    ]
}
