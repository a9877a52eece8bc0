//! Resolve command implementation.

use crate::cli::Output;
use crate::video_id;
use anyhow::{bail, Result};

/// Print `input<TAB>id` for each input, or `invalid` when it doesn't resolve.
pub fn run_resolve(inputs: &[String]) -> Result<()> {
    let mut failures = 0;

    for input in inputs {
        match video_id::resolve(input) {
            Some(id) => println!("{}\t{}", input, id),
            None => {
                println!("{}\tinvalid", input);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        Output::warning(&format!("{} of {} input(s) did not resolve", failures, inputs.len()));
        bail!("unresolvable input");
    }

    Ok(())
}
