//! Implementation of the `kgrade classify` command.

use crate::cli::ClassifyArgs;
use kgrade::classify::classify;
use kgrade::error::Result;
use kgrade::problem::ProblemMetadata;

/// Print the category a problem is graded under.
pub fn cmd_classify(args: ClassifyArgs) -> Result<()> {
    let problem = ProblemMetadata::load(&args.problem)?;
    println!("{}", classify(&problem));
    Ok(())
}
