use colored::Colorize;

use crate::categorizer::categorize;
use crate::error::Result;

pub fn run(merchant: &str) -> Result<()> {
    let (canonical, category) = categorize(merchant);
    println!("{canonical:?} \u{2192} {}", category.as_str().bold());
    Ok(())
}
