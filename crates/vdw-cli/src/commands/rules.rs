use crate::error::Result;
use halvdw::core::forcefield::combining::{EpsilonCombiningRule, SigmaCombiningRule};
use std::io::Write;

pub fn run() -> Result<()> {
    let stdout = std::io::stdout();
    list_rules(&mut stdout.lock())
}

fn list_rules<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Sigma combining rules:")?;
    for rule in SigmaCombiningRule::ALL {
        let marker = if rule == SigmaCombiningRule::default() {
            " (default)"
        } else {
            ""
        };
        writeln!(out, "  {}{}", rule, marker)?;
    }
    writeln!(out, "Epsilon combining rules:")?;
    for rule in EpsilonCombiningRule::ALL {
        let marker = if rule == EpsilonCombiningRule::default() {
            " (default)"
        } else {
            ""
        };
        writeln!(out, "  {}{}", rule, marker)?;
    }
    Ok(())
}
