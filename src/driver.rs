use std::fs;

use log::info;

use crate::alternating_path::AlternatingPathSelection;
use crate::clause::Clause;
use crate::selection::{SelectionOptions, SelectionStatistics};
use crate::simple_path::SimplePathSelection;
use crate::tptp;

// How the driver behaves, beyond what the selection engine itself needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverOptions {
    pub selection: SelectionOptions,

    // Use the simple-path selector instead of alternating paths.
    pub simple: bool,

    // Print the statistics block after the run.
    pub print_stats: bool,

    // Suppress the selection listing.
    pub no_output: bool,
}

// Reads clause files, runs the configured selector and prints the selection
// and statistics. This is the whole glue between the outside world and the
// engine; the binary only translates command line flags into DriverOptions.
pub struct Driver {
    options: DriverOptions,
}

impl Driver {
    pub fn new(options: DriverOptions) -> Driver {
        Driver { options }
    }

    // Runs one selection over the concatenation of the input files.
    // Any failure comes back as a one-line diagnostic for the user.
    pub fn run(&self, files: &[String]) -> Result<(), String> {
        let mut clauses = vec![];
        for path in files {
            let text =
                fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
            let parsed =
                tptp::parse_problem(&text).map_err(|e| format!("{}: {}", path, e))?;
            info!("{}: {} clauses", path, parsed.len());
            clauses.extend(parsed);
        }

        let (listing, statistics) = self.select(clauses);
        if !self.options.no_output {
            for line in listing {
                println!("{}", line);
            }
        }
        if self.options.print_stats {
            println!("{}", statistics);
        }
        Ok(())
    }

    // Runs the selector and renders the selection in input syntax, one
    // clause per line, in relevance order.
    fn select(&self, clauses: Vec<Clause>) -> (Vec<String>, SelectionStatistics) {
        if self.options.simple {
            let mut selection = SimplePathSelection::new(clauses, self.options.selection);
            let selected = selection.select_clauses();
            info!("simple path selected {} clauses", selected.len());
            let listing = selected
                .iter()
                .map(|&id| selection.clause(id).to_string())
                .collect();
            (listing, selection.statistics())
        } else {
            let mut selection = AlternatingPathSelection::new(clauses, self.options.selection);
            let selected = selection.select_clauses();
            info!("alternating path selected {} clauses", selected.len());
            let listing = selected
                .iter()
                .map(|&id| selection.clause(id).to_string())
                .collect();
            (listing, selection.statistics())
        }
    }
}
