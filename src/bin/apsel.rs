// Premise selection for first-order clause sets, by alternating-path
// relevance. Reads TPTP CNF inputs, prints the selected clauses in
// relevance order, so that a downstream prover sees a smaller problem.

use apsel::driver::{Driver, DriverOptions};
use apsel::selection::SelectionOptions;
use clap::Parser;

#[derive(Parser)]
#[clap(name = "apsel", about = "Alternating-path premise selection")]
struct Args {
    /// Input files with cnf(...) clauses.
    #[clap(required = true)]
    files: Vec<String>,

    /// Maximum path depth to explore. Unbounded when absent.
    #[clap(long, short = 'l')]
    limit: Option<usize>,

    /// Print the statistics block after the run.
    #[clap(long, short = 's')]
    stats: bool,

    /// Suppress the selection listing.
    #[clap(long = "no-output", short = 'n')]
    no_output: bool,

    /// Answer partner queries from the indexed clause store.
    #[clap(long, short = 'i')]
    indexed: bool,

    /// Hold equality axioms out of saturation and re-attach them to the
    /// selection afterwards.
    #[clap(long = "exclude-equality", short = 'e')]
    exclude_equality: bool,

    /// Use the simple-path selector instead of alternating paths.
    #[clap(long = "dumb", short = 'd')]
    dumb: bool,

    /// CPU time limit in seconds. On expiry a resource-out line is printed
    /// and the process exits cleanly.
    #[clap(long = "cpu-limit")]
    cpu_limit: Option<u64>,
}

fn main() {
    color_backtrace::install();
    env_logger::init();
    let args = Args::parse();

    if let Some(seconds) = args.cpu_limit {
        set_cpu_limit(seconds);
    }

    let options = DriverOptions {
        selection: SelectionOptions {
            limit: args.limit,
            indexed: args.indexed,
            exclude_equality: args.exclude_equality,
        },
        simple: args.dumb,
        print_stats: args.stats,
        no_output: args.no_output,
    };
    let driver = Driver::new(options);
    if let Err(e) = driver.run(&args.files) {
        println!("{}", e);
        std::process::exit(1);
    }
}

// The CPU limit is enforced by the operating system: we lower the soft
// RLIMIT_CPU and trap the SIGXCPU the kernel sends when it expires. The
// handler may only use async-signal-safe calls, so it writes the diagnostic
// with write(2) and leaves with _exit.
#[cfg(unix)]
extern "C" fn handle_cpu_exhausted(_signal: libc::c_int) {
    const MESSAGE: &[u8] = b"# Failure: resource out (CPU time)\n";
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            MESSAGE.as_ptr() as *const libc::c_void,
            MESSAGE.len(),
        );
        libc::_exit(0);
    }
}

#[cfg(unix)]
fn set_cpu_limit(seconds: u64) {
    unsafe {
        let mut limit = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        if libc::getrlimit(libc::RLIMIT_CPU, &mut limit) == 0 {
            let seconds = seconds as libc::rlim_t;
            limit.rlim_cur = if limit.rlim_max == libc::RLIM_INFINITY {
                seconds
            } else {
                limit.rlim_max.min(seconds)
            };
            libc::setrlimit(libc::RLIMIT_CPU, &limit);
        }
        let handler = handle_cpu_exhausted as extern "C" fn(libc::c_int);
        libc::signal(libc::SIGXCPU, handler as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
fn set_cpu_limit(_seconds: u64) {
    eprintln!("warning: --cpu-limit is only supported on unix");
}
