use std::io::{self, Write};
use std::panic;
use std::process;

use pkgshim::{Dispatcher, PipTools};
use pkgshim_core::{tracing_init, ShimConfig};

fn main() {
    let config = ShimConfig::from_env();
    if let Err(e) = tracing_init::init_with_config(&config) {
        eprintln!("{}", e);
    }

    // The dispatcher reports panics on its own error sink; the hook only logs.
    panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "panic during dispatch");
    }));

    let tools = PipTools::new(&config);
    let dispatcher = Dispatcher::new(&tools);

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let code = dispatcher.run(std::env::args_os(), &mut stdout, &mut stderr);

    // process::exit skips destructors
    let _ = stdout.flush();
    process::exit(code);
}
