use twbridge::cli::run;
use twbridge::error::BridgeError;

fn main() {
    if let Err(e) = run() {
        // Failures of the tracker or calendar tool are internal; bad input is a user error
        let internal = e
            .downcast_ref::<BridgeError>()
            .map_or(false, |err| !err.is_user_error());
        if internal {
            eprintln!("Internal error: {}", e);
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut indent = 1;
                while let Some(err) = source {
                    eprintln!("{:indent$}  {}", "", err);
                    source = err.source();
                    indent += 1;
                }
            }
            std::process::exit(2);
        } else {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
