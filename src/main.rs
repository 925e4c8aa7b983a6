use clap::Parser;
use notekeeper::cli::{handle_add, handle_get, handle_init, handle_list, handle_serve, Cli, Commands};
use notekeeper::config::resolve_root;
use notekeeper::logging::{init_logging, Verbosity};

fn main() {
    let cli = Cli::parse();

    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let root = match (&cli.command, cli.root) {
        // `init` targets the current directory unless told otherwise.
        (Commands::Init, None) => std::env::current_dir().unwrap_or_else(|_| ".".into()),
        (_, explicit) => resolve_root(explicit),
    };

    let result = match cli.command {
        Commands::Init => handle_init(&root),
        Commands::Serve(args) => handle_serve(&root, args),
        Commands::Add {
            title,
            description,
            important,
            json,
        } => handle_add(&root, title, description, important, json),
        Commands::List { json } => handle_list(&root, json),
        Commands::Get { id, json } => handle_get(&root, id, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
