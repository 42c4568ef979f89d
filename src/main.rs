use clap::Parser;
use gabarito::cli::{Cli, Commands};
use gabarito::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbose(cli.verbose);
    let root = cli.root.as_path();

    match cli.command {
        Commands::Sync(args) => gabarito::cli::sync::run(args, root, &printer)?,
        Commands::Slice(args) => gabarito::cli::slice::run(args, root, &printer)?,
        Commands::Validate(args) => gabarito::cli::validate::run(args, root, &printer)?,
        Commands::Init(args) => gabarito::cli::init::run(args, root, &printer)?,
        Commands::Regions(args) => gabarito::cli::regions::run(args, root, &printer)?,
        Commands::Completions(args) => gabarito::cli::completions::run(args)?,
    }

    Ok(())
}
