use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

mod options {
    use std::path::PathBuf;

    #[derive(Debug, clap::Parser)]
    #[clap(
        name = "pbmerge",
        about = "Merge two overlapping bank statement exports into one without duplicates"
    )]
    pub struct Args {
        /// The first statement export, with or without its preamble.
        pub file_a: Option<PathBuf>,
        /// The second statement export, which must have the same columns as the first one.
        pub file_b: Option<PathBuf>,
        /// The file to write the merged statement to. It is overwritten if it exists.
        #[clap(long, short = 'o')]
        pub output: Option<PathBuf>,
        /// A RON file to configure encoding, preamble marker, sort and date columns.
        #[clap(long, short = 'c')]
        pub config: Option<PathBuf>,
        /// Ask for missing paths, and whether to open the output folder when done.
        #[clap(long, short = 'i')]
        pub interactive: bool,
        /// Open the folder containing the output when done.
        #[clap(long)]
        pub open_folder: bool,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = options::Args::parse();
    let options = match &args.config {
        Some(path) => pbmerge::config::Config::from_path(path)
            .with_context(|| format!("Could not load configuration at '{}'", path.display()))?,
        None => Default::default(),
    }
    .into_options()?;

    let file_a = path_or_prompt(args.file_a, "Datei A", args.interactive)?;
    let file_b = path_or_prompt(args.file_b, "Datei B", args.interactive)?;
    let file_out = path_or_prompt(args.output, "Ausgabedatei", args.interactive)?;

    match pbmerge::run(&file_a, &file_b, &file_out, &options) {
        Ok(file_out) => {
            println!("Datei wurde gespeichert: {}", file_out.display());
            let open_folder = args.open_folder
                || (args.interactive
                    && dialoguer::Confirm::new()
                        .with_prompt("Ordner öffnen?")
                        .interact()?);
            if open_folder {
                open_containing_folder(&file_out)?;
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.stage().message());
            Err(err.into())
        }
    }
}

fn path_or_prompt(path: Option<PathBuf>, prompt: &str, interactive: bool) -> anyhow::Result<PathBuf> {
    Ok(match path {
        Some(path) => path,
        None if interactive => dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?
            .into(),
        None => PathBuf::new(),
    })
}

fn open_containing_folder(file: &Path) -> anyhow::Result<()> {
    let folder = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    open::that(folder).with_context(|| format!("Could not open folder '{}'", folder.display()))
}
