use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scenewire::catalogue::CatalogueReader;

#[derive(Parser, Debug)]
#[command(name = "scenewire", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the scenes stored in a catalogue.
    Ls(LsArgs),
    /// Decode one scene and print a summary (or the full scene as JSON).
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
struct LsArgs {
    /// Catalogue file.
    catalogue: PathBuf,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Catalogue file.
    catalogue: PathBuf,

    /// Entry name; the first entry when omitted.
    #[arg(long)]
    entry: Option<String>,

    /// Dump the whole decoded scene as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Ls(args) => cmd_ls(args),
        Command::Show(args) => cmd_show(args),
    }
}

fn cmd_ls(args: LsArgs) -> anyhow::Result<()> {
    let reader = CatalogueReader::open(&args.catalogue)
        .with_context(|| format!("open catalogue '{}'", args.catalogue.display()))?;
    for name in reader.names() {
        println!("{name}");
    }
    Ok(())
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let mut reader = CatalogueReader::open(&args.catalogue)
        .with_context(|| format!("open catalogue '{}'", args.catalogue.display()))?;
    let scene = match &args.entry {
        Some(entry) => reader
            .load(entry)
            .with_context(|| format!("load entry '{entry}'"))?,
        None => reader.load_index(0).context("load first entry")?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!("scene: {}", scene.name);
    if let Some(author) = &scene.author {
        println!("author: {author}");
    }
    if let (Some(start), Some(end)) = (scene.start_time, scene.end_time) {
        println!("time: {start} .. {end} (speed {})", scene.speed_ratio);
    }
    println!("graphs: {}", scene.graphs.len());
    println!("paths: {}", scene.paths.len());
    println!("objects: {}", scene.animatables.len());
    for animatable in &scene.animatables {
        let name = animatable.name.as_deref().unwrap_or("<unnamed>");
        println!("  {} ({})", name, animatable.body.type_name());
    }
    Ok(())
}
