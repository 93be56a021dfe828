use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cambatch", version)]
struct Cli {
    /// Scene document JSON exported from the host application.
    #[arg(long)]
    scene: PathBuf,

    /// Renderer executable invoked once per camera. Omit for a dry run.
    #[arg(long)]
    renderer: Option<PathBuf>,

    /// Batch options, passed after `--` (see `-- --help`).
    #[arg(last = true)]
    batch: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let doc = cambatch::SceneDoc::from_path(&cli.scene)?;
    let version = doc.version;

    match cambatch::resolve(&cli.batch, version) {
        cambatch::Resolution::Help => {
            println!("{}", cambatch::help_text());
        }
        cambatch::Resolution::Usage(message) => {
            // User error: message plus full help, then a clean return.
            eprintln!("{message}");
            eprintln!("{}", cambatch::help_text());
        }
        cambatch::Resolution::Run(config) => {
            let mut host = cambatch::DocumentHost::new(doc);
            if let Some(renderer) = cli.renderer {
                host = host.with_renderer(renderer);
            }
            cambatch::run_batch(&mut host, &config)?;
            eprintln!("batch job finished, exiting");
        }
    }

    Ok(())
}
