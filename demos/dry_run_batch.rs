use cambatch::{DocumentHost, Resolution, SceneDoc, help_text, resolve, run_batch};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/scene_doc.json");
    let doc: SceneDoc = serde_json::from_str(s)?;

    let mut tokens: Vec<String> = std::env::args().skip(1).collect();
    if tokens.is_empty() {
        tokens = vec!["-c".into(), "1,2".into()];
    }

    match resolve(&tokens, doc.version) {
        Resolution::Run(config) => run_batch(&mut DocumentHost::new(doc), &config)?,
        Resolution::Help => println!("{}", help_text()),
        Resolution::Usage(message) => eprintln!("{message}"),
    }

    Ok(())
}
