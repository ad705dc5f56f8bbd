use anyhow::{Context, Result};
use dialog_playground::{parse_script, Playground, DEFAULT_SCRIPT};
use modal_stack::ModalConfig;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MODAL_STACK_LOG";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("modal_stack=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let script = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading script {path}"))?
        }
        None => DEFAULT_SCRIPT.to_string(),
    };
    let commands = parse_script(&script).context("parsing script")?;

    let mut playground = Playground::new(ModalConfig::from_env())?;
    for command in &commands {
        let report = playground
            .apply(command)
            .with_context(|| format!("running `{command}`"))?;
        println!("{report}");
    }
    Ok(())
}
