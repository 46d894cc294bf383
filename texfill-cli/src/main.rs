use clap::Parser;
use texfill_cli::{run, Args};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.resolve()?;
    log::debug!("Resolved config: {:?}", config);

    let summary = run(&config)?;
    println!(
        "{} -> {} ({}x{}, grid {}, {}, {:?})",
        config.input.display(),
        config.output.display(),
        summary.width,
        summary.height,
        summary.grid,
        summary.device,
        summary.elapsed
    );
    Ok(())
}
