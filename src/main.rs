mod args;
mod branded_qr;
mod logo;
mod qr;
mod text;
mod variants;

use anyhow::Result;
use args::Args;
use branded_qr::BrandedQR;
use clap::Parser;

const PORTFOLIO_URL: &str = "https://sz11.github.io/devportfolio/";

fn main() {
    let args = Args::parse();

    println!("Generating portfolio QR codes for: {}", PORTFOLIO_URL);

    // Single fault boundary: report and exit normally either way.
    if let Err(err) = run(&args) {
        println!("Error: {:#}", err);
        println!("Check that the output directory is writable, then rerun.");
    }
}

fn run(args: &Args) -> Result<()> {
    let qr = BrandedQR::new(PORTFOLIO_URL)?;
    let composed = qr.compose()?;

    variants::write_all(&composed, &args.out_dir)?;

    println!("All QR code variants generated.");
    Ok(())
}
