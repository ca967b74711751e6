use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "branded-qr")]
#[command(about = "Generate branded portfolio QR codes with a gradient logo badge")]
pub struct Args {
    /// Directory the PNG variants are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}
