// Copyright (c) 2026 rezky_nightky

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gallerix",
    version,
    about = "An interactive gallery of generative art animations for the terminal"
)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 30.0,
        help_heading = "PERFORMANCE",
        help = "Target FPS (min 1 max 120)"
    )]
    pub fps: f64,

    #[arg(
        short = 's',
        long = "seed",
        help_heading = "GENERAL",
        help = "RNG seed for deterministic replay (default: derived from system time)"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color depth (allowed: 0=mono, 8=256-color, 24=truecolor; default: auto)"
    )]
    pub colormode: Option<u8>,

    #[arg(
        long = "start",
        help_heading = "GENERAL",
        help = "Animation to open with: 1-based index or name prefix"
    )]
    pub start: Option<String>,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Exit after N seconds (min 0.1 max 86400)"
    )]
    pub duration: Option<f64>,

    #[arg(
        short = 'l',
        long = "list-animations",
        help_heading = "GENERAL",
        help = "Print the animation roster and exit"
    )]
    pub list_animations: bool,
}
