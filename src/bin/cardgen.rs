use std::path::PathBuf;

use clap::Parser;

use cardgen::{CardSpec, RenderOptions, ThemeSet, card};

/// Render a trading-card style image from a color theme and text.
#[derive(Parser, Debug)]
#[command(name = "cardgen", version)]
struct Cli {
    /// Name of the card color theme.
    #[arg(short = 'c', long)]
    color: String,

    /// Path to the output file; format follows the extension.
    #[arg(short = 'o', long, default_value = "output.jpg")]
    output: PathBuf,

    /// First text header on the card.
    #[arg(long)]
    head1: Option<String>,

    /// Second text header on the card.
    #[arg(long)]
    head2: Option<String>,

    /// Text in the text box; a standalone `\n` token forces a line break.
    #[arg(short = 't', long)]
    text: Option<String>,

    /// Text in the stats box.
    #[arg(short = 's', long)]
    stats: Option<String>,

    /// Path to an image for the art box.
    #[arg(short = 'i', long)]
    image: Option<PathBuf>,

    /// Path to a TTF font (default: probe common system fonts).
    #[arg(short = 'f', long)]
    font: Option<PathBuf>,

    /// Theme asset directory containing `<theme>/background.png` and
    /// `<theme>/frame.png`; omit to synthesize the card procedurally.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// JSON palette file merged over the built-in themes.
    #[arg(long)]
    palettes: Option<PathBuf>,

    /// Fine print along the bottom edge; pass an empty string to omit.
    #[arg(long, default_value = card::DEFAULT_FOOTER)]
    footer: String,

    /// Seed for the procedural noise fills.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut themes = ThemeSet::builtin();
    if let Some(path) = &cli.palettes {
        themes.merge_file(path)?;
    }

    let spec = CardSpec {
        theme: cli.color,
        header: cli.head1,
        subheader: cli.head2,
        body: cli.text,
        stats: cli.stats,
        footer: cli.footer,
        art_image: cli.image,
    };
    let opts = RenderOptions {
        assets_dir: cli.assets,
        font_path: cli.font,
        seed: cli.seed,
    };

    cardgen::render_to_file(&spec, &themes, &opts, &cli.output)?;

    eprintln!("wrote {}", cli.output.display());
    Ok(())
}
