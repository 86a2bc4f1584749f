use std::path::{Path, PathBuf};

use kurbo::Rect;
use rand::SeedableRng as _;
use rand_chacha::ChaCha8Rng;

use crate::{
    assets::{self, AssetSet},
    canvas::Canvas,
    color::Color,
    composite, draw,
    error::CardResult,
    grid::{self, GridRect},
    noise,
    text::{self, TypeSet},
    theme::{Palette, ThemeSet},
};

// A card is about 2.5 x 3.5 inches, or 63.5 x 88.9 mm.
// 750 x 1050 px gives the image 300 dpi.
pub const CARD_WIDTH: u32 = 750;
pub const CARD_HEIGHT: u32 = 1050;

pub const DEFAULT_FOOTER: &str = "Might contain traces of cyber";

const OUTLINE_WIDTH: f64 = 8.0;
const TEXT_COLOR: Color = Color::rgb(0x00, 0x00, 0x00);
const FOOTER_COLOR: Color = Color::rgb(0xcc, 0xcc, 0xcc);

// Layout in grid cells; negative coordinates hang off the far edge.
const FRAME_BOX: GridRect = GridRect::new(1.0, 1.0, -1.0, -3.0);
const ART_BOX_LARGE: GridRect = GridRect::new(2.0, 4.0, -2.0, -6.0);
const ART_BOX: GridRect = GridRect::new(2.0, 4.0, -2.0, 23.0);
const BOTTOM_BOX: GridRect = GridRect::new(2.0, 25.0, -2.0, -2.0);
const TITLE_BAR: GridRect = GridRect::new(2.0, 2.0, -2.0, 4.0);
const INFO_BAR_LARGE: GridRect = GridRect::new(2.0, -6.0, -2.0, -4.0);
const INFO_BAR: GridRect = GridRect::new(2.0, 23.0, -2.0, 25.0);
const STATS_BAR: GridRect = GridRect::new(-6.0, -3.0, -2.0, -1.0);
const FOOTER_BOX: GridRect = GridRect::new(1.0, -1.5, -6.0, -0.5);

const BAR_GROW: f64 = 0.5;
const FRAME_NOISE_CELL: u32 = 6;
const FRAME_BLUR_RADIUS: u32 = 2;
const ART_NOISE_CELL: u32 = 30;
const ART_BLUR_RADIUS: u32 = 1;

/// Everything one card render consumes. Built once from the CLI,
/// discarded when the run exits.
#[derive(Clone, Debug)]
pub struct CardSpec {
    /// Theme name, looked up in a [`ThemeSet`].
    pub theme: String,
    /// Title bar text.
    pub header: Option<String>,
    /// Info bar text.
    pub subheader: Option<String>,
    /// Body text; a standalone `\n` token forces a line break.
    pub body: Option<String>,
    /// Stats bar text, e.g. "5/7".
    pub stats: Option<String>,
    /// Fine print along the bottom edge; empty string omits it.
    pub footer: String,
    /// Art image pasted into the art box instead of synthesized noise.
    pub art_image: Option<PathBuf>,
}

impl CardSpec {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            header: None,
            subheader: None,
            body: None,
            stats: None,
            footer: DEFAULT_FOOTER.to_string(),
            art_image: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Theme asset directory; `None` selects procedural backgrounds.
    pub assets_dir: Option<PathBuf>,
    /// Font file; `None` probes the system font list.
    pub font_path: Option<PathBuf>,
    /// Seed for the procedural noise fills.
    pub seed: u64,
}

/// Render one card to an in-memory canvas.
///
/// Theme and font resolution run before any pixel is touched, so an
/// `InvalidArgument` or `AssetNotFound` never leaves partial output.
#[tracing::instrument(skip_all, fields(theme = %spec.theme))]
pub fn render_card(
    spec: &CardSpec,
    themes: &ThemeSet,
    opts: &RenderOptions,
) -> CardResult<Canvas> {
    let palette = *themes.get(&spec.theme)?;
    let font_path = text::resolve_font_path(opts.font_path.as_deref())?;
    let typeset = TypeSet::load(&font_path, grid::CELL)?;
    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);

    let mut canvas = match &opts.assets_dir {
        Some(dir) => {
            let set = AssetSet::resolve(dir, &spec.theme)?;
            let background = assets::load_image(&set.background)?;
            let frame = assets::load_image(&set.frame)?;

            let mut canvas = Canvas::from_rgba8_premul(
                background.width,
                background.height,
                background.rgba8_premul,
            )?;
            let full = Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width()),
                f64::from(canvas.height()),
            );
            composite::paste_scaled(&mut canvas, full, &frame);
            canvas
        }
        None => {
            let mut canvas = Canvas::new(CARD_WIDTH, CARD_HEIGHT, palette.background);
            draw_frame(&mut canvas, &palette, &mut rng)?;
            canvas
        }
    };

    draw_content(&mut canvas, spec, &palette, &typeset, &mut rng)?;
    Ok(canvas)
}

/// Render and save in one step; the canvas lives only for this call.
pub fn render_to_file(
    spec: &CardSpec,
    themes: &ThemeSet,
    opts: &RenderOptions,
    out: &Path,
) -> CardResult<()> {
    let canvas = render_card(spec, themes, opts)?;
    canvas.save(out)
}

fn draw_frame(canvas: &mut Canvas, palette: &Palette, rng: &mut ChaCha8Rng) -> CardResult<()> {
    let rect = FRAME_BOX.to_px(canvas.width(), canvas.height());
    noise::noisy_rect(
        canvas,
        rect,
        palette.second,
        palette.main,
        FRAME_NOISE_CELL,
        FRAME_BLUR_RADIUS,
        rng,
    )
}

fn draw_content(
    canvas: &mut Canvas,
    spec: &CardSpec,
    palette: &Palette,
    typeset: &TypeSet,
    rng: &mut ChaCha8Rng,
) -> CardResult<()> {
    let (w, h) = (canvas.width(), canvas.height());

    // Without body text the art box takes over the bottom half.
    let large_art = spec.body.is_none();

    let art = if large_art { ART_BOX_LARGE } else { ART_BOX };
    let art_px = art.to_px(w, h);
    match &spec.art_image {
        Some(path) => {
            let img = assets::load_image(path)?;
            composite::paste_scaled(canvas, art_px, &img);
        }
        None => noise::noisy_rect(
            canvas,
            art_px,
            palette.second,
            palette.main,
            ART_NOISE_CELL,
            ART_BLUR_RADIUS,
            rng,
        )?,
    }
    draw::draw_box(canvas, art_px, false, None, Some(palette.main), OUTLINE_WIDTH);

    if let Some(body) = &spec.body {
        let rect = BOTTOM_BOX.to_px(w, h);
        draw::draw_box(
            canvas,
            rect,
            false,
            Some(palette.card),
            Some(palette.main),
            OUTLINE_WIDTH,
        );
        text::draw_body(canvas, &typeset.font, typeset.medium, rect, body, TEXT_COLOR);
    }

    // Bars draw on grown boxes but center their text on the nominal ones.
    draw::draw_box(
        canvas,
        TITLE_BAR.grow(BAR_GROW, 0.0).to_px(w, h),
        true,
        Some(palette.card),
        Some(palette.main),
        OUTLINE_WIDTH,
    );
    if let Some(header) = &spec.header {
        text::draw_centered(
            canvas,
            &typeset.font,
            typeset.big,
            TITLE_BAR.to_px(w, h),
            header,
            TEXT_COLOR,
            false,
        );
    }

    let info = if large_art { INFO_BAR_LARGE } else { INFO_BAR };
    draw::draw_box(
        canvas,
        info.grow(BAR_GROW, 0.0).to_px(w, h),
        true,
        Some(palette.card),
        Some(palette.main),
        OUTLINE_WIDTH,
    );
    if let Some(subheader) = &spec.subheader {
        text::draw_centered(
            canvas,
            &typeset.font,
            typeset.big,
            info.to_px(w, h),
            subheader,
            TEXT_COLOR,
            false,
        );
    }

    draw::draw_box(
        canvas,
        STATS_BAR.grow(BAR_GROW, 0.0).to_px(w, h),
        true,
        Some(palette.card),
        Some(palette.main),
        OUTLINE_WIDTH,
    );
    if let Some(stats) = &spec.stats {
        text::draw_centered(
            canvas,
            &typeset.font,
            typeset.big,
            STATS_BAR.to_px(w, h),
            stats,
            TEXT_COLOR,
            true,
        );
    }

    if !spec.footer.is_empty() {
        text::draw_centered(
            canvas,
            &typeset.font,
            typeset.small,
            FOOTER_BOX.to_px(w, h),
            &spec.footer,
            FOOTER_COLOR,
            false,
        );
    }

    Ok(())
}
