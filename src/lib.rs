#![forbid(unsafe_code)]

pub mod assets;
pub mod blur;
pub mod canvas;
pub mod card;
pub mod color;
pub mod composite;
pub mod draw;
pub mod error;
pub mod grid;
pub mod noise;
pub mod text;
pub mod theme;
pub mod wrap;

pub use canvas::Canvas;
pub use card::{CardSpec, RenderOptions, render_card, render_to_file};
pub use color::Color;
pub use error::{CardError, CardResult};
pub use grid::GridRect;
pub use theme::{Palette, ThemeSet};
