use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    error::{CardError, CardResult},
};

/// The four colors a theme paints with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Canvas fill behind everything else.
    pub background: Color,
    /// Outlines and the dark end of the noise gradient.
    pub main: Color,
    /// Light end of the noise gradient.
    pub second: Color,
    /// Fill of the text bars and boxes.
    pub card: Color,
}

/// Name -> palette table. Starts from the built-in themes; a JSON file
/// can add or replace entries.
#[derive(Clone, Debug)]
pub struct ThemeSet {
    themes: BTreeMap<String, Palette>,
}

impl ThemeSet {
    pub fn builtin() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(
            "white".to_string(),
            Palette {
                background: Color::rgb(0x00, 0x00, 0x00),
                main: Color::rgb(0xdf, 0xd3, 0xab),
                second: Color::rgb(0xff, 0xfe, 0xf5),
                card: Color::rgb(0xff, 0xff, 0xff),
            },
        );
        themes.insert(
            "blue".to_string(),
            Palette {
                background: Color::rgb(0x00, 0x00, 0x00),
                main: Color::rgb(0x00, 0x73, 0xb2),
                second: Color::rgb(0x83, 0xce, 0xf1),
                card: Color::rgb(0xee, 0xee, 0xff),
            },
        );
        themes.insert(
            "black".to_string(),
            Palette {
                background: Color::rgb(0x00, 0x00, 0x00),
                main: Color::rgb(0x3a, 0x38, 0x33),
                second: Color::rgb(0x52, 0x53, 0x47),
                card: Color::rgb(0xdd, 0xdd, 0xdd),
            },
        );
        themes.insert(
            "red".to_string(),
            Palette {
                background: Color::rgb(0x00, 0x00, 0x00),
                main: Color::rgb(0xd9, 0x40, 0x29),
                second: Color::rgb(0xe5, 0xa3, 0x8d),
                card: Color::rgb(0xff, 0xee, 0xee),
            },
        );
        themes.insert(
            "green".to_string(),
            Palette {
                background: Color::rgb(0x00, 0x00, 0x00),
                main: Color::rgb(0x22, 0x62, 0x48),
                second: Color::rgb(0xbc, 0xd0, 0xc7),
                card: Color::rgb(0xdd, 0xe6, 0xe9),
            },
        );
        Self { themes }
    }

    pub fn get(&self, name: &str) -> CardResult<&Palette> {
        self.themes.get(name).ok_or_else(|| {
            CardError::invalid_argument(format!(
                "unknown theme '{name}' (known: {})",
                self.themes
                    .keys()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Merge palettes from a JSON file of the form
    /// `{"<theme>": {"background": "#000", "main": "#dfd3ab", ...}}`.
    pub fn merge_file(&mut self, path: &Path) -> CardResult<()> {
        let f = File::open(path).map_err(|e| {
            CardError::invalid_argument(format!("open palette file '{}': {e}", path.display()))
        })?;
        let extra: BTreeMap<String, Palette> =
            serde_json::from_reader(BufReader::new(f)).map_err(|e| {
                CardError::invalid_argument(format!(
                    "malformed palette file '{}': {e}",
                    path.display()
                ))
            })?;
        self.themes.extend(extra);
        Ok(())
    }
}
