// SPDX-License-Identifier: GPL-3.0-or-later
//! Palette names as they appear in configuration files.
use serde::de::{self, Deserialize, Deserializer};

use crate::render::PaletteKind;

/// Parse a palette name.
///
/// `iron` selects the built-in Iron ramp, anything else has to name a colorous gradient. Case is
/// ignored and spaces may stand in for underscores.
pub fn from_str(palette_name: &str) -> Result<PaletteKind, &'static str> {
    let gradient = match &palette_name.to_uppercase().replace(" ", "_") as &str {
        "IRON" => return Ok(PaletteKind::Iron),
        "BLUES" => colorous::BLUES,
        "BLUE_GREEN" => colorous::BLUE_GREEN,
        "BLUE_PURPLE" => colorous::BLUE_PURPLE,
        "BROWN_GREEN" => colorous::BROWN_GREEN,
        "CIVIDIS" => colorous::CIVIDIS,
        "COOL" => colorous::COOL,
        "CUBEHELIX" => colorous::CUBEHELIX,
        "GREENS" => colorous::GREENS,
        "GREEN_BLUE" => colorous::GREEN_BLUE,
        "GREYS" => colorous::GREYS,
        "INFERNO" => colorous::INFERNO,
        "MAGMA" => colorous::MAGMA,
        "ORANGES" => colorous::ORANGES,
        "ORANGE_RED" => colorous::ORANGE_RED,
        "PINK_GREEN" => colorous::PINK_GREEN,
        "PLASMA" => colorous::PLASMA,
        "PURPLES" => colorous::PURPLES,
        "PURPLE_BLUE" => colorous::PURPLE_BLUE,
        "PURPLE_BLUE_GREEN" => colorous::PURPLE_BLUE_GREEN,
        "PURPLE_GREEN" => colorous::PURPLE_GREEN,
        "PURPLE_ORANGE" => colorous::PURPLE_ORANGE,
        "PURPLE_RED" => colorous::PURPLE_RED,
        "RAINBOW" => colorous::RAINBOW,
        "REDS" => colorous::REDS,
        "RED_BLUE" => colorous::RED_BLUE,
        "RED_GREY" => colorous::RED_GREY,
        "RED_PURPLE" => colorous::RED_PURPLE,
        "RED_YELLOW_BLUE" => colorous::RED_YELLOW_BLUE,
        "RED_YELLOW_GREEN" => colorous::RED_YELLOW_GREEN,
        "SINEBOW" => colorous::SINEBOW,
        "SPECTRAL" => colorous::SPECTRAL,
        "TURBO" => colorous::TURBO,
        "VIRIDIS" => colorous::VIRIDIS,
        "WARM" => colorous::WARM,
        "YELLOW_GREEN" => colorous::YELLOW_GREEN,
        "YELLOW_GREEN_BLUE" => colorous::YELLOW_GREEN_BLUE,
        "YELLOW_ORANGE_BROWN" => colorous::YELLOW_ORANGE_BROWN,
        "YELLOW_ORANGE_RED" => colorous::YELLOW_ORANGE_RED,
        _ => return Err("Invalid palette name"),
    };
    Ok(PaletteKind::Gradient(gradient))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<PaletteKind, D::Error>
where
    D: Deserializer<'de>,
{
    let palette_name = String::deserialize(deserializer)?;
    from_str(&palette_name).map_err(|_| {
        de::Error::invalid_value(
            de::Unexpected::Str(&palette_name),
            &"\"iron\" or the name of a colorous gradient",
        )
    })
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use crate::render::PaletteKind;

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(deserialize_with = "super::deserialize")]
        palette: PaletteKind,
    }

    fn parse_str(palette_str: &str) -> Result<PaletteKind, toml::de::Error> {
        toml::from_str(&format!("palette = \"{}\"", palette_str)).map(|Named { palette }| palette)
    }

    fn check_parse(palette_str: &str, expected: PaletteKind) {
        let parsed = parse_str(palette_str);
        assert!(
            parsed.is_ok(),
            "Failed to parse palette: {}",
            parsed.unwrap_err()
        );
        assert_eq!(parsed.unwrap(), expected);
    }

    #[test]
    fn iron() {
        check_parse("iron", PaletteKind::Iron);
        check_parse("IRON", PaletteKind::Iron);
    }

    #[test]
    fn all_lowercase() {
        check_parse("sinebow", PaletteKind::Gradient(colorous::SINEBOW));
    }

    #[test]
    fn spongebob_case() {
        check_parse("sInEbOw", PaletteKind::Gradient(colorous::SINEBOW));
    }

    #[test]
    fn mixed_separators() {
        check_parse(
            "RED YELLOW_BLUE",
            PaletteKind::Gradient(colorous::RED_YELLOW_BLUE),
        );
    }

    #[test]
    fn distinct_gradients() {
        assert_ne!(
            parse_str("turbo").unwrap(),
            PaletteKind::Gradient(colorous::VIRIDIS)
        );
    }

    #[test]
    fn bad_palette() {
        let parsed = parse_str("Not A Palette");
        assert!(
            parsed.is_err(),
            "Deserialized nonexistent palette: {:?}",
            parsed.unwrap()
        );
    }
}
