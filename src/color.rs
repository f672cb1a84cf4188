//! Named color and named palette lookup.
//!
//! Both tables are read-only statics and safe for concurrent reads. Color
//! names are matched case-insensitively and ignoring whitespace, so
//! `"Dark Red"` resolves like `"darkred"`.

use crate::error::{ScenewireError, ScenewireResult};
use crate::properties::Color;

/// Samples taken from a named palette when no explicit count is requested.
pub const DEFAULT_PALETTE_SAMPLES: usize = 32;

/// Resolves a color name against the built-in table.
pub fn lookup_color(name: &str) -> ScenewireResult<Color> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, [r, g, b])| from_u8(*r, *g, *b))
        .ok_or_else(|| ScenewireError::UnknownColorName(name.to_owned()))
}

/// Samples a continuous named palette at `count` evenly spaced points.
///
/// With `count` omitted, [`DEFAULT_PALETTE_SAMPLES`] points are taken.
pub fn resolve_palette(name: &str, count: Option<usize>) -> ScenewireResult<Vec<Color>> {
    let anchors = match name.to_lowercase().as_str() {
        "viridis" => VIRIDIS,
        "plasma" => PLASMA,
        "inferno" => INFERNO,
        "magma" => MAGMA,
        "grayscale" | "greyscale" => GRAYSCALE,
        _ => return Err(ScenewireError::UnknownPalette(name.to_owned())),
    };

    let count = count.unwrap_or(DEFAULT_PALETTE_SAMPLES);
    if count < 2 {
        return Err(ScenewireError::validation(
            "palette sample count must be at least 2",
        ));
    }

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f64 / (count - 1) as f64;
        out.push(sample_anchors(anchors, t));
    }
    Ok(out)
}

fn from_u8(r: u8, g: u8, b: u8) -> Color {
    Color::rgb(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
}

fn sample_anchors(anchors: &[[u8; 3]], t: f64) -> Color {
    let pos = t.clamp(0.0, 1.0) * (anchors.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(anchors.len() - 1);
    let frac = pos - lo as f64;

    let lerp = |a: u8, b: u8| f64::from(a) + (f64::from(b) - f64::from(a)) * frac;
    Color::rgb(
        lerp(anchors[lo][0], anchors[hi][0]) / 255.0,
        lerp(anchors[lo][1], anchors[hi][1]) / 255.0,
        lerp(anchors[lo][2], anchors[hi][2]) / 255.0,
    )
}

// Evenly spaced anchors of the matplotlib palettes of the same name.
const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [70, 50, 127],
    [54, 92, 141],
    [39, 127, 143],
    [31, 161, 135],
    [74, 194, 109],
    [159, 218, 58],
    [253, 231, 37],
];

const PLASMA: &[[u8; 3]] = &[
    [13, 8, 135],
    [84, 2, 163],
    [139, 10, 165],
    [185, 50, 137],
    [219, 92, 104],
    [244, 136, 73],
    [254, 188, 43],
    [240, 249, 33],
];

const INFERNO: &[[u8; 3]] = &[
    [0, 0, 4],
    [40, 11, 84],
    [101, 21, 110],
    [159, 42, 99],
    [212, 72, 66],
    [245, 125, 21],
    [250, 193, 39],
    [252, 255, 164],
];

const MAGMA: &[[u8; 3]] = &[
    [0, 0, 4],
    [35, 17, 91],
    [97, 18, 130],
    [158, 47, 127],
    [215, 87, 107],
    [246, 148, 97],
    [254, 213, 152],
    [252, 253, 191],
];

const GRAYSCALE: &[[u8; 3]] = &[[0, 0, 0], [255, 255, 255]];

// CSS/X11 named colors.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_spaces() {
        let a = lookup_color("darkred").unwrap();
        let b = lookup_color("Dark Red").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Color::rgb(139.0 / 255.0, 0.0, 0.0));
    }

    #[test]
    fn lookup_rejects_unknown_names() {
        assert!(matches!(
            lookup_color("not a color"),
            Err(ScenewireError::UnknownColorName(_))
        ));
    }

    #[test]
    fn palette_endpoints_match_the_anchors() {
        let colors = resolve_palette("viridis", Some(8)).unwrap();
        assert_eq!(colors.len(), 8);
        assert_eq!(colors[0], Color::rgb(68.0 / 255.0, 1.0 / 255.0, 84.0 / 255.0));
        assert_eq!(
            colors[7],
            Color::rgb(253.0 / 255.0, 231.0 / 255.0, 37.0 / 255.0)
        );
    }

    #[test]
    fn palette_default_sample_count() {
        let colors = resolve_palette("plasma", None).unwrap();
        assert_eq!(colors.len(), DEFAULT_PALETTE_SAMPLES);
    }

    #[test]
    fn palette_rejects_unknown_and_degenerate_requests() {
        assert!(matches!(
            resolve_palette("nope", None),
            Err(ScenewireError::UnknownPalette(_))
        ));
        assert!(resolve_palette("viridis", Some(1)).is_err());
    }
}
