//! PNG bar charts for the admin dashboard
//!
//! Rendering is a pure function from counts to PNG bytes. Text uses a
//! built-in 5x7 bitmap font (uppercase letters, digits and a little
//! punctuation); anything else is drawn as `?`.

use crate::error::Result;
use image::{ImageFormat, Rgba, RgbaImage};
use std::collections::BTreeMap;
use std::io::Cursor;

/// Bar colors for the sentiment chart, cycled per bar
pub const SENTIMENT_PALETTE: [[u8; 3]; 3] = [[0x28, 0xa7, 0x45], [0xff, 0xc1, 0x07], [0xdc, 0x35, 0x45]];

/// Bar color for the satisfaction chart
pub const SATISFACTION_PALETTE: [[u8; 3]; 1] = [[0x00, 0x7b, 0xff]];

/// Sentiment labels in palette order
const SENTIMENT_ORDER: [&str; 3] = ["positive", "neutral", "negative"];

const HEIGHT: u32 = 360;
const MARGIN_LEFT: u32 = 70;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 50;
const MARGIN_BOTTOM: u32 = 70;
const MIN_SLOT_WIDTH: u32 = 80;
const MAX_SLOT_WIDTH: u32 = 160;
const MAX_LABEL_CHARS: usize = 24;
const MAX_BARS: usize = 20;
const OTHER_LABEL: &str = "Other";
const MIN_WIDTH: u32 = 480;
const GRID_LINES: usize = 5;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([33, 37, 41, 255]);
const GRID: Rgba<u8> = Rgba([222, 226, 230, 255]);

/// Render a bar chart, one bar per key in key order
///
/// Returns `None` for an empty mapping.
pub fn render_bar_chart(
    counts: &BTreeMap<String, usize>,
    title: &str,
    axis_labels: (&str, &str),
    palette: &[[u8; 3]],
) -> Result<Option<Vec<u8>>> {
    let bars: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    render_bars(&bars, title, axis_labels, palette)
}

/// Overall sentiment chart, bars ordered positive, neutral, negative
pub fn sentiment_chart(distribution: &BTreeMap<String, usize>) -> Result<Option<Vec<u8>>> {
    let mut bars: Vec<(&str, usize)> = SENTIMENT_ORDER
        .iter()
        .filter_map(|label| distribution.get(*label).map(|count| (*label, *count)))
        .collect();
    // Labels outside the usual three go last
    bars.extend(
        distribution
            .iter()
            .filter(|(label, _)| !SENTIMENT_ORDER.contains(&label.as_str()))
            .map(|(label, count)| (label.as_str(), *count)),
    );

    render_bars(
        &bars,
        "Overall Sentiment Distribution",
        ("Sentiment", "Count"),
        &SENTIMENT_PALETTE,
    )
}

/// Student satisfaction chart
pub fn satisfaction_chart(distribution: &BTreeMap<String, usize>) -> Result<Option<Vec<u8>>> {
    render_bar_chart(
        distribution,
        "Student Satisfaction Levels",
        ("Satisfaction Level", "Count"),
        &SATISFACTION_PALETTE,
    )
}

fn render_bars(
    bars: &[(&str, usize)],
    title: &str,
    (x_label, y_label): (&str, &str),
    palette: &[[u8; 3]],
) -> Result<Option<Vec<u8>>> {
    if bars.is_empty() {
        return Ok(None);
    }

    // Categories past the cap share one trailing bar
    let folded;
    let bars = if bars.len() > MAX_BARS {
        let rest: usize = bars[MAX_BARS - 1..].iter().map(|(_, count)| *count).sum();
        let mut kept = bars[..MAX_BARS - 1].to_vec();
        kept.push((OTHER_LABEL, rest));
        folded = kept;
        folded.as_slice()
    } else {
        bars
    };

    let labels: Vec<String> = bars.iter().map(|(label, _)| shorten_label(label)).collect();
    let longest_label = labels
        .iter()
        .map(|label| text_width(label, 1))
        .max()
        .unwrap_or(0);
    let slot = (longest_label + 12).clamp(MIN_SLOT_WIDTH, MAX_SLOT_WIDTH);
    let width = MIN_WIDTH.max(MARGIN_LEFT + slot * bars.len() as u32 + MARGIN_RIGHT);

    let mut img = RgbaImage::from_pixel(width, HEIGHT, WHITE);

    let plot_left = MARGIN_LEFT;
    let plot_right = width - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = HEIGHT - MARGIN_BOTTOM;
    let plot_height = plot_bottom - plot_top;

    let max_count = bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let step = max_count.div_ceil(GRID_LINES).max(1);
    let axis_max = (step * GRID_LINES).max(1);

    // Gridlines and tick labels
    for i in 0..=GRID_LINES {
        let value = step * i;
        let y = plot_bottom - (value as u64 * plot_height as u64 / axis_max as u64) as u32;
        if i > 0 {
            fill_rect(&mut img, plot_left + 1, y, plot_right - plot_left - 1, 1, GRID);
        }
        let tick = value.to_string();
        let tick_x = plot_left.saturating_sub(text_width(&tick, 1) + 6);
        draw_text(&mut img, &tick, tick_x, y.saturating_sub(GLYPH_HEIGHT / 2), 1, INK);
    }

    // Bars
    for (index, ((_, count), label)) in bars.iter().zip(&labels).enumerate() {
        let [r, g, b] = palette
            .get(index % palette.len().max(1))
            .copied()
            .unwrap_or([0x6c, 0x75, 0x7d]);
        let color = Rgba([r, g, b, 255]);

        let slot_left = plot_left + slot * index as u32;
        let bar_width = slot * 3 / 5;
        let bar_left = slot_left + (slot - bar_width) / 2;
        let bar_height = (*count as u64 * plot_height as u64 / axis_max as u64) as u32;
        if bar_height > 0 {
            fill_rect(&mut img, bar_left, plot_bottom - bar_height, bar_width, bar_height, color);
        }

        let label_x = slot_left + slot.saturating_sub(text_width(label, 1)) / 2;
        draw_text(&mut img, label, label_x, plot_bottom + 8, 1, INK);
    }

    // Axes
    fill_rect(&mut img, plot_left, plot_top, 1, plot_height + 1, INK);
    fill_rect(&mut img, plot_left, plot_bottom, plot_right - plot_left, 1, INK);

    // Title and axis labels
    let title_x = width.saturating_sub(text_width(title, 2)) / 2;
    draw_text(&mut img, title, title_x, 16, 2, INK);

    let x_label_x = plot_left + (plot_right - plot_left).saturating_sub(text_width(x_label, 2)) / 2;
    draw_text(&mut img, x_label, x_label_x, HEIGHT - 30, 2, INK);

    let y_label_y = plot_top + (plot_height + text_width(y_label, 2)) / 2;
    draw_text_vertical(&mut img, y_label, 14, y_label_y, 2, INK);

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(Some(bytes))
}

/// Cut a category label to `MAX_LABEL_CHARS`, marking the cut with `...`
fn shorten_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(MAX_LABEL_CHARS).collect();
    short.push_str("...");
    short
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(img.height()) {
        for px in x..(x + w).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        0
    } else {
        (chars * (GLYPH_WIDTH + 1) - 1) * scale
    }
}

/// Draw left to right with the top-left corner at (x, y)
fn draw_text(img: &mut RgbaImage, text: &str, x: u32, y: u32, scale: u32, color: Rgba<u8>) {
    let mut cursor = x;
    for c in text.chars() {
        let rows = glyph(c);
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - gx)) != 0 {
                    fill_rect(img, cursor + gx * scale, y + gy as u32 * scale, scale, scale, color);
                }
            }
        }
        cursor += (GLYPH_WIDTH + 1) * scale;
    }
}

/// Draw bottom to top, rotated a quarter turn counter-clockwise, starting at (x, y)
fn draw_text_vertical(img: &mut RgbaImage, text: &str, x: u32, y: u32, scale: u32, color: Rgba<u8>) {
    let mut cursor = y;
    for c in text.chars() {
        let rows = glyph(c);
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - gx)) != 0 {
                    let px = x + gy as u32 * scale;
                    let py = cursor.saturating_sub((gx + 1) * scale);
                    fill_rect(img, px, py, scale, scale, color);
                }
            }
        }
        cursor = cursor.saturating_sub((GLYPH_WIDTH + 1) * scale);
    }
}

fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0; 7],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn counts(pairs: &[(&str, usize)]) -> BTreeMap<String, usize> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn has_color(png: &[u8], rgb: [u8; 3]) -> bool {
        let img = image::load_from_memory(png).unwrap().to_rgba8();
        img.pixels().any(|p| p.0 == [rgb[0], rgb[1], rgb[2], 255])
    }

    #[test]
    fn test_empty_counts_render_nothing() {
        assert!(sentiment_chart(&BTreeMap::new()).unwrap().is_none());
        assert!(satisfaction_chart(&BTreeMap::new()).unwrap().is_none());
    }

    #[test]
    fn test_renders_png() {
        let png = satisfaction_chart(&counts(&[("Satisfied", 3), ("Neutral", 1)]))
            .unwrap()
            .unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.height(), HEIGHT);
        assert!(img.width() >= MIN_WIDTH);
        assert!(has_color(&png, SATISFACTION_PALETTE[0]));
    }

    #[test]
    fn test_sentiment_colors_follow_label_order() {
        let png = sentiment_chart(&counts(&[("positive", 4), ("negative", 2), ("neutral", 1)]))
            .unwrap()
            .unwrap();
        for color in SENTIMENT_PALETTE {
            assert!(has_color(&png, color));
        }
    }

    #[test]
    fn test_zero_count_bar_is_not_drawn() {
        let png = render_bar_chart(&counts(&[("none", 0)]), "T", ("X", "Y"), &SATISFACTION_PALETTE)
            .unwrap()
            .unwrap();
        assert!(!has_color(&png, SATISFACTION_PALETTE[0]));
    }

    #[test]
    fn test_many_long_labels_widen_the_chart() {
        let wide: BTreeMap<String, usize> = (0..12)
            .map(|i| (format!("Extremely Long Category {}", i), i + 1))
            .collect();
        let png = satisfaction_chart(&wide).unwrap().unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert!(img.width() > MIN_WIDTH);
    }

    #[test]
    fn test_huge_label_keeps_chart_bounded() {
        let huge = "A".repeat(50_000);
        let png = satisfaction_chart(&counts(&[(huge.as_str(), 1), ("Satisfied", 2)]))
            .unwrap()
            .unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.height(), HEIGHT);
        assert!(img.width() <= MIN_WIDTH.max(MARGIN_LEFT + MAX_SLOT_WIDTH * 2 + MARGIN_RIGHT));
    }

    #[test]
    fn test_excess_categories_fold_into_other() {
        let many: BTreeMap<String, usize> = (0..500).map(|i| (format!("answer {:03}", i), 1)).collect();
        let png = satisfaction_chart(&many).unwrap().unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert!(img.width() <= MARGIN_LEFT + MAX_SLOT_WIDTH * MAX_BARS as u32 + MARGIN_RIGHT);
    }

    #[test]
    fn test_shorten_label() {
        assert_eq!(shorten_label("Satisfied"), "Satisfied");
        let long = "x".repeat(30);
        let short = shorten_label(&long);
        assert_eq!(short.chars().count(), MAX_LABEL_CHARS + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 2), 22);
    }
}
