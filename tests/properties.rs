//! Property-based tests for styling and highlight bands

use std::sync::Arc;

use proptest::prelude::*;
use synpane::style::font_variant;
use synpane::{
    Color, Font, LineHighlightOverlay, Rect, RecordingSurface, SpanIndex, Style, StyleTable,
    StyledTextModel,
};

const CATEGORIES: [&str; 4] = ["keyword", "string", "comment", "unknown"];

fn theme() -> Arc<StyleTable> {
    Arc::new(
        StyleTable::builder("props")
            .plain(Style::fg(Color::White))
            .category("keyword", Style::fg(Color::Red).with_bold())
            .category("string", Style::fg(Color::Green))
            .category("comment", Style::fg(Color::BrightBlack).with_italic())
            .build(),
    )
}

/// Text plus spans that all fit inside it
fn text_and_spans() -> impl Strategy<Value = (String, Vec<(usize, usize, usize)>)> {
    "[a-z \n]{1,80}".prop_flat_map(|text| {
        let len = text.chars().count();
        let span = (0..len).prop_flat_map(move |offset| {
            (Just(offset), 0..=len - offset, 0..CATEGORIES.len())
        });
        (Just(text), prop::collection::vec(span, 0..20))
    })
}

fn index_of(spans: &[(usize, usize, usize)]) -> SpanIndex {
    let mut index = SpanIndex::new();
    for &(offset, length, category) in spans {
        index.push(CATEGORIES[category], (offset, length));
    }
    index
}

/// Band top the slow way
fn expected_lines(
    lines: &[usize],
    offset: usize,
    total: usize,
    line_height: i32,
    top: i32,
    bottom: i32,
) -> Vec<usize> {
    lines
        .iter()
        .copied()
        .filter(|&line| line <= total + offset)
        .filter(|&line| {
            let y = (i64::from(line_height) * (line as i64 - offset as i64 - 1)).max(0);
            y < i64::from(bottom) && y + i64::from(line_height) > i64::from(top)
        })
        .collect()
}

proptest! {
    // Applying the same index twice gives the same styles
    #[test]
    fn restyling_is_idempotent((text, spans) in text_and_spans()) {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content(&text);
        let index = index_of(&spans);

        model.apply_style(index.clone());
        let first = model.styles().to_vec();
        model.apply_style(index);
        prop_assert_eq!(first, model.styles().to_vec());
    }

    // New content is plain whatever was applied before
    #[test]
    fn set_content_resets_to_plain((text, spans) in text_and_spans()) {
        let mut model = StyledTextModel::new();
        model.set_theme(theme());
        model.set_content(&text);
        model.apply_style(index_of(&spans));
        model.set_content(&text);

        let plain = Style::fg(Color::White);
        prop_assert!(model.styles().iter().all(|style| *style == plain));
        prop_assert_eq!(model.styles().len(), text.chars().count());
    }

    // Exactly the visible, in-document lines get a band
    #[test]
    fn bands_match_brute_force(
        lines in prop::collection::vec(0usize..300, 0..40),
        offset in 0usize..20,
        total in 1usize..200,
        line_height in 1i32..20,
        top in 0i32..3000,
        height in 0i32..600,
    ) {
        let mut overlay = LineHighlightOverlay::new();
        overlay.lines().replace(lines.iter().copied());
        overlay.set_line_number_offset(offset);

        let got: Vec<usize> = overlay
            .bands(top, top + height, line_height, total)
            .iter()
            .map(|band| band.line)
            .collect();
        prop_assert_eq!(got, expected_lines(&lines, offset, total, line_height, top, top + height));
    }

    // Painting issues one full-width fill per visible band
    #[test]
    fn paint_fills_full_width(
        lines in prop::collection::vec(1usize..50, 0..10),
        top in 0i32..40,
    ) {
        let overlay = LineHighlightOverlay::new();
        overlay.lines().replace(lines.iter().copied());
        let mut surface = RecordingSurface::new(Rect::new(3, top, 70, 10), 1);
        overlay.paint(&mut surface, 30);

        let expected = expected_lines(&lines, 0, 30, 1, top, top + 10);
        prop_assert_eq!(surface.fills.len(), expected.len());
        for (rect, color) in &surface.fills {
            prop_assert_eq!(rect.x, 3);
            prop_assert_eq!(rect.width, 70);
            prop_assert_eq!(*color, Color::Black);
        }
    }

    // Toggling bold twice restores the font
    #[test]
    fn bold_double_toggle_is_identity(
        family in "[a-zA-Z ]{1,12}",
        size in 6u16..40,
        bold: bool,
        italic: bool,
    ) {
        let font = Font { family, size, bold, italic };
        let toggled = font_variant(&font, !font.bold, font.italic);
        prop_assert_ne!(&toggled, &font);
        let restored = font_variant(&toggled, !toggled.bold, toggled.italic);
        prop_assert_eq!(restored, font);
    }
}
