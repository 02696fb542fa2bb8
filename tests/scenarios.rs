//! End-to-end behavior of the pane as a host sees it

use std::sync::Arc;

use synpane::display::TerminalFrame;
use synpane::lexer::{self, Lexer};
use synpane::{
    Color, Point, Rect, RecordingSurface, SpanIndex, Style, StyleOutcome, StyleTable, SyntaxPane,
};

fn black_red_theme() -> Arc<StyleTable> {
    Arc::new(
        StyleTable::builder("scenario")
            .plain(Style::fg(Color::Black))
            .highlighted_background(Color::Yellow)
            .category("keyword", Style::fg(Color::Red))
            .build(),
    )
}

#[test]
fn keyword_span_colors_only_its_characters() {
    let mut pane = SyntaxPane::new();
    pane.set_theme(black_red_theme());
    pane.set_content("ab\ncd\nef");
    let index: SpanIndex = [("keyword", vec![(0, 2)])].into_iter().collect();
    assert_eq!(pane.set_style(index), StyleOutcome::Applied { spans: 1, skipped: 0 });

    let colors: Vec<Color> = pane.model().styles().iter().map(|style| style.fg).collect();
    assert_eq!(&colors[..2], &[Color::Red, Color::Red]);
    assert!(colors[2..].iter().all(|&color| color == Color::Black));
    assert_eq!(colors.len(), 8);
}

#[test]
fn line_number_offset_never_decreases() {
    let mut pane = SyntaxPane::new();
    pane.set_line_number_offset(5);
    pane.set_line_number_offset(2);
    assert_eq!(pane.line_number_offset(), 5);
}

#[test]
fn lines_past_the_document_are_not_painted() {
    let mut pane = SyntaxPane::new();
    pane.set_theme(black_red_theme());
    pane.set_content("ab\ncd\nef");
    pane.set_highlighted_line_list([1, 100]);

    let mut surface = RecordingSurface::new(Rect::new(0, 0, 80, 300), 1);
    pane.paint_highlights(&mut surface);
    assert_eq!(surface.fills, vec![(Rect::new(0, 0, 80, 1), Color::Yellow)]);
}

#[test]
fn pointer_below_last_line_hovers_nothing() {
    let mut pane = SyntaxPane::new();
    pane.set_content("ab\ncd\nef");

    let line = {
        let frame = TerminalFrame::new(pane.model(), 0, 20, 40);
        pane.line_at(Point::new(1, 2), &frame)
    };
    assert_eq!(pane.hover_line(line), Some(3));

    let line = {
        let frame = TerminalFrame::new(pane.model(), 0, 20, 40);
        pane.line_at(Point::new(1, 7), &frame)
    };
    assert_eq!(pane.hover_line(line), None);
    assert_eq!(pane.hovered_line(), None);
}

#[test]
fn spans_wait_for_a_theme() {
    let mut pane = SyntaxPane::new();
    pane.set_content("ab\ncd\nef");
    let index: SpanIndex = [("keyword", vec![(3, 2)])].into_iter().collect();
    assert_eq!(pane.set_style(index), StyleOutcome::Deferred);

    pane.set_theme(black_red_theme());
    assert_eq!(pane.model().style_at(3).map(|style| style.fg), Some(Color::Red));
    assert_eq!(pane.model().style_at(2).map(|style| style.fg), Some(Color::Black));
}

#[test]
fn theme_switch_restyles_without_relexing() {
    let text = "fn main() {}\n";
    let mut pane = SyntaxPane::new();
    pane.set_theme(black_red_theme());
    pane.set_content(text);
    let rust = lexer::for_path(std::path::Path::new("main.rs")).unwrap();
    pane.set_style(rust.lex(text));
    assert_eq!(pane.model().style_at(0).map(|style| style.fg), Some(Color::Red));

    let green = Arc::new(
        StyleTable::builder("green")
            .plain(Style::fg(Color::White))
            .category("keyword", Style::fg(Color::Green).with_bold())
            .build(),
    );
    pane.set_theme(green);
    let first = pane.model().style_at(0).unwrap();
    assert_eq!(first.fg, Color::Green);
    assert!(first.bold);
    assert_eq!(pane.model().style_at(2).map(|style| style.fg), Some(Color::White));
}

#[test]
fn out_of_range_spans_are_skipped() {
    let mut pane = SyntaxPane::new();
    pane.set_theme(black_red_theme());
    pane.set_content("ab");
    let index: SpanIndex = [("keyword", vec![(0, 1), (1, 5)])].into_iter().collect();
    assert_eq!(pane.set_style(index), StyleOutcome::Applied { spans: 1, skipped: 1 });
    assert_eq!(pane.model().style_at(1).map(|style| style.fg), Some(Color::Black));
}

#[test]
fn hover_band_follows_offset() {
    let mut pane = SyntaxPane::new();
    pane.set_theme(black_red_theme());
    pane.set_content("a\nb\nc\nd");
    pane.set_line_number_offset(10);

    let line = {
        let frame = TerminalFrame::new(pane.model(), 0, 20, 40);
        pane.line_at(Point::new(0, 1), &frame)
    };
    assert_eq!(pane.hover_line(line), Some(12));

    let mut surface = RecordingSurface::new(Rect::new(0, 0, 40, 20), 1);
    pane.paint_highlights(&mut surface);
    assert_eq!(surface.fills, vec![(Rect::new(0, 1, 40, 1), Color::Yellow)]);
}
