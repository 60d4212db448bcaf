//! Tests for HeadingTransform

use rstest::rstest;

use md2doc::domain::{Boundary, HeadingLevel, HeadingTransform, Paragraph};
use md2doc::infrastructure::MemoryParagraph;

fn transform() -> HeadingTransform {
    HeadingTransform::new('#', true).unwrap()
}

#[rstest]
#[case("#heading1", "heading1", 1)]
#[case("###A multiple word title block", "A multiple word title block", 3)]
#[case("## spaced", " spaced", 2)]
#[case("######six", "six", 6)]
#[case("#a # b", "a # b", 1)]
fn given_marker_run_when_applying_then_strips_run_and_sets_level(
    #[case] input: &str,
    #[case] expected_text: &str,
    #[case] level: usize,
) {
    let mut p = MemoryParagraph::new(input);

    let counted = transform().apply(&mut p).unwrap();

    assert_eq!(counted, Some(level));
    assert_eq!(p.text().unwrap(), expected_text);
    assert_eq!(p.heading(), HeadingLevel::from_level(level).unwrap());
}

#[rstest]
#[case("a single line of text")]
#[case(" #indented marker")]
#[case("some text [with alink](http://www.foobar.com/#main/)")]
#[case("")]
fn given_no_leading_marker_when_applying_then_paragraph_unchanged(#[case] input: &str) {
    let mut p = MemoryParagraph::new(input);

    let counted = transform().apply(&mut p).unwrap();

    assert_eq!(counted, None);
    assert_eq!(p.text().unwrap(), input);
    assert_eq!(p.heading(), HeadingLevel::Normal);
}

#[test]
fn given_marker_only_line_when_applying_then_stripped_to_empty_heading() {
    let mut p = MemoryParagraph::new("###");

    assert_eq!(transform().apply(&mut p).unwrap(), Some(3));
    assert_eq!(p.text().unwrap(), "");
    assert_eq!(p.heading(), HeadingLevel::Heading3);
}

#[test]
fn given_more_than_six_markers_when_applying_then_stripped_without_style() {
    let mut p = MemoryParagraph::new("#######too deep");

    assert_eq!(transform().apply(&mut p).unwrap(), Some(7));
    assert_eq!(p.text().unwrap(), "too deep");
    assert_eq!(p.heading(), HeadingLevel::Normal);
}

#[test]
fn given_strip_overflow_disabled_when_applying_deep_heading_then_text_kept() {
    let transform = HeadingTransform::new('#', false).unwrap();
    let mut p = MemoryParagraph::new("#######too deep");

    assert_eq!(transform.apply(&mut p).unwrap(), Some(7));
    assert_eq!(p.text().unwrap(), "#######too deep");
    assert_eq!(p.heading(), HeadingLevel::Normal);
}

#[test]
fn given_custom_marker_when_applying_then_uses_that_marker() {
    let transform = HeadingTransform::new('=', true).unwrap();
    let mut p = MemoryParagraph::new("==Section");

    assert_eq!(transform.apply(&mut p).unwrap(), Some(2));
    assert_eq!(p.text().unwrap(), "Section");
    assert_eq!(p.heading(), HeadingLevel::Heading2);
}

#[test]
fn given_styled_text_when_stripping_marker_then_styles_shift_with_text() {
    let mut p = MemoryParagraph::new("#ab");
    p.set_bold(Boundary::new(2, 3).unwrap(), true).unwrap();

    transform().apply(&mut p).unwrap();

    assert_eq!(p.bold_ranges(), vec![Boundary::new(1, 2).unwrap()]);
}
