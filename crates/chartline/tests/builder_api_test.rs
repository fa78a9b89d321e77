//! Integration tests for the FigureBuilder API
//!
//! These tests verify that the public API works and is usable.

use chartline::{ChartlineError, FigureBuilder, config::AppConfig, figure::FigureError, figures};

const SIMPLE: &str = r##"
    canvas = { width = 300, height = 200 }

    [palette.process]
    fill = "#2B4B8C"

    [[nodes]]
    x = 80
    y = 20
    width = 140
    height = 45
    role = "process"
    lines = ["Job Posted"]

    [[nodes]]
    x = 80
    y = 85
    width = 140
    height = 45
    role = "process"
    lines = ["Candidate Applies"]

    [[arrows]]
    kind = "straight"
    from = [150, 65]
    to = [150, 85]
"##;

#[test]
fn test_builder_api_exists() {
    let _builder = FigureBuilder::default();
}

#[test]
fn test_parse_simple_figure() {
    let builder = FigureBuilder::default();
    let result = builder.parse(SIMPLE);
    assert!(
        result.is_ok(),
        "Should parse valid figure: {:?}",
        result.err()
    );
}

#[test]
fn test_render_simple_figure() {
    let builder = FigureBuilder::default();
    let figure = builder.parse(SIMPLE).expect("Failed to parse figure");
    let svg = builder.render_svg(&figure).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Candidate Applies"));
}

#[test]
fn test_render_builtin_ats_workflow() {
    let builder = FigureBuilder::default();
    let figure = builder
        .parse(figures::ATS_WORKFLOW)
        .expect("Failed to parse built-in figure");
    let svg = builder.render_svg(&figure).expect("Failed to render");

    assert!(svg.contains("viewBox=\"0 0 900 750\""));
    for text in [
        "Job Posted",
        "AI Scoring Engine",
        "Talent Pool",
        "Final Decision",
        "Shortlist",
        "Request Interview",
        "Hold",
        "Color Legend",
        "Reject Actions",
    ] {
        assert!(svg.contains(text), "SVG should contain {text}");
    }
}

#[test]
fn test_parse_invalid_syntax_returns_figure_error_with_source() {
    let invalid_source = "this is not a figure!!!";

    let builder = FigureBuilder::default();
    let err = builder.parse(invalid_source).unwrap_err();
    match err {
        ChartlineError::Figure {
            err: FigureError::Syntax { .. },
            src,
        } => assert_eq!(src, invalid_source),
        other => panic!("Expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_parse_validation_error() {
    let source = SIMPLE.replacen("role = \"process\"", "role = \"missing\"", 1);

    let builder = FigureBuilder::default();
    let err = builder.parse(&source).unwrap_err();
    assert!(err.to_string().contains("unknown role `missing`"));
}

#[test]
fn test_builder_with_config() {
    let config: AppConfig = toml::from_str(
        r##"
        [style]
        shadow = false

        [arrow]
        color = "#000000"
        "##,
    )
    .expect("Valid config");

    let builder = FigureBuilder::new(config);
    let figure = builder.parse(SIMPLE).expect("Failed to parse");
    let svg = builder.render_svg(&figure).expect("Failed to render");
    assert!(!svg.contains("url(#shadow)"));
}

#[test]
fn test_write_svg() {
    let builder = FigureBuilder::default();
    let figure = builder.parse(SIMPLE).expect("Failed to parse");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("simple.svg");
    builder.write_svg(&figure, &path).expect("Failed to write");

    let written = std::fs::read_to_string(&path).expect("Output file exists");
    assert_eq!(written, builder.render_svg(&figure).expect("Failed to render"));
}

#[test]
fn test_write_svg_to_missing_directory() {
    let builder = FigureBuilder::default();
    let figure = builder.parse(SIMPLE).expect("Failed to parse");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = builder
        .write_svg(&figure, dir.path().join("missing").join("simple.svg"))
        .unwrap_err();
    assert!(matches!(err, ChartlineError::Export(_)));
}

#[test]
fn test_builder_reusability() {
    let builder = FigureBuilder::default();

    let first = builder.parse(SIMPLE).expect("Failed to parse first");
    let second = builder
        .parse(figures::ATS_WORKFLOW)
        .expect("Failed to parse second");

    let svg1 = builder.render_svg(&first).expect("Failed to render first");
    let svg2 = builder.render_svg(&second).expect("Failed to render second");

    assert!(svg1.contains("<svg"), "First SVG should be valid");
    assert!(svg2.contains("<svg"), "Second SVG should be valid");
    assert_eq!(svg1, builder.render_svg(&first).expect("Rendering is repeatable"));
}
