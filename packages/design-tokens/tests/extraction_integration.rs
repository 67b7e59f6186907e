//! End-to-end extraction tests over the mock render engine.

use tokio_util::sync::CancellationToken;

use design_tokens::{
    CanonicalValue, ColorConfig, ColorExtractor, ExtractionConfig, ExtractionPipeline,
    MockPage, MockRenderEngine, NamingScheme, PageDescriptor, SpacingConfig, SpacingExtractor,
};

fn descriptors(urls: &[&str]) -> Vec<PageDescriptor> {
    urls.iter().map(|url| PageDescriptor::new(*url)).collect()
}

#[tokio::test]
async fn same_color_on_two_pages_aggregates_across_the_run() {
    let engine = MockRenderEngine::new()
        .with_page(MockPage::new("https://a/").with_element("p", &[("color", "rgb(0, 0, 0)")]))
        .with_page(MockPage::new("https://b/").with_element("p", &[("color", "rgb(0, 0, 0)")]));

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(2),
        NamingScheme::default(),
    );
    let report = extractor
        .extract(&engine, &descriptors(&["https://a/", "https://b/"]))
        .await
        .unwrap();

    assert_eq!(report.tokens.len(), 1);
    let token = &report.tokens[0];
    assert_eq!(token.usage_count, 2);
    assert_eq!(
        token.source_urls,
        vec!["https://a/".to_string(), "https://b/".to_string()]
    );
    assert!(token.name.contains("000000"));
    match &token.value {
        CanonicalValue::Color(color) => assert_eq!(color.hex, "#000000"),
        other => panic!("expected color value, got {other:?}"),
    }
}

#[tokio::test]
async fn spacing_sixteen_px_converts_and_names_to_scale_position_four() {
    let engine = MockRenderEngine::new()
        .with_page(MockPage::new("https://a/").with_element("section", &[("margin", "16px")]));

    let extractor = SpacingExtractor::new(
        SpacingConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    let report = extractor
        .extract(&engine, &descriptors(&["https://a/"]))
        .await
        .unwrap();

    assert_eq!(report.tokens.len(), 1);
    let token = &report.tokens[0];
    assert_eq!(token.name, "margin-4");
    match &token.value {
        CanonicalValue::Dimension(dimension) => {
            assert_eq!(dimension.value, 16.0);
            assert_eq!(dimension.unit.as_str(), "px");
        }
        other => panic!("expected dimension value, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_color_is_skipped_without_failing_the_run() {
    let engine = MockRenderEngine::new().with_page(
        MockPage::new("https://a/")
            .with_element("p", &[("color", "not-a-color")])
            .with_element("h1", &[("color", "rgb(10, 20, 30)")]),
    );

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    let report = extractor
        .extract(&engine, &descriptors(&["https://a/"]))
        .await
        .unwrap();

    assert_eq!(report.tokens.len(), 1);
    assert_eq!(report.tokens[0].name, "color-text-0a141e");
    assert_eq!(report.stats.skipped_samples, 1);
    assert!(report.stats.is_clean());
}

#[tokio::test]
async fn failed_page_is_skipped_and_the_session_still_closes() {
    let engine = MockRenderEngine::new()
        .with_page(MockPage::new("https://a/").with_element("p", &[("color", "rgb(0, 0, 0)")]))
        .with_page(MockPage::new("https://c/").with_element("p", &[("color", "rgb(0, 0, 0)")]));
    let probe = engine.clone();

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    // https://b/ is not registered: navigation fails for it.
    let report = extractor
        .extract(
            &engine,
            &descriptors(&["https://a/", "https://b/", "https://c/"]),
        )
        .await
        .unwrap();

    assert_eq!(report.stats.pages_visited, 2);
    assert_eq!(report.stats.failed_pages, vec!["https://b/".to_string()]);
    assert_eq!(report.tokens.len(), 1);
    assert_eq!(report.tokens[0].usage_count, 2);
    assert_eq!(probe.open_sessions(), 0);
}

#[tokio::test]
async fn evaluation_failure_counts_as_a_failed_page() {
    let engine = MockRenderEngine::new()
        .with_page(
            MockPage::new("https://a/")
                .with_element("p", &[("color", "rgb(0, 0, 0)")])
                .failing_evaluation(),
        )
        .with_page(MockPage::new("https://b/").with_element("p", &[("color", "rgb(0, 0, 0)")]));
    let probe = engine.clone();

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    let report = extractor
        .extract(&engine, &descriptors(&["https://a/", "https://b/"]))
        .await
        .unwrap();

    assert_eq!(report.stats.failed_pages, vec!["https://a/".to_string()]);
    assert_eq!(report.tokens[0].usage_count, 1);
    assert_eq!(probe.open_sessions(), 0);
}

#[tokio::test]
async fn engine_that_cannot_start_aborts_the_run() {
    let engine = MockRenderEngine::new().failing_acquire();

    let extractor = ColorExtractor::new(ColorConfig::default(), NamingScheme::default());
    let result = extractor.extract(&engine, &descriptors(&["https://a/"])).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn cancellation_stops_before_further_pages() {
    let engine = MockRenderEngine::new()
        .with_page(MockPage::new("https://a/").with_element("p", &[("color", "rgb(0, 0, 0)")]));
    let probe = engine.clone();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    let report = extractor
        .extract_with_cancel(&engine, &descriptors(&["https://a/"]), Some(&cancel))
        .await
        .unwrap();

    assert_eq!(report.stats.pages_visited, 0);
    assert!(report.tokens.is_empty());
    // The session was still acquired and released.
    assert_eq!(probe.acquired_sessions(), 1);
    assert_eq!(probe.open_sessions(), 0);
}

#[tokio::test]
async fn pre_rendered_handles_bypass_navigation() {
    // Engine has no registered pages; the descriptor carries the handle.
    let engine = MockRenderEngine::new();

    let descriptor = MockPage::new("https://a/")
        .with_element("p", &[("color", "rgb(255, 0, 0)")])
        .into_descriptor();

    let extractor = ColorExtractor::new(
        ColorConfig::new().with_minimum_occurrences(1),
        NamingScheme::default(),
    );
    let report = extractor.extract(&engine, &[descriptor]).await.unwrap();

    assert_eq!(report.tokens.len(), 1);
    assert_eq!(report.tokens[0].name, "color-text-ff0000");
}

#[tokio::test]
async fn full_pipeline_produces_sorted_reports_per_category() {
    let home = MockPage::new("https://site/")
        .with_element(
            "h1",
            &[
                ("font-family", "Inter, sans-serif"),
                ("font-size", "32px"),
                ("font-weight", "700"),
                ("line-height", "1.2"),
                ("color", "rgb(17, 17, 17)"),
                ("margin", "24px"),
            ],
        )
        .with_element(
            "p",
            &[
                ("font-family", "Inter, sans-serif"),
                ("font-size", "16px"),
                ("font-weight", "400"),
                ("line-height", "1.5"),
                ("color", "rgb(51, 51, 51)"),
                ("margin", "16px"),
            ],
        )
        .with_element(
            "button",
            &[
                ("color", "rgb(255, 255, 255)"),
                ("background-color", "rgb(0, 102, 204)"),
                ("border-radius", "6px"),
                ("transition-duration", "0.2s"),
                ("transition-timing-function", "ease-in-out"),
            ],
        );

    let about = MockPage::new("https://site/about")
        .with_element(
            "p",
            &[
                ("font-family", "Inter, sans-serif"),
                ("font-size", "16px"),
                ("font-weight", "400"),
                ("line-height", "1.5"),
                ("color", "rgb(51, 51, 51)"),
                ("margin", "16px"),
            ],
        )
        .with_element(
            "button",
            &[
                ("color", "rgb(255, 255, 255)"),
                ("background-color", "rgb(0, 102, 204)"),
                ("border-radius", "6px"),
                ("transition-duration", "0.2s"),
                ("transition-timing-function", "ease-in-out"),
            ],
        );

    let engine = MockRenderEngine::new().with_page(home).with_page(about);
    let pipeline = ExtractionPipeline::new(engine)
        .with_config(ExtractionConfig::new().with_minimum_occurrences(2));

    let report = pipeline
        .run(&descriptors(&["https://site/", "https://site/about"]))
        .await
        .unwrap();

    // Colors: body text (2), button white (2), button blue (2); the h1
    // color appeared once and is below threshold.
    let colors = report.colors.as_ref().unwrap();
    assert_eq!(colors.tokens.len(), 3);
    assert!(colors.tokens.iter().all(|token| token.usage_count == 2));
    assert!(colors.stats.below_threshold >= 1);

    // Spacing: margin 16px twice; margin 24px once drops out.
    let spacing = report.spacing.as_ref().unwrap();
    assert_eq!(spacing.tokens.len(), 1);
    assert_eq!(spacing.tokens[0].name, "margin-4");

    // Typography: body-text style seen on both pages.
    let typography = report.typography.as_ref().unwrap();
    assert!(typography
        .tokens
        .iter()
        .any(|token| token.name == "body-text" && token.usage_count == 2));

    // Borders: the 6px radius on both buttons, banded to md.
    let borders = report.borders.as_ref().unwrap();
    assert_eq!(borders.tokens.len(), 1);
    assert_eq!(borders.tokens[0].name, "border-radius-md");

    // Animation: instant ease-in-out transition on both buttons.
    let animation = report.animation.as_ref().unwrap();
    assert_eq!(animation.tokens.len(), 1);
    assert_eq!(animation.tokens[0].name, "transition-instant-ease-in-out");

    // Sort invariant holds in every category.
    for category in report.categories() {
        for pair in category.tokens.windows(2) {
            assert!(pair[0].usage_count >= pair[1].usage_count);
        }
    }

    assert!(report.failed_pages().is_empty());
}

#[tokio::test]
async fn empty_page_list_produces_empty_reports() {
    let engine = MockRenderEngine::new();
    let pipeline = ExtractionPipeline::new(engine);

    let report = pipeline.run(&[]).await.unwrap();
    assert_eq!(report.token_count(), 0);
    for category in report.categories() {
        assert!(category.tokens.is_empty());
        assert_eq!(category.stats.pages_visited, 0);
    }
}
