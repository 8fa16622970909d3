//! Test: converting a directory of documents concurrently

use crate::helpers::*;
use bettermd::convert::{output_path_in, ConversionEvent};
use bettermd::{BatchConverter, ConversionJob, ConversionStrategy, Converter, Format};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn jobs_for(inputs: &[std::path::PathBuf], out: &TempDir, to: Format) -> Vec<ConversionJob> {
    inputs
        .iter()
        .map(|input| {
            let output = output_path_in(out.path(), input, to);
            ConversionJob::new(input, output, None, to).unwrap()
        })
        .collect()
}

#[tokio::test]
async fn test_mixed_sources_to_rst() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let inputs = vec![
        write_file(src.path(), "intro.md", "# Intro\n\nHello."),
        write_file(src.path(), "guide.markdown", "## Steps\n\n1. one\n2. two"),
        write_file(src.path(), "page.html", "<h1>Page</h1><p>From <em>HTML</em></p>"),
    ];

    let batch = BatchConverter::new(Converter::default(), ConversionStrategy::LimitedParallel(2));
    let outcomes = batch.run(jobs_for(&inputs, &out, Format::Rst)).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.is_success()));

    let intro = std::fs::read_to_string(out.path().join("intro.rst")).unwrap();
    assert_eq!(intro, "=====\nIntro\n=====\n\nHello.\n");

    let guide = std::fs::read_to_string(out.path().join("guide.rst")).unwrap();
    assert_eq!(guide, "Steps\n-----\n\n1. one\n2. two\n");

    let page = std::fs::read_to_string(out.path().join("page.rst")).unwrap();
    assert_in_order(&page, &["Page", "From *HTML*"]);
}

#[tokio::test]
async fn test_failures_are_isolated_and_reported() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let inputs = vec![
        write_file(src.path(), "good.md", "fine"),
        src.path().join("absent.md"),
        write_file(src.path(), "also_good.html", "<p>ok</p>"),
    ];

    let finished = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let (finished_count, failed_count) = (finished.clone(), failed.clone());

    let mut batch = BatchConverter::new(Converter::default(), ConversionStrategy::Parallel);
    batch.add_event_handler(move |event| match event {
        ConversionEvent::JobCompleted { .. } => {
            finished_count.fetch_add(1, Ordering::SeqCst);
        }
        ConversionEvent::JobFailed { .. } => {
            finished_count.fetch_add(1, Ordering::SeqCst);
            failed_count.fetch_add(1, Ordering::SeqCst);
        }
        _ => {}
    });

    let outcomes = batch.run(jobs_for(&inputs, &out, Format::Markdown)).await;

    assert_eq!(finished.load(Ordering::SeqCst), 3);
    assert_eq!(failed.load(Ordering::SeqCst), 1);

    let inputs_in_order: Vec<_> = outcomes.iter().map(|o| o.input.clone()).collect();
    assert_eq!(inputs_in_order, inputs);
    assert!(!outcomes[1].is_success());

    assert_eq!(std::fs::read_to_string(out.path().join("good.md")).unwrap(), "fine\n");
    assert_eq!(std::fs::read_to_string(out.path().join("also_good.md")).unwrap(), "ok\n");
}
