//! Integration tests for the complete card generation pipeline
//!
//! These tests validate the end-to-end workflow against a local mock HTTP
//! server:
//! - Fallback chain ordering across logo sources
//! - Spreadsheet parsing and startup validation
//! - Card rendering, persistence, and archive bundling
//! - Continue-on-error behavior for failing records

use httpmock::prelude::*;
use image::{Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use brand_cards::fetch::{LogoFetcher, SourceKind};
use brand_cards::{BrandRecord, CardGenError, Pipeline, PipelineConfig};

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn write_csv(dir: &Path, rows: &[[&str; 4]]) -> PathBuf {
    let mut csv = String::from("brand,website,brandfetch_logo,clearbit_logo\n");
    for row in rows {
        csv.push_str(&format!("{},{},{},{}\n", row[0], row[1], row[2], row[3]));
    }
    let path = dir.join("brands.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn config_for(dir: &Path, input: PathBuf) -> PipelineConfig {
    PipelineConfig::with_paths(input, dir.join("output"), dir.join("cards.zip"))
}

// ============================================================================
// Fetch Fallback Chain
// ============================================================================

#[test]
fn test_fallback_order_brandfetch_fails_clearbit_wins() {
    let server = MockServer::start();
    let bf = server.mock(|when, then| {
        when.method(GET).path("/bf.png");
        then.status(404);
    });
    let cb = server.mock(|when, then| {
        when.method(GET).path("/cb.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(20, 20, [30, 30, 200, 255]));
    });
    let favicon = server.mock(|when, then| {
        when.method(GET).path("/favicon.ico");
        then.status(200)
            .header("content-type", "image/x-icon")
            .body(png_bytes(16, 16, [1, 2, 3, 255]));
    });

    let record = BrandRecord {
        name: "Acme".into(),
        website: server.base_url(),
        brandfetch: server.url("/bf.png"),
        clearbit: server.url("/cb.png"),
    };

    let fetcher = LogoFetcher::new(&Default::default()).unwrap();
    let fetched = fetcher.fetch(&record).unwrap();

    // Clearbit's image, exactly; Brandfetch tried once, favicon never
    assert_eq!(fetched.source, SourceKind::Clearbit);
    assert_eq!(fetched.image.dimensions(), (20, 20));
    assert_eq!(fetched.image.get_pixel(10, 10).0, [30, 30, 200, 255]);
    bf.assert_hits(1);
    cb.assert_hits(1);
    favicon.assert_hits(0);
}

#[test]
fn test_undecodable_body_advances_the_chain() {
    let server = MockServer::start();
    let bf = server.mock(|when, then| {
        when.method(GET).path("/bf.png");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>service interstitial</html>");
    });
    let cb = server.mock(|when, then| {
        when.method(GET).path("/cb.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(20, 20, [200, 30, 30, 255]));
    });

    let record = BrandRecord {
        name: "Acme".into(),
        website: String::new(),
        brandfetch: server.url("/bf.png"),
        clearbit: server.url("/cb.png"),
    };

    let fetcher = LogoFetcher::new(&Default::default()).unwrap();
    let fetched = fetcher.fetch(&record).unwrap();

    assert_eq!(fetched.source, SourceKind::Clearbit);
    bf.assert_hits(1);
    cb.assert_hits(1);
}

#[test]
fn test_all_sources_exhausted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/bf.png");
        then.status(500);
    });

    let record = BrandRecord {
        name: "Acme".into(),
        website: String::new(),
        brandfetch: server.url("/bf.png"),
        clearbit: String::new(),
    };

    let fetcher = LogoFetcher::new(&Default::default()).unwrap();
    let err = fetcher.fetch(&record).unwrap_err();

    assert!(err.is_recoverable());
    match err {
        CardGenError::NoSourceAvailable { brand } => assert_eq!(brand, "Acme"),
        other => panic!("Expected NoSourceAvailable, got: {:?}", other),
    }
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_end_to_end_single_brand_via_clearbit() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(100, 100, [200, 30, 30, 255]));
    });

    let dir = tempfile::tempdir().unwrap();
    // Brandfetch column left empty: it must be skipped, not attempted
    let input = write_csv(
        dir.path(),
        &[["Acme", "https://acme.test", "", &server.url("/acme.png")]],
    );

    let summary = Pipeline::new(config_for(dir.path(), input)).unwrap().run().unwrap();

    assert_eq!(summary.produced, 1);
    assert_eq!(summary.skipped, 0);

    let card_path = dir.path().join("output").join("acme.png");
    let card = image::open(&card_path).unwrap().to_rgba8();
    assert_eq!(card.dimensions(), (600, 600));
    // Rounded corner stays transparent in the written PNG
    assert_eq!(card.get_pixel(0, 0).0[3], 0);

    // Archive holds exactly the produced card
    let zip_file = std::fs::File::open(dir.path().join("cards.zip")).unwrap();
    let archive = zip::ZipArchive::new(zip_file).unwrap();
    let names: Vec<_> = archive.file_names().collect();
    assert_eq!(names, vec!["acme.png"]);
}

#[test]
fn test_end_to_end_favicon_404_skips_record_and_continues() {
    let server = MockServer::start();
    let favicon = server.mock(|when, then| {
        when.method(GET).path("/favicon.ico");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET).path("/globex.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(40, 40, [30, 30, 200, 255]));
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        &[
            // Only the official site is present and its favicon 404s
            ["Missing Brand", &server.base_url(), "", ""],
            ["Globex", "", "", &server.url("/globex.png")],
        ],
    );

    let summary = Pipeline::new(config_for(dir.path(), input)).unwrap().run().unwrap();

    assert_eq!(summary.produced, 1);
    assert_eq!(summary.skipped, 1);
    favicon.assert_hits(1);

    assert!(!dir.path().join("output").join("missing_brand.png").exists());
    assert!(dir.path().join("output").join("globex.png").exists());
}

#[test]
fn test_end_to_end_dark_logo_gets_white_silhouette() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/dark.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(100, 100, [20, 20, 20, 255]));
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), &[["Umbra", "", "", &server.url("/dark.png")]]);

    Pipeline::new(config_for(dir.path(), input)).unwrap().run().unwrap();

    let card = image::open(dir.path().join("output").join("umbra.png"))
        .unwrap()
        .to_rgba8();
    // Background derived from the dark logo, logo recolored to white on top
    assert_eq!(card.get_pixel(300, 300).0, [255, 255, 255, 255]);
    assert!(card.get_pixel(50, 300).0[0] < 64);
}

#[test]
fn test_rerun_overwrites_existing_cards() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(50, 50, [200, 30, 30, 255]));
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(dir.path(), &[["Acme", "", "", &server.url("/acme.png")]]);
    let config = config_for(dir.path(), input);

    let first = Pipeline::new(config.clone()).unwrap().run().unwrap();
    let second = Pipeline::new(config).unwrap().run().unwrap();

    assert_eq!(first.produced, 1);
    assert_eq!(second.produced, 1);

    let entries: Vec<_> = std::fs::read_dir(dir.path().join("output"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

// ============================================================================
// Startup Validation
// ============================================================================

#[test]
fn test_missing_column_aborts_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("brands.csv");
    std::fs::write(&input, "brand,website\nAcme,https://acme.test\n").unwrap();

    let err = Pipeline::new(config_for(dir.path(), input))
        .unwrap()
        .run()
        .unwrap_err();

    assert!(!err.is_recoverable());
    match err {
        CardGenError::MissingColumns { columns } => {
            assert!(columns.contains(&"brandfetch_logo".to_string()));
            assert!(columns.contains(&"clearbit_logo".to_string()));
        }
        other => panic!("Expected MissingColumns, got: {:?}", other),
    }
    // Nothing was produced
    assert!(!dir.path().join("cards.zip").exists());
}

#[test]
fn test_unreadable_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.csv");

    let err = Pipeline::new(config_for(dir.path(), input))
        .unwrap()
        .run()
        .unwrap_err();

    assert!(!err.is_recoverable());
}

#[test]
fn test_blank_brand_names_are_ignored_silently() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/acme.png");
        then.status(200)
            .header("content-type", "image/png")
            .body(png_bytes(30, 30, [200, 30, 30, 255]));
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_csv(
        dir.path(),
        &[
            ["", "https://nameless.test", "", ""],
            ["Acme", "", "", &server.url("/acme.png")],
        ],
    );

    let summary = Pipeline::new(config_for(dir.path(), input)).unwrap().run().unwrap();

    // The blank row is neither produced nor counted as skipped
    assert_eq!(summary.produced, 1);
    assert_eq!(summary.skipped, 0);
}
