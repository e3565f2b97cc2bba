//! Extraction tests against PDFs generated in memory.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use studygenie_core::Error;
use studygenie_extract::{extract_text_blocking, PdfTextExtractor};

/// Build a PDF with one page per entry in `pages`; an empty string yields a
/// page with no text operators.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

#[test]
fn test_extracts_single_page_text() {
    let pdf = build_pdf(&["Hello StudyGenie"]);
    let text = extract_text_blocking(&pdf).unwrap();
    assert!(text.contains("Hello"));
    assert_eq!(text, text.trim());
}

#[test]
fn test_extracts_every_page() {
    let pdf = build_pdf(&["Photosynthesis", "Chlorophyll"]);
    let text = extract_text_blocking(&pdf).unwrap();
    assert!(text.contains("Photosynthesis"));
    assert!(text.contains("Chlorophyll"));
    let first = text.find("Photosynthesis").unwrap();
    let second = text.find("Chlorophyll").unwrap();
    assert!(first < second);
}

#[test]
fn test_page_without_text_is_empty_document() {
    let pdf = build_pdf(&[""]);
    let err = extract_text_blocking(&pdf).unwrap_err();
    match err {
        Error::EmptyDocument(msg) => assert_eq!(msg, "No text found in PDF"),
        other => panic!("expected EmptyDocument, got {:?}", other),
    }
}

#[tokio::test]
async fn test_async_extraction() {
    let pdf = build_pdf(&["Mitochondria"]);
    let text = PdfTextExtractor::new()
        .extract(pdf, "cells.pdf")
        .await
        .unwrap();
    assert!(text.contains("Mitochondria"));
}
