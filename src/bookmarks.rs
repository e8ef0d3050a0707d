//! PDF outline entries for the profile's section headings, built with `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::renderer::SectionAnchor;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or saved by `lopdf`.
    #[error("failed to process PDF bytes: {0}")]
    Pdf(#[from] lopdf::Error),
    /// A required catalog entry was missing from the document trailer.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object was not a dictionary, preventing outline injection.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A heading refers to a page that does not exist in the rendered document.
    #[error("section '{title}' refers to missing page {page_number}")]
    MissingPage { title: String, page_number: usize },
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Pdf(err.into())
    }
}

/// Adds a flat outline with one entry per section heading.
///
/// Each entry gets a `/Dest [page /Fit]` pointing at the page the heading starts on.  Headings
/// that were never laid out are skipped; when nothing remains the input is returned unchanged.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    sections: &[SectionAnchor],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;

    let pages = document.get_pages();
    let mut outline_entries = collect_outline_entries(&mut document, sections, &pages)?;

    if outline_entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    link_outline_entries(outlines_id, &mut document, &mut outline_entries);
    insert_outlines_root(outlines_id, &mut document, &outline_entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_outline_entries(
    document: &mut Document,
    sections: &[SectionAnchor],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::new();

    for section in sections {
        let Some(page_number) = section.page() else {
            continue;
        };
        let page_ref = pages
            .get(&(page_number as u32))
            .copied()
            .ok_or_else(|| BookmarkError::MissingPage {
                title: section.title().to_owned(),
                page_number,
            })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title: section.title().to_owned(),
        });
    }

    Ok(entries)
}

fn link_outline_entries(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &mut [OutlineEntry],
) {
    for index in 0..entries.len() {
        let mut dictionary = Dictionary::new();
        dictionary.set(
            "Title",
            Object::string_literal(entries[index].title.as_str()),
        );
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entries[index].page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }

        if index + 1 < entries.len() {
            dictionary.set("Next", Object::Reference(entries[index + 1].object_id));
        }

        document
            .objects
            .insert(entries[index].object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }

    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, Document, Object};

    use super::{apply_section_bookmarks, BookmarkError};
    use crate::renderer::SectionAnchor;

    fn single_page_pdf() -> Vec<u8> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
        });
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes).expect("save test PDF");
        bytes
    }

    fn outline_count(bytes: &[u8]) -> Option<i64> {
        let document = Document::load_mem(bytes).expect("parse PDF");
        let catalog_id = document
            .trailer
            .get(b"Root")
            .and_then(Object::as_reference)
            .expect("catalog reference");
        let catalog = document
            .get_object(catalog_id)
            .and_then(Object::as_dict)
            .expect("catalog dictionary");
        let outlines_id = catalog.get(b"Outlines").and_then(Object::as_reference).ok()?;
        document
            .get_object(outlines_id)
            .and_then(Object::as_dict)
            .and_then(|outlines| outlines.get(b"Count"))
            .and_then(Object::as_i64)
            .ok()
    }

    #[test]
    fn outline_is_linked_from_catalog() {
        let sections = [
            SectionAnchor::new("Our Mission", Some(1)),
            SectionAnchor::new("Our Vision", Some(1)),
        ];
        let bytes = apply_section_bookmarks(&single_page_pdf(), &sections).expect("add bookmarks");
        assert_eq!(outline_count(&bytes), Some(2));
    }

    #[test]
    fn unplaced_sections_leave_document_unchanged() {
        let input = single_page_pdf();
        let output = apply_section_bookmarks(&input, &[SectionAnchor::new("Our Mission", None)])
            .expect("apply bookmarks");
        assert_eq!(output, input);
    }

    #[test]
    fn missing_page_is_reported() {
        let result =
            apply_section_bookmarks(&single_page_pdf(), &[SectionAnchor::new("Our Mission", Some(3))]);
        assert!(matches!(
            result,
            Err(BookmarkError::MissingPage { page_number: 3, .. })
        ));
    }
}
