//! In-memory PDF fixtures for unit tests.
//!
//! Every page gets a distinct `MediaBox` width so tests can tell pages apart
//! after a merge.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Build a single-level document with one page per width.
pub fn build_pdf(widths: &[i64]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for &width in widths {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), 792.into()],
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => widths.len() as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Build a document whose pages inherit `MediaBox` and `Rotate` from an
/// intermediate node of the page tree.
///
/// Layout: root -> [intermediate -> [page, page], page]
pub fn build_nested_pdf(inherited_width: i64, own_width: i64) -> Document {
    let mut doc = Document::with_version("1.4");
    let root_id = doc.new_object_id();
    let node_id = doc.new_object_id();

    let inherited_pages: Vec<ObjectId> = (0..2)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => node_id,
            })
        })
        .collect();

    let own_page = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => root_id,
        "MediaBox" => vec![0.into(), 0.into(), own_width.into(), 792.into()],
    });

    doc.objects.insert(
        node_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Parent" => root_id,
            "Kids" => inherited_pages.iter().map(|&id| Object::Reference(id)).collect::<Vec<_>>(),
            "Count" => 2,
            "MediaBox" => vec![0.into(), 0.into(), inherited_width.into(), 792.into()],
            "Rotate" => 90,
        }),
    );

    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(node_id), Object::Reference(own_page)],
            "Count" => 3,
            "Resources" => Dictionary::new(),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Serialize a fixture built by [`build_pdf`].
pub fn pdf_bytes(widths: &[i64]) -> Vec<u8> {
    let mut doc = build_pdf(widths);
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// `MediaBox` width of every page, in page order.
pub fn page_widths(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}
