//! PDF decoding backend abstraction.
//!
//! [`PdfBackend`] isolates the concrete PDF library from the rest of the
//! pipeline: the document handle, TOC inference, indexing, and resume
//! parsing only ever see page counts, metadata, positioned fragments, and
//! outline nodes. Any library able to decode bytes into that shape can
//! satisfy the trait; [`LopdfBackend`] is the bundled implementation.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Metadata, OutlineNode, TextFragment};

/// Abstract interface to a decoded PDF document.
pub trait PdfBackend: Send {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Document metadata. Best-effort: a missing or corrupt Info
    /// dictionary yields an empty record.
    fn metadata(&self) -> Metadata;

    /// Page dimensions in points, or `None` for an unknown page number.
    fn page_size(&self, page: u32) -> Option<(f32, f32)>;

    /// Positioned text fragments for a page, in content-stream order.
    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>>;

    /// The native outline (bookmarks), with destinations resolved to page
    /// numbers where possible. Empty when the document carries none.
    fn outline(&self) -> Vec<OutlineNode>;
}

/// Text decoding fallback when no font encoding is available: UTF-16BE
/// with BOM, then UTF-8, then Latin-1.
pub fn decode_plain_text(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, units @ ..] = bytes {
        let code_units = units
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return char::decode_utf16(code_units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    fn pages(&self) -> BTreeMap<u32, ObjectId> {
        self.doc.get_pages()
    }

    /// Decompressed content stream for a page. A `Contents` array merges
    /// its parts into one logical stream.
    fn content_bytes(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page = self.doc.get_dictionary(page_id)?;
        eprintln!("DEBUG page dict keys: {:?}", page.iter().map(|(k,_)| String::from_utf8_lossy(k).to_string()).collect::<Vec<_>>());
        let contents = page.get(b"Contents")?;
        eprintln!("DEBUG contents = {:?}", contents);
        match contents {
            Object::Reference(id) => {
                eprintln!("DEBUG stream_bytes for id {:?}", id);
                let r = self.stream_bytes(*id);
                eprintln!("DEBUG stream_bytes result ok={}", r.is_ok());
                r
            }
            Object::Array(parts) => {
                let mut merged = Vec::new();
                for part in parts {
                    if let Object::Reference(id) = part {
                        if let Ok(bytes) = self.stream_bytes(*id) {
                            merged.extend_from_slice(&bytes);
                            merged.push(b' ');
                        }
                    }
                }
                Ok(merged)
            }
            _ => Err(Error::Unreadable("page content is not a stream".to_string())),
        }
    }

    fn stream_bytes(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(stream) => Ok(stream.decompressed_content()?),
            _ => Err(Error::Unreadable(
                "content reference is not a stream".to_string(),
            )),
        }
    }

    fn info_dict(&self) -> Option<&lopdf::Dictionary> {
        let info = self.doc.trailer.get(b"Info").ok()?;
        self.doc.get_dictionary(info.as_reference().ok()?).ok()
    }

    /// Follow `First`/`Next` links through one outline level, recursing
    /// into children.
    fn walk_outline(
        &self,
        first: ObjectId,
        pages: &BTreeMap<u32, ObjectId>,
        out: &mut Vec<OutlineNode>,
    ) {
        let mut next = Some(first);
        while let Some(id) = next {
            let Ok(item) = self.doc.get_dictionary(id) else {
                break;
            };

            let mut node = OutlineNode::new(
                dict_text(item, b"Title").unwrap_or_default(),
                self.destination_page(item, pages),
            );
            if let Some(child) = reference(item, b"First") {
                self.walk_outline(child, pages, &mut node.children);
            }
            out.push(node);

            next = reference(item, b"Next");
        }
    }

    /// An item without any destination yields `None`. One whose
    /// destination exists but cannot be resolved (a named destination, a
    /// dangling page reference) falls back to page 1.
    fn destination_page(
        &self,
        item: &lopdf::Dictionary,
        pages: &BTreeMap<u32, ObjectId>,
    ) -> Option<u32> {
        let dest = match item.get(b"Dest") {
            Ok(dest) => dest.clone(),
            Err(_) => {
                // GoTo action dictionary
                let action = match item.get(b"A").ok()? {
                    Object::Reference(id) => self.doc.get_object(*id).ok()?,
                    direct => direct,
                };
                action.as_dict().ok()?.get(b"D").ok()?.clone()
            }
        };
        Some(self.resolve_destination(&dest, pages).unwrap_or(1))
    }

    /// Explicit destinations are `[page /XYZ ...]` arrays; named
    /// destinations stay unresolved.
    fn resolve_destination(
        &self,
        dest: &Object,
        pages: &BTreeMap<u32, ObjectId>,
    ) -> Option<u32> {
        let dest = match dest {
            Object::Reference(id) => self.doc.get_object(*id).ok()?,
            direct => direct,
        };
        let target = dest.as_array().ok()?.first()?.as_reference().ok()?;
        pages
            .iter()
            .find_map(|(number, id)| (*id == target).then_some(*number))
    }
}

impl PdfBackend for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.pages().len() as u32
    }

    fn metadata(&self) -> Metadata {
        let Some(info) = self.info_dict() else {
            return Metadata::default();
        };
        Metadata {
            title: dict_text(info, b"Title"),
            author: dict_text(info, b"Author"),
            subject: dict_text(info, b"Subject"),
            keywords: dict_text(info, b"Keywords"),
            creator: dict_text(info, b"Creator"),
            producer: dict_text(info, b"Producer"),
            created: dict_text(info, b"CreationDate")
                .as_deref()
                .and_then(parse_pdf_date),
            modified: dict_text(info, b"ModDate")
                .as_deref()
                .and_then(parse_pdf_date),
        }
    }

    fn page_size(&self, page: u32) -> Option<(f32, f32)> {
        let page_id = *self.pages().get(&page)?;
        let media_box = self
            .doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|object| object.as_array().ok())
            .and_then(|array| match array.as_slice() {
                [_, _, w, h, ..] => {
                    Some((w.as_float().unwrap_or(612.0), h.as_float().unwrap_or(792.0)))
                }
                _ => None,
            });
        // US Letter when no usable MediaBox exists
        Some(media_box.unwrap_or((612.0, 792.0)))
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        let pages = self.pages();
        let page_id = *pages.get(&page).ok_or(Error::PageOutOfRange {
            page,
            pages: pages.len() as u32,
        })?;

        let content = self.content_bytes(page_id)?;
        eprintln!("DEBUG content_bytes ok, len={}", content.len());
        let operations = Content::decode(&content)?.operations;
        eprintln!("DEBUG decode ok, ops={}", operations.len());
        let fonts_result = self.doc.get_page_fonts(page_id);
        eprintln!("DEBUG fonts_result = {:?}", fonts_result.as_ref().map(|f| f.len()));

        let walker = ContentWalker {
            doc: &self.doc,
            fonts: self.doc.get_page_fonts(page_id)?,
            matrix: TextMatrix::IDENTITY,
            font: Vec::new(),
            size: 12.0,
            in_text: false,
            out: Vec::new(),
        };
        let fragments = walker.run(&operations);

        log::debug!("page {}: {} text fragments", page, fragments.len());
        Ok(fragments)
    }

    fn outline(&self) -> Vec<OutlineNode> {
        let first = self
            .doc
            .catalog()
            .ok()
            .and_then(|catalog| reference(catalog, b"Outlines"))
            .and_then(|id| self.doc.get_dictionary(id).ok())
            .and_then(|outlines| reference(outlines, b"First"));

        let mut nodes = Vec::new();
        if let Some(first) = first {
            self.walk_outline(first, &self.pages(), &mut nodes);
        }
        nodes
    }
}

/// Content-stream interpreter state: walks the operations of one page and
/// accumulates positioned text fragments.
struct ContentWalker<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
    matrix: TextMatrix,
    font: Vec<u8>,
    size: f32,
    in_text: bool,
    out: Vec<TextFragment>,
}

impl ContentWalker<'_> {
    fn run(mut self, operations: &[Operation]) -> Vec<TextFragment> {
        for op in operations {
            self.step(op);
        }
        self.out
    }

    fn step(&mut self, op: &Operation) {
        let num = |index: usize, or: f32| {
            op.operands
                .get(index)
                .and_then(|operand| operand.as_float().ok())
                .unwrap_or(or)
        };

        match op.operator.as_str() {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::IDENTITY;
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    self.font = name.clone();
                }
                if let Some(size) = op.operands.get(1).and_then(|o| o.as_float().ok()) {
                    self.size = size;
                }
            }
            "Td" | "TD" => self.matrix.translate(num(0, 0.0), num(1, 0.0)),
            "Tm" => {
                if op.operands.len() >= 6 {
                    self.matrix = TextMatrix([
                        num(0, 1.0),
                        num(1, 0.0),
                        num(2, 0.0),
                        num(3, 1.0),
                        num(4, 0.0),
                        num(5, 0.0),
                    ]);
                }
            }
            "T*" => self.matrix.next_line(),
            "Tj" => {
                if self.in_text {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        let text = self.decode(bytes);
                        self.emit(text);
                    }
                }
            }
            "TJ" => {
                if self.in_text {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        self.show_array(items);
                    }
                }
            }
            "'" | "\"" => {
                self.matrix.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if self.in_text {
                    if let Some(Object::String(bytes, _)) = op.operands.get(index) {
                        let text = self.decode(bytes);
                        self.emit(text);
                    }
                }
            }
            _ => {}
        }
    }

    /// TJ interleaves strings with kerning adjustments in 1/1000
    /// text-space units; a large negative adjustment marks a word break.
    fn show_array(&mut self, items: &[Object]) {
        const WORD_GAP: f32 = 200.0;

        let mut text = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => text.push_str(&self.decode(bytes)),
                adjustment => {
                    if let Ok(shift) = adjustment.as_float() {
                        if -shift > WORD_GAP && !text.is_empty() && !text.ends_with(' ') {
                            text.push(' ');
                        }
                    }
                }
            }
        }
        self.emit(text);
    }

    /// Decode a string through the current font's encoding when known.
    fn decode(&self, bytes: &[u8]) -> String {
        if let Some(encoding) = self
            .fonts
            .get(&self.font)
            .and_then(|font| font.get_font_encoding(self.doc).ok())
        {
            if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                return text;
            }
        }
        decode_plain_text(bytes)
    }

    fn emit(&mut self, text: String) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = self.matrix.origin();
        let normalized: String = text.nfc().collect();
        self.out.push(TextFragment::new(
            normalized,
            x,
            y,
            self.size * self.matrix.font_scale(),
        ));
    }
}

/// Text matrix `[a b c d e f]`, tracked for fragment positions and
/// effective font sizes.
#[derive(Clone, Copy)]
struct TextMatrix([f32; 6]);

impl TextMatrix {
    const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translate(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, e, f] = self.0;
        self.0[4] = e + tx * a + ty * c;
        self.0[5] = f + tx * b + ty * d;
    }

    /// T* and the quote operators; TL is not tracked, assume 12pt leading.
    fn next_line(&mut self) {
        self.0[5] -= 12.0 * self.0[3];
    }

    fn origin(&self) -> (f32, f32) {
        (self.0[4], self.0[5])
    }

    /// Scale the matrix applies to the selected font size.
    fn font_scale(&self) -> f32 {
        let [a, _, c, ..] = self.0;
        (a * a + c * c).sqrt()
    }
}

/// Read a text value out of a PDF dictionary.
fn dict_text(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_plain_text(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

fn reference(dict: &lopdf::Dictionary, key: &[u8]) -> Option<ObjectId> {
    dict.get(key).ok()?.as_reference().ok()
}

/// PDF Info dates look like `D:YYYYMMDDHHmmSS` plus an optional timezone
/// suffix; everything after the year may be omitted.
fn parse_pdf_date(raw: &str) -> Option<DateTime<Utc>> {
    let digits: String = raw
        .strip_prefix("D:")?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let year: i32 = digits.get(0..4)?.parse().ok()?;
    let field = |range: std::ops::Range<usize>, or: u32| {
        digits.get(range).and_then(|v| v.parse().ok()).unwrap_or(or)
    };

    NaiveDate::from_ymd_opt(year, field(4..6, 1), field(6..8, 1))?
        .and_hms_opt(field(8..10, 0), field(10..12, 0), field(12..14, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}
