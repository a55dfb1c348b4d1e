//! Helpers for inspecting saved packages

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

pub type Attrs = BTreeMap<String, String>;

/// Entry names in archive order
pub fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Content of a part as text
pub fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// Attributes of every element with the given tag name, in document order
pub fn elements(xml: &str, tag: &str) -> Vec<Attrs> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut found = Vec::new();
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == tag.as_bytes() => {
                let attrs = e
                    .attributes()
                    .map(|a| {
                        let a = a.unwrap();
                        (
                            String::from_utf8(a.key.as_ref().to_vec()).unwrap(),
                            a.unescape_value().unwrap().into_owned(),
                        )
                    })
                    .collect();
                found.push(attrs);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    found
}

/// A parsed `<c>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub reference: String,
    pub cell_type: Option<String>,
    pub style: Option<u32>,
    pub value: Option<String>,
}

/// All cells of a worksheet part
pub fn cells(xml: &str) -> Vec<Cell> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut cells = Vec::new();
    let mut current: Option<Cell> = None;
    let mut in_value = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"c" => {
                let mut cell = Cell {
                    reference: String::new(),
                    cell_type: None,
                    style: None,
                    value: None,
                };
                for a in e.attributes() {
                    let a = a.unwrap();
                    let value = a.unescape_value().unwrap().into_owned();
                    match a.key.as_ref() {
                        b"r" => cell.reference = value,
                        b"t" => cell.cell_type = Some(value),
                        b"s" => cell.style = Some(value.parse().unwrap()),
                        _ => {}
                    }
                }
                if let Some(done) = current.replace(cell) {
                    cells.push(done);
                }
            }
            Event::Start(e) if e.name().as_ref() == b"v" => in_value = true,
            Event::End(e) if e.name().as_ref() == b"v" => in_value = false,
            Event::Text(t) if in_value => {
                if let Some(cell) = current.as_mut() {
                    cell.value = Some(t.unescape().unwrap().into_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    cells.extend(current);
    cells
}

/// Find a cell by reference
pub fn cell<'a>(cells: &'a [Cell], reference: &str) -> &'a Cell {
    cells
        .iter()
        .find(|c| c.reference == reference)
        .unwrap_or_else(|| panic!("no cell {}", reference))
}

/// Entries of `xl/sharedStrings.xml`
pub fn shared_strings(bytes: &[u8]) -> Vec<String> {
    let xml = part(bytes, "xl/sharedStrings.xml");
    let mut reader = Reader::from_str(&xml);

    let mut strings = Vec::new();
    let mut in_text = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Event::Start(e) if e.name().as_ref() == b"t" => in_text = true,
            Event::End(e) if e.name().as_ref() == b"t" => in_text = false,
            Event::Text(t) if in_text => {
                if let Some(last) = strings.last_mut() {
                    last.push_str(&t.unescape().unwrap());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    strings
}

/// numFmtId of each `cellXfs` entry
pub fn cell_xf_formats(bytes: &[u8]) -> Vec<u32> {
    let xml = part(bytes, "xl/styles.xml");
    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);

    let mut formats = Vec::new();
    let mut in_cell_xfs = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = true,
            Event::End(e) if e.name().as_ref() == b"cellXfs" => in_cell_xfs = false,
            Event::Start(e) | Event::Empty(e) if in_cell_xfs && e.name().as_ref() == b"xf" => {
                let id = e
                    .try_get_attribute("numFmtId")
                    .unwrap()
                    .unwrap()
                    .unescape_value()
                    .unwrap()
                    .parse()
                    .unwrap();
                formats.push(id);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    formats
}

/// Format code declared in `<numFmts>` for an id
pub fn format_code(bytes: &[u8], id: u32) -> Option<String> {
    let xml = part(bytes, "xl/styles.xml");
    elements(&xml, "numFmt")
        .into_iter()
        .find(|attrs| attrs.get("numFmtId") == Some(&id.to_string()))
        .and_then(|attrs| attrs.get("formatCode").cloned())
}

/// Decode `_xHHHH_` sequences the way spreadsheet readers do
pub fn decode_escapes(s: &str) -> String {
    let mut decoded = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        decoded.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let bytes = candidate.as_bytes();
        let is_escape = bytes.len() >= 7
            && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
            && bytes[6] == b'_';
        match is_escape
            .then(|| u32::from_str_radix(&candidate[2..6], 16).ok())
            .flatten()
            .and_then(char::from_u32)
        {
            Some(c) => {
                decoded.push(c);
                rest = &candidate[7..];
            }
            None => {
                decoded.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    decoded.push_str(rest);
    decoded
}
