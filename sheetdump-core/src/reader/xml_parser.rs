//! Direct XML reading of the parts calamine does not expose through `Sheets`

use crate::cell_ref::CellRange;
use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};
use zip::ZipArchive;

/// Map each sheet name to its worksheet part inside the archive
/// (e.g., "Data" -> "xl/worksheets/sheet1.xml")
pub fn resolve_sheet_paths(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<HashMap<String, String>> {
    let targets = read_workbook_relationships(archive)?;
    let mut paths = HashMap::new();

    let workbook_xml = match archive.by_name("xl/workbook.xml") {
        Ok(file) => file,
        Err(_) => return Ok(paths),
    };

    let mut reader = Reader::from_reader(BufReader::new(workbook_xml));
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rel_id = None;
                for attr in e.attributes().flatten() {
                    // r:id carries a namespace prefix, so match on the local part
                    match attr.key.local_name().as_ref() {
                        b"name" => name = Some(attr.unescape_value()?.into_owned()),
                        b"id" => rel_id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        _ => {}
                    }
                }
                if let (Some(name), Some(target)) =
                    (name, rel_id.and_then(|id| targets.get(&id)))
                {
                    paths.insert(name, target.clone());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paths)
}

/// Relationship id -> archive path, from xl/_rels/workbook.xml.rels
fn read_workbook_relationships(
    archive: &mut ZipArchive<impl Read + Seek>,
) -> Result<HashMap<String, String>> {
    let mut targets = HashMap::new();

    let rels_xml = match archive.by_name("xl/_rels/workbook.xml.rels") {
        Ok(file) => file,
        Err(_) => return Ok(targets),
    };

    let mut reader = Reader::from_reader(BufReader::new(rels_xml));
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = Some(String::from_utf8_lossy(&attr.value).into_owned()),
                        b"Target" => target = Some(attr.unescape_value()?.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, normalize_target(&target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

/// Targets are relative to `xl/` unless they start with `/`
fn normalize_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Extract merged cell ranges from a worksheet part
pub fn extract_merged_cells(
    archive: &mut ZipArchive<impl Read + Seek>,
    sheet_path: &str,
) -> Result<Vec<CellRange>> {
    let mut merged_cells = Vec::new();

    let sheet_xml = match archive.by_name(sheet_path) {
        Ok(file) => file,
        Err(_) => {
            tracing::debug!(sheet_path, "worksheet part not found, assuming no merged cells");
            return Ok(merged_cells);
        }
    };

    let mut reader = Reader::from_reader(BufReader::new(sheet_xml));
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"mergeCell" => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"ref" {
                        let ref_str = String::from_utf8_lossy(&attr.value);
                        if let Some(range) = CellRange::parse(&ref_str) {
                            merged_cells.push(range);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(merged_cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_target() {
        assert_eq!(normalize_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(normalize_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }
}
