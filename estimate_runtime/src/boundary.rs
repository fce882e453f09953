//! Boundary document parsing.
//!
//! Documents are KML: every `<coordinates>` element holds one vertex list of
//! whitespace separated `lng,lat[,altitude]` triples. The text content is
//! taken after XML decoding, so CDATA sections and character references are
//! unwrapped and comments are ignored. A document with no such element is
//! read as a single bare vertex list.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::{Coordinate, Site, SiteId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundaryParseError {
    #[error("boundary document contains no valid coordinates")]
    NoValidPoints,
    #[error("unterminated <{tag}> element at byte {offset}")]
    UnterminatedElement { tag: String, offset: usize },
    #[error("malformed boundary document at byte {offset}: {message}")]
    Xml { offset: usize, message: String },
}

/// One vertex list that produced at least one valid point.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBoundary {
    pub coordinate: Coordinate,
    pub vertices: Vec<Coordinate>,
}

impl ParsedBoundary {
    fn from_vertices(vertices: Vec<Coordinate>) -> Option<Self> {
        if vertices.is_empty() {
            return None;
        }
        let count = vertices.len() as f64;
        let lat = vertices.iter().map(|point| point.lat).sum::<f64>() / count;
        let lng = vertices.iter().map(|point| point.lng).sum::<f64>() / count;
        Some(Self {
            coordinate: Coordinate::new(lat, lng),
            vertices,
        })
    }

    pub fn into_site(self, id: SiteId, name: impl Into<String>) -> Site {
        Site {
            id,
            name: name.into(),
            coordinate: self.coordinate,
            boundary: self.vertices,
        }
    }
}

/// Parse every vertex list in `document`.
///
/// Lists without a single valid point are dropped; the document as a whole
/// is rejected only when nothing valid remains.
pub fn parse_boundary_document(document: &str) -> Result<Vec<ParsedBoundary>, BoundaryParseError> {
    let boundaries: Vec<ParsedBoundary> = coordinate_elements(document)?
        .iter()
        .filter_map(|list| ParsedBoundary::from_vertices(parse_vertex_list(list)))
        .collect();

    if boundaries.is_empty() {
        return Err(BoundaryParseError::NoValidPoints);
    }

    tracing::info!(
        target: "survey_estimate::boundary",
        lists = boundaries.len(),
        points = boundaries.iter().map(|b| b.vertices.len()).sum::<usize>(),
        "boundary.parsed"
    );
    Ok(boundaries)
}

/// Parse one whitespace separated list of `lng,lat[,altitude]` triples.
pub fn parse_vertex_list(list: &str) -> Vec<Coordinate> {
    list.split_whitespace()
        .filter_map(|token| {
            let point = parse_triple(token);
            if point.is_none() {
                tracing::debug!(
                    target: "survey_estimate::boundary",
                    token,
                    "boundary.triple_skipped"
                );
            }
            point
        })
        .collect()
}

fn parse_triple(token: &str) -> Option<Coordinate> {
    let mut parts = token.split(',');
    let lng = parse_component(parts.next()?)?;
    let lat = parse_component(parts.next()?)?;
    Some(Coordinate::new(lat, lng))
}

fn parse_component(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Text content of every `coordinates` element (matched on local name, so
/// prefixed tags count), or of the whole document when it has none.
fn coordinate_elements(document: &str) -> Result<Vec<String>, BoundaryParseError> {
    let mut reader = Reader::from_str(document);
    let mut bodies = Vec::new();
    let mut document_text = String::new();
    let mut found = false;
    // Open `coordinates` elements; nested ones fold into the outermost body.
    let mut open: Option<(String, usize)> = None;
    let mut depth = 0usize;
    let mut body = String::new();

    loop {
        let offset = reader.buffer_position();
        let event = reader.read_event().map_err(|err| BoundaryParseError::Xml {
            offset: reader.buffer_position(),
            message: err.to_string(),
        })?;
        match event {
            Event::Start(tag) if is_coordinates(tag.local_name().as_ref()) => {
                found = true;
                if depth == 0 {
                    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                    open = Some((name, offset));
                    body.clear();
                }
                depth += 1;
            }
            Event::Empty(tag) if is_coordinates(tag.local_name().as_ref()) => {
                found = true;
            }
            Event::End(tag) if depth > 0 && is_coordinates(tag.local_name().as_ref()) => {
                depth -= 1;
                if depth == 0 {
                    open = None;
                    bodies.push(std::mem::take(&mut body));
                }
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| BoundaryParseError::Xml {
                    offset,
                    message: err.to_string(),
                })?;
                push_text(depth, &mut body, &mut document_text, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data);
                push_text(depth, &mut body, &mut document_text, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((tag, offset)) = open {
        return Err(BoundaryParseError::UnterminatedElement { tag, offset });
    }
    Ok(if found { bodies } else { vec![document_text] })
}

fn is_coordinates(local_name: &[u8]) -> bool {
    local_name == b"coordinates"
}

// Adjacent text and CDATA chunks join without a separator, as DOM text content does.
fn push_text(depth: usize, body: &mut String, document_text: &mut String, text: &str) {
    if depth > 0 {
        body.push_str(text);
    }
    document_text.push_str(text);
}
