//! Locating the sections of a share report.
//!
//! Reports have been produced with more than one header spelling over time.
//! Every known spelling lives in [`SECTION_HEADERS`]; adding a spelling is a
//! one-line change there.

use super::report::ReportStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Medications,
    LogHistory,
}

pub(crate) struct SectionHeader {
    pub token: &'static str,
    pub kind: SectionKind,
    pub style: ReportStyle,
}

/// Known header spellings, tried in order. The first token found on a line
/// decides the section kind of that line.
pub(crate) const SECTION_HEADERS: &[SectionHeader] = &[
    SectionHeader {
        token: "Medication List",
        kind: SectionKind::Medications,
        style: ReportStyle::Legacy,
    },
    SectionHeader {
        token: "CURRENT ACTIVE MEDICATIONS",
        kind: SectionKind::Medications,
        style: ReportStyle::Current,
    },
    SectionHeader {
        token: "Health Log History",
        kind: SectionKind::LogHistory,
        style: ReportStyle::Legacy,
    },
    SectionHeader {
        token: "DAILY LOG HISTORY",
        kind: SectionKind::LogHistory,
        style: ReportStyle::Current,
    },
];

/// Header text a report of the given style writes for a section.
pub(crate) fn header_token(kind: SectionKind, style: ReportStyle) -> &'static str {
    SECTION_HEADERS
        .iter()
        .find(|h| h.kind == kind && h.style == style)
        .map(|h| h.token)
        .unwrap_or("")
}

/// The body of one section: the lines after its divider, up to the next header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section<'a> {
    pub kind: SectionKind,
    pub lines: Vec<&'a str>,
}

/// Lines that start a record (medication bullet, log entry or day delimiter).
pub(crate) fn starts_record(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('-') || trimmed.starts_with('*') || trimmed.starts_with('•')
}

fn is_divider(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '=')
}

/// Section kind named by a line, if it could be a header line.
///
/// Header lines start at the left margin; indented text belongs to a record.
fn header_kind(line: &str) -> Option<SectionKind> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let trimmed = line.trim();
    if trimmed.is_empty() || starts_record(trimmed) || trimmed.starts_with('[') {
        return None;
    }
    SECTION_HEADERS
        .iter()
        .find(|h| trimmed.contains(h.token))
        .map(|h| h.kind)
}

/// Lines allowed between a header and its divider (e.g. `From: .. To: ..`).
const MAX_HEADER_METADATA: usize = 2;

/// Kind of the section opened at `idx`, if a section opens there.
///
/// A header opens a paragraph (first line of the text or right after a blank
/// line) and is followed by a divider, with at most a couple of metadata
/// lines in between. Text inside an entry that merely mentions a header
/// token does not satisfy both.
fn section_start(lines: &[&str], idx: usize) -> Option<SectionKind> {
    let kind = header_kind(lines[idx])?;
    if idx > 0 && !lines[idx - 1].trim().is_empty() {
        return None;
    }
    for line in lines.iter().skip(idx + 1).take(MAX_HEADER_METADATA + 1) {
        if is_divider(line) {
            return Some(kind);
        }
        if line.trim().is_empty() || starts_record(line) || header_kind(line).is_some() {
            return None;
        }
    }
    None
}

/// Splits report text into sections, at most one per kind. A repeated
/// header of a kind already seen adds its body to the earlier section.
pub(crate) fn split_sections(text: &str) -> Vec<Section<'_>> {
    let lines: Vec<&str> = text.lines().collect();
    let headers: Vec<(usize, SectionKind)> = (0..lines.len())
        .filter_map(|idx| section_start(&lines, idx).map(|kind| (idx, kind)))
        .collect();

    let mut sections: Vec<Section<'_>> = Vec::new();
    for (pos, (start, kind)) in headers.iter().enumerate() {
        let end = headers.get(pos + 1).map(|(idx, _)| *idx).unwrap_or(lines.len());
        let body = &lines[start + 1..end];
        let body_start = body
            .iter()
            .position(|l| is_divider(l))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let body = &body[body_start..];

        match sections.iter_mut().find(|s| s.kind == *kind) {
            Some(existing) => existing.lines.extend_from_slice(body),
            None => sections.push(Section {
                kind: *kind,
                lines: body.to_vec(),
            }),
        }
    }
    sections
}
