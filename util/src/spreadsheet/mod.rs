//! Minimal XLSX writer for single-sheet tabular exports.
//!
//! An `.xlsx` file is a zip package of SpreadsheetML parts. This module writes the
//! handful of parts Excel and LibreOffice need: content types, package and workbook
//! relationships, the workbook, one worksheet and a stylesheet with a single
//! header style. Text is written as inline strings, so no shared-string table is needed.

use std::io::{Cursor, Write};
use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// MIME type for responses carrying an XLSX workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const MAX_COLUMN_WIDTH: usize = 50;
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Style index of the header cells in `xl/styles.xml`.
const HEADER_STYLE: u8 = 1;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("failed to build xlsx package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("failed to write xlsx part: {0}")]
    Io(#[from] std::io::Error),
}

/// A single cell value. `Empty` cells are omitted from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn display_len(&self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::Text(s) => s.chars().count(),
            Cell::Number(n) => format_number(*n).len(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map(Cell::Text).unwrap_or(Cell::Empty)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map(|n| Cell::Number(n as f64)).unwrap_or(Cell::Empty)
    }
}

/// One worksheet: a styled header row followed by data rows.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: &str, header: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.chars().take(MAX_SHEET_NAME_CHARS).collect(),
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Width per column: longest value plus two, capped at 50.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);

        (0..columns)
            .map(|col| {
                let header_len = self.header.get(col).map(|h| h.chars().count()).unwrap_or(0);
                let longest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(Cell::display_len)
                    .fold(header_len, usize::max);
                (longest + 2).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Serializes the sheet into a complete `.xlsx` package.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, SpreadsheetError> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buf);
            let options = SimpleFileOptions::default();

            let parts: [(&str, String); 6] = [
                ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
                ("_rels/.rels", ROOT_RELS_XML.to_string()),
                ("xl/workbook.xml", self.workbook_xml()),
                ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
                ("xl/styles.xml", STYLES_XML.to_string()),
                ("xl/worksheets/sheet1.xml", self.sheet_xml()),
            ];

            for (path, body) in parts {
                zip.start_file(path, options)?;
                zip.write_all(body.as_bytes())?;
            }

            zip.finish()?;
        }
        Ok(buf.into_inner())
    }

    fn workbook_xml(&self) -> String {
        format!(
            r#"{XML_DECL}<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
            escape_xml(&self.name)
        )
    }

    fn sheet_xml(&self) -> String {
        let mut xml = format!(r#"{XML_DECL}<worksheet xmlns="{MAIN_NS}">"#);

        let widths = self.column_widths();
        if !widths.is_empty() {
            xml.push_str("<cols>");
            for (i, width) in widths.iter().enumerate() {
                xml.push_str(&format!(
                    r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#,
                    n = i + 1
                ));
            }
            xml.push_str("</cols>");
        }

        xml.push_str("<sheetData>");

        xml.push_str(r#"<row r="1">"#);
        for (col, title) in self.header.iter().enumerate() {
            push_cell(&mut xml, 1, col, &Cell::Text(title.clone()), Some(HEADER_STYLE));
        }
        xml.push_str("</row>");

        for (i, row) in self.rows.iter().enumerate() {
            let row_number = i + 2;
            xml.push_str(&format!(r#"<row r="{row_number}">"#));
            for (col, cell) in row.iter().enumerate() {
                push_cell(&mut xml, row_number, col, cell, None);
            }
            xml.push_str("</row>");
        }

        xml.push_str("</sheetData></worksheet>");
        xml
    }
}

fn push_cell(xml: &mut String, row: usize, col: usize, cell: &Cell, style: Option<u8>) {
    let reference = format!("{}{}", column_letter(col), row);
    let style = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();

    match cell {
        Cell::Empty => {}
        Cell::Text(text) => xml.push_str(&format!(
            r#"<c r="{reference}" t="inlineStr"{style}><is><t xml:space="preserve">{}</t></is></c>"#,
            escape_xml(text)
        )),
        Cell::Number(n) => xml.push_str(&format!(
            r#"<c r="{reference}"{style}><v>{}</v></c>"#,
            format_number(*n)
        )),
    }
}

/// Zero-based column index to spreadsheet letters (`0 → A`, `26 → AA`).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Escapes markup characters and drops control characters XML 1.0 cannot carry.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Style 1: bold white text on #366092, centred.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><color rgb="FFFFFFFF"/><name val="Calibri"/></font></fonts><fills count="3"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill><fill><patternFill patternType="solid"><fgColor rgb="FF366092"/><bgColor rgb="FF366092"/></patternFill></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;
