//! Rendering of the workbook model into OOXML package parts
//!
//! Every function here is pure: the same workbook always yields the same
//! bytes. Nothing time-dependent is written unless the workbook settings
//! carry an explicit creation timestamp.

use sheetwright_core::{CellAddress, CellValue, DateSystem, Workbook, Worksheet};

use crate::error::{XlsxError, XlsxResult};
use crate::escape::{escape_string_item, escape_xml, needs_space_preserve};
use crate::styles::XlsxStyleTable;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Width in pixels of the widest digit in the default font
const MAX_DIGIT_WIDTH: f64 = 7.0;
/// Cell padding in pixels
const COLUMN_PADDING: f64 = 5.0;

/// A named entry of the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Path inside the archive, e.g. `xl/workbook.xml`
    pub name: String,
    /// Part content
    pub data: Vec<u8>,
}

impl Part {
    fn xml(name: impl Into<String>, content: String) -> Self {
        Self {
            name: name.into(),
            data: content.into_bytes(),
        }
    }
}

/// Render every part of the package in archive order
///
/// `[Content_Types].xml` always comes first. A workbook without worksheets
/// is written with a single empty `Sheet1`, since spreadsheet applications
/// reject packages that have no sheets.
pub fn render_parts(workbook: &Workbook) -> XlsxResult<Vec<Part>> {
    if workbook.is_empty() {
        log::debug!("workbook has no worksheets, writing an empty Sheet1");
        let mut fallback = Workbook::with_settings(workbook.settings().clone());
        fallback.add_worksheet()?;
        return render_parts(&fallback);
    }

    let style_table = XlsxStyleTable::build(workbook);
    let date_system = workbook.settings().date_system();

    let mut parts = Vec::with_capacity(8 + workbook.sheet_count());
    parts.push(Part::xml("[Content_Types].xml", content_types_xml(workbook)));
    parts.push(Part::xml("_rels/.rels", root_rels_xml()));
    parts.push(Part::xml("docProps/app.xml", app_xml(workbook)));
    parts.push(Part::xml("docProps/core.xml", core_xml(workbook)));
    parts.push(Part::xml("xl/workbook.xml", workbook_xml(workbook)));
    parts.push(Part::xml(
        "xl/_rels/workbook.xml.rels",
        workbook_rels_xml(workbook),
    ));
    parts.push(Part::xml("xl/styles.xml", style_table.to_styles_xml()));
    parts.push(Part::xml(
        "xl/sharedStrings.xml",
        shared_strings_xml(workbook)?,
    ));

    for (i, sheet) in workbook.worksheets().enumerate() {
        let xml = worksheet_xml(sheet, i, &style_table, date_system)?;
        parts.push(Part::xml(format!("xl/worksheets/sheet{}.xml", i + 1), xml));
    }

    Ok(parts)
}

fn content_types_xml(workbook: &Workbook) -> String {
    let mut content = format!(
        r#"{}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
        XML_DECLARATION
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }

    content.push_str("\n</Types>");
    content
}

fn root_rels_xml() -> String {
    format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#,
        XML_DECLARATION
    )
}

fn app_xml(workbook: &Workbook) -> String {
    let count = workbook.sheet_count();
    let mut content = format!(
        r#"{}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>sheetwright</Application>
    <DocSecurity>0</DocSecurity>
    <ScaleCrop>false</ScaleCrop>
    <HeadingPairs>
        <vt:vector size="2" baseType="variant">
            <vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>
            <vt:variant><vt:i4>{}</vt:i4></vt:variant>
        </vt:vector>
    </HeadingPairs>
    <TitlesOfParts>
        <vt:vector size="{}" baseType="lpstr">"#,
        XML_DECLARATION, count, count
    );

    for sheet in workbook.worksheets() {
        content.push_str(&format!(
            "\n            <vt:lpstr>{}</vt:lpstr>",
            escape_xml(sheet.name())
        ));
    }

    content.push_str(
        r#"
        </vt:vector>
    </TitlesOfParts>
    <LinksUpToDate>false</LinksUpToDate>
    <SharedDoc>false</SharedDoc>
    <HyperlinksChanged>false</HyperlinksChanged>
    <AppVersion>12.0000</AppVersion>
</Properties>"#,
    );
    content
}

fn core_xml(workbook: &Workbook) -> String {
    let settings = workbook.settings();
    let mut content = format!(
        r#"{}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
        XML_DECLARATION
    );

    if let Some(author) = &settings.author {
        let author = escape_xml(author);
        content.push_str(&format!(
            "\n    <dc:creator>{}</dc:creator>\n    <cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            author, author
        ));
    }

    if let Some(created) = settings.created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
        content.push_str(&format!(
            "\n    <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\n    <dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
            stamp, stamp
        ));
    }

    content.push_str("\n</cp:coreProperties>");
    content
}

fn workbook_xml(workbook: &Workbook) -> String {
    let workbook_pr = if workbook.settings().date_1904 {
        r#"<workbookPr date1904="1"/>"#
    } else {
        "<workbookPr/>"
    };

    let mut content = format!(
        r#"{}
<workbook xmlns="{}" xmlns:r="{}">
    {}
    <bookViews>
        <workbookView xWindow="0" yWindow="0" windowWidth="16384" windowHeight="8192"/>
    </bookViews>
    <sheets>"#,
        XML_DECLARATION, NS_MAIN, NS_RELATIONSHIPS, workbook_pr
    );

    for (i, sheet) in workbook.worksheets().enumerate() {
        content.push_str(&format!(
            r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            escape_xml(sheet.name()),
            i + 1,
            i + 1
        ));
    }

    content.push_str(
        r#"
    </sheets>
</workbook>"#,
    );
    content
}

fn workbook_rels_xml(workbook: &Workbook) -> String {
    let mut content = format!(
        r#"{}
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        XML_DECLARATION
    );

    for i in 0..workbook.sheet_count() {
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }

    let styles_rid = workbook.sheet_count() + 1;
    content.push_str(&format!(
        r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
        styles_rid,
        styles_rid + 1
    ));

    content.push_str("\n</Relationships>");
    content
}

fn shared_strings_xml(workbook: &Workbook) -> XlsxResult<String> {
    let table = workbook.shared_strings();

    // count = string cells, uniqueCount = table entries
    let mut references = 0usize;
    for sheet in workbook.worksheets() {
        for (row, col, cell) in sheet.iter_cells() {
            if let CellValue::String(id) = cell.value {
                if table.get(id).is_none() {
                    return Err(XlsxError::Serialization(format!(
                        "cell {} on sheet {:?} refers to missing string {}",
                        CellAddress::new(row, col),
                        sheet.name(),
                        id
                    )));
                }
                references += 1;
            }
        }
    }

    let mut content = format!(
        r#"{}
<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
        XML_DECLARATION,
        NS_MAIN,
        references,
        table.len()
    );

    for (_, s) in table.iter() {
        if needs_space_preserve(s) {
            content.push_str(&format!(
                "\n    <si><t xml:space=\"preserve\">{}</t></si>",
                escape_string_item(s)
            ));
        } else {
            content.push_str(&format!("\n    <si><t>{}</t></si>", escape_string_item(s)));
        }
    }

    content.push_str("\n</sst>");
    Ok(content)
}

fn worksheet_xml(
    sheet: &Worksheet,
    index: usize,
    style_table: &XlsxStyleTable,
    date_system: DateSystem,
) -> XlsxResult<String> {
    let dimension = sheet
        .used_range()
        .map(|r| r.to_a1_string())
        .unwrap_or_else(|| "A1".to_string());
    let tab_selected = if index == 0 { " tabSelected=\"1\"" } else { "" };

    let mut content = format!(
        r#"{}
<worksheet xmlns="{}" xmlns:r="{}">
    <dimension ref="{}"/>
    <sheetViews>
        <sheetView{} workbookViewId="0"/>
    </sheetViews>
    <sheetFormatPr defaultRowHeight="15"/>"#,
        XML_DECLARATION, NS_MAIN, NS_RELATIONSHIPS, dimension, tab_selected
    );

    // Column widths
    let mut cols = sheet.column_widths().peekable();
    if cols.peek().is_some() {
        content.push_str("\n    <cols>");
        for (col, width) in cols {
            let n = col as u32 + 1;
            if width == 0.0 {
                content.push_str(&format!(
                    "\n        <col min=\"{}\" max=\"{}\" width=\"0\" hidden=\"1\" customWidth=\"1\"/>",
                    n, n
                ));
            } else {
                content.push_str(&format!(
                    "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                    n,
                    n,
                    column_width_to_xml(width)
                ));
            }
        }
        content.push_str("\n    </cols>");
    }

    // Cell data (sparse, row-major)
    content.push_str("\n    <sheetData>");
    for row in sheet.rows() {
        let mut row_attrs = format!("r=\"{}\"", row + 1);
        if let Some(height) = sheet.row_height(row) {
            row_attrs.push_str(&format!(" ht=\"{}\"", height));
            if height == 0.0 {
                row_attrs.push_str(" hidden=\"1\"");
            }
            row_attrs.push_str(" customHeight=\"1\"");
        }

        let mut cells = sheet.iter_row(row).peekable();
        if cells.peek().is_none() {
            content.push_str(&format!("\n        <row {}/>", row_attrs));
            continue;
        }

        content.push_str(&format!("\n        <row {}>", row_attrs));
        for (col, cell) in cells {
            let cell_ref = CellAddress::new(row, col).to_a1_string();

            let xf_id = style_table.xf_id_for(cell.num_fmt_id);
            let style_attr = if xf_id != 0 {
                format!(" s=\"{}\"", xf_id)
            } else {
                String::new()
            };

            match &cell.value {
                CellValue::String(id) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                        cell_ref, style_attr, id
                    ));
                }
                CellValue::Number(n) => {
                    if !n.is_finite() {
                        return Err(XlsxError::Serialization(format!(
                            "cell {} on sheet {:?} holds non-finite number {}",
                            cell_ref,
                            sheet.name(),
                            n
                        )));
                    }
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref, style_attr, n
                    ));
                }
                CellValue::Integer(i) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref, style_attr, i
                    ));
                }
                CellValue::Boolean(b) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        if *b { 1 } else { 0 }
                    ));
                }
                CellValue::Date(date) | CellValue::FormattedDate { date, .. } => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        date_system.date_serial(*date)?
                    ));
                }
                CellValue::DateTime(datetime) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        date_system.datetime_serial(*datetime)?
                    ));
                }
                CellValue::Empty => {
                    // Keep format-only cells
                    if xf_id != 0 {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}/>",
                            cell_ref, style_attr
                        ));
                    }
                }
            }
        }
        content.push_str("\n        </row>");
    }
    content.push_str("\n    </sheetData>");

    content.push_str(
        r#"
    <pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>
</worksheet>"#,
    );

    log::trace!(
        "rendered sheet {:?}: {} cells, {} bytes",
        sheet.name(),
        sheet.cell_count(),
        content.len()
    );
    Ok(content)
}

/// Convert a width in characters to the stored `<col width>` value
///
/// The stored width includes the cell padding and is truncated to 1/256 of
/// a character, which is what spreadsheet applications write themselves.
pub(crate) fn column_width_to_xml(width: f64) -> f64 {
    let pixels = if width < 1.0 {
        (width * (MAX_DIGIT_WIDTH + COLUMN_PADDING) + 0.5).trunc()
    } else {
        (width * MAX_DIGIT_WIDTH + 0.5).trunc() + COLUMN_PADDING
    };
    (pixels / MAX_DIGIT_WIDTH * 256.0).trunc() / 256.0
}
