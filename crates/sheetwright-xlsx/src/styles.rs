//! XLSX styles (styles.xml) writer

use std::collections::HashMap;

use crate::escape::escape_xml;
use sheetwright_core::number_format::ID_GENERAL;
use sheetwright_core::Workbook;

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// numFmtId of each cellXfs entry. Index 0 is always General.
    xfs: Vec<u32>,
    /// numFmtId -> cellXfs index
    xf_for_format: HashMap<u32, u32>,
    /// Custom formats to declare in `<numFmts>`: (numFmtId, code)
    custom_formats: Vec<(u32, String)>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut xfs = vec![ID_GENERAL];
        let mut xf_for_format = HashMap::new();
        xf_for_format.insert(ID_GENERAL, 0);

        // One cell format per registered number format, in registration order
        for (id, _) in workbook.number_formats().iter() {
            if xf_for_format.contains_key(&id) {
                continue;
            }
            xf_for_format.insert(id, xfs.len() as u32);
            xfs.push(id);
        }

        let custom_formats = workbook
            .number_formats()
            .custom_formats()
            .map(|(id, code)| (id, code.to_string()))
            .collect();

        Self {
            xfs,
            xf_for_format,
            custom_formats,
        }
    }

    /// cellXfs index for a cell's number format
    pub(crate) fn xf_id_for(&self, num_fmt_id: Option<u32>) -> u32 {
        num_fmt_id
            .and_then(|id| self.xf_for_format.get(&id).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !self.custom_formats.is_empty() {
            xml.push_str(&format!(
                "\n  <numFmts count=\"{}\">",
                self.custom_formats.len()
            ));
            for (id, code) in &self.custom_formats {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        // Fonts, fills and borders are fixed: only number formats vary.
        // The first two fills must be none and gray125.
        xml.push_str(
            r#"
  <fonts count="1">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.xfs.len()));
        for &num_fmt_id in &self.xfs {
            if num_fmt_id == ID_GENERAL {
                xml.push_str(
                    "\n    <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>",
                );
            } else {
                xml.push_str(&format!(
                    "\n    <xf numFmtId=\"{}\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\" applyNumberFormat=\"1\"/>",
                    num_fmt_id
                ));
            }
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetwright_core::CalendarDate;

    #[test]
    fn test_general_only() {
        let table = XlsxStyleTable::build(&Workbook::new());
        let xml = table.to_styles_xml();

        assert_eq!(table.xf_id_for(None), 0);
        assert!(!xml.contains("<numFmts"));
        assert!(xml.contains("<cellXfs count=\"1\">"));
        assert!(xml.contains("patternType=\"gray125\""));
    }

    #[test]
    fn test_date_formats_get_their_own_xf() {
        let mut wb = Workbook::new();
        let s = wb.add_worksheet().unwrap();
        wb.write_date(s, 0, 0, CalendarDate::new(2024, 12, 25)).unwrap();
        wb.write_date_with_format(s, 1, 0, CalendarDate::new(2024, 12, 25), "mm-dd-yy")
            .unwrap();
        wb.write_date_with_format(s, 2, 0, CalendarDate::new(2024, 12, 25), "d \"of\" mmmm")
            .unwrap();

        let table = XlsxStyleTable::build(&wb);
        assert_eq!(table.xf_id_for(Some(164)), 1);
        assert_eq!(table.xf_id_for(Some(14)), 2);
        assert_eq!(table.xf_id_for(Some(165)), 3);
        assert_eq!(table.xf_id_for(Some(999)), 0);

        let xml = table.to_styles_xml();
        assert!(xml.contains("<numFmts count=\"2\">"));
        assert!(xml.contains("<numFmt numFmtId=\"164\" formatCode=\"yyyy-mm-dd\"/>"));
        assert!(xml.contains("formatCode=\"d &quot;of&quot; mmmm\""));
        // Built-in codes are referenced but never declared
        assert!(!xml.contains("formatCode=\"mm-dd-yy\""));
        assert!(xml.contains("<xf numFmtId=\"14\""));
        assert!(xml.contains("<cellXfs count=\"4\">"));
    }
}
