// Primitives for reading the evaluation spreadsheets.

use calamine::DataType;
use std::collections::HashMap;

use crate::evaluation::{io_common::*, *};

pub fn read_xlsx_responses(path: &str, source: &ResponseSource) -> SurveyResult<ResponseBatch> {
    let section_key = source
        .section
        .as_deref()
        .context(MissingSectionSnafu { path })?;
    let section = parse_section(section_key)?;

    let wrange = get_range(path, source)?;
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu { path })?;
    debug!("read_xlsx_responses: header: {:?}", header);

    let responses = parse_rows(section, header, rows, &simplify_file_name(path))?;
    Ok(ResponseBatch {
        school_type: None,
        responses,
        overviews: Vec::new(),
    })
}

struct Columns {
    item: usize,
    availability: usize,
    quality: usize,
    observation: Option<usize>,
}

fn find_columns(header: &[DataType], origin: &str) -> SurveyResult<Columns> {
    let col_names: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, x)| match x {
            DataType::String(s) => Some((s.trim().to_lowercase(), idx)),
            _ => None,
        })
        .collect();
    debug!("find_columns: col_names: {:?}", col_names);

    let required = |names: &[&str]| {
        find_column(&col_names, names).context(ExcelMissingColumnSnafu {
            path: origin,
            column: names[0],
        })
    };
    Ok(Columns {
        item: required(&["item", "item id", "id"][..])?,
        availability: required(&["availability"][..])?,
        quality: required(&["quality"][..])?,
        observation: find_column(&col_names, &["observation", "observations", "remarks"]),
    })
}

fn find_column(col_names: &HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| col_names.get(*n).cloned())
}

fn cell_text(row: &[DataType], idx: usize) -> String {
    match row.get(idx) {
        Some(DataType::String(s)) => s.trim().to_string(),
        Some(DataType::Bool(true)) => "yes".to_string(),
        Some(DataType::Bool(false)) => "no".to_string(),
        Some(DataType::Int(i)) => i.to_string(),
        Some(DataType::Float(f)) => f.to_string(),
        _ => String::new(),
    }
}

/// Reads the rows following the header. Rows without an item id are skipped.
pub fn parse_rows<'a>(
    section: SectionId,
    header: &[DataType],
    rows: impl Iterator<Item = &'a [DataType]>,
    origin: &str,
) -> SurveyResult<Vec<ParsedResponse>> {
    let cols = find_columns(header, origin)?;
    let mut res: Vec<ParsedResponse> = Vec::new();
    for (idx, row) in rows.enumerate() {
        // The header is line 1
        let lineno = idx + 2;
        let item_id = cell_text(row, cols.item);
        if item_id.is_empty() {
            debug!("parse_rows: {}:{}: skipping blank row", origin, lineno);
            continue;
        }
        res.push(ParsedResponse {
            section,
            item_id,
            availability: cell_text(row, cols.availability),
            quality: cell_text(row, cols.quality),
            observation: cols
                .observation
                .map(|c| cell_text(row, c))
                .unwrap_or_default(),
            origin: format!("{}:{}", origin, lineno),
        });
    }
    Ok(res)
}

fn get_range(path: &str, source: &ResponseSource) -> SurveyResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &source.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = &source.excel_worksheet_name {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            _ => TooManyWorksheetsSnafu { path }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    #[test]
    fn reads_rows_with_columns_in_any_order() {
        let header = vec![s("Quality"), s("Item"), s("Observation"), s("Availability")];
        let rows = vec![
            vec![s("yes"), s("inf_library"), s("new books"), s("Yes")],
            vec![DataType::Empty, DataType::Empty, DataType::Empty, DataType::Empty],
            vec![s("N/A"), s("inf_water_supply"), DataType::Empty, DataType::Bool(true)],
        ];
        let parsed = parse_rows(
            SectionId::Infrastructure,
            &header,
            rows.iter().map(|r| r.as_slice()),
            "sheet.xlsx",
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].item_id, "inf_library");
        assert_eq!(parsed[0].observation, "new books");
        assert_eq!(parsed[1].availability, "yes");
        assert_eq!(parsed[1].origin, "sheet.xlsx:4");
        let r = parsed[1].to_response();
        assert_eq!(r.availability, Answer::Yes);
        assert_eq!(r.quality, Answer::NotApplicable);
    }

    #[test]
    fn short_rows_read_as_unanswered() {
        let header = vec![s("item"), s("availability"), s("quality")];
        let rows = vec![vec![s("inf_classrooms"), s("no")]];
        let parsed = parse_rows(
            SectionId::Infrastructure,
            &header,
            rows.iter().map(|r| r.as_slice()),
            "sheet.xlsx",
        )
        .unwrap();
        assert_eq!(parsed[0].quality, "");
        assert_eq!(parsed[0].to_response().quality, Answer::Unanswered);
    }

    #[test]
    fn missing_columns_are_reported() {
        let header = vec![s("item"), s("availability")];
        let rows: Vec<Vec<DataType>> = vec![];
        let err = parse_rows(
            SectionId::Infrastructure,
            &header,
            rows.iter().map(|r| r.as_slice()),
            "sheet.xlsx",
        )
        .unwrap_err();
        assert!(matches!(err, SurveyError::ExcelMissingColumn { .. }));
    }

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    fn xlsx_source(path: &str, worksheet: Option<&str>) -> ResponseSource {
        ResponseSource {
            provider: "xlsx".to_string(),
            file_path: path.to_string(),
            section: Some("infrastructure".to_string()),
            excel_worksheet_name: worksheet.map(|w| w.to_string()),
        }
    }

    #[test]
    fn named_worksheet_is_read() {
        let path = fixture("centre_sections.xlsx");
        let batch =
            read_xlsx_responses(&path, &xlsx_source(&path, Some("Infrastructure"))).unwrap();
        let ids: Vec<&str> = batch.responses.iter().map(|r| r.item_id.as_str()).collect();
        assert_eq!(ids, vec!["inf_workshops", "inf_library", "inf_water_supply"]);
        assert_eq!(batch.responses[0].observation, "Four trades equipped");
        assert_eq!(batch.responses[2].origin, "centre_sections.xlsx:5");
        assert!(batch
            .responses
            .iter()
            .all(|r| r.section == SectionId::Infrastructure));
    }

    #[test]
    fn several_worksheets_need_a_name() {
        let path = fixture("centre_sections.xlsx");
        assert!(matches!(
            read_xlsx_responses(&path, &xlsx_source(&path, None)),
            Err(SurveyError::TooManyWorksheets { .. })
        ));
    }

    #[test]
    fn single_worksheet_is_used_without_a_name() {
        let path = fixture("infrastructure_sheet.xlsx");
        let batch = read_xlsx_responses(&path, &xlsx_source(&path, None)).unwrap();
        assert_eq!(batch.responses.len(), 1);
        let r = batch.responses[0].to_response();
        assert_eq!(r.availability, Answer::No);
        assert_eq!(r.quality, Answer::Yes);
    }

    #[test]
    fn unknown_worksheet_is_reported() {
        let path = fixture("centre_sections.xlsx");
        assert!(read_xlsx_responses(&path, &xlsx_source(&path, Some("Canteen"))).is_err());
    }
}
