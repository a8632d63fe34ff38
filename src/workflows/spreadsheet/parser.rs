use super::normalizer::clean_header;
use super::SpreadsheetRow;
use std::io::Read;

pub(super) fn parse_rows<R: Read>(
    reader: R,
) -> Result<(Vec<String>, Vec<SpreadsheetRow>), csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(clean_header).collect();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.as_str(), record.get(index).unwrap_or("")))
            .collect::<SpreadsheetRow>();
        rows.push(row);
    }

    Ok((headers, rows))
}
