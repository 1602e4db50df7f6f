use crate::model::ExtractedRecord;

const HEADER_TOKENS: [&str; 3] = ["Division|", "Style|", "UPC|"];
const MIN_FIELDS: usize = 8;
const MIN_UPC_DIGITS: usize = 11;

pub fn parse_bars_document(pages: &[String]) -> Vec<ExtractedRecord> {
    let full_text = pages.join("\n");
    let mut records = Vec::new();

    for line in full_text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if HEADER_TOKENS.iter().all(|token| line.contains(token)) {
            continue;
        }
        if !line.contains('|') {
            continue;
        }

        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < MIN_FIELDS {
            continue;
        }

        let style = parts[1];
        let upc = parts[2];
        let color_code = parts[4];
        let color_name = parts[5];
        let size = parts[7];

        let upc_digits: String = upc.chars().filter(char::is_ascii_digit).collect();
        if upc_digits.len() < MIN_UPC_DIGITS {
            continue;
        }

        records.push(ExtractedRecord::new(
            style.to_uppercase(),
            color_code.to_uppercase(),
            color_name.to_uppercase(),
            size.to_uppercase(),
            upc_digits,
        ));
    }

    records
}
