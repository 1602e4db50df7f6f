const BARS_MARKER: &str = "Division|";
const MATRICIAL_MARKER: &str = "UPC REPORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfLayout {
    Bars,
    Matricial,
    Unknown,
}

impl PdfLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            PdfLayout::Bars => "bars",
            PdfLayout::Matricial => "matricial",
            PdfLayout::Unknown => "unknown",
        }
    }
}

pub fn classify_first_page(text: &str) -> PdfLayout {
    if text.contains(BARS_MARKER) {
        PdfLayout::Bars
    } else if text.contains(MATRICIAL_MARKER) {
        PdfLayout::Matricial
    } else {
        PdfLayout::Unknown
    }
}
