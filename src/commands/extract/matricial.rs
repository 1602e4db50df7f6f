use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

use crate::model::ExtractedRecord;

pub struct MatricialScanner {
    style_line: Regex,
    size_token: Regex,
    color_line: Regex,
    numbers_only: Regex,
}

impl MatricialScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            style_line: Regex::new(r"^([A-Z]{2}\d+[A-Z]?)\b")
                .context("failed to compile style-line regex")?,
            size_token: Regex::new(r"\*+\s*([A-Z0-9/]+)\s*\*+")
                .context("failed to compile size-token regex")?,
            color_line: Regex::new(
                r"^([A-Z0-9]{3,5})\s+([A-Z0-9/ .\-]+?)(?:\s+((?:\d{11,14}\s+)*\d{11,14}))?\s*$",
            )
            .context("failed to compile color-line regex")?,
            numbers_only: Regex::new(r"^(?:\d{11,14}\s+)*\d{11,14}$")
                .context("failed to compile continuation regex")?,
        })
    }

    pub fn parse_document(&self, pages: &[String]) -> Vec<ExtractedRecord> {
        let mut records = Vec::new();
        for (page_index, page) in pages.iter().enumerate() {
            self.scan_page(page, page_index + 1, &mut records);
        }
        records
    }

    fn scan_page(&self, page: &str, page_number: usize, records: &mut Vec<ExtractedRecord>) {
        let raw_lines: Vec<&str> = page.lines().map(str::trim_end).collect();
        let mut current_style: Option<String> = None;
        let mut current_sizes: Vec<String> = Vec::new();

        let mut i = 0;
        while i < raw_lines.len() {
            let line = raw_lines[i].trim();
            if line.is_empty() || line.starts_with('-') {
                i += 1;
                continue;
            }

            if let Some(captures) = self.style_line.captures(line) {
                current_style = Some(captures[1].to_uppercase());
                current_sizes = self.size_tokens(line);

                // Size headers wrap onto following lines under print
                // reflow; consume lines holding only more size tokens.
                let mut j = i + 1;
                while j < raw_lines.len() {
                    let next = raw_lines[j].trim();
                    if next.is_empty() {
                        break;
                    }
                    if self.style_line.is_match(next) || self.color_line.is_match(next) {
                        break;
                    }
                    let extra = self.size_tokens(next);
                    if extra.is_empty() {
                        break;
                    }
                    current_sizes.extend(extra);
                    j += 1;
                }

                i = j;
                continue;
            }

            if let Some(captures) = self.color_line.captures(line) {
                if current_style.is_some() && !current_sizes.is_empty() {
                    let color_code = captures[1].to_uppercase();
                    let color_name = captures[2].trim().to_uppercase();
                    let mut upcs: Vec<String> = captures
                        .get(3)
                        .map(|group| {
                            group
                                .as_str()
                                .split_whitespace()
                                .map(ToOwned::to_owned)
                                .collect()
                        })
                        .unwrap_or_default();

                    let mut k = i + 1;
                    while k < raw_lines.len() {
                        let next = raw_lines[k].trim();
                        if self.numbers_only.is_match(next) {
                            upcs.extend(next.split_whitespace().map(ToOwned::to_owned));
                            k += 1;
                            continue;
                        }
                        break;
                    }

                    let style = current_style.as_deref().unwrap_or_default();
                    if current_sizes.len() != upcs.len() {
                        warn!(
                            page = page_number,
                            style,
                            color = %color_code,
                            sizes = current_sizes.len(),
                            upcs = upcs.len(),
                            "size/UPC count mismatch; pairing up to the shorter list"
                        );
                    }

                    let pair_count = current_sizes.len().min(upcs.len());
                    for index in 0..pair_count {
                        records.push(ExtractedRecord::new(
                            style,
                            color_code.clone(),
                            color_name.clone(),
                            current_sizes[index].to_uppercase(),
                            upcs[index].clone(),
                        ));
                    }

                    i = k;
                    continue;
                }
            }

            i += 1;
        }
    }

    fn size_tokens(&self, line: &str) -> Vec<String> {
        self.size_token
            .captures_iter(line)
            .map(|captures| captures[1].to_string())
            .collect()
    }
}
