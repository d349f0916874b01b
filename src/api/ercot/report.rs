//! Settlement point price report parsing
//!
//! The report is one shared HTML document listing every settlement point as
//! a table row. Within a row the `td.tdLeft` cells hold, at fixed offsets:
//! cell 0 the settlement point identifier, cell 1 the LMP, cell 3 the
//! settlement point price. Parsing the document once yields a keyed lookup
//! value; callers resolve their location identifier against it and never
//! touch the HTML themselves.

use std::collections::HashMap;

use scraper::{Html, Selector};
use tracing::warn;

use crate::api::FetchError;

/// Price and LMP read from one report row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Settlement point price
    pub price: f64,
    /// Locational marginal price
    pub lmp: f64,
}

/// One parsed report document, keyed by settlement point identifier
#[derive(Debug, Clone, Default)]
pub struct PriceReport {
    rows: HashMap<String, PriceQuote>,
}

// Column offsets within a row's td.tdLeft cells
const IDENTIFIER_CELL: usize = 0;
const LMP_CELL: usize = 1;
const PRICE_CELL: usize = 3;

impl PriceReport {
    /// Parse a report document into a keyed lookup.
    ///
    /// Rows with missing or non-numeric price/LMP cells are logged and
    /// skipped; a later lookup for them reports no data.
    pub fn parse(html: &str) -> Result<Self, FetchError> {
        let row_selector = Selector::parse("tr")
            .map_err(|e| FetchError::Parse(format!("row selector: {}", e)))?;
        let cell_selector = Selector::parse("td.tdLeft")
            .map_err(|e| FetchError::Parse(format!("cell selector: {}", e)))?;

        let document = Html::parse_document(html);
        let mut rows = HashMap::new();

        for row in document.select(&row_selector) {
            let cells: Vec<String> = row
                .select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();

            if cells.len() <= PRICE_CELL {
                continue;
            }

            let identifier = cells[IDENTIFIER_CELL].clone();
            if identifier.is_empty() {
                continue;
            }

            let price = match parse_cell(&cells[PRICE_CELL]) {
                Some(v) => v,
                None => {
                    warn!("Invalid price format for {}: {}", identifier, cells[PRICE_CELL]);
                    continue;
                }
            };
            let lmp = match parse_cell(&cells[LMP_CELL]) {
                Some(v) => v,
                None => {
                    warn!("Invalid LMP format for {}: {}", identifier, cells[LMP_CELL]);
                    continue;
                }
            };

            rows.insert(identifier, PriceQuote { price, lmp });
        }

        Ok(Self { rows })
    }

    /// Look up the quote for a settlement point identifier
    pub fn quote(&self, identifier: &str) -> Option<PriceQuote> {
        self.rows.get(identifier).copied()
    }

    /// Like [`quote`](Self::quote), but an absent identifier is an error
    pub fn require_quote(&self, identifier: &str) -> Result<PriceQuote, FetchError> {
        self.quote(identifier)
            .ok_or_else(|| FetchError::NoData(identifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Numeric cell with optional comma thousands separators
fn parse_cell(text: &str) -> Option<f64> {
    text.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_FIXTURE: &str = r#"
        <html><body><table>
        <tr><th>Settlement Point</th><th>LMP</th><th>Hub</th><th>Price</th><th>Zone</th></tr>
        <tr>
            <td class="tdLeft">BAC_RN_ALL</td>
            <td class="tdLeft">24.50</td>
            <td class="tdLeft">HB_HOUSTON</td>
            <td class="tdLeft">1,032.25</td>
            <td class="tdLeft">LZ_HOUSTON</td>
        </tr>
        <tr>
            <td class="tdLeft">TGS_GT01</td>
            <td class="tdLeft">-3.75</td>
            <td class="tdLeft">HB_SOUTH</td>
            <td class="tdLeft">18.90</td>
            <td class="tdLeft">LZ_SOUTH</td>
        </tr>
        <tr>
            <td class="tdLeft">RN_ECEC_HOLT</td>
            <td class="tdLeft">n/a</td>
            <td class="tdLeft">HB_WEST</td>
            <td class="tdLeft">40.00</td>
            <td class="tdLeft">LZ_WEST</td>
        </tr>
        </table></body></html>
    "#;

    #[test]
    fn test_parse_resolves_known_identifiers() {
        let report = PriceReport::parse(REPORT_FIXTURE).unwrap();

        let quote = report.quote("BAC_RN_ALL").unwrap();
        assert_eq!(quote.price, 1032.25);
        assert_eq!(quote.lmp, 24.50);

        let quote = report.quote("TGS_GT01").unwrap();
        assert_eq!(quote.price, 18.90);
        assert_eq!(quote.lmp, -3.75);
    }

    #[test]
    fn test_unknown_identifier_has_no_quote() {
        let report = PriceReport::parse(REPORT_FIXTURE).unwrap();
        assert!(report.quote("NOT_A_NODE").is_none());
        assert!(matches!(
            report.require_quote("NOT_A_NODE"),
            Err(FetchError::NoData(_))
        ));
    }

    #[test]
    fn test_non_numeric_cell_drops_the_row() {
        let report = PriceReport::parse(REPORT_FIXTURE).unwrap();
        // LMP cell is "n/a", so the whole row yields no quote
        assert!(report.quote("RN_ECEC_HOLT").is_none());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_comma_separators_are_stripped() {
        let report = PriceReport::parse(REPORT_FIXTURE).unwrap();
        assert_eq!(report.quote("BAC_RN_ALL").unwrap().price, 1032.25);
    }

    #[test]
    fn test_empty_document_parses_to_empty_report() {
        let report = PriceReport::parse("<html><body></body></html>").unwrap();
        assert!(report.is_empty());
    }
}
