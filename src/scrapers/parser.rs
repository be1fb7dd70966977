use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

use super::{ExtractionConfig, RateQuote, RejectionReason};

lazy_static! {
    static ref YEAR_TOKEN_REGEX: Regex = Regex::new(r"^\d{4}$").unwrap();
}

/// Extract the visible text of every `<tr>` in a page, one string per row.
///
/// Cell texts are joined with single spaces so the row reads the way a browser
/// would render it. Rows without any text are dropped.
pub fn extract_row_texts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut rows = Vec::new();

    if let Ok(selector) = Selector::parse("tr") {
        for element in document.select(&selector) {
            let text = element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            if !text.is_empty() {
                rows.push(text);
            }
        }
    }

    rows
}

/// Parse a token such as `10,50%` into `10.5`.
///
/// Returns `None` when the token has no percent sign or the rest is not a number.
pub fn parse_percent_token(token: &str) -> Option<f64> {
    if !token.contains('%') {
        return None;
    }

    let cleaned = token.replace('%', "").replace(',', ".");
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// First 4-digit token strictly greater than `min_year`.
pub fn find_maturity_year(tokens: &[&str], min_year: i32) -> Option<i32> {
    tokens
        .iter()
        .filter(|t| YEAR_TOKEN_REGEX.is_match(t))
        .filter_map(|t| t.parse::<i32>().ok())
        .find(|year| *year > min_year)
}

/// Apply the row heuristic to a single row of text.
pub fn extract_rate_quote(
    row: &str,
    config: &ExtractionConfig,
) -> Result<RateQuote, RejectionReason> {
    let tokens: Vec<&str> = row.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(RejectionReason::EmptyRow);
    }

    if !config.keywords.iter().any(|k| row.contains(k.as_str())) {
        return Err(RejectionReason::NoKeywordMatch);
    }

    // First in-band percent token wins; out-of-band ones fall through
    let mut first_out_of_band = None;
    let mut rate = None;
    for parsed in tokens.iter().filter_map(|t| parse_percent_token(t)) {
        if config.band.contains(parsed) {
            rate = Some(parsed);
            break;
        }
        first_out_of_band.get_or_insert(parsed);
    }

    let rate_percent = match (rate, first_out_of_band) {
        (Some(rate), _) => rate,
        (None, Some(rejected)) => return Err(RejectionReason::OutOfPlausibleBand(rejected)),
        (None, None) => return Err(RejectionReason::NoPercentToken),
    };

    let label_len = config.label_tokens.min(tokens.len());

    Ok(RateQuote {
        label: tokens[..label_len].join(" "),
        rate_percent,
        maturity_year: find_maturity_year(&tokens, config.min_maturity_year),
    })
}

/// Run the heuristic over every row, keeping the rows that yield a quote.
pub fn extract_rate_quotes<S: AsRef<str>>(rows: &[S], config: &ExtractionConfig) -> Vec<RateQuote> {
    let mut quotes = Vec::new();

    for row in rows {
        match extract_rate_quote(row.as_ref(), config) {
            Ok(quote) => quotes.push(quote),
            Err(RejectionReason::NoKeywordMatch) | Err(RejectionReason::EmptyRow) => {}
            Err(reason) => {
                tracing::debug!(row = %row.as_ref(), %reason, "Dropping matching row");
            }
        }
    }

    quotes
}
